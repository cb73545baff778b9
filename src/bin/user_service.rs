//! User service entry point.

use std::sync::Arc;

use anyhow::Result;

use micromart::config::AppConfig;
use micromart::db::Database;
use micromart::state::AppState;
use micromart::{logging, schema, server};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env()?;
    let _log_guard = logging::init_logging(&config.logging);
    tracing::info!("Starting user service");

    let db = Database::connect(&config.database.url()).await?;
    schema::init_user_schema(db.pool()).await?;

    let addr = config.server.bind_addr();
    let state = Arc::new(AppState::new(db, &config));
    server::serve(server::user_router(state), &addr).await
}
