//! Router assembly and HTTP serving for the three services.

use std::sync::Arc;

use anyhow::Context;
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    middleware::from_fn_with_state,
    routing::{get, post, put},
};
use serde::Serialize;
use tokio::net::TcpListener;

use crate::auth::jwt_auth_middleware;
use crate::state::AppState;
use crate::{orders, products, users};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// GET /api/health — reports store connectivity.
pub async fn health_check(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<HealthResponse>) {
    match state.db.health_check().await {
        Ok(()) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "healthy",
                error: None,
            }),
        ),
        Err(err) => {
            tracing::error!("Database ping failed: {err}");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse {
                    status: "unhealthy",
                    error: Some(err.to_string()),
                }),
            )
        }
    }
}

/// User service routes. Register and login are public; everything else
/// requires a bearer token.
pub fn user_router(state: Arc<AppState>) -> Router {
    let public = Router::new()
        .route("/register", post(users::handlers::register))
        .route("/login", post(users::handlers::login));

    let protected = Router::new()
        .route("/", get(users::handlers::list_users))
        .route(
            "/{id}",
            get(users::handlers::get_user)
                .put(users::handlers::update_user)
                .delete(users::handlers::delete_user),
        )
        .layer(from_fn_with_state(state.clone(), jwt_auth_middleware));

    Router::new()
        .route("/api/health", get(health_check))
        .nest("/api/users", public.merge(protected))
        .with_state(state)
}

/// Product service routes.
pub fn product_router(state: Arc<AppState>) -> Router {
    let api = Router::new()
        .route(
            "/",
            post(products::handlers::create_product).get(products::handlers::list_products),
        )
        .route("/search", get(products::handlers::search_products))
        .route(
            "/{id}",
            get(products::handlers::get_product)
                .put(products::handlers::update_product)
                .delete(products::handlers::delete_product),
        )
        .route("/{id}/stock", put(products::handlers::update_stock));

    Router::new()
        .route("/api/health", get(health_check))
        .nest("/api/products", api)
        .with_state(state)
}

/// Order service routes.
pub fn order_router(state: Arc<AppState>) -> Router {
    let api = Router::new()
        .route(
            "/",
            post(orders::handlers::create_order).get(orders::handlers::list_orders),
        )
        .route(
            "/{id}",
            get(orders::handlers::get_order)
                .put(orders::handlers::update_order)
                .delete(orders::handlers::delete_order),
        )
        .route("/{id}/status", put(orders::handlers::update_order_status));

    Router::new()
        .route("/api/health", get(health_check))
        .nest("/api/orders", api)
        .with_state(state)
}

/// Bind and serve until the process is stopped.
pub async fn serve(router: Router, addr: &str) -> anyhow::Result<()> {
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;

    tracing::info!("Listening on http://{addr}");
    axum::serve(listener, router).await.context("Server error")
}
