//! Shared application state, built once per service and passed to handlers
//! behind an `Arc`.

use crate::auth::AuthService;
use crate::config::AppConfig;
use crate::db::Database;
use crate::orders::audit::StatusAuditLog;

pub struct AppState {
    pub db: Database,
    pub auth: AuthService,
    pub audit: StatusAuditLog,
}

impl AppState {
    pub fn new(db: Database, config: &AppConfig) -> Self {
        Self {
            db,
            auth: AuthService::new(&config.jwt),
            audit: StatusAuditLog::new(&config.audit_log),
        }
    }
}
