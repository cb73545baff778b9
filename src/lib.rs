//! micromart - sibling CRUD services over PostgreSQL
//!
//! Three independently deployable HTTP services sharing one library:
//!
//! - [`users`] - registration, login (JWT issuance) and user CRUD
//! - [`products`] - product CRUD, conjunctive search, absolute stock updates
//! - [`orders`] - order creation with stock checks, eager-loaded reads,
//!   audited status transitions
//!
//! Shared plumbing:
//!
//! - [`config`] - typed configuration assembled once from the environment
//! - [`db`] - PostgreSQL pool wrapper with a health ping
//! - [`schema`] - per-service table creation at startup
//! - [`auth`] - token issuance/validation, password hashing, bearer middleware
//! - [`error`] - one API error type, always a JSON `error` body
//! - [`server`] - per-service routers and the serve loop

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod models;
pub mod orders;
pub mod products;
pub mod schema;
pub mod server;
pub mod state;
pub mod users;

// Convenient re-exports at crate root
pub use config::AppConfig;
pub use db::Database;
pub use error::ApiError;
pub use models::{Order, OrderDetail, Product, User};
pub use state::AppState;
