pub mod middleware;
pub mod service;

pub use middleware::jwt_auth_middleware;
pub use service::{AuthService, Claims, hash_password, verify_password};
