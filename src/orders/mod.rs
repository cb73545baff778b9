pub mod audit;
pub mod handlers;
pub mod repository;

pub use audit::StatusAuditLog;
pub use repository::OrderRepository;
