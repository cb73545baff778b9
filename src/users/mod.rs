pub mod handlers;
pub mod repository;

pub use repository::UserRepository;
