// All repositories module
pub mod payment_repository;
pub mod session_repository;
pub mod user_repository;

// Re-export all repositories for convenience
pub use payment_repository::*;
pub use session_repository::*;
pub use user_repository::*;
