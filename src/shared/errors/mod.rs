// Shared errors
pub mod auth_error;
pub mod db_error;
pub mod payment_error;

pub use auth_error::*;
pub use db_error::*;
pub use payment_error::*;
