// Payment domain services
pub mod payment_service;
pub mod state;

pub use payment_service::PaymentService;
pub use state::PaymentState;
