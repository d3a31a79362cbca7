// Payment domain handlers
pub mod payment_handler;
