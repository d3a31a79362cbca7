// Auth domain services
pub mod auth_service;
pub mod jwt_service;
pub mod state;

pub use auth_service::AuthService;
pub use jwt_service::JwtService;
pub use state::AuthState;
