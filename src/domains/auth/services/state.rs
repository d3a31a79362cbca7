// Auth domain state
// 인증 도메인 상태
use crate::domains::auth::services::{AuthService, JwtService};
use crate::shared::database::Database;

/// 인증 도메인의 서비스 묶음
/// Auth domain service bundle
#[derive(Clone)]
pub struct AuthState {
    pub auth_service: AuthService,
    pub jwt_service: JwtService,
}

impl AuthState {
    pub fn new(db: Database, jwt_service: JwtService) -> Self {
        let auth_service = AuthService::new(db, jwt_service.clone());

        Self {
            auth_service,
            jwt_service,
        }
    }
}
