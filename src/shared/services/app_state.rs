use crate::domains::auth::services::{AuthState, JwtService};
use crate::domains::payment::services::PaymentState;
use crate::shared::config::Config;
use crate::shared::database::Database;

/// Application state (combines all domain states)
/// 애플리케이션 상태 (모든 도메인 상태를 조합)
///
/// 각 도메인의 State를 조합하여 전체 애플리케이션 상태를 관리
#[derive(Clone)]
pub struct AppState {
    /// 데이터베이스 연결 (공유)
    /// Database connection (shared)
    pub db: Database,
    pub auth_state: AuthState,
    pub payment_state: PaymentState,
}

impl AppState {
    /// Create AppState with database
    /// 모든 도메인 State를 초기화하고 조합
    pub fn new(db: Database, config: &Config) -> Self {
        // 1. 공유 서비스 생성 (JWT 등)
        let jwt_service = JwtService::new(config.jwt_secret.clone());

        // 2. 각 도메인 State 생성
        let auth_state = AuthState::new(db.clone(), jwt_service);
        let payment_state = PaymentState::new(db.clone());

        // 3. AppState 조합
        Self {
            db,
            auth_state,
            payment_state,
        }
    }
}
