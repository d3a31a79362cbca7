// Routes module: 라우팅 설정
// 역할: 모든 도메인의 라우터를 조합
// Routes module: combines all domain routers

use crate::shared::services::AppState;
use axum::Router;

// 각 도메인의 routes import
use crate::domains::auth::routes::create_auth_router;
use crate::domains::payment::routes::create_payment_router;

/// Create main router (combines all domain routers)
/// 메인 라우터 생성 (모든 도메인 라우터 조합)
pub fn create_router() -> Router<AppState> {
    Router::new()
        .nest("/api/auth", create_auth_router())
        .nest("/api/payments", create_payment_router())
}
