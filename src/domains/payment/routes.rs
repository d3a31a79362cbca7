// Payment domain routes
// 결제 도메인 라우터
use crate::domains::payment::handlers::payment_handler;
use crate::shared::services::AppState;
use axum::{
    routing::{get, post, put},
    Router,
};

/// Create payment router
/// 결제 라우터 생성
///
/// 고정 경로(/bulk, /status/bulk)는 /:payment_id 매칭보다 먼저 등록
/// Fixed paths (/bulk, /status/bulk) register before the /:payment_id matcher
pub fn create_payment_router() -> Router<AppState> {
    Router::new()
        .route("/", post(payment_handler::create_payment)) // 인증 필요
        .route("/bulk", post(payment_handler::bulk_create_payments)) // 인증 필요
        .route("/status/bulk", put(payment_handler::bulk_update_status)) // 인증 필요
        .route(
            "/:payment_id",
            get(payment_handler::get_payment).put(payment_handler::update_payment),
        )
        .route("/:payment_id/status", put(payment_handler::update_payment_status))
        .route("/:payment_id/process", post(payment_handler::process_payment))
        .route(
            "/customers/:customer_id/payments",
            get(payment_handler::get_customer_payments),
        )
}
