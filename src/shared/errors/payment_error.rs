use axum::{http::StatusCode, Json};
use serde_json::json;
use thiserror::Error;

/// 결제 관련 에러
/// Payment-related errors
#[derive(Error, Debug)]
pub enum PaymentError {
    /// 결제를 찾을 수 없음
    /// Payment not found
    #[error("Payment not found: {payment_id}")]
    NotFound { payment_id: String },

    /// 잘못된 결제 금액 (0 이하)
    /// Invalid payment amount (non-positive)
    #[error("Invalid payment amount")]
    InvalidAmount,

    /// 필수 필드 누락
    /// Missing required field
    #[error("Missing required field: {field}")]
    MissingField { field: &'static str },

    /// 데이터베이스 에러
    /// Database error
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// 내부 서버 에러
    /// Internal server error
    #[error("Internal server error: {0}")]
    Internal(String),
}

/// PaymentError를 HTTP 응답으로 변환
impl From<PaymentError> for (StatusCode, Json<serde_json::Value>) {
    fn from(err: PaymentError) -> Self {
        let (status, message) = match &err {
            PaymentError::NotFound { .. } => (StatusCode::NOT_FOUND, err.to_string()),
            PaymentError::InvalidAmount | PaymentError::MissingField { .. } => {
                (StatusCode::BAD_REQUEST, err.to_string())
            }
            PaymentError::DatabaseError(_) | PaymentError::Internal(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
        };

        (status, Json(json!({ "success": false, "message": message })))
    }
}
