use axum::{http::StatusCode, Json};
use serde_json::json;
use thiserror::Error;

/// 인증 관련 에러
/// Authentication-related errors
#[derive(Error, Debug)]
pub enum AuthError {
    /// 잘못된 사용자 ID 또는 비밀번호
    /// Invalid user ID or password
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// 비밀번호 검증 실패
    /// Failed to verify password
    #[error("Failed to verify password: {0}")]
    PasswordVerificationFailed(String),

    /// 잘못된 또는 만료된 토큰
    /// Invalid or expired token
    #[error("Invalid or expired token")]
    InvalidToken,

    /// 토큰이 제공되지 않음
    /// Token not provided
    #[error("Token not provided")]
    MissingToken,

    /// 데이터베이스 에러
    /// Database error
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// 내부 서버 에러
    /// Internal server error
    #[error("Internal server error: {0}")]
    Internal(String),
}

/// AuthError를 HTTP 응답으로 변환
impl From<AuthError> for (StatusCode, Json<serde_json::Value>) {
    fn from(err: AuthError) -> Self {
        let (status, message) = match &err {
            AuthError::InvalidCredentials => (StatusCode::UNAUTHORIZED, err.to_string()),
            AuthError::InvalidToken | AuthError::MissingToken => {
                (StatusCode::UNAUTHORIZED, err.to_string())
            }
            AuthError::PasswordVerificationFailed(_)
            | AuthError::DatabaseError(_)
            | AuthError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
        };

        (status, Json(json!({ "message": message })))
    }
}
