use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// 로그인 요청 모델
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(as = LoginRequest)]
pub struct LoginRequest {
    /// 사용자 ID
    /// User ID
    #[serde(rename = "userId")]
    #[schema(example = "admin01")]
    pub user_id: String,

    /// 비밀번호
    /// Password
    #[schema(example = "password123")]
    pub password: String,
}

// 로그인 응답 모델
#[derive(Debug, Serialize, ToSchema)]
#[schema(as = LoginResponse)]
pub struct LoginResponse {
    /// JWT 세션 토큰 (1시간 만료)
    /// JWT session token (1 hour expiry)
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub token: String,
}
