use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 사용자 (dbo_Users 행)
/// User (dbo_Users row)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// 사용자 ID
    /// User ID
    pub user_id: String,

    /// 비밀번호 해시 (argon2)
    /// Password hash (argon2)
    pub password_hash: String,

    /// 사용자 유형
    /// User type
    pub user_type: String,

    /// 이름
    /// Name
    pub name: String,
}

// 사용자 응답 모델 (비밀번호 제외)
#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(rename = "userType")]
    pub user_type: String,
    pub name: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            user_id: user.user_id,
            user_type: user.user_type,
            name: user.name,
        }
    }
}
