use anyhow::{Context, Result};
use sqlx::{MySqlPool, Row};

use crate::domains::auth::models::User;

pub struct UserRepository {
    pool: MySqlPool,
}

impl UserRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// 사용자 ID로 조회
    /// Get user by ID
    pub async fn find_by_id(&self, user_id: &str) -> Result<Option<User>> {
        let row = sqlx::query(
            r#"
            SELECT userId, pass, userType, name
            FROM dbo_Users
            WHERE userId = ?
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch user by id")?;

        let row = match row {
            Some(r) => r,
            None => return Ok(None),
        };

        Ok(Some(User {
            user_id: row.get("userId"),
            password_hash: row.get("pass"),
            user_type: row.get("userType"),
            name: row.get("name"),
        }))
    }
}
