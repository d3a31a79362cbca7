use anyhow::{Context, Result};
use sqlx::MySqlPool;

pub struct SessionRepository {
    pool: MySqlPool,
}

impl SessionRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// 세션 생성 (로그인 시 발급된 토큰 기록)
    /// Create session (records the token issued at login)
    pub async fn create_session(&self, user_id: &str, session_info: &str) -> Result<()> {
        sqlx::query("INSERT INTO dbo_userSessions (userid, sessionInfo) VALUES (?, ?)")
            .bind(user_id)
            .bind(session_info)
            .execute(&self.pool)
            .await
            .context("Failed to create session")?;

        Ok(())
    }

    /// 세션 삭제 (로그아웃)
    /// Delete sessions (logout)
    pub async fn delete_session(&self, user_id: &str) -> Result<()> {
        sqlx::query("DELETE FROM dbo_userSessions WHERE userid = ?")
            .bind(user_id)
            .execute(&self.pool)
            .await
            .context("Failed to delete session")?;

        Ok(())
    }
}
