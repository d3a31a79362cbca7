use argon2::{Argon2, PasswordHash, PasswordVerifier};

use crate::domains::auth::services::JwtService;
use crate::shared::database::{Database, SessionRepository, UserRepository};
use crate::shared::errors::AuthError;

// 인증 서비스
// AuthService: handles authentication business logic
#[derive(Clone)]
pub struct AuthService {
    db: Database,
    jwt_service: JwtService,
}

impl AuthService {
    pub fn new(db: Database, jwt_service: JwtService) -> Self {
        Self { db, jwt_service }
    }

    // 로그인 (비즈니스 로직)
    // Returns: session token
    pub async fn login(&self, user_id: &str, password: &str) -> Result<String, AuthError> {
        // Repository 생성 (Service 내부에서)
        let user_repo = UserRepository::new(self.db.pool().clone());

        // 1. 사용자 조회
        let user = user_repo
            .find_by_id(user_id)
            .await
            .map_err(|e| AuthError::DatabaseError(format!("Failed to fetch user: {}", e)))?;

        let user = match user {
            Some(u) => u,
            None => return Err(AuthError::InvalidCredentials),
        };

        // 2. 비밀번호 검증
        Self::verify_password(password, &user.password_hash)?;

        // 3. 세션 토큰 발급
        let token = self.jwt_service.generate_token(&user.user_id)?;

        // 4. 세션 기록
        let session_repo = SessionRepository::new(self.db.pool().clone());
        session_repo
            .create_session(&user.user_id, &token)
            .await
            .map_err(|e| AuthError::DatabaseError(format!("Failed to create session: {}", e)))?;

        Ok(token)
    }

    // 로그아웃 (세션 삭제)
    pub async fn logout(&self, user_id: &str) -> Result<(), AuthError> {
        let session_repo = SessionRepository::new(self.db.pool().clone());

        session_repo
            .delete_session(user_id)
            .await
            .map_err(|e| AuthError::DatabaseError(format!("Failed to delete session: {}", e)))?;

        Ok(())
    }

    /// 비밀번호 검증 (argon2)
    /// Verify password (argon2)
    fn verify_password(password: &str, password_hash: &str) -> Result<(), AuthError> {
        let parsed_hash = PasswordHash::new(password_hash)
            .map_err(|e| AuthError::PasswordVerificationFailed(e.to_string()))?;

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .map_err(|_| AuthError::InvalidCredentials)
    }
}
