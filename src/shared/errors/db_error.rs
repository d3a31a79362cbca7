use thiserror::Error;

/// 데이터베이스 계층 에러
/// Database-layer errors
///
/// Rollback/Release는 2차 실패로, 실행기에서 로그만 남기고 삼켜집니다.
/// 1차 결과(성공 또는 원래 에러)를 절대 가리지 않습니다.
/// Rollback/Release are secondary failures: logged by the executor and
/// swallowed, never masking the primary outcome.
#[derive(Error, Debug)]
pub enum DbError {
    /// 커넥션 풀에서 연결 획득 실패 (풀 고갈, 타임아웃)
    /// Failed to acquire a connection from the pool (exhausted, timeout)
    #[error("Database connection error: {0}")]
    Connection(String),

    /// 열린 트랜잭션 안에서 구문 실행 실패
    /// Statement failure inside an open transaction
    #[error("Transaction error: {0}")]
    Transaction(String),

    /// 롤백 실패 (로그 전용)
    /// Rollback failure (log only)
    #[error("Rollback error: {0}")]
    Rollback(String),

    /// 커넥션 반환 실패 (로그 전용)
    /// Connection release failure (log only)
    #[error("Release error: {0}")]
    Release(String),
}
