use std::sync::Arc;

use crate::shared::database::params::{build_call, ProcParam};
use crate::shared::database::runner::{ProcedurePool, ProcedureResult, QueryRunner};
use crate::shared::errors::DbError;

/// 배치 기본 청크 크기
/// Default batch chunk size
pub const DEFAULT_BATCH_SIZE: usize = 1000;

/// 트랜잭션 프로시저 실행기
/// Transactional stored-procedure executor
///
/// 호출 하나 = 커넥션 하나 = 트랜잭션 하나. 성공/실패와 무관하게 커넥션은
/// 정확히 한 번 반환됩니다.
/// One call = one connection = one transaction. The connection is returned
/// exactly once regardless of outcome.
#[derive(Clone)]
pub struct ProcedureExecutor {
    pool: Arc<dyn ProcedurePool>,
}

impl ProcedureExecutor {
    pub fn new(pool: Arc<dyn ProcedurePool>) -> Self {
        Self { pool }
    }

    /// 단일 프로시저 호출 (트랜잭션 한 개)
    /// Single procedure call (one transaction)
    ///
    /// 프로토콜: acquire → begin → CALL → commit | rollback → release.
    /// Protocol: acquire → begin → CALL → commit | rollback → release.
    pub async fn execute(
        &self,
        procedure: &str,
        params: Vec<ProcParam>,
    ) -> Result<ProcedureResult, DbError> {
        // 1. 커넥션 획득 (실패 시 ConnectionError 전파, 재시도 없음)
        let mut runner = self.pool.acquire().await?;

        // 2. 트랜잭션 안에서 호출
        let sets = [params];
        let outcome = Self::run_in_transaction(runner.as_mut(), procedure, &sets).await;

        // 3. 결과와 무관하게 커넥션 반환
        Self::release_runner(runner.as_mut(), procedure).await;

        let mut results = outcome?;
        results
            .pop()
            .ok_or_else(|| DbError::Transaction("No result produced by procedure call".to_string()))
    }

    /// 배치 프로시저 호출 (청크당 트랜잭션 한 개)
    /// Batched procedure calls (one transaction per chunk)
    ///
    /// 입력 순서대로 청크를 나누고, 청크들을 순차 실행합니다. 청크 내 실패는
    /// 그 청크 전체를 롤백하고 이후 청크는 시도하지 않습니다. 이미 커밋된
    /// 이전 청크는 유지됩니다.
    /// Chunks preserve input order and run strictly in sequence. A failure
    /// rolls back the whole failing chunk and skips the remainder; earlier
    /// chunks stay committed.
    pub async fn execute_batch(
        &self,
        procedure: &str,
        param_sets: Vec<Vec<ProcParam>>,
        batch_size: Option<usize>,
    ) -> Result<Vec<ProcedureResult>, DbError> {
        let batch_size = batch_size.unwrap_or(DEFAULT_BATCH_SIZE).max(1);
        let mut results = Vec::with_capacity(param_sets.len());

        // 빈 입력이면 커넥션을 획득하지 않음
        for batch in param_sets.chunks(batch_size) {
            let mut runner = self.pool.acquire().await?;
            let outcome = Self::run_in_transaction(runner.as_mut(), procedure, batch).await;
            Self::release_runner(runner.as_mut(), procedure).await;

            results.extend(outcome?);
        }

        Ok(results)
    }

    /// 한 트랜잭션 안에서 파라미터 집합들을 순서대로 호출
    /// Invoke the procedure once per parameter set inside one transaction
    async fn run_in_transaction(
        runner: &mut dyn QueryRunner,
        procedure: &str,
        param_sets: &[Vec<ProcParam>],
    ) -> Result<Vec<ProcedureResult>, DbError> {
        runner.begin().await?;

        let mut results = Vec::with_capacity(param_sets.len());

        for params in param_sets {
            match Self::call(runner, procedure, params).await {
                Ok(result) => results.push(result),
                Err(e) => {
                    // 원래 에러가 전파되어야 하므로 롤백 실패는 로그만 남김
                    Self::rollback_runner(runner, procedure).await;
                    return Err(e);
                }
            }
        }

        match runner.commit().await {
            Ok(()) => Ok(results),
            Err(e) => {
                // 커밋 실패도 롤백을 시도한 뒤 커밋 에러를 전파
                Self::rollback_runner(runner, procedure).await;
                Err(e)
            }
        }
    }

    /// CALL 구문 조립 및 실행
    /// Build and execute the CALL statement
    async fn call(
        runner: &mut dyn QueryRunner,
        procedure: &str,
        params: &[ProcParam],
    ) -> Result<ProcedureResult, DbError> {
        let sql = build_call(procedure, params);

        runner.query(&sql).await.map_err(|e| {
            tracing::error!(procedure, error = %e, "Stored procedure execution failed");
            e
        })
    }

    /// 롤백 시도: 실패해도 삼키고 로그만 (1차 에러를 가리지 않음)
    /// Attempt rollback: failures are logged and swallowed (never mask the
    /// primary error)
    async fn rollback_runner(runner: &mut dyn QueryRunner, procedure: &str) {
        if let Err(e) = runner.rollback().await {
            tracing::warn!(procedure, error = %e, "Failed to roll back transaction");
        }
    }

    /// 커넥션 반환: 실패해도 삼키고 로그만 (성공/실패 결과를 가리지 않음)
    /// Release the connection: failures are logged and swallowed (never
    /// mask a prior success or failure)
    async fn release_runner(runner: &mut dyn QueryRunner, procedure: &str) {
        if let Err(e) = runner.release().await {
            tracing::warn!(procedure, error = %e, "Failed to release database connection");
        }
    }
}
