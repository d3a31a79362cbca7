// =====================================================
// 통합 테스트 공통 헬퍼
// =====================================================
// 목적: 실제 MySQL 없이 프로시저 실행 계층을 검증하기 위한
// 스크립트 가능한 가짜 풀/러너 제공
//
// Scriptable fake pool/runner so the procedure execution layer can be
// verified without a real MySQL server. Every pool/runner call is
// appended to a shared ordered event log.
//
// 사용법:
// ```rust
// mod common;
// use common::*;
//
// #[tokio::test]
// async fn test_something() {
//     let pool = MockPool::new(MockScript::default());
//     let executor = pool.executor();
//     // 테스트 코드...
// }
// ```
// =====================================================

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use payment_api_server::shared::database::{
    ProcedureExecutor, ProcedurePool, ProcedureResult, QueryRunner,
};
use payment_api_server::shared::errors::DbError;

/// 풀/러너에 대한 호출 한 건 (순서 보존)
/// One call against the pool/runner (order preserving)
#[derive(Debug, Clone, PartialEq)]
pub enum DbEvent {
    Acquire,
    Begin,
    Query(String),
    Commit,
    Rollback,
    Release,
}

/// 가짜 풀의 동작 스크립트
/// Behavior script for the fake pool
#[derive(Default, Clone)]
pub struct MockScript {
    /// acquire가 즉시 실패
    pub fail_acquire: bool,
    /// N번째 query가 실패 (1부터, 러너 전체 기준 누적)
    /// The Nth query fails (1-based, counted across all runners)
    pub fail_on_query: Option<usize>,
    /// 모든 commit이 실패
    pub fail_commit: bool,
    /// 모든 rollback이 실패
    pub fail_rollback: bool,
    /// 모든 release가 실패
    pub fail_release: bool,
    /// 성공한 query마다 반환할 행
    /// Rows returned by every successful query
    pub rows: Vec<Value>,
    /// 성공한 query마다 반환할 영향 행 수
    pub rows_affected: u64,
}

pub struct MockPool {
    script: MockScript,
    events: Arc<Mutex<Vec<DbEvent>>>,
    query_count: Arc<Mutex<usize>>,
}

impl MockPool {
    pub fn new(script: MockScript) -> Arc<Self> {
        Arc::new(Self {
            script,
            events: Arc::new(Mutex::new(Vec::new())),
            query_count: Arc::new(Mutex::new(0)),
        })
    }

    /// 이 풀을 사용하는 실행기 생성
    /// Build an executor backed by this pool
    pub fn executor(self: &Arc<Self>) -> ProcedureExecutor {
        ProcedureExecutor::new(self.clone() as Arc<dyn ProcedurePool>)
    }

    /// 기록된 이벤트 로그의 스냅샷
    /// Snapshot of the recorded event log
    pub fn events(&self) -> Vec<DbEvent> {
        self.events.lock().unwrap().clone()
    }

    /// 로그에서 특정 이벤트의 개수
    /// Count occurrences of one event kind in the log
    pub fn count(&self, matches: fn(&DbEvent) -> bool) -> usize {
        self.events.lock().unwrap().iter().filter(|e| matches(e)).count()
    }

    fn log(&self, event: DbEvent) {
        self.events.lock().unwrap().push(event);
    }
}

#[async_trait]
impl ProcedurePool for MockPool {
    async fn acquire(&self) -> Result<Box<dyn QueryRunner>, DbError> {
        self.log(DbEvent::Acquire);

        if self.script.fail_acquire {
            return Err(DbError::Connection("pool exhausted".to_string()));
        }

        Ok(Box::new(MockRunner {
            script: self.script.clone(),
            events: self.events.clone(),
            query_count: self.query_count.clone(),
        }))
    }
}

pub struct MockRunner {
    script: MockScript,
    events: Arc<Mutex<Vec<DbEvent>>>,
    query_count: Arc<Mutex<usize>>,
}

impl MockRunner {
    fn log(&self, event: DbEvent) {
        self.events.lock().unwrap().push(event);
    }
}

#[async_trait]
impl QueryRunner for MockRunner {
    async fn begin(&mut self) -> Result<(), DbError> {
        self.log(DbEvent::Begin);
        Ok(())
    }

    async fn query(&mut self, sql: &str) -> Result<ProcedureResult, DbError> {
        self.log(DbEvent::Query(sql.to_string()));

        let count = {
            let mut count = self.query_count.lock().unwrap();
            *count += 1;
            *count
        };

        if self.script.fail_on_query == Some(count) {
            return Err(DbError::Transaction("procedure raised an error".to_string()));
        }

        Ok(ProcedureResult {
            rows: self.script.rows.clone(),
            rows_affected: self.script.rows_affected,
        })
    }

    async fn commit(&mut self) -> Result<(), DbError> {
        self.log(DbEvent::Commit);

        if self.script.fail_commit {
            return Err(DbError::Transaction("commit failed".to_string()));
        }
        Ok(())
    }

    async fn rollback(&mut self) -> Result<(), DbError> {
        self.log(DbEvent::Rollback);

        if self.script.fail_rollback {
            return Err(DbError::Rollback("rollback failed".to_string()));
        }
        Ok(())
    }

    async fn release(&mut self) -> Result<(), DbError> {
        self.log(DbEvent::Release);

        if self.script.fail_release {
            return Err(DbError::Release("release failed".to_string()));
        }
        Ok(())
    }
}

/// Query 이벤트인지 판별 (count 헬퍼용)
pub fn is_query(event: &DbEvent) -> bool {
    matches!(event, DbEvent::Query(_))
}

/// 로그에서 Query 이벤트의 SQL만 추출
/// Extract just the SQL of each Query event from the log
pub fn queries(events: &[DbEvent]) -> Vec<String> {
    events
        .iter()
        .filter_map(|e| match e {
            DbEvent::Query(sql) => Some(sql.clone()),
            _ => None,
        })
        .collect()
}
