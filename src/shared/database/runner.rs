use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use futures_util::TryStreamExt;
use rust_decimal::Decimal;
use serde_json::{Map, Value};
use sqlx::mysql::{MySql, MySqlRow};
use sqlx::pool::PoolConnection;
use sqlx::{Column, Either, MySqlPool, Row, TypeInfo};

use crate::shared::errors::DbError;

/// 프로시저 호출 한 번의 실행 결과
/// Result of a single procedure invocation
///
/// 첫 번째 결과 집합만 노출합니다 (프로시저 계약상 이후 집합은 무의미).
/// Only the first result set is surfaced (later sets carry no meaning in
/// the procedure contracts).
#[derive(Debug, Clone, Default)]
pub struct ProcedureResult {
    /// 첫 번째 결과 집합의 행 (JSON 오브젝트)
    /// Rows of the first result set (JSON objects)
    pub rows: Vec<Value>,

    /// 영향받은 행 수 (쓰기 전용 프로시저용)
    /// Affected row count (for write-only procedures)
    pub rows_affected: u64,
}

impl ProcedureResult {
    /// 첫 행 반환 (단건 조회용)
    /// First row, for single-row lookups
    pub fn first_row(&self) -> Option<&Value> {
        self.rows.first()
    }
}

/// 트랜잭션 쿼리 러너: 커넥션 하나를 독점 소유
/// Transactional query runner: exclusively owns one connection
///
/// 호출 순서는 엄격함: begin → query* → commit|rollback → release.
/// release 이후 재사용 금지.
/// Strict call ordering: begin → query* → commit|rollback → release.
/// Never reused after release.
#[async_trait]
pub trait QueryRunner: Send {
    /// 트랜잭션 시작
    /// Begin a transaction
    async fn begin(&mut self) -> Result<(), DbError>;

    /// 구문 실행 후 첫 결과 집합 반환
    /// Execute a statement and return the first result set
    async fn query(&mut self, sql: &str) -> Result<ProcedureResult, DbError>;

    /// 커밋
    /// Commit
    async fn commit(&mut self) -> Result<(), DbError>;

    /// 롤백
    /// Roll back
    async fn rollback(&mut self) -> Result<(), DbError>;

    /// 커넥션을 풀로 반환 (정확히 한 번)
    /// Return the connection to the pool (exactly once)
    async fn release(&mut self) -> Result<(), DbError>;
}

/// 커넥션 풀 추상화 (테스트에서 가짜 풀로 대체 가능)
/// Connection pool abstraction (tests can substitute a fake pool)
#[async_trait]
pub trait ProcedurePool: Send + Sync {
    /// 풀에서 러너 하나 획득
    /// Acquire one runner from the pool
    async fn acquire(&self) -> Result<Box<dyn QueryRunner>, DbError>;
}

#[async_trait]
impl ProcedurePool for MySqlPool {
    async fn acquire(&self) -> Result<Box<dyn QueryRunner>, DbError> {
        // 풀 고갈/타임아웃은 ConnectionError로 전파 (재시도 없음)
        let conn = MySqlPool::acquire(self)
            .await
            .map_err(|e| DbError::Connection(format!("Failed to acquire connection: {}", e)))?;

        Ok(Box::new(SqlxQueryRunner { conn: Some(conn) }))
    }
}

/// sqlx MySQL 커넥션 기반 러너
/// Runner backed by an sqlx MySQL connection
pub struct SqlxQueryRunner {
    // release 시 take되어 풀로 반환됨
    conn: Option<PoolConnection<MySql>>,
}

impl SqlxQueryRunner {
    fn conn(&mut self) -> Result<&mut PoolConnection<MySql>, DbError> {
        self.conn
            .as_mut()
            .ok_or_else(|| DbError::Transaction("Connection already released".to_string()))
    }

    async fn exec(&mut self, sql: &'static str, kind: fn(String) -> DbError) -> Result<(), DbError> {
        let conn = self.conn()?;
        sqlx::query(sql)
            .execute(&mut **conn)
            .await
            .map_err(|e| kind(format!("{}: {}", sql, e)))?;
        Ok(())
    }
}

#[async_trait]
impl QueryRunner for SqlxQueryRunner {
    async fn begin(&mut self) -> Result<(), DbError> {
        self.exec("START TRANSACTION", DbError::Transaction).await
    }

    async fn query(&mut self, sql: &str) -> Result<ProcedureResult, DbError> {
        let conn = self.conn()?;

        let mut rows: Vec<Value> = Vec::new();
        let mut rows_affected = 0u64;
        let mut set_index = 0usize;

        {
            let mut stream = sqlx::query(sql).fetch_many(&mut **conn);

            while let Some(step) = stream
                .try_next()
                .await
                .map_err(|e| DbError::Transaction(format!("Query failed: {}", e)))?
            {
                match step {
                    // 각 결과 집합의 종료 패킷: affectedRows 누적
                    Either::Left(done) => {
                        rows_affected += done.rows_affected();
                        set_index += 1;
                    }
                    // 첫 번째 결과 집합의 행만 수집, 이후 집합은 버림
                    Either::Right(row) => {
                        if set_index == 0 {
                            rows.push(row_to_json(&row)?);
                        }
                    }
                }
            }
        }

        Ok(ProcedureResult { rows, rows_affected })
    }

    async fn commit(&mut self) -> Result<(), DbError> {
        self.exec("COMMIT", DbError::Transaction).await
    }

    async fn rollback(&mut self) -> Result<(), DbError> {
        let conn = self.conn()?;
        sqlx::query("ROLLBACK")
            .execute(&mut **conn)
            .await
            .map_err(|e| DbError::Rollback(e.to_string()))?;
        Ok(())
    }

    async fn release(&mut self) -> Result<(), DbError> {
        // drop 시 sqlx가 커넥션을 풀로 반환
        // sqlx returns the connection to the pool on drop
        self.conn.take();
        Ok(())
    }
}

/// MySQL 행을 JSON 오브젝트로 변환
/// Convert a MySQL row into a JSON object
///
/// 프로시저 결과는 형태가 고정되어 있지 않으므로, 도메인 모델로의 변환은
/// JSON을 경유합니다 (레포지토리에서 serde로 역직렬화).
/// Procedure results have no fixed shape; domain decoding goes through
/// JSON (repositories deserialize with serde).
fn row_to_json(row: &MySqlRow) -> Result<Value, DbError> {
    let mut object = Map::with_capacity(row.columns().len());

    for (index, column) in row.columns().iter().enumerate() {
        let name = column.name();
        let type_name = column.type_info().name();

        let value = match type_name {
            "NULL" => Value::Null,
            "BOOLEAN" => to_json(row.try_get::<Option<bool>, _>(index), name)?,
            "TINYINT" | "SMALLINT" | "MEDIUMINT" | "INT" | "BIGINT" => {
                to_json(row.try_get::<Option<i64>, _>(index), name)?
            }
            "TINYINT UNSIGNED" | "SMALLINT UNSIGNED" | "MEDIUMINT UNSIGNED" | "INT UNSIGNED"
            | "BIGINT UNSIGNED" => to_json(row.try_get::<Option<u64>, _>(index), name)?,
            "FLOAT" | "DOUBLE" => to_json(row.try_get::<Option<f64>, _>(index), name)?,
            "DECIMAL" => to_json(row.try_get::<Option<Decimal>, _>(index), name)?,
            "DATETIME" => to_json(row.try_get::<Option<NaiveDateTime>, _>(index), name)?,
            "TIMESTAMP" => to_json(row.try_get::<Option<DateTime<Utc>>, _>(index), name)?,
            "DATE" => to_json(row.try_get::<Option<NaiveDate>, _>(index), name)?,
            "TIME" => to_json(row.try_get::<Option<NaiveTime>, _>(index), name)?,
            "JSON" => to_json(row.try_get::<Option<Value>, _>(index), name)?,
            // CHAR/VARCHAR/TEXT/ENUM 등은 문자열로
            _ => to_json(row.try_get::<Option<String>, _>(index), name)?,
        };

        object.insert(name.to_string(), value);
    }

    Ok(Value::Object(object))
}

fn to_json<T: serde::Serialize>(
    decoded: Result<Option<T>, sqlx::Error>,
    column: &str,
) -> Result<Value, DbError> {
    let decoded = decoded
        .map_err(|e| DbError::Transaction(format!("Failed to decode column {}: {}", column, e)))?;

    match decoded {
        Some(value) => serde_json::to_value(value).map_err(|e| {
            DbError::Transaction(format!("Failed to convert column {} to JSON: {}", column, e))
        }),
        None => Ok(Value::Null),
    }
}
