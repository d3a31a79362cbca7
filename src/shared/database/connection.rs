use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use sqlx::mysql::MySqlPoolOptions;
use sqlx::MySqlPool;

use crate::shared::config::DatabaseConfig;
use crate::shared::database::executor::ProcedureExecutor;

// 데이터베이스 연결 풀
// Database connection pool for MySQL
//
// 풀 한도와 획득 타임아웃은 설정에서 받음 (기본: 커넥션 10개, 30초)
// Pool bound and acquire timeout come from configuration (defaults: 10
// connections, 30 seconds)
#[derive(Clone)]
pub struct Database {
    pool: MySqlPool,
}

impl Database {
    // 데이터베이스 연결 생성
    // Create database connection
    pub async fn new(config: &DatabaseConfig) -> Result<Self> {
        let pool = Self::pool_options(config)
            .connect(&config.url())
            .await
            .context("Failed to connect to database")?;

        Ok(Self { pool })
    }

    /// 설정에서 풀 옵션 조립 (커넥션 상한, 획득 타임아웃)
    /// Build pool options from configuration (bound, acquire timeout)
    fn pool_options(config: &DatabaseConfig) -> MySqlPoolOptions {
        MySqlPoolOptions::new()
            .max_connections(config.pool_size)
            .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
    }

    // 연결 풀 반환
    // Get connection pool
    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }

    /// 프로시저 실행기 생성 (풀 공유)
    /// Create a procedure executor sharing this pool
    pub fn executor(&self) -> ProcedureExecutor {
        ProcedureExecutor::new(Arc::new(self.pool.clone()))
    }
}
