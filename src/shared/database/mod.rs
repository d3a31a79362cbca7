// Database module
// 데이터베이스 모듈: 커넥션 풀, 프로시저 실행 계층, 레포지토리
pub mod connection;
pub mod executor;
pub mod params;
pub mod repositories;
pub mod runner;

pub use connection::Database;
pub use executor::{ProcedureExecutor, DEFAULT_BATCH_SIZE};
pub use params::{build_call, ProcParam};
pub use repositories::*;
pub use runner::{ProcedurePool, ProcedureResult, QueryRunner};
