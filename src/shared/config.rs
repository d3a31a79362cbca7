use std::env;

/// 애플리케이션 설정 (환경 변수에서 로드)
/// Application configuration (loaded from environment variables)
#[derive(Debug, Clone)]
pub struct Config {
    /// 애플리케이션 이름
    /// Application name
    pub app_name: String,

    /// 실행 환경 (development/production)
    /// Runtime environment (development/production)
    pub environment: String,

    /// HTTP 리스닝 포트
    /// HTTP listen port
    pub port: u16,

    /// JWT 서명 시크릿
    /// JWT signing secret
    pub jwt_secret: String,

    /// 데이터베이스 설정
    /// Database settings
    pub database: DatabaseConfig,
}

/// 데이터베이스 연결 설정
/// Database connection settings
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub database: String,

    /// 최대 동시 커넥션 수
    /// Maximum concurrent connections
    pub pool_size: u32,

    /// 커넥션 획득 타임아웃 (초)
    /// Connection acquire timeout (seconds)
    pub connect_timeout_secs: u64,
}

impl Config {
    /// 환경 변수에서 설정 로드 (없으면 기본값)
    /// Load configuration from environment variables (with defaults)
    pub fn from_env() -> Self {
        Self {
            app_name: env_or("APP_NAME", "payment_api_server"),
            environment: env_or("APP_ENVIRONMENT", "development"),
            port: parse_or("PORT", 3000),
            jwt_secret: env_or("JWT_SECRET", "your-secret-key-change-in-production"),
            database: DatabaseConfig {
                host: env_or("DB_HOST", "localhost"),
                port: parse_or("DB_PORT", 3306),
                username: env_or("DB_USER", "root"),
                password: env_or("DB_PASSWORD", ""),
                database: env_or("DB_NAME", "headlesscms"),
                pool_size: parse_or("DB_POOL_SIZE", 10),
                connect_timeout_secs: parse_or("DB_CONNECT_TIMEOUT_SECS", 30),
            },
        }
    }
}

impl DatabaseConfig {
    /// MySQL 연결 문자열 조립
    /// Assemble the MySQL connection URL
    pub fn url(&self) -> String {
        format!(
            "mysql://{}:{}@{}:{}/{}",
            self.username, self.password, self.host, self.port, self.database
        )
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
