use axum::http::Method;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use payment_api_server::routes::create_router;
use payment_api_server::shared::config::Config;
use payment_api_server::shared::database::Database;
use payment_api_server::shared::services::AppState;

// Import models for OpenAPI schema
use payment_api_server::domains::auth::models::*;
use payment_api_server::domains::payment::models::*;

// OpenAPI 스키마 정의: Swagger 문서 자동 생성
#[derive(OpenApi)]
#[openapi(
    paths(
        payment_api_server::domains::payment::handlers::payment_handler::create_payment,
        payment_api_server::domains::payment::handlers::payment_handler::bulk_create_payments,
        payment_api_server::domains::payment::handlers::payment_handler::bulk_update_status,
        payment_api_server::domains::payment::handlers::payment_handler::get_payment,
        payment_api_server::domains::payment::handlers::payment_handler::update_payment,
        payment_api_server::domains::payment::handlers::payment_handler::update_payment_status,
        payment_api_server::domains::payment::handlers::payment_handler::process_payment,
        payment_api_server::domains::payment::handlers::payment_handler::get_customer_payments,
        payment_api_server::domains::auth::handlers::auth_handler::login,
        payment_api_server::domains::auth::handlers::auth_handler::logout
    ),
    components(schemas(
        Payment,
        PaymentStatus,
        PaymentRequest,
        UpdatePaymentRequest,
        UpdateStatusRequest,
        ProcessPaymentRequest,
        BulkUpdateStatusRequest,
        PaymentResponse,
        PaymentListResponse,
        BulkUpdateStatusResponse,
        MessageResponse,
        LoginRequest,
        LoginResponse,
        UserResponse
    )),
    modifiers(
        &SecurityAddon
    ),
    tags(
        (name = "Payments", description = "Payment API endpoints (stored procedure backed)"),
        (name = "Auth", description = "Authentication API endpoints")
    ),
    info(
        title = "Payment API Server",
        description = "Payment management API backed by MySQL stored procedures",
        version = "1.0.0"
    )
)]
struct ApiDoc;

// Security scheme 정의: Swagger UI에서 "Authorize" 버튼 추가
struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "BearerAuth",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}

#[tokio::main]
async fn main() {
    // 로깅 초기화 (RUST_LOG로 레벨 제어)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // 환경 변수에서 설정 로드
    let config = Config::from_env();

    // DB 연결
    let db = Database::new(&config.database)
        .await
        .expect("Failed to connect to database");

    tracing::info!(database = %config.database.database, "Database connected");

    // AppState 생성 (모든 Service 초기화)
    let app_state = AppState::new(db, &config);

    // CORS 설정
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::AUTHORIZATION,
            axum::http::header::ACCEPT,
        ]);

    // Router 생성
    let app = Router::new()
        .merge(create_router())
        .merge(SwaggerUi::new("/api").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .with_state(app_state);

    // 서버 시작
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&addr)
        .await
        .expect("Failed to bind server port");

    tracing::info!(%addr, "Server running");
    tracing::info!("Swagger UI available at /api");

    // 서버 실행
    axum::serve(listener, app)
        .await
        .expect("Server error");
}
