// =====================================================
// 결제 서비스 통합 테스트 (비즈니스 검증)
// =====================================================
// 서비스 계층 검증이 DB 왕복 전에 실패하는지 확인
// =====================================================

mod common;
use common::*;

use rust_decimal::Decimal;
use serde_json::json;

use payment_api_server::domains::payment::models::{PaymentRequest, PaymentStatus};
use payment_api_server::domains::payment::services::PaymentService;
use payment_api_server::shared::errors::PaymentError;

fn valid_request() -> PaymentRequest {
    PaymentRequest {
        service_code: "NETFLIX".to_string(),
        rate_code_id: "RATE001".to_string(),
        payment_method_id: "PM001".to_string(),
        customer_id: "CUST001".to_string(),
        amount: Decimal::new(2999, 2),
        user_agent: None,
        user_ip: None,
        email: None,
        mobile: None,
    }
}

/// 테스트: 필수 필드 누락 → MissingField, DB 호출 없음
#[tokio::test]
async fn test_create_payment_missing_field_fails_before_db() {
    let pool = MockPool::new(MockScript::default());
    let service = PaymentService::new(pool.executor());

    let mut request = valid_request();
    request.customer_id = String::new();

    let result = service.create_payment(request).await;

    assert!(matches!(
        result,
        Err(PaymentError::MissingField { field: "customerId" })
    ));
    assert!(pool.events().is_empty(), "Validation must not touch the pool");
}

/// 테스트: 0 이하 금액 → InvalidAmount, DB 호출 없음
#[tokio::test]
async fn test_create_payment_non_positive_amount_rejected() {
    let pool = MockPool::new(MockScript::default());
    let service = PaymentService::new(pool.executor());

    let mut request = valid_request();
    request.amount = Decimal::ZERO;

    let result = service.create_payment(request).await;

    assert!(matches!(result, Err(PaymentError::InvalidAmount)));
    assert!(pool.events().is_empty());
}

/// 테스트: 결제 처리 상세의 금액이 0 이하 → InvalidAmount, DB 호출 없음
#[tokio::test]
async fn test_process_payment_non_positive_amount_rejected() {
    let pool = MockPool::new(MockScript::default());
    let service = PaymentService::new(pool.executor());

    let result = service
        .process_payment("PAY-1", "PM001", &json!({"amount": -5.0}))
        .await;

    assert!(matches!(result, Err(PaymentError::InvalidAmount)));
    assert!(pool.events().is_empty());
}

/// 테스트: 결제 처리 상세에 금액 필드 없음 → InvalidAmount
#[tokio::test]
async fn test_process_payment_missing_amount_rejected() {
    let pool = MockPool::new(MockScript::default());
    let service = PaymentService::new(pool.executor());

    let result = service
        .process_payment("PAY-1", "PM001", &json!({"card": "4111"}))
        .await;

    assert!(matches!(result, Err(PaymentError::InvalidAmount)));
}

/// 테스트: 유효한 결제 처리 → sp_ProcessPayment 호출
#[tokio::test]
async fn test_process_payment_valid_details_reaches_procedure() {
    let pool = MockPool::new(MockScript {
        rows_affected: 1,
        ..Default::default()
    });
    let service = PaymentService::new(pool.executor());

    service
        .process_payment("PAY-1", "PM001", &json!({"amount": 29.99}))
        .await
        .expect("Processing should succeed");

    let sqls = queries(&pool.events());
    assert_eq!(sqls.len(), 1);
    assert!(sqls[0].starts_with("CALL sp_ProcessPayment('PAY-1','PM001'"));
    // 게이트웨이 응답 자리에는 성공 마커가 들어감
    assert!(sqls[0].contains(r#"'{"status":"success"}'"#));
}

/// 테스트: 단건 조회 부재 → NotFound (결제 ID 포함)
#[tokio::test]
async fn test_get_payment_by_id_absent_maps_to_not_found() {
    let pool = MockPool::new(MockScript::default());
    let service = PaymentService::new(pool.executor());

    let result = service.get_payment_by_id("PAY-MISSING").await;

    match result {
        Err(PaymentError::NotFound { payment_id }) => assert_eq!(payment_id, "PAY-MISSING"),
        other => panic!("Expected NotFound, got {:?}", other.map(|p| p.payment_id)),
    }
}

/// 테스트: 영향 행 0의 상태 변경 → NotFound
#[tokio::test]
async fn test_update_status_zero_rows_maps_to_not_found() {
    let pool = MockPool::new(MockScript::default());
    let service = PaymentService::new(pool.executor());

    let result = service
        .update_payment_status("PAY-MISSING", PaymentStatus::Processed, Decimal::new(100, 0))
        .await;

    assert!(matches!(result, Err(PaymentError::NotFound { .. })));
}

/// 테스트: 일괄 상태 변경은 영향 행 수를 그대로 반환
#[tokio::test]
async fn test_bulk_update_status_returns_affected_count() {
    let pool = MockPool::new(MockScript {
        rows_affected: 3,
        ..Default::default()
    });
    let service = PaymentService::new(pool.executor());

    let updated = service
        .bulk_update_status(
            &["PAY-1".to_string(), "PAY-2".to_string(), "PAY-3".to_string()],
            PaymentStatus::Failed,
        )
        .await
        .expect("Bulk update should succeed");

    assert_eq!(updated, 3);
}
