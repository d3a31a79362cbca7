// =====================================================
// 프로시저 실행기 통합 테스트 (단건 호출)
// =====================================================
// 트랜잭션 프로토콜 검증: acquire → begin → CALL → commit | rollback
// → release, 커넥션은 경로와 무관하게 정확히 한 번 반환됨
// =====================================================

mod common;
use common::*;

use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;
use serde_json::json;

use payment_api_server::shared::database::ProcParam;
use payment_api_server::shared::errors::DbError;

/// 테스트: 성공 경로의 호출 순서
///
/// acquire → begin → query → commit → release 순서가 정확히 지켜지고
/// rollback은 호출되지 않아야 합니다.
#[tokio::test]
async fn test_successful_call_follows_transaction_protocol() {
    let pool = MockPool::new(MockScript {
        rows: vec![json!({"paymentId": "PAY-1"})],
        ..Default::default()
    });
    let executor = pool.executor();

    let result = executor
        .execute("sp_GetPaymentById", vec![ProcParam::Str("PAY-1".to_string())])
        .await
        .expect("Call should succeed");

    assert_eq!(result.rows.len(), 1);
    assert_eq!(result.first_row().unwrap()["paymentId"], "PAY-1");

    assert_eq!(
        pool.events(),
        vec![
            DbEvent::Acquire,
            DbEvent::Begin,
            DbEvent::Query("CALL sp_GetPaymentById('PAY-1')".to_string()),
            DbEvent::Commit,
            DbEvent::Release,
        ]
    );
}

/// 테스트: 쿼리 실패 → 롤백 후 에러 전파, 커밋 없음
#[tokio::test]
async fn test_query_failure_rolls_back_and_releases() {
    let pool = MockPool::new(MockScript {
        fail_on_query: Some(1),
        ..Default::default()
    });
    let executor = pool.executor();

    let result = executor
        .execute("sp_UpdatePaymentStatus", vec![ProcParam::Null])
        .await;

    assert!(matches!(result, Err(DbError::Transaction(_))));

    assert_eq!(
        pool.events(),
        vec![
            DbEvent::Acquire,
            DbEvent::Begin,
            DbEvent::Query("CALL sp_UpdatePaymentStatus(NULL)".to_string()),
            DbEvent::Rollback,
            DbEvent::Release,
        ]
    );
}

/// 테스트: 롤백 실패는 삼켜지고 원래 에러가 전파됨
///
/// 2차 실패(rollback)가 1차 에러(query)를 가리면 안 됩니다.
#[tokio::test]
async fn test_rollback_failure_does_not_mask_original_error() {
    let pool = MockPool::new(MockScript {
        fail_on_query: Some(1),
        fail_rollback: true,
        ..Default::default()
    });
    let executor = pool.executor();

    let result = executor.execute("sp_ProcessPayment", vec![]).await;

    // Rollback 에러가 아니라 원래 Transaction 에러여야 함
    assert!(matches!(result, Err(DbError::Transaction(_))));

    // release는 여전히 호출됨
    assert_eq!(pool.count(|e| matches!(e, DbEvent::Release)), 1);
}

/// 테스트: 커밋 실패 → 롤백 시도 후 커밋 에러 전파
#[tokio::test]
async fn test_commit_failure_attempts_rollback() {
    let pool = MockPool::new(MockScript {
        fail_commit: true,
        ..Default::default()
    });
    let executor = pool.executor();

    let result = executor.execute("sp_CreatePayment", vec![]).await;

    assert!(matches!(result, Err(DbError::Transaction(_))));

    assert_eq!(
        pool.events(),
        vec![
            DbEvent::Acquire,
            DbEvent::Begin,
            DbEvent::Query("CALL sp_CreatePayment()".to_string()),
            DbEvent::Commit,
            DbEvent::Rollback,
            DbEvent::Release,
        ]
    );
}

/// 테스트: release 실패는 성공 결과를 가리지 않음
#[tokio::test]
async fn test_release_failure_does_not_mask_success() {
    let pool = MockPool::new(MockScript {
        fail_release: true,
        rows: vec![json!({"ok": true})],
        ..Default::default()
    });
    let executor = pool.executor();

    let result = executor.execute("sp_GetPaymentById", vec![]).await;

    assert!(result.is_ok(), "Release failure must not surface to the caller");
}

/// 테스트: 커넥션 획득 실패 → ConnectionError, 트랜잭션 시작 안 함
#[tokio::test]
async fn test_acquire_failure_propagates_connection_error() {
    let pool = MockPool::new(MockScript {
        fail_acquire: true,
        ..Default::default()
    });
    let executor = pool.executor();

    let result = executor.execute("sp_GetPaymentById", vec![]).await;

    assert!(matches!(result, Err(DbError::Connection(_))));
    assert_eq!(pool.events(), vec![DbEvent::Acquire]);
}

/// 테스트: CALL 구문 조립 (이스케이프 규칙 포함)
///
/// NULL / 따옴표 이중화 / 숫자 비인용 / 날짜 포맷이 구문에 정확히
/// 반영되는지 확인합니다.
#[tokio::test]
async fn test_call_statement_encoding() {
    let pool = MockPool::new(MockScript::default());
    let executor = pool.executor();

    let date = Utc.with_ymd_and_hms(2024, 3, 15, 10, 30, 45).unwrap();

    executor
        .execute(
            "sp_UpdatePayment",
            vec![
                ProcParam::Str("O'Brien".to_string()),
                ProcParam::Null,
                ProcParam::Num(Decimal::new(2999, 2)),
                ProcParam::Date(date),
            ],
        )
        .await
        .expect("Call should succeed");

    let queries = queries(&pool.events());
    assert_eq!(
        queries,
        vec![
            "CALL sp_UpdatePayment('O''Brien',NULL,29.99,'2024-03-15 10:30:45')".to_string()
        ]
    );
}
