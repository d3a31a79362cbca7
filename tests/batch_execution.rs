// =====================================================
// 배치 실행 통합 테스트 (청크 단위 트랜잭션)
// =====================================================
// 청크 분할, 순서 보존, 청크 단위 원자성, 중단 시맨틱 검증
// =====================================================

mod common;
use common::*;

use payment_api_server::shared::database::{ProcParam, DEFAULT_BATCH_SIZE};
use payment_api_server::shared::errors::DbError;

fn param_sets(n: usize) -> Vec<Vec<ProcParam>> {
    (0..n)
        .map(|i| vec![ProcParam::Str(format!("PAY-{}", i))])
        .collect()
}

/// 테스트: 청크 개수 = ceil(N / 청크크기)
///
/// 7건을 3건 단위로 나누면 트랜잭션 3개 (3 + 3 + 1).
#[tokio::test]
async fn test_batch_splits_into_ceiling_number_of_chunks() {
    let pool = MockPool::new(MockScript::default());
    let executor = pool.executor();

    let results = executor
        .execute_batch("sp_CreatePayment", param_sets(7), Some(3))
        .await
        .expect("Batch should succeed");

    assert_eq!(results.len(), 7);
    assert_eq!(pool.count(|e| matches!(e, DbEvent::Acquire)), 3);
    assert_eq!(pool.count(|e| matches!(e, DbEvent::Begin)), 3);
    assert_eq!(pool.count(|e| matches!(e, DbEvent::Commit)), 3);
    assert_eq!(pool.count(|e| matches!(e, DbEvent::Release)), 3);
    assert_eq!(pool.count(|e| matches!(e, DbEvent::Rollback)), 0);
    assert_eq!(pool.count(is_query), 7);
}

/// 테스트: 결과는 입력 순서대로 반환됨
#[tokio::test]
async fn test_batch_preserves_input_order() {
    let pool = MockPool::new(MockScript::default());
    let executor = pool.executor();

    executor
        .execute_batch("sp_CreatePayment", param_sets(5), Some(2))
        .await
        .expect("Batch should succeed");

    let sqls = queries(&pool.events());
    let expected: Vec<String> = (0..5)
        .map(|i| format!("CALL sp_CreatePayment('PAY-{}')", i))
        .collect();
    assert_eq!(sqls, expected);
}

/// 테스트: 중간 청크 실패 → 해당 청크 롤백, 이후 청크 미시도
///
/// 5번째 호출(두 번째 청크)이 실패하면: 첫 청크는 커밋 유지, 두 번째
/// 청크는 롤백, 세 번째 청크는 시작조차 안 함.
#[tokio::test]
async fn test_mid_chunk_failure_stops_remaining_chunks() {
    let pool = MockPool::new(MockScript {
        fail_on_query: Some(5),
        ..Default::default()
    });
    let executor = pool.executor();

    let result = executor
        .execute_batch("sp_CreatePayment", param_sets(9), Some(3))
        .await;

    assert!(matches!(result, Err(DbError::Transaction(_))));

    // 청크 1: 커밋됨. 청크 2: 5번째 호출에서 실패, 롤백. 청크 3: 미시도.
    assert_eq!(pool.count(|e| matches!(e, DbEvent::Acquire)), 2);
    assert_eq!(pool.count(|e| matches!(e, DbEvent::Commit)), 1);
    assert_eq!(pool.count(|e| matches!(e, DbEvent::Rollback)), 1);
    assert_eq!(pool.count(|e| matches!(e, DbEvent::Release)), 2);
    // 청크 2는 4, 5번째 호출까지만 진행 (5번째에서 실패)
    assert_eq!(pool.count(is_query), 5);
}

/// 테스트: 빈 입력 → 커넥션 획득 없음, 빈 결과
#[tokio::test]
async fn test_empty_batch_acquires_nothing() {
    let pool = MockPool::new(MockScript::default());
    let executor = pool.executor();

    let results = executor
        .execute_batch("sp_CreatePayment", Vec::new(), Some(10))
        .await
        .expect("Empty batch should succeed");

    assert!(results.is_empty());
    assert!(pool.events().is_empty());
}

/// 테스트: 입력이 청크 크기보다 작으면 트랜잭션 한 개
#[tokio::test]
async fn test_undersized_batch_runs_in_single_transaction() {
    let pool = MockPool::new(MockScript::default());
    let executor = pool.executor();

    executor
        .execute_batch("sp_CreatePayment", param_sets(4), Some(100))
        .await
        .expect("Batch should succeed");

    assert_eq!(pool.count(|e| matches!(e, DbEvent::Acquire)), 1);
    assert_eq!(pool.count(|e| matches!(e, DbEvent::Commit)), 1);
    assert_eq!(pool.count(is_query), 4);
}

/// 테스트: 청크 크기 미지정 → 기본값(1000) 사용
#[tokio::test]
async fn test_default_batch_size_applies_when_unspecified() {
    let pool = MockPool::new(MockScript::default());
    let executor = pool.executor();

    executor
        .execute_batch("sp_CreatePayment", param_sets(DEFAULT_BATCH_SIZE + 1), None)
        .await
        .expect("Batch should succeed");

    // 1000 + 1 → 트랜잭션 2개
    assert_eq!(pool.count(|e| matches!(e, DbEvent::Begin)), 2);
}

/// 테스트: 청크 크기 0은 1로 보정됨 (무한 루프/패닉 방지)
#[tokio::test]
async fn test_zero_batch_size_clamped_to_one() {
    let pool = MockPool::new(MockScript::default());
    let executor = pool.executor();

    executor
        .execute_batch("sp_CreatePayment", param_sets(3), Some(0))
        .await
        .expect("Batch should succeed");

    // 건당 트랜잭션 한 개
    assert_eq!(pool.count(|e| matches!(e, DbEvent::Begin)), 3);
}
