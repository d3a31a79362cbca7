// Payment domain state
// 결제 도메인 상태
use crate::domains::payment::services::PaymentService;
use crate::shared::database::Database;

/// 결제 도메인의 서비스 묶음
/// Payment domain service bundle
#[derive(Clone)]
pub struct PaymentState {
    pub payment_service: PaymentService,
}

impl PaymentState {
    pub fn new(db: Database) -> Self {
        let payment_service = PaymentService::new(db.executor());

        Self { payment_service }
    }
}
