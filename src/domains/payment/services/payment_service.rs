use rust_decimal::Decimal;
use serde_json::Value;

use crate::domains::payment::models::{
    Payment, PaymentRequest, PaymentStatus, UpdatePaymentRequest,
};
use crate::shared::database::{PaymentRepository, ProcedureExecutor};
use crate::shared::errors::PaymentError;

// 결제 서비스
// PaymentService: handles payment business logic
#[derive(Clone)]
pub struct PaymentService {
    executor: ProcedureExecutor,
}

impl PaymentService {
    pub fn new(executor: ProcedureExecutor) -> Self {
        Self { executor }
    }

    // 결제 생성 (비즈니스 로직)
    pub async fn create_payment(&self, request: PaymentRequest) -> Result<Payment, PaymentError> {
        // 1. 요청 검증 (DB 호출 전에 실패)
        // 1. Validate request (fails before any database call)
        Self::validate_payment_request(&request)?;

        // 2. Repository 호출
        let payment_repo = PaymentRepository::new(self.executor.clone());

        payment_repo
            .create_payment(&request)
            .await
            .map_err(|e| PaymentError::DatabaseError(format!("Failed to create payment: {}", e)))
    }

    // 결제 단건 조회 (없으면 NotFound)
    pub async fn get_payment_by_id(&self, payment_id: &str) -> Result<Payment, PaymentError> {
        let payment_repo = PaymentRepository::new(self.executor.clone());

        let payment = payment_repo
            .find_by_id(payment_id)
            .await
            .map_err(|e| PaymentError::DatabaseError(format!("Failed to fetch payment: {}", e)))?;

        // 부재는 레포지토리에선 None, 서비스 경계에서 NotFound로 변환
        // Absence is None at the repository; becomes NotFound at this boundary
        payment.ok_or_else(|| PaymentError::NotFound {
            payment_id: payment_id.to_string(),
        })
    }

    // 고객별 결제 목록 조회
    pub async fn get_customer_payments(
        &self,
        customer_id: &str,
    ) -> Result<Vec<Payment>, PaymentError> {
        let payment_repo = PaymentRepository::new(self.executor.clone());

        payment_repo.find_by_customer_id(customer_id).await.map_err(|e| {
            PaymentError::DatabaseError(format!("Failed to fetch customer payments: {}", e))
        })
    }

    // 결제 부분 갱신
    pub async fn update_payment(
        &self,
        payment_id: &str,
        update: UpdatePaymentRequest,
    ) -> Result<(), PaymentError> {
        let payment_repo = PaymentRepository::new(self.executor.clone());

        let updated = payment_repo
            .update_payment(payment_id, &update)
            .await
            .map_err(|e| PaymentError::DatabaseError(format!("Failed to update payment: {}", e)))?;

        if !updated {
            return Err(PaymentError::NotFound {
                payment_id: payment_id.to_string(),
            });
        }

        Ok(())
    }

    // 결제 상태 변경
    pub async fn update_payment_status(
        &self,
        payment_id: &str,
        status: PaymentStatus,
        amount_paid: Decimal,
    ) -> Result<(), PaymentError> {
        let payment_repo = PaymentRepository::new(self.executor.clone());

        let updated = payment_repo
            .update_status(payment_id, status, amount_paid)
            .await
            .map_err(|e| {
                PaymentError::DatabaseError(format!("Failed to update payment status: {}", e))
            })?;

        if !updated {
            return Err(PaymentError::NotFound {
                payment_id: payment_id.to_string(),
            });
        }

        Ok(())
    }

    // 결제 처리 (비즈니스 로직)
    pub async fn process_payment(
        &self,
        payment_id: &str,
        payment_method_id: &str,
        payment_details: &Value,
    ) -> Result<(), PaymentError> {
        // 1. 상세 검증: 금액이 양수여야 함 (DB 왕복 없이 즉시 실패)
        // 1. Validate details: amount must be positive (fail fast, no DB round-trip)
        Self::validate_payment_details(payment_details)?;

        // 2. Repository 호출
        let payment_repo = PaymentRepository::new(self.executor.clone());

        payment_repo
            .process_payment(payment_id, payment_method_id, payment_details)
            .await
            .map_err(|e| PaymentError::DatabaseError(format!("Failed to process payment: {}", e)))?;

        Ok(())
    }

    // 결제 일괄 생성
    pub async fn bulk_create_payments(
        &self,
        requests: Vec<PaymentRequest>,
    ) -> Result<Vec<Payment>, PaymentError> {
        let payment_repo = PaymentRepository::new(self.executor.clone());

        payment_repo.bulk_create_payments(&requests).await.map_err(|e| {
            PaymentError::DatabaseError(format!("Bulk payment creation failed: {}", e))
        })
    }

    // 결제 상태 일괄 변경
    pub async fn bulk_update_status(
        &self,
        payment_ids: &[String],
        status: PaymentStatus,
    ) -> Result<u64, PaymentError> {
        let payment_repo = PaymentRepository::new(self.executor.clone());

        payment_repo
            .bulk_update_status(payment_ids, status)
            .await
            .map_err(|e| PaymentError::DatabaseError(format!("Bulk status update failed: {}", e)))
    }

    /// 생성 요청 검증: 필수 필드 존재 + 양수 금액
    /// Validate create request: required fields present + positive amount
    fn validate_payment_request(request: &PaymentRequest) -> Result<(), PaymentError> {
        if request.service_code.is_empty() {
            return Err(PaymentError::MissingField { field: "serviceCode" });
        }
        if request.rate_code_id.is_empty() {
            return Err(PaymentError::MissingField { field: "rateCodeId" });
        }
        if request.payment_method_id.is_empty() {
            return Err(PaymentError::MissingField { field: "paymentMethodId" });
        }
        if request.customer_id.is_empty() {
            return Err(PaymentError::MissingField { field: "customerId" });
        }
        if request.amount <= Decimal::ZERO {
            return Err(PaymentError::InvalidAmount);
        }

        Ok(())
    }

    /// 결제 상세 검증: amount 필드가 양수여야 함
    /// Validate payment details: the amount field must be positive
    fn validate_payment_details(payment_details: &Value) -> Result<(), PaymentError> {
        let amount = payment_details.get("amount").and_then(Value::as_f64);

        match amount {
            Some(a) if a > 0.0 => Ok(()),
            _ => Err(PaymentError::InvalidAmount),
        }
    }
}
