use anyhow::{Context, Result};
use chrono::Utc;
use rust_decimal::Decimal;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::domains::payment::models::{
    Payment, PaymentRequest, PaymentStatus, UpdatePaymentRequest,
};
use crate::shared::database::executor::ProcedureExecutor;
use crate::shared::database::params::ProcParam;

/// 결제 레포지토리 (저장 프로시저 파사드)
/// Payment repository (stored-procedure facade)
///
/// 각 메서드는 대상 프로시저의 위치 기반 시그니처에 맞는 파라미터 목록을
/// 조립합니다. 프로시저 시그니처 변경은 이 계층의 호환성 파괴 변경입니다.
/// Each method builds the positional parameter list of its target
/// procedure. A procedure signature change is a breaking change here.
pub struct PaymentRepository {
    executor: ProcedureExecutor,
}

impl PaymentRepository {
    pub fn new(executor: ProcedureExecutor) -> Self {
        Self { executor }
    }

    /// 결제 생성 (InitialPayment, JSON 파라미터 한 개)
    /// Create payment (InitialPayment, single JSON parameter)
    pub async fn create_payment(&self, request: &PaymentRequest) -> Result<Payment> {
        // 프로시저가 기대하는 정확한 페이로드 형태
        // The exact payload shape the procedure expects
        let payload = json!({
            "serviceCode": request.service_code,
            "rateCodeId": request.rate_code_id,
            "paymentMethodId": request.payment_method_id,
            "customerId": request.customer_id,
            "amount": request.amount,
            "userAgent": request.user_agent,
            "userIP": request.user_ip,
            "email": request.email,
            "mobile": request.mobile,
        });

        let result = self
            .executor
            .execute("InitialPayment", vec![ProcParam::Json(payload.to_string())])
            .await
            .context("Payment creation failed")?;

        let row = result
            .first_row()
            .context("No data returned from payment creation")?;

        decode_payment(row)
    }

    /// 결제 단건 조회 (0행이면 None, 에러 아님)
    /// Fetch one payment (zero rows means None, not an error)
    pub async fn find_by_id(&self, payment_id: &str) -> Result<Option<Payment>> {
        let result = self
            .executor
            .execute(
                "sp_GetPaymentById",
                vec![ProcParam::Str(payment_id.to_string())],
            )
            .await
            .context("Failed to fetch payment")?;

        match result.first_row() {
            Some(row) => Ok(Some(decode_payment(row)?)),
            None => Ok(None),
        }
    }

    /// 고객별 결제 목록 조회
    /// Fetch all payments for a customer
    pub async fn find_by_customer_id(&self, customer_id: &str) -> Result<Vec<Payment>> {
        let result = self
            .executor
            .execute(
                "sp_GetCustomerPayments",
                vec![ProcParam::Str(customer_id.to_string())],
            )
            .await
            .context("Failed to fetch customer payments")?;

        result.rows.iter().map(decode_payment).collect()
    }

    /// 결제 부분 갱신 (sp_UpdatePayment)
    /// Partial payment update (sp_UpdatePayment)
    pub async fn update_payment(
        &self,
        payment_id: &str,
        update: &UpdatePaymentRequest,
    ) -> Result<bool> {
        let network_info = match &update.network_info {
            Some(info) => ProcParam::Json(info.to_string()),
            None => ProcParam::Null,
        };

        let result = self
            .executor
            .execute(
                "sp_UpdatePayment",
                vec![
                    ProcParam::Str(payment_id.to_string()),
                    opt_status(update.payment_status),
                    ProcParam::from_opt(update.service_id.as_deref()),
                    ProcParam::from_opt(update.rate_code_id.as_deref()),
                    ProcParam::from_opt(update.rate_code_group_id.as_deref()),
                    ProcParam::from_opt(update.payment_method_id.as_deref()),
                    opt_num(update.amount),
                    opt_num(update.amount_paid),
                    network_info,
                    ProcParam::from_opt(update.reference.as_deref()),
                    ProcParam::from_opt(update.name.as_deref()),
                    ProcParam::from_opt(update.email.as_deref()),
                    ProcParam::from_opt(update.mobile.as_deref()),
                ],
            )
            .await
            .context("Failed to update payment")?;

        Ok(result.rows_affected > 0)
    }

    /// 결제 상태 변경 (sp_UpdatePaymentStatus)
    /// Update payment status (sp_UpdatePaymentStatus)
    pub async fn update_status(
        &self,
        payment_id: &str,
        status: PaymentStatus,
        amount_paid: Decimal,
    ) -> Result<bool> {
        let result = self
            .executor
            .execute(
                "sp_UpdatePaymentStatus",
                vec![
                    ProcParam::Str(payment_id.to_string()),
                    ProcParam::Str(status.to_string()),
                    ProcParam::Num(amount_paid),
                    ProcParam::Date(Utc::now()),
                ],
            )
            .await
            .context("Failed to update payment status")?;

        Ok(result.rows_affected > 0)
    }

    /// 결제 처리 (sp_ProcessPayment)
    /// Process payment (sp_ProcessPayment)
    pub async fn process_payment(
        &self,
        payment_id: &str,
        payment_method_id: &str,
        payment_details: &Value,
    ) -> Result<bool> {
        let now = Utc::now();
        let response_result = json!({ "status": "success" });

        self.executor
            .execute(
                "sp_ProcessPayment",
                vec![
                    ProcParam::Str(payment_id.to_string()),
                    ProcParam::Str(payment_method_id.to_string()),
                    ProcParam::Json(payment_details.to_string()),
                    ProcParam::Date(now),
                    ProcParam::Date(now),
                    ProcParam::Json(response_result.to_string()),
                ],
            )
            .await
            .context("Payment processing failed")?;

        Ok(true)
    }

    /// 결제 일괄 생성 (sp_CreatePayment, 청크당 트랜잭션 한 개)
    /// Bulk payment creation (sp_CreatePayment, one transaction per chunk)
    pub async fn bulk_create_payments(&self, requests: &[PaymentRequest]) -> Result<Vec<Payment>> {
        let param_sets = requests
            .iter()
            .map(|request| {
                vec![
                    ProcParam::Str(Uuid::new_v4().to_string()),
                    ProcParam::Str(PaymentStatus::Pending.to_string()),
                    ProcParam::Date(Utc::now()),
                    ProcParam::Str(request.service_code.clone()),
                    ProcParam::Str(request.rate_code_id.clone()),
                    ProcParam::Str(request.payment_method_id.clone()),
                    ProcParam::Str(request.customer_id.clone()),
                    ProcParam::Num(request.amount),
                    ProcParam::from_opt(request.user_agent.as_deref()),
                    ProcParam::from_opt(request.user_ip.as_deref()),
                    ProcParam::from_opt(request.email.as_deref()),
                    ProcParam::from_opt(request.mobile.as_deref()),
                ]
            })
            .collect();

        let results = self
            .executor
            .execute_batch("sp_CreatePayment", param_sets, None)
            .await
            .context("Bulk payment creation failed")?;

        results
            .iter()
            .map(|result| {
                let row = result
                    .first_row()
                    .context("No data returned from payment creation")?;
                decode_payment(row)
            })
            .collect()
    }

    /// 결제 상태 일괄 변경 (sp_BulkUpdatePaymentStatus, ID 목록은 JSON)
    /// Bulk status update (sp_BulkUpdatePaymentStatus, IDs as JSON)
    pub async fn bulk_update_status(
        &self,
        payment_ids: &[String],
        status: PaymentStatus,
    ) -> Result<u64> {
        let ids_json =
            serde_json::to_string(payment_ids).context("Failed to serialize payment IDs")?;

        let result = self
            .executor
            .execute(
                "sp_BulkUpdatePaymentStatus",
                vec![
                    ProcParam::Json(ids_json),
                    ProcParam::Str(status.to_string()),
                ],
            )
            .await
            .context("Bulk status update failed")?;

        Ok(result.rows_affected)
    }
}

fn decode_payment(row: &Value) -> Result<Payment> {
    serde_json::from_value(row.clone()).context("Failed to decode payment row")
}

fn opt_num(value: Option<Decimal>) -> ProcParam {
    match value {
        Some(n) => ProcParam::Num(n),
        None => ProcParam::Null,
    }
}

fn opt_status(value: Option<PaymentStatus>) -> ProcParam {
    match value {
        Some(s) => ProcParam::Str(s.to_string()),
        None => ProcParam::Null,
    }
}
