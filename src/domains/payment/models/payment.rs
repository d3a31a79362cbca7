use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use utoipa::ToSchema;

/// 결제 상태 (수명주기)
/// Payment lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentStatus {
    Pending,
    Processed,
    Failed,
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PaymentStatus::Pending => "PENDING",
            PaymentStatus::Processed => "PROCESSED",
            PaymentStatus::Failed => "FAILED",
        };
        write!(f, "{}", s)
    }
}

/// 결제 레코드 (프로시저 결과 행에서 역직렬화)
/// Payment record (deserialized from procedure result rows)
///
/// 필드 이름은 저장 프로시저가 반환하는 컬럼명 계약을 그대로 따름
/// Field names follow the column-name contract of the stored procedures
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Payment {
    #[serde(rename = "paymentId")]
    pub payment_id: String,
    #[serde(rename = "paymentStatus")]
    pub payment_status: PaymentStatus,
    #[serde(rename = "creationDateTime")]
    pub creation_date_time: NaiveDateTime,
    #[serde(rename = "serviceId")]
    pub service_id: String,
    #[serde(rename = "customerId")]
    pub customer_id: String,

    #[serde(rename = "rateCodeId")]
    pub rate_code_id: Option<String>,
    #[serde(rename = "rateCodeGroupId")]
    pub rate_code_group_id: Option<String>,
    #[serde(rename = "paymentMethodId")]
    pub payment_method_id: Option<String>,

    /// 요청 금액 / 실제 결제 금액
    /// Requested amount / amount actually paid
    pub amount: Option<Decimal>,
    pub amount_paid: Option<Decimal>,

    // 네트워크/텔레메트리 필드
    // Network/telemetry fields
    #[serde(rename = "networkInfo")]
    pub network_info: Option<String>,
    #[serde(rename = "userAgent")]
    pub user_agent: Option<String>,
    #[serde(rename = "retryAttempt")]
    pub retry_attempt: Option<i32>,
    #[serde(rename = "networkMetered")]
    pub network_metered: Option<String>,
    #[serde(rename = "networkDownlinkMax")]
    pub network_downlink_max: Option<String>,
    #[serde(rename = "networkDownlink")]
    pub network_downlink: Option<String>,
    #[serde(rename = "networkRtt")]
    pub network_rtt: Option<String>,
    #[serde(rename = "networkSaveData")]
    pub network_save_data: Option<String>,
    #[serde(rename = "networkSpeed")]
    pub network_speed: Option<String>,
    pub location: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub country: Option<String>,
    pub city: Option<String>,
    #[serde(rename = "userIP")]
    pub user_ip: Option<String>,

    // 통신사/MSISDN 판별 필드
    // Operator/MSISDN resolution fields
    #[serde(rename = "PM_IP")]
    pub pm_ip: Option<String>,
    pub operator_by_ip: Option<String>,
    pub msisdn: Option<String>,
    pub operator_by_msisdn: Option<String>,
    #[serde(rename = "Final_Operator")]
    pub final_operator: Option<String>,

    // 게이트웨이 상호 연동 필드
    // Gateway correlation fields
    #[serde(rename = "PM_response_date_time")]
    pub pm_response_date_time: Option<NaiveDateTime>,
    #[serde(rename = "serviceTransactionId")]
    pub service_transaction_id: Option<String>,
    #[serde(rename = "pMethodTransactionId")]
    pub p_method_transaction_id: Option<String>,
    #[serde(rename = "pSystemRequestDateTime")]
    pub p_system_request_date_time: Option<NaiveDateTime>,
    #[serde(rename = "pSystemResponeDateTime")]
    pub p_system_respone_date_time: Option<NaiveDateTime>,
    #[serde(rename = "pSystemRequest")]
    pub p_system_request: Option<String>,
    #[serde(rename = "pSystemResponse")]
    pub p_system_response: Option<String>,
    #[serde(rename = "pMethodRequestDateTime")]
    pub p_method_request_date_time: Option<NaiveDateTime>,
    #[serde(rename = "pMethodResponseDateTime")]
    pub p_method_response_date_time: Option<NaiveDateTime>,
    #[serde(rename = "pMethodRequest")]
    pub p_method_request: Option<String>,
    #[serde(rename = "pMethodResponseResult")]
    pub p_method_response_result: Option<String>,

    pub reference: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub mobile: Option<String>,
    #[serde(rename = "orderId")]
    pub order_id: Option<i64>,
    #[serde(rename = "traxId")]
    pub trax_id: Option<String>,
    #[serde(rename = "pmgwTraxID")]
    pub pmgw_trax_id: Option<String>,
    #[serde(rename = "pmgwRecurID")]
    pub pmgw_recur_id: Option<String>,
    pub access_token: Option<String>,
}

// 결제 생성 요청 모델
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PaymentRequest {
    /// 서비스 코드
    /// Service code
    #[serde(rename = "serviceCode")]
    #[schema(example = "NETFLIX")]
    pub service_code: String,

    #[serde(rename = "rateCodeId")]
    #[schema(example = "RATE001")]
    pub rate_code_id: String,

    #[serde(rename = "paymentMethodId")]
    #[schema(example = "PM001")]
    pub payment_method_id: String,

    #[serde(rename = "customerId")]
    #[schema(example = "CUST001")]
    pub customer_id: String,

    /// 결제 금액 (0보다 커야 함)
    /// Payment amount (must be positive)
    #[schema(example = 29.99)]
    pub amount: Decimal,

    #[serde(rename = "userAgent")]
    pub user_agent: Option<String>,
    #[serde(rename = "userIP")]
    pub user_ip: Option<String>,
    pub email: Option<String>,
    pub mobile: Option<String>,
}

// 결제 수정 요청 모델 (sp_UpdatePayment 시그니처의 부분 갱신)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdatePaymentRequest {
    #[serde(rename = "paymentStatus")]
    pub payment_status: Option<PaymentStatus>,
    #[serde(rename = "serviceId")]
    pub service_id: Option<String>,
    #[serde(rename = "rateCodeId")]
    pub rate_code_id: Option<String>,
    #[serde(rename = "rateCodeGroupId")]
    pub rate_code_group_id: Option<String>,
    #[serde(rename = "paymentMethodId")]
    pub payment_method_id: Option<String>,
    pub amount: Option<Decimal>,
    pub amount_paid: Option<Decimal>,
    /// 네트워크 메타데이터 (JSON 직렬화되어 프로시저로 전달됨)
    /// Network metadata (JSON-serialized before reaching the procedure)
    #[serde(rename = "networkInfo")]
    pub network_info: Option<Value>,
    pub reference: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub mobile: Option<String>,
}

// 상태 변경 요청 모델
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateStatusRequest {
    #[schema(example = "PROCESSED")]
    pub status: PaymentStatus,
    #[schema(example = 29.99)]
    pub amount_paid: Decimal,
}

// 결제 처리 요청 모델
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProcessPaymentRequest {
    #[serde(rename = "paymentMethodId")]
    #[schema(example = "PM001")]
    pub payment_method_id: String,

    /// 결제수단별 상세 (amount 필드는 0보다 커야 함)
    /// Method-specific details (the amount field must be positive)
    #[serde(rename = "paymentDetails")]
    pub payment_details: Value,
}

// 일괄 상태 변경 요청 모델
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BulkUpdateStatusRequest {
    #[serde(rename = "paymentIds")]
    pub payment_ids: Vec<String>,
    #[schema(example = "FAILED")]
    pub status: PaymentStatus,
}

// 단건 응답 모델
#[derive(Debug, Serialize, ToSchema)]
pub struct PaymentResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub data: Payment,
}

// 목록 응답 모델
#[derive(Debug, Serialize, ToSchema)]
pub struct PaymentListResponse {
    pub success: bool,
    pub data: Vec<Payment>,
}

// 일괄 상태 변경 응답 모델
#[derive(Debug, Serialize, ToSchema)]
pub struct BulkUpdateStatusResponse {
    pub success: bool,
    pub message: String,
    pub updated: u64,
}

// 메시지 응답 모델
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}
