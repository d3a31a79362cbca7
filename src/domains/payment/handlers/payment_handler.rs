use crate::domains::payment::models::{
    BulkUpdateStatusRequest, BulkUpdateStatusResponse, MessageResponse, PaymentListResponse,
    PaymentRequest, PaymentResponse, ProcessPaymentRequest, UpdatePaymentRequest,
    UpdateStatusRequest,
};
use crate::shared::errors::PaymentError;
use crate::shared::middleware::auth::AuthenticatedUser;
use crate::shared::services::AppState;
use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    Json,
};

/// 결제 생성 핸들러
/// Create payment handler
#[utoipa::path(
    post,
    path = "/api/payments",
    request_body = PaymentRequest,
    responses(
        (status = 201, description = "Payment created successfully", body = PaymentResponse),
        (status = 400, description = "Invalid request (missing field or non-positive amount)"),
        (status = 401, description = "Unauthorized (missing or invalid token)"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Payments",
    security(("BearerAuth" = []))
)]
pub async fn create_payment(
    State(app_state): State<AppState>,
    _authenticated_user: AuthenticatedUser,
    headers: HeaderMap,
    Json(mut request): Json<PaymentRequest>,
) -> Result<(StatusCode, Json<PaymentResponse>), (StatusCode, Json<serde_json::Value>)> {
    // 요청 본문에 없으면 헤더에서 보충
    // Fill from request headers when the body omits them
    if request.user_agent.is_none() {
        request.user_agent = header_value(&headers, header::USER_AGENT.as_str());
    }
    if request.user_ip.is_none() {
        request.user_ip = client_ip(&headers);
    }

    let payment = app_state
        .payment_state
        .payment_service
        .create_payment(request)
        .await
        .map_err(|e: PaymentError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    Ok((
        StatusCode::CREATED,
        Json(PaymentResponse {
            success: true,
            message: Some("Payment created successfully".to_string()),
            data: payment,
        }),
    ))
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

/// 클라이언트 IP 판별 (프록시 뒤에서는 X-Forwarded-For의 첫 항목)
/// Resolve client IP (first X-Forwarded-For entry behind a proxy)
fn client_ip(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_string())
}

/// 결제 일괄 생성 핸들러
/// Bulk create payments handler
#[utoipa::path(
    post,
    path = "/api/payments/bulk",
    request_body = Vec<PaymentRequest>,
    responses(
        (status = 201, description = "Payments created successfully", body = PaymentListResponse),
        (status = 401, description = "Unauthorized (missing or invalid token)"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Payments",
    security(("BearerAuth" = []))
)]
pub async fn bulk_create_payments(
    State(app_state): State<AppState>,
    _authenticated_user: AuthenticatedUser,
    Json(requests): Json<Vec<PaymentRequest>>,
) -> Result<(StatusCode, Json<PaymentListResponse>), (StatusCode, Json<serde_json::Value>)> {
    let payments = app_state
        .payment_state
        .payment_service
        .bulk_create_payments(requests)
        .await
        .map_err(|e: PaymentError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    Ok((
        StatusCode::CREATED,
        Json(PaymentListResponse {
            success: true,
            data: payments,
        }),
    ))
}

/// 결제 상태 일괄 변경 핸들러
/// Bulk update payment status handler
#[utoipa::path(
    put,
    path = "/api/payments/status/bulk",
    request_body = BulkUpdateStatusRequest,
    responses(
        (status = 200, description = "Statuses updated successfully", body = BulkUpdateStatusResponse),
        (status = 401, description = "Unauthorized (missing or invalid token)"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Payments",
    security(("BearerAuth" = []))
)]
pub async fn bulk_update_status(
    State(app_state): State<AppState>,
    _authenticated_user: AuthenticatedUser,
    Json(request): Json<BulkUpdateStatusRequest>,
) -> Result<Json<BulkUpdateStatusResponse>, (StatusCode, Json<serde_json::Value>)> {
    let updated = app_state
        .payment_state
        .payment_service
        .bulk_update_status(&request.payment_ids, request.status)
        .await
        .map_err(|e: PaymentError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    Ok(Json(BulkUpdateStatusResponse {
        success: true,
        message: "Payment statuses updated successfully".to_string(),
        updated,
    }))
}

/// 결제 단건 조회 핸들러
/// Get payment by ID handler
#[utoipa::path(
    get,
    path = "/api/payments/{paymentId}",
    params(
        ("paymentId" = String, Path, description = "Payment ID")
    ),
    responses(
        (status = 200, description = "Payment retrieved successfully", body = PaymentResponse),
        (status = 404, description = "Payment not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Payments",
    security(("BearerAuth" = []))
)]
pub async fn get_payment(
    State(app_state): State<AppState>,
    _authenticated_user: AuthenticatedUser,
    Path(payment_id): Path<String>,
) -> Result<Json<PaymentResponse>, (StatusCode, Json<serde_json::Value>)> {
    let payment = app_state
        .payment_state
        .payment_service
        .get_payment_by_id(&payment_id)
        .await
        .map_err(|e: PaymentError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    Ok(Json(PaymentResponse {
        success: true,
        message: None,
        data: payment,
    }))
}

/// 결제 갱신 핸들러
/// Update payment handler
#[utoipa::path(
    put,
    path = "/api/payments/{paymentId}",
    params(
        ("paymentId" = String, Path, description = "Payment ID")
    ),
    request_body = UpdatePaymentRequest,
    responses(
        (status = 200, description = "Payment updated successfully", body = MessageResponse),
        (status = 404, description = "Payment not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Payments",
    security(("BearerAuth" = []))
)]
pub async fn update_payment(
    State(app_state): State<AppState>,
    _authenticated_user: AuthenticatedUser,
    Path(payment_id): Path<String>,
    Json(request): Json<UpdatePaymentRequest>,
) -> Result<Json<MessageResponse>, (StatusCode, Json<serde_json::Value>)> {
    app_state
        .payment_state
        .payment_service
        .update_payment(&payment_id, request)
        .await
        .map_err(|e: PaymentError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    Ok(Json(MessageResponse {
        success: true,
        message: "Payment updated successfully".to_string(),
    }))
}

/// 결제 상태 변경 핸들러
/// Update payment status handler
#[utoipa::path(
    put,
    path = "/api/payments/{paymentId}/status",
    params(
        ("paymentId" = String, Path, description = "Payment ID")
    ),
    request_body = UpdateStatusRequest,
    responses(
        (status = 200, description = "Payment status updated successfully", body = MessageResponse),
        (status = 404, description = "Payment not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Payments",
    security(("BearerAuth" = []))
)]
pub async fn update_payment_status(
    State(app_state): State<AppState>,
    _authenticated_user: AuthenticatedUser,
    Path(payment_id): Path<String>,
    Json(request): Json<UpdateStatusRequest>,
) -> Result<Json<MessageResponse>, (StatusCode, Json<serde_json::Value>)> {
    app_state
        .payment_state
        .payment_service
        .update_payment_status(&payment_id, request.status, request.amount_paid)
        .await
        .map_err(|e: PaymentError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    Ok(Json(MessageResponse {
        success: true,
        message: "Payment status updated successfully".to_string(),
    }))
}

/// 결제 처리 핸들러
/// Process payment handler
#[utoipa::path(
    post,
    path = "/api/payments/{paymentId}/process",
    params(
        ("paymentId" = String, Path, description = "Payment ID")
    ),
    request_body = ProcessPaymentRequest,
    responses(
        (status = 200, description = "Payment processed successfully", body = MessageResponse),
        (status = 400, description = "Invalid payment details (non-positive amount)"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Payments",
    security(("BearerAuth" = []))
)]
pub async fn process_payment(
    State(app_state): State<AppState>,
    _authenticated_user: AuthenticatedUser,
    Path(payment_id): Path<String>,
    Json(request): Json<ProcessPaymentRequest>,
) -> Result<Json<MessageResponse>, (StatusCode, Json<serde_json::Value>)> {
    app_state
        .payment_state
        .payment_service
        .process_payment(&payment_id, &request.payment_method_id, &request.payment_details)
        .await
        .map_err(|e: PaymentError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    Ok(Json(MessageResponse {
        success: true,
        message: "Payment processed successfully".to_string(),
    }))
}

/// 고객별 결제 목록 조회 핸들러
/// Get customer payments handler
#[utoipa::path(
    get,
    path = "/api/payments/customers/{customerId}/payments",
    params(
        ("customerId" = String, Path, description = "Customer ID")
    ),
    responses(
        (status = 200, description = "Payments retrieved successfully", body = PaymentListResponse),
        (status = 500, description = "Internal server error")
    ),
    tag = "Payments",
    security(("BearerAuth" = []))
)]
pub async fn get_customer_payments(
    State(app_state): State<AppState>,
    _authenticated_user: AuthenticatedUser,
    Path(customer_id): Path<String>,
) -> Result<Json<PaymentListResponse>, (StatusCode, Json<serde_json::Value>)> {
    let payments = app_state
        .payment_state
        .payment_service
        .get_customer_payments(&customer_id)
        .await
        .map_err(|e: PaymentError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    Ok(Json(PaymentListResponse {
        success: true,
        data: payments,
    }))
}
