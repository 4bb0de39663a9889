use axum::{
    extract::State,
    http::StatusCode,
    Extension, Json,
};

use super::dto::{BalanceDto, PaymentDto, RecordPaymentRequest};
use crate::application::payments::RecordPayment;
use crate::domain::PaymentMethod;
use crate::interfaces::http::common::{ApiResponse, ApiResult, ErrorBody, Path, ValidatedJson};
use crate::interfaces::http::middleware::AuthenticatedUser;
use crate::interfaces::http::router::AppState;

#[utoipa::path(
    get,
    path = "/v1/user/bookings/{id}/payments",
    tag = "Payments",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Payments in the order received", body = ApiResponse<Vec<PaymentDto>>),
        (status = 404, description = "Booking not found", body = ErrorBody)
    )
)]
pub async fn list_payments(
    State(state): State<AppState>,
    Path(booking_id): Path<i32>,
) -> ApiResult<Json<ApiResponse<Vec<PaymentDto>>>> {
    let payments = state.payments.list(booking_id).await?;
    Ok(Json(ApiResponse::success(
        payments.into_iter().map(PaymentDto::from).collect(),
    )))
}

#[utoipa::path(
    post,
    path = "/v1/user/bookings/{id}/payments",
    tag = "Payments",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Booking ID")),
    request_body = RecordPaymentRequest,
    responses(
        (status = 201, description = "Payment recorded", body = ApiResponse<PaymentDto>),
        (status = 400, description = "Amount exceeds the outstanding balance", body = ErrorBody),
        (status = 409, description = "Booking is cancelled", body = ErrorBody)
    )
)]
pub async fn record_payment(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(booking_id): Path<i32>,
    ValidatedJson(request): ValidatedJson<RecordPaymentRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<PaymentDto>>)> {
    let method: PaymentMethod = request.method.parse()?;
    let payment = state
        .payments
        .record(RecordPayment {
            booking_id,
            amount: request.amount,
            method,
            reference: request.reference,
            received_by: Some(user.user_id),
        })
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(PaymentDto::from(payment))),
    ))
}

#[utoipa::path(
    get,
    path = "/v1/user/bookings/{id}/balance",
    tag = "Payments",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Total, paid and outstanding amounts", body = ApiResponse<BalanceDto>),
        (status = 404, description = "Booking not found", body = ErrorBody)
    )
)]
pub async fn get_balance(
    State(state): State<AppState>,
    Path(booking_id): Path<i32>,
) -> ApiResult<Json<ApiResponse<BalanceDto>>> {
    let balance = state.payments.balance(booking_id).await?;
    Ok(Json(ApiResponse::success(BalanceDto::new(
        booking_id,
        balance,
        &state.currency,
    ))))
}
