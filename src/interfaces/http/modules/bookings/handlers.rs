//! Booking handlers
//!
//! Thin wrappers over `BookingService`; the acting staff member is recorded
//! on creation, check-in and check-out.

use axum::{
    extract::State,
    http::StatusCode,
    Extension, Json,
};

use super::dto::{
    BookingDetailsDto, BookingDto, CheckInRequest, CheckOutRequest, CreateBookingRequest,
    ListBookingsParams, QuoteDto, QuoteParams,
};
use crate::application::booking::{service::parse_status, CreateBooking};
use crate::domain::booking::BookingFilter;
use crate::domain::{DomainError, StayDates};
use crate::interfaces::http::common::{
    ApiResponse, ApiResult, ErrorBody, PaginatedResponse, Path, Query, ValidatedJson,
};
use crate::interfaces::http::middleware::AuthenticatedUser;
use crate::interfaces::http::router::AppState;
use crate::shared::PageRequest;

#[utoipa::path(
    get,
    path = "/v1/user/bookings",
    tag = "Bookings",
    security(("bearer_auth" = [])),
    params(ListBookingsParams),
    responses(
        (status = 200, description = "Bookings, latest stay first", body = ApiResponse<PaginatedResponse<BookingDto>>),
        (status = 400, description = "Invalid filter", body = ErrorBody)
    )
)]
pub async fn list_bookings(
    State(state): State<AppState>,
    Query(params): Query<ListBookingsParams>,
) -> ApiResult<Json<ApiResponse<PaginatedResponse<BookingDto>>>> {
    let stay = match (params.from, params.to) {
        (Some(from), Some(to)) => Some(StayDates::new(from, to)?),
        (None, None) => None,
        _ => {
            return Err(DomainError::Validation(
                "Both 'from' and 'to' are required to filter by dates".into(),
            )
            .into())
        }
    };
    let filter = BookingFilter {
        status: parse_status(params.status.as_deref())?,
        customer_id: params.customer_id,
        room_id: params.room_id,
        stay,
        page: PageRequest::new(params.page, params.limit),
    };
    let result = state.bookings.list(filter).await?;
    Ok(Json(ApiResponse::success(PaginatedResponse::from_result(
        result,
    ))))
}

#[utoipa::path(
    post,
    path = "/v1/user/bookings",
    tag = "Bookings",
    security(("bearer_auth" = [])),
    request_body = CreateBookingRequest,
    responses(
        (status = 201, description = "Room reserved", body = ApiResponse<BookingDto>),
        (status = 400, description = "Invalid dates or too many guests", body = ErrorBody),
        (status = 404, description = "Unknown customer or room", body = ErrorBody),
        (status = 409, description = "Room already booked for these dates", body = ErrorBody)
    )
)]
pub async fn create_booking(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    ValidatedJson(request): ValidatedJson<CreateBookingRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<BookingDto>>)> {
    let booking = state
        .bookings
        .create(CreateBooking {
            customer_id: request.customer_id,
            room_id: request.room_id,
            check_in: request.check_in_date,
            check_out: request.check_out_date,
            guests: request.guests,
            notes: request.notes,
            created_by: Some(user.user_id),
        })
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(BookingDto::from(booking))),
    ))
}

#[utoipa::path(
    get,
    path = "/v1/user/bookings/quote",
    tag = "Bookings",
    security(("bearer_auth" = [])),
    params(QuoteParams),
    responses(
        (status = 200, description = "Price preview; nothing is reserved", body = ApiResponse<QuoteDto>),
        (status = 400, description = "Invalid dates", body = ErrorBody)
    )
)]
pub async fn quote(
    State(state): State<AppState>,
    Query(params): Query<QuoteParams>,
) -> ApiResult<Json<ApiResponse<QuoteDto>>> {
    let quote = state
        .bookings
        .quote(params.room_id, params.check_in, params.check_out)
        .await?;
    Ok(Json(ApiResponse::success(QuoteDto::new(
        quote,
        &state.currency,
    ))))
}

#[utoipa::path(
    get,
    path = "/v1/user/bookings/{id}",
    tag = "Bookings",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Booking details", body = ApiResponse<BookingDetailsDto>),
        (status = 404, description = "Not found", body = ErrorBody)
    )
)]
pub async fn get_booking(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<Json<ApiResponse<BookingDetailsDto>>> {
    let details = state.bookings.details(id).await?;
    Ok(Json(ApiResponse::success(BookingDetailsDto::new(
        details,
        &state.currency,
    ))))
}

#[utoipa::path(
    post,
    path = "/v1/user/bookings/{id}/check-in",
    tag = "Bookings",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Booking ID")),
    request_body(content = CheckInRequest, description = "Optional; may be omitted"),
    responses(
        (status = 200, description = "Guest checked in; room occupied", body = ApiResponse<BookingDto>),
        (status = 409, description = "Not in 'booked' state, or room unavailable", body = ErrorBody)
    )
)]
pub async fn check_in(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i32>,
    body: Option<ValidatedJson<CheckInRequest>>,
) -> ApiResult<Json<ApiResponse<BookingDto>>> {
    let request = body.map(|ValidatedJson(r)| r).unwrap_or_default();
    let booking = state
        .bookings
        .check_in(id, &user.user_id, request.notes)
        .await?;
    Ok(Json(ApiResponse::success(BookingDto::from(booking))))
}

#[utoipa::path(
    post,
    path = "/v1/user/bookings/{id}/check-out",
    tag = "Bookings",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Booking ID")),
    request_body(content = CheckOutRequest, description = "Optional; may be omitted"),
    responses(
        (status = 200, description = "Guest checked out; room available", body = ApiResponse<BookingDto>),
        (status = 409, description = "Not in 'checked_in' state", body = ErrorBody)
    )
)]
pub async fn check_out(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i32>,
    body: Option<ValidatedJson<CheckOutRequest>>,
) -> ApiResult<Json<ApiResponse<BookingDto>>> {
    let request = body.map(|ValidatedJson(r)| r).unwrap_or_default();
    let booking = state
        .bookings
        .check_out(
            id,
            &user.user_id,
            request.additional_charges.unwrap_or(0),
            request.notes,
        )
        .await?;
    Ok(Json(ApiResponse::success(BookingDto::from(booking))))
}

#[utoipa::path(
    post,
    path = "/v1/user/bookings/{id}/cancel",
    tag = "Bookings",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Booking cancelled", body = ApiResponse<BookingDto>),
        (status = 409, description = "Already checked out or cancelled", body = ErrorBody)
    )
)]
pub async fn cancel_booking(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<Json<ApiResponse<BookingDto>>> {
    let booking = state.bookings.cancel(id).await?;
    Ok(Json(ApiResponse::success(BookingDto::from(booking))))
}
