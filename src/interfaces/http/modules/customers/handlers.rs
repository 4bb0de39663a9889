use axum::{
    extract::State,
    http::StatusCode,
    Json,
};

use super::dto::{CustomerDto, CustomerRequest, ListCustomersParams};
use crate::domain::customer::CustomerQuery;
use crate::interfaces::http::common::{
    ApiResponse, ApiResult, ErrorBody, PaginatedResponse, PaginationParams, Path, Query,
    ValidatedJson,
};
use crate::interfaces::http::modules::bookings::BookingDto;
use crate::interfaces::http::router::AppState;
use crate::shared::PageRequest;

#[utoipa::path(
    get,
    path = "/v1/user/customers",
    tag = "Customers",
    security(("bearer_auth" = [])),
    params(ListCustomersParams),
    responses((status = 200, description = "Customers", body = ApiResponse<PaginatedResponse<CustomerDto>>))
)]
pub async fn list_customers(
    State(state): State<AppState>,
    Query(params): Query<ListCustomersParams>,
) -> ApiResult<Json<ApiResponse<PaginatedResponse<CustomerDto>>>> {
    let result = state
        .customers
        .list(CustomerQuery {
            search: params.search,
            page: PageRequest::new(params.page, params.limit),
        })
        .await?;
    Ok(Json(ApiResponse::success(PaginatedResponse::from_result(
        result,
    ))))
}

#[utoipa::path(
    post,
    path = "/v1/user/customers",
    tag = "Customers",
    security(("bearer_auth" = [])),
    request_body = CustomerRequest,
    responses(
        (status = 201, description = "Customer created", body = ApiResponse<CustomerDto>),
        (status = 422, description = "Validation failed", body = ErrorBody)
    )
)]
pub async fn create_customer(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CustomerRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<CustomerDto>>)> {
    let customer = state.customers.create(request.into()).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(CustomerDto::from(customer))),
    ))
}

#[utoipa::path(
    get,
    path = "/v1/user/customers/{id}",
    tag = "Customers",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Customer ID")),
    responses(
        (status = 200, description = "Customer", body = ApiResponse<CustomerDto>),
        (status = 404, description = "Not found", body = ErrorBody)
    )
)]
pub async fn get_customer(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<Json<ApiResponse<CustomerDto>>> {
    let customer = state.customers.get(id).await?;
    Ok(Json(ApiResponse::success(CustomerDto::from(customer))))
}

#[utoipa::path(
    put,
    path = "/v1/user/customers/{id}",
    tag = "Customers",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Customer ID")),
    request_body = CustomerRequest,
    responses(
        (status = 200, description = "Customer updated", body = ApiResponse<CustomerDto>),
        (status = 404, description = "Not found", body = ErrorBody)
    )
)]
pub async fn update_customer(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(request): ValidatedJson<CustomerRequest>,
) -> ApiResult<Json<ApiResponse<CustomerDto>>> {
    let customer = state.customers.update(id, request.into()).await?;
    Ok(Json(ApiResponse::success(CustomerDto::from(customer))))
}

#[utoipa::path(
    get,
    path = "/v1/user/customers/{id}/bookings",
    tag = "Customers",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Customer ID"), PaginationParams),
    responses(
        (status = 200, description = "The customer's bookings, newest first", body = ApiResponse<PaginatedResponse<BookingDto>>),
        (status = 404, description = "Not found", body = ErrorBody)
    )
)]
pub async fn customer_bookings(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Query(params): Query<PaginationParams>,
) -> ApiResult<Json<ApiResponse<PaginatedResponse<BookingDto>>>> {
    let result = state.customers.bookings(id, params.to_page()).await?;
    Ok(Json(ApiResponse::success(PaginatedResponse::from_result(
        result,
    ))))
}
