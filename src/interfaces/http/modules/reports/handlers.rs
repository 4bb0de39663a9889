use axum::{extract::State, Json};
use chrono::Utc;

use super::dto::{DashboardDto, DashboardParams, RevenueDto, RevenueParams};
use crate::interfaces::http::common::{ApiResponse, ApiResult, ErrorBody, Query};
use crate::interfaces::http::router::AppState;

#[utoipa::path(
    get,
    path = "/v1/user/reports/dashboard",
    tag = "Reports",
    security(("bearer_auth" = [])),
    params(DashboardParams),
    responses((status = 200, description = "Rooms, bookings, arrivals and departures for a day", body = ApiResponse<DashboardDto>))
)]
pub async fn dashboard(
    State(state): State<AppState>,
    Query(params): Query<DashboardParams>,
) -> ApiResult<Json<ApiResponse<DashboardDto>>> {
    let date = params.date.unwrap_or_else(|| Utc::now().date_naive());
    let summary = state.reports.summary(date).await?;
    Ok(Json(ApiResponse::success(DashboardDto::from(summary))))
}

#[utoipa::path(
    get,
    path = "/v1/user/reports/revenue",
    tag = "Reports",
    security(("bearer_auth" = [])),
    params(RevenueParams),
    responses(
        (status = 200, description = "Payments received in the date range", body = ApiResponse<RevenueDto>),
        (status = 400, description = "End date before start date", body = ErrorBody)
    )
)]
pub async fn revenue(
    State(state): State<AppState>,
    Query(params): Query<RevenueParams>,
) -> ApiResult<Json<ApiResponse<RevenueDto>>> {
    let report = state.reports.revenue(params.from, params.to).await?;
    Ok(Json(ApiResponse::success(RevenueDto::new(
        report,
        &state.currency,
    ))))
}
