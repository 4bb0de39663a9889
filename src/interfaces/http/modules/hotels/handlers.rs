//! Hotel and room type handlers

use axum::{
    extract::State,
    http::StatusCode,
    Extension, Json,
};

use super::dto::{
    AvailabilityParams, HotelDto, HotelRequest, ListRoomTypesParams, RoomTypeDto,
    RoomTypeRequest,
};
use crate::interfaces::http::common::{
    ApiResponse, ApiResult, ErrorBody, Path, Query, ValidatedJson,
};
use crate::interfaces::http::middleware::AuthenticatedUser;
use crate::interfaces::http::modules::rooms::RoomDto;
use crate::interfaces::http::router::AppState;

// ── Hotels ──────────────────────────────────────────────────────

#[utoipa::path(
    get,
    path = "/v1/user/hotels",
    tag = "Hotels",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "All hotels", body = ApiResponse<Vec<HotelDto>>))
)]
pub async fn list_hotels(State(state): State<AppState>) -> ApiResult<Json<ApiResponse<Vec<HotelDto>>>> {
    let hotels = state.inventory.list_hotels().await?;
    Ok(Json(ApiResponse::success(
        hotels.into_iter().map(HotelDto::from).collect(),
    )))
}

#[utoipa::path(
    post,
    path = "/v1/user/hotels",
    tag = "Hotels",
    security(("bearer_auth" = [])),
    request_body = HotelRequest,
    responses(
        (status = 201, description = "Hotel created", body = ApiResponse<HotelDto>),
        (status = 403, description = "Manager or admin role required", body = ErrorBody)
    )
)]
pub async fn create_hotel(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    ValidatedJson(request): ValidatedJson<HotelRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<HotelDto>>)> {
    user.require_inventory_manager()?;
    let hotel = state.inventory.create_hotel(request.into()).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(HotelDto::from(hotel))),
    ))
}

#[utoipa::path(
    get,
    path = "/v1/user/hotels/{id}",
    tag = "Hotels",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Hotel ID")),
    responses(
        (status = 200, description = "Hotel", body = ApiResponse<HotelDto>),
        (status = 404, description = "Not found", body = ErrorBody)
    )
)]
pub async fn get_hotel(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<Json<ApiResponse<HotelDto>>> {
    let hotel = state.inventory.get_hotel(id).await?;
    Ok(Json(ApiResponse::success(HotelDto::from(hotel))))
}

#[utoipa::path(
    put,
    path = "/v1/user/hotels/{id}",
    tag = "Hotels",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Hotel ID")),
    request_body = HotelRequest,
    responses(
        (status = 200, description = "Hotel updated", body = ApiResponse<HotelDto>),
        (status = 404, description = "Not found", body = ErrorBody)
    )
)]
pub async fn update_hotel(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i32>,
    ValidatedJson(request): ValidatedJson<HotelRequest>,
) -> ApiResult<Json<ApiResponse<HotelDto>>> {
    user.require_inventory_manager()?;
    let hotel = state.inventory.update_hotel(id, request.into()).await?;
    Ok(Json(ApiResponse::success(HotelDto::from(hotel))))
}

#[utoipa::path(
    get,
    path = "/v1/user/hotels/{id}/availability",
    tag = "Hotels",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Hotel ID"), AvailabilityParams),
    responses(
        (status = 200, description = "Rooms free for the whole stay", body = ApiResponse<Vec<RoomDto>>),
        (status = 400, description = "Invalid dates", body = ErrorBody)
    )
)]
pub async fn availability(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Query(params): Query<AvailabilityParams>,
) -> ApiResult<Json<ApiResponse<Vec<RoomDto>>>> {
    let rooms = state
        .inventory
        .availability(
            id,
            params.room_type_id,
            params.check_in,
            params.check_out,
            params.guests.unwrap_or(1),
        )
        .await?;
    Ok(Json(ApiResponse::success(
        rooms.into_iter().map(RoomDto::from).collect(),
    )))
}

// ── Room types ──────────────────────────────────────────────────

#[utoipa::path(
    post,
    path = "/v1/user/hotels/{id}/room-types",
    tag = "Room Types",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Hotel ID")),
    request_body = RoomTypeRequest,
    responses(
        (status = 201, description = "Room type created", body = ApiResponse<RoomTypeDto>),
        (status = 404, description = "Hotel not found", body = ErrorBody)
    )
)]
pub async fn create_room_type(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(hotel_id): Path<i32>,
    ValidatedJson(request): ValidatedJson<RoomTypeRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<RoomTypeDto>>)> {
    user.require_inventory_manager()?;
    let room_type = state
        .inventory
        .create_room_type(hotel_id, request.into())
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(RoomTypeDto::from(room_type))),
    ))
}

#[utoipa::path(
    get,
    path = "/v1/user/room-types",
    tag = "Room Types",
    security(("bearer_auth" = [])),
    params(ListRoomTypesParams),
    responses((status = 200, description = "Room types", body = ApiResponse<Vec<RoomTypeDto>>))
)]
pub async fn list_room_types(
    State(state): State<AppState>,
    Query(params): Query<ListRoomTypesParams>,
) -> ApiResult<Json<ApiResponse<Vec<RoomTypeDto>>>> {
    let types = state.inventory.list_room_types(params.hotel_id).await?;
    Ok(Json(ApiResponse::success(
        types.into_iter().map(RoomTypeDto::from).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/v1/user/room-types/{id}",
    tag = "Room Types",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Room type ID")),
    responses(
        (status = 200, description = "Room type", body = ApiResponse<RoomTypeDto>),
        (status = 404, description = "Not found", body = ErrorBody)
    )
)]
pub async fn get_room_type(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<Json<ApiResponse<RoomTypeDto>>> {
    let room_type = state.inventory.get_room_type(id).await?;
    Ok(Json(ApiResponse::success(RoomTypeDto::from(room_type))))
}

#[utoipa::path(
    put,
    path = "/v1/user/room-types/{id}",
    tag = "Room Types",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Room type ID")),
    request_body = RoomTypeRequest,
    responses(
        (status = 200, description = "Room type updated", body = ApiResponse<RoomTypeDto>),
        (status = 404, description = "Not found", body = ErrorBody)
    )
)]
pub async fn update_room_type(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i32>,
    ValidatedJson(request): ValidatedJson<RoomTypeRequest>,
) -> ApiResult<Json<ApiResponse<RoomTypeDto>>> {
    user.require_inventory_manager()?;
    let room_type = state.inventory.update_room_type(id, request.into()).await?;
    Ok(Json(ApiResponse::success(RoomTypeDto::from(room_type))))
}
