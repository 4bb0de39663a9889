use axum::{
    extract::State,
    http::StatusCode,
    Extension, Json,
};

use super::dto::{CreateRoomRequest, ListRoomsParams, RoomDto, RoomStatusRequest, UpdateRoomRequest};
use crate::domain::room::RoomFilter;
use crate::domain::RoomStatus;
use crate::interfaces::http::common::{
    ApiResponse, ApiResult, ErrorBody, Path, Query, ValidatedJson,
};
use crate::interfaces::http::middleware::AuthenticatedUser;
use crate::interfaces::http::router::AppState;

#[utoipa::path(
    get,
    path = "/v1/user/rooms",
    tag = "Rooms",
    security(("bearer_auth" = [])),
    params(ListRoomsParams),
    responses(
        (status = 200, description = "Rooms", body = ApiResponse<Vec<RoomDto>>),
        (status = 400, description = "Unknown status", body = ErrorBody)
    )
)]
pub async fn list_rooms(
    State(state): State<AppState>,
    Query(params): Query<ListRoomsParams>,
) -> ApiResult<Json<ApiResponse<Vec<RoomDto>>>> {
    let filter = RoomFilter {
        hotel_id: params.hotel_id,
        room_type_id: params.room_type_id,
        status: params
            .status
            .as_deref()
            .map(str::parse::<RoomStatus>)
            .transpose()?,
    };
    let rooms = state.inventory.list_rooms(filter).await?;
    Ok(Json(ApiResponse::success(
        rooms.into_iter().map(RoomDto::from).collect(),
    )))
}

#[utoipa::path(
    post,
    path = "/v1/user/rooms",
    tag = "Rooms",
    security(("bearer_auth" = [])),
    request_body = CreateRoomRequest,
    responses(
        (status = 201, description = "Room created", body = ApiResponse<RoomDto>),
        (status = 409, description = "Room number already used in this hotel", body = ErrorBody)
    )
)]
pub async fn create_room(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    ValidatedJson(request): ValidatedJson<CreateRoomRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<RoomDto>>)> {
    user.require_inventory_manager()?;
    let room = state.inventory.create_room(request.into()).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(RoomDto::from(room))),
    ))
}

#[utoipa::path(
    get,
    path = "/v1/user/rooms/{id}",
    tag = "Rooms",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Room ID")),
    responses(
        (status = 200, description = "Room", body = ApiResponse<RoomDto>),
        (status = 404, description = "Not found", body = ErrorBody)
    )
)]
pub async fn get_room(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<Json<ApiResponse<RoomDto>>> {
    let room = state.inventory.get_room(id).await?;
    Ok(Json(ApiResponse::success(RoomDto::from(room))))
}

#[utoipa::path(
    put,
    path = "/v1/user/rooms/{id}",
    tag = "Rooms",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Room ID")),
    request_body = UpdateRoomRequest,
    responses(
        (status = 200, description = "Room updated", body = ApiResponse<RoomDto>),
        (status = 404, description = "Not found", body = ErrorBody)
    )
)]
pub async fn update_room(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i32>,
    ValidatedJson(request): ValidatedJson<UpdateRoomRequest>,
) -> ApiResult<Json<ApiResponse<RoomDto>>> {
    user.require_inventory_manager()?;
    let room = state.inventory.update_room(id, request.into()).await?;
    Ok(Json(ApiResponse::success(RoomDto::from(room))))
}

#[utoipa::path(
    put,
    path = "/v1/user/rooms/{id}/status",
    tag = "Rooms",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Room ID")),
    request_body = RoomStatusRequest,
    responses(
        (status = 200, description = "Status changed", body = ApiResponse<RoomDto>),
        (status = 400, description = "Occupied is set by check-in only", body = ErrorBody),
        (status = 409, description = "Room is occupied", body = ErrorBody)
    )
)]
pub async fn set_room_status(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i32>,
    ValidatedJson(request): ValidatedJson<RoomStatusRequest>,
) -> ApiResult<Json<ApiResponse<RoomDto>>> {
    user.require_inventory_manager()?;
    let status: RoomStatus = request.status.parse()?;
    let room = state.inventory.set_room_status(id, status).await?;
    Ok(Json(ApiResponse::success(RoomDto::from(room))))
}
