//! Staff management handlers
//!
//! Mounted behind `admin_middleware`; delegates to `UserService`.

use axum::{
    extract::State,
    http::StatusCode,
    Extension, Json,
};

use super::dto::{CreateStaffRequest, ListStaffParams, UpdateStaffRequest};
use crate::application::identity::CreateStaff;
use crate::domain::{GetUserDto, UpdateUserDto, UserRole};
use crate::interfaces::http::common::{
    ApiResponse, ApiResult, ErrorBody, PaginatedResponse, Path, Query, ValidatedJson,
};
use crate::interfaces::http::middleware::AuthenticatedUser;
use crate::interfaces::http::modules::auth::UserDto;
use crate::interfaces::http::router::AppState;
use crate::shared::PageRequest;

fn parse_role(role: Option<&str>) -> ApiResult<Option<UserRole>> {
    Ok(role.map(str::parse::<UserRole>).transpose()?)
}

#[utoipa::path(
    get,
    path = "/v1/user/staff",
    tag = "Staff",
    security(("bearer_auth" = [])),
    params(ListStaffParams),
    responses(
        (status = 200, description = "Staff list", body = ApiResponse<PaginatedResponse<UserDto>>),
        (status = 403, description = "Admin role required", body = ErrorBody)
    )
)]
pub async fn list_staff(
    State(state): State<AppState>,
    Query(params): Query<ListStaffParams>,
) -> ApiResult<Json<ApiResponse<PaginatedResponse<UserDto>>>> {
    let query = GetUserDto {
        search: params.search,
        role: parse_role(params.role.as_deref())?,
        page: PageRequest::new(params.page, params.limit),
        sort_by: params.sort_by,
    };
    let result = state.users.list_staff(query).await?;
    Ok(Json(ApiResponse::success(PaginatedResponse::from_result(
        result,
    ))))
}

#[utoipa::path(
    post,
    path = "/v1/user/staff",
    tag = "Staff",
    security(("bearer_auth" = [])),
    request_body = CreateStaffRequest,
    responses(
        (status = 201, description = "Account created", body = ApiResponse<UserDto>),
        (status = 409, description = "Username or email taken", body = ErrorBody)
    )
)]
pub async fn create_staff(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateStaffRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<UserDto>>)> {
    let user = state
        .users
        .create_staff(CreateStaff {
            username: request.username,
            email: request.email,
            phone: request.phone,
            role: parse_role(request.role.as_deref())?.unwrap_or_default(),
            password: request.password,
        })
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(UserDto::from(user))),
    ))
}

#[utoipa::path(
    get,
    path = "/v1/user/staff/{id}",
    tag = "Staff",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "User ID")),
    responses(
        (status = 200, description = "Account details", body = ApiResponse<UserDto>),
        (status = 404, description = "Not found", body = ErrorBody)
    )
)]
pub async fn get_staff(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<UserDto>>> {
    let user = state.users.get_staff(&id).await?;
    Ok(Json(ApiResponse::success(UserDto::from(user))))
}

#[utoipa::path(
    put,
    path = "/v1/user/staff/{id}",
    tag = "Staff",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "User ID")),
    request_body = UpdateStaffRequest,
    responses(
        (status = 200, description = "Account updated", body = ApiResponse<UserDto>),
        (status = 403, description = "Admins cannot demote or deactivate themselves", body = ErrorBody),
        (status = 404, description = "Not found", body = ErrorBody)
    )
)]
pub async fn update_staff(
    State(state): State<AppState>,
    Extension(actor): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateStaffRequest>,
) -> ApiResult<Json<ApiResponse<UserDto>>> {
    let dto = UpdateUserDto {
        email: request.email,
        phone: request.phone,
        role: parse_role(request.role.as_deref())?,
        is_active: request.is_active,
    };
    let user = state.users.update_staff(&actor.user_id, &id, dto).await?;
    Ok(Json(ApiResponse::success(UserDto::from(user))))
}
