use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::domain::room::{NewRoom, RoomUpdate};
use crate::domain::Room;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateRoomRequest {
    pub hotel_id: i32,
    pub room_type_id: i32,
    #[validate(length(min = 1, max = 20, message = "number must be 1-20 characters"))]
    pub number: String,
    #[serde(default)]
    pub floor: i32,
}

impl From<CreateRoomRequest> for NewRoom {
    fn from(r: CreateRoomRequest) -> Self {
        Self {
            hotel_id: r.hotel_id,
            room_type_id: r.room_type_id,
            number: r.number.trim().to_string(),
            floor: r.floor,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateRoomRequest {
    pub room_type_id: Option<i32>,
    #[validate(length(min = 1, max = 20, message = "number must be 1-20 characters"))]
    pub number: Option<String>,
    pub floor: Option<i32>,
}

impl From<UpdateRoomRequest> for RoomUpdate {
    fn from(r: UpdateRoomRequest) -> Self {
        Self {
            room_type_id: r.room_type_id,
            number: r.number.map(|n| n.trim().to_string()),
            floor: r.floor,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RoomStatusRequest {
    /// `available` or `maintenance`
    #[validate(length(min = 1, message = "status is required"))]
    pub status: String,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListRoomsParams {
    pub hotel_id: Option<i32>,
    pub room_type_id: Option<i32>,
    /// available, occupied or maintenance
    pub status: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RoomDto {
    pub id: i32,
    pub hotel_id: i32,
    pub room_type_id: i32,
    pub number: String,
    pub floor: i32,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Room> for RoomDto {
    fn from(r: Room) -> Self {
        Self {
            id: r.id,
            hotel_id: r.hotel_id,
            room_type_id: r.room_type_id,
            number: r.number,
            floor: r.floor,
            status: r.status.to_string(),
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}
