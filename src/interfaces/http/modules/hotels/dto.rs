use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::domain::hotel::{HotelDetails, RoomTypeDetails};
use crate::domain::{Hotel, RoomType};

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct HotelRequest {
    #[validate(length(min = 1, max = 200, message = "name must be 1-200 characters"))]
    pub name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    #[validate(email(message = "invalid email format"))]
    pub email: Option<String>,
    #[validate(range(min = 1, max = 5, message = "star rating must be 1-5"))]
    pub star_rating: Option<i32>,
}

impl From<HotelRequest> for HotelDetails {
    fn from(r: HotelRequest) -> Self {
        Self {
            name: r.name,
            address: r.address,
            phone: r.phone,
            email: r.email,
            star_rating: r.star_rating,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HotelDto {
    pub id: i32,
    pub name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub star_rating: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Hotel> for HotelDto {
    fn from(h: Hotel) -> Self {
        Self {
            id: h.id,
            name: h.name,
            address: h.address,
            phone: h.phone,
            email: h.email,
            star_rating: h.star_rating,
            created_at: h.created_at,
            updated_at: h.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RoomTypeRequest {
    #[validate(length(min = 1, max = 100, message = "name must be 1-100 characters"))]
    pub name: String,
    pub description: Option<String>,
    /// Nightly price in minor currency units
    #[validate(range(min = 0, message = "base price must not be negative"))]
    pub base_price: i64,
    #[validate(range(min = 1, max = 20, message = "capacity must be 1-20"))]
    pub capacity: i32,
}

impl From<RoomTypeRequest> for RoomTypeDetails {
    fn from(r: RoomTypeRequest) -> Self {
        Self {
            name: r.name,
            description: r.description,
            base_price: r.base_price,
            capacity: r.capacity,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RoomTypeDto {
    pub id: i32,
    pub hotel_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub base_price: i64,
    pub capacity: i32,
    pub created_at: DateTime<Utc>,
}

impl From<RoomType> for RoomTypeDto {
    fn from(t: RoomType) -> Self {
        Self {
            id: t.id,
            hotel_id: t.hotel_id,
            name: t.name,
            description: t.description,
            base_price: t.base_price,
            capacity: t.capacity,
            created_at: t.created_at,
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListRoomTypesParams {
    pub hotel_id: Option<i32>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AvailabilityParams {
    pub check_in: NaiveDate,
    /// Exclusive; the guest leaves this morning
    pub check_out: NaiveDate,
    /// Default 1
    pub guests: Option<i32>,
    pub room_type_id: Option<i32>,
}
