use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::application::booking::{BookingDetails, Quote};
use crate::domain::booking::{CheckIn, CheckOut};
use crate::domain::Booking;
use crate::interfaces::http::modules::customers::CustomerDto;
use crate::interfaces::http::modules::rooms::RoomDto;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBookingRequest {
    pub customer_id: i32,
    pub room_id: i32,
    pub check_in_date: NaiveDate,
    /// Exclusive; must be after `check_in_date`
    pub check_out_date: NaiveDate,
    #[validate(range(min = 1, max = 20, message = "guests must be 1-20"))]
    pub guests: i32,
    #[validate(length(max = 1000, message = "notes must be at most 1000 characters"))]
    pub notes: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct CheckInRequest {
    #[validate(length(max = 1000, message = "notes must be at most 1000 characters"))]
    pub notes: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct CheckOutRequest {
    /// Minibar, damages and the like, in minor currency units
    #[validate(range(min = 0, message = "additional charges must not be negative"))]
    pub additional_charges: Option<i64>,
    #[validate(length(max = 1000, message = "notes must be at most 1000 characters"))]
    pub notes: Option<String>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListBookingsParams {
    /// booked, checked_in, checked_out or cancelled
    pub status: Option<String>,
    pub customer_id: Option<i32>,
    pub room_id: Option<i32>,
    /// Only stays overlapping `[from, to)`; both must be given
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct QuoteParams {
    pub room_id: i32,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BookingDto {
    pub id: i32,
    pub customer_id: i32,
    pub room_id: i32,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub nights: i64,
    pub guests: i32,
    pub status: String,
    /// Minor currency units
    pub total_amount: i64,
    pub notes: Option<String>,
    pub created_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Booking> for BookingDto {
    fn from(b: Booking) -> Self {
        Self {
            id: b.id,
            customer_id: b.customer_id,
            room_id: b.room_id,
            nights: (b.check_out_date - b.check_in_date).num_days(),
            check_in_date: b.check_in_date,
            check_out_date: b.check_out_date,
            guests: b.guests,
            status: b.status.to_string(),
            total_amount: b.total_amount,
            notes: b.notes,
            created_by: b.created_by,
            created_at: b.created_at,
            updated_at: b.updated_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CheckInDto {
    pub checked_in_at: DateTime<Utc>,
    pub checked_in_by: String,
    pub notes: Option<String>,
}

impl From<CheckIn> for CheckInDto {
    fn from(c: CheckIn) -> Self {
        Self {
            checked_in_at: c.checked_in_at,
            checked_in_by: c.checked_in_by,
            notes: c.notes,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CheckOutDto {
    pub checked_out_at: DateTime<Utc>,
    pub checked_out_by: String,
    pub additional_charges: i64,
    pub notes: Option<String>,
}

impl From<CheckOut> for CheckOutDto {
    fn from(c: CheckOut) -> Self {
        Self {
            checked_out_at: c.checked_out_at,
            checked_out_by: c.checked_out_by,
            additional_charges: c.additional_charges,
            notes: c.notes,
        }
    }
}

/// Booking with its guest, room, lifecycle records and payment state
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BookingDetailsDto {
    pub booking: BookingDto,
    pub customer: CustomerDto,
    pub room: RoomDto,
    pub check_in: Option<CheckInDto>,
    pub check_out: Option<CheckOutDto>,
    pub paid: i64,
    pub outstanding: i64,
    pub currency: String,
}

impl BookingDetailsDto {
    pub fn new(details: BookingDetails, currency: &str) -> Self {
        let outstanding = (details.booking.total_amount - details.paid).max(0);
        Self {
            booking: details.booking.into(),
            customer: details.customer.into(),
            room: details.room.into(),
            check_in: details.check_in.map(Into::into),
            check_out: details.check_out.map(Into::into),
            paid: details.paid,
            outstanding,
            currency: currency.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct QuoteDto {
    pub room_id: i32,
    pub room_type_id: i32,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub nights: i64,
    pub nightly_rate: i64,
    pub total: i64,
    pub currency: String,
    /// Whether the room could be booked for these dates right now
    pub available: bool,
}

impl QuoteDto {
    pub fn new(q: Quote, currency: &str) -> Self {
        Self {
            room_id: q.room_id,
            room_type_id: q.room_type_id,
            check_in: q.check_in,
            check_out: q.check_out,
            nights: q.nights,
            nightly_rate: q.nightly_rate,
            total: q.total,
            currency: currency.to_string(),
            available: q.available,
        }
    }
}
