//! Hotel repository interface

use async_trait::async_trait;

use super::model::{Hotel, HotelDetails, RoomType, RoomTypeDetails};
use crate::domain::DomainResult;

#[async_trait]
pub trait HotelRepository: Send + Sync {
    async fn create(&self, details: HotelDetails) -> DomainResult<Hotel>;

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Hotel>>;

    /// Returns `None` when the hotel does not exist
    async fn update(&self, id: i32, details: HotelDetails) -> DomainResult<Option<Hotel>>;

    async fn find_all(&self) -> DomainResult<Vec<Hotel>>;

    // ── Room types ──────────────────────────────────────────

    async fn create_room_type(
        &self,
        hotel_id: i32,
        details: RoomTypeDetails,
    ) -> DomainResult<RoomType>;

    async fn find_room_type(&self, id: i32) -> DomainResult<Option<RoomType>>;

    async fn update_room_type(
        &self,
        id: i32,
        details: RoomTypeDetails,
    ) -> DomainResult<Option<RoomType>>;

    /// All room types, optionally restricted to one hotel
    async fn find_room_types(&self, hotel_id: Option<i32>) -> DomainResult<Vec<RoomType>>;
}
