//! Room repository interface

use async_trait::async_trait;

use super::model::{NewRoom, Room, RoomFilter, RoomStatus, RoomUpdate};
use crate::domain::booking::StayDates;
use crate::domain::DomainResult;

#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// Insert a new room in `available` state.
    /// Fails with `Conflict` when the number is taken in that hotel.
    async fn create(&self, room: NewRoom) -> DomainResult<Room>;

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Room>>;

    async fn update(&self, id: i32, update: RoomUpdate) -> DomainResult<Option<Room>>;

    async fn find_all(&self, filter: RoomFilter) -> DomainResult<Vec<Room>>;

    /// Set `new` only if the room is currently `expected`.
    /// Returns false when the room was in another state.
    async fn update_status(
        &self,
        id: i32,
        expected: RoomStatus,
        new: RoomStatus,
    ) -> DomainResult<bool>;

    async fn count_by_status(&self) -> DomainResult<Vec<(RoomStatus, u64)>>;

    /// Rooms of a hotel that are not under maintenance, fit `guests` and
    /// have no non-cancelled booking overlapping `stay`.
    async fn find_available(
        &self,
        hotel_id: i32,
        room_type_id: Option<i32>,
        guests: i32,
        stay: StayDates,
    ) -> DomainResult<Vec<Room>>;
}
