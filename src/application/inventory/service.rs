use std::sync::Arc;

use chrono::NaiveDate;
use tracing::info;

use crate::domain::booking::StayDates;
use crate::domain::hotel::{Hotel, HotelDetails, RoomType, RoomTypeDetails};
use crate::domain::room::{NewRoom, Room, RoomFilter, RoomStatus, RoomUpdate};
use crate::domain::{DomainError, DomainResult, RepositoryProvider};

/// Inventory service: descriptive hotel data and manual room status.
///
/// `occupied` is never set here; only the booking lifecycle owns it.
pub struct InventoryService {
    repos: Arc<dyn RepositoryProvider>,
}

impl InventoryService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    // ── Hotels ──────────────────────────────────────────────────

    pub async fn create_hotel(&self, details: HotelDetails) -> DomainResult<Hotel> {
        details.validate()?;
        let hotel = self.repos.hotels().create(details).await?;
        info!(hotel_id = hotel.id, name = %hotel.name, "Hotel created");
        Ok(hotel)
    }

    pub async fn get_hotel(&self, id: i32) -> DomainResult<Hotel> {
        self.repos
            .hotels()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Hotel", "id", id))
    }

    pub async fn update_hotel(&self, id: i32, details: HotelDetails) -> DomainResult<Hotel> {
        details.validate()?;
        self.repos
            .hotels()
            .update(id, details)
            .await?
            .ok_or_else(|| DomainError::not_found("Hotel", "id", id))
    }

    pub async fn list_hotels(&self) -> DomainResult<Vec<Hotel>> {
        self.repos.hotels().find_all().await
    }

    // ── Room types ──────────────────────────────────────────────

    pub async fn create_room_type(
        &self,
        hotel_id: i32,
        details: RoomTypeDetails,
    ) -> DomainResult<RoomType> {
        details.validate()?;
        self.get_hotel(hotel_id).await?;
        self.repos.hotels().create_room_type(hotel_id, details).await
    }

    pub async fn get_room_type(&self, id: i32) -> DomainResult<RoomType> {
        self.repos
            .hotels()
            .find_room_type(id)
            .await?
            .ok_or_else(|| DomainError::not_found("RoomType", "id", id))
    }

    pub async fn update_room_type(
        &self,
        id: i32,
        details: RoomTypeDetails,
    ) -> DomainResult<RoomType> {
        details.validate()?;
        self.repos
            .hotels()
            .update_room_type(id, details)
            .await?
            .ok_or_else(|| DomainError::not_found("RoomType", "id", id))
    }

    pub async fn list_room_types(&self, hotel_id: Option<i32>) -> DomainResult<Vec<RoomType>> {
        self.repos.hotels().find_room_types(hotel_id).await
    }

    // ── Rooms ───────────────────────────────────────────────────

    pub async fn create_room(&self, room: NewRoom) -> DomainResult<Room> {
        if room.number.trim().is_empty() {
            return Err(DomainError::Validation("Room number must not be empty".into()));
        }
        let room_type = self.get_room_type(room.room_type_id).await?;
        if room_type.hotel_id != room.hotel_id {
            return Err(DomainError::Validation(format!(
                "Room type {} does not belong to hotel {}",
                room_type.id, room.hotel_id
            )));
        }
        let room = self.repos.rooms().create(room).await?;
        info!(room_id = room.id, number = %room.number, "Room created");
        Ok(room)
    }

    pub async fn get_room(&self, id: i32) -> DomainResult<Room> {
        self.repos
            .rooms()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Room", "id", id))
    }

    pub async fn update_room(&self, id: i32, update: RoomUpdate) -> DomainResult<Room> {
        if update.number.as_deref().is_some_and(|n| n.trim().is_empty()) {
            return Err(DomainError::Validation("Room number must not be empty".into()));
        }
        self.repos
            .rooms()
            .update(id, update)
            .await?
            .ok_or_else(|| DomainError::not_found("Room", "id", id))
    }

    pub async fn list_rooms(&self, filter: RoomFilter) -> DomainResult<Vec<Room>> {
        self.repos.rooms().find_all(filter).await
    }

    /// Manual status change between `available` and `maintenance`
    pub async fn set_room_status(&self, id: i32, status: RoomStatus) -> DomainResult<Room> {
        if !status.is_manual() {
            return Err(DomainError::Validation(
                "Room status 'occupied' is only set by check-in".into(),
            ));
        }

        let room = self.get_room(id).await?;
        if room.status == status {
            return Ok(room);
        }
        if room.status == RoomStatus::Occupied {
            return Err(DomainError::Conflict(format!(
                "Room {} is occupied; check the guest out first",
                room.number
            )));
        }

        if !self
            .repos
            .rooms()
            .update_status(id, room.status, status)
            .await?
        {
            return Err(DomainError::Conflict(format!(
                "Room {} changed status concurrently",
                room.number
            )));
        }
        info!(room_id = id, from = %room.status, to = %status, "Room status changed");
        self.get_room(id).await
    }

    /// Rooms of a hotel free for the whole stay and large enough for `guests`
    pub async fn availability(
        &self,
        hotel_id: i32,
        room_type_id: Option<i32>,
        check_in: NaiveDate,
        check_out: NaiveDate,
        guests: i32,
    ) -> DomainResult<Vec<Room>> {
        let stay = StayDates::new(check_in, check_out)?;
        if guests < 1 {
            return Err(DomainError::Validation("Guests must be at least 1".into()));
        }
        self.get_hotel(hotel_id).await?;
        self.repos
            .rooms()
            .find_available(hotel_id, room_type_id, guests, stay)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::booking::{BookingService, CreateBooking};
    use crate::infrastructure::database::test_support::{date, fixture};

    #[tokio::test]
    async fn manual_status_only_between_available_and_maintenance() {
        let f = fixture().await;
        let svc = InventoryService::new(f.repos.clone());

        let room = svc
            .set_room_status(f.room_101.id, RoomStatus::Maintenance)
            .await
            .unwrap();
        assert_eq!(room.status, RoomStatus::Maintenance);

        assert!(matches!(
            svc.set_room_status(f.room_101.id, RoomStatus::Occupied).await,
            Err(DomainError::Validation(_))
        ));

        let room = svc
            .set_room_status(f.room_101.id, RoomStatus::Available)
            .await
            .unwrap();
        assert_eq!(room.status, RoomStatus::Available);
    }

    #[tokio::test]
    async fn occupied_room_cannot_go_to_maintenance() {
        let f = fixture().await;
        let bookings = BookingService::new(f.repos.clone());
        let b = bookings
            .create(CreateBooking {
                customer_id: f.customer.id,
                room_id: f.room_101.id,
                check_in: date(2024, 1, 1),
                check_out: date(2024, 1, 2),
                guests: 1,
                notes: None,
                created_by: None,
            })
            .await
            .unwrap();
        bookings.check_in(b.id, &f.staff.id, None).await.unwrap();

        let svc = InventoryService::new(f.repos.clone());
        assert!(matches!(
            svc.set_room_status(f.room_101.id, RoomStatus::Maintenance).await,
            Err(DomainError::Conflict(_))
        ));
    }

    #[tokio::test]
    async fn availability_excludes_booked_and_maintenance_rooms() {
        let f = fixture().await;
        let svc = InventoryService::new(f.repos.clone());
        let bookings = BookingService::new(f.repos.clone());

        bookings
            .create(CreateBooking {
                customer_id: f.customer.id,
                room_id: f.room_101.id,
                check_in: date(2024, 5, 1),
                check_out: date(2024, 5, 4),
                guests: 2,
                notes: None,
                created_by: None,
            })
            .await
            .unwrap();

        let free = svc
            .availability(f.hotel.id, None, date(2024, 5, 2), date(2024, 5, 3), 2)
            .await
            .unwrap();
        assert_eq!(free.iter().map(|r| r.id).collect::<Vec<_>>(), vec![f.room_102.id]);

        // Back-to-back with the booking
        let free = svc
            .availability(f.hotel.id, None, date(2024, 5, 4), date(2024, 5, 5), 1)
            .await
            .unwrap();
        assert_eq!(free.len(), 2);

        svc.set_room_status(f.room_102.id, RoomStatus::Maintenance)
            .await
            .unwrap();
        let free = svc
            .availability(f.hotel.id, None, date(2024, 5, 2), date(2024, 5, 3), 1)
            .await
            .unwrap();
        assert!(free.is_empty());

        // Nobody fits three guests in a double
        let free = svc
            .availability(f.hotel.id, Some(f.room_type.id), date(2024, 6, 1), date(2024, 6, 2), 3)
            .await
            .unwrap();
        assert!(free.is_empty());
    }

    #[tokio::test]
    async fn room_numbers_unique_per_hotel() {
        let f = fixture().await;
        let svc = InventoryService::new(f.repos.clone());
        let err = svc
            .create_room(NewRoom {
                hotel_id: f.hotel.id,
                room_type_id: f.room_type.id,
                number: "101".into(),
                floor: 1,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));

        let other = svc
            .create_hotel(HotelDetails {
                name: "Annex".into(),
                ..Default::default()
            })
            .await
            .unwrap();
        let rt = svc
            .create_room_type(
                other.id,
                RoomTypeDetails {
                    name: "Single".into(),
                    description: None,
                    base_price: 5_000,
                    capacity: 1,
                },
            )
            .await
            .unwrap();
        svc.create_room(NewRoom {
            hotel_id: other.id,
            room_type_id: rt.id,
            number: "101".into(),
            floor: 1,
        })
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn room_type_must_belong_to_the_hotel() {
        let f = fixture().await;
        let svc = InventoryService::new(f.repos.clone());
        let other = svc
            .create_hotel(HotelDetails {
                name: "Annex".into(),
                ..Default::default()
            })
            .await
            .unwrap();

        let err = svc
            .create_room(NewRoom {
                hotel_id: other.id,
                room_type_id: f.room_type.id,
                number: "201".into(),
                floor: 2,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        let err = svc
            .create_room_type(
                9_999,
                RoomTypeDetails {
                    name: "Ghost".into(),
                    description: None,
                    base_price: 1,
                    capacity: 1,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }
}
