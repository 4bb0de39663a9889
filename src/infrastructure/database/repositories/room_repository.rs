//! SeaORM implementation of RoomRepository

use std::collections::HashSet;

use async_trait::async_trait;
use chrono::Utc;
use log::{debug, warn};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};

use super::{db_err, is_unique_violation};
use crate::domain::booking::StayDates;
use crate::domain::room::{NewRoom, Room, RoomFilter, RoomRepository, RoomStatus, RoomUpdate};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::{booking, hotel, room, room_type};

pub struct SeaOrmRoomRepository {
    db: DatabaseConnection,
}

impl SeaOrmRoomRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn ensure_room_type_of_hotel(&self, room_type_id: i32, hotel_id: i32) -> DomainResult<()> {
        let rt = room_type::Entity::find_by_id(room_type_id)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or_else(|| DomainError::not_found("RoomType", "id", room_type_id))?;
        if rt.hotel_id != hotel_id {
            return Err(DomainError::Validation(format!(
                "Room type {} does not belong to hotel {}",
                room_type_id, hotel_id
            )));
        }
        Ok(())
    }
}

// ── Conversion helpers ──────────────────────────────────────────

pub(super) fn status_to_entity(s: RoomStatus) -> room::RoomStatus {
    match s {
        RoomStatus::Available => room::RoomStatus::Available,
        RoomStatus::Occupied => room::RoomStatus::Occupied,
        RoomStatus::Maintenance => room::RoomStatus::Maintenance,
    }
}

fn status_to_domain(s: room::RoomStatus) -> RoomStatus {
    match s {
        room::RoomStatus::Available => RoomStatus::Available,
        room::RoomStatus::Occupied => RoomStatus::Occupied,
        room::RoomStatus::Maintenance => RoomStatus::Maintenance,
    }
}

fn model_to_domain(m: room::Model) -> Room {
    Room {
        id: m.id,
        hotel_id: m.hotel_id,
        room_type_id: m.room_type_id,
        number: m.number,
        floor: m.floor,
        status: status_to_domain(m.status),
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

fn duplicate_number(number: &str) -> DomainError {
    DomainError::Conflict(format!("Room number '{}' already exists in this hotel", number))
}

// ── RoomRepository impl ─────────────────────────────────────────

#[async_trait]
impl RoomRepository for SeaOrmRoomRepository {
    async fn create(&self, r: NewRoom) -> DomainResult<Room> {
        if hotel::Entity::find_by_id(r.hotel_id)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .is_none()
        {
            return Err(DomainError::not_found("Hotel", "id", r.hotel_id));
        }
        self.ensure_room_type_of_hotel(r.room_type_id, r.hotel_id).await?;

        debug!("Creating room {} in hotel {}", r.number, r.hotel_id);
        let now = Utc::now();
        let number = r.number.clone();
        let model = room::ActiveModel {
            id: NotSet,
            hotel_id: Set(r.hotel_id),
            room_type_id: Set(r.room_type_id),
            number: Set(r.number),
            floor: Set(r.floor),
            status: Set(room::RoomStatus::Available),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let inserted = model.insert(&self.db).await.map_err(|e| {
            if is_unique_violation(&e) {
                duplicate_number(&number)
            } else {
                db_err(e)
            }
        })?;
        Ok(model_to_domain(inserted))
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Room>> {
        let model = room::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn update(&self, id: i32, u: RoomUpdate) -> DomainResult<Option<Room>> {
        let Some(existing) = room::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?
        else {
            return Ok(None);
        };

        if let Some(room_type_id) = u.room_type_id {
            self.ensure_room_type_of_hotel(room_type_id, existing.hotel_id)
                .await?;
        }

        let mut active: room::ActiveModel = existing.into();
        let number = u.number.clone().unwrap_or_default();
        if let Some(room_type_id) = u.room_type_id {
            active.room_type_id = Set(room_type_id);
        }
        if let Some(n) = u.number {
            active.number = Set(n);
        }
        if let Some(floor) = u.floor {
            active.floor = Set(floor);
        }
        active.updated_at = Set(Utc::now());

        let updated = active.update(&self.db).await.map_err(|e| {
            if is_unique_violation(&e) {
                duplicate_number(&number)
            } else {
                db_err(e)
            }
        })?;
        Ok(Some(model_to_domain(updated)))
    }

    async fn find_all(&self, filter: RoomFilter) -> DomainResult<Vec<Room>> {
        let mut query = room::Entity::find();
        if let Some(hotel_id) = filter.hotel_id {
            query = query.filter(room::Column::HotelId.eq(hotel_id));
        }
        if let Some(room_type_id) = filter.room_type_id {
            query = query.filter(room::Column::RoomTypeId.eq(room_type_id));
        }
        if let Some(status) = filter.status {
            query = query.filter(room::Column::Status.eq(status_to_entity(status)));
        }

        let models = query
            .order_by_asc(room::Column::HotelId)
            .order_by_asc(room::Column::Number)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn update_status(
        &self,
        id: i32,
        expected: RoomStatus,
        new: RoomStatus,
    ) -> DomainResult<bool> {
        let result = room::Entity::update_many()
            .col_expr(room::Column::Status, Expr::value(status_to_entity(new)))
            .col_expr(room::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(room::Column::Id.eq(id))
            .filter(room::Column::Status.eq(status_to_entity(expected)))
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        if result.rows_affected == 0 {
            warn!("Room {} was not {} when changing status to {}", id, expected, new);
            return Ok(false);
        }
        debug!("Room {} status {} → {}", id, expected, new);
        Ok(true)
    }

    async fn count_by_status(&self) -> DomainResult<Vec<(RoomStatus, u64)>> {
        let mut counts = Vec::with_capacity(RoomStatus::ALL.len());
        for status in RoomStatus::ALL {
            let n = room::Entity::find()
                .filter(room::Column::Status.eq(status_to_entity(status)))
                .count(&self.db)
                .await
                .map_err(db_err)?;
            counts.push((status, n));
        }
        Ok(counts)
    }

    async fn find_available(
        &self,
        hotel_id: i32,
        room_type_id: Option<i32>,
        guests: i32,
        stay: StayDates,
    ) -> DomainResult<Vec<Room>> {
        let mut types = room_type::Entity::find()
            .filter(room_type::Column::HotelId.eq(hotel_id))
            .filter(room_type::Column::Capacity.gte(guests));
        if let Some(room_type_id) = room_type_id {
            types = types.filter(room_type::Column::Id.eq(room_type_id));
        }
        let type_ids: Vec<i32> = types
            .all(&self.db)
            .await
            .map_err(db_err)?
            .into_iter()
            .map(|t| t.id)
            .collect();
        if type_ids.is_empty() {
            return Ok(Vec::new());
        }

        let candidates = room::Entity::find()
            .filter(room::Column::HotelId.eq(hotel_id))
            .filter(room::Column::RoomTypeId.is_in(type_ids))
            .filter(room::Column::Status.ne(room::RoomStatus::Maintenance))
            .order_by_asc(room::Column::Number)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        if candidates.is_empty() {
            return Ok(Vec::new());
        }

        let taken: HashSet<i32> = booking::Entity::find()
            .filter(booking::Column::RoomId.is_in(candidates.iter().map(|r| r.id)))
            .filter(booking::Column::Status.ne(booking::BookingStatus::Cancelled))
            .filter(booking::Column::CheckInDate.lt(stay.check_out()))
            .filter(booking::Column::CheckOutDate.gt(stay.check_in()))
            .all(&self.db)
            .await
            .map_err(db_err)?
            .into_iter()
            .map(|b| b.room_id)
            .collect();

        Ok(candidates
            .into_iter()
            .filter(|r| !taken.contains(&r.id))
            .map(model_to_domain)
            .collect())
    }
}
