//! SeaORM implementation of HotelRepository

use async_trait::async_trait;
use chrono::Utc;
use log::debug;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, QueryFilter,
    QueryOrder, Set,
};

use super::db_err;
use crate::domain::hotel::{Hotel, HotelDetails, HotelRepository, RoomType, RoomTypeDetails};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::{hotel, room_type};

pub struct SeaOrmHotelRepository {
    db: DatabaseConnection,
}

impl SeaOrmHotelRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn hotel_to_domain(m: hotel::Model) -> Hotel {
    Hotel {
        id: m.id,
        name: m.name,
        address: m.address,
        phone: m.phone,
        email: m.email,
        star_rating: m.star_rating,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

fn room_type_to_domain(m: room_type::Model) -> RoomType {
    RoomType {
        id: m.id,
        hotel_id: m.hotel_id,
        name: m.name,
        description: m.description,
        base_price: m.base_price,
        capacity: m.capacity,
        created_at: m.created_at,
    }
}

// ── HotelRepository impl ────────────────────────────────────────

#[async_trait]
impl HotelRepository for SeaOrmHotelRepository {
    async fn create(&self, d: HotelDetails) -> DomainResult<Hotel> {
        debug!("Creating hotel: {}", d.name);
        let now = Utc::now();

        let model = hotel::ActiveModel {
            id: NotSet,
            name: Set(d.name),
            address: Set(d.address),
            phone: Set(d.phone),
            email: Set(d.email),
            star_rating: Set(d.star_rating),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let inserted = model.insert(&self.db).await.map_err(db_err)?;
        Ok(hotel_to_domain(inserted))
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Hotel>> {
        let model = hotel::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(hotel_to_domain))
    }

    async fn update(&self, id: i32, d: HotelDetails) -> DomainResult<Option<Hotel>> {
        let Some(existing) = hotel::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?
        else {
            return Ok(None);
        };

        let mut active: hotel::ActiveModel = existing.into();
        active.name = Set(d.name);
        active.address = Set(d.address);
        active.phone = Set(d.phone);
        active.email = Set(d.email);
        active.star_rating = Set(d.star_rating);
        active.updated_at = Set(Utc::now());

        let updated = active.update(&self.db).await.map_err(db_err)?;
        Ok(Some(hotel_to_domain(updated)))
    }

    async fn find_all(&self) -> DomainResult<Vec<Hotel>> {
        let models = hotel::Entity::find()
            .order_by_asc(hotel::Column::Name)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(hotel_to_domain).collect())
    }

    async fn create_room_type(
        &self,
        hotel_id: i32,
        d: RoomTypeDetails,
    ) -> DomainResult<RoomType> {
        if self.find_by_id(hotel_id).await?.is_none() {
            return Err(DomainError::not_found("Hotel", "id", hotel_id));
        }
        debug!("Creating room type '{}' for hotel {}", d.name, hotel_id);

        let model = room_type::ActiveModel {
            id: NotSet,
            hotel_id: Set(hotel_id),
            name: Set(d.name),
            description: Set(d.description),
            base_price: Set(d.base_price),
            capacity: Set(d.capacity),
            created_at: Set(Utc::now()),
        };
        let inserted = model.insert(&self.db).await.map_err(db_err)?;
        Ok(room_type_to_domain(inserted))
    }

    async fn find_room_type(&self, id: i32) -> DomainResult<Option<RoomType>> {
        let model = room_type::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(room_type_to_domain))
    }

    async fn update_room_type(
        &self,
        id: i32,
        d: RoomTypeDetails,
    ) -> DomainResult<Option<RoomType>> {
        let Some(existing) = room_type::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?
        else {
            return Ok(None);
        };

        let mut active: room_type::ActiveModel = existing.into();
        active.name = Set(d.name);
        active.description = Set(d.description);
        active.base_price = Set(d.base_price);
        active.capacity = Set(d.capacity);

        let updated = active.update(&self.db).await.map_err(db_err)?;
        Ok(Some(room_type_to_domain(updated)))
    }

    async fn find_room_types(&self, hotel_id: Option<i32>) -> DomainResult<Vec<RoomType>> {
        let mut query = room_type::Entity::find();
        if let Some(hotel_id) = hotel_id {
            query = query.filter(room_type::Column::HotelId.eq(hotel_id));
        }
        let models = query
            .order_by_asc(room_type::Column::BasePrice)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(room_type_to_domain).collect())
    }
}
