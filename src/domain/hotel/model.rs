//! Hotel and room type domain entities

use chrono::{DateTime, Utc};

use crate::domain::{DomainError, DomainResult};

/// A property managed by the service
#[derive(Debug, Clone)]
pub struct Hotel {
    pub id: i32,
    pub name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    /// 1 to 5
    pub star_rating: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Editable hotel fields, used for both create and update
#[derive(Debug, Clone, Default)]
pub struct HotelDetails {
    pub name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub star_rating: Option<i32>,
}

impl HotelDetails {
    pub fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::Validation("Hotel name must not be empty".into()));
        }
        if let Some(stars) = self.star_rating {
            if !(1..=5).contains(&stars) {
                return Err(DomainError::Validation(
                    "Star rating must be between 1 and 5".into(),
                ));
            }
        }
        Ok(())
    }
}

/// Category of room with a nightly price and a guest capacity
#[derive(Debug, Clone)]
pub struct RoomType {
    pub id: i32,
    pub hotel_id: i32,
    pub name: String,
    pub description: Option<String>,
    /// Price per night in minor currency units
    pub base_price: i64,
    pub capacity: i32,
    pub created_at: DateTime<Utc>,
}

impl RoomType {
    pub fn fits(&self, guests: i32) -> bool {
        guests >= 1 && guests <= self.capacity
    }

    /// Stay price for the given number of nights.
    pub fn price_for(&self, nights: i64) -> DomainResult<i64> {
        self.base_price
            .checked_mul(nights)
            .ok_or_else(|| DomainError::Validation("Stay price is out of range".into()))
    }
}

#[derive(Debug, Clone, Default)]
pub struct RoomTypeDetails {
    pub name: String,
    pub description: Option<String>,
    pub base_price: i64,
    pub capacity: i32,
}

impl RoomTypeDetails {
    pub fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::Validation(
                "Room type name must not be empty".into(),
            ));
        }
        if self.base_price < 0 {
            return Err(DomainError::Validation(
                "Base price must not be negative".into(),
            ));
        }
        if self.capacity < 1 {
            return Err(DomainError::Validation(
                "Capacity must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn suite() -> RoomType {
        RoomType {
            id: 1,
            hotel_id: 1,
            name: "Suite".into(),
            description: None,
            base_price: 25_000,
            capacity: 3,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn capacity_bounds() {
        let rt = suite();
        assert!(!rt.fits(0));
        assert!(rt.fits(1));
        assert!(rt.fits(3));
        assert!(!rt.fits(4));
    }

    #[test]
    fn price_multiplies_nights() {
        assert_eq!(suite().price_for(2).unwrap(), 50_000);
        let mut rt = suite();
        rt.base_price = i64::MAX;
        assert!(matches!(rt.price_for(2), Err(DomainError::Validation(_))));
    }

    #[test]
    fn details_validation() {
        let mut d = HotelDetails {
            name: "Grand".into(),
            ..Default::default()
        };
        assert!(d.validate().is_ok());
        d.star_rating = Some(6);
        assert!(d.validate().is_err());
        d.star_rating = None;
        d.name = "  ".into();
        assert!(d.validate().is_err());

        let rt = RoomTypeDetails {
            name: "Twin".into(),
            description: None,
            base_price: 0,
            capacity: 0,
        };
        assert!(rt.validate().is_err());
    }
}
