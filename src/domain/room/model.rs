//! Room domain entity

use std::str::FromStr;

use chrono::{DateTime, Utc};

use crate::domain::DomainError;

/// Physical state of a room
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RoomStatus {
    #[default]
    Available,
    /// A guest is checked in
    Occupied,
    Maintenance,
}

impl RoomStatus {
    pub const ALL: [RoomStatus; 3] = [Self::Available, Self::Occupied, Self::Maintenance];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Occupied => "occupied",
            Self::Maintenance => "maintenance",
        }
    }

    /// Whether staff may set this status by hand.
    /// `Occupied` is owned by the booking lifecycle.
    pub fn is_manual(&self) -> bool {
        matches!(self, Self::Available | Self::Maintenance)
    }
}

impl std::fmt::Display for RoomStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoomStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "available" => Ok(Self::Available),
            "occupied" => Ok(Self::Occupied),
            "maintenance" => Ok(Self::Maintenance),
            other => Err(DomainError::Validation(format!(
                "Unknown room status '{}'",
                other
            ))),
        }
    }
}

/// Conditional room status update.
///
/// The change only applies while the room is in `from`. When `required` is
/// set and the room is in any other state the whole operation fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoomStatusChange {
    pub from: RoomStatus,
    pub to: RoomStatus,
    pub required: bool,
}

impl RoomStatusChange {
    pub fn occupy() -> Self {
        Self {
            from: RoomStatus::Available,
            to: RoomStatus::Occupied,
            required: true,
        }
    }

    pub fn release() -> Self {
        Self {
            from: RoomStatus::Occupied,
            to: RoomStatus::Available,
            required: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Room {
    pub id: i32,
    pub hotel_id: i32,
    pub room_type_id: i32,
    /// Door number, unique within a hotel
    pub number: String,
    pub floor: i32,
    pub status: RoomStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewRoom {
    pub hotel_id: i32,
    pub room_type_id: i32,
    pub number: String,
    pub floor: i32,
}

#[derive(Debug, Clone, Default)]
pub struct RoomUpdate {
    pub room_type_id: Option<i32>,
    pub number: Option<String>,
    pub floor: Option<i32>,
}

#[derive(Debug, Clone, Default)]
pub struct RoomFilter {
    pub hotel_id: Option<i32>,
    pub room_type_id: Option<i32>,
    pub status: Option<RoomStatus>,
}
