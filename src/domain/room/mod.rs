//! Room aggregate

pub mod model;
pub mod repository;

pub use model::{NewRoom, Room, RoomFilter, RoomStatus, RoomStatusChange, RoomUpdate};
pub use repository::RoomRepository;
