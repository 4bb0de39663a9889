//! Hotel aggregate
//!
//! Hotels and the room types they offer.

pub mod model;
pub mod repository;

pub use model::{Hotel, HotelDetails, RoomType, RoomTypeDetails};
pub use repository::HotelRepository;
