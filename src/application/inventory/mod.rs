//! Hotels, room types and rooms

pub mod service;

pub use service::InventoryService;
