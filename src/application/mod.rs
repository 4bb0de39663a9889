//! Application layer: use-case services over the domain repositories

pub mod booking;
pub mod customers;
pub mod identity;
pub mod inventory;
pub mod payments;
pub mod ports;
pub mod reports;

pub use booking::BookingService;
pub use customers::CustomerService;
pub use identity::UserService;
pub use inventory::InventoryService;
pub use payments::PaymentService;
pub use reports::ReportService;
