//! Customer aggregate

pub mod model;
pub mod repository;

pub use model::{Customer, CustomerDetails, CustomerQuery, EmergencyContact};
pub use repository::CustomerRepository;
