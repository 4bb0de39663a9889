//! Payment aggregate

pub mod model;
pub mod repository;

pub use model::{NewPayment, Payment, PaymentMethod};
pub use repository::PaymentRepository;
