pub mod service;

pub use service::{Balance, PaymentService, RecordPayment};
