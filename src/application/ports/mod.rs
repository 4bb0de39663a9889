//! Outbound ports implemented by the infrastructure layer

pub mod notifications;

pub use notifications::{Notification, NotificationChannel, NotificationSender};
