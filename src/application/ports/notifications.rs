//! Outbound port for email / SMS delivery
//!
//! Application services only see [`NotificationSender`]; the shipped
//! implementation is
//! [`LogNotificationSender`](crate::infrastructure::notifications::LogNotificationSender).

use async_trait::async_trait;

use crate::domain::DomainResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationChannel {
    Email,
    Sms,
}

impl std::fmt::Display for NotificationChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Email => write!(f, "email"),
            Self::Sms => write!(f, "sms"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub channel: NotificationChannel,
    /// Email address or phone number
    pub recipient: String,
    pub subject: String,
    pub body: String,
}

#[async_trait]
pub trait NotificationSender: Send + Sync {
    async fn send(&self, notification: Notification) -> DomainResult<()>;
}
