use async_trait::async_trait;
use tracing::info;

use crate::application::ports::{Notification, NotificationSender};
use crate::domain::DomainResult;

/// Writes notifications to the log instead of delivering them.
///
/// The body is only logged at debug level since it may carry one-time codes.
#[derive(Debug, Default, Clone)]
pub struct LogNotificationSender;

#[async_trait]
impl NotificationSender for LogNotificationSender {
    async fn send(&self, n: Notification) -> DomainResult<()> {
        info!(
            channel = %n.channel,
            recipient = %n.recipient,
            subject = %n.subject,
            "📨 Notification queued"
        );
        tracing::debug!(body = %n.body, "Notification body");
        Ok(())
    }
}
