use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::model::{NewPayment, Payment};
use crate::domain::DomainResult;

#[async_trait]
pub trait PaymentRepository: Send + Sync {
    /// Record a payment against a non-cancelled booking unless its payments
    /// would then exceed the booking total. The booking read, sum and insert
    /// happen in one transaction.
    async fn record_capped(&self, payment: NewPayment) -> DomainResult<Payment>;

    async fn find_by_booking(&self, booking_id: i32) -> DomainResult<Vec<Payment>>;

    async fn total_for_booking(&self, booking_id: i32) -> DomainResult<i64>;

    /// Payments with `from <= paid_at < to`
    async fn find_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> DomainResult<Vec<Payment>>;
}
