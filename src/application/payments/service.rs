//! Payment service: money received against bookings
//!
//! The sum of a booking's payments never exceeds its total amount.

use std::sync::Arc;

use tracing::info;

use crate::domain::booking::Booking;
use crate::domain::payment::{NewPayment, Payment, PaymentMethod};
use crate::domain::{DomainError, DomainResult, RepositoryProvider};

#[derive(Debug, Clone)]
pub struct RecordPayment {
    pub booking_id: i32,
    pub amount: i64,
    pub method: PaymentMethod,
    pub reference: Option<String>,
    pub received_by: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Balance {
    pub total: i64,
    pub paid: i64,
    pub outstanding: i64,
}

pub struct PaymentService {
    repos: Arc<dyn RepositoryProvider>,
}

impl PaymentService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    async fn booking(&self, id: i32) -> DomainResult<Booking> {
        self.repos
            .bookings()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Booking", "id", id))
    }

    pub async fn record(&self, cmd: RecordPayment) -> DomainResult<Payment> {
        let payment = NewPayment {
            booking_id: cmd.booking_id,
            amount: cmd.amount,
            method: cmd.method,
            reference: cmd.reference,
            received_by: cmd.received_by,
        };
        payment.validate()?;

        let recorded = self.repos.payments().record_capped(payment).await?;
        metrics::counter!("hotel_payments_total", "method" => recorded.method.as_str())
            .increment(1);
        info!(
            booking_id = recorded.booking_id,
            amount = recorded.amount,
            method = %recorded.method,
            "Payment recorded"
        );
        Ok(recorded)
    }

    pub async fn list(&self, booking_id: i32) -> DomainResult<Vec<Payment>> {
        self.booking(booking_id).await?;
        self.repos.payments().find_by_booking(booking_id).await
    }

    pub async fn balance(&self, booking_id: i32) -> DomainResult<Balance> {
        let booking = self.booking(booking_id).await?;
        let paid = self.repos.payments().total_for_booking(booking_id).await?;
        Ok(Balance {
            total: booking.total_amount,
            paid,
            outstanding: (booking.total_amount - paid).max(0),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::booking::{BookingService, CreateBooking};
    use crate::infrastructure::database::test_support::{date, fixture, Fixture};

    async fn booked(f: &Fixture) -> Booking {
        BookingService::new(f.repos.clone())
            .create(CreateBooking {
                customer_id: f.customer.id,
                room_id: f.room_101.id,
                check_in: date(2024, 1, 1),
                check_out: date(2024, 1, 3),
                guests: 1,
                notes: None,
                created_by: None,
            })
            .await
            .unwrap()
    }

    fn pay(booking_id: i32, amount: i64) -> RecordPayment {
        RecordPayment {
            booking_id,
            amount,
            method: PaymentMethod::Card,
            reference: None,
            received_by: None,
        }
    }

    #[tokio::test]
    async fn payments_capped_at_total() {
        let f = fixture().await;
        let b = booked(&f).await;
        let svc = PaymentService::new(f.repos.clone());

        svc.record(pay(b.id, 15_000)).await.unwrap();
        let err = svc.record(pay(b.id, 5_001)).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        svc.record(pay(b.id, 5_000)).await.unwrap();

        let balance = svc.balance(b.id).await.unwrap();
        assert_eq!(
            balance,
            Balance {
                total: 20_000,
                paid: 20_000,
                outstanding: 0
            }
        );
        assert_eq!(svc.list(b.id).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn check_out_charges_raise_the_cap() {
        let f = fixture().await;
        let b = booked(&f).await;
        let bookings = BookingService::new(f.repos.clone());
        let svc = PaymentService::new(f.repos.clone());

        svc.record(pay(b.id, 20_000)).await.unwrap();
        bookings.check_in(b.id, &f.staff.id, None).await.unwrap();
        bookings.check_out(b.id, &f.staff.id, 3_000, None).await.unwrap();

        assert_eq!(svc.balance(b.id).await.unwrap().outstanding, 3_000);
        svc.record(pay(b.id, 3_000)).await.unwrap();
    }

    #[tokio::test]
    async fn rejects_non_positive_and_cancelled() {
        let f = fixture().await;
        let b = booked(&f).await;
        let svc = PaymentService::new(f.repos.clone());

        assert!(matches!(
            svc.record(pay(b.id, 0)).await,
            Err(DomainError::Validation(_))
        ));

        BookingService::new(f.repos.clone()).cancel(b.id).await.unwrap();
        assert!(matches!(
            svc.record(pay(b.id, 100)).await,
            Err(DomainError::Conflict(_))
        ));
        assert!(matches!(
            svc.record(pay(4242, 100)).await,
            Err(DomainError::NotFound { .. })
        ));
    }
}
