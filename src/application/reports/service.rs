//! Dashboard and revenue reports

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{Days, NaiveDate, NaiveTime};

use crate::domain::booking::{Booking, BookingStatus};
use crate::domain::payment::PaymentMethod;
use crate::domain::room::RoomStatus;
use crate::domain::{DomainError, DomainResult, RepositoryProvider};

#[derive(Debug, Clone)]
pub struct DashboardSummary {
    pub date: NaiveDate,
    pub rooms_by_status: Vec<(RoomStatus, u64)>,
    pub total_rooms: u64,
    /// Occupied rooms as a percentage of all rooms
    pub occupancy_rate: f64,
    pub bookings_by_status: Vec<(BookingStatus, u64)>,
    pub arrivals: Vec<Booking>,
    pub departures: Vec<Booking>,
}

#[derive(Debug, Clone)]
pub struct RevenueReport {
    pub from: NaiveDate,
    /// Inclusive
    pub to: NaiveDate,
    pub total: i64,
    pub payment_count: usize,
    pub by_method: Vec<(PaymentMethod, i64)>,
    pub daily: Vec<(NaiveDate, i64)>,
}

pub fn occupancy_rate(occupied: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let pct = occupied as f64 * 100.0 / total as f64;
    (pct * 10.0).round() / 10.0
}

pub struct ReportService {
    repos: Arc<dyn RepositoryProvider>,
}

impl ReportService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    pub async fn summary(&self, date: NaiveDate) -> DomainResult<DashboardSummary> {
        let rooms_by_status = self.repos.rooms().count_by_status().await?;
        let total_rooms = rooms_by_status.iter().map(|(_, n)| n).sum();
        let occupied = rooms_by_status
            .iter()
            .find(|(s, _)| *s == RoomStatus::Occupied)
            .map(|(_, n)| *n)
            .unwrap_or(0);

        Ok(DashboardSummary {
            date,
            occupancy_rate: occupancy_rate(occupied, total_rooms),
            rooms_by_status,
            total_rooms,
            bookings_by_status: self.repos.bookings().count_by_status().await?,
            arrivals: self.repos.bookings().find_arrivals(date).await?,
            departures: self.repos.bookings().find_departures(date).await?,
        })
    }

    /// Payments received between `from` and `to`, both days included
    pub async fn revenue(&self, from: NaiveDate, to: NaiveDate) -> DomainResult<RevenueReport> {
        if to < from {
            return Err(DomainError::Validation(
                "Report end date must not be before start date".into(),
            ));
        }
        let end = to
            .checked_add_days(Days::new(1))
            .ok_or_else(|| DomainError::Validation("Report end date out of range".into()))?;

        let payments = self
            .repos
            .payments()
            .find_between(
                from.and_time(NaiveTime::MIN).and_utc(),
                end.and_time(NaiveTime::MIN).and_utc(),
            )
            .await?;

        let mut by_method: BTreeMap<&'static str, (PaymentMethod, i64)> = BTreeMap::new();
        let mut daily: BTreeMap<NaiveDate, i64> = BTreeMap::new();
        for p in &payments {
            by_method
                .entry(p.method.as_str())
                .or_insert((p.method, 0))
                .1 += p.amount;
            *daily.entry(p.paid_at.date_naive()).or_insert(0) += p.amount;
        }

        Ok(RevenueReport {
            from,
            to,
            total: payments.iter().map(|p| p.amount).sum(),
            payment_count: payments.len(),
            by_method: by_method.into_values().collect(),
            daily: daily.into_iter().collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::application::booking::{BookingService, CreateBooking};
    use crate::application::payments::{PaymentService, RecordPayment};
    use crate::infrastructure::database::test_support::fixture;

    #[test]
    fn occupancy_rounds_to_one_decimal() {
        assert_eq!(occupancy_rate(0, 0), 0.0);
        assert_eq!(occupancy_rate(1, 3), 33.3);
        assert_eq!(occupancy_rate(2, 2), 100.0);
    }

    #[tokio::test]
    async fn summary_counts_today() {
        let f = fixture().await;
        let today = Utc::now().date_naive();
        let tomorrow = today.checked_add_days(Days::new(1)).unwrap();
        let bookings = BookingService::new(f.repos.clone());

        let staying = bookings
            .create(CreateBooking {
                customer_id: f.customer.id,
                room_id: f.room_101.id,
                check_in: today,
                check_out: tomorrow,
                guests: 1,
                notes: None,
                created_by: None,
            })
            .await
            .unwrap();
        bookings.check_in(staying.id, &f.staff.id, None).await.unwrap();
        bookings
            .create(CreateBooking {
                customer_id: f.customer.id,
                room_id: f.room_102.id,
                check_in: tomorrow,
                check_out: tomorrow.checked_add_days(Days::new(2)).unwrap(),
                guests: 1,
                notes: None,
                created_by: None,
            })
            .await
            .unwrap();

        let svc = ReportService::new(f.repos.clone());
        let s = svc.summary(today).await.unwrap();
        assert_eq!(s.total_rooms, 2);
        assert_eq!(s.occupancy_rate, 50.0);
        assert!(s.arrivals.is_empty());
        assert!(s.departures.is_empty());

        let s = svc.summary(tomorrow).await.unwrap();
        assert_eq!(s.arrivals.len(), 1);
        assert_eq!(s.departures.len(), 1);
        assert!(s
            .bookings_by_status
            .contains(&(BookingStatus::CheckedIn, 1)));
    }

    #[tokio::test]
    async fn revenue_sums_payments_in_range() {
        let f = fixture().await;
        let today = Utc::now().date_naive();
        let b = BookingService::new(f.repos.clone())
            .create(CreateBooking {
                customer_id: f.customer.id,
                room_id: f.room_101.id,
                check_in: today,
                check_out: today.checked_add_days(Days::new(3)).unwrap(),
                guests: 1,
                notes: None,
                created_by: None,
            })
            .await
            .unwrap();

        let payments = PaymentService::new(f.repos.clone());
        for (amount, method) in [(10_000, PaymentMethod::Cash), (5_000, PaymentMethod::Card)] {
            payments
                .record(RecordPayment {
                    booking_id: b.id,
                    amount,
                    method,
                    reference: None,
                    received_by: None,
                })
                .await
                .unwrap();
        }

        let svc = ReportService::new(f.repos.clone());
        let r = svc.revenue(today, today).await.unwrap();
        assert_eq!(r.total, 15_000);
        assert_eq!(r.payment_count, 2);
        assert_eq!(r.by_method.len(), 2);

        let yesterday = today.checked_sub_days(Days::new(1)).unwrap();
        let r = svc.revenue(yesterday, yesterday).await.unwrap();
        assert_eq!(r.total, 0);

        assert!(svc.revenue(today, yesterday).await.is_err());
    }
}
