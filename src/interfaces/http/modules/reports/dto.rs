use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::application::reports::{DashboardSummary, RevenueReport};
use crate::interfaces::http::modules::bookings::BookingDto;

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DashboardParams {
    /// Defaults to today (UTC)
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RevenueParams {
    pub from: NaiveDate,
    /// Inclusive
    pub to: NaiveDate,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DashboardDto {
    pub date: NaiveDate,
    pub total_rooms: u64,
    /// Room count keyed by status
    pub rooms_by_status: BTreeMap<String, u64>,
    /// Percentage of rooms occupied, one decimal
    pub occupancy_rate: f64,
    pub bookings_by_status: BTreeMap<String, u64>,
    pub arrivals: Vec<BookingDto>,
    pub departures: Vec<BookingDto>,
}

impl From<DashboardSummary> for DashboardDto {
    fn from(s: DashboardSummary) -> Self {
        Self {
            date: s.date,
            total_rooms: s.total_rooms,
            rooms_by_status: s
                .rooms_by_status
                .into_iter()
                .map(|(status, n)| (status.to_string(), n))
                .collect(),
            occupancy_rate: s.occupancy_rate,
            bookings_by_status: s
                .bookings_by_status
                .into_iter()
                .map(|(status, n)| (status.to_string(), n))
                .collect(),
            arrivals: s.arrivals.into_iter().map(Into::into).collect(),
            departures: s.departures.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DailyRevenueDto {
    pub date: NaiveDate,
    pub amount: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RevenueDto {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub total: i64,
    pub currency: String,
    pub payment_count: usize,
    pub by_method: BTreeMap<String, i64>,
    pub daily: Vec<DailyRevenueDto>,
}

impl RevenueDto {
    pub fn new(r: RevenueReport, currency: &str) -> Self {
        Self {
            from: r.from,
            to: r.to,
            total: r.total,
            currency: currency.to_string(),
            payment_count: r.payment_count,
            by_method: r
                .by_method
                .into_iter()
                .map(|(method, amount)| (method.to_string(), amount))
                .collect(),
            daily: r
                .daily
                .into_iter()
                .map(|(date, amount)| DailyRevenueDto { date, amount })
                .collect(),
        }
    }
}
