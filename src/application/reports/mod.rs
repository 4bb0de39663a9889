pub mod service;

pub use service::{DashboardSummary, ReportService, RevenueReport};
