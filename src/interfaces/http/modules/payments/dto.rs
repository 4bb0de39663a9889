use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::application::payments::Balance;
use crate::domain::Payment;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RecordPaymentRequest {
    /// Minor currency units
    #[validate(range(min = 1, message = "amount must be positive"))]
    pub amount: i64,
    /// cash, card, bank_transfer or online
    pub method: String,
    #[validate(length(max = 255, message = "reference must be at most 255 characters"))]
    pub reference: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PaymentDto {
    pub id: i32,
    pub booking_id: i32,
    pub amount: i64,
    pub method: String,
    pub reference: Option<String>,
    pub received_by: Option<String>,
    pub paid_at: DateTime<Utc>,
}

impl From<Payment> for PaymentDto {
    fn from(p: Payment) -> Self {
        Self {
            id: p.id,
            booking_id: p.booking_id,
            amount: p.amount,
            method: p.method.to_string(),
            reference: p.reference,
            received_by: p.received_by,
            paid_at: p.paid_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BalanceDto {
    pub booking_id: i32,
    pub total: i64,
    pub paid: i64,
    pub outstanding: i64,
    pub currency: String,
}

impl BalanceDto {
    pub fn new(booking_id: i32, b: Balance, currency: &str) -> Self {
        Self {
            booking_id,
            total: b.total,
            paid: b.paid,
            outstanding: b.outstanding,
            currency: currency.to_string(),
        }
    }
}
