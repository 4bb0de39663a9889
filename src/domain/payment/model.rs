//! Payment domain entity

use std::str::FromStr;

use chrono::{DateTime, Utc};

use crate::domain::{DomainError, DomainResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentMethod {
    Cash,
    Card,
    BankTransfer,
    Online,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cash => "cash",
            Self::Card => "card",
            Self::BankTransfer => "bank_transfer",
            Self::Online => "online",
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "cash" => Ok(Self::Cash),
            "card" => Ok(Self::Card),
            "bank_transfer" => Ok(Self::BankTransfer),
            "online" => Ok(Self::Online),
            other => Err(DomainError::Validation(format!(
                "Unknown payment method '{}'",
                other
            ))),
        }
    }
}

/// Money received against a booking
#[derive(Debug, Clone)]
pub struct Payment {
    pub id: i32,
    pub booking_id: i32,
    /// Minor currency units, always positive
    pub amount: i64,
    pub method: PaymentMethod,
    /// Card slip, transfer id, etc.
    pub reference: Option<String>,
    pub received_by: Option<String>,
    pub paid_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewPayment {
    pub booking_id: i32,
    pub amount: i64,
    pub method: PaymentMethod,
    pub reference: Option<String>,
    pub received_by: Option<String>,
}

impl NewPayment {
    pub fn validate(&self) -> DomainResult<()> {
        if self.amount <= 0 {
            return Err(DomainError::Validation(
                "Payment amount must be positive".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_strings() {
        assert_eq!("bank-transfer".parse::<PaymentMethod>().unwrap(), PaymentMethod::BankTransfer);
        assert_eq!(PaymentMethod::Online.to_string(), "online");
        assert!("cheque".parse::<PaymentMethod>().is_err());
    }

    #[test]
    fn amount_must_be_positive() {
        let mut p = NewPayment {
            booking_id: 1,
            amount: 0,
            method: PaymentMethod::Cash,
            reference: None,
            received_by: None,
        };
        assert!(p.validate().is_err());
        p.amount = 1;
        assert!(p.validate().is_ok());
    }
}
