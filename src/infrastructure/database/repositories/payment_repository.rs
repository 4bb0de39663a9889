//! SeaORM implementation of PaymentRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::info;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, NotSet,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use tokio::sync::Mutex;

use super::db_err;
use crate::domain::payment::{NewPayment, Payment, PaymentMethod, PaymentRepository};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::{booking, payment};

pub struct SeaOrmPaymentRepository {
    db: DatabaseConnection,
    write_lock: Mutex<()>,
}

impl SeaOrmPaymentRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            write_lock: Mutex::new(()),
        }
    }
}

fn method_to_entity(m: PaymentMethod) -> payment::PaymentMethod {
    match m {
        PaymentMethod::Cash => payment::PaymentMethod::Cash,
        PaymentMethod::Card => payment::PaymentMethod::Card,
        PaymentMethod::BankTransfer => payment::PaymentMethod::BankTransfer,
        PaymentMethod::Online => payment::PaymentMethod::Online,
    }
}

fn method_to_domain(m: payment::PaymentMethod) -> PaymentMethod {
    match m {
        payment::PaymentMethod::Cash => PaymentMethod::Cash,
        payment::PaymentMethod::Card => PaymentMethod::Card,
        payment::PaymentMethod::BankTransfer => PaymentMethod::BankTransfer,
        payment::PaymentMethod::Online => PaymentMethod::Online,
    }
}

fn model_to_domain(m: payment::Model) -> Payment {
    Payment {
        id: m.id,
        booking_id: m.booking_id,
        amount: m.amount,
        method: method_to_domain(m.method),
        reference: m.reference,
        received_by: m.received_by,
        paid_at: m.paid_at,
    }
}

async fn sum_for_booking<C: ConnectionTrait>(conn: &C, booking_id: i32) -> DomainResult<i64> {
    let models = payment::Entity::find()
        .filter(payment::Column::BookingId.eq(booking_id))
        .all(conn)
        .await
        .map_err(db_err)?;
    Ok(models.iter().map(|p| p.amount).sum())
}

#[async_trait]
impl PaymentRepository for SeaOrmPaymentRepository {
    async fn record_capped(&self, p: NewPayment) -> DomainResult<Payment> {
        let _guard = self.write_lock.lock().await;
        let txn = self.db.begin().await.map_err(db_err)?;

        if booking::Entity::find_by_id(p.booking_id)
            .one(&txn)
            .await
            .map_err(db_err)?
            .is_none()
        {
            txn.rollback().await.map_err(db_err)?;
            return Err(DomainError::not_found("Booking", "id", p.booking_id));
        }

        let model = payment::ActiveModel {
            id: NotSet,
            booking_id: Set(p.booking_id),
            amount: Set(p.amount),
            method: Set(method_to_entity(p.method)),
            reference: Set(p.reference),
            received_by: Set(p.received_by),
            paid_at: Set(Utc::now()),
        };
        let inserted = model.insert(&txn).await.map_err(db_err)?;

        // The insert holds the write lock, so status and total cannot change under us
        let current = booking::Entity::find_by_id(p.booking_id)
            .one(&txn)
            .await
            .map_err(db_err)?
            .ok_or_else(|| DomainError::not_found("Booking", "id", p.booking_id))?;
        if current.status == booking::BookingStatus::Cancelled {
            txn.rollback().await.map_err(db_err)?;
            return Err(DomainError::Conflict(format!(
                "Booking {} is cancelled; payments cannot be recorded",
                current.id
            )));
        }

        let paid = sum_for_booking(&txn, p.booking_id).await?;
        if paid > current.total_amount {
            txn.rollback().await.map_err(db_err)?;
            return Err(DomainError::Validation(format!(
                "Payment of {} exceeds outstanding balance of {}",
                inserted.amount,
                (current.total_amount - (paid - inserted.amount)).max(0)
            )));
        }
        txn.commit().await.map_err(db_err)?;

        info!(
            "Payment {} of {} recorded for booking {}",
            inserted.id, inserted.amount, inserted.booking_id
        );
        Ok(model_to_domain(inserted))
    }

    async fn find_by_booking(&self, booking_id: i32) -> DomainResult<Vec<Payment>> {
        let models = payment::Entity::find()
            .filter(payment::Column::BookingId.eq(booking_id))
            .order_by_asc(payment::Column::PaidAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn total_for_booking(&self, booking_id: i32) -> DomainResult<i64> {
        sum_for_booking(&self.db, booking_id).await
    }

    async fn find_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> DomainResult<Vec<Payment>> {
        let models = payment::Entity::find()
            .filter(payment::Column::PaidAt.gte(from))
            .filter(payment::Column::PaidAt.lt(to))
            .order_by_asc(payment::Column::PaidAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }
}
