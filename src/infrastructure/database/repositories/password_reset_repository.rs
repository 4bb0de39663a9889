//! SeaORM implementation of PasswordResetRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, QueryFilter,
    QueryOrder, Set,
};

use super::db_err;
use crate::domain::user::{PasswordReset, PasswordResetRepository, MAX_OTP_ATTEMPTS};
use crate::domain::DomainResult;
use crate::infrastructure::database::entities::password_reset;

pub struct SeaOrmPasswordResetRepository {
    db: DatabaseConnection,
}

impl SeaOrmPasswordResetRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(m: password_reset::Model) -> PasswordReset {
    PasswordReset {
        id: m.id,
        user_id: m.user_id,
        otp_hash: m.otp_hash,
        expires_at: m.expires_at,
        consumed_at: m.consumed_at,
        failed_attempts: m.failed_attempts,
        created_at: m.created_at,
    }
}

#[async_trait]
impl PasswordResetRepository for SeaOrmPasswordResetRepository {
    async fn create(
        &self,
        user_id: &str,
        otp_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> DomainResult<PasswordReset> {
        let model = password_reset::ActiveModel {
            id: NotSet,
            user_id: Set(user_id.to_string()),
            otp_hash: Set(otp_hash.to_string()),
            expires_at: Set(expires_at),
            consumed_at: Set(None),
            failed_attempts: Set(0),
            created_at: Set(Utc::now()),
        };
        let inserted = model.insert(&self.db).await.map_err(db_err)?;
        Ok(model_to_domain(inserted))
    }

    async fn find_usable(
        &self,
        user_id: &str,
        now: DateTime<Utc>,
    ) -> DomainResult<Vec<PasswordReset>> {
        let models = password_reset::Entity::find()
            .filter(password_reset::Column::UserId.eq(user_id))
            .filter(password_reset::Column::ConsumedAt.is_null())
            .filter(password_reset::Column::ExpiresAt.gt(now))
            .filter(password_reset::Column::FailedAttempts.lt(MAX_OTP_ATTEMPTS))
            .order_by_desc(password_reset::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn consume(&self, id: i32, now: DateTime<Utc>) -> DomainResult<bool> {
        let result = password_reset::Entity::update_many()
            .col_expr(password_reset::Column::ConsumedAt, Expr::value(now))
            .filter(password_reset::Column::Id.eq(id))
            .filter(password_reset::Column::ConsumedAt.is_null())
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(result.rows_affected == 1)
    }

    async fn record_failed_attempt(&self, user_id: &str, now: DateTime<Utc>) -> DomainResult<()> {
        password_reset::Entity::update_many()
            .col_expr(
                password_reset::Column::FailedAttempts,
                Expr::col(password_reset::Column::FailedAttempts).add(1),
            )
            .filter(password_reset::Column::UserId.eq(user_id))
            .filter(password_reset::Column::ConsumedAt.is_null())
            .filter(password_reset::Column::ExpiresAt.gt(now))
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(())
    }
}
