//! Create check_outs table (one row per booking)

use sea_orm_migration::prelude::*;

use super::m20240101_000005_create_users::Users;
use super::m20240101_000006_create_bookings::Bookings;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CheckOuts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CheckOuts::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(CheckOuts::BookingId)
                            .integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(CheckOuts::CheckedOutAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(CheckOuts::CheckedOutBy).string().not_null())
                    .col(
                        ColumnDef::new(CheckOuts::AdditionalCharges)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(CheckOuts::Notes).text())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_check_outs_booking")
                            .from(CheckOuts::Table, CheckOuts::BookingId)
                            .to(Bookings::Table, Bookings::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_check_outs_user")
                            .from(CheckOuts::Table, CheckOuts::CheckedOutBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CheckOuts::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum CheckOuts {
    Table,
    Id,
    BookingId,
    CheckedOutAt,
    CheckedOutBy,
    AdditionalCharges,
    Notes,
}
