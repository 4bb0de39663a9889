//! Create check_ins table (one row per booking)

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
                    .table(CheckIns::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CheckIns::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(CheckIns::BookingId)
                            .integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(CheckIns::CheckedInAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(CheckIns::CheckedInBy).string().not_null())
                    .col(ColumnDef::new(CheckIns::Notes).text())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_check_ins_booking")
                            .from(CheckIns::Table, CheckIns::BookingId)
                            .to(Bookings::Table, Bookings::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_check_ins_user")
                            .from(CheckIns::Table, CheckIns::CheckedInBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CheckIns::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum CheckIns {
    Table,
    Id,
    BookingId,
    CheckedInAt,
    CheckedInBy,
    Notes,
}
