//! Create reservation_status_history table

use sea_orm_migration::prelude::*;

use super::m20240101_000004_create_reservations::Reservations;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ReservationStatusHistory::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ReservationStatusHistory::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ReservationStatusHistory::ReservationId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ReservationStatusHistory::FromStatus)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ReservationStatusHistory::ToStatus)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ReservationStatusHistory::ChangedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ReservationStatusHistory::ChangedBy)
                            .big_integer()
                            .null(),
                    )
                    .col(ColumnDef::new(ReservationStatusHistory::Reason).text().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_status_history_reservation")
                            .from(
                                ReservationStatusHistory::Table,
                                ReservationStatusHistory::ReservationId,
                            )
                            .to(Reservations::Table, Reservations::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_status_history_reservation")
                    .table(ReservationStatusHistory::Table)
                    .col(ReservationStatusHistory::ReservationId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ReservationStatusHistory::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum ReservationStatusHistory {
    Table,
    Id,
    ReservationId,
    FromStatus,
    ToStatus,
    ChangedAt,
    ChangedBy,
    Reason,
}
