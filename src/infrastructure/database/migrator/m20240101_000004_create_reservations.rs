//! Create reservations table
//!
//! Money is stored in minor units. `version` backs the optimistic check on
//! every update.

use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_hotels::Hotels;
use super::m20240101_000002_create_room_types::RoomTypes;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Reservations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Reservations::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Reservations::UserId).big_integer().not_null())
                    .col(ColumnDef::new(Reservations::HotelId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Reservations::RoomTypeId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Reservations::RoomId).big_integer().null())
                    .col(
                        ColumnDef::new(Reservations::Status)
                            .string_len(20)
                            .not_null()
                            .default("Pending"),
                    )
                    .col(
                        ColumnDef::new(Reservations::UpgradeStatus)
                            .string_len(20)
                            .not_null()
                            .default("NotEligible"),
                    )
                    .col(ColumnDef::new(Reservations::CheckIn).date().not_null())
                    .col(ColumnDef::new(Reservations::CheckOut).date().not_null())
                    .col(ColumnDef::new(Reservations::Nights).integer().not_null())
                    .col(ColumnDef::new(Reservations::NumGuests).integer().not_null())
                    .col(ColumnDef::new(Reservations::Currency).string_len(3).not_null())
                    .col(
                        ColumnDef::new(Reservations::PriceTotalCents)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Reservations::Notes).text().null())
                    .col(
                        ColumnDef::new(Reservations::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Reservations::UpgradedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Reservations::CanceledAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Reservations::Version)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reservations_hotel")
                            .from(Reservations::Table, Reservations::HotelId)
                            .to(Hotels::Table, Hotels::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reservations_room_type")
                            .from(Reservations::Table, Reservations::RoomTypeId)
                            .to(RoomTypes::Table, RoomTypes::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_reservations_user")
                    .table(Reservations::Table)
                    .col(Reservations::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_reservations_hotel_check_in")
                    .table(Reservations::Table)
                    .col(Reservations::HotelId)
                    .col(Reservations::CheckIn)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_reservations_status")
                    .table(Reservations::Table)
                    .col(Reservations::Status)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Reservations::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Reservations {
    Table,
    Id,
    UserId,
    HotelId,
    RoomTypeId,
    RoomId,
    Status,
    UpgradeStatus,
    CheckIn,
    CheckOut,
    Nights,
    NumGuests,
    Currency,
    PriceTotalCents,
    Notes,
    CreatedAt,
    UpgradedAt,
    CanceledAt,
    Version,
}
