//! Create rooms table

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
                    .table(Rooms::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Rooms::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Rooms::HotelId).big_integer().not_null())
                    .col(ColumnDef::new(Rooms::RoomTypeId).big_integer().not_null())
                    .col(ColumnDef::new(Rooms::RoomNumber).string_len(20).not_null())
                    .col(ColumnDef::new(Rooms::Floor).integer().null())
                    .col(
                        ColumnDef::new(Rooms::Status)
                            .string_len(20)
                            .not_null()
                            .default("Available"),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_rooms_hotel")
                            .from(Rooms::Table, Rooms::HotelId)
                            .to(Hotels::Table, Hotels::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_rooms_room_type")
                            .from(Rooms::Table, Rooms::RoomTypeId)
                            .to(RoomTypes::Table, RoomTypes::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_rooms_hotel_number")
                    .table(Rooms::Table)
                    .col(Rooms::HotelId)
                    .col(Rooms::RoomNumber)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Rooms::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Rooms {
    Table,
    Id,
    HotelId,
    RoomTypeId,
    RoomNumber,
    Floor,
    Status,
}
