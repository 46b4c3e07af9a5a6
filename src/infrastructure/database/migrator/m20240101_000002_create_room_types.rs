//! Create room_types table

use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_hotels::Hotels;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RoomTypes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RoomTypes::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(RoomTypes::HotelId).big_integer().not_null())
                    .col(ColumnDef::new(RoomTypes::Code).string_len(20).not_null())
                    .col(ColumnDef::new(RoomTypes::Name).string_len(200).not_null())
                    .col(ColumnDef::new(RoomTypes::Description).text().null())
                    .col(ColumnDef::new(RoomTypes::BedType).string_len(50).null())
                    .col(
                        ColumnDef::new(RoomTypes::Capacity)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(
                        ColumnDef::new(RoomTypes::TotalRooms)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(RoomTypes::BaseRateCents).big_integer().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_room_types_hotel")
                            .from(RoomTypes::Table, RoomTypes::HotelId)
                            .to(Hotels::Table, Hotels::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Code is unique within a hotel
        manager
            .create_index(
                Index::create()
                    .name("idx_room_types_hotel_code")
                    .table(RoomTypes::Table)
                    .col(RoomTypes::HotelId)
                    .col(RoomTypes::Code)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RoomTypes::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum RoomTypes {
    Table,
    Id,
    HotelId,
    Code,
    Name,
    Description,
    BedType,
    Capacity,
    TotalRooms,
    BaseRateCents,
}
