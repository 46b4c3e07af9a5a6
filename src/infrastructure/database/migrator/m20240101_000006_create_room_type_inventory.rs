//! Create room_type_inventory table
//!
//! Nightly counters per room type: total, reserved and blocked rooms.

use sea_orm_migration::prelude::*;

use super::m20240101_000002_create_room_types::RoomTypes;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RoomTypeInventory::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RoomTypeInventory::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(RoomTypeInventory::HotelId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RoomTypeInventory::RoomTypeId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(RoomTypeInventory::StayDate).date().not_null())
                    .col(
                        ColumnDef::new(RoomTypeInventory::Total)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(RoomTypeInventory::Reserved)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(RoomTypeInventory::Blocked)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_inventory_room_type")
                            .from(RoomTypeInventory::Table, RoomTypeInventory::RoomTypeId)
                            .to(RoomTypes::Table, RoomTypes::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_inventory_hotel_type_date")
                    .table(RoomTypeInventory::Table)
                    .col(RoomTypeInventory::HotelId)
                    .col(RoomTypeInventory::RoomTypeId)
                    .col(RoomTypeInventory::StayDate)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RoomTypeInventory::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum RoomTypeInventory {
    Table,
    Id,
    HotelId,
    RoomTypeId,
    StayDate,
    Total,
    Reserved,
    Blocked,
}
