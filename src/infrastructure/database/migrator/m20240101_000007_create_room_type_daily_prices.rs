//! Create room_type_daily_prices table

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
                    .table(RoomTypeDailyPrices::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RoomTypeDailyPrices::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(RoomTypeDailyPrices::HotelId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RoomTypeDailyPrices::RoomTypeId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(RoomTypeDailyPrices::StayDate).date().not_null())
                    .col(
                        ColumnDef::new(RoomTypeDailyPrices::PriceCents)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_daily_prices_room_type")
                            .from(RoomTypeDailyPrices::Table, RoomTypeDailyPrices::RoomTypeId)
                            .to(RoomTypes::Table, RoomTypes::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_daily_prices_hotel_type_date")
                    .table(RoomTypeDailyPrices::Table)
                    .col(RoomTypeDailyPrices::HotelId)
                    .col(RoomTypeDailyPrices::RoomTypeId)
                    .col(RoomTypeDailyPrices::StayDate)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RoomTypeDailyPrices::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum RoomTypeDailyPrices {
    Table,
    Id,
    HotelId,
    RoomTypeId,
    StayDate,
    PriceCents,
}
