//! Create hotels table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Hotels::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Hotels::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Hotels::Name).string_len(200).not_null())
                    .col(ColumnDef::new(Hotels::Brand).string_len(100).null())
                    .col(ColumnDef::new(Hotels::Address).string().null())
                    .col(ColumnDef::new(Hotels::City).string_len(100).not_null())
                    .col(ColumnDef::new(Hotels::Country).string_len(100).null())
                    .col(ColumnDef::new(Hotels::StarRating).integer().null())
                    .col(
                        ColumnDef::new(Hotels::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_hotels_city")
                    .table(Hotels::Table)
                    .col(Hotels::City)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Hotels::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Hotels {
    Table,
    Id,
    Name,
    Brand,
    Address,
    City,
    Country,
    StarRating,
    CreatedAt,
}
