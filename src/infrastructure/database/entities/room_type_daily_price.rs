//! Nightly room type price entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "room_type_daily_prices")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub hotel_id: i64,
    pub room_type_id: i64,
    pub stay_date: Date,
    /// Price in minor units (cents)
    pub price_cents: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::room_type::Entity",
        from = "Column::RoomTypeId",
        to = "super::room_type::Column::Id"
    )]
    RoomType,
}

impl Related<super::room_type::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RoomType.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
