//! Room type entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "room_types")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub hotel_id: i64,
    pub code: String,
    pub name: String,
    #[sea_orm(nullable)]
    pub description: Option<String>,
    #[sea_orm(nullable)]
    pub bed_type: Option<String>,
    pub capacity: i32,
    pub total_rooms: i32,
    /// Base nightly rate in minor units (cents)
    #[sea_orm(nullable)]
    pub base_rate_cents: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::hotel::Entity",
        from = "Column::HotelId",
        to = "super::hotel::Column::Id"
    )]
    Hotel,
    #[sea_orm(has_many = "super::room::Entity")]
    Rooms,
}

impl Related<super::hotel::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Hotel.def()
    }
}

impl Related<super::room::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Rooms.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
