//! Room entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "rooms")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub hotel_id: i64,
    pub room_type_id: i64,
    pub room_number: String,
    #[sea_orm(nullable)]
    pub floor: Option<i32>,
    /// Available, Maintenance, OutOfService
    pub status: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::hotel::Entity",
        from = "Column::HotelId",
        to = "super::hotel::Column::Id"
    )]
    Hotel,
    #[sea_orm(
        belongs_to = "super::room_type::Entity",
        from = "Column::RoomTypeId",
        to = "super::room_type::Column::Id"
    )]
    RoomType,
}

impl Related<super::hotel::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Hotel.def()
    }
}

impl Related<super::room_type::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RoomType.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
