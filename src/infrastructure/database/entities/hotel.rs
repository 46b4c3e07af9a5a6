//! Hotel entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "hotels")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    #[sea_orm(nullable)]
    pub brand: Option<String>,
    #[sea_orm(nullable)]
    pub address: Option<String>,
    pub city: String,
    #[sea_orm(nullable)]
    pub country: Option<String>,
    #[sea_orm(nullable)]
    pub star_rating: Option<i32>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::room_type::Entity")]
    RoomTypes,
    #[sea_orm(has_many = "super::room::Entity")]
    Rooms,
    #[sea_orm(has_many = "super::reservation::Entity")]
    Reservations,
}

impl Related<super::room_type::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RoomTypes.def()
    }
}

impl Related<super::room::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Rooms.def()
    }
}

impl Related<super::reservation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reservations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
