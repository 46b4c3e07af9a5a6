//! Reservation entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "reservations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_id: i64,
    pub hotel_id: i64,
    pub room_type_id: i64,
    #[sea_orm(nullable)]
    pub room_id: Option<i64>,

    /// Pending, Confirmed, Canceled, CheckedIn, CheckedOut, NoShow
    pub status: String,
    /// NotEligible, Eligible, Queued, Applied, Declined
    pub upgrade_status: String,

    pub check_in: Date,
    pub check_out: Date,
    pub nights: i32,
    pub num_guests: i32,
    pub currency: String,
    /// Total price in minor units (cents)
    pub price_total_cents: i64,
    #[sea_orm(nullable)]
    pub notes: Option<String>,

    pub created_at: DateTimeUtc,
    #[sea_orm(nullable)]
    pub upgraded_at: Option<DateTimeUtc>,
    #[sea_orm(nullable)]
    pub canceled_at: Option<DateTimeUtc>,

    /// Optimistic concurrency counter
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::hotel::Entity",
        from = "Column::HotelId",
        to = "super::hotel::Column::Id"
    )]
    Hotel,
    #[sea_orm(has_many = "super::reservation_status_history::Entity")]
    StatusHistory,
}

impl Related<super::hotel::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Hotel.def()
    }
}

impl Related<super::reservation_status_history::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StatusHistory.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
