//! Room DTOs

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{DomainResult, Room, RoomStatus};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RoomDto {
    pub id: i64,
    pub hotel_id: i64,
    pub room_type_id: i64,
    pub room_number: String,
    pub floor: Option<i32>,
    /// Available, Maintenance or OutOfService
    pub status: String,
}

impl From<Room> for RoomDto {
    fn from(r: Room) -> Self {
        Self {
            id: r.id,
            hotel_id: r.hotel_id,
            room_type_id: r.room_type_id,
            room_number: r.room_number,
            floor: r.floor,
            status: r.status.to_string(),
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RoomListQuery {
    /// Available, Maintenance or OutOfService
    pub status: Option<String>,
}

impl RoomListQuery {
    pub fn status(&self) -> DomainResult<Option<RoomStatus>> {
        self.status.as_deref().map(str::parse).transpose()
    }
}
