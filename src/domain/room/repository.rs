//! Room repository interface

use async_trait::async_trait;

use super::model::{NewRoom, Room, RoomStatus};
use crate::domain::DomainResult;

#[async_trait]
pub trait RoomRepository: Send + Sync {
    async fn create(&self, room: NewRoom) -> DomainResult<Room>;

    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Room>>;

    /// Rooms of a hotel ordered by ID, optionally filtered by status
    async fn find_by_hotel(
        &self,
        hotel_id: i64,
        status: Option<RoomStatus>,
    ) -> DomainResult<Vec<Room>>;

    async fn find_by_number(&self, hotel_id: i64, room_number: &str) -> DomainResult<Option<Room>>;

    async fn update(&self, room: Room) -> DomainResult<()>;

    async fn delete(&self, id: i64) -> DomainResult<()>;
}
