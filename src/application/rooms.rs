//! Room management (manager)

use std::sync::Arc;

use serde::Deserialize;
use tracing::info;
use utoipa::ToSchema;
use validator::Validate;

use super::guards;
use crate::domain::{DomainError, DomainResult, NewRoom, RepositoryProvider, Room, RoomStatus};

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateRoomRequest {
    pub room_type_id: i64,
    #[validate(length(min = 1, max = 20, message = "room number is required"))]
    pub room_number: String,
    pub floor: Option<i32>,
    /// Available, Maintenance or OutOfService (default Available)
    #[schema(value_type = Option<String>, example = "Available")]
    pub status: Option<RoomStatus>,
}

/// Partial room update. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateRoomRequest {
    pub room_type_id: Option<i64>,
    #[validate(length(min = 1, max = 20))]
    pub room_number: Option<String>,
    pub floor: Option<i32>,
    #[schema(value_type = Option<String>, example = "Maintenance")]
    pub status: Option<RoomStatus>,
}

#[derive(Clone)]
pub struct RoomService {
    repos: Arc<dyn RepositoryProvider>,
}

impl RoomService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    pub async fn list(&self, hotel_id: i64, status: Option<RoomStatus>) -> DomainResult<Vec<Room>> {
        guards::ensure_hotel_exists(self.repos.as_ref(), hotel_id).await?;
        self.repos.rooms().find_by_hotel(hotel_id, status).await
    }

    pub async fn create(&self, hotel_id: i64, req: CreateRoomRequest) -> DomainResult<Room> {
        let repos = self.repos.as_ref();
        guards::ensure_hotel_exists(repos, hotel_id).await?;
        guards::room_type_in_hotel(repos, hotel_id, req.room_type_id).await?;
        self.ensure_number_free(hotel_id, &req.room_number, None).await?;

        let room = repos
            .rooms()
            .create(NewRoom {
                hotel_id,
                room_type_id: req.room_type_id,
                room_number: req.room_number,
                floor: req.floor,
                status: req.status.unwrap_or_default(),
            })
            .await?;
        info!(hotel_id, room_id = room.id, number = %room.room_number, "Room created");
        Ok(room)
    }

    pub async fn update(
        &self,
        hotel_id: i64,
        room_id: i64,
        req: UpdateRoomRequest,
    ) -> DomainResult<Room> {
        let repos = self.repos.as_ref();
        let mut room = guards::room_in_hotel(repos, hotel_id, room_id).await?;

        if let Some(room_type_id) = req.room_type_id {
            guards::room_type_in_hotel(repos, hotel_id, room_type_id).await?;
            room.room_type_id = room_type_id;
        }
        if let Some(number) = req.room_number {
            if number != room.room_number {
                self.ensure_number_free(hotel_id, &number, Some(room_id)).await?;
                room.room_number = number;
            }
        }
        if let Some(floor) = req.floor {
            room.floor = Some(floor);
        }
        if let Some(status) = req.status {
            room.status = status;
        }

        repos.rooms().update(room.clone()).await?;
        Ok(room)
    }

    pub async fn delete(&self, hotel_id: i64, room_id: i64) -> DomainResult<()> {
        guards::room_in_hotel(self.repos.as_ref(), hotel_id, room_id).await?;
        self.repos.rooms().delete(room_id).await?;
        info!(hotel_id, room_id, "Room deleted");
        Ok(())
    }

    async fn ensure_number_free(
        &self,
        hotel_id: i64,
        number: &str,
        except: Option<i64>,
    ) -> DomainResult<()> {
        match self.repos.rooms().find_by_number(hotel_id, number).await? {
            Some(existing) if Some(existing.id) != except => Err(DomainError::Conflict(format!(
                "Room number {} already exists in this hotel.",
                number
            ))),
            _ => Ok(()),
        }
    }
}
