//! SeaORM implementation of RoomRepository

use async_trait::async_trait;
use log::debug;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder, Set,
};

use super::db_err;
use crate::domain::room::RoomRepository;
use crate::domain::{DomainError, DomainResult, NewRoom, Room, RoomStatus};
use crate::infrastructure::database::entities::room;

pub struct SeaOrmRoomRepository {
    db: DatabaseConnection,
}

impl SeaOrmRoomRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(m: room::Model) -> DomainResult<Room> {
    Ok(Room {
        id: m.id,
        hotel_id: m.hotel_id,
        room_type_id: m.room_type_id,
        room_number: m.room_number,
        floor: m.floor,
        status: m.status.parse()?,
    })
}

#[async_trait]
impl RoomRepository for SeaOrmRoomRepository {
    async fn create(&self, r: NewRoom) -> DomainResult<Room> {
        debug!("Creating room {} in hotel {}", r.room_number, r.hotel_id);

        let model = room::ActiveModel {
            id: NotSet,
            hotel_id: Set(r.hotel_id),
            room_type_id: Set(r.room_type_id),
            room_number: Set(r.room_number),
            floor: Set(r.floor),
            status: Set(r.status.as_str().to_string()),
        };
        let saved = model.insert(&self.db).await.map_err(db_err)?;
        model_to_domain(saved)
    }

    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Room>> {
        room::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .map(model_to_domain)
            .transpose()
    }

    async fn find_by_hotel(
        &self,
        hotel_id: i64,
        status: Option<RoomStatus>,
    ) -> DomainResult<Vec<Room>> {
        let mut query = room::Entity::find().filter(room::Column::HotelId.eq(hotel_id));
        if let Some(status) = status {
            query = query.filter(room::Column::Status.eq(status.as_str()));
        }
        let models = query
            .order_by_asc(room::Column::RoomNumber)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        models.into_iter().map(model_to_domain).collect()
    }

    async fn find_by_number(&self, hotel_id: i64, room_number: &str) -> DomainResult<Option<Room>> {
        room::Entity::find()
            .filter(room::Column::HotelId.eq(hotel_id))
            .filter(room::Column::RoomNumber.eq(room_number))
            .one(&self.db)
            .await
            .map_err(db_err)?
            .map(model_to_domain)
            .transpose()
    }

    async fn update(&self, r: Room) -> DomainResult<()> {
        debug!("Updating room: {}", r.id);

        let existing = room::Entity::find_by_id(r.id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        if existing.is_none() {
            return Err(DomainError::not_found("Room", r.id));
        }

        let model = room::ActiveModel {
            id: Set(r.id),
            hotel_id: Set(r.hotel_id),
            room_type_id: Set(r.room_type_id),
            room_number: Set(r.room_number),
            floor: Set(r.floor),
            status: Set(r.status.as_str().to_string()),
        };
        model.update(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn delete(&self, id: i64) -> DomainResult<()> {
        debug!("Deleting room: {}", id);

        let result = room::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        if result.rows_affected == 0 {
            return Err(DomainError::not_found("Room", id));
        }
        Ok(())
    }
}
