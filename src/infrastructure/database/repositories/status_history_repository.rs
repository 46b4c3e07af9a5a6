//! SeaORM implementation of StatusHistoryRepository

use async_trait::async_trait;
use log::debug;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder, Set,
};

use super::db_err;
use crate::domain::reservation::StatusHistoryRepository;
use crate::domain::{DomainResult, StatusChange};
use crate::infrastructure::database::entities::reservation_status_history;

pub struct SeaOrmStatusHistoryRepository {
    db: DatabaseConnection,
}

impl SeaOrmStatusHistoryRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(m: reservation_status_history::Model) -> DomainResult<StatusChange> {
    Ok(StatusChange {
        id: m.id,
        reservation_id: m.reservation_id,
        from_status: m.from_status.parse()?,
        to_status: m.to_status.parse()?,
        changed_at: m.changed_at,
        changed_by: m.changed_by,
        reason: m.reason,
    })
}

#[async_trait]
impl StatusHistoryRepository for SeaOrmStatusHistoryRepository {
    async fn record(&self, entry: StatusChange) -> DomainResult<()> {
        debug!(
            "Recording status change for reservation {}: {} -> {}",
            entry.reservation_id, entry.from_status, entry.to_status
        );

        let model = reservation_status_history::ActiveModel {
            id: NotSet,
            reservation_id: Set(entry.reservation_id),
            from_status: Set(entry.from_status.as_str().to_string()),
            to_status: Set(entry.to_status.as_str().to_string()),
            changed_at: Set(entry.changed_at),
            changed_by: Set(entry.changed_by),
            reason: Set(entry.reason),
        };
        model.insert(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn find_by_reservation(&self, reservation_id: i64) -> DomainResult<Vec<StatusChange>> {
        let models = reservation_status_history::Entity::find()
            .filter(reservation_status_history::Column::ReservationId.eq(reservation_id))
            .order_by_asc(reservation_status_history::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        models.into_iter().map(model_to_domain).collect()
    }
}
