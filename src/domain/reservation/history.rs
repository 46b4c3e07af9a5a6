//! Reservation status history

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::model::ReservationStatus;
use crate::domain::DomainResult;

/// One recorded status change
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusChange {
    pub id: i64,
    pub reservation_id: i64,
    pub from_status: ReservationStatus,
    pub to_status: ReservationStatus,
    pub changed_at: DateTime<Utc>,
    /// `None` for system-driven changes (e.g. the no-show sweep)
    pub changed_by: Option<i64>,
    pub reason: Option<String>,
}

#[async_trait]
pub trait StatusHistoryRepository: Send + Sync {
    /// Append an entry; `entry.id` is ignored and assigned by the store
    async fn record(&self, entry: StatusChange) -> DomainResult<()>;

    /// Entries of one reservation, oldest first
    async fn find_by_reservation(&self, reservation_id: i64) -> DomainResult<Vec<StatusChange>>;
}
