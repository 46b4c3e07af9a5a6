//! Status history recording

use std::sync::Arc;

use chrono::Utc;
use tracing::warn;

use crate::domain::{DomainResult, RepositoryProvider, ReservationStatus, StatusChange};

#[derive(Clone)]
pub struct StatusHistoryService {
    repos: Arc<dyn RepositoryProvider>,
}

impl StatusHistoryService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    /// Append a history entry. The status change itself is already stored, so
    /// a failure here is logged rather than returned.
    pub async fn record(
        &self,
        reservation_id: i64,
        from: ReservationStatus,
        to: ReservationStatus,
        changed_by: Option<i64>,
        reason: Option<String>,
    ) {
        let entry = StatusChange {
            id: 0,
            reservation_id,
            from_status: from,
            to_status: to,
            changed_at: Utc::now(),
            changed_by,
            reason,
        };
        if let Err(e) = self.repos.status_history().record(entry).await {
            warn!(reservation_id, error = %e, "Failed to record status history");
        }
    }

    pub async fn list(&self, reservation_id: i64) -> DomainResult<Vec<StatusChange>> {
        self.repos
            .status_history()
            .find_by_reservation(reservation_id)
            .await
    }
}
