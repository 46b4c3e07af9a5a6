//! Background no-show sweep
//!
//! Confirmed reservations whose check-in lies more than the grace period in
//! the past are moved to NoShow through the orchestrator, so the status
//! machine and history apply as for a manager request.

use std::sync::Arc;

use chrono::{Duration, NaiveDate, Utc};
use tokio::time::Duration as TickInterval;
use tracing::{info, warn};

use super::orchestrator::{LifecycleEvent, ReservationOrchestrator};
use crate::domain::{DomainError, DomainResult, RepositoryProvider};
use crate::shared::shutdown::ShutdownSignal;

const SWEEP_REASON: &str = "No-show sweep";

/// Mark overdue Confirmed reservations as NoShow. Returns how many moved.
///
/// A reservation that fails (e.g. changed concurrently) is logged and
/// skipped; the next sweep picks it up again.
pub async fn sweep_no_shows(
    repos: &dyn RepositoryProvider,
    orchestrator: &ReservationOrchestrator,
    today: NaiveDate,
    grace_days: i64,
) -> DomainResult<usize> {
    let cutoff = Duration::try_days(grace_days)
        .and_then(|grace| today.checked_sub_signed(grace))
        .ok_or_else(|| {
            DomainError::Validation(format!("No-show grace of {} days is out of range.", grace_days))
        })?;
    let overdue = repos
        .reservations()
        .find_confirmed_checking_in_before(cutoff)
        .await?;
    if overdue.is_empty() {
        return Ok(0);
    }

    info!(count = overdue.len(), %cutoff, "Marking overdue reservations as no-show");

    let mut moved = 0;
    for reservation in overdue {
        match orchestrator
            .transition(
                None,
                reservation.hotel_id,
                reservation.id,
                LifecycleEvent::NoShow,
                Some(SWEEP_REASON.into()),
            )
            .await
        {
            Ok(_) => moved += 1,
            Err(e) => warn!(reservation_id = reservation.id, error = %e, "Failed to mark no-show"),
        }
    }
    Ok(moved)
}

/// Start the no-show sweep in the background.
///
/// Runs every `interval_secs` until `shutdown` fires.
pub fn start_no_show_task(
    repos: Arc<dyn RepositoryProvider>,
    orchestrator: Arc<ReservationOrchestrator>,
    shutdown: ShutdownSignal,
    interval_secs: u64,
    grace_days: i64,
) {
    tokio::spawn(async move {
        info!(interval = interval_secs, grace_days, "🕑 No-show sweep started");

        let mut interval = tokio::time::interval(TickInterval::from_secs(interval_secs));

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    let today = Utc::now().date_naive();
                    if let Err(e) = sweep_no_shows(repos.as_ref(), &orchestrator, today, grace_days).await {
                        warn!(error = %e, "No-show sweep error");
                    }
                }
                _ = shutdown.notified().wait() => {
                    info!("🕑 No-show sweep shutting down");
                    break;
                }
            }
        }

        info!("🕑 No-show sweep stopped");
    });
}
