//! Per-reservation mutation locks
//!
//! Serializes read-validate-write cycles on the same reservation within this
//! process. The stored version check catches writers in other processes.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

type LockMap = DashMap<i64, Arc<Mutex<()>>>;

/// One entry per reservation that is locked or waited on. The last guard
/// out removes the entry.
#[derive(Default)]
pub struct ReservationLocks {
    locks: Arc<LockMap>,
}

/// Held for the duration of one mutation; released on drop.
pub struct ReservationGuard {
    reservation_id: i64,
    locks: Arc<LockMap>,
    guard: Option<OwnedMutexGuard<()>>,
}

impl ReservationGuard {
    pub fn reservation_id(&self) -> i64 {
        self.reservation_id
    }
}

impl Drop for ReservationGuard {
    fn drop(&mut self) {
        // Unlock first so our own handle no longer counts.
        self.guard.take();
        self.locks
            .remove_if(&self.reservation_id, |_, lock| Arc::strong_count(lock) == 1);
    }
}

impl ReservationLocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn acquire(&self, reservation_id: i64) -> ReservationGuard {
        let lock = self.locks.entry(reservation_id).or_default().clone();
        ReservationGuard {
            reservation_id,
            locks: self.locks.clone(),
            guard: Some(lock.lock_owned().await),
        }
    }

    /// Reservations currently locked or waited on.
    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}
