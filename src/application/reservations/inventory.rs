//! Nightly inventory holds and releases

use std::sync::Arc;

use tracing::{debug, error};

use crate::domain::{
    DomainResult, InventoryPlan, Occupation, RepositoryProvider, Reservation, RoomType,
};

#[derive(Clone)]
pub struct InventoryService {
    repos: Arc<dyn RepositoryProvider>,
}

impl InventoryService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    /// What `reservation` holds, if anything.
    pub fn occupation(reservation: &Reservation, room_type: &RoomType) -> DomainResult<Option<Occupation>> {
        if !reservation.status.holds_inventory() {
            return Ok(None);
        }
        Ok(Some(Occupation {
            room_type_id: reservation.room_type_id,
            total_rooms: room_type.total_rooms,
            stay: reservation.stay()?,
        }))
    }

    /// Plan moving from `before` to `after`. Each snapshot is paired with its
    /// own room type.
    pub fn plan(
        before: (&Reservation, &RoomType),
        after: (&Reservation, &RoomType),
    ) -> DomainResult<InventoryPlan> {
        Ok(InventoryPlan::between(
            before.0.hotel_id,
            Self::occupation(before.0, before.1)?,
            Self::occupation(after.0, after.1)?,
        ))
    }

    pub async fn apply(&self, plan: &InventoryPlan) -> DomainResult<()> {
        if plan.is_empty() {
            return Ok(());
        }
        debug!(
            hotel_id = plan.hotel_id,
            holds = plan.holds.len(),
            releases = plan.releases.len(),
            "Applying inventory plan"
        );
        self.repos.inventory().apply(plan).await
    }

    /// Undo an applied plan after a later step failed. Best effort: a night
    /// taken by someone else in between cannot be re-held.
    pub async fn revert(&self, plan: &InventoryPlan) {
        if plan.is_empty() {
            return;
        }
        if let Err(e) = self.repos.inventory().apply(&plan.inverse()).await {
            error!(hotel_id = plan.hotel_id, error = %e, "Failed to revert inventory plan");
        }
    }
}
