//! Reservation orchestrator
//!
//! Every reservation mutation goes through here: bookings, policy-gated
//! changes, lifecycle events and upgrades. Each mutation of an existing
//! reservation runs under that reservation's lock, reads a fresh snapshot,
//! validates it, adjusts inventory and stores the result with a version check.
//! If storing fails after inventory was adjusted, the adjustment is undone.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use tracing::{info, warn};
use utoipa::ToSchema;
use validator::Validate;

use super::inventory::InventoryService;
use super::locks::ReservationLocks;
use super::pricing::PricingService;
use super::status::StatusHistoryService;
use crate::application::guards;
use crate::domain::reservation::change::validate_currency;
use crate::domain::reservation::{ensure_transition, ensure_upgrade_transition};
use crate::domain::{
    Actor, ChangePolicy, DomainError, DomainResult, InventoryPlan, NewReservation, Occupation,
    RepositoryProvider, Reservation, ReservationChange, ReservationStatus, RoomType, StayRange,
    UpgradeStatus, DEFAULT_MAX_STAY_NIGHTS,
};

/// New booking made by a guest
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct BookingRequest {
    pub hotel_id: i64,
    pub room_type_id: i64,
    #[schema(value_type = String, format = Date, example = "2025-12-01")]
    pub check_in: NaiveDate,
    #[schema(value_type = String, format = Date, example = "2025-12-03")]
    pub check_out: NaiveDate,
    #[validate(range(min = 1, message = "numGuests must be at least 1"))]
    pub num_guests: i32,
    /// Defaults to the configured currency
    #[validate(length(equal = 3, message = "currency must be a 3-letter ISO code"))]
    pub currency: Option<String>,
    #[validate(length(max = 1000))]
    pub notes: Option<String>,
}

/// System-driven status changes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    CheckIn,
    CheckOut,
    NoShow,
    Cancel,
}

impl LifecycleEvent {
    pub fn target(&self) -> ReservationStatus {
        match self {
            Self::CheckIn => ReservationStatus::CheckedIn,
            Self::CheckOut => ReservationStatus::CheckedOut,
            Self::NoShow => ReservationStatus::NoShow,
            Self::Cancel => ReservationStatus::Canceled,
        }
    }
}

pub struct ReservationOrchestrator {
    repos: Arc<dyn RepositoryProvider>,
    inventory: InventoryService,
    pricing: PricingService,
    history: StatusHistoryService,
    locks: ReservationLocks,
    default_currency: String,
    max_stay_nights: i32,
}

impl ReservationOrchestrator {
    pub fn new(repos: Arc<dyn RepositoryProvider>, default_currency: impl Into<String>) -> Self {
        Self {
            inventory: InventoryService::new(repos.clone()),
            pricing: PricingService::new(repos.clone()),
            history: StatusHistoryService::new(repos.clone()),
            locks: ReservationLocks::new(),
            default_currency: default_currency.into(),
            max_stay_nights: DEFAULT_MAX_STAY_NIGHTS,
            repos,
        }
    }

    pub fn with_max_stay_nights(mut self, max_stay_nights: i32) -> Self {
        self.max_stay_nights = max_stay_nights;
        self
    }

    pub fn history(&self) -> &StatusHistoryService {
        &self.history
    }

    // ── Booking ─────────────────────────────────────────────────

    pub async fn create(&self, actor: &Actor, req: BookingRequest) -> DomainResult<Reservation> {
        let repos = self.repos.as_ref();
        guards::ensure_hotel_exists(repos, req.hotel_id).await?;
        let room_type = guards::room_type_in_hotel(repos, req.hotel_id, req.room_type_id).await?;

        if req.num_guests < 1 {
            return Err(DomainError::InvalidGuestCount(
                "numGuests must be positive.".into(),
            ));
        }
        ensure_capacity(&room_type, req.num_guests)?;

        let stay = StayRange::new(req.check_in, req.check_out)?;
        stay.ensure_at_most(self.max_stay_nights)?;
        let currency = req
            .currency
            .unwrap_or_else(|| self.default_currency.clone());
        validate_currency(&currency)?;
        let price_total = self.pricing.quote(&room_type, &stay).await?;

        let plan = InventoryPlan::hold(
            req.hotel_id,
            Occupation {
                room_type_id: room_type.id,
                total_rooms: room_type.total_rooms,
                stay,
            },
        );
        self.inventory.apply(&plan).await?;

        let created = self
            .repos
            .reservations()
            .create(NewReservation {
                user_id: actor.user_id,
                hotel_id: req.hotel_id,
                room_type_id: room_type.id,
                stay,
                num_guests: req.num_guests,
                currency,
                price_total,
                notes: req.notes,
            })
            .await;

        match created {
            Ok(reservation) => {
                info!(
                    reservation_id = reservation.id,
                    hotel_id = reservation.hotel_id,
                    user_id = actor.user_id,
                    nights = reservation.nights,
                    "Reservation created"
                );
                metrics::counter!("reservations_created_total").increment(1);
                Ok(reservation)
            }
            Err(e) => {
                self.inventory.revert(&plan).await;
                Err(e)
            }
        }
    }

    // ── Policy-gated change ─────────────────────────────────────

    /// Apply a proposed change on behalf of `actor`.
    ///
    /// Order: ownership, policy gate, referenced entities, merge, capacity,
    /// reprice and inventory when dates or room type change, store, history.
    pub async fn modify(
        &self,
        actor: &Actor,
        hotel_id: i64,
        reservation_id: i64,
        change: ReservationChange,
        reason: Option<String>,
    ) -> DomainResult<Reservation> {
        let _guard = self.locks.acquire(reservation_id).await;
        let current =
            guards::reservation_in_hotel(self.repos.as_ref(), hotel_id, reservation_id).await?;
        self.apply_change(actor, current, change, reason, |_| {})
            .await
    }

    /// `finish` adjusts the merged snapshot just before it is stored, so
    /// whatever it sets lands in the same write as the change.
    async fn apply_change(
        &self,
        actor: &Actor,
        current: Reservation,
        change: ReservationChange,
        reason: Option<String>,
        finish: impl FnOnce(&mut Reservation) + Send,
    ) -> DomainResult<Reservation> {
        if let Err(e) = ChangePolicy::for_role(actor.role).verify(&change) {
            metrics::counter!("reservation_changes_rejected_total", "reason" => e.kind())
                .increment(1);
            warn!(
                reservation_id = current.id,
                actor = %actor.role,
                error = %e,
                "Reservation change rejected by policy"
            );
            return Err(e);
        }
        if change.is_empty() {
            return Ok(current);
        }

        let repos = self.repos.as_ref();
        let hotel_id = current.hotel_id;

        let old_type = guards::room_type_in_hotel(repos, hotel_id, current.room_type_id).await?;
        let new_type = match change.room_type_id {
            Some(id) if id != old_type.id => guards::room_type_in_hotel(repos, hotel_id, id).await?,
            _ => old_type.clone(),
        };

        if let Some(room_id) = change.room_id {
            guards::room_in_hotel_and_type(repos, hotel_id, room_id, new_type.id).await?;
        } else if change.changes_room_type(current.room_type_id) {
            if let Some(room_id) = current.room_id {
                guards::room_in_hotel_and_type(repos, hotel_id, room_id, new_type.id).await?;
            }
        }

        let mut next = change.apply_to(&current).inspect_err(|e| {
            metrics::counter!("reservation_changes_rejected_total", "reason" => e.kind())
                .increment(1);
        })?;

        if change.changes_dates(current.check_in, current.check_out) {
            next.stay()?.ensure_at_most(self.max_stay_nights)?;
        }
        if change.num_guests.is_some() || change.changes_room_type(current.room_type_id) {
            ensure_capacity(&new_type, next.num_guests)?;
        }

        let reshaped = change.changes_dates(current.check_in, current.check_out)
            || change.changes_room_type(current.room_type_id);
        if reshaped && change.price_total.is_none() {
            next.price_total = self.pricing.quote(&new_type, &next.stay()?).await?;
        }
        if next.status == ReservationStatus::Canceled && current.status != ReservationStatus::Canceled {
            next.canceled_at = Some(Utc::now());
        }
        finish(&mut next);

        let plan = InventoryService::plan((&current, &old_type), (&next, &new_type))?;
        let saved = self.store(&plan, next).await?;

        if saved.status != current.status {
            self.history
                .record(saved.id, current.status, saved.status, Some(actor.user_id), reason)
                .await;
        }

        metrics::counter!("reservations_modified_total", "actor" => actor.role.as_str())
            .increment(1);
        info!(
            reservation_id = saved.id,
            actor = %actor.role,
            status = %saved.status,
            "Reservation modified"
        );
        Ok(saved)
    }

    // ── Lifecycle events ────────────────────────────────────────

    /// Move a reservation to the event's target status.
    ///
    /// Already being in the target status is a no-op. Check-in and check-out
    /// of a canceled reservation are refused with a dedicated message.
    pub async fn transition(
        &self,
        changed_by: Option<i64>,
        hotel_id: i64,
        reservation_id: i64,
        event: LifecycleEvent,
        reason: Option<String>,
    ) -> DomainResult<Reservation> {
        let _guard = self.locks.acquire(reservation_id).await;
        let repos = self.repos.as_ref();
        let current = guards::reservation_in_hotel(repos, hotel_id, reservation_id).await?;
        let target = event.target();

        if current.status == target {
            return Ok(current);
        }
        if matches!(event, LifecycleEvent::CheckIn | LifecycleEvent::CheckOut)
            && current.status == ReservationStatus::Canceled
        {
            return Err(DomainError::Validation(
                "Reservation has already been cancelled.".into(),
            ));
        }
        ensure_transition(current.status, target)?;

        let mut next = current.clone();
        next.status = target;
        if target == ReservationStatus::Canceled {
            next.canceled_at = Some(Utc::now());
        }

        let room_type = guards::room_type_in_hotel(repos, hotel_id, current.room_type_id).await?;
        let plan = InventoryService::plan((&current, &room_type), (&next, &room_type))?;
        let saved = self.store(&plan, next).await?;

        self.history
            .record(saved.id, current.status, saved.status, changed_by, reason)
            .await;
        info!(
            reservation_id = saved.id,
            from = %current.status,
            to = %saved.status,
            "Reservation status changed"
        );
        Ok(saved)
    }

    // ── Upgrades ────────────────────────────────────────────────

    /// Move the reservation to `room_type_id` as a manager change and mark
    /// the upgrade applied.
    pub async fn apply_upgrade(
        &self,
        actor: &Actor,
        hotel_id: i64,
        reservation_id: i64,
        room_type_id: i64,
    ) -> DomainResult<Reservation> {
        let _guard = self.locks.acquire(reservation_id).await;
        let current =
            guards::reservation_in_hotel(self.repos.as_ref(), hotel_id, reservation_id).await?;

        if !current.upgrade_status.allows_apply() {
            return Err(DomainError::Validation(format!(
                "Reservation is not eligible for an upgrade (upgrade status {}).",
                current.upgrade_status
            )));
        }

        let change = ReservationChange {
            room_type_id: Some(room_type_id),
            ..Default::default()
        };
        let manager = Actor::manager(actor.user_id);
        let saved = self
            .apply_change(&manager, current, change, Some("upgrade".into()), |next| {
                next.upgrade_status = UpgradeStatus::Applied;
                next.upgraded_at = Some(Utc::now());
            })
            .await?;
        info!(reservation_id, room_type_id, "Upgrade applied");
        Ok(saved)
    }

    pub async fn set_upgrade_status(
        &self,
        hotel_id: i64,
        reservation_id: i64,
        status: UpgradeStatus,
    ) -> DomainResult<Reservation> {
        let _guard = self.locks.acquire(reservation_id).await;
        let current =
            guards::reservation_in_hotel(self.repos.as_ref(), hotel_id, reservation_id).await?;
        ensure_upgrade_transition(current.upgrade_status, status)?;

        let mut next = current;
        next.upgrade_status = status;
        if status == UpgradeStatus::Applied {
            next.upgraded_at = Some(Utc::now());
        }
        self.repos.reservations().update(next).await
    }

    // ── Helpers ─────────────────────────────────────────────────

    /// Apply the inventory plan, then store the snapshot. Undo the plan if
    /// storing fails.
    async fn store(&self, plan: &InventoryPlan, next: Reservation) -> DomainResult<Reservation> {
        self.inventory.apply(plan).await?;
        match self.repos.reservations().update(next).await {
            Ok(saved) => Ok(saved),
            Err(e) => {
                self.inventory.revert(plan).await;
                Err(e)
            }
        }
    }
}

fn ensure_capacity(room_type: &RoomType, num_guests: i32) -> DomainResult<()> {
    if room_type.fits(num_guests) {
        Ok(())
    } else {
        Err(DomainError::InvalidGuestCount(format!(
            "Room type {} holds at most {} guests.",
            room_type.code, room_type.capacity
        )))
    }
}
