//! Manager-facing reservation use cases, scoped to one hotel

use std::sync::Arc;

use super::adapter::ReservationChangeRequest;
use super::orchestrator::{LifecycleEvent, ReservationOrchestrator};
use super::view::{enrich, enrich_one, ReservationDetails};
use crate::application::guards;
use crate::domain::{
    Actor, DomainResult, RepositoryProvider, ReservationChange, ReservationFilter, StatusChange,
    UpgradeStatus,
};

#[derive(Clone)]
pub struct ManagerReservationService {
    repos: Arc<dyn RepositoryProvider>,
    orchestrator: Arc<ReservationOrchestrator>,
}

impl ManagerReservationService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, orchestrator: Arc<ReservationOrchestrator>) -> Self {
        Self {
            repos,
            orchestrator,
        }
    }

    pub async fn list(
        &self,
        hotel_id: i64,
        filter: &ReservationFilter,
    ) -> DomainResult<Vec<ReservationDetails>> {
        guards::ensure_hotel_exists(self.repos.as_ref(), hotel_id).await?;
        let reservations = self.repos.reservations().find_by_hotel(hotel_id, filter).await?;
        enrich(self.repos.as_ref(), reservations).await
    }

    pub async fn get(&self, hotel_id: i64, reservation_id: i64) -> DomainResult<ReservationDetails> {
        let reservation =
            guards::reservation_in_hotel(self.repos.as_ref(), hotel_id, reservation_id).await?;
        enrich_one(self.repos.as_ref(), reservation).await
    }

    pub async fn modify(
        &self,
        actor: &Actor,
        hotel_id: i64,
        reservation_id: i64,
        req: &ReservationChangeRequest,
    ) -> DomainResult<ReservationDetails> {
        let change = ReservationChange::from_manager_request(req);
        let updated = self
            .orchestrator
            .modify(actor, hotel_id, reservation_id, change, None)
            .await?;
        enrich_one(self.repos.as_ref(), updated).await
    }

    pub async fn check_in(
        &self,
        actor: &Actor,
        hotel_id: i64,
        reservation_id: i64,
    ) -> DomainResult<ReservationDetails> {
        self.lifecycle(actor, hotel_id, reservation_id, LifecycleEvent::CheckIn, None)
            .await
    }

    pub async fn check_out(
        &self,
        actor: &Actor,
        hotel_id: i64,
        reservation_id: i64,
    ) -> DomainResult<ReservationDetails> {
        self.lifecycle(actor, hotel_id, reservation_id, LifecycleEvent::CheckOut, None)
            .await
    }

    pub async fn no_show(
        &self,
        actor: &Actor,
        hotel_id: i64,
        reservation_id: i64,
    ) -> DomainResult<ReservationDetails> {
        self.lifecycle(actor, hotel_id, reservation_id, LifecycleEvent::NoShow, None)
            .await
    }

    pub async fn cancel(
        &self,
        actor: &Actor,
        hotel_id: i64,
        reservation_id: i64,
        reason: Option<String>,
    ) -> DomainResult<ReservationDetails> {
        self.lifecycle(actor, hotel_id, reservation_id, LifecycleEvent::Cancel, reason)
            .await
    }

    pub async fn apply_upgrade(
        &self,
        actor: &Actor,
        hotel_id: i64,
        reservation_id: i64,
        room_type_id: i64,
    ) -> DomainResult<ReservationDetails> {
        let upgraded = self
            .orchestrator
            .apply_upgrade(actor, hotel_id, reservation_id, room_type_id)
            .await?;
        enrich_one(self.repos.as_ref(), upgraded).await
    }

    pub async fn set_upgrade_status(
        &self,
        hotel_id: i64,
        reservation_id: i64,
        status: UpgradeStatus,
    ) -> DomainResult<ReservationDetails> {
        let updated = self
            .orchestrator
            .set_upgrade_status(hotel_id, reservation_id, status)
            .await?;
        enrich_one(self.repos.as_ref(), updated).await
    }

    pub async fn history(&self, hotel_id: i64, reservation_id: i64) -> DomainResult<Vec<StatusChange>> {
        guards::reservation_in_hotel(self.repos.as_ref(), hotel_id, reservation_id).await?;
        self.orchestrator.history().list(reservation_id).await
    }

    async fn lifecycle(
        &self,
        actor: &Actor,
        hotel_id: i64,
        reservation_id: i64,
        event: LifecycleEvent,
        reason: Option<String>,
    ) -> DomainResult<ReservationDetails> {
        let updated = self
            .orchestrator
            .transition(Some(actor.user_id), hotel_id, reservation_id, event, reason)
            .await?;
        enrich_one(self.repos.as_ref(), updated).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::reservations::orchestrator::BookingRequest;
    use crate::application::testing::{seeded, Seed};
    use crate::domain::{DomainError, ReservationStatus};
    use chrono::NaiveDate;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 12, day).unwrap()
    }

    async fn setup() -> (ManagerReservationService, Arc<ReservationOrchestrator>, Seed) {
        let (repos, seed) = seeded().await;
        let orchestrator = Arc::new(ReservationOrchestrator::new(repos.clone(), "USD"));
        (
            ManagerReservationService::new(repos, orchestrator.clone()),
            orchestrator,
            seed,
        )
    }

    async fn book(orchestrator: &ReservationOrchestrator, seed: &Seed, from: u32, to: u32) -> i64 {
        orchestrator
            .create(
                &Actor::guest(9),
                BookingRequest {
                    hotel_id: seed.hotel_id,
                    room_type_id: seed.standard.id,
                    check_in: d(from),
                    check_out: d(to),
                    num_guests: 2,
                    currency: None,
                    notes: None,
                },
            )
            .await
            .unwrap()
            .id
    }

    #[tokio::test]
    async fn list_filters_by_status_and_window() {
        let (service, orchestrator, seed) = setup().await;
        let early = book(&orchestrator, &seed, 1, 3).await;
        let late = book(&orchestrator, &seed, 10, 12).await;
        let manager = Actor::manager(1);
        service
            .cancel(&manager, seed.hotel_id, late, Some("duplicate".into()))
            .await
            .unwrap();

        let all = service
            .list(seed.hotel_id, &ReservationFilter::default())
            .await
            .unwrap();
        assert_eq!(all.len(), 2);

        let pending = service
            .list(
                seed.hotel_id,
                &ReservationFilter {
                    status: Some(ReservationStatus::Pending),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].reservation.id, early);

        let window = service
            .list(
                seed.hotel_id,
                &ReservationFilter {
                    start: Some(d(3)),
                    end: Some(d(11)),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(window.len(), 1);
        assert_eq!(window[0].reservation.id, late);
    }

    #[tokio::test]
    async fn list_of_unknown_hotel_is_not_found() {
        let (service, _, _) = setup().await;
        let err = service
            .list(999, &ReservationFilter::default())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn manager_change_confirms_and_history_is_kept() {
        let (service, orchestrator, seed) = setup().await;
        let id = book(&orchestrator, &seed, 1, 3).await;
        let manager = Actor::manager(4);

        let req = ReservationChangeRequest {
            status: Some(ReservationStatus::Confirmed),
            room_id: Some(seed.standard_room.id),
            ..Default::default()
        };
        let updated = service.modify(&manager, seed.hotel_id, id, &req).await.unwrap();
        assert_eq!(updated.reservation.status, ReservationStatus::Confirmed);
        assert_eq!(updated.reservation.room_id, Some(seed.standard_room.id));

        service.check_in(&manager, seed.hotel_id, id).await.unwrap();
        service.check_out(&manager, seed.hotel_id, id).await.unwrap();

        let history = service.history(seed.hotel_id, id).await.unwrap();
        let steps: Vec<_> = history.iter().map(|h| h.to_status).collect();
        assert_eq!(
            steps,
            vec![
                ReservationStatus::Confirmed,
                ReservationStatus::CheckedIn,
                ReservationStatus::CheckedOut
            ]
        );
        assert!(history.iter().all(|h| h.changed_by == Some(4)));
    }

    #[tokio::test]
    async fn no_show_requires_confirmation() {
        let (service, orchestrator, seed) = setup().await;
        let id = book(&orchestrator, &seed, 1, 3).await;
        let manager = Actor::manager(1);

        let err = service.no_show(&manager, seed.hotel_id, id).await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidTransition { .. }));
    }

    #[tokio::test]
    async fn upgrade_through_service() {
        let (service, orchestrator, seed) = setup().await;
        let id = book(&orchestrator, &seed, 1, 3).await;
        let manager = Actor::manager(1);

        service
            .set_upgrade_status(seed.hotel_id, id, UpgradeStatus::Eligible)
            .await
            .unwrap();
        let upgraded = service
            .apply_upgrade(&manager, seed.hotel_id, id, seed.deluxe.id)
            .await
            .unwrap();
        assert_eq!(upgraded.room_type_name, "Deluxe King");
        assert_eq!(upgraded.reservation.upgrade_status, UpgradeStatus::Applied);
    }
}
