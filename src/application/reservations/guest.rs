//! Guest-facing reservation use cases
//!
//! A guest only ever sees and mutates their own reservations. Changes go
//! through the guest adapter and the guest policy.

use std::sync::Arc;

use super::adapter::ReservationChangeRequest;
use super::orchestrator::{BookingRequest, LifecycleEvent, ReservationOrchestrator};
use super::view::{enrich, enrich_one, ReservationDetails};
use crate::application::guards;
use crate::domain::{Actor, DomainResult, RepositoryProvider, ReservationChange};

#[derive(Clone)]
pub struct GuestReservationService {
    repos: Arc<dyn RepositoryProvider>,
    orchestrator: Arc<ReservationOrchestrator>,
}

impl GuestReservationService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, orchestrator: Arc<ReservationOrchestrator>) -> Self {
        Self {
            repos,
            orchestrator,
        }
    }

    /// Own reservations, newest first.
    pub async fn list(&self, actor: &Actor) -> DomainResult<Vec<ReservationDetails>> {
        let reservations = self.repos.reservations().find_by_user(actor.user_id).await?;
        enrich(self.repos.as_ref(), reservations).await
    }

    pub async fn get(&self, actor: &Actor, reservation_id: i64) -> DomainResult<ReservationDetails> {
        let reservation =
            guards::reservation_of_user(self.repos.as_ref(), actor.user_id, reservation_id).await?;
        enrich_one(self.repos.as_ref(), reservation).await
    }

    pub async fn create(&self, actor: &Actor, req: BookingRequest) -> DomainResult<ReservationDetails> {
        let reservation = self.orchestrator.create(actor, req).await?;
        enrich_one(self.repos.as_ref(), reservation).await
    }

    pub async fn modify(
        &self,
        actor: &Actor,
        reservation_id: i64,
        req: &ReservationChangeRequest,
    ) -> DomainResult<ReservationDetails> {
        let owned =
            guards::reservation_of_user(self.repos.as_ref(), actor.user_id, reservation_id).await?;
        let change = ReservationChange::from_guest_request(req);
        let updated = self
            .orchestrator
            .modify(actor, owned.hotel_id, reservation_id, change, None)
            .await?;
        enrich_one(self.repos.as_ref(), updated).await
    }

    pub async fn cancel(&self, actor: &Actor, reservation_id: i64) -> DomainResult<ReservationDetails> {
        let owned =
            guards::reservation_of_user(self.repos.as_ref(), actor.user_id, reservation_id).await?;
        let canceled = self
            .orchestrator
            .transition(
                Some(actor.user_id),
                owned.hotel_id,
                reservation_id,
                LifecycleEvent::Cancel,
                Some("Canceled by guest".into()),
            )
            .await?;
        enrich_one(self.repos.as_ref(), canceled).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::{seeded, Seed};
    use crate::domain::{DomainError, ReservationStatus};
    use chrono::NaiveDate;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 12, day).unwrap()
    }

    fn booking(seed: &Seed) -> BookingRequest {
        BookingRequest {
            hotel_id: seed.hotel_id,
            room_type_id: seed.standard.id,
            check_in: d(1),
            check_out: d(3),
            num_guests: 1,
            currency: Some("EUR".into()),
            notes: None,
        }
    }

    async fn service() -> (GuestReservationService, Seed) {
        let (repos, seed) = seeded().await;
        let orchestrator = Arc::new(ReservationOrchestrator::new(repos.clone(), "USD"));
        (GuestReservationService::new(repos, orchestrator), seed)
    }

    #[tokio::test]
    async fn listing_is_enriched_and_scoped_to_the_guest() {
        let (service, seed) = service().await;
        let alice = Actor::guest(1);
        let bob = Actor::guest(2);
        service.create(&alice, booking(&seed)).await.unwrap();
        service.create(&bob, booking(&seed)).await.unwrap();

        let mine = service.list(&alice).await.unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].hotel_name, "Harbor View");
        assert_eq!(mine[0].room_type_name, "Standard Queen");
        assert_eq!(mine[0].room_number, None);
        assert_eq!(mine[0].reservation.currency, "EUR");
    }

    #[tokio::test]
    async fn other_guests_reservation_is_not_found() {
        let (service, seed) = service().await;
        let created = service.create(&Actor::guest(1), booking(&seed)).await.unwrap();

        let err = service
            .get(&Actor::guest(2), created.reservation.id)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn guest_request_with_room_type_only_changes_dates() {
        let (service, seed) = service().await;
        let guest = Actor::guest(1);
        let created = service.create(&guest, booking(&seed)).await.unwrap();

        let req = ReservationChangeRequest {
            room_type_id: Some(seed.deluxe.id),
            check_in: Some(d(1)),
            check_out: Some(d(4)),
            num_guests: Some(2),
            ..Default::default()
        };
        let updated = service
            .modify(&guest, created.reservation.id, &req)
            .await
            .unwrap();

        assert_eq!(updated.reservation.room_type_id, seed.standard.id);
        assert_eq!(updated.reservation.check_out, d(4));
        assert_eq!(updated.reservation.num_guests, 2);
        assert_eq!(updated.reservation.nights, 3);
    }

    #[tokio::test]
    async fn guest_cancel_releases_and_is_idempotent() {
        let (service, seed) = service().await;
        let guest = Actor::guest(1);
        let created = service.create(&guest, booking(&seed)).await.unwrap();

        let canceled = service.cancel(&guest, created.reservation.id).await.unwrap();
        assert_eq!(canceled.reservation.status, ReservationStatus::Canceled);
        let again = service.cancel(&guest, created.reservation.id).await.unwrap();
        assert_eq!(again.reservation.version, canceled.reservation.version);
    }
}
