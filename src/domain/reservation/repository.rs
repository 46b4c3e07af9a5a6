//! Reservation repository interface

use async_trait::async_trait;
use chrono::NaiveDate;

use super::model::{NewReservation, Reservation, ReservationStatus};
use crate::domain::DomainResult;

/// Manager listing filter. The window matches reservations overlapping
/// `[start, end)`; either bound may be open.
#[derive(Debug, Clone, Default)]
pub struct ReservationFilter {
    pub status: Option<ReservationStatus>,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl ReservationFilter {
    pub fn matches(&self, r: &Reservation) -> bool {
        if self.status.is_some_and(|s| s != r.status) {
            return false;
        }
        if self.end.is_some_and(|end| r.check_in >= end) {
            return false;
        }
        if self.start.is_some_and(|start| r.check_out <= start) {
            return false;
        }
        true
    }
}

#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// Store a new reservation (status Pending, version 1) and return it
    async fn create(&self, reservation: NewReservation) -> DomainResult<Reservation>;

    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Reservation>>;

    /// Reservations of one guest, newest first
    async fn find_by_user(&self, user_id: i64) -> DomainResult<Vec<Reservation>>;

    /// Reservations of one hotel matching the filter, ordered by check-in
    async fn find_by_hotel(
        &self,
        hotel_id: i64,
        filter: &ReservationFilter,
    ) -> DomainResult<Vec<Reservation>>;

    /// Store an updated snapshot.
    ///
    /// Succeeds only when the stored version equals `reservation.version`;
    /// fails with `Conflict` otherwise. Returns the stored snapshot with the
    /// bumped version.
    async fn update(&self, reservation: Reservation) -> DomainResult<Reservation>;

    /// Confirmed reservations whose check-in is before `date`
    async fn find_confirmed_checking_in_before(
        &self,
        date: NaiveDate,
    ) -> DomainResult<Vec<Reservation>>;
}
