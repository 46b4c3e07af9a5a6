//! Room-type availability queries
//!
//! Reads a point-in-time occupancy snapshot and hands it to the engine. No
//! locks are taken: results may lag reservations committing concurrently.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::debug;

use super::guards;
use crate::domain::{
    compute_availability, DomainError, DomainResult, OccupancySnapshot, RepositoryProvider,
    RoomTypeAvailability, StayRange, DEFAULT_MAX_STAY_NIGHTS,
};

#[derive(Clone)]
pub struct AvailabilityService {
    repos: Arc<dyn RepositoryProvider>,
}

impl AvailabilityService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    /// Availability of every room type of the hotel for `[check_in, check_out)`,
    /// ordered by room type ID. With `num_guests`, smaller room types are left out.
    pub async fn availability(
        &self,
        hotel_id: i64,
        check_in: NaiveDate,
        check_out: NaiveDate,
        num_guests: Option<i32>,
    ) -> DomainResult<Vec<RoomTypeAvailability>> {
        let stay = StayRange::new(check_in, check_out)?;
        stay.ensure_at_most(DEFAULT_MAX_STAY_NIGHTS)?;
        if num_guests.is_some_and(|n| n < 1) {
            return Err(DomainError::InvalidGuestCount(
                "numGuests must be positive.".into(),
            ));
        }
        guards::ensure_hotel_exists(self.repos.as_ref(), hotel_id).await?;

        metrics::counter!("availability_queries_total").increment(1);
        self.compute(hotel_id, &stay, num_guests).await
    }

    pub(crate) async fn compute(
        &self,
        hotel_id: i64,
        stay: &StayRange,
        num_guests: Option<i32>,
    ) -> DomainResult<Vec<RoomTypeAvailability>> {
        let room_types = self.repos.room_types().find_by_hotel(hotel_id).await?;
        let occupancy: OccupancySnapshot = self
            .repos
            .inventory()
            .find_for_hotel(hotel_id, stay.check_in(), stay.check_out())
            .await?
            .into_iter()
            .collect();

        let result = compute_availability(&room_types, &occupancy, stay, num_guests);
        debug!(hotel_id, %stay, room_types = result.len(), "Computed availability");
        Ok(result)
    }
}
