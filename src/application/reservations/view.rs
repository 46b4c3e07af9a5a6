//! Reservation read models

use std::collections::HashMap;

use crate::domain::{DomainResult, RepositoryProvider, Reservation};

/// A reservation with the names a listing or detail page shows.
#[derive(Debug, Clone, PartialEq)]
pub struct ReservationDetails {
    pub reservation: Reservation,
    pub hotel_name: String,
    pub room_type_name: String,
    /// Not resolved yet; a concrete room is only known after assignment.
    pub room_number: Option<String>,
}

/// Attach hotel and room type names. Names are looked up once per id.
pub async fn enrich(
    repos: &dyn RepositoryProvider,
    reservations: Vec<Reservation>,
) -> DomainResult<Vec<ReservationDetails>> {
    let mut hotels: HashMap<i64, String> = HashMap::new();
    let mut room_types: HashMap<i64, String> = HashMap::new();
    let mut details = Vec::with_capacity(reservations.len());

    for reservation in reservations {
        if !hotels.contains_key(&reservation.hotel_id) {
            let name = repos
                .hotels()
                .find_by_id(reservation.hotel_id)
                .await?
                .map(|h| h.name)
                .unwrap_or_default();
            hotels.insert(reservation.hotel_id, name);
        }
        if !room_types.contains_key(&reservation.room_type_id) {
            let name = repos
                .room_types()
                .find_by_id(reservation.room_type_id)
                .await?
                .map(|rt| rt.name)
                .unwrap_or_default();
            room_types.insert(reservation.room_type_id, name);
        }

        details.push(ReservationDetails {
            hotel_name: hotels[&reservation.hotel_id].clone(),
            room_type_name: room_types[&reservation.room_type_id].clone(),
            room_number: None,
            reservation,
        });
    }
    Ok(details)
}

pub async fn enrich_one(
    repos: &dyn RepositoryProvider,
    reservation: Reservation,
) -> DomainResult<ReservationDetails> {
    let mut details = enrich(repos, vec![reservation]).await?;
    Ok(details.remove(0))
}
