//! Entity guards
//!
//! Load-or-fail helpers that also check the entity belongs to the hotel in
//! the request path. A reservation, room or room type of another hotel is
//! reported as not found.

use crate::domain::{
    DomainError, DomainResult, Hotel, RepositoryProvider, Reservation, Room, RoomType,
};

pub async fn hotel(repos: &dyn RepositoryProvider, hotel_id: i64) -> DomainResult<Hotel> {
    repos
        .hotels()
        .find_by_id(hotel_id)
        .await?
        .ok_or_else(|| DomainError::not_found("Hotel", hotel_id))
}

pub async fn ensure_hotel_exists(repos: &dyn RepositoryProvider, hotel_id: i64) -> DomainResult<()> {
    hotel(repos, hotel_id).await.map(|_| ())
}

pub async fn room_type_in_hotel(
    repos: &dyn RepositoryProvider,
    hotel_id: i64,
    room_type_id: i64,
) -> DomainResult<RoomType> {
    repos
        .room_types()
        .find_by_id(room_type_id)
        .await?
        .filter(|rt| rt.hotel_id == hotel_id)
        .ok_or_else(|| DomainError::not_found("RoomType", room_type_id))
}

pub async fn room_in_hotel(
    repos: &dyn RepositoryProvider,
    hotel_id: i64,
    room_id: i64,
) -> DomainResult<Room> {
    repos
        .rooms()
        .find_by_id(room_id)
        .await?
        .filter(|r| r.hotel_id == hotel_id)
        .ok_or_else(|| DomainError::not_found("Room", room_id))
}

/// The room must belong to the hotel and be of the given room type.
pub async fn room_in_hotel_and_type(
    repos: &dyn RepositoryProvider,
    hotel_id: i64,
    room_id: i64,
    room_type_id: i64,
) -> DomainResult<Room> {
    let room = room_in_hotel(repos, hotel_id, room_id).await?;
    if room.room_type_id != room_type_id {
        return Err(DomainError::Validation(format!(
            "Room {} is not of room type {}.",
            room.room_number, room_type_id
        )));
    }
    Ok(room)
}

pub async fn reservation_in_hotel(
    repos: &dyn RepositoryProvider,
    hotel_id: i64,
    reservation_id: i64,
) -> DomainResult<Reservation> {
    repos
        .reservations()
        .find_by_id(reservation_id)
        .await?
        .filter(|r| r.hotel_id == hotel_id)
        .ok_or_else(|| DomainError::not_found("Reservation", reservation_id))
}

/// A guest only sees their own reservations.
pub async fn reservation_of_user(
    repos: &dyn RepositoryProvider,
    user_id: i64,
    reservation_id: i64,
) -> DomainResult<Reservation> {
    repos
        .reservations()
        .find_by_id(reservation_id)
        .await?
        .filter(|r| r.is_owned_by(user_id))
        .ok_or_else(|| DomainError::not_found("Reservation", reservation_id))
}
