//! Shared fixtures for application and HTTP tests

use std::sync::Arc;

use rust_decimal::Decimal;

use crate::domain::{NewHotel, NewRoom, NewRoomType, RepositoryProvider, Room, RoomStatus, RoomType};
use crate::infrastructure::storage::InMemoryRepositoryProvider;

/// Two hotels. The first has a standard type (capacity 2, 3 rooms, 100.00)
/// and a deluxe type (capacity 4, 2 rooms, 250.00) with one room each.
pub struct Seed {
    pub hotel_id: i64,
    pub other_hotel_id: i64,
    pub standard: RoomType,
    pub deluxe: RoomType,
    pub standard_room: Room,
    pub deluxe_room: Room,
}

pub async fn seeded() -> (Arc<InMemoryRepositoryProvider>, Seed) {
    let repos = Arc::new(InMemoryRepositoryProvider::new());

    let hotel = repos
        .hotels()
        .create(NewHotel {
            name: "Harbor View".into(),
            city: "Seattle".into(),
            country: Some("US".into()),
            star_rating: Some(4),
            ..Default::default()
        })
        .await
        .unwrap();
    let other = repos
        .hotels()
        .create(NewHotel {
            name: "Lakeside Inn".into(),
            city: "Portland".into(),
            star_rating: Some(3),
            ..Default::default()
        })
        .await
        .unwrap();

    let standard = repos
        .room_types()
        .create(NewRoomType {
            hotel_id: hotel.id,
            code: "STD".into(),
            name: "Standard Queen".into(),
            bed_type: Some("Queen".into()),
            capacity: 2,
            total_rooms: 3,
            base_rate: Some(Decimal::new(10000, 2)),
            ..Default::default()
        })
        .await
        .unwrap();
    let deluxe = repos
        .room_types()
        .create(NewRoomType {
            hotel_id: hotel.id,
            code: "DLX".into(),
            name: "Deluxe King".into(),
            bed_type: Some("King".into()),
            capacity: 4,
            total_rooms: 2,
            base_rate: Some(Decimal::new(25000, 2)),
            ..Default::default()
        })
        .await
        .unwrap();

    let standard_room = repos
        .rooms()
        .create(NewRoom {
            hotel_id: hotel.id,
            room_type_id: standard.id,
            room_number: "101".into(),
            floor: Some(1),
            status: RoomStatus::Available,
        })
        .await
        .unwrap();
    let deluxe_room = repos
        .rooms()
        .create(NewRoom {
            hotel_id: hotel.id,
            room_type_id: deluxe.id,
            room_number: "501".into(),
            floor: Some(5),
            status: RoomStatus::Available,
        })
        .await
        .unwrap();

    let seed = Seed {
        hotel_id: hotel.id,
        other_hotel_id: other.id,
        standard,
        deluxe,
        standard_room,
        deluxe_room,
    };
    (repos, seed)
}
