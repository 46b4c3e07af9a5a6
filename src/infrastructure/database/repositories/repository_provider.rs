//! SeaORM implementation of RepositoryProvider

use sea_orm::DatabaseConnection;

use crate::domain::hotel::HotelRepository;
use crate::domain::repositories::RepositoryProvider;
use crate::domain::reservation::{ReservationRepository, StatusHistoryRepository};
use crate::domain::room::RoomRepository;
use crate::domain::room_type::{DailyPriceRepository, InventoryRepository, RoomTypeRepository};

use super::hotel_repository::SeaOrmHotelRepository;
use super::inventory_repository::SeaOrmInventoryRepository;
use super::reservation_repository::SeaOrmReservationRepository;
use super::room_repository::SeaOrmRoomRepository;
use super::room_type_repository::{SeaOrmDailyPriceRepository, SeaOrmRoomTypeRepository};
use super::status_history_repository::SeaOrmStatusHistoryRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository accessors.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone());
/// let hotel = repos.hotels().find_by_id(1).await?;
/// let types = repos.room_types().find_by_hotel(1).await?;
/// ```
pub struct SeaOrmRepositoryProvider {
    hotels: SeaOrmHotelRepository,
    room_types: SeaOrmRoomTypeRepository,
    rooms: SeaOrmRoomRepository,
    inventory: SeaOrmInventoryRepository,
    daily_prices: SeaOrmDailyPriceRepository,
    reservations: SeaOrmReservationRepository,
    status_history: SeaOrmStatusHistoryRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            hotels: SeaOrmHotelRepository::new(db.clone()),
            room_types: SeaOrmRoomTypeRepository::new(db.clone()),
            rooms: SeaOrmRoomRepository::new(db.clone()),
            inventory: SeaOrmInventoryRepository::new(db.clone()),
            daily_prices: SeaOrmDailyPriceRepository::new(db.clone()),
            reservations: SeaOrmReservationRepository::new(db.clone()),
            status_history: SeaOrmStatusHistoryRepository::new(db),
        }
    }

    pub fn inventory_store(&self) -> &SeaOrmInventoryRepository {
        &self.inventory
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn hotels(&self) -> &dyn HotelRepository {
        &self.hotels
    }

    fn room_types(&self) -> &dyn RoomTypeRepository {
        &self.room_types
    }

    fn rooms(&self) -> &dyn RoomRepository {
        &self.rooms
    }

    fn inventory(&self) -> &dyn InventoryRepository {
        &self.inventory
    }

    fn daily_prices(&self) -> &dyn DailyPriceRepository {
        &self.daily_prices
    }

    fn reservations(&self) -> &dyn ReservationRepository {
        &self.reservations
    }

    fn status_history(&self) -> &dyn StatusHistoryRepository {
        &self.status_history
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::NaiveDate;

    use super::*;
    use crate::application::reservations::{BookingRequest, LifecycleEvent, ReservationOrchestrator};
    use crate::application::AvailabilityService;
    use crate::domain::{Actor, NewHotel, NewRoomType, ReservationStatus};
    use crate::infrastructure::database::repositories::test_db;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 12, day).unwrap()
    }

    #[tokio::test]
    async fn booking_and_cancel_against_sqlite() {
        let repos = Arc::new(SeaOrmRepositoryProvider::new(test_db::connect().await));
        let hotel = repos
            .hotels()
            .create(NewHotel {
                name: "Harbor View".into(),
                city: "Seattle".into(),
                ..Default::default()
            })
            .await
            .unwrap();
        let rt = repos
            .room_types()
            .create(NewRoomType {
                hotel_id: hotel.id,
                code: "STD".into(),
                name: "Standard".into(),
                capacity: 2,
                total_rooms: 1,
                base_rate: Some(rust_decimal::Decimal::new(9900, 2)),
                ..Default::default()
            })
            .await
            .unwrap();

        let orchestrator = ReservationOrchestrator::new(repos.clone(), "USD");
        let availability = AvailabilityService::new(repos.clone());
        let booking = BookingRequest {
            hotel_id: hotel.id,
            room_type_id: rt.id,
            check_in: d(1),
            check_out: d(3),
            num_guests: 2,
            currency: None,
            notes: None,
        };

        let r = orchestrator.create(&Actor::guest(5), booking.clone()).await.unwrap();
        let result = availability.availability(hotel.id, d(1), d(3), None).await.unwrap();
        assert_eq!(result[0].available, 0);
        assert!(orchestrator.create(&Actor::guest(6), booking.clone()).await.is_err());

        let canceled = orchestrator
            .transition(Some(5), hotel.id, r.id, LifecycleEvent::Cancel, None)
            .await
            .unwrap();
        assert_eq!(canceled.status, ReservationStatus::Canceled);
        let result = availability.availability(hotel.id, d(1), d(3), None).await.unwrap();
        assert_eq!(result[0].available, 1);

        let history = repos.status_history().find_by_reservation(r.id).await.unwrap();
        assert_eq!(history.len(), 1);
    }
}
