//! In-memory repositories for development and testing
//!
//! DashMap-backed implementations of every repository port, grouped behind
//! [`InMemoryRepositoryProvider`]. Semantics match the SeaORM repositories,
//! including the optimistic version check on reservation updates and the
//! all-or-nothing inventory plan.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use dashmap::DashMap;
use rust_decimal::Decimal;

use crate::domain::hotel::HotelRepository;
use crate::domain::reservation::{
    ReservationFilter, ReservationRepository, StatusHistoryRepository,
};
use crate::domain::room::RoomRepository;
use crate::domain::room_type::{DailyPriceRepository, InventoryRepository, RoomTypeRepository};
use crate::domain::{
    DailyPrice, DomainError, DomainResult, Hotel, InventoryPlan, NewHotel, NewReservation,
    NewRoom, NewRoomType, NightlyInventory, RepositoryProvider, Reservation, ReservationStatus,
    Room, RoomStatus, RoomType, StatusChange,
};

fn next(counter: &AtomicI64) -> i64 {
    counter.fetch_add(1, Ordering::SeqCst)
}

// ── Hotels ──────────────────────────────────────────────────────

#[derive(Default)]
pub struct InMemoryHotelRepository {
    hotels: DashMap<i64, Hotel>,
    counter: AtomicI64,
}

#[async_trait]
impl HotelRepository for InMemoryHotelRepository {
    async fn create(&self, h: NewHotel) -> DomainResult<Hotel> {
        let hotel = Hotel {
            id: next(&self.counter) + 1,
            name: h.name,
            brand: h.brand,
            address: h.address,
            city: h.city,
            country: h.country,
            star_rating: h.star_rating,
            created_at: Utc::now(),
        };
        self.hotels.insert(hotel.id, hotel.clone());
        Ok(hotel)
    }

    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Hotel>> {
        Ok(self.hotels.get(&id).map(|h| h.clone()))
    }

    async fn find_all(&self) -> DomainResult<Vec<Hotel>> {
        let mut all: Vec<Hotel> = self.hotels.iter().map(|e| e.value().clone()).collect();
        all.sort_by_key(|h| h.id);
        Ok(all)
    }

    async fn find_by_city_prefix(&self, prefix: &str) -> DomainResult<Vec<Hotel>> {
        let mut matching: Vec<Hotel> = self
            .hotels
            .iter()
            .filter(|e| e.value().city_starts_with(prefix))
            .map(|e| e.value().clone())
            .collect();
        matching.sort_by_key(|h| h.id);
        Ok(matching)
    }
}

// ── Room types ──────────────────────────────────────────────────

#[derive(Default)]
pub struct InMemoryRoomTypeRepository {
    room_types: DashMap<i64, RoomType>,
    counter: AtomicI64,
}

#[async_trait]
impl RoomTypeRepository for InMemoryRoomTypeRepository {
    async fn create(&self, rt: NewRoomType) -> DomainResult<RoomType> {
        let room_type = RoomType {
            id: next(&self.counter) + 1,
            hotel_id: rt.hotel_id,
            code: rt.code,
            name: rt.name,
            description: rt.description,
            bed_type: rt.bed_type,
            capacity: rt.capacity,
            total_rooms: rt.total_rooms,
            base_rate: rt.base_rate,
        };
        self.room_types.insert(room_type.id, room_type.clone());
        Ok(room_type)
    }

    async fn find_by_id(&self, id: i64) -> DomainResult<Option<RoomType>> {
        Ok(self.room_types.get(&id).map(|rt| rt.clone()))
    }

    async fn find_by_hotel(&self, hotel_id: i64) -> DomainResult<Vec<RoomType>> {
        let mut types: Vec<RoomType> = self
            .room_types
            .iter()
            .filter(|e| e.value().hotel_id == hotel_id)
            .map(|e| e.value().clone())
            .collect();
        types.sort_by_key(|rt| rt.id);
        Ok(types)
    }

    async fn find_by_code(&self, hotel_id: i64, code: &str) -> DomainResult<Option<RoomType>> {
        Ok(self
            .room_types
            .iter()
            .find(|e| e.value().hotel_id == hotel_id && e.value().code == code)
            .map(|e| e.value().clone()))
    }

    async fn update(&self, room_type: RoomType) -> DomainResult<()> {
        match self.room_types.get_mut(&room_type.id) {
            Some(mut existing) => {
                *existing = room_type;
                Ok(())
            }
            None => Err(DomainError::not_found("RoomType", room_type.id)),
        }
    }
}

// ── Rooms ───────────────────────────────────────────────────────

#[derive(Default)]
pub struct InMemoryRoomRepository {
    rooms: DashMap<i64, Room>,
    counter: AtomicI64,
}

#[async_trait]
impl RoomRepository for InMemoryRoomRepository {
    async fn create(&self, r: NewRoom) -> DomainResult<Room> {
        let room = Room {
            id: next(&self.counter) + 1,
            hotel_id: r.hotel_id,
            room_type_id: r.room_type_id,
            room_number: r.room_number,
            floor: r.floor,
            status: r.status,
        };
        self.rooms.insert(room.id, room.clone());
        Ok(room)
    }

    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Room>> {
        Ok(self.rooms.get(&id).map(|r| r.clone()))
    }

    async fn find_by_hotel(
        &self,
        hotel_id: i64,
        status: Option<RoomStatus>,
    ) -> DomainResult<Vec<Room>> {
        let mut rooms: Vec<Room> = self
            .rooms
            .iter()
            .filter(|e| e.value().hotel_id == hotel_id)
            .filter(|e| status.map_or(true, |s| e.value().status == s))
            .map(|e| e.value().clone())
            .collect();
        rooms.sort_by_key(|r| r.id);
        Ok(rooms)
    }

    async fn find_by_number(&self, hotel_id: i64, room_number: &str) -> DomainResult<Option<Room>> {
        Ok(self
            .rooms
            .iter()
            .find(|e| e.value().hotel_id == hotel_id && e.value().room_number == room_number)
            .map(|e| e.value().clone()))
    }

    async fn update(&self, room: Room) -> DomainResult<()> {
        match self.rooms.get_mut(&room.id) {
            Some(mut existing) => {
                *existing = room;
                Ok(())
            }
            None => Err(DomainError::not_found("Room", room.id)),
        }
    }

    async fn delete(&self, id: i64) -> DomainResult<()> {
        self.rooms
            .remove(&id)
            .ok_or_else(|| DomainError::not_found("Room", id))?;
        Ok(())
    }
}

// ── Inventory ───────────────────────────────────────────────────

type NightKey = (i64, i64, NaiveDate);

#[derive(Default)]
pub struct InMemoryInventoryRepository {
    nights: DashMap<NightKey, NightlyInventory>,
    // serializes whole plans so check-then-apply is atomic
    write_lock: Mutex<()>,
}

impl InMemoryInventoryRepository {
    /// Take rooms out of sale on one night.
    pub fn block(&self, hotel_id: i64, room_type_id: i64, date: NaiveDate, total: i32, blocked: i32) {
        self.nights
            .entry((hotel_id, room_type_id, date))
            .or_insert_with(|| NightlyInventory::empty(hotel_id, room_type_id, date, total))
            .blocked = blocked;
    }
}

#[async_trait]
impl InventoryRepository for InMemoryInventoryRepository {
    async fn find_for_hotel(
        &self,
        hotel_id: i64,
        from: NaiveDate,
        to: NaiveDate,
    ) -> DomainResult<Vec<NightlyInventory>> {
        let mut rows: Vec<NightlyInventory> = self
            .nights
            .iter()
            .filter(|e| {
                let n = e.value();
                n.hotel_id == hotel_id && n.stay_date >= from && n.stay_date < to
            })
            .map(|e| e.value().clone())
            .collect();
        rows.sort_by_key(|n| (n.room_type_id, n.stay_date));
        Ok(rows)
    }

    async fn apply(&self, plan: &InventoryPlan) -> DomainResult<()> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| DomainError::Validation("Inventory lock poisoned".into()))?;

        for slot in &plan.holds {
            let occupied = self
                .nights
                .get(&(plan.hotel_id, slot.room_type_id, slot.date))
                .map(|n| n.occupied())
                .unwrap_or(0);
            if slot.total_rooms - occupied <= 0 {
                return Err(DomainError::NoAvailability {
                    room_type_id: slot.room_type_id,
                    date: slot.date,
                });
            }
        }

        for slot in &plan.releases {
            if let Some(mut night) = self
                .nights
                .get_mut(&(plan.hotel_id, slot.room_type_id, slot.date))
            {
                night.reserved = (night.reserved - 1).max(0);
            }
        }

        for slot in &plan.holds {
            let mut night = self
                .nights
                .entry((plan.hotel_id, slot.room_type_id, slot.date))
                .or_insert_with(|| {
                    NightlyInventory::empty(plan.hotel_id, slot.room_type_id, slot.date, slot.total_rooms)
                });
            night.total = slot.total_rooms;
            night.reserved += 1;
        }

        Ok(())
    }
}

// ── Daily prices ────────────────────────────────────────────────

#[derive(Default)]
pub struct InMemoryDailyPriceRepository {
    prices: DashMap<NightKey, DailyPrice>,
}

#[async_trait]
impl DailyPriceRepository for InMemoryDailyPriceRepository {
    async fn find_range(
        &self,
        hotel_id: i64,
        room_type_id: i64,
        from: NaiveDate,
        to: NaiveDate,
    ) -> DomainResult<Vec<DailyPrice>> {
        let mut prices: Vec<DailyPrice> = self
            .prices
            .iter()
            .filter(|e| {
                let p = e.value();
                p.hotel_id == hotel_id
                    && p.room_type_id == room_type_id
                    && p.stay_date >= from
                    && p.stay_date < to
            })
            .map(|e| e.value().clone())
            .collect();
        prices.sort_by_key(|p| p.stay_date);
        Ok(prices)
    }

    async fn upsert_range(
        &self,
        hotel_id: i64,
        room_type_id: i64,
        from: NaiveDate,
        to: NaiveDate,
        price: Decimal,
    ) -> DomainResult<()> {
        let mut date = from;
        while date < to {
            self.prices.insert(
                (hotel_id, room_type_id, date),
                DailyPrice {
                    hotel_id,
                    room_type_id,
                    stay_date: date,
                    price,
                },
            );
            date = date
                .succ_opt()
                .ok_or_else(|| DomainError::InvalidDateRange("date out of range".into()))?;
        }
        Ok(())
    }
}

// ── Reservations ────────────────────────────────────────────────

#[derive(Default)]
pub struct InMemoryReservationRepository {
    reservations: DashMap<i64, Reservation>,
    counter: AtomicI64,
}

impl InMemoryReservationRepository {
    fn collect_sorted<F>(&self, keep: F) -> Vec<Reservation>
    where
        F: Fn(&Reservation) -> bool,
    {
        let mut found: Vec<Reservation> = self
            .reservations
            .iter()
            .filter(|e| keep(e.value()))
            .map(|e| e.value().clone())
            .collect();
        found.sort_by_key(|r| r.id);
        found
    }
}

#[async_trait]
impl ReservationRepository for InMemoryReservationRepository {
    async fn create(&self, reservation: NewReservation) -> DomainResult<Reservation> {
        let stored = reservation.into_reservation(next(&self.counter) + 1, Utc::now());
        self.reservations.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Reservation>> {
        Ok(self.reservations.get(&id).map(|r| r.clone()))
    }

    async fn find_by_user(&self, user_id: i64) -> DomainResult<Vec<Reservation>> {
        let mut found = self.collect_sorted(|r| r.user_id == user_id);
        found.reverse();
        Ok(found)
    }

    async fn find_by_hotel(
        &self,
        hotel_id: i64,
        filter: &ReservationFilter,
    ) -> DomainResult<Vec<Reservation>> {
        let mut found = self.collect_sorted(|r| r.hotel_id == hotel_id && filter.matches(r));
        found.sort_by_key(|r| (r.check_in, r.id));
        Ok(found)
    }

    async fn update(&self, reservation: Reservation) -> DomainResult<Reservation> {
        let Some(mut stored) = self.reservations.get_mut(&reservation.id) else {
            return Err(DomainError::not_found("Reservation", reservation.id));
        };
        if stored.version != reservation.version {
            return Err(DomainError::Conflict(format!(
                "Reservation {} was modified concurrently",
                reservation.id
            )));
        }
        let mut next = reservation;
        next.version += 1;
        *stored = next.clone();
        Ok(next)
    }

    async fn find_confirmed_checking_in_before(
        &self,
        date: NaiveDate,
    ) -> DomainResult<Vec<Reservation>> {
        Ok(self.collect_sorted(|r| r.status == ReservationStatus::Confirmed && r.check_in < date))
    }
}

// ── Status history ──────────────────────────────────────────────

#[derive(Default)]
pub struct InMemoryStatusHistoryRepository {
    entries: DashMap<i64, StatusChange>,
    counter: AtomicI64,
}

#[async_trait]
impl StatusHistoryRepository for InMemoryStatusHistoryRepository {
    async fn record(&self, mut entry: StatusChange) -> DomainResult<()> {
        entry.id = next(&self.counter) + 1;
        self.entries.insert(entry.id, entry);
        Ok(())
    }

    async fn find_by_reservation(&self, reservation_id: i64) -> DomainResult<Vec<StatusChange>> {
        let mut found: Vec<StatusChange> = self
            .entries
            .iter()
            .filter(|e| e.value().reservation_id == reservation_id)
            .map(|e| e.value().clone())
            .collect();
        found.sort_by_key(|e| e.id);
        Ok(found)
    }
}

// ── Provider ────────────────────────────────────────────────────

/// In-memory [`RepositoryProvider`] for development and testing
#[derive(Default)]
pub struct InMemoryRepositoryProvider {
    hotels: InMemoryHotelRepository,
    room_types: InMemoryRoomTypeRepository,
    rooms: InMemoryRoomRepository,
    inventory: InMemoryInventoryRepository,
    daily_prices: InMemoryDailyPriceRepository,
    reservations: InMemoryReservationRepository,
    status_history: InMemoryStatusHistoryRepository,
}

impl InMemoryRepositoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Direct access for seeding blocked rooms.
    pub fn inventory_store(&self) -> &InMemoryInventoryRepository {
        &self.inventory
    }
}

impl RepositoryProvider for InMemoryRepositoryProvider {
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
    use super::*;
    use crate::domain::{NightSlot, StayRange};

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 12, day).unwrap()
    }

    fn slot(day: u32, total_rooms: i32) -> NightSlot {
        NightSlot {
            room_type_id: 1,
            date: d(day),
            total_rooms,
        }
    }

    #[tokio::test]
    async fn plan_is_all_or_nothing() {
        let repos = InMemoryRepositoryProvider::new();
        repos.inventory_store().block(1, 1, d(2), 1, 1);

        let plan = InventoryPlan {
            hotel_id: 1,
            releases: vec![],
            holds: vec![slot(1, 1), slot(2, 1)],
        };
        let err = repos.inventory().apply(&plan).await.unwrap_err();
        assert_eq!(
            err,
            DomainError::NoAvailability {
                room_type_id: 1,
                date: d(2)
            }
        );

        let rows = repos.inventory().find_for_hotel(1, d(1), d(3)).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].reserved, 0);
    }

    #[tokio::test]
    async fn releases_floor_at_zero() {
        let repos = InMemoryRepositoryProvider::new();
        let hold = InventoryPlan {
            hotel_id: 1,
            releases: vec![],
            holds: vec![slot(1, 3)],
        };
        repos.inventory().apply(&hold).await.unwrap();
        repos.inventory().apply(&hold.inverse()).await.unwrap();
        repos.inventory().apply(&hold.inverse()).await.unwrap();

        let rows = repos.inventory().find_for_hotel(1, d(1), d(2)).await.unwrap();
        assert_eq!(rows[0].reserved, 0);
        assert_eq!(rows[0].total, 3);
    }

    #[tokio::test]
    async fn stale_reservation_update_conflicts() {
        let repos = InMemoryRepositoryProvider::new();
        let created = repos
            .reservations()
            .create(NewReservation {
                user_id: 1,
                hotel_id: 1,
                room_type_id: 1,
                stay: StayRange::new(d(1), d(2)).unwrap(),
                num_guests: 1,
                currency: "USD".into(),
                price_total: Decimal::ZERO,
                notes: None,
            })
            .await
            .unwrap();

        let mut first = created.clone();
        first.num_guests = 2;
        let stored = repos.reservations().update(first).await.unwrap();
        assert_eq!(stored.version, 2);

        let mut stale = created;
        stale.num_guests = 3;
        assert!(matches!(
            repos.reservations().update(stale).await,
            Err(DomainError::Conflict(_))
        ));
    }
}
