//! Room type, inventory and price repository interfaces

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::model::{DailyPrice, NewRoomType, NightlyInventory, RoomType};
use crate::domain::inventory::InventoryPlan;
use crate::domain::DomainResult;

#[async_trait]
pub trait RoomTypeRepository: Send + Sync {
    async fn create(&self, room_type: NewRoomType) -> DomainResult<RoomType>;

    async fn find_by_id(&self, id: i64) -> DomainResult<Option<RoomType>>;

    /// Room types of a hotel ordered by ID
    async fn find_by_hotel(&self, hotel_id: i64) -> DomainResult<Vec<RoomType>>;

    async fn find_by_code(&self, hotel_id: i64, code: &str) -> DomainResult<Option<RoomType>>;

    async fn update(&self, room_type: RoomType) -> DomainResult<()>;
}

#[async_trait]
pub trait InventoryRepository: Send + Sync {
    /// Stored counters of every room type in a hotel for nights in `[from, to)`.
    /// Nights without a row are simply absent.
    async fn find_for_hotel(
        &self,
        hotel_id: i64,
        from: NaiveDate,
        to: NaiveDate,
    ) -> DomainResult<Vec<NightlyInventory>>;

    /// Apply a hold/release plan atomically.
    ///
    /// Every night in `plan.holds` is checked first and the call fails with
    /// `NoAvailability` (changing nothing) if one of them has no free room.
    /// Releases are then applied (floored at zero), then holds. Missing rows
    /// are created from the slot's `total_rooms`.
    async fn apply(&self, plan: &InventoryPlan) -> DomainResult<()>;
}

#[async_trait]
pub trait DailyPriceRepository: Send + Sync {
    /// Prices of one room type for nights in `[from, to)`
    async fn find_range(
        &self,
        hotel_id: i64,
        room_type_id: i64,
        from: NaiveDate,
        to: NaiveDate,
    ) -> DomainResult<Vec<DailyPrice>>;

    /// Insert or overwrite the price of every night in `[from, to)`
    async fn upsert_range(
        &self,
        hotel_id: i64,
        room_type_id: i64,
        from: NaiveDate,
        to: NaiveDate,
        price: Decimal,
    ) -> DomainResult<()>;
}
