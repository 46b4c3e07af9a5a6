//! Room type domain entities

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A bookable category of rooms within a hotel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomType {
    pub id: i64,
    pub hotel_id: i64,
    /// Short code, unique per hotel (e.g. "DLX")
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub bed_type: Option<String>,
    /// Maximum number of guests
    pub capacity: i32,
    pub total_rooms: i32,
    /// Fallback nightly rate when no daily price is set
    pub base_rate: Option<Decimal>,
}

#[derive(Debug, Clone, Default)]
pub struct NewRoomType {
    pub hotel_id: i64,
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub bed_type: Option<String>,
    pub capacity: i32,
    pub total_rooms: i32,
    pub base_rate: Option<Decimal>,
}

impl RoomType {
    pub fn fits(&self, num_guests: i32) -> bool {
        self.capacity >= num_guests
    }
}

/// Inventory counters for one room type on one night
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NightlyInventory {
    pub hotel_id: i64,
    pub room_type_id: i64,
    pub stay_date: NaiveDate,
    pub total: i32,
    pub reserved: i32,
    /// Rooms taken out of sale (maintenance, owner use)
    pub blocked: i32,
}

impl NightlyInventory {
    pub fn empty(hotel_id: i64, room_type_id: i64, stay_date: NaiveDate, total: i32) -> Self {
        Self {
            hotel_id,
            room_type_id,
            stay_date,
            total,
            reserved: 0,
            blocked: 0,
        }
    }

    /// Rooms committed on this night.
    pub fn occupied(&self) -> i32 {
        self.reserved + self.blocked
    }

    /// Free rooms; negative when the night is overbooked.
    pub fn free(&self) -> i32 {
        self.total - self.occupied()
    }
}

/// Nightly price override for a room type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyPrice {
    pub hotel_id: i64,
    pub room_type_id: i64,
    pub stay_date: NaiveDate,
    pub price: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn free_counts_reserved_and_blocked() {
        let date = NaiveDate::from_ymd_opt(2025, 12, 1).unwrap();
        let mut night = NightlyInventory::empty(1, 2, date, 10);
        night.reserved = 6;
        night.blocked = 1;
        assert_eq!(night.occupied(), 7);
        assert_eq!(night.free(), 3);

        night.reserved = 12;
        assert_eq!(night.free(), -3);
    }
}
