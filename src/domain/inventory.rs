//! Nightly inventory planning
//!
//! Turns "this reservation used to hold type A over window W1 and now holds
//! type B over window W2" into the net set of nights to release and hold.
//! Nights held under the same type in both windows are left untouched.

use std::collections::{BTreeSet, HashMap};

use chrono::NaiveDate;

use super::room_type::NightlyInventory;
use super::stay::StayRange;

/// What a reservation holds: one room of `room_type_id` on every night of `stay`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Occupation {
    pub room_type_id: i64,
    /// Current room count of the type, used for missing rows and the free check
    pub total_rooms: i32,
    pub stay: StayRange,
}

/// One room type on one night
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NightSlot {
    pub room_type_id: i64,
    pub date: NaiveDate,
    pub total_rooms: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InventoryPlan {
    pub hotel_id: i64,
    pub releases: Vec<NightSlot>,
    pub holds: Vec<NightSlot>,
}

impl InventoryPlan {
    /// Net difference between two occupations of the same hotel.
    pub fn between(hotel_id: i64, old: Option<Occupation>, new: Option<Occupation>) -> Self {
        let old_slots = slots(old);
        let new_slots = slots(new);

        let releases = old_slots
            .iter()
            .filter(|s| !new_slots.iter().any(|n| same_night(n, s)))
            .copied()
            .collect();
        let holds = new_slots
            .iter()
            .filter(|s| !old_slots.iter().any(|o| same_night(o, s)))
            .copied()
            .collect();

        Self {
            hotel_id,
            releases,
            holds,
        }
    }

    pub fn hold(hotel_id: i64, occupation: Occupation) -> Self {
        Self::between(hotel_id, None, Some(occupation))
    }

    pub fn release(hotel_id: i64, occupation: Occupation) -> Self {
        Self::between(hotel_id, Some(occupation), None)
    }

    pub fn is_empty(&self) -> bool {
        self.releases.is_empty() && self.holds.is_empty()
    }

    /// The plan that undoes this one.
    pub fn inverse(&self) -> Self {
        Self {
            hotel_id: self.hotel_id,
            releases: self.holds.clone(),
            holds: self.releases.clone(),
        }
    }
}

fn same_night(a: &NightSlot, b: &NightSlot) -> bool {
    a.room_type_id == b.room_type_id && a.date == b.date
}

fn slots(occupation: Option<Occupation>) -> BTreeSet<NightSlot> {
    occupation
        .map(|o| {
            o.stay
                .dates()
                .map(|date| NightSlot {
                    room_type_id: o.room_type_id,
                    date,
                    total_rooms: o.total_rooms,
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Point-in-time committed-room counts per (room type, night).
/// Nights without a stored row count as zero.
#[derive(Debug, Clone, Default)]
pub struct OccupancySnapshot {
    occupied: HashMap<(i64, NaiveDate), i32>,
}

impl OccupancySnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, room_type_id: i64, date: NaiveDate, occupied: i32) {
        self.occupied.insert((room_type_id, date), occupied);
    }

    pub fn occupied(&self, room_type_id: i64, date: NaiveDate) -> i32 {
        self.occupied
            .get(&(room_type_id, date))
            .copied()
            .unwrap_or(0)
    }
}

impl FromIterator<NightlyInventory> for OccupancySnapshot {
    fn from_iter<I: IntoIterator<Item = NightlyInventory>>(rows: I) -> Self {
        let mut snapshot = Self::new();
        for row in rows {
            snapshot.set(row.room_type_id, row.stay_date, row.occupied());
        }
        snapshot
    }
}
