//! Room-type availability engine
//!
//! For a stay window, the number of rooms of a type that stay free on every
//! night of the window. Per-night counts are clamped at zero before taking
//! the minimum, so an overbooked night is never offset by a quiet one.

use rust_decimal::Decimal;
use serde::Serialize;

use super::inventory::OccupancySnapshot;
use super::room_type::RoomType;
use super::stay::StayRange;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoomTypeAvailability {
    pub room_type_id: i64,
    pub code: String,
    pub name: String,
    pub bed_type: Option<String>,
    pub capacity: i32,
    pub total_rooms: i32,
    pub available: i32,
    pub base_rate: Option<Decimal>,
}

/// Minimum free rooms of one type across every night of `stay`, never negative.
pub fn available_for_stay(
    room_type_id: i64,
    total_rooms: i32,
    occupancy: &OccupancySnapshot,
    stay: &StayRange,
) -> i32 {
    stay.dates()
        .map(|date| (total_rooms - occupancy.occupied(room_type_id, date)).max(0))
        .min()
        .unwrap_or(0)
}

/// One entry per room type, ordered by room type ID.
///
/// With `min_capacity`, types that cannot take that many guests are left out
/// of the result rather than reported with zero availability.
pub fn compute_availability(
    room_types: &[RoomType],
    occupancy: &OccupancySnapshot,
    stay: &StayRange,
    min_capacity: Option<i32>,
) -> Vec<RoomTypeAvailability> {
    let mut result: Vec<RoomTypeAvailability> = room_types
        .iter()
        .filter(|rt| min_capacity.map_or(true, |n| rt.fits(n)))
        .map(|rt| RoomTypeAvailability {
            room_type_id: rt.id,
            code: rt.code.clone(),
            name: rt.name.clone(),
            bed_type: rt.bed_type.clone(),
            capacity: rt.capacity,
            total_rooms: rt.total_rooms,
            available: available_for_stay(rt.id, rt.total_rooms, occupancy, stay),
            base_rate: rt.base_rate,
        })
        .collect();
    result.sort_by_key(|a| a.room_type_id);
    result
}
