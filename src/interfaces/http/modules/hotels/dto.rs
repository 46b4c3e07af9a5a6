//! Hotel DTOs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{Hotel, RoomType, RoomTypeAvailability};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HotelDto {
    pub id: i64,
    pub name: String,
    pub brand: Option<String>,
    pub address: Option<String>,
    pub city: String,
    pub country: Option<String>,
    /// 1..=5
    pub star_rating: Option<i32>,
    pub created_at: DateTime<Utc>,
}

impl From<Hotel> for HotelDto {
    fn from(h: Hotel) -> Self {
        Self {
            id: h.id,
            name: h.name,
            brand: h.brand,
            address: h.address,
            city: h.city,
            country: h.country,
            star_rating: h.star_rating,
            created_at: h.created_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RoomTypeDto {
    pub id: i64,
    pub hotel_id: i64,
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub bed_type: Option<String>,
    pub capacity: i32,
    pub total_rooms: i32,
    #[schema(value_type = Option<String>, example = "129.00")]
    pub base_rate: Option<Decimal>,
}

impl From<RoomType> for RoomTypeDto {
    fn from(rt: RoomType) -> Self {
        Self {
            id: rt.id,
            hotel_id: rt.hotel_id,
            code: rt.code,
            name: rt.name,
            description: rt.description,
            bed_type: rt.bed_type,
            capacity: rt.capacity,
            total_rooms: rt.total_rooms,
            base_rate: rt.base_rate,
        }
    }
}

/// Rooms of one type still free on every night of the requested stay
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RoomTypeAvailabilityDto {
    pub room_type_id: i64,
    pub code: String,
    pub name: String,
    pub bed_type: Option<String>,
    pub capacity: i32,
    pub total_rooms: i32,
    pub available: i32,
    #[schema(value_type = Option<String>, example = "129.00")]
    pub base_rate: Option<Decimal>,
}

impl From<RoomTypeAvailability> for RoomTypeAvailabilityDto {
    fn from(a: RoomTypeAvailability) -> Self {
        Self {
            room_type_id: a.room_type_id,
            code: a.code,
            name: a.name,
            bed_type: a.bed_type,
            capacity: a.capacity,
            total_rooms: a.total_rooms,
            available: a.available,
            base_rate: a.base_rate,
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CitySearchQuery {
    /// City prefix, case-insensitive
    pub city: String,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AvailableHotelsQuery {
    pub city: String,
    #[param(value_type = String, format = Date)]
    pub check_in: NaiveDate,
    #[param(value_type = String, format = Date)]
    pub check_out: NaiveDate,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AvailabilityQuery {
    #[param(value_type = String, format = Date)]
    pub check_in: NaiveDate,
    #[param(value_type = String, format = Date)]
    pub check_out: NaiveDate,
    /// Leaves out room types smaller than this
    pub num_guests: Option<i32>,
}
