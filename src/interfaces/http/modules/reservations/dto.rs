//! Reservation DTOs shared by the guest and manager endpoints

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::ReservationDetails;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReservationDto {
    pub id: i64,
    pub user_id: i64,
    pub hotel_id: i64,
    pub hotel_name: String,
    pub room_type_id: i64,
    pub room_type_name: String,
    pub room_id: Option<i64>,
    pub room_number: Option<String>,
    /// Pending, Confirmed, Canceled, CheckedIn, CheckedOut, NoShow
    pub status: String,
    /// NotEligible, Eligible, Queued, Applied, Declined
    pub upgrade_status: String,
    #[schema(value_type = String, format = Date)]
    pub check_in: NaiveDate,
    #[schema(value_type = String, format = Date)]
    pub check_out: NaiveDate,
    pub nights: i32,
    pub num_guests: i32,
    pub currency: String,
    #[schema(value_type = String, example = "200.00")]
    pub price_total: Decimal,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub upgraded_at: Option<DateTime<Utc>>,
    pub canceled_at: Option<DateTime<Utc>>,
    /// Bumped on every update
    pub version: i32,
}

impl From<ReservationDetails> for ReservationDto {
    fn from(d: ReservationDetails) -> Self {
        let r = d.reservation;
        Self {
            id: r.id,
            user_id: r.user_id,
            hotel_id: r.hotel_id,
            hotel_name: d.hotel_name,
            room_type_id: r.room_type_id,
            room_type_name: d.room_type_name,
            room_id: r.room_id,
            room_number: d.room_number,
            status: r.status.to_string(),
            upgrade_status: r.upgrade_status.to_string(),
            check_in: r.check_in,
            check_out: r.check_out,
            nights: r.nights,
            num_guests: r.num_guests,
            currency: r.currency,
            price_total: r.price_total,
            notes: r.notes,
            created_at: r.created_at,
            upgraded_at: r.upgraded_at,
            canceled_at: r.canceled_at,
            version: r.version,
        }
    }
}

pub(crate) fn to_dtos(details: Vec<ReservationDetails>) -> Vec<ReservationDto> {
    details.into_iter().map(ReservationDto::from).collect()
}
