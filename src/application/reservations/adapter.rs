//! Inbound change requests
//!
//! Both roles send the same request shape. Each adapter copies only the
//! fields its role may send, so a guest request carrying a room type or a
//! status loses them here before the policy ever sees the change.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::{ReservationChange, ReservationStatus};

/// Partial reservation update. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct ReservationChangeRequest {
    pub room_type_id: Option<i64>,
    pub room_id: Option<i64>,
    #[schema(value_type = Option<String>, format = Date, example = "2025-12-01")]
    pub check_in: Option<NaiveDate>,
    #[schema(value_type = Option<String>, format = Date, example = "2025-12-03")]
    pub check_out: Option<NaiveDate>,
    #[validate(range(min = 1, message = "there should be at least one guest"))]
    pub num_guests: Option<i32>,
    #[validate(length(equal = 3, message = "currency must be a 3-letter ISO code"))]
    pub currency: Option<String>,
    #[schema(value_type = Option<String>, example = "240.00")]
    pub price_total: Option<Decimal>,
    #[validate(length(max = 1000))]
    pub notes: Option<String>,
    /// Target status (Pending, Confirmed, Canceled, CheckedIn, CheckedOut, NoShow)
    #[schema(value_type = Option<String>, example = "Confirmed")]
    pub status: Option<ReservationStatus>,
}

impl ReservationChange {
    /// Manager adapter: every field is copied.
    pub fn from_manager_request(req: &ReservationChangeRequest) -> Self {
        Self {
            room_type_id: req.room_type_id,
            room_id: req.room_id,
            check_in: req.check_in,
            check_out: req.check_out,
            num_guests: req.num_guests,
            currency: req.currency.clone(),
            price_total: req.price_total,
            notes: req.notes.clone(),
            status: req.status,
        }
    }

    /// Guest adapter: only check-in, check-out and guest count are copied.
    pub fn from_guest_request(req: &ReservationChangeRequest) -> Self {
        let dropped = req.room_type_id.is_some()
            || req.room_id.is_some()
            || req.currency.is_some()
            || req.price_total.is_some()
            || req.notes.is_some()
            || req.status.is_some();
        if dropped {
            debug!("Ignoring privileged fields in guest change request");
        }
        Self {
            check_in: req.check_in,
            check_out: req.check_out,
            num_guests: req.num_guests,
            ..Default::default()
        }
    }
}
