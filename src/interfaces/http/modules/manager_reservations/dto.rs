//! Manager reservation DTOs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::domain::{DomainResult, ReservationFilter, StatusChange};

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ManagerReservationQuery {
    /// Pending, Confirmed, Canceled, CheckedIn, CheckedOut or NoShow
    pub status: Option<String>,
    /// Reservations overlapping `[start, end)`
    #[param(value_type = Option<String>, format = Date)]
    pub start: Option<NaiveDate>,
    #[param(value_type = Option<String>, format = Date)]
    pub end: Option<NaiveDate>,
}

impl ManagerReservationQuery {
    pub fn to_filter(&self) -> DomainResult<ReservationFilter> {
        let status = self.status.as_deref().map(str::parse).transpose()?;
        Ok(ReservationFilter {
            status,
            start: self.start,
            end: self.end,
        })
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CancelQuery {
    /// Stored in the status history
    pub reason: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ApplyUpgradeRequest {
    /// Room type to move the reservation to
    pub room_type_id: i64,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpgradeStatusRequest {
    /// NotEligible, Eligible, Queued, Applied or Declined
    #[validate(length(min = 1, message = "upgrade status is required"))]
    pub upgrade_status: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StatusChangeDto {
    pub id: i64,
    pub reservation_id: i64,
    pub from_status: String,
    pub to_status: String,
    pub changed_at: DateTime<Utc>,
    /// Empty for system changes such as the no-show sweep
    pub changed_by: Option<i64>,
    pub reason: Option<String>,
}

impl From<StatusChange> for StatusChangeDto {
    fn from(c: StatusChange) -> Self {
        Self {
            id: c.id,
            reservation_id: c.reservation_id,
            from_status: c.from_status.to_string(),
            to_status: c.to_status.to_string(),
            changed_at: c.changed_at,
            changed_by: c.changed_by,
            reason: c.reason,
        }
    }
}
