//! Reservation domain entity

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::stay::StayRange;
use crate::domain::{DomainError, DomainResult};

/// Reservation lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReservationStatus {
    /// Created by a booking, awaiting confirmation
    Pending,
    Confirmed,
    Canceled,
    CheckedIn,
    CheckedOut,
    /// Guest never arrived
    NoShow,
}

impl ReservationStatus {
    pub const ALL: [ReservationStatus; 6] = [
        Self::Pending,
        Self::Confirmed,
        Self::Canceled,
        Self::CheckedIn,
        Self::CheckedOut,
        Self::NoShow,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Confirmed => "Confirmed",
            Self::Canceled => "Canceled",
            Self::CheckedIn => "CheckedIn",
            Self::CheckedOut => "CheckedOut",
            Self::NoShow => "NoShow",
        }
    }

    /// A reservation holds nightly inventory in every status but `Canceled`.
    pub fn holds_inventory(&self) -> bool {
        *self != Self::Canceled
    }
}

impl std::str::FromStr for ReservationStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "").as_str() {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "canceled" | "cancelled" => Ok(Self::Canceled),
            "checkedin" => Ok(Self::CheckedIn),
            "checkedout" => Ok(Self::CheckedOut),
            "noshow" => Ok(Self::NoShow),
            _ => Err(DomainError::Validation(format!(
                "Unknown reservation status: {}",
                s
            ))),
        }
    }
}

impl std::fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Upgrade workflow status, driven independently of [`ReservationStatus`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum UpgradeStatus {
    #[default]
    NotEligible,
    Eligible,
    Queued,
    Applied,
    Declined,
}

impl UpgradeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotEligible => "NotEligible",
            Self::Eligible => "Eligible",
            Self::Queued => "Queued",
            Self::Applied => "Applied",
            Self::Declined => "Declined",
        }
    }

    /// Whether a manager may (re-)apply an upgrade in this state.
    pub fn allows_apply(&self) -> bool {
        matches!(self, Self::Eligible | Self::Queued | Self::Applied)
    }
}

impl std::str::FromStr for UpgradeStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "").as_str() {
            "noteligible" => Ok(Self::NotEligible),
            "eligible" => Ok(Self::Eligible),
            "queued" => Ok(Self::Queued),
            "applied" => Ok(Self::Applied),
            "declined" => Ok(Self::Declined),
            _ => Err(DomainError::Validation(format!(
                "Unknown upgrade status: {}",
                s
            ))),
        }
    }
}

impl std::fmt::Display for UpgradeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Room reservation snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: i64,
    /// Guest who owns the booking
    pub user_id: i64,
    pub hotel_id: i64,
    pub room_type_id: i64,
    /// Concrete room, set once a manager assigns one
    pub room_id: Option<i64>,
    pub status: ReservationStatus,
    pub upgrade_status: UpgradeStatus,
    pub check_in: NaiveDate,
    /// Exclusive
    pub check_out: NaiveDate,
    pub nights: i32,
    pub num_guests: i32,
    /// ISO 4217 code
    pub currency: String,
    pub price_total: Decimal,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub upgraded_at: Option<DateTime<Utc>>,
    pub canceled_at: Option<DateTime<Utc>>,
    /// Optimistic concurrency token, bumped on every stored update
    pub version: i32,
}

impl Reservation {
    pub fn stay(&self) -> DomainResult<StayRange> {
        StayRange::new(self.check_in, self.check_out)
    }

    pub fn is_owned_by(&self, user_id: i64) -> bool {
        self.user_id == user_id
    }
}

/// Data for a reservation that has not been stored yet
#[derive(Debug, Clone)]
pub struct NewReservation {
    pub user_id: i64,
    pub hotel_id: i64,
    pub room_type_id: i64,
    pub stay: StayRange,
    pub num_guests: i32,
    pub currency: String,
    pub price_total: Decimal,
    pub notes: Option<String>,
}

impl NewReservation {
    /// Materialize as a fresh `Pending` reservation with the given ID.
    pub fn into_reservation(self, id: i64, created_at: DateTime<Utc>) -> Reservation {
        Reservation {
            id,
            user_id: self.user_id,
            hotel_id: self.hotel_id,
            room_type_id: self.room_type_id,
            room_id: None,
            status: ReservationStatus::Pending,
            upgrade_status: UpgradeStatus::NotEligible,
            check_in: self.stay.check_in(),
            check_out: self.stay.check_out(),
            nights: self.stay.nights(),
            num_guests: self.num_guests,
            currency: self.currency,
            price_total: self.price_total,
            notes: self.notes,
            created_at,
            upgraded_at: None,
            canceled_at: None,
            version: 1,
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_display_roundtrip() {
        for status in ReservationStatus::ALL {
            let parsed: ReservationStatus = status.as_str().parse().unwrap();
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn status_parses_upper_snake_case() {
        assert_eq!(
            "CHECKED_IN".parse::<ReservationStatus>().unwrap(),
            ReservationStatus::CheckedIn
        );
        assert_eq!(
            "cancelled".parse::<ReservationStatus>().unwrap(),
            ReservationStatus::Canceled
        );
        assert!("Gone".parse::<ReservationStatus>().is_err());
    }

    #[test]
    fn only_canceled_releases_inventory() {
        for status in ReservationStatus::ALL {
            assert_eq!(status.holds_inventory(), status != ReservationStatus::Canceled);
        }
    }

    #[test]
    fn new_reservation_starts_pending_not_eligible() {
        let stay = StayRange::new(
            NaiveDate::from_ymd_opt(2025, 12, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 12, 4).unwrap(),
        )
        .unwrap();
        let r = NewReservation {
            user_id: 7,
            hotel_id: 1,
            room_type_id: 2,
            stay,
            num_guests: 2,
            currency: "USD".into(),
            price_total: Decimal::new(30000, 2),
            notes: None,
        }
        .into_reservation(11, Utc::now());

        assert_eq!(r.id, 11);
        assert_eq!(r.status, ReservationStatus::Pending);
        assert_eq!(r.upgrade_status, UpgradeStatus::NotEligible);
        assert_eq!(r.nights, 3);
        assert_eq!(r.room_id, None);
        assert_eq!(r.version, 1);
        assert!(r.is_owned_by(7));
    }

    #[test]
    fn upgrade_apply_requires_eligibility() {
        assert!(!UpgradeStatus::NotEligible.allows_apply());
        assert!(UpgradeStatus::Eligible.allows_apply());
        assert!(UpgradeStatus::Queued.allows_apply());
        assert!(UpgradeStatus::Applied.allows_apply());
        assert!(!UpgradeStatus::Declined.allows_apply());
    }
}
