//! Proposed reservation change
//!
//! Every field is optional and `None` means "leave unchanged". A present
//! `room_id` always assigns that room; clearing an assignment is not
//! expressible through a change.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::model::{Reservation, ReservationStatus};
use super::status_machine::ensure_transition;
use crate::domain::stay::StayRange;
use crate::domain::{DomainError, DomainResult};

/// Privileged fields gated by the change policy, in the order they are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChangeField {
    RoomType,
    Room,
    Status,
}

impl ChangeField {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RoomType => "room_type_id",
            Self::Room => "room_id",
            Self::Status => "status",
        }
    }
}

impl std::fmt::Display for ChangeField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReservationChange {
    pub room_type_id: Option<i64>,
    pub room_id: Option<i64>,
    pub check_in: Option<NaiveDate>,
    pub check_out: Option<NaiveDate>,
    pub num_guests: Option<i32>,
    pub currency: Option<String>,
    pub price_total: Option<Decimal>,
    pub notes: Option<String>,
    pub status: Option<ReservationStatus>,
}

impl ReservationChange {
    /// No field present.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn touches(&self, field: ChangeField) -> bool {
        match field {
            ChangeField::RoomType => self.room_type_id.is_some(),
            ChangeField::Room => self.room_id.is_some(),
            ChangeField::Status => self.status.is_some(),
        }
    }

    /// True iff a present check-in or check-out differs from the old value.
    pub fn changes_dates(&self, old_check_in: NaiveDate, old_check_out: NaiveDate) -> bool {
        self.check_in.is_some_and(|d| d != old_check_in)
            || self.check_out.is_some_and(|d| d != old_check_out)
    }

    /// True iff a present room type differs from the old one.
    pub fn changes_room_type(&self, old_room_type_id: i64) -> bool {
        self.room_type_id.is_some_and(|id| id != old_room_type_id)
    }

    pub fn effective_check_in(&self, old_check_in: NaiveDate) -> NaiveDate {
        self.check_in.unwrap_or(old_check_in)
    }

    pub fn effective_check_out(&self, old_check_out: NaiveDate) -> NaiveDate {
        self.check_out.unwrap_or(old_check_out)
    }

    pub fn effective_room_type(&self, old_room_type_id: i64) -> i64 {
        self.room_type_id.unwrap_or(old_room_type_id)
    }

    /// Post-change stay window.
    pub fn effective_stay(&self, current: &Reservation) -> DomainResult<StayRange> {
        StayRange::new(
            self.effective_check_in(current.check_in),
            self.effective_check_out(current.check_out),
        )
    }

    /// Overlay the present fields on `current` and validate the result.
    ///
    /// Does not consult the change policy; callers gate the change first.
    /// Upgrade status and timestamps are left alone.
    pub fn apply_to(&self, current: &Reservation) -> DomainResult<Reservation> {
        let stay = self.effective_stay(current)?;

        if let Some(n) = self.num_guests {
            if n < 1 {
                return Err(DomainError::InvalidGuestCount(
                    "numGuests must be positive.".into(),
                ));
            }
        }
        if let Some(price) = self.price_total {
            if price < Decimal::ZERO {
                return Err(DomainError::InvalidPrice(
                    "priceTotal must be non-negative.".into(),
                ));
            }
        }
        if let Some(currency) = &self.currency {
            validate_currency(currency)?;
        }
        if let Some(to) = self.status {
            if to != current.status {
                ensure_transition(current.status, to)?;
            }
        }

        let mut next = current.clone();
        next.check_in = stay.check_in();
        next.check_out = stay.check_out();
        next.nights = stay.nights();
        if let Some(id) = self.room_type_id {
            next.room_type_id = id;
        }
        if let Some(id) = self.room_id {
            next.room_id = Some(id);
        }
        if let Some(n) = self.num_guests {
            next.num_guests = n;
        }
        if let Some(currency) = &self.currency {
            next.currency = currency.clone();
        }
        if let Some(price) = self.price_total {
            next.price_total = price;
        }
        if let Some(notes) = &self.notes {
            next.notes = Some(notes.clone());
        }
        if let Some(status) = self.status {
            next.status = status;
        }
        Ok(next)
    }
}

/// Three upper-case ASCII letters.
pub fn validate_currency(code: &str) -> DomainResult<()> {
    if code.len() == 3 && code.chars().all(|c| c.is_ascii_uppercase()) {
        Ok(())
    } else {
        Err(DomainError::Validation(format!(
            "currency must be a 3-letter ISO code, got '{}'",
            code
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::reservation::UpgradeStatus;
    use chrono::Utc;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 12, day).unwrap()
    }

    fn reservation() -> Reservation {
        Reservation {
            id: 1,
            user_id: 7,
            hotel_id: 1,
            room_type_id: 2,
            room_id: None,
            status: ReservationStatus::Pending,
            upgrade_status: UpgradeStatus::NotEligible,
            check_in: d(1),
            check_out: d(3),
            nights: 2,
            num_guests: 2,
            currency: "USD".into(),
            price_total: Decimal::new(20000, 2),
            notes: None,
            created_at: Utc::now(),
            upgraded_at: None,
            canceled_at: None,
            version: 1,
        }
    }

    #[test]
    fn effective_dates_fall_back_to_old_values() {
        let none = ReservationChange::default();
        assert_eq!(none.effective_check_in(d(1)), d(1));
        assert_eq!(none.effective_check_out(d(3)), d(3));

        let only_in = ReservationChange {
            check_in: Some(d(2)),
            ..Default::default()
        };
        assert_eq!(only_in.effective_check_in(d(1)), d(2));
        assert_eq!(only_in.effective_check_out(d(3)), d(3));

        let only_out = ReservationChange {
            check_out: Some(d(5)),
            ..Default::default()
        };
        assert_eq!(only_out.effective_check_in(d(1)), d(1));
        assert_eq!(only_out.effective_check_out(d(3)), d(5));

        let both = ReservationChange {
            check_in: Some(d(4)),
            check_out: Some(d(6)),
            ..Default::default()
        };
        assert_eq!(both.effective_check_in(d(1)), d(4));
        assert_eq!(both.effective_check_out(d(3)), d(6));
    }

    #[test]
    fn same_dates_are_not_a_date_change() {
        let change = ReservationChange {
            check_in: Some(d(1)),
            check_out: Some(d(3)),
            ..Default::default()
        };
        assert!(!change.changes_dates(d(1), d(3)));
        assert!(change.changes_dates(d(1), d(4)));
        assert!(!ReservationChange::default().changes_dates(d(1), d(3)));
    }

    #[test]
    fn room_type_change_requires_a_different_id() {
        let change = ReservationChange {
            room_type_id: Some(2),
            ..Default::default()
        };
        assert!(!change.changes_room_type(2));
        assert!(change.changes_room_type(3));
        assert!(!ReservationChange::default().changes_room_type(2));
    }

    #[test]
    fn apply_keeps_absent_fields() {
        let current = reservation();
        let next = ReservationChange {
            num_guests: Some(3),
            notes: Some("late arrival".into()),
            ..Default::default()
        }
        .apply_to(&current)
        .unwrap();

        assert_eq!(next.num_guests, 3);
        assert_eq!(next.notes.as_deref(), Some("late arrival"));
        assert_eq!(next.check_in, current.check_in);
        assert_eq!(next.room_type_id, current.room_type_id);
        assert_eq!(next.price_total, current.price_total);
        assert_eq!(next.status, current.status);
        assert_eq!(next.version, current.version);
    }

    #[test]
    fn apply_recomputes_nights() {
        let next = ReservationChange {
            check_out: Some(d(6)),
            ..Default::default()
        }
        .apply_to(&reservation())
        .unwrap();
        assert_eq!(next.nights, 5);
    }

    #[test]
    fn apply_rejects_inverted_window() {
        let err = ReservationChange {
            check_in: Some(d(3)),
            ..Default::default()
        }
        .apply_to(&reservation())
        .unwrap_err();
        assert!(matches!(err, DomainError::InvalidDateRange(_)));
    }

    #[test]
    fn apply_rejects_out_of_range_scalars() {
        let current = reservation();
        let guests = ReservationChange {
            num_guests: Some(0),
            ..Default::default()
        };
        assert!(matches!(
            guests.apply_to(&current),
            Err(DomainError::InvalidGuestCount(_))
        ));

        let price = ReservationChange {
            price_total: Some(Decimal::new(-1, 2)),
            ..Default::default()
        };
        assert!(matches!(
            price.apply_to(&current),
            Err(DomainError::InvalidPrice(_))
        ));

        let free = ReservationChange {
            price_total: Some(Decimal::ZERO),
            ..Default::default()
        };
        assert!(free.apply_to(&current).is_ok());

        let currency = ReservationChange {
            currency: Some("usd".into()),
            ..Default::default()
        };
        assert!(matches!(
            currency.apply_to(&current),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn apply_validates_status_transition() {
        let current = reservation();
        let err = ReservationChange {
            status: Some(ReservationStatus::CheckedOut),
            ..Default::default()
        }
        .apply_to(&current)
        .unwrap_err();
        assert_eq!(
            err,
            DomainError::InvalidTransition {
                from: ReservationStatus::Pending,
                to: ReservationStatus::CheckedOut,
            }
        );

        let confirmed = ReservationChange {
            status: Some(ReservationStatus::Confirmed),
            ..Default::default()
        }
        .apply_to(&current)
        .unwrap();
        assert_eq!(confirmed.status, ReservationStatus::Confirmed);
        assert_eq!(confirmed.upgrade_status, UpgradeStatus::NotEligible);
    }

    #[test]
    fn restating_the_current_status_is_not_a_transition() {
        let next = ReservationChange {
            status: Some(ReservationStatus::Pending),
            ..Default::default()
        }
        .apply_to(&reservation())
        .unwrap();
        assert_eq!(next.status, ReservationStatus::Pending);
    }

    #[test]
    fn room_assignment_is_applied() {
        let next = ReservationChange {
            room_type_id: Some(3),
            room_id: Some(301),
            ..Default::default()
        }
        .apply_to(&reservation())
        .unwrap();
        assert_eq!(next.room_type_id, 3);
        assert_eq!(next.room_id, Some(301));
    }
}
