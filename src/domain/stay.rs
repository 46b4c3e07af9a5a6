//! Stay window value type
//!
//! A half-open date range `[check_in, check_out)`. A one-night stay has
//! `check_out = check_in + 1 day`.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use super::{DomainError, DomainResult};

/// Longest stay accepted for bookings and availability queries unless
/// configured otherwise.
pub const DEFAULT_MAX_STAY_NIGHTS: i32 = 90;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StayRange {
    check_in: NaiveDate,
    check_out: NaiveDate,
}

impl StayRange {
    pub fn new(check_in: NaiveDate, check_out: NaiveDate) -> DomainResult<Self> {
        if check_out <= check_in {
            return Err(DomainError::InvalidDateRange(format!(
                "check-out {} must be after check-in {}",
                check_out, check_in
            )));
        }
        Ok(Self {
            check_in,
            check_out,
        })
    }

    pub fn check_in(&self) -> NaiveDate {
        self.check_in
    }

    pub fn check_out(&self) -> NaiveDate {
        self.check_out
    }

    /// Number of nights, always >= 1.
    pub fn nights(&self) -> i32 {
        (self.check_out - self.check_in).num_days() as i32
    }

    /// Every night of the stay in order (check-out excluded).
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        let nights = i64::from(self.nights());
        (0..nights).map(move |offset| self.check_in + Duration::days(offset))
    }

    /// Rejects windows longer than `max_nights`.
    pub fn ensure_at_most(&self, max_nights: i32) -> DomainResult<()> {
        if self.nights() > max_nights {
            return Err(DomainError::InvalidDateRange(format!(
                "stay of {} nights exceeds the maximum of {} nights",
                self.nights(),
                max_nights
            )));
        }
        Ok(())
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.check_in && date < self.check_out
    }

    /// Two windows overlap when they share at least one night.
    pub fn overlaps(&self, start: NaiveDate, end: NaiveDate) -> bool {
        self.check_in < end && self.check_out > start
    }
}

impl std::fmt::Display for StayRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {})", self.check_in, self.check_out)
    }
}
