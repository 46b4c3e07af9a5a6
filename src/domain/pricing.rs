//! Stay pricing

use std::collections::HashMap;

use rust_decimal::Decimal;

use super::room_type::DailyPrice;
use super::stay::StayRange;
use super::{DomainError, DomainResult};

/// Sum of nightly prices over the stay. A night without a daily price falls
/// back to `base_rate`; without a base rate the stay cannot be priced.
pub fn price_stay(
    base_rate: Option<Decimal>,
    daily_prices: &[DailyPrice],
    stay: &StayRange,
) -> DomainResult<Decimal> {
    let by_date: HashMap<_, _> = daily_prices
        .iter()
        .map(|p| (p.stay_date, p.price))
        .collect();

    stay.dates().try_fold(Decimal::ZERO, |total, date| {
        let nightly = by_date.get(&date).copied().or(base_rate).ok_or_else(|| {
            DomainError::Validation(format!(
                "No price for {} and the room type has no base rate.",
                date
            ))
        })?;
        Ok(total + nightly)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 12, day).unwrap()
    }

    fn price(day: u32, cents: i64) -> DailyPrice {
        DailyPrice {
            hotel_id: 1,
            room_type_id: 1,
            stay_date: d(day),
            price: Decimal::new(cents, 2),
        }
    }

    #[test]
    fn daily_prices_override_base_rate() {
        let stay = StayRange::new(d(1), d(4)).unwrap();
        let total = price_stay(Some(Decimal::new(10000, 2)), &[price(2, 15050)], &stay).unwrap();
        assert_eq!(total, Decimal::new(35050, 2));
    }

    #[test]
    fn missing_price_without_base_rate_fails() {
        let stay = StayRange::new(d(1), d(3)).unwrap();
        let err = price_stay(None, &[price(1, 9900)], &stay).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn fully_priced_stay_needs_no_base_rate() {
        let stay = StayRange::new(d(1), d(3)).unwrap();
        let total = price_stay(None, &[price(1, 9900), price(2, 9900)], &stay).unwrap();
        assert_eq!(total, Decimal::new(19800, 2));
    }
}
