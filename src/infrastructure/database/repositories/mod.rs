//! Database repository implementations
//!
//! Per-aggregate SeaORM repositories + unified RepositoryProvider.

pub mod hotel_repository;
pub mod inventory_repository;
pub mod repository_provider;
pub mod reservation_repository;
pub mod room_repository;
pub mod room_type_repository;
pub mod status_history_repository;

pub use repository_provider::SeaOrmRepositoryProvider;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::domain::{DomainError, DomainResult};

pub(crate) fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Validation(format!("Database error: {}", e))
}

/// Money columns hold minor units.
pub(crate) fn to_cents(amount: Decimal) -> DomainResult<i64> {
    (amount * Decimal::ONE_HUNDRED)
        .round()
        .to_i64()
        .ok_or_else(|| DomainError::InvalidPrice(format!("Amount {} is out of range", amount)))
}

pub(crate) fn from_cents(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cents_round_trip_keeps_two_decimals() {
        assert_eq!(to_cents(Decimal::new(12345, 2)).unwrap(), 12345);
        assert_eq!(to_cents(Decimal::new(1005, 3)).unwrap(), 100);
        assert_eq!(from_cents(25000), Decimal::new(25000, 2));
    }
}
