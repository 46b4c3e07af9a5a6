//! Stay pricing against stored daily prices

use std::sync::Arc;

use rust_decimal::Decimal;

use crate::domain::pricing::price_stay;
use crate::domain::{DomainResult, RepositoryProvider, RoomType, StayRange};

#[derive(Clone)]
pub struct PricingService {
    repos: Arc<dyn RepositoryProvider>,
}

impl PricingService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    /// Total price of a stay in one room of `room_type`.
    pub async fn quote(&self, room_type: &RoomType, stay: &StayRange) -> DomainResult<Decimal> {
        let prices = self
            .repos
            .daily_prices()
            .find_range(
                room_type.hotel_id,
                room_type.id,
                stay.check_in(),
                stay.check_out(),
            )
            .await?;
        price_stay(room_type.base_rate, &prices, stay)
    }
}
