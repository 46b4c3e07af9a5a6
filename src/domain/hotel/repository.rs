//! Hotel repository interface

use async_trait::async_trait;

use super::model::{Hotel, NewHotel};
use crate::domain::DomainResult;

#[async_trait]
pub trait HotelRepository: Send + Sync {
    /// Store a new hotel and return it with its assigned ID
    async fn create(&self, hotel: NewHotel) -> DomainResult<Hotel>;

    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Hotel>>;

    /// All hotels ordered by ID
    async fn find_all(&self) -> DomainResult<Vec<Hotel>>;

    /// Hotels whose city starts with `prefix` (case-insensitive), ordered by ID
    async fn find_by_city_prefix(&self, prefix: &str) -> DomainResult<Vec<Hotel>>;
}
