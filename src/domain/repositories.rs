//! Repository traits for the domain layer
//!
//! `RepositoryProvider` gives unified access to all per-aggregate
//! repositories. Consumers request only the repository they need:
//!
//! ```ignore
//! async fn handle(repos: &dyn RepositoryProvider) -> DomainResult<()> {
//!     let hotel = repos.hotels().find_by_id(1).await?;
//!     let types = repos.room_types().find_by_hotel(1).await?;
//!     Ok(())
//! }
//! ```

use super::hotel::HotelRepository;
use super::reservation::{ReservationRepository, StatusHistoryRepository};
use super::room::RoomRepository;
use super::room_type::{DailyPriceRepository, InventoryRepository, RoomTypeRepository};

pub trait RepositoryProvider: Send + Sync {
    fn hotels(&self) -> &dyn HotelRepository;
    fn room_types(&self) -> &dyn RoomTypeRepository;
    fn rooms(&self) -> &dyn RoomRepository;
    fn inventory(&self) -> &dyn InventoryRepository;
    fn daily_prices(&self) -> &dyn DailyPriceRepository;
    fn reservations(&self) -> &dyn ReservationRepository;
    fn status_history(&self) -> &dyn StatusHistoryRepository;
}
