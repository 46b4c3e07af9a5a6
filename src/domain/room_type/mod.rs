//! Room type aggregate
//!
//! Room types, their nightly inventory counters and nightly prices.

pub mod model;
pub mod repository;

pub use model::{DailyPrice, NewRoomType, NightlyInventory, RoomType};
pub use repository::{DailyPriceRepository, InventoryRepository, RoomTypeRepository};
