//! Domain layer
//!
//! Entities, the reservation mutation core (change model, change policy,
//! status machines), the availability engine, inventory planning, stay
//! pricing and the repository ports.

pub mod actor;
pub mod availability;
pub mod error;
pub mod hotel;
pub mod inventory;
pub mod pricing;
pub mod repositories;
pub mod reservation;
pub mod room;
pub mod room_type;
pub mod stay;

pub use actor::{Actor, ActorRole};
pub use availability::{compute_availability, RoomTypeAvailability};
pub use error::{DomainError, DomainResult};
pub use hotel::{Hotel, NewHotel};
pub use inventory::{InventoryPlan, NightSlot, Occupation, OccupancySnapshot};
pub use repositories::RepositoryProvider;
pub use reservation::{
    ChangeField, ChangePolicy, NewReservation, Reservation, ReservationChange,
    ReservationFilter, ReservationStatus, StatusChange, UpgradeStatus,
};
pub use room::{NewRoom, Room, RoomStatus};
pub use room_type::{DailyPrice, NewRoomType, NightlyInventory, RoomType};
pub use stay::{StayRange, DEFAULT_MAX_STAY_NIGHTS};
