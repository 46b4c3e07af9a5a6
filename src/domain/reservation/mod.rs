//! Reservation aggregate
//!
//! Contains the Reservation entity, the change model and the role-based
//! change policy, the status machines, status history and the repository
//! interfaces.

pub mod change;
pub mod history;
pub mod model;
pub mod policy;
pub mod repository;
pub mod status_machine;

pub use change::{ChangeField, ReservationChange};
pub use history::{StatusChange, StatusHistoryRepository};
pub use model::{NewReservation, Reservation, ReservationStatus, UpgradeStatus};
pub use policy::ChangePolicy;
pub use repository::{ReservationFilter, ReservationRepository};
pub use status_machine::{ensure_transition, ensure_upgrade_transition};
