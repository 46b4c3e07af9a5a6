//! Reservation use cases

pub mod adapter;
pub mod guest;
pub mod inventory;
pub mod locks;
pub mod manager;
pub mod no_show;
pub mod orchestrator;
pub mod pricing;
pub mod status;
pub mod view;

pub use adapter::ReservationChangeRequest;
pub use guest::GuestReservationService;
pub use inventory::InventoryService;
pub use locks::{ReservationGuard, ReservationLocks};
pub use manager::ManagerReservationService;
pub use no_show::{start_no_show_task, sweep_no_shows};
pub use orchestrator::{BookingRequest, LifecycleEvent, ReservationOrchestrator};
pub use pricing::PricingService;
pub use status::StatusHistoryService;
pub use view::ReservationDetails;
