//! Application layer
//!
//! Use-case services wiring the domain core to the repositories.

pub mod availability;
pub mod guards;
pub mod hotels;
pub mod reservations;
pub mod room_types;
pub mod rooms;

#[cfg(test)]
pub(crate) mod testing;

pub use availability::AvailabilityService;
pub use hotels::{CreateHotelRequest, HotelService};
pub use reservations::{
    BookingRequest, GuestReservationService, ManagerReservationService, ReservationChangeRequest,
    ReservationDetails, ReservationOrchestrator,
};
pub use room_types::{
    CreateRoomTypeRequest, RoomTypeService, SetPricesRequest, UpdateRoomTypeRequest,
};
pub use rooms::{CreateRoomRequest, UpdateRoomRequest, RoomService};
