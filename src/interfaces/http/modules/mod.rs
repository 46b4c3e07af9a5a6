pub mod health;
pub mod hotels;
pub mod manager_reservations;
pub mod metrics;
pub mod request_id;
pub mod reservations;
pub mod room_types;
pub mod rooms;
