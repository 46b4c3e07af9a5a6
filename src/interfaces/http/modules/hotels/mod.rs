//! Hotel catalogue, room types and availability (public) plus hotel
//! creation (manager)

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
