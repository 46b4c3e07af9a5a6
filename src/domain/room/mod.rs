//! Room aggregate (concrete, numbered rooms)

pub mod model;
pub mod repository;

pub use model::{NewRoom, Room, RoomStatus};
pub use repository::RoomRepository;
