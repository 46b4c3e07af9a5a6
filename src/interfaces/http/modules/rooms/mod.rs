//! Physical rooms of a hotel (manager)

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
