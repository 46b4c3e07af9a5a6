//! Room type management and nightly prices (manager)

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
