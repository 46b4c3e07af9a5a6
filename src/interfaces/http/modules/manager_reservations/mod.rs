//! Manager reservation desk: listings, changes, lifecycle events and
//! upgrades for one hotel

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
