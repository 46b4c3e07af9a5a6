//! Guest reservations: book, list, view, change and cancel own stays

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
