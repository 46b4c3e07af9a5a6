//! Process-wide plumbing

pub mod shutdown;

pub use shutdown::{ShutdownCoordinator, ShutdownSignal};
