//! # AirHotel Reservation Service
//!
//! Hotel reservation backend: catalogue, per-night inventory, guest and
//! manager reservation flows, room upgrades and no-show handling.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Entities, the reservation change core, status machines and repository ports
//! - **application**: Use-case services and the reservation orchestrator
//! - **infrastructure**: SQLite persistence, in-memory storage, JWT
//! - **interfaces**: REST API with Swagger documentation
//! - **server**: Runtime wiring and graceful shutdown

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export storage backends
pub use infrastructure::{
    init_database, DatabaseConfig, InMemoryRepositoryProvider, SeaOrmRepositoryProvider,
};

// Re-export API router
pub use interfaces::http::create_api_router;
