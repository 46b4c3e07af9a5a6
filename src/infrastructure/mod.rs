//! Infrastructure layer - external concerns

pub mod crypto;
pub mod database;
pub mod storage;

pub use crypto::{create_token, verify_token, JwtConfig, TokenClaims};
pub use database::{init_database, DatabaseConfig, SeaOrmRepositoryProvider};
pub use storage::InMemoryRepositoryProvider;
