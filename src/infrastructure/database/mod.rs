pub mod entities;
pub mod migrator;
pub mod repositories;

pub use repositories::SeaOrmRepositoryProvider;

use sea_orm::{Database, DatabaseConnection};
use tracing::info;

const DEFAULT_URL: &str = "sqlite://./airhotel.db?mode=rwc";

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Database URL (e.g., "sqlite://./airhotel.db?mode=rwc")
    pub url: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
        }
    }
}

impl DatabaseConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    /// Create config for SQLite
    pub fn sqlite(path: &str) -> Self {
        Self {
            url: format!("sqlite://{}?mode=rwc", path),
        }
    }

    /// Create config from environment variable
    pub fn from_env() -> Self {
        Self {
            url: std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_URL.to_string()),
        }
    }
}

/// Initialize database connection
pub async fn init_database(config: &DatabaseConfig) -> Result<DatabaseConnection, sea_orm::DbErr> {
    info!("Connecting to database: {}", config.url);
    let db = Database::connect(&config.url).await?;
    info!("Database connected successfully");
    Ok(db)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sqlite_config_creates_missing_file() {
        let config = DatabaseConfig::sqlite("/tmp/airhotel-test.db");
        assert_eq!(config.url, "sqlite:///tmp/airhotel-test.db?mode=rwc");
    }

    #[tokio::test]
    async fn connects_to_in_memory_sqlite() {
        let db = init_database(&DatabaseConfig::new("sqlite::memory:")).await;
        assert!(db.is_ok());
    }
}
