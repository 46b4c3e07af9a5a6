//! AirHotel reservation service.
//!
//! Reads configuration from a TOML file (`AIRHOTEL_CONFIG`, or
//! ~/.config/airhotel/config.toml).

use tracing::{error, info};

use airhotel::config::AppConfig;
use airhotel::default_config_path;
use airhotel::server::{init_tracing, ServerHandle, ServerOptions};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = default_config_path();

    let config = match AppConfig::load(&config_path) {
        Ok(cfg) => {
            init_tracing(&cfg);
            info!("Configuration loaded from {}", config_path.display());
            cfg
        }
        Err(e) => {
            let cfg = AppConfig::default();
            init_tracing(&cfg);
            error!("Failed to load config: {}. Using defaults.", e);
            cfg
        }
    };

    let handle = ServerHandle::start(ServerOptions {
        config,
        auto_migrate: true,
    })
    .await?;

    handle.install_signal_handler();
    info!("🚀 Press Ctrl+C to shutdown gracefully.");

    handle.shutdown_signal().wait().await;
    handle.wait().await;
    Ok(())
}
