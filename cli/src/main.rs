//! AirHotel CLI Server
//!
//! Headless reservation service suitable for deployment as a systemd
//! service, Docker container, or standalone process.
//!
//! ```sh
//! # Run with default config (~/.config/airhotel/config.toml)
//! airhotel-server
//!
//! # Custom config path
//! airhotel-server --config /etc/airhotel/config.toml
//!
//! # Override the API port
//! airhotel-server --api-port 8080
//!
//! # Validate config without starting
//! airhotel-server --check
//! ```

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};

use airhotel::config::AppConfig;
use airhotel::server::{init_tracing, ServerHandle, ServerOptions};

/// AirHotel: hotel reservation backend.
#[derive(Parser, Debug)]
#[command(
    name = "airhotel-server",
    version,
    about = "Hotel reservation service",
    long_about = "AirHotel REST API server for hotel catalogue, inventory \
                  and reservation management.\n\n\
                  Default config: ~/.config/airhotel/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "AIRHOTEL_CONFIG")]
    config: Option<PathBuf>,

    /// Override the REST API listen port.
    #[arg(long)]
    api_port: Option<u16>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Validate the configuration file and exit without starting the server.
    #[arg(long)]
    check: bool,

    /// Skip database migrations on startup.
    #[arg(long)]
    no_migrate: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // ── Load configuration ─────────────────────────────────────
    let config_path = cli.config.unwrap_or_else(airhotel::default_config_path);

    let (mut config, load_error) = match AppConfig::load(&config_path) {
        Ok(cfg) => (cfg, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    if let Some(ref level) = cli.log_level {
        config.logging.level = level.clone();
    }
    init_tracing(&config);

    match load_error {
        None => info!("Configuration loaded from {}", config_path.display()),
        Some(e) => {
            error!("Failed to load config from {}: {}", config_path.display(), e);
            error!("Using default configuration.");
        }
    }

    // ── Apply CLI overrides ────────────────────────────────────
    if let Some(port) = cli.api_port {
        info!("CLI override: api_port = {}", port);
        config.server.api_port = port;
    }

    // ── Config validation mode ─────────────────────────────────
    if cli.check {
        config.validate()?;
        println!("✅ Configuration is valid");
        println!("   Config file : {}", config_path.display());
        println!("   API address : {}:{}", config.server.api_host, config.server.api_port);
        println!("   Database    : {}", config.database.url);
        println!("   Log level   : {}", config.logging.level);
        println!("   Currency    : {}", config.reservations.default_currency);
        return Ok(());
    }

    // ── Start server ───────────────────────────────────────────
    let handle = ServerHandle::start(ServerOptions {
        config,
        auto_migrate: !cli.no_migrate,
    })
    .await?;

    handle.install_signal_handler();

    info!("🚀 Press Ctrl+C to shutdown gracefully.");

    handle.shutdown_signal().wait().await;
    handle.wait().await;

    Ok(())
}
