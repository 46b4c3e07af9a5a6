//! Reusable reservation service runtime.
//!
//! [`ServerHandle`] owns the full lifecycle: database init, migrations,
//! REST API, the no-show sweep, metrics and graceful shutdown. The CLI
//! binary and the root binary both start the service through it.

use std::sync::{Arc, OnceLock};

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use tracing::{error, info, warn};

use crate::application::reservations::start_no_show_task;
use crate::application::ReservationOrchestrator;
use crate::config::AppConfig;
use crate::domain::RepositoryProvider;
use crate::infrastructure::crypto::jwt::JwtConfig;
use crate::infrastructure::database::migrator::Migrator;
use crate::infrastructure::{init_database, DatabaseConfig, SeaOrmRepositoryProvider};
use crate::interfaces::http::{create_api_router, ApiState};
use crate::shared::shutdown::{ShutdownCoordinator, ShutdownSignal};

// ── Options ────────────────────────────────────────────────────────

pub struct ServerOptions {
    pub config: AppConfig,
    /// Run database migrations on startup (default: true).
    pub auto_migrate: bool,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            auto_migrate: true,
        }
    }
}

// ── ServerHandle ───────────────────────────────────────────────────

/// Handle to a running reservation service.
///
/// ```rust,no_run
/// use airhotel::server::{ServerHandle, ServerOptions};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let handle = ServerHandle::start(ServerOptions::default()).await?;
///     handle.shutdown().await;
///     Ok(())
/// }
/// ```
pub struct ServerHandle {
    pub repos: Arc<dyn RepositoryProvider>,
    pub orchestrator: Arc<ReservationOrchestrator>,
    /// The configuration the server was started with.
    pub config: AppConfig,
    pub api_port: u16,

    db: DatabaseConnection,
    shutdown: ShutdownCoordinator,
    api_task: tokio::task::JoinHandle<()>,
}

impl ServerHandle {
    /// Start the service:
    /// 1. Install the Prometheus recorder
    /// 2. Connect to the database and run migrations
    /// 3. Start the no-show sweep (when enabled)
    /// 4. Start the REST API (with Swagger UI)
    pub async fn start(opts: ServerOptions) -> Result<Self, Box<dyn std::error::Error>> {
        let app_cfg = opts.config;
        app_cfg.validate()?;

        info!("Starting AirHotel reservation service...");

        let prometheus_handle = prometheus_handle()?;
        info!("📊 Prometheus metrics recorder ready");

        let db_config = DatabaseConfig::new(app_cfg.database.url.clone());
        let jwt_config = JwtConfig::new(
            app_cfg.security.jwt_secret.clone(),
            app_cfg.security.jwt_expiration_hours,
        );
        info!(
            "JWT configured with {}h token expiration",
            jwt_config.expiration_hours
        );

        // ── Database ───────────────────────────────────────────
        let db = init_database(&db_config).await?;

        if opts.auto_migrate {
            info!("Running database migrations...");
            Migrator::up(&db, None).await?;
            info!("Migrations completed");
        }

        // ── Repositories & Services ────────────────────────────
        let repos: Arc<dyn RepositoryProvider> =
            Arc::new(SeaOrmRepositoryProvider::new(db.clone()));
        let orchestrator = Arc::new(
            ReservationOrchestrator::new(
                repos.clone(),
                app_cfg.reservations.default_currency.clone(),
            )
            .with_max_stay_nights(app_cfg.reservations.max_stay_nights),
        );

        // ── Shutdown coordinator ───────────────────────────────
        let shutdown = ShutdownCoordinator::new(app_cfg.server.shutdown_timeout);
        let shutdown_signal = shutdown.signal();

        // ── Background tasks ───────────────────────────────────
        if app_cfg.reservations.no_show_sweep_enabled {
            start_no_show_task(
                repos.clone(),
                orchestrator.clone(),
                shutdown_signal.clone(),
                app_cfg.reservations.no_show_sweep_interval_secs,
                app_cfg.reservations.no_show_grace_days,
            );
        } else {
            info!("No-show sweep disabled");
        }

        // ── REST API server ────────────────────────────────────
        let state = ApiState::new(
            repos.clone(),
            orchestrator.clone(),
            jwt_config,
            Some(db.clone()),
            prometheus_handle,
        );
        let api_router = create_api_router(state);

        let api_port = app_cfg.server.api_port;
        let api_addr = format!("{}:{}", app_cfg.server.api_host, api_port);
        let listener = tokio::net::TcpListener::bind(&api_addr).await?;
        info!("REST API server listening on http://{}", api_addr);
        info!("Swagger UI available at http://{}/docs/", api_addr);

        let api_shutdown = shutdown_signal.clone();
        let api_server = axum::serve(listener, api_router).with_graceful_shutdown(async move {
            api_shutdown.wait().await;
            info!("🛑 REST API server received shutdown signal");
        });

        let api_task = tokio::spawn(async move {
            if let Err(e) = api_server.await {
                error!("REST API server error: {}", e);
            }
        });

        info!("🚀 Reservation service started.");

        Ok(Self {
            repos,
            orchestrator,
            config: app_cfg,
            api_port,
            db,
            shutdown,
            api_task,
        })
    }

    pub fn shutdown_signal(&self) -> ShutdownSignal {
        self.shutdown.signal()
    }

    /// Install OS signal listeners (SIGTERM, SIGINT) that trigger shutdown.
    pub fn install_signal_handler(&self) {
        self.shutdown.start_signal_listener();
    }

    /// Trigger graceful shutdown (non-blocking).
    pub fn trigger_shutdown(&self) {
        self.shutdown.signal().trigger();
    }

    /// Wait for the server to stop after shutdown has been triggered.
    ///
    /// Gives the API `shutdown_timeout` seconds to drain before giving up.
    pub async fn wait(self) {
        let Self {
            db,
            shutdown,
            api_task,
            ..
        } = self;
        info!("⏳ Waiting for server tasks to complete...");

        let drained = shutdown
            .shutdown_with_cleanup(|| async move {
                match api_task.await {
                    Ok(()) => info!("REST API server stopped"),
                    Err(e) => error!("REST API server task panicked: {}", e),
                }
            })
            .await;
        if !drained {
            warn!("REST API server abandoned with requests in flight");
        }

        if let Err(e) = db.close().await {
            warn!("Error closing database connection: {}", e);
        } else {
            info!("✅ Database connection closed");
        }

        info!("👋 AirHotel shutdown complete");
    }

    /// Trigger shutdown and wait for completion.
    pub async fn shutdown(self) {
        info!("🛑 Shutting down reservation service...");
        self.trigger_shutdown();
        self.wait().await;
    }
}

// ── Helpers ────────────────────────────────────────────────────────

/// The global recorder can only be installed once per process; a restart
/// in the same process reuses it.
fn prometheus_handle() -> Result<PrometheusHandle, BuildError> {
    static PROM_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

    if let Some(handle) = PROM_HANDLE.get() {
        return Ok(handle.clone());
    }
    let handle = PrometheusBuilder::new().install_recorder()?;
    info!("📊 Prometheus metrics recorder installed");
    Ok(PROM_HANDLE.get_or_init(|| handle).clone())
}

/// Initialize tracing from the application config. `RUST_LOG` wins over
/// `logging.level`.
///
/// Call once at process startup, before [`ServerHandle::start`].
pub fn init_tracing(config: &AppConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    match config.logging.format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }
}
