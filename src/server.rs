//! Reusable server runtime.
//!
//! [`ServerHandle`] owns the whole lifecycle: database init, migrations,
//! optional catalog seeding, the REST API (with the hero socket), metrics
//! and graceful shutdown. Both binaries start the service through it.

use std::sync::{Arc, OnceLock};

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use tracing::{error, info, warn};

use crate::config::AppConfig;
use crate::domain::RepositoryProvider;
use crate::infrastructure::database::migrator::Migrator;
use crate::infrastructure::database::seed::seed_catalog;
use crate::infrastructure::{init_database, PerplexityClient, SeaOrmRepositoryProvider};
use crate::interfaces::http::{create_api_router, AppServices};
use crate::shared::shutdown::{ShutdownCoordinator, ShutdownSignal};

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Options for starting the service.
pub struct ServerOptions {
    pub config: AppConfig,
    /// Run database migrations on startup (default: true).
    pub auto_migrate: bool,
    /// Insert the demo catalog when the movies table is empty.
    pub seed_catalog: bool,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            auto_migrate: true,
            seed_catalog: false,
        }
    }
}

/// Handle to a running service.
///
/// ```rust,no_run
/// use cinelog::server::{ServerHandle, ServerOptions};
///
/// #[tokio::main]
/// async fn main() -> Result<(), cinelog::server::BoxError> {
///     let handle = ServerHandle::start(ServerOptions::default()).await?;
///     handle.install_signal_handler();
///     handle.shutdown_signal().wait().await;
///     handle.wait().await;
///     Ok(())
/// }
/// ```
pub struct ServerHandle {
    pub repos: Arc<dyn RepositoryProvider>,
    pub config: AppConfig,
    /// Port actually bound (differs from the config when it asked for 0).
    pub port: u16,

    db: DatabaseConnection,
    shutdown: ShutdownCoordinator,
    api_task: tokio::task::JoinHandle<()>,
}

impl ServerHandle {
    pub async fn start(opts: ServerOptions) -> Result<Self, BoxError> {
        let app_cfg = opts.config;
        info!("Starting Cinelog service...");

        let prometheus_handle = prometheus_handle()?;

        let db_config = app_cfg.database.to_database_config();
        let jwt_config = app_cfg.security.to_jwt_config();
        info!(
            "JWT configured with {}h token expiration",
            jwt_config.expiration_hours
        );

        let db = init_database(&db_config).await?;
        if opts.auto_migrate {
            info!("Running database migrations...");
            Migrator::up(&db, None).await?;
            info!("Migrations completed");
        }

        let repos: Arc<dyn RepositoryProvider> =
            Arc::new(SeaOrmRepositoryProvider::new(db.clone()));

        if opts.seed_catalog {
            seed_catalog(repos.movies()).await?;
        }

        let perplexity = PerplexityClient::new(app_cfg.enrichment.to_perplexity_config())?;
        if !perplexity.has_credential() {
            warn!("No Perplexity API key configured; OTT lookups will use the fallback list");
        }

        let services = AppServices::build(
            db.clone(),
            repos.clone(),
            jwt_config,
            Arc::new(perplexity),
            app_cfg.carousel.hero_size,
            app_cfg.carousel.interval(),
        )
        .with_metrics(prometheus_handle);

        let shutdown = ShutdownCoordinator::new(app_cfg.server.shutdown_timeout);
        let api_shutdown = shutdown.signal();

        let api_router = create_api_router(services);
        let api_addr = app_cfg.server.address();
        let listener = tokio::net::TcpListener::bind(&api_addr).await?;
        let port = listener.local_addr()?.port();
        info!("REST API server listening on http://{}", api_addr);
        info!("Swagger UI available at http://{}/docs/", api_addr);

        let api_server = axum::serve(listener, api_router).with_graceful_shutdown(async move {
            api_shutdown.wait().await;
            info!("🛑 REST API server received shutdown signal");
        });

        let api_task = tokio::spawn(async move {
            if let Err(e) = api_server.await {
                error!("REST API server error: {}", e);
            }
        });
        info!("🚀 Server started.");

        Ok(Self {
            repos,
            config: app_cfg,
            port,
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

    pub fn trigger_shutdown(&self) {
        self.shutdown.signal().trigger();
    }

    /// Wait for the server to stop after shutdown has been triggered,
    /// bounded by `server.shutdown_timeout`.
    pub async fn wait(self) {
        info!("⏳ Waiting for server tasks to complete...");
        let Self {
            db,
            shutdown,
            api_task,
            ..
        } = self;

        let finished = shutdown
            .shutdown_with_cleanup(async move {
                match api_task.await {
                    Ok(()) => info!("REST API server stopped"),
                    Err(e) => error!("REST API server task panicked: {}", e),
                }
            })
            .await;
        if !finished {
            warn!("Open connections were dropped at the shutdown deadline");
        }

        if let Err(e) = db.close().await {
            warn!("Error closing database connection: {}", e);
        } else {
            info!("✅ Database connection closed");
        }
        info!("👋 Cinelog shutdown complete");
    }

    /// Trigger shutdown and wait for completion.
    pub async fn shutdown(self) {
        info!("🛑 Shutting down Cinelog service...");
        self.trigger_shutdown();
        self.wait().await;
    }

    pub fn is_running(&self) -> bool {
        !self.api_task.is_finished()
    }
}

/// The global recorder can be installed once per process; later starts in
/// the same process reuse the first handle.
fn prometheus_handle() -> Result<PrometheusHandle, BoxError> {
    static PROM_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

    if let Some(handle) = PROM_HANDLE.get() {
        return Ok(handle.clone());
    }
    let handle = PrometheusBuilder::new().install_recorder()?;
    info!("📊 Prometheus metrics recorder installed");
    Ok(PROM_HANDLE.get_or_init(|| handle).clone())
}

/// Initialize tracing from the application config. `RUST_LOG` takes
/// precedence over `logging.level`.
///
/// Call this once at process startup (before [`ServerHandle::start`]).
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

#[cfg(test)]
mod tests {
    use super::*;

    fn memory_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.server.host = "127.0.0.1".into();
        config.server.port = 0;
        config.server.shutdown_timeout = 5;
        config.database.url = "sqlite::memory:".into();
        config.database.max_connections = 1;
        config
    }

    #[tokio::test]
    async fn starts_seeds_and_shuts_down() {
        let handle = ServerHandle::start(ServerOptions {
            config: memory_config(),
            auto_migrate: true,
            seed_catalog: true,
        })
        .await
        .unwrap();

        assert!(handle.port > 0);
        assert!(handle.is_running());
        let window = crate::shared::PageRequest::new(1, 10).unwrap().window();
        let (movies, total) = handle
            .repos
            .movies()
            .query(&Default::default(), None, Default::default(), window)
            .await
            .unwrap();
        assert!(!movies.is_empty());
        assert!(total >= movies.len() as u64);

        handle.shutdown().await;
    }
}
