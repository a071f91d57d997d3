//! Cinelog service binary.
//!
//! Reads configuration from TOML (`$CINELOG_CONFIG` or
//! `~/.config/cinelog/config.toml`). The `cli` crate offers the same
//! server with command-line overrides.

use tracing::{error, info};

use cinelog::config::{default_config_path, AppConfig};
use cinelog::server::{init_tracing, BoxError, ServerHandle, ServerOptions};

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let config_path = default_config_path();
    let config = match AppConfig::load(&config_path) {
        Ok(cfg) => {
            init_tracing(&cfg);
            info!("Configuration loaded from {}", config_path.display());
            cfg
        }
        Err(e) => {
            tracing_subscriber::fmt()
                .with_env_filter(tracing_subscriber::EnvFilter::new("info"))
                .init();
            error!("Failed to load config: {}. Using defaults.", e);
            AppConfig::default()
        }
    };

    let handle = ServerHandle::start(ServerOptions {
        config,
        ..Default::default()
    })
    .await?;
    handle.install_signal_handler();
    info!("🚀 Press Ctrl+C to shutdown gracefully.");

    handle.shutdown_signal().wait().await;
    handle.wait().await;
    Ok(())
}
