//! Cinelog CLI server
//!
//! Headless movie catalog service suitable for a systemd unit, a container
//! or a local demo.
//!
//! ```sh
//! # Run with default config (~/.config/cinelog/config.toml)
//! cinelog-server
//!
//! # Custom config path and port
//! cinelog-server --config /etc/cinelog/config.toml --port 9090
//!
//! # Fill an empty database with the demo catalog
//! cinelog-server --seed
//!
//! # Validate config without starting
//! cinelog-server --check
//! ```

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};

use cinelog::config::AppConfig;
use cinelog::server::{init_tracing, BoxError, ServerHandle, ServerOptions};

#[derive(Parser, Debug)]
#[command(
    name = "cinelog-server",
    version,
    about = "Movie catalog, reviews and watchlist service",
    long_about = "Cinelog REST API with Swagger docs and a hero carousel WebSocket.\n\n\
                  Default config: ~/.config/cinelog/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "CINELOG_CONFIG")]
    config: Option<PathBuf>,

    /// Override the HTTP listen port.
    #[arg(short, long)]
    port: Option<u16>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Validate the configuration file and exit without starting the server.
    #[arg(long)]
    check: bool,

    /// Skip database migrations on startup.
    #[arg(long)]
    no_migrate: bool,

    /// Insert the demo catalog if the movies table is empty.
    #[arg(long)]
    seed: bool,
}

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let cli = Cli::parse();

    let config_path = cli.config.unwrap_or_else(cinelog::default_config_path);

    let mut config = match AppConfig::load(&config_path) {
        Ok(mut cfg) => {
            if let Some(ref level) = cli.log_level {
                cfg.logging.level = level.clone();
            }
            init_tracing(&cfg);
            info!("Configuration loaded from {}", config_path.display());
            cfg
        }
        Err(e) if cli.check => {
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
        Err(e) => {
            tracing_subscriber::fmt()
                .with_env_filter(tracing_subscriber::EnvFilter::new(
                    cli.log_level.as_deref().unwrap_or("info"),
                ))
                .init();
            error!("Failed to load config from {}: {}", config_path.display(), e);
            error!("Using default configuration.");
            AppConfig::default()
        }
    };

    if let Some(port) = cli.port {
        info!("CLI override: port = {}", port);
        config.server.port = port;
    }

    if cli.check {
        println!("✅ Configuration is valid");
        println!("   Config file : {}", config_path.display());
        println!("   Address     : {}", config.server.address());
        println!("   Database    : {}", config.database.connection_url());
        println!("   Log level   : {}", config.logging.level);
        println!(
            "   Enrichment  : {}",
            if config.enrichment.api_key.is_some() {
                "perplexity"
            } else {
                "fallback list"
            }
        );
        println!(
            "   Carousel    : {} slides every {}ms",
            config.carousel.hero_size, config.carousel.interval_ms
        );
        return Ok(());
    }

    let handle = ServerHandle::start(ServerOptions {
        config,
        auto_migrate: !cli.no_migrate,
        seed_catalog: cli.seed,
    })
    .await?;

    handle.install_signal_handler();
    info!("🚀 Press Ctrl+C to shutdown gracefully.");

    handle.shutdown_signal().wait().await;
    handle.wait().await;

    Ok(())
}
