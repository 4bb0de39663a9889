//! Hotel service, CLI server
//!
//! ```sh
//! # Run with default config (~/.config/hotel-service/config.toml)
//! hotel-service
//!
//! # Custom config path and port
//! hotel-service --config /etc/hotel-service/config.toml --port 9000
//!
//! # Validate config without starting
//! hotel-service --check
//! ```

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};

use hotel_service::config::AppConfig;
use hotel_service::server::{init_tracing, ServerHandle, ServerOptions};

/// Hotel management REST API.
#[derive(Parser, Debug)]
#[command(
    name = "hotel-service",
    version,
    about = "Hotel management backend: rooms, bookings, payments and staff",
    long_about = "REST API server for running a hotel front desk.\n\n\
                  Default config: ~/.config/hotel-service/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "HOTEL_CONFIG")]
    config: Option<PathBuf>,

    /// Override the listen port.
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

    /// Skip creating the default admin user.
    #[arg(long)]
    no_admin: bool,

    /// Load demo hotel data when the database is empty.
    #[arg(long)]
    seed: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config_path = cli
        .config
        .unwrap_or_else(hotel_service::default_config_path);

    let loaded = AppConfig::load(&config_path).map(AppConfig::with_env_overrides);
    let mut config = match loaded {
        Ok(cfg) => cfg,
        Err(e) if cli.check => {
            eprintln!("❌ {}: {}", config_path.display(), e);
            std::process::exit(1);
        }
        Err(e) => {
            let cfg = AppConfig::default().with_env_overrides();
            init_tracing(&cfg.logging);
            error!("Failed to load config from {}: {}", config_path.display(), e);
            error!("Using default configuration.");
            cfg
        }
    };

    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }

    if cli.check {
        if let Err(e) = config.validate() {
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
        println!("✅ Configuration is valid");
        println!("   Config file : {}", config_path.display());
        println!("   Address     : {}", config.bind_address());
        println!("   Database    : {}", config.database.url);
        println!("   Currency    : {}", config.app.currency);
        println!("   Log level   : {}", config.logging.level);
        return Ok(());
    }

    init_tracing(&config.logging);
    info!("Configuration loaded from {}", config_path.display());

    let handle = ServerHandle::start(ServerOptions {
        config,
        auto_migrate: !cli.no_migrate,
        create_default_admin: !cli.no_admin,
        seed: cli.seed,
    })
    .await?;

    handle.install_signal_handler();
    info!("🚀 Press Ctrl+C to shutdown gracefully.");

    handle.shutdown_signal().wait().await;
    handle.wait().await;

    Ok(())
}
