// Standard library
use std::path::PathBuf;

// 3rd party crates
use tokio::signal::ctrl_c;
use tokio::sync::broadcast;
use tracing::{error, info};
use tracing_subscriber::{filter::LevelFilter, EnvFilter};

// Project modules
mod functions;

// Project imports
use crpt_client::settings::ConfigManager;

/// Main entry point for the documents client.
///
/// Usage: `crpt-client <document.json>...`
///
/// Each file holds one document. All documents are submitted concurrently,
/// throttled by the configured rate limit.
#[tokio::main]
async fn main() {
    // loads the .env file from the current directory or parents.
    dotenvy::dotenv_override().ok();

    let config: ConfigManager = ConfigManager::new().expect("Failed to initialize configuration");

    // setup logging.
    let log_level: String = config.get_log_level();

    let filter: EnvFilter = EnvFilter::builder()
        .with_default_directive(LevelFilter::ERROR.into())
        .parse_lossy(log_level)
        .add_directive("hyper_util=error".parse().unwrap())
        .add_directive("reqwest=error".parse().unwrap())
        .add_directive("hyper=error".parse().unwrap());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_level(true)
        .init();

    info!("⚙️ Settings have been loaded from {:?}.", config.config_path);

    let paths: Vec<PathBuf> = std::env::args().skip(1).map(PathBuf::from).collect();
    if paths.is_empty() {
        error!("Usage: crpt-client <document.json>...");
        std::process::exit(2);
    }

    // Create a broadcast channel for shutdown signal
    let (shutdown_tx, shutdown_rx) = broadcast::channel(1);

    // Handle Ctrl+C
    tokio::spawn(async move {
        if let Err(e) = ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            return;
        }
        info!("Received shutdown signal, initiating graceful shutdown...");
        let _ = shutdown_tx.send(());
    });

    if let Err(e) = functions::run(&config, &paths, shutdown_rx).await {
        error!("Application error: {}", e);
        std::process::exit(1);
    }

    info!("Shutdown complete.");
}
