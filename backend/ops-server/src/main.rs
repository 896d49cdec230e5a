use ops_hub::{AppState, EventHub, ShutdownCoordinator};
use ops_server::{build_router, build_validator, hub_config, logger};

use std::error::Error;
use std::time::Duration;

use log::{error, info, warn};
use metrics_exporter_prometheus::PrometheusBuilder;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenvy::dotenv().ok();

    // Load and validate configuration
    let config = ops_config::Config::load()?;
    config.validate()?;
    let config_dir = ops_config::Config::config_dir()?;

    let log_file_path: Option<std::path::PathBuf> = if let Some(ref filename) = config.logging.file
    {
        let log_dir = config_dir.join(&config.logging.dir);
        std::fs::create_dir_all(&log_dir)?;
        Some(log_dir.join(filename))
    } else {
        None
    };

    // Initialize logger (before any other logging)
    logger::initialize(config.logging.level, log_file_path, config.logging.colored)?;

    info!("Starting ops-server v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    let metrics_handle = match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => Some(handle),
        Err(e) => {
            warn!("Prometheus recorder not installed, /metrics disabled: {e}");
            None
        }
    };

    let validator = build_validator(&config.auth, &config_dir)?;
    let hub = EventHub::start(hub_config(&config.event_stream));
    let shutdown = ShutdownCoordinator::new();

    let app_state = AppState {
        hub: hub.clone(),
        validator,
        shutdown: shutdown.clone(),
    };

    let app = build_router(
        app_state,
        metrics_handle,
        Duration::from_secs(config.server.request_timeout_secs),
    );

    let listener = TcpListener::bind(config.bind_addr()).await?;
    info!("Server listening on {}", listener.local_addr()?);

    // Spawn signal handler for graceful shutdown
    let shutdown_for_signal = shutdown.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Received SIGINT (Ctrl+C), initiating graceful shutdown");
                shutdown_for_signal.shutdown();
            }
            Err(e) => {
                error!("Failed to listen for SIGINT: {}", e);
            }
        }
    });

    // Streams only end once the hub closes their mailboxes, so stop it
    // before axum waits for open connections.
    let mut shutdown_guard = shutdown.subscribe_guard();
    info!("Server ready to accept connections");
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_guard.wait().await;
            hub.stop().await;
        })
        .await?;

    info!("Graceful shutdown complete");
    Ok(())
}
