pub mod catalog;    // Field catalog: code -> slot/class/scale/label
pub mod channels;   // Inter-component communication channels
pub mod config;     // Configuration management
pub mod coordinator; // Poll-and-decode cycle
pub mod dashboard;  // Dashticz CONFIG.js generation
pub mod decoder;    // Raw value decoding
pub mod domoticz;   // Domoticz device sink
pub mod error;      // Error handling macros
pub mod labels;     // Status label tables
pub mod options;    // Command line options parsing
pub mod prelude;    // Common imports and types
pub mod scheduler;  // Poll scheduling
pub mod xtend;      // Xtend indoor unit HTTP client

const CARGO_PKG_VERSION: &str = env!("CARGO_PKG_VERSION");

use crate::prelude::*;
use crate::coordinator::Coordinator;
use crate::dashboard::Dashboard;
use crate::domoticz::Domoticz;
use crate::scheduler::Scheduler;
use std::sync::Arc;

/// Holds the long-running components for coordinated shutdown.
#[derive(Clone)]
pub struct Components {
    pub coordinator: Arc<Coordinator>,
    pub domoticz: Arc<Domoticz>,
}

impl Components {
    /// Stops the components in order: the coordinator first so no new
    /// readings are produced, then the sink once its queue drains.
    pub fn stop(&self) {
        info!("Stopping all components...");
        self.coordinator.stop();
        self.domoticz.stop();
    }
}

/// Main application entry point: wires up the catalog, channels and
/// component tasks, then waits for the shutdown signal.
pub async fn app(mut shutdown_rx: broadcast::Receiver<()>) -> Result<()> {
    let options = Options::new();

    let config = ConfigWrapper::new(options.config_file.clone()).map_err(|err| {
        eprintln!("Failed to load config {}: {:?}", options.config_file, err);
        err
    })?;

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.loglevel()),
    )
    .format(|buf, record| {
        writeln!(
            buf,
            "[{} {} {}] {}",
            chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f"),
            record.level(),
            record.module_path().unwrap_or(""),
            record.args()
        )
    })
    .write_style(env_logger::WriteStyle::Never)
    .init();

    info!(
        "Starting xtend-bridge {} with config file: {}",
        CARGO_PKG_VERSION, options.config_file
    );
    config.log_summary();

    let catalog = Catalog::new();
    info!("Field catalog loaded: {} entries", catalog.len());
    for field in catalog.iter() {
        debug!("  slot {:>2} {} ({})", field.slot, field.label, field.code);
    }

    let channels = Channels::new();

    info!("Initializing components...");

    info!("  Creating Domoticz sink...");
    let domoticz = Domoticz::new(config.clone(), channels.clone(), catalog.clone())?;
    let domoticz_clone = domoticz.clone();
    let domoticz_handle = tokio::spawn(async move {
        if let Err(e) = domoticz_clone.start().await {
            error!("Domoticz task failed: {}", e);
        }
    });

    info!("  Creating Coordinator...");
    let coordinator = Coordinator::new(&config, channels.clone(), catalog.clone())?;
    let coordinator_clone = coordinator.clone();
    let coordinator_handle = tokio::spawn(async move {
        if let Err(e) = coordinator_clone.start().await {
            error!("Coordinator task failed: {}", e);
        }
    });

    info!("  Creating Scheduler...");
    let scheduler = Scheduler::new(config.clone(), channels.clone());
    let scheduler_handle = tokio::spawn(async move {
        if let Err(e) = scheduler.start().await {
            error!("Scheduler task failed: {}", e);
        }
    });

    // the dashboard layout is static, emit it once at startup
    let dashboard = Dashboard::new(config.clone(), catalog.clone());
    if let Err(e) = dashboard.write() {
        error!("Dashboard generation failed: {}", e);
    }

    let components = Components {
        coordinator: Arc::new(coordinator),
        domoticz: Arc::new(domoticz),
    };

    info!("Waiting for shutdown signal...");
    let _ = shutdown_rx.recv().await;

    info!("Shutdown signal received, stopping components...");
    components.stop();

    if let Err(e) = coordinator_handle.await {
        error!("Error waiting for coordinator task: {}", e);
    }
    if let Err(e) = scheduler_handle.await {
        error!("Error waiting for scheduler task: {}", e);
    }
    if let Err(e) = domoticz_handle.await {
        error!("Error waiting for domoticz task: {}", e);
    }

    info!("Shutdown complete");
    Ok(())
}
