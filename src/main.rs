//! SmartCurriculum - attendance and activity management dashboards
//!
//! A desktop front end with student, teacher, admin and attendance
//! dashboards rendered from a local data feed.

mod attendance;
mod config;
mod dashboard;
mod data;
mod shared;
mod storage;

use anyhow::Result;
use clap::Parser;
use parking_lot::RwLock;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;
use crate::dashboard::theme::ThemePreference;
use crate::dashboard::AppView;
use crate::data::MockData;
use crate::shared::SharedAppState;

/// SmartCurriculum - attendance and activity management
#[derive(Parser, Debug)]
#[command(name = "smart-curriculum")]
#[command(about = "Role-based dashboards for attendance and activity management")]
struct Args {
    /// Configuration file (defaults to config.toml in the config directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// JSON data feed replacing the bundled records
    #[arg(long)]
    data: Option<PathBuf>,

    /// Start in this theme (still persisted)
    #[arg(long, value_enum)]
    theme: Option<ThemePreference>,

    /// Dashboard to open from home
    #[arg(long, value_enum)]
    view: Option<AppView>,

    /// Attendance timer cadence in milliseconds
    #[arg(long)]
    tick_ms: Option<u64>,
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    info!("SmartCurriculum starting...");

    let mut config = load_or_create_config(args.config.as_deref());
    apply_overrides(&mut config, &args);

    let data = MockData::load_or_bundled(config.data.mock_data_path.as_deref())?;

    let mut state = SharedAppState::new(config, data);
    state.runtime.export_dir = match state.config.data.export_dir.clone() {
        Some(dir) => Some(dir),
        None => storage::get_data_dir()
            .map(|dir| dir.join("exports"))
            .map_err(|e| warn!("No data directory for exports: {}", e))
            .ok(),
    };
    let shared_state = Arc::new(RwLock::new(state));

    // Run the dashboard (blocking)
    if let Err(e) = dashboard::run_dashboard(shared_state, args.theme, args.view) {
        tracing::error!("Dashboard error: {}", e);
    }

    info!("SmartCurriculum shutdown complete");

    Ok(())
}

/// Load configuration from file or fall back to defaults
fn load_or_create_config(path: Option<&std::path::Path>) -> AppConfig {
    let config_path = match path {
        Some(path) => Some(path.to_path_buf()),
        None => storage::get_config_dir()
            .map(|dir| dir.join("config.toml"))
            .ok(),
    };

    let Some(config_path) = config_path else {
        info!("Using default configuration");
        return AppConfig::default();
    };

    if config_path.exists() {
        match config::load_config(&config_path) {
            Ok(config) => {
                info!("Loaded configuration from {:?}", config_path);
                return config;
            }
            Err(e) => warn!("Ignoring configuration at {:?}: {:#}", config_path, e),
        }
    } else if path.is_none() {
        // First run: leave an editable copy of the defaults behind
        match config::save_config(&AppConfig::default(), &config_path) {
            Ok(()) => info!("Wrote default configuration to {:?}", config_path),
            Err(e) => warn!("Could not write default configuration: {}", e),
        }
    }

    info!("Using default configuration");
    AppConfig::default()
}

/// Command-line values take precedence over the file
fn apply_overrides(config: &mut AppConfig, args: &Args) {
    if let Some(data) = &args.data {
        config.data.mock_data_path = Some(data.clone());
    }
    match args.tick_ms {
        Some(0) => warn!("Ignoring --tick-ms 0; the timer cadence must be positive"),
        Some(ms) => config.session.tick_interval_ms = ms,
        None => {}
    }
}
