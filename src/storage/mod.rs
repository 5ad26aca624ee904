//! Storage Layer
//!
//! Resolves per-user directories and persists small key-value preferences
//! and session exports.

pub mod export;
pub mod preferences;

use anyhow::Result;
use std::path::PathBuf;

pub use export::export_session;
pub use preferences::{FilePreferenceStore, MemoryPreferenceStore, PreferenceStore};

fn project_dirs() -> Result<directories::ProjectDirs> {
    directories::ProjectDirs::from("com", "smartcurriculum", "SmartCurriculum")
        .ok_or_else(|| anyhow::anyhow!("Could not determine home directory"))
}

/// Get the application data directory
pub fn get_data_dir() -> Result<PathBuf> {
    let data_dir = project_dirs()?.data_dir().to_path_buf();
    std::fs::create_dir_all(&data_dir)?;

    Ok(data_dir)
}

/// Get the configuration directory
pub fn get_config_dir() -> Result<PathBuf> {
    let config_dir = project_dirs()?.config_dir().to_path_buf();
    std::fs::create_dir_all(&config_dir)?;

    Ok(config_dir)
}
