//! Application Configuration
//!
//! User settings stored in TOML format. Every section has defaults so a
//! partial file is still valid.

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Application settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Window geometry
    pub window: WindowConfig,
    /// Theme persistence settings
    pub theme: ThemeConfig,
    /// Live attendance session settings
    pub session: SessionConfig,
    /// Data feed settings
    pub data: DataConfig,
}

impl AppConfig {
    /// Reject values the dashboard cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.session.tick_interval_ms == 0 {
            bail!("session.tick_interval_ms must be greater than zero");
        }
        if self.session.expected_students == 0 {
            bail!("session.expected_students must be greater than zero");
        }
        if self.theme.storage_key.trim().is_empty() {
            bail!("theme.storage_key must not be empty");
        }
        Ok(())
    }
}

/// Dashboard window geometry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
    pub min_width: f32,
    pub min_height: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 780.0,
            min_width: 900.0,
            min_height: 560.0,
        }
    }
}

/// Theme persistence settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Preference key holding "light" or "dark"
    pub storage_key: String,
    /// Use the platform color scheme when nothing is stored
    pub follow_system: bool,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            storage_key: "theme".to_string(),
            follow_system: true,
        }
    }
}

/// Live attendance session settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Interval between elapsed-counter increments. Bounds repaint
    /// frequency; it is not a wall-clock guarantee.
    pub tick_interval_ms: u64,
    /// Subject label, also embedded in session tokens
    pub subject: String,
    pub section: String,
    pub room: String,
    pub teacher: String,
    pub start_time: String,
    pub end_time: String,
    pub expected_students: u32,
    pub checked_in: u32,
}

impl SessionConfig {
    /// Timer cadence as a duration
    pub fn cadence(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.max(1))
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 5000,
            subject: "Database Systems".to_string(),
            section: "CS-A".to_string(),
            room: "CS-102".to_string(),
            teacher: "Dr. Sarah Williams".to_string(),
            start_time: "09:00".to_string(),
            end_time: "10:00".to_string(),
            expected_students: 42,
            checked_in: 38,
        }
    }
}

/// Data feed settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// JSON feed replacing the bundled mock records
    pub mock_data_path: Option<PathBuf>,
    /// Where session exports are written (defaults to the data directory)
    pub export_dir: Option<PathBuf>,
}

/// Load configuration from file
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: AppConfig = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

/// Save configuration to file
pub fn save_config(config: &AppConfig, path: &Path) -> Result<()> {
    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_app_config() {
        let config = AppConfig::default();

        assert_eq!(config.theme.storage_key, "theme");
        assert!(config.theme.follow_system);

        assert_eq!(config.session.tick_interval_ms, 5000);
        assert_eq!(config.session.cadence(), Duration::from_secs(5));
        assert_eq!(config.session.subject, "Database Systems");
        assert_eq!(config.session.expected_students, 42);

        assert!(config.data.mock_data_path.is_none());
        assert!(config.data.export_dir.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_save_and_load_config() {
        let mut config = AppConfig::default();
        config.session.tick_interval_ms = 1000;
        config.session.subject = "Operating Systems".to_string();
        config.data.export_dir = Some(PathBuf::from("/tmp/exports"));

        let temp_file = NamedTempFile::new().unwrap();
        save_config(&config, temp_file.path()).unwrap();
        let loaded = load_config(temp_file.path()).unwrap();

        assert_eq!(loaded.session.tick_interval_ms, 1000);
        assert_eq!(loaded.session.subject, "Operating Systems");
        assert_eq!(loaded.data.export_dir, Some(PathBuf::from("/tmp/exports")));
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "[session]\ntick_interval_ms = 250").unwrap();

        let loaded = load_config(temp_file.path()).unwrap();
        assert_eq!(loaded.session.tick_interval_ms, 250);
        assert_eq!(loaded.session.room, "CS-102");
        assert_eq!(loaded.theme.storage_key, "theme");
        assert!((loaded.window.width - 1200.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_zero_tick_interval_rejected() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "[session]\ntick_interval_ms = 0").unwrap();

        assert!(load_config(temp_file.path()).is_err());
    }

    #[test]
    fn test_empty_storage_key_rejected() {
        let mut config = AppConfig::default();
        config.theme.storage_key = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_config_file_not_found() {
        let result = load_config(Path::new("/nonexistent/path/config.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_invalid_toml() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "this is not valid toml {{{{").unwrap();

        let result = load_config(temp_file.path());
        assert!(result.is_err());
    }
}
