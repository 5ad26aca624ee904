//! Shared application state

use std::path::PathBuf;

use crate::config::AppConfig;
use crate::data::MockData;

/// Configuration and data every view reads
#[derive(Debug, Clone)]
pub struct SharedAppState {
    /// Application configuration
    pub config: AppConfig,
    /// Records the dashboards render
    pub data: MockData,
    /// Runtime state (not persisted)
    pub runtime: RuntimeState,
}

impl SharedAppState {
    /// Create a new shared state with the given configuration and feed
    pub fn new(config: AppConfig, data: MockData) -> Self {
        Self {
            config,
            data,
            runtime: RuntimeState::default(),
        }
    }
}

/// Runtime state that is not persisted
#[derive(Debug, Clone, Default)]
pub struct RuntimeState {
    /// Directory session exports go to
    pub export_dir: Option<PathBuf>,
    /// Last exported file
    pub last_export: Option<PathBuf>,
    /// Last error message (if any)
    pub last_error: Option<String>,
}

impl RuntimeState {
    /// Clear any error state
    pub fn clear_error(&mut self) {
        self.last_error = None;
    }

    /// Set an error message
    pub fn set_error(&mut self, error: impl Into<String>) {
        self.last_error = Some(error.into());
    }

    /// Remember a successful export, clearing any earlier failure
    pub fn record_export(&mut self, path: PathBuf) {
        self.clear_error();
        self.last_export = Some(path);
    }

    /// File name of the last export, for display
    pub fn last_export_name(&self) -> Option<String> {
        let path = self.last_export.as_ref()?;
        let name = path.file_name().unwrap_or(path.as_os_str());
        Some(name.to_string_lossy().into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_export_clears_error() {
        let mut runtime = RuntimeState::default();
        assert_eq!(runtime.last_export_name(), None);

        runtime.set_error("Export failed: disk full");
        runtime.record_export(PathBuf::from("/tmp/exports/attendance_ATTEND_1_DB.json"));
        assert_eq!(runtime.last_error, None);
        assert_eq!(
            runtime.last_export_name().as_deref(),
            Some("attendance_ATTEND_1_DB.json")
        );
    }
}
