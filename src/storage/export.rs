//! Session exports

use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::attendance::SessionSummary;

/// Write a session summary as pretty JSON into `dir`, returning the file path
pub fn export_session(summary: &SessionSummary, dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(format!("attendance_{}.json", summary.token));
    let content = serde_json::to_string_pretty(summary)?;
    std::fs::write(&path, content)?;
    Ok(path)
}

/// Load a previously exported summary
#[cfg(test)]
pub fn load_session(path: &Path) -> Result<SessionSummary> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attendance::{CheckIn, CheckInMethod};
    use tempfile::TempDir;

    fn summary() -> SessionSummary {
        SessionSummary {
            subject: "Database Systems".to_string(),
            token: "ATTEND_1700000000000_DatabaseSystems".to_string(),
            elapsed_seconds: 65,
            elapsed_display: "01:05".to_string(),
            check_ins: vec![CheckIn {
                student_id: "CS21B001".to_string(),
                method: CheckInMethod::QrCode,
                at_elapsed: 3,
            }],
        }
    }

    #[test]
    fn test_export_names_file_after_token() {
        let dir = TempDir::new().unwrap();
        let path = export_session(&summary(), dir.path()).unwrap();
        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "attendance_ATTEND_1700000000000_DatabaseSystems.json"
        );
        assert_eq!(load_session(&path).unwrap(), summary());
    }

    #[test]
    fn test_export_creates_directory() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("exports").join("2024");
        let path = export_session(&summary(), &nested).unwrap();
        assert!(path.starts_with(&nested));
        assert!(path.exists());
    }
}
