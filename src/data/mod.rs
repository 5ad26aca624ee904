//! Dashboard data feed
//!
//! The dashboards render static records supplied as a JSON feed. A copy is
//! bundled into the binary; a file on disk can replace it.

pub mod records;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};

pub use records::*;

const BUNDLED_FEED: &str = include_str!("../../assets/mock_data.json");

/// Every record set the dashboards read
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MockData {
    pub home: HomeData,
    pub student: StudentData,
    pub teacher: TeacherData,
    pub admin: AdminData,
    pub attendance: AttendanceData,
}

impl MockData {
    /// The feed compiled into the binary
    pub fn bundled() -> Result<Self> {
        serde_json::from_str(BUNDLED_FEED).context("bundled data feed is malformed")
    }

    /// Load a feed from disk
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading data feed {:?}", path))?;
        serde_json::from_str(&content).with_context(|| format!("parsing data feed {:?}", path))
    }

    /// Load `path` when given, falling back to the bundled feed when it is
    /// absent or unusable
    pub fn load_or_bundled(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            match Self::load(path) {
                Ok(data) => {
                    info!("Loaded data feed from {:?}", path);
                    return Ok(data);
                }
                Err(e) => warn!("Falling back to bundled data feed: {:#}", e),
            }
        }
        Self::bundled()
    }
}

/// `part` as a whole-number percentage of `whole`; zero when `whole` is zero
pub fn percentage(part: u32, whole: u32) -> u32 {
    if whole == 0 {
        return 0;
    }
    ((part as f64 / whole as f64) * 100.0).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_bundled_feed_parses() {
        let data = MockData::bundled().unwrap();
        assert_eq!(data.student.profile.student_id, "CS21B047");
        assert_eq!(data.teacher.roster.len(), 8);
        assert_eq!(data.admin.departments.len(), 6);
        assert_eq!(data.attendance.methods.len(), 3);
        assert_eq!(data.home.features.len(), 4);
    }

    #[test]
    fn test_percentage() {
        assert_eq!(percentage(38, 42), 90);
        assert_eq!(percentage(42, 45), 93);
        assert_eq!(percentage(0, 48), 0);
        assert_eq!(percentage(5, 0), 0);
        assert_eq!(percentage(1, 8), 13);
    }

    #[test]
    fn test_derived_rates() {
        let data = MockData::bundled().unwrap();
        let first_class = &data.teacher.classes[0];
        assert_eq!(first_class.attendance_rate(), 93);
        assert_eq!(first_class.label(), "CS301-Database Systems");

        let reading = data
            .teacher
            .activities
            .iter()
            .find(|a| a.category == "Reading")
            .unwrap();
        assert_eq!(reading.completion_rate(), 84);

        assert_eq!(data.attendance.total_check_ins(), 38);
        let qr = &data.attendance.methods[0];
        assert_eq!(data.attendance.method_share(qr), 74);
    }

    #[test]
    fn test_activity_categories_are_distinct() {
        let data = MockData::bundled().unwrap();
        let categories = data.student.activity_categories();
        assert_eq!(
            categories,
            vec!["Programming", "Web Development", "Career Development", "AI/ML"]
        );
    }

    #[test]
    fn test_department_name_lookup() {
        let data = MockData::bundled().unwrap();
        assert_eq!(data.admin.department_name("cs"), "Computer Science");
        assert_eq!(data.admin.department_name("zz"), "zz");
    }

    #[test]
    fn test_initials() {
        let data = MockData::bundled().unwrap();
        assert_eq!(data.attendance.roster[0].initials(), "AJ");
    }

    #[test]
    fn test_broken_override_falls_back() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "{{\"home\": 42}}").unwrap();

        assert!(MockData::load(temp_file.path()).is_err());
        let data = MockData::load_or_bundled(Some(temp_file.path())).unwrap();
        assert_eq!(data.student.profile.name, "Alex Johnson");
    }

    #[test]
    fn test_override_replaces_bundled() {
        let mut data = MockData::bundled().unwrap();
        data.student.profile.name = "Priya Raman".to_string();

        let temp_file = NamedTempFile::new().unwrap();
        std::fs::write(temp_file.path(), serde_json::to_string(&data).unwrap()).unwrap();

        let loaded = MockData::load_or_bundled(Some(temp_file.path())).unwrap();
        assert_eq!(loaded.student.profile.name, "Priya Raman");
    }
}
