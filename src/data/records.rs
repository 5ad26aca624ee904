//! Typed records of the dashboard data feed

use serde::{Deserialize, Serialize};

use super::percentage;
use crate::dashboard::filter::Filterable;

/// Timetable status of a student's slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotStatus {
    Present,
    Free,
    Upcoming,
}

impl SlotStatus {
    pub fn name(&self) -> &'static str {
        match self {
            SlotStatus::Present => "Present",
            SlotStatus::Free => "Free Period",
            SlotStatus::Upcoming => "Upcoming",
        }
    }
}

/// Whether a student made it to class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceStatus {
    Present,
    Absent,
    Late,
}

impl AttendanceStatus {
    pub const ALL: [AttendanceStatus; 3] = [
        AttendanceStatus::Present,
        AttendanceStatus::Absent,
        AttendanceStatus::Late,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => "Present",
            AttendanceStatus::Absent => "Absent",
            AttendanceStatus::Late => "Late",
        }
    }
}

/// Progress of a scheduled class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassStatus {
    Completed,
    Ongoing,
    Upcoming,
}

impl ClassStatus {
    pub fn name(&self) -> &'static str {
        match self {
            ClassStatus::Completed => "Completed",
            ClassStatus::Ongoing => "Ongoing",
            ClassStatus::Upcoming => "Upcoming",
        }
    }
}

/// Operational state of an attendance method or classroom device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceStatus {
    Active,
    Inactive,
    Standby,
}

impl DeviceStatus {
    pub fn name(&self) -> &'static str {
        match self {
            DeviceStatus::Active => "Active",
            DeviceStatus::Inactive => "Inactive",
            DeviceStatus::Standby => "Standby",
        }
    }
}

/// Severity of an administrator alert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    Info,
    Success,
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// Home
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feature {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stakeholder {
    pub role: String,
    pub description: String,
    pub benefits: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HomeData {
    pub features: Vec<Feature>,
    pub stakeholders: Vec<Stakeholder>,
}

// ---------------------------------------------------------------------------
// Student
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentProfile {
    pub name: String,
    pub student_id: String,
    pub semester: String,
    pub course: String,
    pub attendance_percentage: u32,
    pub career_goal: String,
    pub interests: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleSlot {
    pub time: String,
    pub subject: String,
    pub room: Option<String>,
    pub status: SlotStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendedActivity {
    pub id: String,
    pub title: String,
    pub description: String,
    pub duration: String,
    pub category: String,
    pub difficulty: String,
    pub relevance_score: u32,
}

impl Filterable for RecommendedActivity {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.title.as_str(), self.description.as_str()]
    }

    fn category(&self) -> Option<&str> {
        Some(self.category.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Achievement {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressMetric {
    pub label: String,
    pub value: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentData {
    pub profile: StudentProfile,
    pub schedule: Vec<ScheduleSlot>,
    pub activities: Vec<RecommendedActivity>,
    pub achievements: Vec<Achievement>,
    pub progress: Vec<ProgressMetric>,
}

impl StudentData {
    /// Distinct activity categories in feed order
    pub fn activity_categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = Vec::new();
        for activity in &self.activities {
            if !categories.contains(&activity.category.as_str()) {
                categories.push(&activity.category);
            }
        }
        categories
    }
}

// ---------------------------------------------------------------------------
// Teacher
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeacherProfile {
    pub name: String,
    pub employee_id: String,
    pub department: String,
    pub subjects: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassSlot {
    pub code: String,
    pub time: String,
    pub subject: String,
    pub section: String,
    pub room: String,
    pub total_students: u32,
    pub present_students: u32,
    pub status: ClassStatus,
}

impl ClassSlot {
    /// Label used by the class selector, e.g. `CS301-Database Systems`
    pub fn label(&self) -> String {
        format!("{}-{}", self.code, self.subject)
    }

    pub fn attendance_rate(&self) -> u32 {
        percentage(self.present_students, self.total_students)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterEntry {
    pub id: String,
    pub name: String,
    pub status: AttendanceStatus,
    pub time: Option<String>,
}

impl Filterable for RosterEntry {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.id.as_str()]
    }

    fn category(&self) -> Option<&str> {
        Some(self.status.name())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignedActivity {
    pub id: String,
    pub title: String,
    pub description: String,
    pub assigned_to: u32,
    pub completed: u32,
    pub category: String,
}

impl AssignedActivity {
    pub fn completion_rate(&self) -> u32 {
        percentage(self.completed, self.assigned_to)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeacherData {
    pub profile: TeacherProfile,
    pub classes: Vec<ClassSlot>,
    pub roster: Vec<RosterEntry>,
    pub activities: Vec<AssignedActivity>,
}

// ---------------------------------------------------------------------------
// Admin
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemStats {
    pub total_students: u32,
    pub total_teachers: u32,
    pub active_sessions: u32,
    pub avg_attendance: f32,
    pub total_departments: u32,
    pub system_uptime: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Department {
    pub code: String,
    pub name: String,
    pub students: u32,
    pub teachers: u32,
    pub attendance: f32,
}

impl Filterable for Department {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.code.as_str()]
    }

    fn category(&self) -> Option<&str> {
        Some(self.code.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserAccount {
    pub name: String,
    pub role: String,
    /// Department code, matching [`Department::code`]
    pub department: String,
    pub status: String,
}

impl Filterable for UserAccount {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.role.as_str()]
    }

    fn category(&self) -> Option<&str> {
        Some(self.department.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecentActivity {
    pub time: String,
    pub action: String,
    pub user: String,
    pub kind: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemAlert {
    pub level: AlertLevel,
    pub message: String,
    pub time: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingApproval {
    pub kind: String,
    pub name: String,
    pub department: String,
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminData {
    pub stats: SystemStats,
    pub departments: Vec<Department>,
    pub users: Vec<UserAccount>,
    pub recent_activities: Vec<RecentActivity>,
    pub alerts: Vec<SystemAlert>,
    pub approvals: Vec<PendingApproval>,
}

impl AdminData {
    /// Department name for a code, falling back to the code itself
    pub fn department_name<'a>(&'a self, code: &'a str) -> &'a str {
        self.departments
            .iter()
            .find(|d| d.code == code)
            .map_or(code, |d| d.name.as_str())
    }
}

// ---------------------------------------------------------------------------
// Attendance
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MethodStat {
    pub id: String,
    pub name: String,
    pub description: String,
    pub status: DeviceStatus,
    pub count: u32,
    pub accuracy: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LiveRosterEntry {
    pub id: String,
    pub name: String,
    pub method: Option<String>,
    pub time: Option<String>,
    pub status: AttendanceStatus,
}

impl LiveRosterEntry {
    /// Initials shown in the roster avatar
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|part| part.chars().next())
            .collect()
    }
}

impl Filterable for LiveRosterEntry {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.id.as_str()]
    }

    fn category(&self) -> Option<&str> {
        Some(self.status.name())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassroomDevice {
    pub id: String,
    pub kind: String,
    pub room: String,
    pub status: DeviceStatus,
    pub last_update: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceData {
    pub methods: Vec<MethodStat>,
    pub roster: Vec<LiveRosterEntry>,
    pub devices: Vec<ClassroomDevice>,
    pub proximity_devices: u32,
}

impl AttendanceData {
    /// Total check-ins across all methods
    pub fn total_check_ins(&self) -> u32 {
        self.methods.iter().map(|m| m.count).sum()
    }

    /// Share of all check-ins recorded by one method
    pub fn method_share(&self, method: &MethodStat) -> u32 {
        percentage(method.count, self.total_check_ins())
    }
}
