//! Dashboard view state management

use tracing::debug;

use crate::attendance::{AttendanceSession, CheckInMethod};
use crate::config::SessionConfig;
use crate::dashboard::filter::CategoryFilter;
use crate::dashboard::theme::{Palette, ThemePreference};
use crate::data::{AttendanceStatus, MockData};
use crate::shared::UiCommand;

/// Top-level screen selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum AppView {
    #[default]
    Home,
    Student,
    Teacher,
    Admin,
    Attendance,
}

impl AppView {
    /// The dashboards reachable from home
    pub const DASHBOARDS: [AppView; 4] = [
        AppView::Student,
        AppView::Teacher,
        AppView::Admin,
        AppView::Attendance,
    ];

    /// Get the display name for this view
    pub fn name(&self) -> &'static str {
        match self {
            AppView::Home => "Home",
            AppView::Student => "Student Dashboard",
            AppView::Teacher => "Teacher Dashboard",
            AppView::Admin => "Admin Dashboard",
            AppView::Attendance => "Attendance System",
        }
    }

    /// Get the icon character for this view
    pub fn icon(&self) -> &'static str {
        match self {
            AppView::Home => "H",
            AppView::Student => "S",
            AppView::Teacher => "T",
            AppView::Admin => "A",
            AppView::Attendance => "Q",
        }
    }

    pub fn is_home(&self) -> bool {
        matches!(self, AppView::Home)
    }
}

/// Holds the current [`AppView`]. Home is the hub: dashboards are entered
/// from it and every dashboard leads back to it.
#[derive(Debug, Default)]
pub struct ViewRouter {
    current: AppView,
}

impl ViewRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> AppView {
        self.current
    }

    /// Switch to `view`, returning the view that was left
    pub fn navigate(&mut self, view: AppView) -> AppView {
        let previous = std::mem::replace(&mut self.current, view);
        if previous != view {
            debug!("Navigated from {:?} to {:?}", previous, view);
        }
        previous
    }

    /// Return to the hub
    pub fn go_home(&mut self) -> AppView {
        self.navigate(AppView::Home)
    }
}

/// Read-only facts a view renders with, plus the command queue it uses to
/// ask the root for changes
#[derive(Debug)]
pub struct ViewContext {
    theme: ThemePreference,
    commands: Vec<UiCommand>,
}

impl ViewContext {
    pub fn new(theme: ThemePreference) -> Self {
        Self {
            theme,
            commands: Vec::new(),
        }
    }

    pub fn theme(&self) -> ThemePreference {
        self.theme
    }

    pub fn palette(&self) -> &'static Palette {
        self.theme.palette()
    }

    /// Queue a request for the root
    pub fn send(&mut self, command: UiCommand) {
        self.commands.push(command);
    }

    /// Take every queued request
    pub fn drain(&mut self) -> Vec<UiCommand> {
        std::mem::take(&mut self.commands)
    }
}

/// Per-view state. Each dashboard keeps its own; it is discarded when the
/// dashboard is left.
#[derive(Debug)]
pub struct DashboardState {
    pub student: StudentViewState,
    pub teacher: TeacherViewState,
    pub admin: AdminViewState,
    pub attendance: AttendanceViewState,
    session_config: SessionConfig,
    roster: Vec<String>,
}

impl DashboardState {
    pub fn new(session_config: SessionConfig, data: &MockData) -> Self {
        let roster: Vec<String> = data.attendance.roster.iter().map(|s| s.id.clone()).collect();
        Self {
            student: StudentViewState::default(),
            teacher: TeacherViewState::new(data),
            admin: AdminViewState::default(),
            attendance: AttendanceViewState::new(&session_config, roster.clone()),
            session_config,
            roster,
        }
    }

    /// Discard the state of a dashboard that is no longer shown. Dropping
    /// the attendance state ends any running session and disarms its timer.
    pub fn reset(&mut self, view: AppView, data: &MockData) {
        match view {
            AppView::Home => {}
            AppView::Student => self.student = StudentViewState::default(),
            AppView::Teacher => self.teacher = TeacherViewState::new(data),
            AppView::Admin => self.admin = AdminViewState::default(),
            AppView::Attendance => {
                self.attendance = AttendanceViewState::new(&self.session_config, self.roster.clone())
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Student
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StudentTab {
    #[default]
    Schedule,
    Recommendations,
    Progress,
    Achievements,
}

impl StudentTab {
    pub const ALL: [StudentTab; 4] = [
        StudentTab::Schedule,
        StudentTab::Recommendations,
        StudentTab::Progress,
        StudentTab::Achievements,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            StudentTab::Schedule => "Today's Schedule",
            StudentTab::Recommendations => "Recommendations",
            StudentTab::Progress => "Progress",
            StudentTab::Achievements => "Achievements",
        }
    }
}

#[derive(Debug, Default)]
pub struct StudentViewState {
    pub tab: StudentTab,
    /// Expanded recommendation
    pub selected_activity: Option<String>,
    pub search_query: String,
    pub category: CategoryFilter,
}

// ---------------------------------------------------------------------------
// Teacher
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TeacherTab {
    #[default]
    Classes,
    Attendance,
    Activities,
    Analytics,
}

impl TeacherTab {
    pub const ALL: [TeacherTab; 4] = [
        TeacherTab::Classes,
        TeacherTab::Attendance,
        TeacherTab::Activities,
        TeacherTab::Analytics,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            TeacherTab::Classes => "Today's Classes",
            TeacherTab::Attendance => "Attendance",
            TeacherTab::Activities => "Activities",
            TeacherTab::Analytics => "Analytics",
        }
    }
}

#[derive(Debug)]
pub struct TeacherViewState {
    pub tab: TeacherTab,
    pub search_query: String,
    /// Label of the class whose attendance is shown
    pub selected_class: String,
    pub status: CategoryFilter,
}

impl TeacherViewState {
    pub fn new(data: &MockData) -> Self {
        Self {
            tab: TeacherTab::default(),
            search_query: String::new(),
            selected_class: data
                .teacher
                .classes
                .first()
                .map(|c| c.label())
                .unwrap_or_default(),
            status: CategoryFilter::All,
        }
    }
}

// ---------------------------------------------------------------------------
// Admin
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AdminTab {
    #[default]
    Overview,
    Departments,
    Users,
    System,
    Reports,
}

impl AdminTab {
    pub const ALL: [AdminTab; 5] = [
        AdminTab::Overview,
        AdminTab::Departments,
        AdminTab::Users,
        AdminTab::System,
        AdminTab::Reports,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            AdminTab::Overview => "Overview",
            AdminTab::Departments => "Departments",
            AdminTab::Users => "User Management",
            AdminTab::System => "System Health",
            AdminTab::Reports => "Reports",
        }
    }
}

#[derive(Debug, Default)]
pub struct AdminViewState {
    pub tab: AdminTab,
    pub search_query: String,
    /// Department code, or all departments
    pub department: CategoryFilter,
}

// ---------------------------------------------------------------------------
// Attendance
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AttendanceTab {
    #[default]
    Methods,
    Live,
    Devices,
    Analytics,
}

impl AttendanceTab {
    pub const ALL: [AttendanceTab; 4] = [
        AttendanceTab::Methods,
        AttendanceTab::Live,
        AttendanceTab::Devices,
        AttendanceTab::Analytics,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            AttendanceTab::Methods => "Attendance Methods",
            AttendanceTab::Live => "Live Tracking",
            AttendanceTab::Devices => "Device Status",
            AttendanceTab::Analytics => "Analytics",
        }
    }
}

#[derive(Debug)]
pub struct AttendanceViewState {
    pub tab: AttendanceTab,
    pub session: AttendanceSession,
    pub face_recognition_active: bool,
    pub search_query: String,
    /// Attendance status name, or all statuses
    pub status: CategoryFilter,
    /// Method used by the check-in buttons
    pub check_in_method: CheckInMethod,
    /// Outcome of the last session action, shown under the session card
    pub notice: Option<String>,
}

impl AttendanceViewState {
    pub fn new(config: &SessionConfig, roster: Vec<String>) -> Self {
        Self {
            tab: AttendanceTab::default(),
            session: AttendanceSession::new(config.subject.clone(), config.cadence())
                .with_roster(roster),
            face_recognition_active: false,
            search_query: String::new(),
            status: CategoryFilter::All,
            check_in_method: CheckInMethod::Manual,
            notice: None,
        }
    }

    /// Status options for the live roster filter
    pub fn status_options() -> impl Iterator<Item = &'static str> {
        AttendanceStatus::ALL.iter().map(|s| s.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn data() -> MockData {
        MockData::bundled().unwrap()
    }

    #[test]
    fn test_router_starts_home() {
        let router = ViewRouter::new();
        assert_eq!(router.current(), AppView::Home);
    }

    #[test]
    fn test_navigate_from_home_reaches_each_dashboard() {
        for view in AppView::DASHBOARDS {
            let mut router = ViewRouter::new();
            assert_eq!(router.navigate(view), AppView::Home);
            assert_eq!(router.current(), view);
        }
    }

    #[test]
    fn test_go_home_from_every_dashboard() {
        for view in AppView::DASHBOARDS {
            let mut router = ViewRouter::new();
            router.navigate(view);
            assert_eq!(router.go_home(), view);
            assert_eq!(router.current(), AppView::Home);
        }
    }

    #[test]
    fn test_go_home_at_home_stays_home() {
        let mut router = ViewRouter::new();
        assert_eq!(router.go_home(), AppView::Home);
        assert!(router.current().is_home());
    }

    #[test]
    fn test_view_context_queues_commands() {
        let mut ctx = ViewContext::new(ThemePreference::Dark);
        assert!(ctx.theme().is_dark());
        ctx.send(UiCommand::ToggleTheme);
        ctx.send(UiCommand::GoHome);
        assert_eq!(ctx.drain(), vec![UiCommand::ToggleTheme, UiCommand::GoHome]);
        assert!(ctx.drain().is_empty());
    }

    #[test]
    fn test_teacher_defaults_to_first_class() {
        let state = TeacherViewState::new(&data());
        assert_eq!(state.selected_class, "CS301-Database Systems");
        assert_eq!(state.tab, TeacherTab::Classes);
    }

    #[test]
    fn test_reset_discards_view_state() {
        let data = data();
        let mut state = DashboardState::new(SessionConfig::default(), &data);
        state.admin.search_query = "civil".to_string();
        state.admin.tab = AdminTab::Users;
        state.student.selected_activity = Some("2".to_string());

        state.reset(AppView::Admin, &data);
        assert!(state.admin.search_query.is_empty());
        assert_eq!(state.admin.tab, AdminTab::Overview);

        // Other views are untouched
        assert_eq!(state.student.selected_activity.as_deref(), Some("2"));
    }

    #[test]
    fn test_reset_ends_running_session() {
        let data = data();
        let mut state = DashboardState::new(SessionConfig::default(), &data);
        let session = &mut state.attendance.session;
        session.start_session().unwrap();
        let started = session.started_at().unwrap();
        session.poll_timer_at(started + session.cadence() * 2);
        assert_eq!(session.elapsed_seconds(), 2);

        state.reset(AppView::Attendance, &data);
        assert!(!state.attendance.session.is_active());
        assert_eq!(state.attendance.session.token(), None);
        assert_eq!(state.attendance.session.elapsed_seconds(), 0);
    }

    #[test]
    fn test_attendance_roster_comes_from_feed() {
        let data = data();
        let mut state = DashboardState::new(SessionConfig::default(), &data);
        state.attendance.session.start_session().unwrap();
        assert!(state
            .attendance
            .session
            .mark_attendance("CS21B003", CheckInMethod::Manual)
            .is_ok());
    }

    #[test]
    fn test_attendance_round_trip_through_home() {
        let data = data();
        let mut router = ViewRouter::new();
        let config = SessionConfig {
            tick_interval_ms: 20,
            ..SessionConfig::default()
        };
        let mut state = DashboardState::new(config, &data);

        router.navigate(AppView::Attendance);
        let session = &mut state.attendance.session;
        session.start_session().unwrap();
        std::thread::sleep(Duration::from_millis(65));
        let fired = session.poll_timer();
        assert!(fired >= 3, "expected about 3 ticks, got {}", fired);
        assert!(fired < 6, "expected about 3 ticks, got {}", fired);
        assert_eq!(session.elapsed_seconds(), fired);

        assert!(session.end_session().is_some());
        assert_eq!(session.elapsed_seconds(), 0);
        assert_eq!(session.token(), None);

        let left = router.go_home();
        state.reset(left, &data);
        assert!(router.current().is_home());
        assert!(!state.attendance.session.is_active());
    }

    #[test]
    fn test_tab_names() {
        assert_eq!(StudentTab::ALL.len(), 4);
        assert_eq!(AdminTab::Users.name(), "User Management");
        assert_eq!(AttendanceTab::default(), AttendanceTab::Methods);
        assert_eq!(AttendanceViewState::status_options().count(), 3);
    }
}
