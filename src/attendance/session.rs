//! Attendance session state machine

use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::info;

use super::timer::SessionTimer;
use super::token::TokenGenerator;

/// Out-of-sequence session operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("an attendance session is already active")]
    AlreadyActive,
    #[error("no attendance session is active")]
    NotActive,
    #[error("student {0} has already checked in")]
    AlreadyCheckedIn(String),
    #[error("student {0} is not on the class roster")]
    UnknownStudent(String),
}

/// How a student checked in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckInMethod {
    QrCode,
    Proximity,
    FaceRecognition,
    Manual,
}

impl CheckInMethod {
    pub const ALL: [CheckInMethod; 4] = [
        CheckInMethod::QrCode,
        CheckInMethod::Proximity,
        CheckInMethod::FaceRecognition,
        CheckInMethod::Manual,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            CheckInMethod::QrCode => "QR Code",
            CheckInMethod::Proximity => "Proximity",
            CheckInMethod::FaceRecognition => "Face Recognition",
            CheckInMethod::Manual => "Manual",
        }
    }
}

/// A student marked present during a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckIn {
    pub student_id: String,
    pub method: CheckInMethod,
    /// Session counter value when the check-in was recorded
    pub at_elapsed: u64,
}

/// Serializable view of a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub subject: String,
    pub token: String,
    pub elapsed_seconds: u64,
    pub elapsed_display: String,
    pub check_ins: Vec<CheckIn>,
}

/// State that only exists while a session runs
#[derive(Debug)]
struct ActiveSession {
    token: String,
    elapsed_seconds: u64,
    timer: SessionTimer,
    check_ins: Vec<CheckIn>,
}

/// Start/stop state machine behind the live attendance panel.
///
/// The token is present exactly when a session is active, which the
/// `Option<ActiveSession>` representation enforces. The timer lives inside
/// the active state, so ending the session or dropping the whole value
/// disarms it.
#[derive(Debug)]
pub struct AttendanceSession {
    subject: String,
    cadence: Duration,
    roster: Vec<String>,
    tokens: TokenGenerator,
    active: Option<ActiveSession>,
}

impl AttendanceSession {
    /// Create an idle session for `subject` whose timer fires every `cadence`
    pub fn new(subject: impl Into<String>, cadence: Duration) -> Self {
        let subject = subject.into();
        Self {
            tokens: TokenGenerator::new(&subject),
            subject,
            cadence,
            roster: Vec::new(),
            active: None,
        }
    }

    /// Student ids that may check in
    pub fn with_roster<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.roster = ids.into_iter().map(Into::into).collect();
        self
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn cadence(&self) -> Duration {
        self.cadence
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Current check-in token, `None` while idle
    pub fn token(&self) -> Option<&str> {
        self.active.as_ref().map(|a| a.token.as_str())
    }

    /// Timer counter; zero while idle
    pub fn elapsed_seconds(&self) -> u64 {
        self.active.as_ref().map_or(0, |a| a.elapsed_seconds)
    }

    pub fn check_ins(&self) -> &[CheckIn] {
        self.active
            .as_ref()
            .map(|a| a.check_ins.as_slice())
            .unwrap_or_default()
    }

    /// Begin a session: fresh token, counter at zero, timer armed
    pub fn start_session(&mut self) -> Result<&str, SessionError> {
        if self.active.is_some() {
            return Err(SessionError::AlreadyActive);
        }

        let token = self.tokens.next_token();
        info!("Attendance session started for {} ({})", self.subject, token);

        let active = self.active.insert(ActiveSession {
            token,
            elapsed_seconds: 0,
            timer: SessionTimer::arm(self.cadence),
            check_ins: Vec::new(),
        });
        Ok(&active.token)
    }

    /// End the running session, disarming its timer. Idle sessions are
    /// left alone and `None` is returned.
    pub fn end_session(&mut self) -> Option<SessionSummary> {
        let summary = self.snapshot()?;
        self.active = None;
        info!(
            "Attendance session ended after {} with {} check-ins",
            summary.elapsed_display,
            summary.check_ins.len()
        );
        Some(summary)
    }

    /// Replace the token of the running session
    pub fn regenerate_token(&mut self) -> Result<&str, SessionError> {
        let active = self.active.as_mut().ok_or(SessionError::NotActive)?;
        active.token = self.tokens.next_token();
        info!("Attendance token regenerated: {}", active.token);
        Ok(&active.token)
    }

    /// When the running session's timer was armed
    pub fn started_at(&self) -> Option<Instant> {
        self.active.as_ref().map(|a| a.timer.armed_at())
    }

    /// Whether the running timer signalled a tick since the last poll
    pub fn timer_due(&self) -> bool {
        self.active.as_ref().is_some_and(|a| a.timer.is_due())
    }

    /// Time until the running timer fires next
    pub fn until_next_tick(&self) -> Option<Duration> {
        self.active
            .as_ref()
            .map(|a| a.timer.until_next(Instant::now()))
    }

    /// Apply every tick the timer fired since the last poll, returning
    /// how many were applied
    pub fn poll_timer(&mut self) -> u64 {
        self.poll_timer_at(Instant::now())
    }

    /// Apply the ticks due at `now`. Ignored while idle.
    pub fn poll_timer_at(&mut self, now: Instant) -> u64 {
        let Some(active) = self.active.as_mut() else {
            return 0;
        };
        let fired = active.timer.drain_at(now);
        active.elapsed_seconds += fired;
        fired
    }

    /// Record a check-in for a rostered student
    pub fn mark_attendance(
        &mut self,
        student_id: &str,
        method: CheckInMethod,
    ) -> Result<&CheckIn, SessionError> {
        if !self.roster.iter().any(|id| id == student_id) {
            return Err(SessionError::UnknownStudent(student_id.to_string()));
        }
        let active = self.active.as_mut().ok_or(SessionError::NotActive)?;
        if active.check_ins.iter().any(|c| c.student_id == student_id) {
            return Err(SessionError::AlreadyCheckedIn(student_id.to_string()));
        }

        info!("Attendance marked for student {} using {}", student_id, method.name());
        active.check_ins.push(CheckIn {
            student_id: student_id.to_string(),
            method,
            at_elapsed: active.elapsed_seconds,
        });
        let last = active.check_ins.len() - 1;
        Ok(&active.check_ins[last])
    }

    /// Check-in recorded for `student_id` in the running session
    pub fn check_in_for(&self, student_id: &str) -> Option<&CheckIn> {
        self.check_ins().iter().find(|c| c.student_id == student_id)
    }

    /// Whether `student_id` checked in during the running session
    pub fn has_checked_in(&self, student_id: &str) -> bool {
        self.check_in_for(student_id).is_some()
    }

    /// Export view of the running session
    pub fn snapshot(&self) -> Option<SessionSummary> {
        self.active.as_ref().map(|active| SessionSummary {
            subject: self.subject.clone(),
            token: active.token.clone(),
            elapsed_seconds: active.elapsed_seconds,
            elapsed_display: format_elapsed(active.elapsed_seconds),
            check_ins: active.check_ins.clone(),
        })
    }
}

/// Render a counter as `MM:SS`. Minutes keep growing past 59.
pub fn format_elapsed(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CADENCE: Duration = Duration::from_secs(60);

    fn session() -> AttendanceSession {
        AttendanceSession::new("Database Systems", CADENCE)
            .with_roster(["CS21B001", "CS21B002", "CS21B003"])
    }

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(0), "00:00");
        assert_eq!(format_elapsed(59), "00:59");
        assert_eq!(format_elapsed(65), "01:05");
        assert_eq!(format_elapsed(3599), "59:59");
        assert_eq!(format_elapsed(3661), "61:01");
        assert_eq!(format_elapsed(6000 * 60), "6000:00");
    }

    #[test]
    fn test_new_session_is_idle() {
        let session = session();
        assert!(!session.is_active());
        assert_eq!(session.token(), None);
        assert_eq!(session.elapsed_seconds(), 0);
        assert!(session.check_ins().is_empty());
        assert!(session.snapshot().is_none());
    }

    #[test]
    fn test_start_then_end_resets_state() {
        let mut session = session();
        let token = session.start_session().unwrap().to_string();
        assert!(session.is_active());
        assert_eq!(session.token(), Some(token.as_str()));
        assert!(token.contains("DatabaseSystems"));

        let started = session.started_at().unwrap();
        assert_eq!(session.poll_timer_at(started + CADENCE * 2), 2);
        assert_eq!(session.elapsed_seconds(), 2);

        let summary = session.end_session().unwrap();
        assert_eq!(summary.token, token);
        assert_eq!(summary.elapsed_seconds, 2);
        assert_eq!(summary.elapsed_display, "00:02");

        assert!(!session.is_active());
        assert_eq!(session.token(), None);
        assert_eq!(session.elapsed_seconds(), 0);
    }

    #[test]
    fn test_end_while_idle_is_noop() {
        let mut session = session();
        assert!(session.end_session().is_none());
        assert!(!session.is_active());
    }

    #[test]
    fn test_double_start_rejected_and_single_timer() {
        let mut session = session();
        let token = session.start_session().unwrap().to_string();
        let started = session.started_at().unwrap();
        assert_eq!(session.start_session(), Err(SessionError::AlreadyActive));

        // The first session is untouched
        assert_eq!(session.token(), Some(token.as_str()));
        assert_eq!(session.started_at(), Some(started));

        // Only one timer's worth of ticks is applied
        assert_eq!(session.poll_timer_at(started + CADENCE * 3), 3);
        assert_eq!(session.elapsed_seconds(), 3);
    }

    #[test]
    fn test_double_start_keeps_single_timer_in_real_time() {
        let cadence = Duration::from_millis(20);
        let mut session = AttendanceSession::new("Database Systems", cadence);
        session.start_session().unwrap();
        assert_eq!(session.start_session(), Err(SessionError::AlreadyActive));

        std::thread::sleep(cadence * 3 + Duration::from_millis(5));
        let fired = session.poll_timer();
        assert!(fired >= 3, "expected about 3 ticks, got {}", fired);
        assert!(fired < 6, "a second timer would double the count, got {}", fired);
        assert_eq!(session.elapsed_seconds(), fired);
    }

    #[test]
    fn test_regenerate_changes_only_token() {
        let mut session = session();
        let first = session.start_session().unwrap().to_string();
        let started = session.started_at().unwrap();
        session.poll_timer_at(started + CADENCE * 3);

        let second = session.regenerate_token().unwrap().to_string();
        assert_ne!(first, second);
        assert!(session.is_active());
        assert_eq!(session.elapsed_seconds(), 3);
        assert_eq!(session.token(), Some(second.as_str()));
    }

    #[test]
    fn test_regenerate_while_idle_rejected() {
        let mut session = session();
        assert_eq!(session.regenerate_token(), Err(SessionError::NotActive));
        assert_eq!(session.token(), None);
    }

    #[test]
    fn test_poll_while_idle_ignored() {
        let mut session = session();
        assert_eq!(session.poll_timer_at(Instant::now() + CADENCE * 5), 0);
        assert_eq!(session.elapsed_seconds(), 0);
        assert_eq!(session.started_at(), None);
        assert_eq!(session.until_next_tick(), None);
        assert!(!session.timer_due());
    }

    #[test]
    fn test_restart_starts_from_zero_with_new_token() {
        let mut session = session();
        let first = session.start_session().unwrap().to_string();
        let started = session.started_at().unwrap();
        session.poll_timer_at(started + CADENCE);
        assert_eq!(session.elapsed_seconds(), 1);
        session.end_session();

        let second = session.start_session().unwrap().to_string();
        assert_ne!(first, second);
        assert_eq!(session.elapsed_seconds(), 0);
    }

    #[test]
    fn test_poll_timer_applies_fired_ticks() {
        let mut session = AttendanceSession::new("Database Systems", Duration::from_millis(10));
        session.start_session().unwrap();
        // Several cadences pass between two frames
        std::thread::sleep(Duration::from_millis(105));

        let fired = session.poll_timer();
        assert!(fired >= 10, "expected about 10 ticks, got {}", fired);
        assert!(fired < 40, "expected about 10 ticks, got {}", fired);
        assert_eq!(session.elapsed_seconds(), fired);
        assert_eq!(session.poll_timer_at(session.started_at().unwrap()), 0);
    }

    #[test]
    fn test_ended_session_ignores_old_timer() {
        let mut session = AttendanceSession::new("Database Systems", Duration::from_millis(5));
        session.start_session().unwrap();
        session.end_session();
        std::thread::sleep(Duration::from_millis(30));

        assert_eq!(session.poll_timer(), 0);
        assert_eq!(session.elapsed_seconds(), 0);
    }

    #[test]
    fn test_mark_attendance() {
        let mut session = session();
        assert_eq!(
            session.mark_attendance("CS21B001", CheckInMethod::QrCode),
            Err(SessionError::NotActive)
        );

        session.start_session().unwrap();
        let started = session.started_at().unwrap();
        session.poll_timer_at(started + CADENCE);
        let check_in = session
            .mark_attendance("CS21B001", CheckInMethod::QrCode)
            .unwrap()
            .clone();
        assert_eq!(check_in.at_elapsed, 1);
        assert!(session.has_checked_in("CS21B001"));
        assert!(!session.has_checked_in("CS21B002"));

        assert_eq!(
            session.mark_attendance("CS21B001", CheckInMethod::Proximity),
            Err(SessionError::AlreadyCheckedIn("CS21B001".to_string()))
        );
        assert_eq!(
            session.mark_attendance("XX00", CheckInMethod::Manual),
            Err(SessionError::UnknownStudent("XX00".to_string()))
        );
    }

    #[test]
    fn test_check_ins_cleared_on_end() {
        let mut session = session();
        session.start_session().unwrap();
        session.mark_attendance("CS21B002", CheckInMethod::FaceRecognition).unwrap();

        let summary = session.end_session().unwrap();
        assert_eq!(summary.check_ins.len(), 1);
        assert!(session.check_ins().is_empty());

        session.start_session().unwrap();
        assert!(!session.has_checked_in("CS21B002"));
    }

    #[test]
    fn test_summary_serializes_method_in_snake_case() {
        let mut session = session();
        session.start_session().unwrap();
        session.mark_attendance("CS21B003", CheckInMethod::QrCode).unwrap();

        let json = serde_json::to_string(&session.snapshot().unwrap()).unwrap();
        assert!(json.contains("\"qr_code\""));
        assert!(json.contains("\"elapsed_display\":\"00:00\""));
    }
}
