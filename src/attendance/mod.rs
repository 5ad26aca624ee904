//! Live attendance sessions
//!
//! A session runs a repeating timer, carries a regenerable check-in token
//! and collects check-ins until it is ended.

pub mod session;
pub mod timer;
pub mod token;

pub use session::{
    format_elapsed, AttendanceSession, CheckIn, CheckInMethod, SessionError, SessionSummary,
};
pub use timer::SessionTimer;
pub use token::TokenGenerator;
