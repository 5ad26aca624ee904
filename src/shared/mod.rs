//! State shared between the dashboard root and its views

pub mod messages;
pub mod state;

pub use messages::UiCommand;
pub use state::{RuntimeState, SharedAppState};
