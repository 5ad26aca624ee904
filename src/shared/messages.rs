//! Requests views send to the dashboard root

/// A change only the root may make. Views queue these instead of touching
/// root-owned state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiCommand {
    /// Leave the current dashboard for the home screen
    GoHome,
    /// Open a dashboard from the home screen
    Open(crate::dashboard::AppView),
    /// Flip between light and dark
    ToggleTheme,
}
