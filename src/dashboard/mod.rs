//! Dashboard UI Module
//!
//! The SmartCurriculum desktop front end: a home hub and four role
//! dashboards rendered from the data feed.

pub mod app;
pub mod components;
pub mod filter;
pub mod state;
pub mod theme;
pub mod views;

pub use app::{run_dashboard, DashboardApp};
pub use state::{AppView, DashboardState, ViewRouter};
