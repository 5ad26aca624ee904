//! Reusable UI components for the dashboard

pub mod badge;
pub mod card;
pub mod header;
pub mod status_card;
pub mod tab_bar;

pub use badge::{badge, progress_row};
pub use card::card;
pub use header::{render_header, theme_toggle_button};
pub use status_card::StatusCard;
pub use tab_bar::render_tab_bar;
