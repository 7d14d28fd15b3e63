//! UI rendering module for the hospital management console
//!
//! This module contains all the rendering logic for the terminal user
//! interface, using the ratatui library for TUI components.

pub mod dashboard;
pub mod login;

pub use dashboard::render as render_dashboard;
pub use login::render as render_login;
