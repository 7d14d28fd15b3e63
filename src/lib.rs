//! Hospital management console library
//!
//! This module exposes the gateway client, data services, session store, and
//! CLI for use in integration tests.

pub mod api;
pub mod app;
pub mod cli;
pub mod data;
pub mod session;
pub mod ui;
