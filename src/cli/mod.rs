//! CLI operation mode handlers.
//!
//! This module contains the implementations for the two operation modes:
//! - [`dashboard_tui`]: Interactive terminal dashboard
//! - [`status_snapshot`]: One-shot crawler status summary
//!
//! Log subscriber installation lives in [`logging`].

pub mod dashboard_tui;
pub mod logging;
pub mod status_snapshot;
