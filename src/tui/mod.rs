//! Terminal User Interface for the crawler dashboard.
//!
//! This module provides an interactive TUI with two tabs, a paginated review
//! list with statistics and a live crawler status view, using the
//! bubbletea-rs framework.
//!
//! # Architecture
//!
//! The TUI follows the Model-View-Update (MVU) pattern:
//!
//! - **Model**: Application state in [`app::DashboardApp`]
//! - **View**: Rendering logic in each component's `view()` function
//! - **Update**: Message-driven state transitions in `update()`
//!
//! # Modules
//!
//! - [`app`]: Main application model and entry point
//! - [`messages`]: Message types for the update loop
//! - [`state`]: Per-view state, request tracking and derivations
//! - [`components`]: Rendering components
//! - [`input`]: Key-to-message mapping for input handling
//!
//! # Startup Context
//!
//! Because bubbletea-rs's `Model` trait requires `init()` to be a static
//! function, the gateway and settings are handed over through module-level
//! storage. Call [`set_dashboard_context`] before starting the program, and
//! `DashboardApp::init()` will retrieve them.

pub mod app;
pub mod components;
pub mod input;
pub mod messages;
pub mod state;
mod storage;
mod tab;

pub use app::DashboardApp;
pub use storage::{set_dashboard_context, set_initial_terminal_size, set_telemetry_sink};
pub use tab::Tab;
