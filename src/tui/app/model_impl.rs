//! `Model` trait implementation for the dashboard TUI application.
//!
//! This module contains the `bubbletea_rs::Model` trait implementation for
//! `DashboardApp`, handling initialisation, update dispatch, and view
//! rendering.

use std::any::Any;

use bubbletea_rs::{Cmd, Model};
use unicode_width::UnicodeWidthChar;

use super::{DashboardApp, commands};
use crate::tui::input::map_key_to_message;
use crate::tui::messages::AppMsg;
use crate::tui::storage;

impl Model for DashboardApp {
    fn init() -> (Self, Option<Cmd>) {
        // Retrieve the gateway and settings from module-level storage
        let (gateway, poll_interval, start_tab) = storage::get_dashboard_context();
        let (width, height) = storage::get_initial_terminal_size();
        let model = Self::new(gateway, poll_interval, start_tab)
            .with_telemetry(storage::get_telemetry_sink())
            .with_size(width, height);

        // Emit an immediate startup message to trigger the first render cycle.
        // The start tab is mounted when `AppMsg::Initialized` is handled.
        (model, Some(commands::immediate_init()))
    }

    fn update(&mut self, msg: Box<dyn Any + Send>) -> Option<Cmd> {
        // Try to downcast to our message type
        if let Some(app_msg) = msg.downcast_ref::<AppMsg>() {
            return self.handle_message(app_msg);
        }

        // Handle key events from bubbletea-rs with context-aware mapping
        if let Some(key_msg) = msg.downcast_ref::<bubbletea_rs::event::KeyMsg>() {
            if self.show_help {
                return self.handle_message(&AppMsg::ToggleHelp);
            }
            let context = self.input_context();
            if let Some(mapped) = map_key_to_message(key_msg, context) {
                return self.handle_message(&mapped);
            }
        }

        // Handle window size messages
        if let Some(size_msg) = msg.downcast_ref::<bubbletea_rs::event::WindowSizeMsg>() {
            let resize_msg = AppMsg::WindowResized {
                width: size_msg.width,
                height: size_msg.height,
            };
            return self.handle_message(&resize_msg);
        }

        None
    }

    fn view(&self) -> String {
        if self.show_help {
            return self.normalise_viewport(&self.render_help_overlay());
        }

        let mut output = String::new();
        output.push_str(&self.render_header());
        output.push_str(&self.render_tab_bar());
        output.push('\n');
        output.push_str(&self.render_body());

        // Keep the status bar pinned to the last row.
        let body_rows = usize::from(self.height.max(1));
        let mut lines: Vec<&str> = output.lines().collect();
        lines.truncate(body_rows.saturating_sub(1));
        let missing = body_rows.saturating_sub(1).saturating_sub(lines.len());
        let mut framed = lines.join("\n");
        framed.push('\n');
        framed.push_str(&"\n".repeat(missing));
        framed.push_str(&self.render_status_bar());

        self.normalise_viewport(&framed)
    }
}

impl DashboardApp {
    /// Fits the rendered frame to the terminal.
    ///
    /// Every row is exactly one column narrower than the terminal, so the
    /// last cell never triggers autowrap and stale cells from a wider frame
    /// are overwritten. Missing rows are filled with blanks.
    pub(super) fn normalise_viewport(&self, output: &str) -> String {
        let columns = usize::from(self.width.max(2)) - 1;
        let rows = usize::from(self.height.max(1));

        let mut frame: String = output
            .lines()
            .chain(std::iter::repeat(""))
            .take(rows)
            .map(|line| fit_line(line, columns))
            .collect::<Vec<_>>()
            .join("\n");
        frame.push('\n');
        frame
    }
}

/// Clips `line` to `columns` display cells and pads it with spaces.
///
/// Zero-width characters are kept; a wide character that would straddle the
/// edge is dropped.
fn fit_line(line: &str, columns: usize) -> String {
    let mut used = 0usize;
    let mut fitted: String = line
        .chars()
        .take_while(|ch| {
            let cells = UnicodeWidthChar::width(*ch).unwrap_or(0);
            if used + cells > columns {
                return false;
            }
            used += cells;
            true
        })
        .collect();
    fitted.extend(std::iter::repeat_n(' ', columns - used));
    fitted
}
