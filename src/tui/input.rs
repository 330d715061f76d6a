//! Input handling for the TUI application.
//!
//! This module provides key-to-message mapping for translating terminal key
//! events into application messages. Mapping depends on the
//! [`InputContext`]: while the search term is being edited every printable
//! key is text, so single-letter shortcuts are suspended.

use crossterm::event::{KeyCode, KeyModifiers};

use super::messages::AppMsg;
use super::tab::Tab;

/// Which part of the UI currently receives keystrokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputContext {
    /// Review list with no modal open.
    ReviewList,
    /// Review detail modal.
    ReviewDetail,
    /// Search term editing.
    SearchEditing,
    /// Crawler status view.
    Crawler,
}

/// Maps a key event to an application message for the given context.
///
/// Returns `None` for unrecognised key events, allowing them to be ignored.
#[must_use]
pub fn map_key_to_message(
    key: &bubbletea_rs::event::KeyMsg,
    context: InputContext,
) -> Option<AppMsg> {
    if key.key == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(AppMsg::Quit);
    }

    match context {
        InputContext::SearchEditing => map_search_key(key.key),
        InputContext::ReviewDetail => map_detail_key(key.key),
        InputContext::ReviewList => map_review_list_key(key.key).or_else(|| map_global_key(key.key)),
        InputContext::Crawler => map_crawler_key(key.key).or_else(|| map_global_key(key.key)),
    }
}

#[expect(
    clippy::missing_const_for_fn,
    reason = "KeyCode match patterns prevent const evaluation"
)]
fn map_global_key(key: KeyCode) -> Option<AppMsg> {
    match key {
        KeyCode::Char('q') => Some(AppMsg::Quit),
        KeyCode::Char('?') => Some(AppMsg::ToggleHelp),
        KeyCode::Tab => Some(AppMsg::NextTab),
        KeyCode::Char('1') => Some(AppMsg::SwitchTab(Tab::Reviews)),
        KeyCode::Char('2') => Some(AppMsg::SwitchTab(Tab::Crawler)),
        KeyCode::Char('r') => Some(AppMsg::RefreshRequested),
        _ => None,
    }
}

#[expect(
    clippy::missing_const_for_fn,
    reason = "KeyCode match patterns prevent const evaluation"
)]
fn map_review_list_key(key: KeyCode) -> Option<AppMsg> {
    match key {
        KeyCode::Char('j') | KeyCode::Down => Some(AppMsg::CursorDown),
        KeyCode::Char('k') | KeyCode::Up => Some(AppMsg::CursorUp),
        KeyCode::Char('n') | KeyCode::Right => Some(AppMsg::NextPage),
        KeyCode::Char('p') | KeyCode::Left => Some(AppMsg::PreviousPage),
        KeyCode::Enter => Some(AppMsg::OpenDetail),
        KeyCode::Char('t') => Some(AppMsg::CycleTopic),
        KeyCode::Char('T') => Some(AppMsg::CycleTopicBack),
        KeyCode::Char('/') => Some(AppMsg::StartSearch),
        KeyCode::Char('R') => Some(AppMsg::RetryFailedRequested),
        _ => None,
    }
}

#[expect(
    clippy::missing_const_for_fn,
    reason = "KeyCode match patterns prevent const evaluation"
)]
fn map_detail_key(key: KeyCode) -> Option<AppMsg> {
    match key {
        KeyCode::Esc | KeyCode::Enter => Some(AppMsg::CloseDetail),
        KeyCode::Char('q') => Some(AppMsg::Quit),
        KeyCode::Char('?') => Some(AppMsg::ToggleHelp),
        _ => None,
    }
}

#[expect(
    clippy::missing_const_for_fn,
    reason = "KeyCode match patterns prevent const evaluation"
)]
fn map_search_key(key: KeyCode) -> Option<AppMsg> {
    match key {
        KeyCode::Enter | KeyCode::Esc => Some(AppMsg::FinishSearch),
        KeyCode::Backspace => Some(AppMsg::SearchBackspace),
        KeyCode::Char(ch) => Some(AppMsg::SearchInput(ch)),
        _ => None,
    }
}

#[expect(
    clippy::missing_const_for_fn,
    reason = "KeyCode match patterns prevent const evaluation"
)]
fn map_crawler_key(key: KeyCode) -> Option<AppMsg> {
    match key {
        KeyCode::Char('s') => Some(AppMsg::ToggleCrawler),
        _ => None,
    }
}
