//! Tests for the top-level update loop: startup, help, tabs and rendering.

use std::sync::Arc;
use std::time::Duration;

use bubbletea_rs::{Cmd, Model};
use crossterm::event::{KeyCode, KeyModifiers};
use rstest::rstest;

use super::DashboardApp;
use crate::api::gateway::MockDashboardGateway;
use crate::api::models::{CrawlerStatusUpdate, Nullable};
use crate::api::models::test_support::review_titled;
use crate::tui::input::InputContext;
use crate::tui::messages::AppMsg;
use crate::tui::tab::Tab;

fn key_msg(key: KeyCode) -> bubbletea_rs::event::KeyMsg {
    bubbletea_rs::event::KeyMsg {
        key,
        modifiers: KeyModifiers::empty(),
    }
}

fn idle_app(start_tab: Tab) -> DashboardApp {
    DashboardApp::new(
        Arc::new(MockDashboardGateway::new()),
        Duration::from_secs(5),
        start_tab,
    )
    .with_size(100, 40)
}

async fn resolve_cmd_to_app_msg(cmd: Cmd) -> Option<AppMsg> {
    let maybe_boxed = cmd.await?;
    maybe_boxed
        .downcast::<AppMsg>()
        .ok()
        .map(|message| *message)
}

#[tokio::test]
async fn init_emits_initialized_message() {
    let (app, cmd) = DashboardApp::init();

    assert!(app.crawler().is_none() && app.reviews().is_none());
    let msg = resolve_cmd_to_app_msg(cmd.expect("init should emit a command")).await;
    assert!(matches!(msg, Some(AppMsg::Initialized)));
}

#[test]
fn initialized_mounts_start_tab_once() {
    let mut app = idle_app(Tab::Crawler);

    assert!(app.handle_message(&AppMsg::Initialized).is_some());
    assert!(app.crawler().is_some());
    assert_eq!(app.active_tab(), Tab::Crawler);

    assert!(app.handle_message(&AppMsg::Initialized).is_none());
}

#[test]
fn help_overlay_closes_on_unmapped_key() {
    let mut app = idle_app(Tab::Reviews);
    app.handle_message(&AppMsg::ToggleHelp);
    assert!(app.is_help_visible());

    let cmd = app.update(Box::new(key_msg(KeyCode::Char('x'))));

    assert!(cmd.is_none());
    assert!(!app.is_help_visible());
}

#[test]
fn help_overlay_consumes_q_without_quitting() {
    let mut app = idle_app(Tab::Reviews);
    app.handle_message(&AppMsg::ToggleHelp);

    let cmd = app.update(Box::new(key_msg(KeyCode::Char('q'))));

    assert!(cmd.is_none());
    assert!(!app.is_help_visible());
}

#[test]
fn q_quits_when_help_overlay_is_hidden() {
    let mut app = idle_app(Tab::Reviews);

    let cmd = app.update(Box::new(key_msg(KeyCode::Char('q'))));

    assert!(cmd.is_some());
}

#[rstest]
#[case::numeric(KeyCode::Char('2'), Tab::Crawler)]
#[case::cycle(KeyCode::Tab, Tab::Crawler)]
fn tab_keys_switch_views(#[case] key: KeyCode, #[case] expected: Tab) {
    let mut app = idle_app(Tab::Reviews);
    app.handle_message(&AppMsg::Initialized);

    let cmd = app.update(Box::new(key_msg(key)));

    assert!(cmd.is_some(), "mounting a tab fetches immediately");
    assert_eq!(app.active_tab(), expected);
    assert!(app.reviews().is_none(), "previous view is unmounted");
    assert_eq!(app.input_context(), InputContext::Crawler);
}

#[test]
fn selecting_the_active_tab_is_a_no_op() {
    let mut app = idle_app(Tab::Reviews);
    app.handle_message(&AppMsg::Initialized);

    assert!(app.handle_message(&AppMsg::SwitchTab(Tab::Reviews)).is_none());
    assert!(app.reviews().is_some());
}

#[test]
fn window_resize_updates_viewport() {
    let mut app = idle_app(Tab::Reviews);

    app.update(Box::new(bubbletea_rs::event::WindowSizeMsg {
        width: 50,
        height: 12,
    }));

    let frame = app.view();
    assert_eq!(frame.lines().count(), 12);
    assert!(frame.lines().all(|line| line.chars().count() <= 49));
}

#[tokio::test]
async fn crawler_view_renders_counters_and_newest_reviews_first() {
    let mut gateway = MockDashboardGateway::new();
    gateway.expect_crawler_status().times(1).returning(|| {
        Ok(CrawlerStatusUpdate {
            running: Some(true),
            total_processed: Nullable::Value(42),
            successful_reviews: Nullable::Value(40),
            failed_reviews: Nullable::Value(2),
            new_reviews: Some(vec![review_titled("A"), review_titled("B")]),
            ..Default::default()
        })
    });
    let mut app = DashboardApp::new(Arc::new(gateway), Duration::from_secs(5), Tab::Crawler)
        .with_size(100, 40);
    let fetch = app
        .handle_message(&AppMsg::Initialized)
        .expect("mount should fetch status");
    let loaded = resolve_cmd_to_app_msg(fetch).await.expect("status result");
    app.handle_message(&loaded);

    let frame = app.view();

    assert!(frame.contains("Total 42"));
    assert!(frame.contains("Success 40"));
    assert!(frame.contains("Failed 2"));
    let row_of = |title: &str| {
        frame.lines().position(|line| {
            let trimmed = line.trim();
            trimmed.starts_with(&format!("{title} [")) || trimmed.contains(&format!("] {title} ["))
        })
    };
    let newest = row_of("B").expect("review B rendered");
    let oldest = row_of("A").expect("review A rendered");
    assert!(newest < oldest, "newest review should render first");
}
