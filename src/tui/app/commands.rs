//! Async commands issued by the dashboard.
//!
//! Each command performs its gateway calls sequentially and resolves to a
//! single [`AppMsg`]. Workflows needing several requests deliver their
//! results together as [`AppMsg::Batch`].

use std::any::Any;
use std::sync::Arc;
use std::time::{Duration, Instant};

use bubbletea_rs::Cmd;

use crate::api::gateway::DashboardGateway;
use crate::api::models::CrawlerAction;
use crate::api::query::ReviewQuery;
use crate::tui::messages::{AppMsg, FetchOrigin};
use crate::tui::state::{SessionId, Ticket};

fn emit(msg: AppMsg) -> Option<Box<dyn Any + Send>> {
    Some(Box::new(msg) as Box<dyn Any + Send>)
}

fn elapsed_millis(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}

/// Creates a command that emits `Initialized` immediately.
///
/// This synthetic startup event triggers the first render cycle without
/// waiting for user input.
pub(super) fn immediate_init() -> Cmd {
    Box::pin(async { emit(AppMsg::Initialized) })
}

/// Creates a command that emits a poll tick for `session` after `interval`.
pub(super) fn arm_poll_timer(interval: Duration, session: SessionId) -> Cmd {
    Box::pin(async move {
        tokio::time::sleep(interval).await;
        emit(AppMsg::StatusTick { session })
    })
}

/// Fetches the crawler status.
pub(super) fn fetch_status(
    gateway: Arc<dyn DashboardGateway>,
    session: SessionId,
    ticket: Ticket,
    origin: FetchOrigin,
) -> Cmd {
    Box::pin(async move {
        let start = Instant::now();
        let result = gateway.crawler_status().await;
        emit(AppMsg::StatusLoaded {
            session,
            ticket,
            origin,
            latency_ms: elapsed_millis(start),
            result,
        })
    })
}

/// Posts a start/stop request.
pub(super) fn control_crawler(
    gateway: Arc<dyn DashboardGateway>,
    session: SessionId,
    action: CrawlerAction,
) -> Cmd {
    Box::pin(async move {
        let result = gateway.control_crawler(action).await;
        emit(AppMsg::ToggleCompleted {
            session,
            action,
            result,
        })
    })
}

/// Loads topics, stats and the current page for a freshly mounted list.
pub(super) fn load_review_view(
    gateway: Arc<dyn DashboardGateway>,
    session: SessionId,
    ticket: Ticket,
    query: ReviewQuery,
) -> Cmd {
    Box::pin(async move {
        let topics = gateway.list_topics().await;
        let stats = gateway.review_stats().await;
        let page = gateway.list_reviews(&query).await;
        emit(AppMsg::Batch(vec![
            AppMsg::TopicsLoaded {
                session,
                result: topics,
            },
            AppMsg::StatsLoaded {
                session,
                result: stats,
            },
            AppMsg::ReviewPageLoaded {
                session,
                ticket,
                result: page,
            },
        ]))
    })
}

/// Fetches one review page.
pub(super) fn fetch_review_page(
    gateway: Arc<dyn DashboardGateway>,
    session: SessionId,
    ticket: Ticket,
    query: ReviewQuery,
) -> Cmd {
    Box::pin(async move {
        let result = gateway.list_reviews(&query).await;
        emit(AppMsg::ReviewPageLoaded {
            session,
            ticket,
            result,
        })
    })
}

/// Re-queues failed reviews, then refetches stats and the current page.
///
/// The follow-up fetches run whether or not the retry succeeded.
pub(super) fn retry_then_refresh(
    gateway: Arc<dyn DashboardGateway>,
    session: SessionId,
    ticket: Ticket,
    query: ReviewQuery,
) -> Cmd {
    Box::pin(async move {
        let outcome = gateway.retry_failed().await;
        let stats = gateway.review_stats().await;
        let page = gateway.list_reviews(&query).await;
        emit(AppMsg::Batch(vec![
            AppMsg::RetryCompleted {
                session,
                result: outcome,
            },
            AppMsg::StatsLoaded {
                session,
                result: stats,
            },
            AppMsg::ReviewPageLoaded {
                session,
                ticket,
                result: page,
            },
        ]))
    })
}
