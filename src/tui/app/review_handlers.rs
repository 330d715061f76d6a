//! Review list handlers: navigation, query changes, data loading and retry.
//!
//! Query changes never filter locally; they issue a new page request and the
//! backend response replaces the page. Responses are matched against the
//! page tracker so an older request finishing late cannot overwrite a newer
//! page.

use std::sync::Arc;

use bubbletea_rs::Cmd;

use super::{DashboardApp, commands};
use crate::api::error::DashboardError;
use crate::api::models::{ReviewPage, ReviewStats, RetryOutcome};
use crate::telemetry::TelemetryEvent;
use crate::tui::messages::{AppMsg, FetchOrigin};
use crate::tui::state::{SessionId, Ticket};

/// Resource name used in stale-response telemetry.
const PAGE_RESOURCE: &str = "review_page";

impl DashboardApp {
    /// Dispatches navigation messages to their handlers.
    pub(super) fn handle_navigation_msg(&mut self, msg: &AppMsg) -> Option<Cmd> {
        match msg {
            AppMsg::SwitchTab(tab) => self.handle_switch_tab(*tab),
            AppMsg::NextTab => self.handle_switch_tab(self.active_tab.next()),
            AppMsg::CursorUp => {
                self.reviews_mut()?.cursor_up();
                None
            }
            AppMsg::CursorDown => {
                self.reviews_mut()?.cursor_down();
                None
            }
            AppMsg::NextPage => {
                let changed = self.reviews_mut()?.next_page();
                self.refetch_page_if(changed)
            }
            AppMsg::PreviousPage => {
                let changed = self.reviews_mut()?.previous_page();
                self.refetch_page_if(changed)
            }
            AppMsg::OpenDetail => {
                self.reviews_mut()?.open_detail();
                None
            }
            AppMsg::CloseDetail => {
                self.reviews_mut()?.close_detail();
                None
            }
            _ => {
                // Unreachable: caller filters to navigation messages.
                None
            }
        }
    }

    /// Dispatches topic and search messages to their handlers.
    pub(super) fn handle_query_msg(&mut self, msg: &AppMsg) -> Option<Cmd> {
        let state = self.reviews_mut()?;
        let changed = match msg {
            AppMsg::CycleTopic => state.cycle_topic(true),
            AppMsg::CycleTopicBack => state.cycle_topic(false),
            AppMsg::StartSearch => {
                state.start_search();
                false
            }
            AppMsg::SearchInput(ch) => state.push_search_char(*ch),
            AppMsg::SearchBackspace => state.pop_search_char(),
            AppMsg::FinishSearch => {
                state.finish_search();
                false
            }
            _ => false,
        };
        self.refetch_page_if(changed)
    }

    /// Dispatches data loading messages to their handlers.
    pub(super) fn handle_data_msg(&mut self, msg: &AppMsg) -> Option<Cmd> {
        match msg {
            AppMsg::RefreshRequested => self.handle_refresh_requested(),
            AppMsg::RetryFailedRequested => self.handle_retry_requested(),
            AppMsg::TopicsLoaded { session, result } => {
                self.handle_topics_loaded(*session, result);
                None
            }
            AppMsg::StatsLoaded { session, result } => {
                self.handle_stats_loaded(*session, result);
                None
            }
            AppMsg::ReviewPageLoaded {
                session,
                ticket,
                result,
            } => {
                self.handle_page_loaded(*session, *ticket, result);
                None
            }
            AppMsg::RetryCompleted { session, result } => {
                self.handle_retry_completed(*session, result);
                None
            }
            AppMsg::Batch(messages) => self.handle_batch(messages),
            _ => {
                // Unreachable: caller filters to data messages.
                None
            }
        }
    }

    /// Applies each message of a batch in order.
    ///
    /// Batched messages are request results; if several yield a follow-up
    /// command, the last one wins.
    fn handle_batch(&mut self, messages: &[AppMsg]) -> Option<Cmd> {
        messages
            .iter()
            .fold(None, |cmd, msg| self.handle_message(msg).or(cmd))
    }

    fn refetch_page_if(&mut self, changed: bool) -> Option<Cmd> {
        if changed { self.request_page() } else { None }
    }

    /// Issues a page request for the mounted review list.
    fn request_page(&mut self) -> Option<Cmd> {
        let gateway = Arc::clone(&self.gateway);
        let state = self.reviews_mut()?;
        let ticket = state.issue_page_request();
        let query = state.query().clone();
        tracing::debug!(
            page = query.page(),
            topic = ?query.topic(),
            search = ?query.search(),
            "fetching review page"
        );
        Some(commands::fetch_review_page(
            gateway,
            state.session(),
            ticket,
            query,
        ))
    }

    /// Issues the topics, stats and page requests for a mounted review list.
    pub(super) fn request_review_view(&mut self) -> Option<Cmd> {
        let gateway = Arc::clone(&self.gateway);
        let state = self.reviews_mut()?;
        let ticket = state.issue_page_request();
        let query = state.query().clone();
        Some(commands::load_review_view(
            gateway,
            state.session(),
            ticket,
            query,
        ))
    }

    fn handle_refresh_requested(&mut self) -> Option<Cmd> {
        if self.crawler().is_some() {
            return self.request_status(FetchOrigin::Manual);
        }
        self.request_review_view()
    }

    fn handle_retry_requested(&mut self) -> Option<Cmd> {
        let gateway = Arc::clone(&self.gateway);
        let state = self.reviews_mut()?;
        let failed = state.retryable_count()?;
        state.begin_retry();
        let ticket = state.issue_page_request();
        let query = state.query().clone();
        tracing::info!(failed, "retrying failed reviews");
        Some(commands::retry_then_refresh(
            gateway,
            state.session(),
            ticket,
            query,
        ))
    }

    fn handle_topics_loaded(
        &mut self,
        session: SessionId,
        result: &Result<Vec<String>, DashboardError>,
    ) {
        let Some(state) = self.reviews_for(session) else {
            return;
        };
        match result {
            Ok(topics) => state.set_topics(topics.clone()),
            Err(error) => tracing::warn!(%error, "failed to fetch review topics"),
        }
    }

    fn handle_stats_loaded(
        &mut self,
        session: SessionId,
        result: &Result<ReviewStats, DashboardError>,
    ) {
        let Some(state) = self.reviews_for(session) else {
            return;
        };
        match result {
            Ok(stats) => state.set_stats(Some(stats.clone())),
            Err(error) => {
                tracing::warn!(%error, "failed to fetch review statistics");
                state.set_stats(None);
            }
        }
    }

    fn handle_page_loaded(
        &mut self,
        session: SessionId,
        ticket: Ticket,
        result: &Result<ReviewPage, DashboardError>,
    ) {
        let Some(state) = self.reviews_for(session) else {
            return;
        };
        let applied = match result {
            Ok(page) => state.apply_page(ticket, page.clone()),
            Err(error) => {
                let applied = state.fail_page(ticket);
                if applied {
                    tracing::warn!(%error, "failed to fetch review page");
                }
                applied
            }
        };
        if !applied {
            tracing::debug!("discarding out-of-order review page response");
            self.record(TelemetryEvent::StaleResponseDiscarded {
                resource: PAGE_RESOURCE.to_owned(),
            });
        }
    }

    fn handle_retry_completed(
        &mut self,
        session: SessionId,
        result: &Result<RetryOutcome, DashboardError>,
    ) {
        let Some(state) = self.reviews_for(session) else {
            return;
        };
        state.finish_retry();
        match result {
            Ok(outcome) => tracing::info!(
                retried = ?outcome.retried_count,
                total_failed = ?outcome.total_failed,
                "retry of failed reviews submitted"
            ),
            Err(error) => tracing::warn!(%error, "failed to retry failed reviews"),
        }
    }
}
