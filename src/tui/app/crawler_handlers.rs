//! Crawler polling and start/stop handlers.
//!
//! The poll loop is a chain of commands: a scheduled fetch completes, its
//! result re-arms the timer, the timer tick issues the next scheduled fetch.
//! The chain breaks as soon as the session it belongs to is unmounted.

use std::sync::Arc;

use bubbletea_rs::Cmd;

use super::{DashboardApp, commands};
use crate::api::error::DashboardError;
use crate::api::models::{CrawlerAction, CrawlerStatusUpdate};
use crate::telemetry::TelemetryEvent;
use crate::tui::messages::{AppMsg, FetchOrigin};
use crate::tui::state::{SessionId, Ticket};

/// Resource name used in stale-response telemetry.
const STATUS_RESOURCE: &str = "crawler_status";

fn now() -> chrono::NaiveDateTime {
    chrono::Local::now().naive_local()
}

impl DashboardApp {
    /// Dispatches crawler messages to their handlers.
    pub(super) fn handle_crawler_msg(&mut self, msg: &AppMsg) -> Option<Cmd> {
        match msg {
            AppMsg::ToggleCrawler => self.handle_toggle_crawler(),
            AppMsg::StatusTick { session } => self.handle_status_tick(*session),
            AppMsg::StatusLoaded {
                session,
                ticket,
                origin,
                latency_ms,
                result,
            } => self.handle_status_loaded(*session, *ticket, *origin, *latency_ms, result),
            AppMsg::ToggleCompleted {
                session,
                action,
                result,
            } => self.handle_toggle_completed(*session, *action, result),
            _ => {
                // Unreachable: caller filters to crawler messages.
                None
            }
        }
    }

    /// Issues a status fetch for the mounted crawler view.
    pub(super) fn request_status(&mut self, origin: FetchOrigin) -> Option<Cmd> {
        let gateway = Arc::clone(&self.gateway);
        let state = self.crawler_mut()?;
        let session = state.session();
        let ticket = state.tracker_mut().issue();
        tracing::debug!(?origin, "fetching crawler status");
        Some(commands::fetch_status(gateway, session, ticket, origin))
    }

    fn handle_status_tick(&mut self, session: SessionId) -> Option<Cmd> {
        if self.crawler_for(session).is_none() {
            tracing::debug!("poll tick for unmounted crawler view dropped");
            return None;
        }
        self.request_status(FetchOrigin::Scheduled)
    }

    fn handle_status_loaded(
        &mut self,
        session: SessionId,
        ticket: Ticket,
        origin: FetchOrigin,
        latency_ms: u64,
        result: &Result<CrawlerStatusUpdate, DashboardError>,
    ) -> Option<Cmd> {
        let poll_interval = self.poll_interval;
        let state = self.crawler_for(session)?;

        if state.tracker().is_current(ticket) {
            match result {
                Ok(update) => {
                    state.apply_snapshot(update.clone(), now());
                    let event = TelemetryEvent::StatusPollRecorded {
                        latency_ms,
                        running: state.is_running(),
                        new_review_count: state.new_review_count(),
                    };
                    self.record(event);
                }
                Err(error) => {
                    tracing::warn!(%error, "failed to fetch crawler status");
                    state.record_fetch_failure();
                }
            }
        } else {
            tracing::debug!("discarding out-of-order crawler status response");
            self.record(TelemetryEvent::StaleResponseDiscarded {
                resource: STATUS_RESOURCE.to_owned(),
            });
        }

        // Scheduled fetches keep the loop alive, even when their result was
        // stale or failed.
        match origin {
            FetchOrigin::Scheduled => Some(commands::arm_poll_timer(poll_interval, session)),
            FetchOrigin::Manual => None,
        }
    }

    fn handle_toggle_crawler(&mut self) -> Option<Cmd> {
        let gateway = Arc::clone(&self.gateway);
        let state = self.crawler_mut()?;
        let action = state.begin_toggle()?;
        let session = state.session();
        tracing::info!(action = action.verb(), "toggling crawler");
        Some(commands::control_crawler(gateway, session, action))
    }

    fn handle_toggle_completed(
        &mut self,
        session: SessionId,
        action: CrawlerAction,
        result: &Result<CrawlerStatusUpdate, DashboardError>,
    ) -> Option<Cmd> {
        let state = self.crawler_for(session)?;
        let succeeded = result.is_ok();
        let follow_up = match result {
            Ok(update) => {
                state.finish_toggle(update.clone(), now());
                tracing::info!(action = action.verb(), running = state.is_running(), "crawler toggled");
                state.is_running()
            }
            Err(error) => {
                tracing::warn!(action = action.verb(), %error, "failed to toggle crawler");
                state.fail_toggle(action);
                false
            }
        };

        self.record(TelemetryEvent::CrawlerToggled {
            action: action.verb().to_owned(),
            succeeded,
        });

        if follow_up {
            self.request_status(FetchOrigin::Manual)
        } else {
            None
        }
    }
}
