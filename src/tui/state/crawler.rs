//! Crawler status view state and its phase machine.
//!
//! The view starts in [`CrawlerPhase::Loading`], settles into one of the idle
//! phases once a snapshot arrives, and passes through
//! [`CrawlerPhase::Toggling`] while a start/stop request is outstanding.
//! Failures never discard the displayed snapshot; they only raise a banner.

use std::collections::HashSet;

use chrono::NaiveDateTime;

use crate::api::models::{CrawlerAction, CrawlerStatus, CrawlerStatusUpdate, Review, ReviewKey};

use super::request_tracker::{RequestTracker, SessionId};

/// Banner shown when a status poll fails.
pub const FETCH_FAILED_BANNER: &str = "Failed to fetch crawler status. Please try again later.";

/// Lifecycle phase of the crawler status view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrawlerPhase {
    /// Waiting for the first snapshot.
    Loading,
    /// The first fetch failed and no snapshot is available.
    Error,
    /// Snapshot available; crawler stopped.
    IdleStopped,
    /// Snapshot available; crawler running.
    IdleRunning,
    /// A start/stop request is in flight.
    Toggling,
}

impl CrawlerPhase {
    const fn idle(running: bool) -> Self {
        if running {
            Self::IdleRunning
        } else {
            Self::IdleStopped
        }
    }
}

/// State owned by one mount of the crawler status view.
#[derive(Debug, Clone)]
pub struct CrawlerViewState {
    session: SessionId,
    phase: CrawlerPhase,
    status: Option<CrawlerStatus>,
    previous_keys: Option<HashSet<ReviewKey>>,
    new_keys: HashSet<ReviewKey>,
    banner: Option<String>,
    last_updated: Option<NaiveDateTime>,
    pending_action: Option<CrawlerAction>,
    tracker: RequestTracker,
}

impl CrawlerViewState {
    /// Creates the state for a fresh mount.
    #[must_use]
    pub fn new(session: SessionId) -> Self {
        Self {
            session,
            phase: CrawlerPhase::Loading,
            status: None,
            previous_keys: None,
            new_keys: HashSet::new(),
            banner: None,
            last_updated: None,
            pending_action: None,
            tracker: RequestTracker::new(),
        }
    }

    /// Returns the session this state belongs to.
    #[must_use]
    pub const fn session(&self) -> SessionId {
        self.session
    }

    /// Returns the current phase.
    #[must_use]
    pub const fn phase(&self) -> CrawlerPhase {
        self.phase
    }

    /// Returns the held snapshot, if any arrived yet.
    #[must_use]
    pub const fn status(&self) -> Option<&CrawlerStatus> {
        self.status.as_ref()
    }

    /// Returns the failure banner, if one is raised.
    #[must_use]
    pub fn banner(&self) -> Option<&str> {
        self.banner.as_deref()
    }

    /// Returns the local time the last snapshot was applied.
    #[must_use]
    pub const fn last_updated(&self) -> Option<NaiveDateTime> {
        self.last_updated
    }

    /// Returns the action currently in flight, if toggling.
    #[must_use]
    pub const fn pending_action(&self) -> Option<CrawlerAction> {
        self.pending_action
    }

    /// Returns the request tracker for status fetches.
    pub const fn tracker_mut(&mut self) -> &mut RequestTracker {
        &mut self.tracker
    }

    /// Returns the request tracker for status fetches.
    #[must_use]
    pub const fn tracker(&self) -> &RequestTracker {
        &self.tracker
    }

    /// Returns whether the held snapshot reports a running crawler.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.status.as_ref().is_some_and(|status| status.running)
    }

    /// Returns `true` when `review` was not part of the previous snapshot.
    #[must_use]
    pub fn is_new(&self, review: &Review) -> bool {
        self.new_keys.contains(&review.key())
    }

    /// Returns the number of reviews flagged as new in the held snapshot.
    #[must_use]
    pub fn new_review_count(&self) -> usize {
        self.new_keys.len()
    }

    /// Returns the recently processed reviews, newest first.
    pub fn reviews_newest_first(&self) -> impl Iterator<Item = &Review> {
        self.status
            .iter()
            .flat_map(|status| status.new_reviews.iter().rev())
    }

    /// Applies a polled snapshot and clears any banner.
    ///
    /// While a toggle is in flight the phase stays [`CrawlerPhase::Toggling`].
    pub fn apply_snapshot(&mut self, update: CrawlerStatusUpdate, now: NaiveDateTime) {
        self.overlay(update, now);
        if self.phase != CrawlerPhase::Toggling {
            self.phase = CrawlerPhase::idle(self.is_running());
        }
    }

    /// Records a failed status poll.
    ///
    /// The held snapshot is kept; only the very first failure moves the view
    /// into [`CrawlerPhase::Error`].
    pub fn record_fetch_failure(&mut self) {
        self.banner = Some(FETCH_FAILED_BANNER.to_owned());
        if self.phase == CrawlerPhase::Loading {
            self.phase = CrawlerPhase::Error;
        }
    }

    /// Enters [`CrawlerPhase::Toggling`] and returns the action to issue.
    ///
    /// Returns `None` while loading or already toggling, and when no
    /// snapshot has ever been received.
    pub fn begin_toggle(&mut self) -> Option<CrawlerAction> {
        if matches!(self.phase, CrawlerPhase::Loading | CrawlerPhase::Toggling) {
            return None;
        }
        let action = CrawlerAction::toggling(self.is_running());
        self.phase = CrawlerPhase::Toggling;
        self.pending_action = Some(action);
        Some(action)
    }

    /// Applies the status returned by a successful toggle.
    ///
    /// The toggle response is newer than any poll still in flight, so the
    /// tracker is advanced to discard those.
    pub fn finish_toggle(&mut self, update: CrawlerStatusUpdate, now: NaiveDateTime) {
        self.tracker.supersede();
        self.overlay(update, now);
        self.pending_action = None;
        self.phase = CrawlerPhase::idle(self.is_running());
    }

    /// Records a failed toggle, keeping the previous running flag.
    pub fn fail_toggle(&mut self, action: CrawlerAction) {
        self.pending_action = None;
        self.banner = Some(toggle_failed_banner(action));
        self.phase = if self.status.is_some() {
            CrawlerPhase::idle(self.is_running())
        } else {
            CrawlerPhase::Error
        };
    }

    fn overlay(&mut self, update: CrawlerStatusUpdate, now: NaiveDateTime) {
        let status = self.status.get_or_insert_with(CrawlerStatus::default);
        status.overlay(update);

        let current_keys: HashSet<ReviewKey> =
            status.new_reviews.iter().map(Review::key).collect();
        self.new_keys = match &self.previous_keys {
            Some(previous) => current_keys.difference(previous).cloned().collect(),
            None => current_keys.clone(),
        };
        self.previous_keys = Some(current_keys);
        self.banner = None;
        self.last_updated = Some(now);
    }
}

/// Returns the banner shown when a start/stop request fails.
#[must_use]
pub fn toggle_failed_banner(action: CrawlerAction) -> String {
    format!(
        "Failed to {} the crawler. Please try again later.",
        action.verb()
    )
}

#[cfg(test)]
#[path = "crawler_tests.rs"]
mod tests;
