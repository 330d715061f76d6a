//! Review list view state: query, page, cursor and detail selection.
//!
//! The backend is the only source of filter and pagination truth; this state
//! tracks what the user asked for and the last page the backend returned for
//! it. Every query change resets the cursor and issues a new page ticket.

use crate::api::models::{Review, ReviewPage, ReviewStats};
use crate::api::query::ReviewQuery;

use super::request_tracker::{RequestTracker, SessionId, Ticket};

/// Banner shown when the review page cannot be fetched.
pub const PAGE_FAILED_BANNER: &str = "Failed to fetch reviews. Please try again later.";

/// State owned by one mount of the review list view.
#[derive(Debug, Clone)]
pub struct ReviewQueryState {
    session: SessionId,
    query: ReviewQuery,
    search_input: String,
    editing_search: bool,
    topics: Vec<String>,
    stats: Option<ReviewStats>,
    page: Option<ReviewPage>,
    cursor: usize,
    detail: Option<Review>,
    loading: bool,
    retrying: bool,
    banner: Option<String>,
    page_tracker: RequestTracker,
}

impl ReviewQueryState {
    /// Creates the state for a fresh mount.
    #[must_use]
    pub fn new(session: SessionId) -> Self {
        Self {
            session,
            query: ReviewQuery::new(),
            search_input: String::new(),
            editing_search: false,
            topics: Vec::new(),
            stats: None,
            page: None,
            cursor: 0,
            detail: None,
            loading: false,
            retrying: false,
            banner: None,
            page_tracker: RequestTracker::new(),
        }
    }

    /// Returns the session this state belongs to.
    #[must_use]
    pub const fn session(&self) -> SessionId {
        self.session
    }

    /// Returns the active query.
    #[must_use]
    pub const fn query(&self) -> &ReviewQuery {
        &self.query
    }

    /// Returns the raw search text as typed.
    #[must_use]
    pub fn search_input(&self) -> &str {
        &self.search_input
    }

    /// Returns whether keystrokes currently edit the search term.
    #[must_use]
    pub const fn is_editing_search(&self) -> bool {
        self.editing_search
    }

    /// Returns the known topics.
    #[must_use]
    pub fn topics(&self) -> &[String] {
        &self.topics
    }

    /// Returns the latest aggregate stats, if known.
    #[must_use]
    pub const fn stats(&self) -> Option<&ReviewStats> {
        self.stats.as_ref()
    }

    /// Returns the reviews on the current page.
    #[must_use]
    pub fn reviews(&self) -> &[Review] {
        self.page.as_ref().map_or(&[], |page| page.content.as_slice())
    }

    /// Returns the number of pages reported for the current query.
    #[must_use]
    pub fn total_pages(&self) -> u32 {
        self.page.as_ref().map_or(0, |page| page.total_pages)
    }

    /// Returns the number of matching reviews, when reported.
    #[must_use]
    pub fn total_elements(&self) -> Option<u64> {
        self.page.as_ref().and_then(|page| page.total_elements)
    }

    /// Returns the cursor index within the current page.
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Returns the review shown in the detail modal, if open.
    #[must_use]
    pub const fn detail(&self) -> Option<&Review> {
        self.detail.as_ref()
    }

    /// Returns whether a page request is outstanding.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Returns whether a retry request is outstanding.
    #[must_use]
    pub const fn is_retrying(&self) -> bool {
        self.retrying
    }

    /// Returns the failure banner, if raised.
    #[must_use]
    pub fn banner(&self) -> Option<&str> {
        self.banner.as_deref()
    }

    /// Returns the page request tracker.
    #[must_use]
    pub const fn page_tracker(&self) -> &RequestTracker {
        &self.page_tracker
    }

    /// Marks a page request as issued and returns its ticket.
    pub const fn issue_page_request(&mut self) -> Ticket {
        self.loading = true;
        self.page_tracker.issue()
    }

    /// Returns the failed-review count when retrying is possible.
    ///
    /// Retrying requires known stats with at least one failed review and no
    /// retry already in flight.
    #[must_use]
    pub fn retryable_count(&self) -> Option<u64> {
        if self.retrying {
            return None;
        }
        self.stats
            .as_ref()
            .map(|stats| stats.failed_content)
            .filter(|failed| *failed > 0)
    }

    /// Returns the label of the retry control, or `None` when disabled.
    #[must_use]
    pub fn retry_label(&self) -> Option<String> {
        self.retryable_count()
            .map(|failed| format!("Retry Failed ({failed})"))
    }

    /// Marks a retry as in flight.
    pub const fn begin_retry(&mut self) {
        self.retrying = true;
    }

    /// Clears the in-flight retry flag.
    pub const fn finish_retry(&mut self) {
        self.retrying = false;
    }

    /// Replaces the topic list.
    pub fn set_topics(&mut self, topics: Vec<String>) {
        self.topics = topics;
    }

    /// Replaces the aggregate stats.
    pub fn set_stats(&mut self, stats: Option<ReviewStats>) {
        self.stats = stats;
    }

    /// Applies a page response; returns `false` if the ticket is stale.
    pub fn apply_page(&mut self, ticket: Ticket, page: ReviewPage) -> bool {
        if !self.page_tracker.is_current(ticket) {
            return false;
        }
        self.page = Some(page);
        self.loading = false;
        self.banner = None;
        self.cursor = self.cursor.min(self.reviews().len().saturating_sub(1));
        true
    }

    /// Records a failed page response; returns `false` if the ticket is stale.
    pub fn fail_page(&mut self, ticket: Ticket) -> bool {
        if !self.page_tracker.is_current(ticket) {
            return false;
        }
        self.loading = false;
        self.banner = Some(PAGE_FAILED_BANNER.to_owned());
        true
    }

    /// Advances the topic filter through `All`, then each known topic.
    ///
    /// Returns `true` when the query changed.
    pub fn cycle_topic(&mut self, forward: bool) -> bool {
        let next = next_topic(&self.topics, self.query.topic(), forward);
        if next.as_deref() == self.query.topic() {
            return false;
        }
        self.query.set_topic(next);
        self.cursor = 0;
        true
    }

    /// Enters search editing mode.
    pub const fn start_search(&mut self) {
        self.editing_search = true;
    }

    /// Leaves search editing mode.
    pub const fn finish_search(&mut self) {
        self.editing_search = false;
    }

    /// Appends a character to the search term.
    ///
    /// Returns `true` when the effective query changed.
    pub fn push_search_char(&mut self, ch: char) -> bool {
        self.search_input.push(ch);
        self.sync_search()
    }

    /// Removes the last character of the search term.
    ///
    /// Returns `true` when the effective query changed.
    pub fn pop_search_char(&mut self) -> bool {
        if self.search_input.pop().is_none() {
            return false;
        }
        self.sync_search()
    }

    fn sync_search(&mut self) -> bool {
        let before = self.query.clone();
        self.query.set_search(&self.search_input);
        if self.query.search() == before.search() {
            self.query = before;
            return false;
        }
        self.cursor = 0;
        true
    }

    /// Moves to the next page; returns `true` when the page changed.
    pub fn next_page(&mut self) -> bool {
        self.move_page(self.query.page().saturating_add(1))
    }

    /// Moves to the previous page; returns `true` when the page changed.
    pub fn previous_page(&mut self) -> bool {
        self.move_page(self.query.page().saturating_sub(1))
    }

    fn move_page(&mut self, page: u32) -> bool {
        let changed = self.query.set_page(page, self.total_pages());
        if changed {
            self.cursor = 0;
        }
        changed
    }

    /// Moves the cursor up one row.
    pub const fn cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Moves the cursor down one row, stopping at the last review.
    pub fn cursor_down(&mut self) {
        let last = self.reviews().len().saturating_sub(1);
        self.cursor = self.cursor.saturating_add(1).min(last);
    }

    /// Opens the detail modal for the review under the cursor.
    ///
    /// Returns `false` when the page is empty.
    pub fn open_detail(&mut self) -> bool {
        self.detail = self.reviews().get(self.cursor).cloned();
        self.detail.is_some()
    }

    /// Closes the detail modal.
    pub fn close_detail(&mut self) {
        self.detail = None;
    }
}

fn next_topic(topics: &[String], current: Option<&str>, forward: bool) -> Option<String> {
    if topics.is_empty() {
        return None;
    }
    let position = current.and_then(|topic| topics.iter().position(|known| known == topic));
    let last = topics.len() - 1;
    let next_index = match (position, forward) {
        (None, true) => Some(0),
        (None, false) => Some(last),
        (Some(index), true) if index < last => Some(index + 1),
        (Some(index), false) if index > 0 => Some(index - 1),
        (Some(_), _) => None,
    };
    next_index.and_then(|index| topics.get(index)).cloned()
}

#[cfg(test)]
#[path = "review_query_tests.rs"]
mod tests;
