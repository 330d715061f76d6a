//! State management for the dashboard views.
//!
//! Each view owns a state value created fresh on mount. The types here are
//! pure: they never perform I/O, which keeps the phase machine, query
//! handling and statistics derivations unit-testable.

mod crawler;
mod request_tracker;
mod review_query;
mod stats_summary;

pub use crawler::{CrawlerPhase, CrawlerViewState, FETCH_FAILED_BANNER, toggle_failed_banner};
pub use request_tracker::{RequestTracker, SessionId, Ticket};
pub use review_query::{PAGE_FAILED_BANNER, ReviewQueryState};
pub use stats_summary::{
    SliceKind, StatsSummary, StatusSlice, TopicBar, proportional_cells, success_rate_percent,
};
