//! UI components for the dashboard TUI.
//!
//! Components are pure render functions over borrowed view state. Each
//! takes a small `*ViewContext` bundling the data and layout limits it needs.

mod crawler_status;
mod review_detail;
mod review_list;
mod statistics;
mod tabs;
mod text;

pub use crawler_status::{CrawlerStatusViewContext, render_crawler_status};
pub use review_detail::{ReviewDetailViewContext, render_review_detail};
pub use review_list::{
    ReviewListViewContext, render_filter_bar, render_retry_control, render_review_list,
};
pub use statistics::{StatisticsViewContext, render_statistics};
pub use tabs::render_tab_bar;
pub use text::{render_bar, truncate_to_width, wrap_words};
