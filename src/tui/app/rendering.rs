//! Rendering logic for the dashboard TUI application.
//!
//! This module contains the view rendering methods that produce string output
//! for display in the terminal. These are pure query methods that read state
//! without modification.

use super::{DashboardApp, MountedView};
use crate::api::query::REVIEW_PAGE_SIZE;
use crate::tui::components::{
    CrawlerStatusViewContext, ReviewDetailViewContext, ReviewListViewContext,
    StatisticsViewContext, render_crawler_status, render_filter_bar, render_retry_control,
    render_review_detail, render_review_list, render_statistics, render_tab_bar,
};
use crate::tui::input::InputContext;
use crate::tui::state::{CrawlerPhase, ReviewQueryState, StatsSummary};

impl DashboardApp {
    /// Renders the header bar.
    pub(super) fn render_header(&self) -> String {
        let title = "crawldash - Crawler Dashboard";
        let busy = match &self.view {
            MountedView::Reviews(state) => state.is_loading() || state.is_retrying(),
            MountedView::Crawler(state) => {
                matches!(state.phase(), CrawlerPhase::Loading | CrawlerPhase::Toggling)
            }
            MountedView::None => true,
        };
        let loading_indicator = if busy { " [Loading...]" } else { "" };
        format!("{title}{loading_indicator}\n")
    }

    /// Renders the tab bar.
    pub(super) fn render_tab_bar(&self) -> String {
        render_tab_bar(self.active_tab)
    }

    /// Renders the mounted view.
    pub(super) fn render_body(&self) -> String {
        let max_width = (self.width as usize).max(1);
        match &self.view {
            MountedView::None => String::new(),
            MountedView::Reviews(state) => self.render_reviews(state, max_width),
            MountedView::Crawler(state) => render_crawler_status(&CrawlerStatusViewContext {
                state,
                max_width,
            }),
        }
    }

    fn render_reviews(&self, state: &ReviewQueryState, max_width: usize) -> String {
        if let Some(review) = state.detail() {
            return render_review_detail(&ReviewDetailViewContext { review, max_width });
        }

        let mut output = String::new();
        output.push_str(&render_filter_bar(state));
        output.push_str(&render_retry_control(state));
        output.push('\n');

        // header + tabs + blank + filter + retry + blank + status bar
        let chrome_height = 7_usize;
        let available = (self.height as usize).saturating_sub(chrome_height);
        let visible_height = available.clamp(1, REVIEW_PAGE_SIZE as usize);
        output.push_str(&render_review_list(&ReviewListViewContext {
            state,
            visible_height,
            max_width,
        }));

        let summary = StatsSummary::derive(state.stats());
        let statistics = render_statistics(&StatisticsViewContext {
            summary: summary.as_ref(),
            max_width,
        });
        if !statistics.is_empty() {
            output.push('\n');
            output.push_str(&statistics);
        }
        output
    }

    /// Renders the status bar with help hints.
    pub(super) fn render_status_bar(&self) -> String {
        let hints = match self.input_context() {
            InputContext::ReviewList => self.review_list_status_hints(),
            InputContext::ReviewDetail => "Esc:close  ?:help  q:quit",
            InputContext::SearchEditing => "type to search  Backspace:delete  Enter/Esc:done",
            InputContext::Crawler => "s:start/stop  r:refresh  Tab:switch  ?:help  q:quit",
        };
        format!("{hints}\n")
    }

    const fn review_list_status_hints(&self) -> &'static str {
        if self.width <= 80 {
            "j/k:move  Enter:open  t:topic  /:search  n/p:page  ?:help  q:quit"
        } else {
            "j/k:move  Enter:open  t/T:topic  /:search  n/p:page  R:retry  r:refresh  Tab:switch  ?:help  q:quit"
        }
    }

    /// Renders the help overlay.
    pub(super) fn render_help_overlay(&self) -> String {
        if !self.show_help {
            return String::new();
        }

        let help_text = r"
=== Keyboard Shortcuts ===

Tabs:
  Tab        Next tab
  1          Reviews
  2          Crawler

Reviews:
  j, Down    Move cursor down
  k, Up      Move cursor up
  Enter      Open review detail
  Esc        Close review detail
  t / T      Next / previous topic filter
  /          Edit search (Enter or Esc to finish)
  n, Right   Next page
  p, Left    Previous page
  R          Retry failed reviews
  r          Refresh

Crawler:
  s          Start or stop the crawler
  r          Refresh status now

Other:
  ?          Toggle this help
  q, Ctrl-C  Quit

Press any key to close this help.
";
        help_text.to_owned()
    }
}
