//! Query state for the paginated review listing.
//!
//! The dashboard keeps a 1-based page number for display while the backend
//! expects a zero-based offset. Changing the topic or the search term always
//! returns to the first page.

/// Fixed number of reviews requested per page.
pub const REVIEW_PAGE_SIZE: u32 = 10;

/// Filter and pagination parameters for `/reviews`.
///
/// # Example
///
/// ```
/// use crawldash::api::ReviewQuery;
///
/// let mut query = ReviewQuery::new().with_page(3);
/// query.set_topic(Some("AI".to_owned()));
/// assert_eq!(query.page(), 1);
/// assert_eq!(query.zero_based_page(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewQuery {
    topic: Option<String>,
    search: Option<String>,
    page: u32,
}

impl Default for ReviewQuery {
    fn default() -> Self {
        Self::new()
    }
}

impl ReviewQuery {
    /// Creates an unfiltered query for the first page.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            topic: None,
            search: None,
            page: 1,
        }
    }

    /// Sets the topic filter without resetting the page.
    #[must_use]
    pub fn with_topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = non_blank(topic.into());
        self
    }

    /// Sets the search term without resetting the page.
    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = non_blank(search.into());
        self
    }

    /// Sets the 1-based page; zero is treated as the first page.
    #[must_use]
    pub const fn with_page(mut self, page: u32) -> Self {
        self.page = if page == 0 { 1 } else { page };
        self
    }

    /// Returns the active topic filter.
    #[must_use]
    pub fn topic(&self) -> Option<&str> {
        self.topic.as_deref()
    }

    /// Returns the active search term.
    #[must_use]
    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    /// Returns the 1-based page number.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Returns the zero-based page offset sent to the backend.
    #[must_use]
    pub const fn zero_based_page(&self) -> u32 {
        self.page.saturating_sub(1)
    }

    /// Replaces the topic filter and returns to the first page.
    pub fn set_topic(&mut self, topic: Option<String>) {
        self.topic = topic.and_then(non_blank);
        self.page = 1;
    }

    /// Replaces the search term and returns to the first page.
    pub fn set_search(&mut self, search: &str) {
        self.search = non_blank(search.to_owned());
        self.page = 1;
    }

    /// Moves to the given 1-based page, clamped to `1..=total_pages`.
    ///
    /// Returns `true` when the page changed.
    pub fn set_page(&mut self, page: u32, total_pages: u32) -> bool {
        let last = total_pages.max(1);
        let clamped = page.clamp(1, last);
        let changed = clamped != self.page;
        self.page = clamped;
        changed
    }

    /// Returns the query string pairs in the order the backend expects.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("page", self.zero_based_page().to_string()),
            ("size", REVIEW_PAGE_SIZE.to_string()),
        ];
        if let Some(topic) = &self.topic {
            pairs.push(("topic", topic.clone()));
        }
        if let Some(search) = &self.search {
            pairs.push(("search", search.clone()));
        }
        pairs
    }
}

fn non_blank(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}
