//! Dashboard tabs.

use crate::api::error::DashboardError;

/// A top-level dashboard tab; exactly one is mounted at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    /// Review listing with statistics.
    #[default]
    Reviews,
    /// Live crawler status and controls.
    Crawler,
}

impl Tab {
    /// All tabs in display order.
    pub const ALL: [Self; 2] = [Self::Reviews, Self::Crawler];

    /// Returns the tab title.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Reviews => "Reviews",
            Self::Crawler => "Crawler",
        }
    }

    /// Returns the tab that follows this one, wrapping around.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Reviews => Self::Crawler,
            Self::Crawler => Self::Reviews,
        }
    }

    /// Parses a tab name case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::Configuration`] for unknown names.
    pub fn parse(name: &str) -> Result<Self, DashboardError> {
        match name.trim().to_ascii_lowercase().as_str() {
            "reviews" => Ok(Self::Reviews),
            "crawler" => Ok(Self::Crawler),
            other => Err(DashboardError::Configuration {
                message: format!("unknown start tab '{other}' (expected 'reviews' or 'crawler')"),
            }),
        }
    }
}
