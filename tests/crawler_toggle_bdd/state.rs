//! Scenario state for crawler toggle BDD tests.

use crawldash::tui::DashboardApp;
use rstest_bdd::Slot;
use rstest_bdd_macros::ScenarioState;
use serde_json::{Value, json};
use wiremock::MockServer;

use super::support::runtime::SharedRuntime;

/// State shared across steps in a crawler toggle scenario.
#[derive(ScenarioState, Default)]
pub(crate) struct ToggleState {
    /// Runtime driving the gateway requests.
    pub(crate) runtime: Slot<SharedRuntime>,
    /// Mock crawler backend.
    pub(crate) backend: Slot<MockServer>,
    /// The TUI application model under test.
    pub(crate) app: Slot<DashboardApp>,
}

/// Builds a crawler status payload in the backend's JSON shape.
pub(crate) fn status_body(running: bool) -> Value {
    let topic = if running { "Cardiology" } else { "" };
    json!({
        "running": running,
        "totalProcessed": 12,
        "successfulReviews": 11,
        "failedReviews": 1,
        "crawlingSpeed": 2.5,
        "currentTopic": topic,
        "newReviews": [],
        "errorLog": "",
        "processedTopics": ""
    })
}
