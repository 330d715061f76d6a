//! Shared Tokio runtime and mock backend helpers for integration tests.

use std::any::Any;
use std::cell::RefCell;
use std::io;
use std::rc::Rc;
use std::time::Duration;

use bubbletea_rs::Cmd;
use crawldash::tui::messages::AppMsg;
use crawldash::{ApiSettings, DashboardError, HttpDashboardGateway};
use rstest_bdd::Slot;
use tokio::runtime::Runtime;
use wiremock::MockServer;

/// Shared runtime wrapper that can be stored in an `rstest-bdd` Slot.
#[derive(Clone)]
pub struct SharedRuntime(Rc<RefCell<Runtime>>);

impl SharedRuntime {
    pub fn new(runtime: Runtime) -> Self {
        Self(Rc::new(RefCell::new(runtime)))
    }

    pub fn block_on<F: std::future::Future>(&self, future: F) -> F::Output {
        self.0.borrow().block_on(future)
    }

    /// Runs a TUI command to completion and returns the message it emits.
    pub fn resolve(&self, cmd: Cmd) -> Option<AppMsg> {
        let emitted: Box<dyn Any + Send> = self.block_on(cmd)?;
        emitted.downcast::<AppMsg>().ok().map(|message| *message)
    }
}

/// Ensures a Tokio runtime and a mock crawler backend are initialised.
///
/// # Errors
///
/// Returns an error if the Tokio runtime cannot be created or if the slots
/// behave unexpectedly.
pub fn ensure_runtime_and_backend(
    runtime: &Slot<SharedRuntime>,
    backend: &Slot<MockServer>,
) -> Result<SharedRuntime, io::Error> {
    if runtime.with_ref(|_| ()).is_none() {
        runtime.set(SharedRuntime::new(Runtime::new()?));
    }

    let shared_runtime = runtime
        .get()
        .ok_or_else(|| io::Error::other("runtime not initialised after set"))?;

    if backend.with_ref(|_| ()).is_none() {
        backend.set(shared_runtime.block_on(MockServer::start()));
    }

    Ok(shared_runtime)
}

/// Builds an HTTP gateway pointing at the mock backend's `/api` root.
///
/// # Errors
///
/// Returns an error when the mock server URI cannot form valid settings.
pub fn gateway_for(backend: &MockServer) -> Result<HttpDashboardGateway, DashboardError> {
    let settings = ApiSettings::parse(&format!("{}/api", backend.uri()), Duration::from_secs(5))?;
    HttpDashboardGateway::new(settings)
}

/// Counts the requests the backend received for `method` and `path`.
pub async fn count_requests(backend: &MockServer, method: &str, path: &str) -> usize {
    backend
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|request| request.method.as_str() == method && request.url.path() == path)
        .count()
}
