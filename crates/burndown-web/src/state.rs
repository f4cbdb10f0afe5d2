//! Application state.

use burndown_core::board::ListTitles;
use burndown_core::trello::BoardApi;
use std::sync::Arc;
use std::time::Duration;

/// Default wall-clock budget for one burndown request.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Application state shared across handlers. Read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub api: Arc<dyn BoardApi>,
    pub titles: ListTitles,
    pub request_timeout: Duration,
}

impl AppState {
    pub fn new(api: Arc<dyn BoardApi>) -> Self {
        Self {
            api,
            titles: ListTitles::default(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}
