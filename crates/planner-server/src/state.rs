//! Application state.

use planner_core::{ApiClient, AuthorizationService, PageController, SessionSource};
use std::sync::Arc;
use std::time::Instant;

use crate::config::Config;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Server configuration
    pub config: Arc<Config>,
    /// Controller for the full conference schedule
    pub schedule: PageController,
    /// Controller for the attendee's own agenda
    pub agenda: PageController,
    /// Server start time
    pub start_time: Instant,
}

impl AppState {
    /// Create new application state
    pub fn new(
        config: Config,
        api: Arc<dyn ApiClient>,
        authorization: Arc<dyn AuthorizationService>,
    ) -> Arc<Self> {
        Arc::new(Self {
            config: Arc::new(config),
            schedule: PageController::new(
                Arc::clone(&api),
                Arc::clone(&authorization),
                SessionSource::All,
            ),
            agenda: PageController::new(api, authorization, SessionSource::Attendee),
            start_time: Instant::now(),
        })
    }
}
