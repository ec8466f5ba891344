//! Schedule page controller.
//!
//! Builds the view model for the conference schedule and handles the
//! add/remove form posts. All state is recomputed per request; the controller
//! only holds its collaborators.

use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::auth::{AuthorizationService, UserContext, ADMIN_POLICY};
use crate::client::ApiClient;
use crate::error::Result;
use crate::schedule;
use crate::types::{DayOffset, Session, SessionRef, TimeSlot};

/// Where the page gets its session list from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionSource {
    /// Every session of the conference
    #[default]
    All,
    /// Only the sessions on the current attendee's schedule
    Attendee,
}

/// View model for one render of the schedule page
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulePage {
    pub is_admin: bool,
    pub user_sessions: Vec<i32>,
    pub day_offsets: Vec<DayOffset>,
    pub current_day_offset: i64,
    pub sessions: Vec<TimeSlot>,
}

/// Controller behind the schedule pages
#[derive(Clone)]
pub struct PageController {
    api: Arc<dyn ApiClient>,
    authorization: Arc<dyn AuthorizationService>,
    source: SessionSource,
}

impl PageController {
    pub fn new(
        api: Arc<dyn ApiClient>,
        authorization: Arc<dyn AuthorizationService>,
        source: SessionSource,
    ) -> Self {
        Self {
            api,
            authorization,
            source,
        }
    }

    /// Build the page for conference day `day` (0 = first day)
    pub async fn on_get(&self, user: &UserContext, day: i64) -> Result<SchedulePage> {
        let is_admin = match self.authorization.authorize(user, ADMIN_POLICY).await {
            Ok(granted) => granted,
            Err(e) => {
                warn!("Admin check failed for {:?}: {}", user.name, e);
                false
            }
        };

        let attending = self.api.get_sessions_by_attendee(user.name()).await?;
        let user_sessions: Vec<i32> = attending.iter().map(|s| s.id).collect();

        let sessions = self.load_sessions(&attending).await?;

        let day_offsets = schedule::day_offsets(&sessions);
        let slots = schedule::sessions_for_day(&sessions, day);
        debug!(
            "Schedule for day {}: {} days, {} sessions in {} slots",
            day,
            day_offsets.len(),
            sessions.len(),
            slots.len()
        );

        Ok(SchedulePage {
            is_admin,
            user_sessions,
            day_offsets,
            current_day_offset: day,
            sessions: slots,
        })
    }

    /// Add a session to the current user's schedule
    pub async fn on_post_add(&self, user: &UserContext, session_id: i32) -> Result<()> {
        debug!("Adding session {} for {:?}", session_id, user.name);
        self.api
            .add_session_to_attendee(user.name(), session_id)
            .await
    }

    /// Remove a session from the current user's schedule
    pub async fn on_post_remove(&self, user: &UserContext, session_id: i32) -> Result<()> {
        debug!("Removing session {} for {:?}", session_id, user.name);
        self.api
            .remove_session_from_attendee(user.name(), session_id)
            .await
    }

    async fn load_sessions(&self, attending: &[SessionRef]) -> Result<Vec<Session>> {
        let sessions = self.api.get_sessions().await?;
        Ok(match self.source {
            SessionSource::All => sessions,
            SessionSource::Attendee => sessions
                .into_iter()
                .filter(|s| attending.contains(&SessionRef::from(s)))
                .collect(),
        })
    }
}
