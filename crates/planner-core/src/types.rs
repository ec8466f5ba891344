//! Shared types for planner-core.
//!
//! These types are used by both the API client and the page controller.

use chrono::{DateTime, FixedOffset, Weekday};
use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Entity Types
// ─────────────────────────────────────────────────────────────────────────────

/// A conference session as returned by the back-end
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: i32,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, rename = "abstract")]
    pub summary: Option<String>,
    #[serde(default)]
    pub track_id: Option<i32>,
    #[serde(default)]
    pub track_name: Option<String>,
    #[serde(default)]
    pub start_time: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub end_time: Option<DateTime<FixedOffset>>,
}

/// Reference to a session an attendee has on their schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRef {
    pub id: i32,
}

impl From<&Session> for SessionRef {
    fn from(session: &Session) -> Self {
        Self { id: session.id }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// View Types
// ─────────────────────────────────────────────────────────────────────────────

/// A conference day, relative to the first day of the conference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayOffset {
    pub offset: i64,
    pub day_of_week: Weekday,
}

/// Sessions sharing the same start time
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlot {
    pub start_time: DateTime<FixedOffset>,
    pub sessions: Vec<Session>,
}
