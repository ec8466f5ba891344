//! planner-core - Core library for the conference planner front end
//!
//! This crate provides the logic behind the schedule pages served by planner-server:
//!
//! - **types**: Sessions and view-model types shared with the back-end API
//! - **schedule**: Day offsets and per-day grouping of sessions
//! - **client**: Back-end API contract and its HTTP implementation
//! - **auth**: Named authorization policies ("Admin")
//! - **page**: The schedule page controller

pub mod auth;
pub mod client;
pub mod error;
pub mod page;
pub mod schedule;
pub mod types;

// Re-export commonly used types
pub use auth::{AuthorizationService, PolicyAuthorizationService, UserContext, ADMIN_POLICY};
pub use client::ApiClient;
#[cfg(feature = "client")]
pub use client::HttpApiClient;
pub use error::{Error, Result};
pub use page::{PageController, SchedulePage, SessionSource};
pub use types::{DayOffset, Session, SessionRef, TimeSlot};
