//! Schedule page routes.
//!
//! `/` shows the whole conference, `/my-agenda` only the sessions the user
//! attends. Both accept `?day=N` and the same add/remove form posts, which
//! redirect back to the page they came from.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    response::Redirect,
    routing::{get, post},
    Extension, Form, Json, Router,
};
use planner_core::{PageController, SchedulePage, UserContext};
use serde::Deserialize;
use std::sync::Arc;

use crate::error::AppError;
use crate::state::AppState;

const SCHEDULE_PATH: &str = "/";
const AGENDA_PATH: &str = "/my-agenda";

/// Create schedule router
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(show_schedule).post(add_to_schedule))
        .route("/remove", post(remove_from_schedule))
        .route("/my-agenda", get(show_agenda).post(add_to_agenda))
        .route("/my-agenda/remove", post(remove_from_agenda))
}

#[derive(Debug, Deserialize)]
pub struct DayQuery {
    #[serde(default)]
    pub day: i64,
}

/// Selected day; a missing or malformed `day` falls back to the first day
fn selected_day(query: Result<Query<DayQuery>, QueryRejection>) -> i64 {
    query.map(|Query(q)| q.day).unwrap_or_default()
}

#[derive(Debug, Deserialize)]
pub struct SessionForm {
    #[serde(rename = "sessionId")]
    pub session_id: i32,
}

/// Full conference schedule
pub async fn show_schedule(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<UserContext>,
    query: Result<Query<DayQuery>, QueryRejection>,
) -> Result<Json<SchedulePage>, AppError> {
    Ok(Json(state.schedule.on_get(&user, selected_day(query)).await?))
}

/// Attendee's own agenda
pub async fn show_agenda(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<UserContext>,
    query: Result<Query<DayQuery>, QueryRejection>,
) -> Result<Json<SchedulePage>, AppError> {
    Ok(Json(state.agenda.on_get(&user, selected_day(query)).await?))
}

pub async fn add_to_schedule(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<UserContext>,
    Form(form): Form<SessionForm>,
) -> Result<Redirect, AppError> {
    add_session(&state.schedule, &user, form, SCHEDULE_PATH).await
}

pub async fn remove_from_schedule(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<UserContext>,
    Form(form): Form<SessionForm>,
) -> Result<Redirect, AppError> {
    remove_session(&state.schedule, &user, form, SCHEDULE_PATH).await
}

pub async fn add_to_agenda(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<UserContext>,
    Form(form): Form<SessionForm>,
) -> Result<Redirect, AppError> {
    add_session(&state.agenda, &user, form, AGENDA_PATH).await
}

pub async fn remove_from_agenda(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<UserContext>,
    Form(form): Form<SessionForm>,
) -> Result<Redirect, AppError> {
    remove_session(&state.agenda, &user, form, AGENDA_PATH).await
}

async fn add_session(
    page: &PageController,
    user: &UserContext,
    form: SessionForm,
    back_to: &str,
) -> Result<Redirect, AppError> {
    page.on_post_add(user, form.session_id).await?;
    Ok(Redirect::to(back_to))
}

async fn remove_session(
    page: &PageController,
    user: &UserContext,
    form: SessionForm,
    back_to: &str,
) -> Result<Redirect, AppError> {
    page.on_post_remove(user, form.session_id).await?;
    Ok(Redirect::to(back_to))
}
