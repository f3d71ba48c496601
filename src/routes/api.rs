// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Exercise tracker API routes.

use crate::error::{AppError, Result};
use crate::ids::{is_valid_id, new_id};
use crate::models::exercise::serialize_duration;
use crate::models::{Exercise, ExerciseQuery, User};
use crate::time_utils::{format_calendar_date, format_utc_rfc3339, parse_calendar_date, today};
use crate::AppState;
use axum::{
    extract::{
        rejection::{FormRejection, QueryRejection},
        Path, Query, State,
    },
    routing::{get, post},
    Form, Json, Router,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

const MAX_USERNAME_LEN: u64 = 100;
const MAX_DESCRIPTION_LEN: u64 = 500;

/// API routes. No authentication: every route is public.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/users", post(register_user).get(list_users))
        .route("/api/users/{id}/exercises", post(log_exercise))
        .route("/api/users/{id}/logs", get(list_exercises))
}

/// Resolve a path id to a stored user, or `UserNotFound`.
async fn require_user(state: &AppState, user_id: &str) -> Result<User> {
    // Ids we never issued can't exist; don't send them to the store.
    if !is_valid_id(user_id) {
        return Err(AppError::UserNotFound(user_id.to_string()));
    }

    state
        .db
        .get_user(user_id)
        .await?
        .ok_or_else(|| AppError::UserNotFound(user_id.to_string()))
}

// ─── Users ───────────────────────────────────────────────────

#[derive(Deserialize, Validate)]
struct RegisterForm {
    #[serde(default)]
    #[validate(length(min = 1, max = MAX_USERNAME_LEN, message = "username is required (at most 100 characters)"))]
    username: String,
}

/// A user as returned by the API.
#[derive(Serialize, Debug)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct UserResponse {
    pub username: String,
    #[serde(rename = "_id")]
    pub id: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            username: user.username,
            id: user.id,
        }
    }
}

/// Register a new username.
async fn register_user(
    State(state): State<Arc<AppState>>,
    form: std::result::Result<Form<RegisterForm>, FormRejection>,
) -> Result<Json<UserResponse>> {
    let Form(mut form) = form?;
    form.username = form.username.trim().to_string();
    form.validate()?;

    let user = User {
        id: new_id()?,
        username: form.username,
        created_at: format_utc_rfc3339(Utc::now()),
    };
    state.db.insert_user(&user).await?;

    tracing::info!(user_id = %user.id, username = %user.username, "User registered");

    Ok(Json(user.into()))
}

/// List every registered user in registration order.
async fn list_users(State(state): State<Arc<AppState>>) -> Result<Json<Vec<UserResponse>>> {
    let users = state.db.list_users().await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

// ─── Exercises ───────────────────────────────────────────────

#[derive(Deserialize, Validate)]
struct ExerciseForm {
    #[serde(default)]
    #[validate(length(min = 1, max = MAX_DESCRIPTION_LEN, message = "description is required (at most 500 characters)"))]
    description: String,
    #[serde(default)]
    duration: String,
    /// Calendar date; absent or empty means today
    date: Option<String>,
}

fn parse_duration(raw: &str) -> Result<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(AppError::Validation("duration is required".to_string()));
    }

    let duration: f64 = raw
        .parse()
        .map_err(|_| AppError::Validation("duration must be a number".to_string()))?;

    if !duration.is_finite() || duration < 0.0 {
        return Err(AppError::Validation(
            "duration must be a non-negative number".to_string(),
        ));
    }
    Ok(duration)
}

/// Parse an optional date parameter; empty strings count as absent.
fn parse_optional_date(raw: Option<&str>, name: &str) -> Result<Option<NaiveDate>> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(s) => parse_calendar_date(s).map(Some).ok_or_else(|| {
            AppError::Validation(format!(
                "Invalid '{}' parameter: expected YYYY-MM-DD or an RFC3339 timestamp \
                 (percent-encode '+' in offsets as %2B)",
                name
            ))
        }),
    }
}

/// Logged exercise with the owner's username resolved.
#[derive(Serialize, Debug)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ExerciseResponse {
    pub username: String,
    pub description: String,
    #[serde(serialize_with = "serialize_duration")]
    pub duration: f64,
    pub date: String,
    /// The owning user's id
    #[serde(rename = "_id")]
    pub id: String,
}

/// Log an exercise against an existing user.
async fn log_exercise(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    form: std::result::Result<Form<ExerciseForm>, FormRejection>,
) -> Result<Json<ExerciseResponse>> {
    let Form(mut form) = form?;
    form.description = form.description.trim().to_string();
    form.validate()?;
    let duration = parse_duration(&form.duration)?;
    let date = parse_optional_date(form.date.as_deref(), "date")?.unwrap_or_else(today);

    let user = require_user(&state, &user_id).await?;

    let exercise = Exercise {
        id: new_id()?,
        user_id: user.id,
        description: form.description,
        duration,
        date,
        created_at: format_utc_rfc3339(Utc::now()),
    };
    state.db.insert_exercise(&exercise).await?;

    tracing::info!(
        user_id = %exercise.user_id,
        exercise_id = %exercise.id,
        date = %exercise.date,
        "Exercise logged"
    );

    Ok(Json(ExerciseResponse {
        username: user.username,
        description: exercise.description,
        duration: exercise.duration,
        date: format_calendar_date(exercise.date),
        id: exercise.user_id,
    }))
}

// ─── Exercise Log ────────────────────────────────────────────

#[derive(Deserialize, Debug)]
struct LogsQuery {
    /// First day included (default: Unix epoch)
    from: Option<String>,
    /// Last day included (default: today)
    to: Option<String>,
    /// Maximum entries; 0 or absent means unlimited
    limit: Option<String>,
}

impl LogsQuery {
    fn into_exercise_query(self) -> Result<ExerciseQuery> {
        let from = parse_optional_date(self.from.as_deref(), "from")?
            .unwrap_or_else(|| DateTime::<Utc>::UNIX_EPOCH.date_naive());
        let to = parse_optional_date(self.to.as_deref(), "to")?.unwrap_or_else(today);

        let limit = match self.limit.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            None => None,
            Some(raw) => {
                let n: u32 = raw.parse().map_err(|_| {
                    AppError::Validation(
                        "Invalid 'limit' parameter: expected a non-negative integer".to_string(),
                    )
                })?;
                (n > 0).then_some(n)
            }
        };

        Ok(ExerciseQuery { from, to, limit })
    }
}

/// One entry of a user's exercise log.
#[derive(Serialize, Debug)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct LogEntry {
    pub description: String,
    #[serde(serialize_with = "serialize_duration")]
    pub duration: f64,
    pub date: String,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct LogResponse {
    pub username: String,
    /// Number of entries in `log` (after `limit`)
    pub count: usize,
    #[serde(rename = "_id")]
    pub id: String,
    pub log: Vec<LogEntry>,
}

/// Get a user's exercise log, filtered by date and optionally limited.
async fn list_exercises(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    query: std::result::Result<Query<LogsQuery>, QueryRejection>,
) -> Result<Json<LogResponse>> {
    let Query(params) = query?;
    tracing::debug!(user_id = %user_id, params = ?params, "Fetching exercise log");

    let query = params.into_exercise_query()?;
    let user = require_user(&state, &user_id).await?;

    let log: Vec<LogEntry> = state
        .db
        .find_exercises(&user.id, &query)
        .await?
        .into_iter()
        .map(|e| LogEntry {
            description: e.description,
            duration: e.duration,
            date: format_calendar_date(e.date),
        })
        .collect();

    Ok(Json(LogResponse {
        username: user.username,
        count: log.len(),
        id: user.id,
        log,
    }))
}
