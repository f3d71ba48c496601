// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Exercise model for storage and API.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize, Serializer};

/// Logged exercise stored in the `exercises` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    /// Opaque id (also used as document ID)
    pub id: String,
    /// Owning user's id
    pub user_id: String,
    /// What was done
    pub description: String,
    /// Duration in minutes, never negative
    pub duration: f64,
    /// Calendar day of the exercise (stored as `YYYY-MM-DD`)
    pub date: NaiveDate,
    /// When this record was created (RFC3339, nanosecond precision)
    pub created_at: String,
}

/// Date window and limit for listing a user's exercises.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExerciseQuery {
    /// First day included
    pub from: NaiveDate,
    /// Last day included
    pub to: NaiveDate,
    /// Maximum number of entries; `None` returns all matches
    pub limit: Option<u32>,
}

impl ExerciseQuery {
    /// Whether `exercise` falls inside the inclusive date window.
    pub fn contains(&self, exercise: &Exercise) -> bool {
        exercise.date >= self.from && exercise.date <= self.to
    }

    /// Select `user_id`'s exercises matching this query, in [`log_order`],
    /// truncated to the limit.
    pub fn apply<'a>(
        &self,
        user_id: &str,
        exercises: impl IntoIterator<Item = &'a Exercise>,
    ) -> Vec<Exercise> {
        let mut matches: Vec<Exercise> = exercises
            .into_iter()
            .filter(|e| e.user_id == user_id && self.contains(e))
            .cloned()
            .collect();

        // Stable sort keeps insertion order for identical timestamps.
        matches.sort_by(log_order);
        if let Some(limit) = self.limit {
            matches.truncate(limit as usize);
        }
        matches
    }
}

/// Ordering used for exercise logs: by date, then creation time.
pub fn log_order(a: &Exercise, b: &Exercise) -> std::cmp::Ordering {
    a.date
        .cmp(&b.date)
        .then_with(|| a.created_at.cmp(&b.created_at))
}

/// Serialize a duration as an integer JSON number when it has no fraction.
///
/// Clients compare `duration` against the integer they submitted, so `30`
/// must not come back as `30.0`.
pub fn serialize_duration<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.fract() == 0.0 && value.abs() < (1u64 << 53) as f64 {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}
