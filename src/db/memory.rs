// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-process document store.
//!
//! Keeps both collections in insertion order behind one lock, so username
//! uniqueness is checked and claimed in a single critical section.

use crate::error::AppError;
use crate::models::{Exercise, ExerciseQuery, User};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Default)]
struct Collections {
    users: Vec<User>,
    usernames: HashSet<String>,
    exercises: Vec<Exercise>,
}

/// In-memory database, cheap to clone (shared state).
#[derive(Clone, Default)]
pub struct MemoryDb {
    inner: Arc<RwLock<Collections>>,
}

impl MemoryDb {
    pub fn new() -> Self {
        Self::default()
    }

    // ─── User Operations ─────────────────────────────────────────

    pub async fn insert_user(&self, user: &User) -> Result<(), AppError> {
        let mut guard = self.inner.write().await;
        if !guard.usernames.insert(user.username.clone()) {
            return Err(AppError::DuplicateUsername(user.username.clone()));
        }
        guard.users.push(user.clone());
        Ok(())
    }

    pub async fn get_user(&self, user_id: &str) -> Result<Option<User>, AppError> {
        let guard = self.inner.read().await;
        Ok(guard.users.iter().find(|u| u.id == user_id).cloned())
    }

    pub async fn list_users(&self) -> Result<Vec<User>, AppError> {
        Ok(self.inner.read().await.users.clone())
    }

    // ─── Exercise Operations ─────────────────────────────────────

    pub async fn insert_exercise(&self, exercise: &Exercise) -> Result<(), AppError> {
        self.inner.write().await.exercises.push(exercise.clone());
        Ok(())
    }

    pub async fn find_exercises(
        &self,
        user_id: &str,
        query: &ExerciseQuery,
    ) -> Result<Vec<Exercise>, AppError> {
        let guard = self.inner.read().await;
        Ok(query.apply(user_id, &guard.exercises))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn user(id: &str, username: &str) -> User {
        User {
            id: id.to_string(),
            username: username.to_string(),
            created_at: "2024-01-01T00:00:00.000000000Z".to_string(),
        }
    }

    fn exercise(id: &str, user_id: &str, date: &str) -> Exercise {
        Exercise {
            id: id.to_string(),
            user_id: user_id.to_string(),
            description: format!("exercise {}", id),
            duration: 10.0,
            date: date.parse().unwrap(),
            created_at: format!("2024-06-01T00:00:00.00000000{}Z", id),
        }
    }

    fn window(from: &str, to: &str, limit: Option<u32>) -> ExerciseQuery {
        ExerciseQuery {
            from: from.parse::<NaiveDate>().unwrap(),
            to: to.parse::<NaiveDate>().unwrap(),
            limit,
        }
    }

    #[tokio::test]
    async fn test_duplicate_username_keeps_one_user() {
        let db = MemoryDb::new();
        db.insert_user(&user("1", "alice")).await.unwrap();

        let err = db.insert_user(&user("2", "alice")).await.unwrap_err();
        assert!(matches!(err, AppError::DuplicateUsername(name) if name == "alice"));

        let users = db.list_users().await.unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].id, "1");
    }

    #[tokio::test]
    async fn test_users_listed_in_registration_order() {
        let db = MemoryDb::new();
        for (id, name) in [("1", "carol"), ("2", "alice"), ("3", "bob")] {
            db.insert_user(&user(id, name)).await.unwrap();
        }

        let names: Vec<String> = db
            .list_users()
            .await
            .unwrap()
            .into_iter()
            .map(|u| u.username)
            .collect();
        assert_eq!(names, vec!["carol", "alice", "bob"]);
    }

    #[tokio::test]
    async fn test_find_exercises_filters_by_user_and_window() {
        let db = MemoryDb::new();
        db.insert_exercise(&exercise("1", "u1", "2023-12-31")).await.unwrap();
        db.insert_exercise(&exercise("2", "u1", "2024-01-01")).await.unwrap();
        db.insert_exercise(&exercise("3", "u2", "2024-01-15")).await.unwrap();
        db.insert_exercise(&exercise("4", "u1", "2024-01-31")).await.unwrap();
        db.insert_exercise(&exercise("5", "u1", "2024-02-01")).await.unwrap();

        let found = db
            .find_exercises("u1", &window("2024-01-01", "2024-01-31", None))
            .await
            .unwrap();

        let ids: Vec<&str> = found.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "4"]);
    }

    #[tokio::test]
    async fn test_find_exercises_orders_by_date_then_applies_limit() {
        let db = MemoryDb::new();
        db.insert_exercise(&exercise("1", "u1", "2024-03-01")).await.unwrap();
        db.insert_exercise(&exercise("2", "u1", "2024-01-01")).await.unwrap();
        db.insert_exercise(&exercise("3", "u1", "2024-02-01")).await.unwrap();

        let found = db
            .find_exercises("u1", &window("1970-01-01", "2024-12-31", Some(2)))
            .await
            .unwrap();

        let ids: Vec<&str> = found.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "3"]);
    }
}
