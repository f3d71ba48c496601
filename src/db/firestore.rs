// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore client wrapper with typed operations.
//!
//! Provides high-level operations for:
//! - Users (profile storage, username reservations)
//! - Exercises (logged entries, date-window queries)

use crate::db::collections;
use crate::error::AppError;
use crate::models::user::UsernameClaim;
use crate::models::{Exercise, ExerciseQuery, User};
use firestore::errors::FirestoreError;
use firestore::FirestoreQueryDirection;

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: Option<firestore::FirestoreDb>,
}

fn store_error(e: FirestoreError) -> AppError {
    AppError::StoreUnavailable(e.to_string())
}

/// Document id of a username reservation.
///
/// Hex of the UTF-8 bytes: always a legal Firestore id (never `.`, `..`
/// or `__*__`), and 100 characters stay well under the 1500-byte limit.
fn username_claim_id(username: &str) -> String {
    hex::encode(username.as_bytes())
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        // If the emulator environment variable is set, use unauthenticated connection
        // to avoid local credential warnings and leakage.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id).await.map_err(|e| {
            AppError::StoreUnavailable(format!("Failed to connect to Firestore: {}", e))
        })?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::StoreUnavailable(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a disconnected client for testing.
    ///
    /// All database operations return `StoreUnavailable`.
    pub fn new_mock() -> Self {
        Self { client: None }
    }

    /// Helper to get the client or return an error if offline.
    fn get_client(&self) -> Result<&firestore::FirestoreDb, AppError> {
        self.client.as_ref().ok_or_else(|| {
            AppError::StoreUnavailable("Database not connected (offline mode)".to_string())
        })
    }

    // ─── User Operations ─────────────────────────────────────────

    /// Register a user.
    ///
    /// The username is claimed first with a create-only write, so a
    /// concurrent registration of the same name loses with a conflict.
    /// If the profile write then fails the name stays claimed.
    pub async fn insert_user(&self, user: &User) -> Result<(), AppError> {
        let client = self.get_client()?;
        let claim_id = username_claim_id(&user.username);

        let claimed: Result<UsernameClaim, FirestoreError> = client
            .fluent()
            .insert()
            .into(collections::USERNAMES)
            .document_id(&claim_id)
            .object(&UsernameClaim {
                user_id: user.id.clone(),
            })
            .execute()
            .await;

        match claimed {
            Ok(_) => {}
            Err(FirestoreError::DataConflictError(_)) => {
                return Err(AppError::DuplicateUsername(user.username.clone()));
            }
            Err(e) => return Err(store_error(e)),
        }

        let _: User = client
            .fluent()
            .insert()
            .into(collections::USERS)
            .document_id(&user.id)
            .object(user)
            .execute()
            .await
            .map_err(store_error)?;

        tracing::debug!(user_id = %user.id, "User document created");
        Ok(())
    }

    /// Get a user by id.
    pub async fn get_user(&self, user_id: &str) -> Result<Option<User>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::USERS)
            .obj()
            .one(user_id)
            .await
            .map_err(store_error)
    }

    /// List every user in registration order.
    pub async fn list_users(&self) -> Result<Vec<User>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .from(collections::USERS)
            .order_by([("created_at", FirestoreQueryDirection::Ascending)])
            .obj()
            .query()
            .await
            .map_err(store_error)
    }

    // ─── Exercise Operations ─────────────────────────────────────

    /// Store a logged exercise.
    pub async fn insert_exercise(&self, exercise: &Exercise) -> Result<(), AppError> {
        let _: Exercise = self
            .get_client()?
            .fluent()
            .insert()
            .into(collections::EXERCISES)
            .document_id(&exercise.id)
            .object(exercise)
            .execute()
            .await
            .map_err(store_error)?;
        Ok(())
    }

    /// Get a user's exercises inside the query window.
    ///
    /// Dates are stored as `YYYY-MM-DD` strings, so string range filters
    /// match calendar order. Requires a composite index on
    /// (user_id, date, created_at).
    pub async fn find_exercises(
        &self,
        user_id: &str,
        query: &ExerciseQuery,
    ) -> Result<Vec<Exercise>, AppError> {
        let user_id = user_id.to_string();
        let from = query.from.to_string();
        let to = query.to.to_string();

        let select = self
            .get_client()?
            .fluent()
            .select()
            .from(collections::EXERCISES)
            .filter(move |q| {
                q.for_all([
                    q.field("user_id").eq(user_id.clone()),
                    q.field("date").greater_than_or_equal(from.clone()),
                    q.field("date").less_than_or_equal(to.clone()),
                ])
            })
            .order_by([
                ("date", FirestoreQueryDirection::Ascending),
                ("created_at", FirestoreQueryDirection::Ascending),
            ]);

        let select = match query.limit {
            Some(limit) => select.limit(limit),
            None => select,
        };

        select.obj().query().await.map_err(store_error)
    }
}
