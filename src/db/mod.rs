//! Database layer.
//!
//! [`Store`] is the handle injected into every handler. It dispatches to
//! Firestore in production or to an in-process store for tests and local
//! development; both backends return the same ordering.

pub mod firestore;
pub mod memory;

pub use firestore::FirestoreDb;
pub use memory::MemoryDb;

use crate::config::StoreUrl;
use crate::error::AppError;
use crate::models::{Exercise, ExerciseQuery, User};

/// Collection names as constants.
pub mod collections {
    pub const USERS: &str = "users";
    /// Username reservations (keyed by hex-encoded username)
    pub const USERNAMES: &str = "usernames";
    pub const EXERCISES: &str = "exercises";
}

/// Document store handle.
#[derive(Clone)]
pub enum Store {
    Firestore(FirestoreDb),
    Memory(MemoryDb),
}

impl Store {
    /// Connect to the store named by `url`.
    pub async fn connect(url: &StoreUrl) -> Result<Self, AppError> {
        match url {
            StoreUrl::Memory => {
                tracing::info!("Using in-memory store");
                Ok(Self::in_memory())
            }
            StoreUrl::Firestore { project_id } => {
                Ok(Store::Firestore(FirestoreDb::new(project_id).await?))
            }
        }
    }

    /// Create an empty in-memory store.
    pub fn in_memory() -> Self {
        Store::Memory(MemoryDb::new())
    }

    /// Insert a new user. Fails with `DuplicateUsername` if the name is taken.
    pub async fn insert_user(&self, user: &User) -> Result<(), AppError> {
        match self {
            Store::Firestore(db) => db.insert_user(user).await,
            Store::Memory(db) => db.insert_user(user).await,
        }
    }

    /// Get a user by id.
    pub async fn get_user(&self, user_id: &str) -> Result<Option<User>, AppError> {
        match self {
            Store::Firestore(db) => db.get_user(user_id).await,
            Store::Memory(db) => db.get_user(user_id).await,
        }
    }

    /// List every user in registration order.
    pub async fn list_users(&self) -> Result<Vec<User>, AppError> {
        match self {
            Store::Firestore(db) => db.list_users().await,
            Store::Memory(db) => db.list_users().await,
        }
    }

    /// Store a logged exercise.
    pub async fn insert_exercise(&self, exercise: &Exercise) -> Result<(), AppError> {
        match self {
            Store::Firestore(db) => db.insert_exercise(exercise).await,
            Store::Memory(db) => db.insert_exercise(exercise).await,
        }
    }

    /// Get a user's exercises inside the query window, ordered by date then
    /// creation time, truncated to the query limit.
    pub async fn find_exercises(
        &self,
        user_id: &str,
        query: &ExerciseQuery,
    ) -> Result<Vec<Exercise>, AppError> {
        match self {
            Store::Firestore(db) => db.find_exercises(user_id, query).await,
            Store::Memory(db) => db.find_exercises(user_id, query).await,
        }
    }
}
