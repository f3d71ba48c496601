//! User model for storage and API.

use serde::{Deserialize, Serialize};

/// Registered user stored in the `users` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Opaque id (also used as document ID)
    pub id: String,
    /// Unique username
    pub username: String,
    /// When the user registered (RFC3339, nanosecond precision)
    pub created_at: String,
}

/// Username reservation, keyed by the hex-encoded username.
///
/// Created with create-if-absent semantics so a second registration of the
/// same name fails in the store rather than racing in the handler.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsernameClaim {
    /// Id of the user holding this name
    pub user_id: String,
}
