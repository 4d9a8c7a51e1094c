//! User entity model and DTOs.

use folio_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Full user row from the `users` table.
///
/// Contains the password hash, never serialize it. Use [`UserResponse`] for
/// anything leaving the service.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role_id: DbId,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Safe user representation: no password hash, role resolved to its name.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserResponse {
    pub id: DbId,
    pub username: String,
    pub name: String,
    pub email: String,
    /// Resolved role name (`"admin"` or `"author"`).
    pub role: String,
    pub is_active: bool,
}

/// DTO for inserting a user. `password_hash` is already hashed.
#[derive(Debug, Deserialize)]
pub struct CreateUser {
    pub username: String,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role_id: DbId,
}
