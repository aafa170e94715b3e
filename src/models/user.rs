use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A user row as stored in the database.
///
/// The password hash never leaves the authentication flow; API responses use
/// [`PublicUser`] instead.
#[derive(Debug, FromRow)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// The subset of user fields exposed over the API.
#[derive(Debug, Serialize, Deserialize, FromRow, PartialEq, Eq)]
pub struct PublicUser {
    pub id: i32,
    pub username: String,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        PublicUser {
            id: user.id,
            username: user.username,
        }
    }
}
