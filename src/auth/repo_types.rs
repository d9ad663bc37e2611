use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;

/// User record in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,                    // assigned by the store on insert, immutable
    pub username: String,           // login name
    pub email: String,              // unique across all users
    #[serde(skip_serializing)]
    pub password: String,           // stored as supplied, not exposed in JSON
    pub created_at: OffsetDateTime, // creation timestamp
}
