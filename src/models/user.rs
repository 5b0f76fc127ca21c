use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Mirror of the identity service's user record; only what foreign keys and
/// username joins need.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
