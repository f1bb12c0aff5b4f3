use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Simulated cash credited to every new account, in cents.
pub const INITIAL_CASH_CENTS: i64 = 1_000_000;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub id: uuid::Uuid,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub cash_cents: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl User {
    pub fn new(username: String, password_hash: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4(),
            username,
            password_hash,
            cash_cents: INITIAL_CASH_CENTS,
            created_at: chrono::Utc::now(),
        }
    }
}

// Request payloads keep every field optional so missing input rejects with a
// specific reason instead of a generic deserialization error.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: Option<String>,
    pub password: Option<String>,
    pub confirmation: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub old_password: Option<String>,
    pub new_password: Option<String>,
    pub confirmation: Option<String>,
}
