//! Database row models — these map to/from SQL rows.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRow {
    pub name: String,
    /// PHC-encoded login hash (never the envelope key).
    pub password_hash: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ProjectRow {
    pub id: i64,
    pub project_name: String,
    pub owned_by: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct KeyRow {
    /// Globally unique secret name.
    pub name: String,
    /// Hex envelope (nonce || ciphertext), opaque to the store.
    pub key: String,
    pub project_id: i64,
    pub owned_by: String,
}
