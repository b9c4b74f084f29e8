//! API request/response types. These map directly to JSON bodies on the wire.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Header carrying the claimed identity on every guarded request.
pub const USERNAME_HEADER: &str = "username";
/// Header carrying the login password on every guarded request.
pub const AUTHORIZATION_HEADER: &str = "authorization";

/// `POST /user` — the only unauthenticated write.
#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    /// Login password; the server hashes it before storage.
    pub authorization: String,
}

/// One project, as listed by `GET /projects`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSummary {
    pub id: i64,
    pub project_name: String,
    pub created_at: DateTime<Utc>,
}

/// `GET /projects/{projectId}` — `project` is null for a nonexistent id and
/// for someone else's project alike; the two are indistinguishable on purpose.
#[derive(Debug, Serialize, Deserialize)]
pub struct ProjectLookup {
    /// Echo of the authenticated username.
    pub auth: String,
    pub project: Option<ProjectSummary>,
}

/// One named secret. `key` is the hex envelope (nonce || ciphertext); the
/// server never holds the plaintext.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyEntry {
    pub name: String,
    pub key: String,
}

/// `PUT /projects/{projectId}/key` body.
#[derive(Debug, Serialize, Deserialize)]
pub struct WriteKeyRequest {
    pub name: String,
    /// Hex envelope, sealed client-side.
    pub key: String,
}

/// `DELETE /projects/{projectId}/key` body.
#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteKeyRequest {
    pub name: String,
}
