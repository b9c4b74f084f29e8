//! Authorization guard — turns (username, password) into an [`OwnerContext`].
//!
//! The context is the ONLY capability the scoped operations accept, and this
//! module is the only place that constructs one. Authentication is re-run on
//! every request; nothing is cached across calls.

use harp_crypto::password::verify_password;

use crate::db::Store;
use crate::error::StoreError;
use crate::models::UserRow;

/// The verified identity a request acts as. Everything the store does is
/// filtered by this name.
#[derive(Debug, Clone)]
pub struct OwnerContext {
    username: String,
}

impl OwnerContext {
    pub fn username(&self) -> &str {
        &self.username
    }
}

/// Authenticate a claimed identity against the stored credential.
///
/// A nonexistent user and a wrong password both come back as
/// [`StoreError::Forbidden`] — the response must not reveal which accounts
/// exist. No further work happens on failure.
pub async fn authorize(
    store: &Store,
    username: &str,
    password: &str,
) -> Result<OwnerContext, StoreError> {
    let user: Option<UserRow> =
        sqlx::query_as("SELECT name, password_hash FROM users WHERE name = ?")
            .bind(username)
            .fetch_optional(&store.pool)
            .await?;

    match user {
        Some(row) if verify_password(password, &row.password_hash) => Ok(OwnerContext {
            username: row.name,
        }),
        _ => {
            tracing::debug!(username, "authorization rejected");
            Err(StoreError::Forbidden)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use harp_crypto::password::hash_password;

    async fn store_with_alice() -> Store {
        let store = Store::open_in_memory().await.unwrap();
        store
            .create_user("alice", &hash_password("pw1").unwrap())
            .await
            .unwrap();
        store
    }

    #[tokio::test]
    async fn valid_credentials_yield_context() {
        let store = store_with_alice().await;
        let ctx = authorize(&store, "alice", "pw1").await.unwrap();
        assert_eq!(ctx.username(), "alice");
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_user_are_indistinguishable() {
        let store = store_with_alice().await;
        let wrong_pw = authorize(&store, "alice", "nope").await.unwrap_err();
        let no_user = authorize(&store, "mallory", "pw1").await.unwrap_err();
        assert!(matches!(wrong_pw, StoreError::Forbidden));
        assert!(matches!(no_user, StoreError::Forbidden));
    }
}
