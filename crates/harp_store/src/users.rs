//! User rows — registration only; there is no password-change path.

use crate::db::Store;
use crate::error::{on_unique, StoreError};

impl Store {
    /// Insert a new user. The caller supplies an already-hashed credential
    /// (the store never sees a login password in the clear).
    pub async fn create_user(&self, name: &str, password_hash: &str) -> Result<(), StoreError> {
        sqlx::query("INSERT INTO users (name, password_hash) VALUES (?, ?)")
            .bind(name)
            .bind(password_hash)
            .execute(&self.pool)
            .await
            .map_err(on_unique("user"))?;
        Ok(())
    }

    /// Delete a user; cascades to all owned projects and keys.
    pub async fn delete_user(&self, name: &str) -> Result<(), StoreError> {
        let res = sqlx::query("DELETE FROM users WHERE name = ?")
            .bind(name)
            .execute(&self.pool)
            .await?;
        if res.rows_affected() == 0 {
            return Err(StoreError::NotFound("user".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn duplicate_username_is_a_conflict() {
        let store = Store::open_in_memory().await.unwrap();
        store.create_user("alice", "hash-a").await.unwrap();
        let err = store.create_user("alice", "hash-b").await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));
    }
}
