//! Project CRUD, always scoped by the caller's [`OwnerContext`].

use chrono::Utc;

use crate::db::Store;
use crate::error::{on_unique, StoreError};
use crate::guard::OwnerContext;
use crate::models::ProjectRow;

impl Store {
    /// All projects owned by the caller, most recent first. The ordering is a
    /// contract, not incidental; id breaks ties between equal timestamps.
    pub async fn list_projects(&self, ctx: &OwnerContext) -> Result<Vec<ProjectRow>, StoreError> {
        let rows = sqlx::query_as(
            "SELECT id, project_name, owned_by, created_at FROM projects \
             WHERE owned_by = ? ORDER BY created_at DESC, id DESC",
        )
        .bind(ctx.username())
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Fetch one project by id, only if the caller owns it. A foreign owner's
    /// project and a nonexistent id both come back `None` — existence must not
    /// be probeable across tenants.
    pub async fn get_project(
        &self,
        ctx: &OwnerContext,
        id: i64,
    ) -> Result<Option<ProjectRow>, StoreError> {
        let row = sqlx::query_as(
            "SELECT id, project_name, owned_by, created_at FROM projects \
             WHERE owned_by = ? AND id = ?",
        )
        .bind(ctx.username())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    /// Create a project. `project_name` is unique across ALL tenants (one
    /// global namespace), so another user holding the name is a `Conflict`
    /// too.
    pub async fn create_project(
        &self,
        ctx: &OwnerContext,
        project_name: &str,
    ) -> Result<ProjectRow, StoreError> {
        let created_at = Utc::now();
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO projects (project_name, owned_by, created_at) VALUES (?, ?, ?) \
             RETURNING id",
        )
        .bind(project_name)
        .bind(ctx.username())
        .bind(created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(on_unique("project"))?;

        Ok(ProjectRow {
            id,
            project_name: project_name.to_string(),
            owned_by: ctx.username().to_string(),
            created_at,
        })
    }

    /// Delete an owned project. The FK cascade removes its keys in the same
    /// statement, so the delete cannot half-apply. A foreign or missing id is
    /// `NotFound` either way.
    pub async fn delete_project(&self, ctx: &OwnerContext, id: i64) -> Result<(), StoreError> {
        let res = sqlx::query("DELETE FROM projects WHERE id = ? AND owned_by = ?")
            .bind(id)
            .bind(ctx.username())
            .execute(&self.pool)
            .await?;
        if res.rows_affected() == 0 {
            return Err(StoreError::NotFound("project".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guard::authorize;
    use harp_crypto::password::hash_password;

    async fn store_with(users: &[(&str, &str)]) -> Store {
        let store = Store::open_in_memory().await.unwrap();
        for (name, pw) in users {
            store
                .create_user(name, &hash_password(pw).unwrap())
                .await
                .unwrap();
        }
        store
    }

    #[tokio::test]
    async fn listing_is_most_recent_first() {
        let store = store_with(&[("alice", "pw1")]).await;
        let ctx = authorize(&store, "alice", "pw1").await.unwrap();

        let first = store.create_project(&ctx, "one").await.unwrap();
        let second = store.create_project(&ctx, "two").await.unwrap();
        let third = store.create_project(&ctx, "three").await.unwrap();

        let listed = store.list_projects(&ctx).await.unwrap();
        let ids: Vec<i64> = listed.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![third.id, second.id, first.id]);
    }

    #[tokio::test]
    async fn project_names_collide_across_tenants() {
        let store = store_with(&[("alice", "pw1"), ("bob", "pw2")]).await;
        let alice = authorize(&store, "alice", "pw1").await.unwrap();
        let bob = authorize(&store, "bob", "pw2").await.unwrap();

        store.create_project(&alice, "infra").await.unwrap();
        let err = store.create_project(&bob, "infra").await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));
    }

    #[tokio::test]
    async fn foreign_project_is_invisible_and_undeletable() {
        let store = store_with(&[("alice", "pw1"), ("bob", "pw2")]).await;
        let alice = authorize(&store, "alice", "pw1").await.unwrap();
        let bob = authorize(&store, "bob", "pw2").await.unwrap();

        let project = store.create_project(&alice, "infra").await.unwrap();

        assert!(store.get_project(&bob, project.id).await.unwrap().is_none());
        let err = store.delete_project(&bob, project.id).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));

        // Still there for its owner.
        assert!(store.get_project(&alice, project.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn deleting_a_user_cascades_to_projects() {
        let store = store_with(&[("alice", "pw1")]).await;
        let ctx = authorize(&store, "alice", "pw1").await.unwrap();
        store.create_project(&ctx, "infra").await.unwrap();

        store.delete_user("alice").await.unwrap();

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM projects")
            .fetch_one(&store.pool)
            .await
            .unwrap();
        assert_eq!(count, 0);
    }
}
