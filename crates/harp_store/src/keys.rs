//! Secret key CRUD — envelopes in, envelopes out, never plaintext.

use harp_proto::KeyEntry;

use crate::db::Store;
use crate::error::{on_unique, StoreError};
use crate::guard::OwnerContext;

impl Store {
    /// List `{name, envelope}` pairs under one owned project.
    ///
    /// The project must exist under this owner; a foreign or missing project
    /// id is `NotFound`, same as `get_project`, so key listing cannot be used
    /// to probe other tenants' project ids.
    pub async fn list_keys(
        &self,
        ctx: &OwnerContext,
        project_id: i64,
    ) -> Result<Vec<KeyEntry>, StoreError> {
        if self.get_project(ctx, project_id).await?.is_none() {
            return Err(StoreError::NotFound("project".into()));
        }

        let rows: Vec<(String, String)> = sqlx::query_as(
            "SELECT name, key FROM keys WHERE owned_by = ? AND project_id = ?",
        )
        .bind(ctx.username())
        .bind(project_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(name, key)| KeyEntry { name, key })
            .collect())
    }

    /// Write a secret envelope under an owned project — upsert semantics.
    ///
    /// Overwriting an existing name is allowed only for the same owner and the
    /// same project (re-encryption under the same master-derived key). A name
    /// held by another tenant or another project is a `Conflict`: names are
    /// one global namespace in the schema.
    ///
    /// Ownership check and write run in one transaction so the check cannot
    /// go stale between statements.
    pub async fn write_key(
        &self,
        ctx: &OwnerContext,
        project_id: i64,
        name: &str,
        envelope: &str,
    ) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await?;

        let owned: Option<i64> =
            sqlx::query_scalar("SELECT id FROM projects WHERE id = ? AND owned_by = ?")
                .bind(project_id)
                .bind(ctx.username())
                .fetch_optional(&mut *tx)
                .await?;
        if owned.is_none() {
            return Err(StoreError::NotFound("project".into()));
        }

        let existing: Option<(i64, String)> =
            sqlx::query_as("SELECT project_id, owned_by FROM keys WHERE name = ?")
                .bind(name)
                .fetch_optional(&mut *tx)
                .await?;

        match existing {
            None => {
                sqlx::query(
                    "INSERT INTO keys (name, key, project_id, owned_by) VALUES (?, ?, ?, ?)",
                )
                .bind(name)
                .bind(envelope)
                .bind(project_id)
                .bind(ctx.username())
                .execute(&mut *tx)
                .await
                .map_err(on_unique("key"))?;
            }
            Some((existing_project, existing_owner))
                if existing_project == project_id && existing_owner == ctx.username() =>
            {
                sqlx::query("UPDATE keys SET key = ? WHERE name = ?")
                    .bind(envelope)
                    .bind(name)
                    .execute(&mut *tx)
                    .await
                    .map_err(on_unique("key"))?;
            }
            Some(_) => return Err(StoreError::Conflict("key".into())),
        }

        tx.commit().await?;
        Ok(())
    }

    /// Delete the single row matching owner AND project AND name.
    pub async fn delete_key(
        &self,
        ctx: &OwnerContext,
        project_id: i64,
        name: &str,
    ) -> Result<(), StoreError> {
        let res = sqlx::query(
            "DELETE FROM keys WHERE name = ? AND project_id = ? AND owned_by = ?",
        )
        .bind(name)
        .bind(project_id)
        .bind(ctx.username())
        .execute(&self.pool)
        .await?;
        if res.rows_affected() == 0 {
            return Err(StoreError::NotFound("key".into()));
        }
        Ok(())
    }
}
