use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(String),

    /// Bad credentials OR nonexistent user — deliberately the same variant,
    /// so callers cannot leak which one it was.
    #[error("Forbidden")]
    Forbidden,

    #[error("Conflict: {0} already exists")]
    Conflict(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

/// Collapse a unique-constraint violation into [`StoreError::Conflict`],
/// leaving every other database error intact.
pub(crate) fn on_unique(what: &str) -> impl Fn(sqlx::Error) -> StoreError + '_ {
    move |e| match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            StoreError::Conflict(what.to_string())
        }
        _ => StoreError::Database(e),
    }
}
