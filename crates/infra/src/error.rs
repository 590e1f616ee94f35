use thiserror::Error;

/// Failures surfaced by the storage gateway. "Not found" is never an error
/// at this layer; lookups return `Option` and deletes return `bool`.
#[derive(Debug, Error)]
pub enum StorageError {
    /// A uniqueness constraint was violated; carries the offending column.
    #[error("duplicate {0}")]
    Conflict(&'static str),

    #[error("database error")]
    Db(#[from] sqlx::Error),

    #[error("migration error")]
    Migrate(#[from] sqlx::migrate::MigrateError),
}

/// Maps a Postgres unique violation (SQLSTATE 23505) to `Conflict`, leaving
/// every other failure as a generic database error.
pub(crate) fn unique_conflict(err: sqlx::Error, field: &'static str) -> StorageError {
    match &err {
        sqlx::Error::Database(db) if db.code().as_deref() == Some("23505") => {
            StorageError::Conflict(field)
        }
        _ => StorageError::Db(err),
    }
}
