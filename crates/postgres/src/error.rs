/// Errors surfaced by the repository and unit-of-work layer.
///
/// The storage layer never maps its failures to HTTP statuses; translation
/// into the API taxonomy happens at the handler boundary.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A write breached a unique constraint (e.g. a duplicate user email).
    #[error("row violates a unique constraint")]
    UniqueViolation,

    /// A lookup that expects at most one row matched several.
    #[error("filter matched more than one row")]
    MultipleRows,

    /// Any other database failure, propagated as-is.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl StoreError {
    /// Classifies a write error, pulling unique-constraint violations
    /// (SQLSTATE 23505) out of the generic database bucket.
    pub(crate) fn from_write(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db) = &err {
            if db.code().as_deref() == Some("23505") {
                return StoreError::UniqueViolation;
            }
        }
        StoreError::Database(err)
    }
}
