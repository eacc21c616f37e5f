use matzip_core::error::CoreError;
use matzip_core::representative::REPRESENTATIVE_CONFLICT_MESSAGE;

/// Partial unique index backing the single-representative-image rule.
pub const REPRESENTATIVE_IMAGE_CONSTRAINT: &str = "uq_restaurant_images_representative";

/// PostgreSQL SQLSTATE for unique violations.
const UNIQUE_VIOLATION: &str = "23505";

/// Error returned by repository operations that run domain checks
/// inside their transaction.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Database(sqlx::Error),
}

impl From<sqlx::Error> for DbError {
    /// A unique violation on the representative index means a concurrent
    /// writer got past the row lock (or the lock was bypassed); report it
    /// as the same invariant failure the in-transaction check produces.
    fn from(err: sqlx::Error) -> Self {
        if is_representative_violation(&err) {
            return DbError::Core(CoreError::InvariantViolation(
                REPRESENTATIVE_CONFLICT_MESSAGE.to_string(),
            ));
        }
        DbError::Database(err)
    }
}

fn is_representative_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => {
            db_err.code().as_deref() == Some(UNIQUE_VIOLATION)
                && db_err.constraint() == Some(REPRESENTATIVE_IMAGE_CONSTRAINT)
        }
        _ => false,
    }
}
