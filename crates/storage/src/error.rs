use thiserror::Error;

use crate::validation::{self, FieldErrors};

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Not found")]
    NotFound,

    #[error("Invalid workout: {0}")]
    Validation(FieldErrors),

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),
}

pub type Result<T> = std::result::Result<T, StorageError>;

impl StorageError {
    pub fn is_unique_violation(&self) -> bool {
        matches!(
            self,
            StorageError::Database(sqlx::Error::Database(e))
                if e.code().as_deref() == Some("23505")
        )
    }

    pub fn is_check_violation(&self) -> bool {
        matches!(
            self,
            StorageError::Database(sqlx::Error::Database(e))
                if e.code().as_deref() == Some("23514")
        )
    }

    /// Maps a failed INSERT/UPDATE. CHECK rejections on a workout field become the
    /// same `Validation` errors the rule set reports; any other CHECK becomes
    /// `ConstraintViolation` carrying the constraint name.
    pub fn from_write(error: sqlx::Error) -> Self {
        let error = StorageError::Database(error);
        if !error.is_check_violation() {
            return error;
        }

        match error {
            StorageError::Database(sqlx::Error::Database(e)) => {
                let constraint = e.constraint().unwrap_or("workouts");
                match validation::constraint_errors(constraint) {
                    Some(errors) => StorageError::Validation(errors),
                    None => StorageError::ConstraintViolation(constraint.to_string()),
                }
            }
            other => other,
        }
    }
}
