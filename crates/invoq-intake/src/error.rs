//! # Intake Error Types
//!
//! Boundary errors for the orchestration layer.
//!
//! Only infrastructure failures are errors here: the store is unreachable,
//! the configuration is broken. Domain outcomes (a used token, a duplicate
//! submission, a field that fails validation) are values on
//! [`crate::controller::SubmissionOutcome`], never `Err`.

use thiserror::Error;

use crate::config::ConfigError;
use invoq_db::DbError;

/// Errors surfaced at the intake boundary.
#[derive(Debug, Error)]
pub enum IntakeError {
    /// Storage operation failed (connectivity, query, migration).
    #[error("storage error: {0}")]
    Db(#[from] DbError),

    /// Configuration could not be loaded.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type for intake operations.
pub type IntakeResult<T> = Result<T, IntakeError>;
