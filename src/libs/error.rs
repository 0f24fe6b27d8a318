//! Typed failures raised by the data layer.
//!
//! Repository methods return `anyhow::Result`, and the failures callers may
//! want to react to are raised as [`VaultError`] so they survive the trip
//! through `anyhow` and can be recovered with `downcast_ref`.
//!
//! ```rust
//! use ironvault::libs::error::VaultError;
//!
//! fn is_missing(err: &anyhow::Error) -> bool {
//!     matches!(err.downcast_ref::<VaultError>(), Some(VaultError::NotFound { .. }))
//! }
//! ```

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum VaultError {
    /// A user-entered calendar date that does not exist.
    #[error("invalid date: {0}")]
    InvalidDate(String),

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    /// Rejected field value (empty name, negative weight, ...).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A routine can only be captured from a workout that has sets.
    #[error("workout {0} has no sets to save as a routine")]
    EmptyWorkout(i64),

    /// One of the required backup arrays is absent.
    #[error("backup is missing the '{0}' section")]
    MissingSection(&'static str),

    #[error("backup version {found} is newer than supported version {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// A backup row points at a row the document does not contain.
    #[error("backup {section} row {id} references missing {target} {target_id}")]
    DanglingReference {
        section: &'static str,
        id: i64,
        target: &'static str,
        target_id: i64,
    },
}

impl VaultError {
    pub fn not_found(entity: &'static str, id: i64) -> Self {
        VaultError::NotFound { entity, id }
    }
}
