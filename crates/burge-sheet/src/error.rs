//! Error types for character records and the character store.

use burge_mechanics::MechError;
use thiserror::Error;

/// Result type for sheet operations.
pub type SheetResult<T> = Result<T, SheetError>;

/// Errors surfaced to callers of the character engine.
///
/// Every variant is recoverable and carries enough context to render a
/// message for the player.
#[derive(Debug, Error)]
pub enum SheetError {
    /// A record already exists for this owner.
    #[error("a character already exists for '{owner}'; delete it first")]
    AlreadyExists {
        /// The owner key.
        owner: String,
    },

    /// A record, skill, or other named thing does not exist.
    #[error("{what} not found")]
    NotFound {
        /// What was looked up.
        what: String,
    },

    /// An input value was out of range or malformed.
    #[error("invalid {field}: {reason}")]
    Validation {
        /// The offending field.
        field: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A session save was requested with nothing pending.
    #[error("no pending changes to save")]
    NoPendingChanges,

    /// Delete confirmation arrived outside the window, or without a request.
    #[error("delete confirmation expired or was never requested; request deletion again")]
    ExpiredConfirmation,

    /// The XP pool is smaller than the requested spend.
    #[error("not enough XP: need {required}, have {available}")]
    InsufficientXp {
        /// XP the spend needs.
        required: i32,
        /// XP in the pool.
        available: i32,
    },

    /// An external character document could not be imported.
    #[error("import failed: {0}")]
    Import(String),

    /// Reading or writing a record failed.
    #[error("persistence error: {0}")]
    Persistence(String),
}

impl SheetError {
    /// Shorthand for a [`SheetError::Validation`].
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Shorthand for a [`SheetError::NotFound`].
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound { what: what.into() }
    }
}

impl From<MechError> for SheetError {
    fn from(err: MechError) -> Self {
        let field = match &err {
            MechError::InvalidNotation { .. } => "dice",
            MechError::UnknownCharacteristic(_) => "characteristic",
            MechError::UnknownResource(_) => "resource",
            MechError::UnknownDifficulty(_) => "difficulty",
            MechError::InvalidAdjustment(_) => "value",
        };
        Self::validation(field, err.to_string())
    }
}

impl From<std::io::Error> for SheetError {
    fn from(err: std::io::Error) -> Self {
        Self::Persistence(err.to_string())
    }
}

impl From<serde_json::Error> for SheetError {
    fn from(err: serde_json::Error) -> Self {
        Self::Persistence(err.to_string())
    }
}
