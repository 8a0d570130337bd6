//! Error types for the mechanics engine.

/// Errors that can occur during mechanics operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MechError {
    /// A dice expression could not be parsed.
    #[error("invalid dice notation '{notation}': {reason}")]
    InvalidNotation {
        /// The notation as given by the caller.
        notation: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A characteristic key is not one of the eight known characteristics.
    #[error("unknown characteristic: {0}")]
    UnknownCharacteristic(String),

    /// A resource key is not one of the known resource pools.
    #[error("unknown resource: {0}")]
    UnknownResource(String),

    /// A difficulty name is not regular, hard or extreme.
    #[error("unknown difficulty: {0} (expected regular, hard or extreme)")]
    UnknownDifficulty(String),

    /// An adjustment string is neither a number, a delta, `max`, nor dice.
    #[error("invalid value: {0}")]
    InvalidAdjustment(String),
}

/// Convenience result type for mechanics operations.
pub type MechResult<T> = Result<T, MechError>;
