//! Error types for parsing values embedded in database documents.

/// Errors raised while interpreting strings found in database documents.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// An ID code string is not a valid 32-bit integer literal.
    #[error("invalid ID code '{input}': {reason}")]
    InvalidIdcode {
        /// The offending ID code string.
        input: String,
        /// Description of the failure.
        reason: String,
    },

    /// A tile name does not encode a recognizable grid position.
    #[error("cannot derive row/column from tile name '{name}': {reason}")]
    InvalidTileName {
        /// The offending tile name.
        name: String,
        /// Description of the failure.
        reason: String,
    },
}
