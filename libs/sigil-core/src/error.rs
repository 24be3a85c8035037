//! Error types for sigil operations

use thiserror::Error;

use crate::registry::{OpId, WorldId};

/// Sigil error types
#[derive(Debug, Error)]
pub enum SigilError {
    /// Signature character outside the turn alphabet
    #[error("invalid angle character '{ch}' at index {index}")]
    InvalidAngle {
        /// The offending character
        ch: char,
        /// Byte offset of the character in the signature string
        index: usize,
    },

    /// Operation id already bound to a different signature
    #[error("operation already bound: {0}")]
    DuplicateOp(OpId),

    /// Operation attempted against a world with no loaded registry
    #[error("world not loaded: {0}")]
    WorldUnloaded(WorldId),

    /// Parse error (TOML, JSON)
    #[error("parse error: {0}")]
    Parse(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for sigil operations
pub type Result<T> = std::result::Result<T, SigilError>;

impl SigilError {
    /// Check if this error is a malformed-signature rejection
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::InvalidAngle { .. })
    }

    /// Check if this error is a precondition violation by the caller
    /// rather than bad input data
    pub fn is_precondition(&self) -> bool {
        matches!(self, Self::WorldUnloaded(_))
    }
}
