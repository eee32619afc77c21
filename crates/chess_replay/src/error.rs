//! Error types for the replay core
//!
//! Two families live here:
//!
//! - [`ReplayError`] - caller contract violations (editing or jumping to an
//!   index outside the current token list). These are returned, never logged
//!   as data.
//! - [`MoveRejection`] - why the rules authority refused a token. A rejection
//!   is not a fault of the replay engine: it becomes the invalid index of the
//!   replay result.

use thiserror::Error;

/// Errors returned by token-store and navigation mutators
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReplayError {
    /// Token index outside `0..len`
    #[error("Token index {index} out of range (have {len} tokens)")]
    IndexOutOfRange { index: usize, len: usize },

    /// Cursor outside `-1..len`
    #[error("Cursor {index} out of range (must be -1..{len})")]
    CursorOutOfRange { index: isize, len: usize },
}

/// Reason a token could not be applied to the working position
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MoveRejection {
    /// Not recognisable move notation
    #[error("Malformed move notation: {token:?}")]
    Malformed { token: String },

    /// Well-formed, but no legal move matches in this position
    #[error("Illegal move in this position: {token}")]
    Illegal { token: String },

    /// Matches more than one legal move
    #[error("Ambiguous move in this position: {token}")]
    Ambiguous { token: String },

    /// Any other error raised by the rules authority
    #[error("Rules authority error on {token:?}: {message}")]
    Fault { token: String, message: String },
}

impl MoveRejection {
    /// The token that was refused
    pub fn token(&self) -> &str {
        match self {
            MoveRejection::Malformed { token }
            | MoveRejection::Illegal { token }
            | MoveRejection::Ambiguous { token }
            | MoveRejection::Fault { token, .. } => token,
        }
    }
}

/// Result type alias for replay core operations
pub type ReplayResult<T> = Result<T, ReplayError>;
