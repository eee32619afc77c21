//! Error types for the application shell
//!
//! Covers everything outside the replay core: settings persistence, the
//! extraction and opponent services, and caller errors forwarded from the
//! replay view. Token-level invalidity is never an error here; it is part of
//! the replay result.

use chess_replay::{MoveRejection, ReplayError};
use thiserror::Error;

/// Errors that can occur in the application shell
#[derive(Error, Debug)]
pub enum AppError {
    /// File I/O error (settings, images, saved responses)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Transport-level HTTP failure
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Extraction service answered with an error
    #[error("Extraction failed: {message}")]
    Extraction { message: String },

    /// Opponent service answered with an error or no move
    #[error("Opponent move failed: {message}")]
    Opponent { message: String },

    /// Move refused in play mode
    #[error(transparent)]
    Rejected(#[from] MoveRejection),

    /// Play-mode input while the game cannot accept it
    #[error("Move not accepted: {reason}")]
    NotAccepting { reason: &'static str },

    /// Out-of-range edit or jump
    #[error(transparent)]
    Replay(#[from] ReplayError),
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
