//! Core module - application infrastructure
//!
//! Ambient concerns shared by every front end of the viewer:
//!
//! - [`AppError`] / [`AppResult`] - error type for everything outside the
//!   replay core
//! - [`ViewerSettings`] - persisted user preferences with environment
//!   overrides
//! - [`init_logging`] - process-wide `tracing` subscriber

pub mod error;
pub mod logging;
pub mod settings_persistence;

// Re-export commonly used items
pub use error::{AppError, AppResult};
pub use logging::init_logging;
pub use settings_persistence::{settings_path, ViewerSettings};
