//! Scoresheet viewer
//!
//! Front end around [`chess_replay`]: the extraction and opponent service
//! clients, the upload-and-review session, live play, terminal rendering and
//! the command line.

pub mod cli;
pub mod core;
pub mod play;
pub mod render;
pub mod services;
pub mod session;

pub use play::PlaySession;
pub use render::{render_board, render_frame, render_moves, render_status, RenderOptions};
pub use session::ScoresheetSession;
