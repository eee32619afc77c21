//! Prefix replay and validation for transcribed chess games
//!
//! Takes an ordered, editable list of move-notation tokens, replays any
//! prefix of it against a rules authority, reports the first token that does
//! not apply, and decodes the resulting position into a renderable grid.
//!
//! ## Module Organization
//!
//! - `token_store` - ordered, editable token list
//! - `navigation` - cursor and its bounds
//! - `replay` - the prefix replay engine and its result types
//! - `rules` - rules authority capability and the `shakmaty` implementation
//! - `record` - opaque board-state record
//! - `decoder` - record to square/piece grid
//! - `view` - the render boundary tying all of the above together
//!
//! ```
//! use chess_replay::{Cursor, ReplayView, ShakmatyRules};
//!
//! let mut view = ReplayView::new(ShakmatyRules::new());
//! view.load(["e4", "e5", "Qh9"]);
//!
//! assert_eq!(view.cursor(), Cursor::at(2));
//! assert_eq!(view.invalid().first(), Some(2));
//!
//! view.edit(2, "Nf3").unwrap();
//! assert!(view.invalid().is_empty());
//! ```

pub mod decoder;
pub mod error;
pub mod navigation;
pub mod record;
pub mod replay;
pub mod rules;
pub mod token_store;
pub mod view;

pub use decoder::{decode, decode_placement, Grid, Piece, PieceColor, PieceType, Square};
pub use error::{MoveRejection, ReplayError, ReplayResult};
pub use navigation::{Cursor, Navigator};
pub use record::{BoardState, START_FEN};
pub use replay::{replay, InvalidIndexSet, Replay};
pub use rules::{GameStatus, RulesAuthority, ShakmatyRules};
pub use token_store::TokenStore;
pub use view::{cursor_label, ply_label, Frame, ReplayView};
