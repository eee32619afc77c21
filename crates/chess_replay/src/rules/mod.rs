//! Rules authority capability
//!
//! The replay engine knows nothing about chess legality. Everything it needs
//! from chess is expressed by the [`RulesAuthority`] trait: build the initial
//! position, and apply one notation token to a position. The record and
//! status hooks exist for the surrounding presentation layer.
//!
//! # Module Structure
//!
//! - `shakmaty_rules` - [`ShakmatyRules`], the authority backed by the
//!   `shakmaty` move generator
//!
//! Tests that need a scripted authority implement the trait directly on a
//! small fake; nothing in the engine depends on the concrete type.

mod shakmaty_rules;

pub use shakmaty_rules::ShakmatyRules;

use crate::decoder::PieceColor;
use crate::error::MoveRejection;
use crate::record::BoardState;

/// Game-over and draw predicates for a position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    /// Game continues; `in_check` is set when the side to move is in check
    Ongoing { in_check: bool },
    /// Side to move is mated
    Checkmate { winner: PieceColor },
    /// Side to move has no legal move and is not in check
    Stalemate,
    /// Neither side can deliver mate
    InsufficientMaterial,
    /// Halfmove clock reached 100 plies
    FiftyMoveRule,
}

impl GameStatus {
    /// `true` for every terminal state
    pub fn is_game_over(&self) -> bool {
        !matches!(self, GameStatus::Ongoing { .. })
    }

    /// `true` for the drawn terminal states
    pub fn is_draw(&self) -> bool {
        matches!(
            self,
            GameStatus::Stalemate | GameStatus::InsufficientMaterial | GameStatus::FiftyMoveRule
        )
    }

    /// Short human-readable summary, empty while the game is ongoing
    pub fn describe(&self) -> &'static str {
        match self {
            GameStatus::Ongoing { in_check: true } => "Check",
            GameStatus::Ongoing { in_check: false } => "",
            GameStatus::Checkmate { .. } => "Checkmate!",
            GameStatus::Stalemate => "Draw! (stalemate)",
            GameStatus::InsufficientMaterial => "Draw! (insufficient material)",
            GameStatus::FiftyMoveRule => "Draw! (fifty-move rule)",
        }
    }
}

/// External authority on move legality and position transitions
///
/// Implementations must be deterministic: the same token applied to the
/// same position always yields the same result.
pub trait RulesAuthority {
    /// Working position threaded through a replay
    type Position: Clone;

    /// The standard starting position
    fn initial_position(&self) -> Self::Position;

    /// Apply one notation token
    ///
    /// Returns the new position, or why the token does not apply. The input
    /// position is never modified.
    fn apply(&self, position: &Self::Position, token: &str)
        -> Result<Self::Position, MoveRejection>;

    /// Snapshot a working position as an opaque record
    fn record(&self, position: &Self::Position) -> BoardState;

    /// Game-over/draw/check predicates
    fn status(&self, position: &Self::Position) -> GameStatus;
}
