//! Board-state record
//!
//! An immutable snapshot of a position as produced by the rules authority.
//! The core treats it as opaque: it can be constructed as the initial
//! sentinel or from the authority's FEN text, and it can be handed to the
//! decoder for rendering. Replays replace the current record, they never
//! mutate it.

use std::fmt;

/// Canonical FEN of the standard starting position
pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Opaque board-state record
///
/// Equality compares the resolved FEN text, so the `initial` sentinel is
/// equal to a record built from [`START_FEN`].
#[derive(Debug, Clone, Default)]
pub struct BoardState {
    repr: Repr,
}

#[derive(Debug, Clone, Default)]
enum Repr {
    /// "No moves applied" marker
    #[default]
    Initial,
    Fen(String),
}

impl BoardState {
    /// The initial-position sentinel
    pub fn initial() -> Self {
        Self {
            repr: Repr::Initial,
        }
    }

    /// Wrap the FEN text produced by a rules authority
    pub fn from_fen(fen: impl Into<String>) -> Self {
        Self {
            repr: Repr::Fen(fen.into()),
        }
    }

    /// `true` only for the sentinel (not for an explicit start FEN)
    pub fn is_initial(&self) -> bool {
        matches!(self.repr, Repr::Initial)
    }

    /// Full FEN text, with the sentinel resolved to [`START_FEN`]
    pub fn fen(&self) -> &str {
        match &self.repr {
            Repr::Initial => START_FEN,
            Repr::Fen(fen) => fen.as_str(),
        }
    }

    /// Piece placement field (first whitespace-separated field)
    pub fn placement(&self) -> &str {
        self.fen().split_whitespace().next().unwrap_or("")
    }

    /// Side-to-move field: `Some('w')`, `Some('b')`, or `None` if absent
    pub fn side_to_move(&self) -> Option<char> {
        self.fen()
            .split_whitespace()
            .nth(1)
            .and_then(|field| field.chars().next())
    }
}

impl PartialEq for BoardState {
    fn eq(&self, other: &Self) -> bool {
        self.fen() == other.fen()
    }
}

impl Eq for BoardState {}

impl fmt::Display for BoardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.fen())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinel_resolves_to_start_fen() {
        let record = BoardState::initial();

        assert!(record.is_initial());
        assert_eq!(record.fen(), START_FEN);
        assert_eq!(record.placement(), "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR");
        assert_eq!(record.side_to_move(), Some('w'));
    }

    #[test]
    fn test_sentinel_equals_explicit_start() {
        let explicit = BoardState::from_fen(START_FEN);

        assert!(!explicit.is_initial());
        assert_eq!(BoardState::initial(), explicit);
    }

    #[test]
    fn test_placement_only_record() {
        //! A bare placement string has no side-to-move field
        let record = BoardState::from_fen("8/8/8/8/8/8/8/K6k");

        assert_eq!(record.placement(), "8/8/8/8/8/8/8/K6k");
        assert_eq!(record.side_to_move(), None);
    }
}
