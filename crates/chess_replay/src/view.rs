//! Replay view - the render boundary
//!
//! Ties the token store, the navigator and a rules authority together. Each
//! mutator is one atomic transition: it changes tokens or cursor and then
//! runs the replay to completion before returning, so readers only ever see
//! a finished result.
//!
//! # Data Flow
//!
//! ```text
//! TokenStore + Cursor -> replay() -> (record, invalid set) -> decode() -> Grid
//! ```

use tracing::trace;

use crate::decoder::{decode, Grid};
use crate::error::ReplayResult;
use crate::navigation::{Cursor, Navigator};
use crate::replay::{replay, InvalidIndexSet, Replay};
use crate::rules::{GameStatus, RulesAuthority, ShakmatyRules};
use crate::token_store::TokenStore;

/// Everything the presentation layer needs for one render
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub grid: Grid,
    pub invalid: InvalidIndexSet,
    pub cursor: Cursor,
    pub status: GameStatus,
}

/// Session state for stepping through a transcribed game
#[derive(Debug)]
pub struct ReplayView<A: RulesAuthority = ShakmatyRules> {
    authority: A,
    tokens: TokenStore,
    navigator: Navigator,
    current: Replay,
}

impl Default for ReplayView<ShakmatyRules> {
    fn default() -> Self {
        Self::new(ShakmatyRules::new())
    }
}

impl<A: RulesAuthority> ReplayView<A> {
    /// Empty token list, cursor at the initial position
    pub fn new(authority: A) -> Self {
        Self {
            authority,
            tokens: TokenStore::new(),
            navigator: Navigator::new(),
            current: Replay::initial(),
        }
    }

    /// Replace the token list; cursor moves to the last token
    pub fn load<I, S>(&mut self, tokens: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tokens.load(tokens);
        self.navigator.seek_end(self.tokens.len());
        self.refresh();
    }

    /// Overwrite one token; cursor is unchanged
    pub fn edit(&mut self, index: usize, value: impl Into<String>) -> ReplayResult<()> {
        self.tokens.edit(index, value)?;
        self.refresh();
        Ok(())
    }

    pub fn next(&mut self) {
        self.navigator.next(self.tokens.len());
        self.refresh();
    }

    pub fn prev(&mut self) {
        self.navigator.prev();
        self.refresh();
    }

    pub fn reset(&mut self) {
        self.navigator.reset();
        self.refresh();
    }

    /// Jump to `-1 <= index < len`
    pub fn jump_to(&mut self, index: isize) -> ReplayResult<()> {
        self.navigator.jump_to(index, self.tokens.len())?;
        self.refresh();
        Ok(())
    }

    pub fn cursor(&self) -> Cursor {
        self.navigator.cursor()
    }

    pub fn tokens(&self) -> &[String] {
        self.tokens.as_slice()
    }

    /// Latest replay result
    pub fn replay(&self) -> &Replay {
        &self.current
    }

    pub fn invalid(&self) -> InvalidIndexSet {
        self.current.invalid
    }

    pub fn authority(&self) -> &A {
        &self.authority
    }

    /// Decode the current record for rendering
    pub fn frame(&self) -> Frame {
        Frame {
            grid: decode(&self.current.record),
            invalid: self.current.invalid,
            cursor: self.cursor(),
            status: self.current.status,
        }
    }

    /// Whether `next()` would move the cursor
    pub fn can_advance(&self) -> bool {
        let next = self.cursor().index().map_or(0, |i| i + 1);
        next < self.tokens.len()
    }

    /// Whether `prev()` would move the cursor
    pub fn can_retreat(&self) -> bool {
        !self.cursor().is_start()
    }

    fn refresh(&mut self) {
        self.current = replay(&self.authority, self.tokens.as_slice(), self.cursor());
        trace!(
            "[REPLAY] cursor={} applied={} invalid={:?}",
            self.cursor(),
            self.current.applied,
            self.current.invalid.first()
        );
    }
}

/// Move-number label for a ply: `"1."` for White, `"1..."` for Black
pub fn ply_label(index: usize) -> String {
    let number = index / 2 + 1;
    if index % 2 == 0 {
        format!("{number}.")
    } else {
        format!("{number}...")
    }
}

/// Label for a cursor: `"Start"` before any move, otherwise [`ply_label`]
pub fn cursor_label(cursor: Cursor) -> String {
    cursor.index().map_or_else(|| "Start".to_string(), ply_label)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::{Piece, PieceColor, PieceType};
    use crate::error::ReplayError;

    fn standard_view() -> ReplayView {
        ReplayView::new(ShakmatyRules::new())
    }

    #[test]
    fn test_load_moves_cursor_to_end() {
        let mut view = standard_view();
        view.load(["e4", "e5", "Nf3"]);

        assert_eq!(view.cursor(), Cursor::at(2));
        assert_eq!(view.replay().applied, 3);
    }

    #[test]
    fn test_load_empty_resets_to_start() {
        let mut view = standard_view();
        view.load(["e4"]);
        view.load(Vec::<String>::new());

        assert!(view.cursor().is_start());
        assert!(view.replay().record.is_initial());
    }

    #[test]
    fn test_edit_replays_from_scratch() {
        let mut view = standard_view();
        view.load(["e4", "e5", "Qh9"]);
        assert_eq!(view.invalid().first(), Some(2));

        view.edit(2, "Nf3").expect("in range");

        assert!(view.invalid().is_empty());
        assert_eq!(view.cursor(), Cursor::at(2));
        let frame = view.frame();
        assert_eq!(
            frame.grid.get("f3"),
            Some(Piece::new(PieceColor::White, PieceType::Knight))
        );
        assert_eq!(frame.grid.get("g1"), None);
    }

    #[test]
    fn test_edit_earlier_token_invalidates_later_context() {
        let mut view = standard_view();
        view.load(["e4", "e5", "Nf3", "Nc6"]);

        view.edit(0, "d4").expect("in range");

        // e5 is still legal, Nf3 and Nc6 too
        assert!(view.invalid().is_empty());

        view.edit(1, "exd4").expect("in range");
        assert_eq!(view.invalid().first(), Some(1));
    }

    #[test]
    fn test_edit_past_cursor_keeps_position() {
        let mut view = standard_view();
        view.load(["e4", "e5", "Nf3", "Nc6"]);
        view.jump_to(1).expect("in range");
        let before = view.replay().clone();

        view.edit(3, "Qh9").expect("in range");

        assert_eq!(view.cursor(), Cursor::at(1));
        assert!(view.invalid().is_empty());
        assert_eq!(view.replay(), &before);
        assert_eq!(view.tokens()[3], "Qh9");
    }

    #[test]
    fn test_out_of_range_leaves_state() {
        let mut view = standard_view();
        view.load(["e4", "e5"]);
        let before = view.replay().clone();

        assert_eq!(
            view.edit(2, "Nf3"),
            Err(ReplayError::IndexOutOfRange { index: 2, len: 2 })
        );
        assert_eq!(
            view.jump_to(5),
            Err(ReplayError::CursorOutOfRange { index: 5, len: 2 })
        );
        assert_eq!(view.tokens(), &["e4", "e5"]);
        assert_eq!(view.cursor(), Cursor::at(1));
        assert_eq!(view.replay(), &before);
    }

    #[test]
    fn test_navigation_replays() {
        let mut view = standard_view();
        view.load(["e4", "e5"]);

        view.prev();
        assert_eq!(view.replay().applied, 1);
        view.prev();
        assert!(view.replay().record.is_initial());
        assert!(!view.can_retreat());

        view.next();
        view.next();
        view.next();
        assert_eq!(view.cursor(), Cursor::at(1));
        assert!(!view.can_advance());

        view.reset();
        assert!(view.cursor().is_start());
        assert!(view.can_advance());

        view.jump_to(0).expect("in range");
        assert_eq!(
            view.frame().grid.get("e4"),
            Some(Piece::new(PieceColor::White, PieceType::Pawn))
        );
    }

    #[test]
    fn test_frame_at_start_is_standard_layout() {
        let view = standard_view();
        let frame = view.frame();

        assert_eq!(frame.grid.count(PieceColor::White), 16);
        assert_eq!(frame.grid.count(PieceColor::Black), 16);
        assert!(frame.invalid.is_empty());
        assert_eq!(frame.cursor, Cursor::START);
    }

    #[test]
    fn test_ply_labels() {
        assert_eq!(ply_label(0), "1.");
        assert_eq!(ply_label(1), "1...");
        assert_eq!(ply_label(4), "3.");
        assert_eq!(ply_label(5), "3...");
        assert_eq!(cursor_label(Cursor::START), "Start");
        assert_eq!(cursor_label(Cursor::at(2)), "2.");
    }
}
