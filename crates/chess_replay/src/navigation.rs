//! Cursor / navigation controller
//!
//! Owns the cursor and keeps it inside `[-1, len - 1]`. It never looks at
//! board state or invalid indices; the owning [`crate::view::ReplayView`]
//! re-runs the replay after every transition.

use std::fmt;

use crate::error::{ReplayError, ReplayResult};

/// Replay cursor
///
/// `Cursor::START` is the "no moves applied" position (index -1);
/// `Cursor::at(i)` means tokens `0..=i` are replayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Cursor(Option<usize>);

impl Cursor {
    pub const START: Cursor = Cursor(None);

    pub fn at(index: usize) -> Self {
        Cursor(Some(index))
    }

    /// Last replayed index, `None` at the start
    pub fn index(self) -> Option<usize> {
        self.0
    }

    /// Signed form: -1 at the start
    pub fn as_isize(self) -> isize {
        self.0.map_or(-1, |i| i as isize)
    }

    pub fn is_start(self) -> bool {
        self.0.is_none()
    }

    /// Cursor on the last of `len` tokens, or START when empty
    pub fn last_of(len: usize) -> Self {
        Cursor(len.checked_sub(1))
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_isize())
    }
}

/// Index-bounds manager for the cursor
#[derive(Debug, Clone, Default)]
pub struct Navigator {
    cursor: Cursor,
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Step forward; no-op at `len - 1`
    pub fn next(&mut self, len: usize) {
        let next = match self.cursor.index() {
            None => 0,
            Some(i) => i + 1,
        };
        if next < len {
            self.cursor = Cursor::at(next);
        }
    }

    /// Step back; no-op at -1
    pub fn prev(&mut self) {
        self.cursor = match self.cursor.index() {
            None | Some(0) => Cursor::START,
            Some(i) => Cursor::at(i - 1),
        };
    }

    /// Back to the initial position
    pub fn reset(&mut self) {
        self.cursor = Cursor::START;
    }

    /// Jump to a signed index, `-1 <= index < len`
    pub fn jump_to(&mut self, index: isize, len: usize) -> ReplayResult<()> {
        let cursor = match index {
            -1 => Cursor::START,
            i if i >= 0 && (i as usize) < len => Cursor::at(i as usize),
            _ => return Err(ReplayError::CursorOutOfRange { index, len }),
        };
        self.cursor = cursor;
        Ok(())
    }

    /// Put the cursor on the last token after a fresh load
    pub(crate) fn seek_end(&mut self, len: usize) {
        self.cursor = Cursor::last_of(len);
    }
}
