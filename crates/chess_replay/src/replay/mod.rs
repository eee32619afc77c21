//! Prefix replay engine
//!
//! Re-derives the board-state record for a token prefix from scratch and
//! reports where the prefix first stops being legal.
//!
//! # Algorithm
//!
//! ```text
//! cursor == START or no tokens  -> initial record, no invalid index
//! for i in 0..=cursor:
//!     blank token               -> skip (not invalid)
//!     authority.apply(tokens[i]):
//!         Ok(next)              -> working = next
//!         Err(rejection)        -> invalid = {i}; stop
//! ```
//!
//! Stopping at the first failure is deliberate. Legality depends on the
//! position, so once one ply is wrong every later ply is unevaluated rather
//! than invalid. At most one index can ever be reported, which
//! [`InvalidIndexSet`] encodes in its representation.
//!
//! Every call rescans from ply 0. Prefixes are bounded by one game, and a
//! full rescan leaves nothing to invalidate when an arbitrary index is
//! edited.


use tracing::debug;

use crate::error::MoveRejection;
use crate::navigation::Cursor;
use crate::record::BoardState;
use crate::rules::{GameStatus, RulesAuthority};

/// Indices at which replay could not proceed (zero or one element)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct InvalidIndexSet(Option<usize>);

impl InvalidIndexSet {
    pub fn empty() -> Self {
        Self(None)
    }

    pub fn single(index: usize) -> Self {
        Self(Some(index))
    }

    pub fn contains(&self, index: usize) -> bool {
        self.0 == Some(index)
    }

    pub fn len(&self) -> usize {
        usize::from(self.0.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }

    /// The failing index, if any
    pub fn first(&self) -> Option<usize> {
        self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> {
        self.0.into_iter()
    }
}

/// Outcome of replaying a prefix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replay {
    /// Position after the last successfully applied token
    pub record: BoardState,
    pub invalid: InvalidIndexSet,
    /// Number of non-blank tokens applied
    pub applied: usize,
    /// Why the invalid index was refused
    pub rejection: Option<MoveRejection>,
    /// Game-over predicates for `record`
    pub status: GameStatus,
}

impl Replay {
    /// Result for the initial position with nothing applied
    pub fn initial() -> Self {
        Self {
            record: BoardState::initial(),
            invalid: InvalidIndexSet::empty(),
            applied: 0,
            rejection: None,
            status: GameStatus::Ongoing { in_check: false },
        }
    }
}

impl Default for Replay {
    fn default() -> Self {
        Self::initial()
    }
}

/// Replay `tokens[0..=cursor]` against the rules authority
///
/// A cursor past the end of `tokens` is clamped to the last token.
pub fn replay<A, S>(authority: &A, tokens: &[S], cursor: Cursor) -> Replay
where
    A: RulesAuthority,
    S: AsRef<str>,
{
    let Some(last) = cursor.index() else {
        return Replay::initial();
    };
    if tokens.is_empty() {
        return Replay::initial();
    }
    let end = last.min(tokens.len() - 1);

    let mut working = authority.initial_position();
    let mut applied = 0;
    let mut invalid = InvalidIndexSet::empty();
    let mut rejection = None;

    for (index, token) in tokens[..=end].iter().enumerate() {
        let token = token.as_ref();
        if token.trim().is_empty() {
            continue;
        }

        match authority.apply(&working, token) {
            Ok(next) => {
                working = next;
                applied += 1;
            }
            Err(reason) => {
                debug!("[REPLAY] Token {} ({:?}) rejected: {}", index, token, reason);
                invalid = InvalidIndexSet::single(index);
                rejection = Some(reason);
                break;
            }
        }
    }

    let record = if applied == 0 {
        BoardState::initial()
    } else {
        authority.record(&working)
    };

    Replay {
        record,
        invalid,
        applied,
        rejection,
        status: authority.status(&working),
    }
}
