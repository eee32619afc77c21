//! Rules authority backed by `shakmaty`
//!
//! Tokens come from OCR output of handwritten scoresheets, so the parser is
//! lenient about presentation and strict about chess:
//!
//! - surrounding whitespace and trailing annotation glyphs (`!`, `?`) are
//!   dropped
//! - `0-0` / `0-0-0` are read as castling
//! - SAN (with optional `+`/`#`) is tried first, then long algebraic
//!   (`e2e4`, `e7e8q`)
//!
//! Legality is whatever `shakmaty` says for standard chess.

use shakmaty::fen::Fen;
use shakmaty::san::{SanError, SanPlus};
use shakmaty::uci::UciMove;
use shakmaty::{Chess, Color, EnPassantMode, Move, Position};

use super::{GameStatus, RulesAuthority};
use crate::decoder::PieceColor;
use crate::error::MoveRejection;
use crate::record::BoardState;

/// Halfmove clock value at which the fifty-move rule applies
const FIFTY_MOVE_PLIES: u32 = 100;

/// Standard-chess rules authority
#[derive(Debug, Default, Clone, Copy)]
pub struct ShakmatyRules;

impl ShakmatyRules {
    pub fn new() -> Self {
        Self
    }

    /// Resolve a token to a legal move in `position`
    pub fn parse_move(&self, position: &Chess, token: &str) -> Result<Move, MoveRejection> {
        let normalized = normalize_token(token);

        // "g1f3" is also lax SAN for a pawn on g1, so an illegal SAN reading
        // still falls through to the long algebraic reading
        let san = SanPlus::from_ascii(normalized.as_bytes())
            .ok()
            .map(|san_plus| san_plus.san.to_move(position));
        match &san {
            Some(Ok(m)) => return Ok(*m),
            Some(Err(SanError::AmbiguousSan)) => {
                return Err(MoveRejection::Ambiguous {
                    token: token.to_string(),
                })
            }
            Some(Err(SanError::IllegalSan)) | None => {}
        }

        if let Ok(uci) = normalized.parse::<UciMove>() {
            return uci.to_move(position).map_err(|_| MoveRejection::Illegal {
                token: token.to_string(),
            });
        }

        if san.is_some() {
            Err(MoveRejection::Illegal {
                token: token.to_string(),
            })
        } else {
            Err(MoveRejection::Malformed {
                token: token.to_string(),
            })
        }
    }
}

impl RulesAuthority for ShakmatyRules {
    type Position = Chess;

    fn initial_position(&self) -> Chess {
        Chess::default()
    }

    fn apply(&self, position: &Chess, token: &str) -> Result<Chess, MoveRejection> {
        let m = self.parse_move(position, token)?;
        let mut next = position.clone();
        next.play_unchecked(m);
        Ok(next)
    }

    fn record(&self, position: &Chess) -> BoardState {
        BoardState::from_fen(Fen::from_position(position, EnPassantMode::Legal).to_string())
    }

    fn status(&self, position: &Chess) -> GameStatus {
        if position.is_checkmate() {
            // The side to move is the side that got mated
            let winner = match position.turn() {
                Color::White => PieceColor::Black,
                Color::Black => PieceColor::White,
            };
            GameStatus::Checkmate { winner }
        } else if position.is_stalemate() {
            GameStatus::Stalemate
        } else if position.is_insufficient_material() {
            GameStatus::InsufficientMaterial
        } else if position.halfmoves() >= FIFTY_MOVE_PLIES {
            GameStatus::FiftyMoveRule
        } else {
            GameStatus::Ongoing {
                in_check: position.is_check(),
            }
        }
    }
}

/// Strip presentation noise a scoresheet transcription tends to carry
fn normalize_token(token: &str) -> String {
    let trimmed = token.trim().trim_end_matches(['!', '?']).trim_end();

    let is_zero_castle = trimmed.starts_with("0-0")
        && trimmed.chars().all(|c| matches!(c, '0' | '-' | '+' | '#'));
    if is_zero_castle {
        trimmed.replace('0', "O")
    } else {
        trimmed.to_string()
    }
}
