//! Terminal rendering
//!
//! Presentation only: turns a [`Frame`] and the token list into text. All
//! visual encoding lives here (glyphs, shading, coordinate labels, the
//! invalid-move marker); the replay core only supplies data.

use std::fmt::Write as _;

use chess_replay::{ply_label, Frame, GameStatus, Grid, InvalidIndexSet, Piece, Square};

/// Text rendering options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Unicode chess glyphs; otherwise record letters (`K`, `n`, ...)
    pub unicode: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { unicode: true }
    }
}

const LIGHT_EMPTY: char = '·';
const DARK_EMPTY: char = ':';
const ASCII_LIGHT_EMPTY: char = '.';

fn piece_glyph(piece: Piece, options: RenderOptions) -> char {
    if options.unicode {
        piece.symbol()
    } else {
        piece.to_char()
    }
}

fn empty_glyph(square: Square, options: RenderOptions) -> char {
    match (square.is_light(), options.unicode) {
        (true, true) => LIGHT_EMPTY,
        (true, false) => ASCII_LIGHT_EMPTY,
        (false, _) => DARK_EMPTY,
    }
}

/// 8x8 board, rank 8 at the top, with coordinate labels
pub fn render_board(grid: &Grid, options: RenderOptions) -> String {
    let mut out = String::new();

    for (row, cells) in grid.rows().enumerate() {
        let _ = write!(out, "{} ", 8 - row);
        for (col, cell) in cells.iter().enumerate() {
            let square = Square {
                row: row as u8,
                col: col as u8,
            };
            let glyph = match cell {
                Some(piece) => piece_glyph(*piece, options),
                None => empty_glyph(square, options),
            };
            out.push(' ');
            out.push(glyph);
        }
        out.push('\n');
    }
    out.push_str("  ");
    for file in 'a'..='h' {
        out.push(' ');
        out.push(file);
    }
    out.push('\n');

    out
}

/// Move list, two plies per line, with cursor (`>`) and invalid (`!`) marks
pub fn render_moves(tokens: &[String], frame: &Frame) -> String {
    if tokens.is_empty() {
        return "No moves extracted yet.\n".to_string();
    }

    let mut out = String::new();
    for (index, token) in tokens.iter().enumerate() {
        let marker = if frame.invalid.contains(index) {
            '!'
        } else if frame.cursor.index() == Some(index) {
            '>'
        } else {
            ' '
        };
        let shown = if token.trim().is_empty() { "_" } else { token.as_str() };

        if index % 2 == 0 {
            let _ = write!(out, "{:>6} {}{:<10}", ply_label(index), marker, shown);
        } else {
            let _ = writeln!(out, "{}{}", marker, shown);
        }
    }
    if tokens.len() % 2 == 1 {
        out.push('\n');
    }

    out
}

/// One-line summary: cursor, invalid count and game status
pub fn render_status(frame: &Frame) -> String {
    let mut parts = vec![format!("Move: {}", chess_replay::cursor_label(frame.cursor))];
    if let Some(summary) = invalid_summary(&frame.invalid) {
        parts.push(summary);
    }
    if let Some(status) = status_summary(frame.status) {
        parts.push(status);
    }
    parts.join("  |  ")
}

fn invalid_summary(invalid: &InvalidIndexSet) -> Option<String> {
    invalid
        .first()
        .map(|index| format!("{} Invalid (at {})", invalid.len(), ply_label(index)))
}

fn status_summary(status: GameStatus) -> Option<String> {
    match status {
        GameStatus::Checkmate { winner } => Some(format!("Checkmate! {winner:?} wins")),
        other => {
            let text = other.describe();
            (!text.is_empty()).then(|| text.to_string())
        }
    }
}

/// Board, status line and move list in one block
pub fn render_frame(tokens: &[String], frame: &Frame, options: RenderOptions) -> String {
    let mut out = render_board(&frame.grid, options);
    out.push('\n');
    out.push_str(&render_status(frame));
    out.push_str("\n\n");
    out.push_str(&render_moves(tokens, frame));
    out
}
