//! Position decoder - board-state record to square/piece grid
//!
//! Pure and stateless: reads only the placement field of a record and lays
//! the pieces out on an 8x8 grid for rendering.
//!
//! # Coordinate System
//!
//! - `row` 0..8, top to bottom as written in the record (row 0 = rank 8)
//! - `col` 0..8, left to right (col 0 = file a)
//! - square name: file `'a' + col`, rank `8 - row`
//!
//! The decoder does not validate the record. Digits advance the column by
//! their value, any other character is a piece identifier; characters that
//! name no piece and squares that fall off the board are skipped.

use std::fmt;

use crate::record::BoardState;

/// Side a piece belongs to, encoded by letter case in the record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PieceColor {
    /// Upper-case letters
    #[default]
    White,
    /// Lower-case letters
    Black,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PieceType {
    #[default]
    King,
    Queen,
    Bishop,
    Knight,
    Rook,
    Pawn,
}

impl PieceType {
    fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_lowercase() {
            'k' => Some(PieceType::King),
            'q' => Some(PieceType::Queen),
            'b' => Some(PieceType::Bishop),
            'n' => Some(PieceType::Knight),
            'r' => Some(PieceType::Rook),
            'p' => Some(PieceType::Pawn),
            _ => None,
        }
    }

    /// Lower-case record letter
    pub fn letter(self) -> char {
        match self {
            PieceType::King => 'k',
            PieceType::Queen => 'q',
            PieceType::Bishop => 'b',
            PieceType::Knight => 'n',
            PieceType::Rook => 'r',
            PieceType::Pawn => 'p',
        }
    }
}

/// Piece identity: color + kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub color: PieceColor,
    pub piece_type: PieceType,
}

impl Piece {
    pub fn new(color: PieceColor, piece_type: PieceType) -> Self {
        Self { color, piece_type }
    }

    /// Parse a record character (`'K'` = white king, `'n'` = black knight)
    pub fn from_char(c: char) -> Option<Self> {
        let piece_type = PieceType::from_letter(c)?;
        let color = if c.is_ascii_uppercase() {
            PieceColor::White
        } else {
            PieceColor::Black
        };
        Some(Self { color, piece_type })
    }

    /// Record character for this piece
    pub fn to_char(self) -> char {
        let letter = self.piece_type.letter();
        match self.color {
            PieceColor::White => letter.to_ascii_uppercase(),
            PieceColor::Black => letter,
        }
    }

    /// Unicode chess glyph
    pub fn symbol(self) -> char {
        match (self.color, self.piece_type) {
            (PieceColor::White, PieceType::King) => '♔',
            (PieceColor::White, PieceType::Queen) => '♕',
            (PieceColor::White, PieceType::Rook) => '♖',
            (PieceColor::White, PieceType::Bishop) => '♗',
            (PieceColor::White, PieceType::Knight) => '♘',
            (PieceColor::White, PieceType::Pawn) => '♙',
            (PieceColor::Black, PieceType::King) => '♚',
            (PieceColor::Black, PieceType::Queen) => '♛',
            (PieceColor::Black, PieceType::Rook) => '♜',
            (PieceColor::Black, PieceType::Bishop) => '♝',
            (PieceColor::Black, PieceType::Knight) => '♞',
            (PieceColor::Black, PieceType::Pawn) => '♟',
        }
    }
}

/// A square addressed by grid row/column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Square {
    pub row: u8,
    pub col: u8,
}

impl Square {
    /// `None` unless both coordinates are in `0..8`
    pub fn new(row: u8, col: u8) -> Option<Self> {
        (row < 8 && col < 8).then_some(Self { row, col })
    }

    /// Parse a square name such as `"e4"`
    pub fn from_name(name: &str) -> Option<Self> {
        let mut chars = name.chars();
        let file = chars.next()?;
        let rank = chars.next()?;
        if chars.next().is_some() || !('a'..='h').contains(&file) || !('1'..='8').contains(&rank) {
            return None;
        }
        let col = file as u8 - b'a';
        let row = b'8' - rank as u8;
        Some(Self { row, col })
    }

    pub fn file(self) -> char {
        (b'a' + self.col) as char
    }

    pub fn rank(self) -> u8 {
        8 - self.row
    }

    /// Light squares are those with an even `row + col`
    pub fn is_light(self) -> bool {
        (self.row + self.col) % 2 == 0
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file(), self.rank())
    }
}

/// 8x8 square/piece grid, rebuilt from a record on every render
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Grid {
    cells: [[Option<Piece>; 8]; 8],
}

impl Grid {
    /// Piece on a square, if any
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.cells[square.row as usize][square.col as usize]
    }

    /// Piece on a named square (`"e1"`); `None` for empty or invalid names
    pub fn get(&self, name: &str) -> Option<Piece> {
        Square::from_name(name).and_then(|square| self.piece_at(square))
    }

    /// Rows top to bottom (rank 8 first)
    pub fn rows(&self) -> impl Iterator<Item = &[Option<Piece>; 8]> {
        self.cells.iter()
    }

    /// Every occupied square with its piece, in row-major order
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.cells.iter().enumerate().flat_map(|(row, cells)| {
            cells.iter().enumerate().filter_map(move |(col, cell)| {
                cell.map(|piece| {
                    (
                        Square {
                            row: row as u8,
                            col: col as u8,
                        },
                        piece,
                    )
                })
            })
        })
    }

    /// Number of pieces of one color
    pub fn count(&self, color: PieceColor) -> usize {
        self.pieces().filter(|(_, piece)| piece.color == color).count()
    }

    fn place(&mut self, row: usize, col: usize, piece: Piece) {
        if let Some(cell) = self.cells.get_mut(row).and_then(|cells| cells.get_mut(col)) {
            *cell = Some(piece);
        }
    }
}

/// Decode a record's placement field into a grid
pub fn decode(record: &BoardState) -> Grid {
    decode_placement(record.placement())
}

/// Decode a bare placement string (`"rnbqkbnr/pppppppp/8/..."`)
pub fn decode_placement(placement: &str) -> Grid {
    let mut grid = Grid::default();

    for (row, row_text) in placement.split('/').enumerate() {
        let mut col = 0usize;
        for c in row_text.chars() {
            if let Some(run) = c.to_digit(10) {
                col += run as usize;
                continue;
            }
            if let Some(piece) = Piece::from_char(c) {
                grid.place(row, col, piece);
            }
            col += 1;
        }
    }

    grid
}
