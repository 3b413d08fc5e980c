//! Piece codes, square naming and the standard starting layout.
//! No GPUI dependencies - this is the domain layer.

use std::fmt;
use std::str::FromStr;

use shakmaty::{Board, Color as SColor, Role, Square};

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum PieceKind {
    Bishop,
    King,
    Knight,
    Pawn,
    Queen,
    Rook,
}

impl PieceKind {
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Bishop,
        PieceKind::King,
        PieceKind::Knight,
        PieceKind::Pawn,
        PieceKind::Queen,
        PieceKind::Rook,
    ];

    pub fn letter(self) -> char {
        match self {
            PieceKind::Bishop => 'B',
            PieceKind::King => 'K',
            PieceKind::Knight => 'N',
            PieceKind::Pawn => 'P',
            PieceKind::Queen => 'Q',
            PieceKind::Rook => 'R',
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum PieceColor {
    Dark,
    Light,
}

impl PieceColor {
    pub fn letter(self) -> char {
        match self {
            PieceColor::Dark => 'D',
            PieceColor::Light => 'L',
        }
    }
}

/// Identifies which glyph a piece is drawn with, e.g. `DB` for a dark bishop
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct PieceCode {
    pub color: PieceColor,
    pub kind: PieceKind,
}

impl PieceCode {
    /// Every code in catalog order: dark pieces first, kinds alphabetical
    pub const ALL: [PieceCode; 12] = {
        let mut all = [PieceCode::new(PieceColor::Dark, PieceKind::Bishop); 12];
        let mut i = 0;
        while i < 6 {
            all[i] = PieceCode::new(PieceColor::Dark, PieceKind::ALL[i]);
            all[i + 6] = PieceCode::new(PieceColor::Light, PieceKind::ALL[i]);
            i += 1;
        }
        all
    };

    pub const fn new(color: PieceColor, kind: PieceKind) -> Self {
        Self { color, kind }
    }

    /// Path of the glyph image, relative to the asset root
    pub fn svg_path(&self) -> String {
        format!("assets/pieces/{self}.svg")
    }
}

impl fmt::Display for PieceCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.color.letter(), self.kind.letter())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown piece code {0:?}, expected a color (D/L) followed by a kind (B/K/N/P/Q/R)")]
pub struct PieceCodeError(pub String);

impl FromStr for PieceCode {
    type Err = PieceCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PieceCode::ALL
            .into_iter()
            .find(|code| code.to_string().eq_ignore_ascii_case(s))
            .ok_or_else(|| PieceCodeError(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid square name {0:?}")]
pub struct CellParseError(pub String);

/// Upper-case square name, e.g. `E4`
pub fn cell_name(sq: Square) -> String {
    format!(
        "{}{}",
        sq.file().char().to_ascii_uppercase(),
        sq.rank().char()
    )
}

/// Parse a square name in either case
pub fn parse_cell(name: &str) -> Result<Square, CellParseError> {
    name.to_ascii_lowercase()
        .parse::<Square>()
        .map_err(|_| CellParseError(name.to_string()))
}

/// Convert shakmaty piece to our domain PieceCode
pub fn shakmaty_to_code(piece: shakmaty::Piece) -> PieceCode {
    let kind = match piece.role {
        Role::Pawn => PieceKind::Pawn,
        Role::Knight => PieceKind::Knight,
        Role::Bishop => PieceKind::Bishop,
        Role::Rook => PieceKind::Rook,
        Role::Queen => PieceKind::Queen,
        Role::King => PieceKind::King,
    };
    let color = match piece.color {
        SColor::White => PieceColor::Light,
        SColor::Black => PieceColor::Dark,
    };
    PieceCode { kind, color }
}

/// The 32 pieces of the standard starting position, from A1 upward
pub fn standard_layout() -> Vec<(PieceCode, Square)> {
    let board = Board::default();
    (0..64)
        .map(Square::new)
        .filter_map(|sq| board.piece_at(sq).map(|p| (shakmaty_to_code(p), sq)))
        .collect()
}
