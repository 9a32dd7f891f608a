//! Chess piece representation and movement templates.

use crate::Color;

/// The six kinds of chess pieces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PieceKind {
    Pawn = 0,
    Knight = 1,
    Bishop = 2,
    Rook = 3,
    Queen = 4,
    King = 5,
}

/// Single-step (drow, dcol) offsets for a knight.
pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-1, 2),
    (-2, 1),
    (2, 1),
    (1, 2),
    (2, -1),
    (1, -2),
    (-2, -1),
    (-1, -2),
];

/// Single-step (drow, dcol) offsets for a king.
pub const KING_OFFSETS: [(i8, i8); 8] = [
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
];

/// Ray directions for a rook, extended up to seven steps.
pub const ROOK_DIRECTIONS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Ray directions for a bishop, extended up to seven steps.
pub const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// Ray directions for a queen: the union of rook and bishop directions.
pub const QUEEN_DIRECTIONS: [(i8, i8); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

impl PieceKind {
    /// All piece kinds in order.
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    /// The kinds a pawn may promote to.
    pub const PROMOTIONS: [PieceKind; 4] = [
        PieceKind::Queen,
        PieceKind::Rook,
        PieceKind::Bishop,
        PieceKind::Knight,
    ];

    /// Returns the index of this piece kind (0-5).
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns true if this piece slides along rays (bishop, rook, or queen).
    #[inline]
    pub const fn is_slider(self) -> bool {
        matches!(self, PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen)
    }

    /// Returns true if this kind is a legal promotion choice.
    #[inline]
    pub const fn is_promotion_choice(self) -> bool {
        !matches!(self, PieceKind::Pawn | PieceKind::King)
    }

    /// Returns the ray directions for a sliding piece, or the empty
    /// slice for pawns, knights, and kings.
    pub const fn ray_directions(self) -> &'static [(i8, i8)] {
        match self {
            PieceKind::Rook => &ROOK_DIRECTIONS,
            PieceKind::Bishop => &BISHOP_DIRECTIONS,
            PieceKind::Queen => &QUEEN_DIRECTIONS,
            _ => &[],
        }
    }

    /// Returns the single-step offsets for a knight or king, or the
    /// empty slice for other kinds.
    pub const fn step_offsets(self) -> &'static [(i8, i8)] {
        match self {
            PieceKind::Knight => &KNIGHT_OFFSETS,
            PieceKind::King => &KING_OFFSETS,
            _ => &[],
        }
    }

    /// Returns the Unicode glyph for this piece with the given color.
    pub const fn glyph(self, color: Color) -> char {
        match (self, color) {
            (PieceKind::King, Color::White) => '\u{2654}',
            (PieceKind::Queen, Color::White) => '\u{2655}',
            (PieceKind::Rook, Color::White) => '\u{2656}',
            (PieceKind::Bishop, Color::White) => '\u{2657}',
            (PieceKind::Knight, Color::White) => '\u{2658}',
            (PieceKind::Pawn, Color::White) => '\u{2659}',
            (PieceKind::King, Color::Black) => '\u{265A}',
            (PieceKind::Queen, Color::Black) => '\u{265B}',
            (PieceKind::Rook, Color::Black) => '\u{265C}',
            (PieceKind::Bishop, Color::Black) => '\u{265D}',
            (PieceKind::Knight, Color::Black) => '\u{265E}',
            (PieceKind::Pawn, Color::Black) => '\u{265F}',
        }
    }

    /// Returns the lowercase name used in snapshots (e.g. "knight").
    pub const fn name(self) -> &'static str {
        match self {
            PieceKind::Pawn => "pawn",
            PieceKind::Knight => "knight",
            PieceKind::Bishop => "bishop",
            PieceKind::Rook => "rook",
            PieceKind::Queen => "queen",
            PieceKind::King => "king",
        }
    }

    /// Parses a snapshot name back into a piece kind.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "pawn" => Some(PieceKind::Pawn),
            "knight" => Some(PieceKind::Knight),
            "bishop" => Some(PieceKind::Bishop),
            "rook" => Some(PieceKind::Rook),
            "queen" => Some(PieceKind::Queen),
            "king" => Some(PieceKind::King),
            _ => None,
        }
    }
}

impl std::fmt::Display for PieceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PieceKind::Pawn => "Pawn",
            PieceKind::Knight => "Knight",
            PieceKind::Bishop => "Bishop",
            PieceKind::Rook => "Rook",
            PieceKind::Queen => "Queen",
            PieceKind::King => "King",
        };
        write!(f, "{}", name)
    }
}

/// A piece on the board: kind, owning color, and whether it has moved.
///
/// `has_moved` starts false and is set the first time the piece moves or
/// captures; it gates castling eligibility for kings and rooks. Pawn
/// double-step eligibility is keyed off the starting rank instead, since
/// a pawn that has captured sideways onto its starting rank would
/// otherwise look unmoved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
    pub has_moved: bool,
}

impl Piece {
    /// Creates a new piece that has not yet moved.
    #[inline]
    pub const fn new(kind: PieceKind, color: Color) -> Self {
        Piece {
            kind,
            color,
            has_moved: false,
        }
    }

    /// Returns the Unicode glyph for this piece.
    #[inline]
    pub const fn glyph(self) -> char {
        self.kind.glyph(self.color)
    }
}
