//! Mailbox board representation.

use chess_core::{Color, Piece, PieceKind, Square};

/// The en-passant capture window opened by a pawn double advance.
///
/// `capture` is the cell a capturing pawn lands on (the skipped cell);
/// `pawn` is the cell holding the pawn that would be removed. The window
/// lives for exactly one subsequent half-move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnPassant {
    pub capture: Square,
    pub pawn: Square,
}

/// An 8x8 grid of cells, each empty or holding one piece.
///
/// The board owns cell contents and the transient en-passant state and
/// nothing else; turn order and legality live in [`crate::Game`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    grid: [[Option<Piece>; 8]; 8],
    en_passant: Option<EnPassant>,
}

impl Board {
    /// Creates a board with the standard initial setup.
    pub fn new() -> Self {
        let mut board = Self::empty();
        const BACK_RANK: [PieceKind; 8] = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        for color in [Color::White, Color::Black] {
            for (col, &kind) in BACK_RANK.iter().enumerate() {
                let home = Square::from_coordinate(color.back_rank(), col as u8);
                board.set(home, Piece::new(kind, color));
            }
            for col in 0..8 {
                let start = Square::from_coordinate(color.pawn_start_rank(), col);
                board.set(start, Piece::new(PieceKind::Pawn, color));
            }
        }
        board
    }

    /// Creates a board with no pieces, for fixtures and tests.
    pub fn empty() -> Self {
        Board {
            grid: [[None; 8]; 8],
            en_passant: None,
        }
    }

    /// Returns the piece at a square, if any.
    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        let (row, col) = square.coordinate();
        self.grid[row as usize][col as usize]
    }

    /// Returns true if the square holds no piece.
    #[inline]
    pub fn is_empty(&self, square: Square) -> bool {
        self.piece_at(square).is_none()
    }

    /// Places a piece on a square, replacing any occupant.
    #[inline]
    pub fn set(&mut self, square: Square, piece: Piece) {
        let (row, col) = square.coordinate();
        self.grid[row as usize][col as usize] = Some(piece);
    }

    /// Removes and returns the piece at a square.
    #[inline]
    pub fn take(&mut self, square: Square) -> Option<Piece> {
        let (row, col) = square.coordinate();
        self.grid[row as usize][col as usize].take()
    }

    /// Removes every piece and the en-passant state.
    pub fn clear(&mut self) {
        self.grid = [[None; 8]; 8];
        self.en_passant = None;
    }

    /// Enumerates all occupied cells with their pieces.
    pub fn occupied(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(|sq| self.piece_at(sq).map(|piece| (sq, piece)))
    }

    /// Enumerates the occupied cells belonging to one color.
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.occupied().filter(move |(_, piece)| piece.color == color)
    }

    /// Returns the square holding the king of the given color, if present.
    pub fn find_king(&self, color: Color) -> Option<Square> {
        self.pieces_of(color)
            .find(|(_, piece)| piece.kind == PieceKind::King)
            .map(|(sq, _)| sq)
    }

    /// Returns the current en-passant window, if one is open.
    #[inline]
    pub fn en_passant(&self) -> Option<EnPassant> {
        self.en_passant
    }

    /// Opens an en-passant window.
    #[inline]
    pub fn set_en_passant(&mut self, window: EnPassant) {
        self.en_passant = Some(window);
    }

    /// Closes the en-passant window.
    #[inline]
    pub fn clear_en_passant(&mut self) {
        self.en_passant = None;
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
