//! Turn orchestration and move legality.
//!
//! [`Game`] owns the board and the two players and runs every half-move
//! through the same pipeline: validate the selection, compute the
//! piece's destination set, check the path for obstructions, apply the
//! move, and verify the mover's own king is not left attacked —
//! reverting the application if it is. Check, checkmate, and stalemate
//! are derived queries over the same board.

use crate::board::{Board, EnPassant};
use crate::movegen;
use crate::path::{move_path, squares_between};
use chess_core::{Color, File, NotationError, Piece, PieceKind, Square};
use thiserror::Error;

/// A player identity: display name plus the color they command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    name: String,
    color: Color,
}

impl Player {
    /// Creates a player.
    pub fn new(name: impl Into<String>, color: Color) -> Self {
        Player {
            name: name.into(),
            color,
        }
    }

    /// Returns the player's display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the color this player commands.
    pub fn color(&self) -> Color {
        self.color
    }
}

/// Why a requested play was rejected.
///
/// Every variant is a rejection of the request, not a fault: the game
/// state is unchanged (a self-check violation is reverted before it is
/// reported) and the caller may retry with different input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlayError {
    /// A cell label outside `a1`..`h8`.
    #[error(transparent)]
    InvalidCell(#[from] NotationError),
    /// The start cell holds no piece of the player to move.
    #[error("no piece of yours on the starting cell")]
    InvalidSelection,
    /// The destination is not in the piece's movement template.
    #[error("that piece cannot reach the destination")]
    IllegalDestination,
    /// An intervening cell is occupied, or the destination holds a
    /// friendly piece.
    #[error("the path to the destination is blocked")]
    PathObstructed,
    /// A castling precondition is unmet.
    #[error("castling is not possible")]
    CastleIllegal,
    /// The move would leave the mover's own king attacked.
    #[error("that move would leave your king in check")]
    SelfCheckViolation,
    /// The promotion choice is not queen, rook, bishop, or knight, or
    /// no promotion is pending.
    #[error("promotion must be to queen, rook, bishop, or knight")]
    PromotionInvalid,
    /// A new move was attempted while a pawn still waits for its
    /// promotion choice.
    #[error("a pawn is waiting to be promoted")]
    PromotionPending,
}

/// The derived state of the game for the player to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    Check,
    Checkmate,
    Stalemate,
}

/// A two-player game: one board, two players, and the turn order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    pub(crate) board: Board,
    pub(crate) players: [Player; 2],
    pub(crate) current: Color,
    pub(crate) pending_promotion: Option<Square>,
}

impl Game {
    /// Creates a game on a freshly set up board, White to move.
    pub fn new(white_name: impl Into<String>, black_name: impl Into<String>) -> Self {
        Self::with_board(
            Board::new(),
            Player::new(white_name, Color::White),
            Player::new(black_name, Color::Black),
        )
    }

    /// Creates a game over a prepared board, White to move.
    ///
    /// # Panics
    /// Panics if both players claim the same color.
    pub fn with_board(board: Board, a: Player, b: Player) -> Self {
        assert!(
            a.color() != b.color(),
            "players must command opposite colors"
        );
        let (white, black) = if a.color() == Color::White { (a, b) } else { (b, a) };
        Game {
            board,
            players: [white, black],
            current: Color::White,
            pending_promotion: None,
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the player commanding a color.
    pub fn player(&self, color: Color) -> &Player {
        &self.players[color.index()]
    }

    /// Returns the player whose turn it is.
    pub fn current_player(&self) -> &Player {
        self.player(self.current)
    }

    /// Returns the color to move.
    pub fn turn(&self) -> Color {
        self.current
    }

    /// Hands the turn to a color directly. Setup utility for starting
    /// from prepared positions; regular play advances via [`make_play`].
    ///
    /// [`make_play`]: Game::make_play
    pub fn set_turn(&mut self, color: Color) {
        self.current = color;
    }

    /// Returns the cell of the pawn awaiting promotion, if any.
    pub fn pending_promotion(&self) -> Option<Square> {
        self.pending_promotion
    }

    /// Plays one half-move from `start` to `end` (algebraic labels).
    ///
    /// On success the destination square is returned and the turn
    /// passes to the other player — unless the move landed a pawn on
    /// its promotion rank, in which case the turn stays open until
    /// [`promote`](Game::promote) resolves the choice. On failure the
    /// board is left exactly as it was.
    pub fn make_play(&mut self, start: &str, end: &str) -> Result<Square, PlayError> {
        let from = Square::parse(start)?;
        let to = Square::parse(end)?;
        if self.pending_promotion.is_some() {
            return Err(PlayError::PromotionPending);
        }
        let piece = self
            .board
            .piece_at(from)
            .ok_or(PlayError::InvalidSelection)?;
        if piece.color != self.current {
            return Err(PlayError::InvalidSelection);
        }

        if piece.kind == PieceKind::King && self.is_castle_request(from, to) {
            self.castle(from, to)?;
            self.current = self.current.opposite();
            return Ok(to);
        }

        if !movegen::destinations(&self.board, from).contains(&to) {
            return Err(PlayError::IllegalDestination);
        }
        self.check_obstruction(piece, from, to)?;

        // Apply, then verify the mover's own king. The pre-move board is
        // restored wholesale on violation, so callers never observe the
        // intermediate state. This is also what rejects pinned pieces.
        let saved = self.board;
        self.apply(piece, from, to);
        if movegen::is_king_attacked(&self.board, self.current) {
            self.board = saved;
            return Err(PlayError::SelfCheckViolation);
        }

        let (to_row, _) = to.coordinate();
        if piece.kind == PieceKind::Pawn && to_row == piece.color.promotion_rank() {
            self.pending_promotion = Some(to);
        } else {
            self.current = self.current.opposite();
        }
        Ok(to)
    }

    /// Resolves a pending promotion, replacing the pawn with a new
    /// piece of the chosen kind and the same color, then passes the
    /// turn.
    pub fn promote(&mut self, kind: PieceKind) -> Result<Square, PlayError> {
        let square = self.pending_promotion.ok_or(PlayError::PromotionInvalid)?;
        if !kind.is_promotion_choice() {
            return Err(PlayError::PromotionInvalid);
        }
        self.board.set(
            square,
            Piece {
                kind,
                color: self.current,
                has_moved: true,
            },
        );
        self.pending_promotion = None;
        self.current = self.current.opposite();
        Ok(square)
    }

    /// Returns true if the given color's king is attacked.
    pub fn player_in_check(&self, color: Color) -> bool {
        movegen::is_king_attacked(&self.board, color)
    }

    /// Returns true if the player to move is in check.
    pub fn is_check(&self) -> bool {
        self.player_in_check(self.current)
    }

    /// Returns true if the given color is checkmated: in check, the
    /// king has no safe destination, and the check cannot be defended.
    pub fn is_checkmate(&self, color: Color) -> bool {
        self.player_in_check(color)
            && self.king_safe_squares(color).is_empty()
            && !self.check_is_defendable(color)
    }

    /// Returns true if the given color is stalemated: not in check, the
    /// king has no safe destination, and no other piece of the color
    /// has any legal, unobstructed move.
    pub fn is_stalemate(&self, color: Color) -> bool {
        if self.player_in_check(color) || !self.king_safe_squares(color).is_empty() {
            return false;
        }
        !self
            .board
            .pieces_of(color)
            .filter(|(_, piece)| piece.kind != PieceKind::King)
            .any(|(from, _)| !movegen::legal_targets(&self.board, from).is_empty())
    }

    /// Returns the derived state for the player to move.
    pub fn status(&self) -> GameStatus {
        if self.is_checkmate(self.current) {
            GameStatus::Checkmate
        } else if self.is_stalemate(self.current) {
            GameStatus::Stalemate
        } else if self.is_check() {
            GameStatus::Check
        } else {
            GameStatus::InProgress
        }
    }

    /// King destinations that are neither friendly-occupied nor inside
    /// the opponent's attacked set. Relies on the king-transparent
    /// attack walk: a square behind the king on an attack line is still
    /// attacked, and a defended enemy piece's cell is in the set, so
    /// capturing it is correctly excluded.
    fn king_safe_squares(&self, color: Color) -> Vec<Square> {
        let king = self.king_square(color);
        let attacked = movegen::attacked_squares(&self.board, color.opposite());
        movegen::legal_targets(&self.board, king)
            .into_iter()
            .filter(|sq| !attacked.contains(sq))
            .collect()
    }

    /// A check is defendable iff exactly one enemy piece attacks the
    /// king and some friendly non-king piece has a legal move onto the
    /// attacker's cell or a cell strictly between attacker and king.
    /// With two or more attackers no single move can cover both paths.
    fn check_is_defendable(&self, color: Color) -> bool {
        let king = self.king_square(color);
        let attackers = movegen::attackers_of(&self.board, king, color.opposite());
        if attackers.len() != 1 {
            return false;
        }
        let attacker = attackers[0];
        let mut cover = vec![attacker];
        if let Some(between) = squares_between(attacker, king) {
            cover.extend(between);
        }
        self.board
            .pieces_of(color)
            .filter(|(_, piece)| piece.kind != PieceKind::King)
            .any(|(from, _)| {
                movegen::legal_targets(&self.board, from)
                    .iter()
                    .any(|target| cover.contains(target))
            })
    }

    fn king_square(&self, color: Color) -> Square {
        self.board
            .find_king(color)
            .unwrap_or_else(|| panic!("no {} king on the board", color))
    }

    /// A king on its home cell moving two files sideways along the back
    /// rank is a castle request, never a regular move.
    fn is_castle_request(&self, from: Square, to: Square) -> bool {
        let row = self.current.back_rank();
        from == Square::from_coordinate(row, 4)
            && (to == Square::from_coordinate(row, 2) || to == Square::from_coordinate(row, 6))
    }

    fn castle(&mut self, from: Square, to: Square) -> Result<(), PlayError> {
        let color = self.current;
        let row = color.back_rank();
        let king = self.board.piece_at(from).ok_or(PlayError::CastleIllegal)?;
        if king.has_moved {
            return Err(PlayError::CastleIllegal);
        }

        let (rook_from, rook_to) = match to.file() {
            File::G => (
                Square::from_coordinate(row, 7),
                Square::from_coordinate(row, 5),
            ),
            File::C => (
                Square::from_coordinate(row, 0),
                Square::from_coordinate(row, 3),
            ),
            _ => return Err(PlayError::CastleIllegal),
        };
        let rook = self
            .board
            .piece_at(rook_from)
            .ok_or(PlayError::CastleIllegal)?;
        if rook.kind != PieceKind::Rook || rook.color != color || rook.has_moved {
            return Err(PlayError::CastleIllegal);
        }

        let between = squares_between(from, rook_from).ok_or(PlayError::CastleIllegal)?;
        if between.iter().any(|&sq| !self.board.is_empty(sq)) {
            return Err(PlayError::CastleIllegal);
        }
        if movegen::is_king_attacked(&self.board, color) {
            return Err(PlayError::CastleIllegal);
        }
        // The king's traversal, destination included, must be safe.
        let traversal = move_path(from, to).ok_or(PlayError::CastleIllegal)?;
        if traversal
            .iter()
            .any(|&sq| movegen::is_attacked(&self.board, sq, color.opposite()))
        {
            return Err(PlayError::CastleIllegal);
        }

        let mut king = king;
        king.has_moved = true;
        self.board.take(from);
        self.board.set(to, king);
        let mut rook = rook;
        rook.has_moved = true;
        self.board.take(rook_from);
        self.board.set(rook_to, rook);
        self.board.clear_en_passant();
        Ok(())
    }

    fn check_obstruction(&self, piece: Piece, from: Square, to: Square) -> Result<(), PlayError> {
        if self
            .board
            .piece_at(to)
            .is_some_and(|target| target.color == piece.color)
        {
            return Err(PlayError::PathObstructed);
        }
        // Knights jump; everyone else needs the cells strictly between
        // start and destination clear. The captured piece itself, being
        // the destination, never blocks.
        if piece.kind == PieceKind::Knight {
            return Ok(());
        }
        if let Some(between) = squares_between(from, to) {
            if between.iter().any(|&sq| !self.board.is_empty(sq)) {
                return Err(PlayError::PathObstructed);
            }
        }
        Ok(())
    }

    fn apply(&mut self, piece: Piece, from: Square, to: Square) {
        if piece.kind == PieceKind::Pawn {
            if let Some(window) = self.board.en_passant() {
                if window.capture == to {
                    self.board.take(window.pawn);
                }
            }
        }
        self.board.take(to);
        self.board.take(from);
        let mut moved = piece;
        moved.has_moved = true;
        self.board.set(to, moved);

        let (from_row, _) = from.coordinate();
        let (to_row, _) = to.coordinate();
        if piece.kind == PieceKind::Pawn && (to_row as i8 - from_row as i8).abs() == 2 {
            // Two-rank advance: open the capture window on the skipped
            // cell for exactly one half-move.
            let skipped = Square::from_coordinate(
                from_row.wrapping_add_signed(piece.color.pawn_direction()),
                from.coordinate().1,
            );
            self.board.set_en_passant(EnPassant {
                capture: skipped,
                pawn: to,
            });
        } else {
            self.board.clear_en_passant();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::Color::{Black, White};

    fn sq(label: &str) -> Square {
        Square::parse(label).unwrap()
    }

    fn piece(kind: PieceKind, color: Color) -> Piece {
        Piece::new(kind, color)
    }

    fn game_over(board: Board) -> Game {
        Game::with_board(board, Player::new("p1", White), Player::new("p2", Black))
    }

    #[test]
    fn rejects_empty_start_cell() {
        let mut game = Game::new("p1", "p2");
        assert_eq!(game.make_play("c3", "c4"), Err(PlayError::InvalidSelection));
    }

    #[test]
    fn rejects_malformed_labels() {
        let mut game = Game::new("p1", "p2");
        assert_eq!(
            game.make_play("b8", "d9"),
            Err(PlayError::InvalidCell(NotationError::InvalidCell(
                "d9".to_string()
            )))
        );
        assert_eq!(
            game.make_play("b9", "d8"),
            Err(PlayError::InvalidCell(NotationError::InvalidCell(
                "b9".to_string()
            )))
        );
    }

    #[test]
    fn rejects_opponent_piece_selection() {
        let mut game = Game::new("p1", "p2");
        game.set_turn(Black);
        assert_eq!(game.make_play("a2", "a3"), Err(PlayError::InvalidSelection));
    }

    #[test]
    fn accepts_matching_piece_and_returns_destination() {
        let mut game = Game::new("p1", "p2");
        assert_eq!(game.make_play("a2", "a3"), Ok(sq("a3")));
        assert_eq!(game.turn(), Black);
        assert_eq!(
            game.board().piece_at(sq("a3")).map(|p| p.kind),
            Some(PieceKind::Pawn)
        );
        assert!(game.board().is_empty(sq("a2")));
    }

    #[test]
    fn moved_pieces_remember_it() {
        let mut game = Game::new("p1", "p2");
        game.make_play("a2", "a3").unwrap();
        assert!(game.board().piece_at(sq("a3")).unwrap().has_moved);
    }

    #[test]
    fn pawn_cannot_move_onto_blocked_cell() {
        let mut board = Board::new();
        board.set(sq("a3"), piece(PieceKind::King, White));
        let mut game = game_over(board);
        assert_eq!(
            game.make_play("a2", "a3"),
            Err(PlayError::IllegalDestination)
        );
        assert_eq!(
            game.board().piece_at(sq("a3")),
            Some(piece(PieceKind::King, White))
        );
    }

    #[test]
    fn queen_ringed_by_knights_cannot_slide_out() {
        let mut board = Board::empty();
        board.set(sq("d4"), piece(PieceKind::Queen, White));
        for cell in ["d6", "d2", "b4", "f4", "b6", "f6", "f2", "b2"] {
            board.set(sq(cell), piece(PieceKind::Knight, Black));
        }
        let mut game = game_over(board);
        let before = *game.board();

        for target in ["d8", "d1", "a4", "h4", "h8", "a7", "a1", "g1"] {
            assert_eq!(
                game.make_play("d4", target),
                Err(PlayError::PathObstructed),
                "d4 -> {target}"
            );
        }
        assert_eq!(*game.board(), before);
    }

    #[test]
    fn knight_jumps_over_other_pieces() {
        let mut game = Game::new("p1", "p2");
        let knight = game.board().piece_at(sq("b1")).unwrap();
        assert!(game.board().is_empty(sq("c3")));

        game.make_play("b1", "c3").unwrap();

        assert!(game.board().is_empty(sq("b1")));
        assert_eq!(game.board().piece_at(sq("c3")).map(|p| p.kind), Some(knight.kind));
    }

    #[test]
    fn black_pawn_moves_down_the_board() {
        let mut board = Board::empty();
        board.set(sq("a7"), piece(PieceKind::Pawn, Black));
        board.set(sq("h1"), piece(PieceKind::King, White));
        board.set(sq("h8"), piece(PieceKind::King, Black));
        let mut game = game_over(board);
        game.set_turn(Black);

        assert_eq!(
            game.make_play("a7", "a8"),
            Err(PlayError::IllegalDestination)
        );
        assert_eq!(
            game.make_play("a7", "a3"),
            Err(PlayError::IllegalDestination)
        );
        assert_eq!(game.make_play("a7", "a6"), Ok(sq("a6")));
        assert!(game.board().is_empty(sq("a7")));
    }

    #[test]
    fn rook_moves_along_open_rank_only() {
        let mut board = Board::empty();
        board.set(sq("c5"), piece(PieceKind::Rook, Black));
        board.set(sq("g5"), piece(PieceKind::Rook, White));
        board.set(sq("h1"), piece(PieceKind::King, White));
        board.set(sq("h8"), piece(PieceKind::King, Black));
        let mut game = game_over(board);
        game.set_turn(Black);

        assert_eq!(game.make_play("c5", "h5"), Err(PlayError::PathObstructed));
        assert_eq!(
            game.make_play("c5", "d4"),
            Err(PlayError::IllegalDestination)
        );
        assert_eq!(game.make_play("c5", "f5"), Ok(sq("f5")));
    }

    #[test]
    fn cannot_land_on_friendly_piece() {
        let mut board = Board::new();
        board.set(sq("a3"), piece(PieceKind::Rook, White));
        let mut game = game_over(board);
        assert_eq!(game.make_play("a3", "a2"), Err(PlayError::PathObstructed));
        assert_eq!(
            game.board().piece_at(sq("a2")).map(|p| p.kind),
            Some(PieceKind::Pawn)
        );
    }

    #[test]
    fn double_step_only_from_start_rank() {
        let mut game = Game::new("p1", "p2");
        assert_eq!(game.make_play("a2", "a4"), Ok(sq("a4")));

        game.set_turn(White);
        assert_eq!(
            game.make_play("a4", "a6"),
            Err(PlayError::IllegalDestination)
        );

        game.set_turn(Black);
        assert_eq!(game.make_play("a7", "a5"), Ok(sq("a5")));
        game.set_turn(Black);
        assert_eq!(
            game.make_play("a5", "a3"),
            Err(PlayError::IllegalDestination)
        );
    }

    #[test]
    fn rook_captures_enemy_pawn() {
        let mut board = Board::new();
        board.set(sq("a3"), piece(PieceKind::Rook, White));
        let mut game = game_over(board);

        game.make_play("a3", "a7").unwrap();
        assert_eq!(
            game.board().piece_at(sq("a7")),
            Some(Piece {
                kind: PieceKind::Rook,
                color: White,
                has_moved: true
            })
        );
    }

    #[test]
    fn pawn_cannot_capture_straight_ahead() {
        let mut board = Board::new();
        board.set(sq("a3"), piece(PieceKind::Pawn, Black));
        let mut game = game_over(board);
        assert_eq!(
            game.make_play("a2", "a3"),
            Err(PlayError::IllegalDestination)
        );
        assert_eq!(
            game.board().piece_at(sq("a3")),
            Some(piece(PieceKind::Pawn, Black))
        );
    }

    #[test]
    fn sliders_cannot_capture_through_blockers() {
        let mut board = Board::new();
        board.set(sq("a3"), piece(PieceKind::Rook, White));
        let mut game = game_over(board);
        // a7 pawn shields the rook on a8.
        assert_eq!(game.make_play("a3", "a8"), Err(PlayError::PathObstructed));
    }

    #[test]
    fn en_passant_capture_removes_the_double_moved_pawn() {
        let mut board = Board::empty();
        board.set(sq("a2"), piece(PieceKind::Pawn, White));
        board.set(sq("b4"), piece(PieceKind::Pawn, Black));
        board.set(sq("h1"), piece(PieceKind::King, White));
        board.set(sq("h8"), piece(PieceKind::King, Black));
        let mut game = game_over(board);

        game.make_play("a2", "a4").unwrap();
        let window = game.board().en_passant().unwrap();
        assert_eq!(window.capture, sq("a3"));
        assert_eq!(window.pawn, sq("a4"));

        game.make_play("b4", "a3").unwrap();
        assert_eq!(
            game.board().piece_at(sq("a3")).map(|p| (p.kind, p.color)),
            Some((PieceKind::Pawn, Black))
        );
        assert!(game.board().is_empty(sq("a4")));
        assert_eq!(game.board().en_passant(), None);
    }

    #[test]
    fn en_passant_window_closes_after_one_half_move() {
        let mut board = Board::empty();
        board.set(sq("a2"), piece(PieceKind::Pawn, White));
        board.set(sq("b4"), piece(PieceKind::Pawn, Black));
        board.set(sq("h7"), piece(PieceKind::Pawn, Black));
        board.set(sq("h1"), piece(PieceKind::King, White));
        board.set(sq("h8"), piece(PieceKind::King, Black));
        let mut game = game_over(board);

        game.make_play("a2", "a4").unwrap();
        game.make_play("h7", "h6").unwrap();
        assert_eq!(game.board().en_passant(), None);

        game.make_play("h1", "g1").unwrap();
        assert_eq!(
            game.make_play("b4", "a3"),
            Err(PlayError::IllegalDestination)
        );
    }

    #[test]
    fn pinned_piece_cannot_expose_its_king() {
        let mut board = Board::empty();
        board.set(sq("e1"), piece(PieceKind::King, White));
        board.set(sq("e2"), piece(PieceKind::Rook, White));
        board.set(sq("e8"), piece(PieceKind::Rook, Black));
        board.set(sq("a8"), piece(PieceKind::King, Black));
        let mut game = game_over(board);
        let before = *game.board();

        assert_eq!(
            game.make_play("e2", "d2"),
            Err(PlayError::SelfCheckViolation)
        );
        assert_eq!(*game.board(), before);

        // Sliding along the pin line is fine.
        assert_eq!(game.make_play("e2", "e5"), Ok(sq("e5")));
    }

    #[test]
    fn king_cannot_step_into_attack() {
        let mut board = Board::empty();
        board.set(sq("e1"), piece(PieceKind::King, White));
        board.set(sq("a2"), piece(PieceKind::Rook, Black));
        board.set(sq("h8"), piece(PieceKind::King, Black));
        let mut game = game_over(board);

        assert_eq!(
            game.make_play("e1", "e2"),
            Err(PlayError::SelfCheckViolation)
        );
        assert_eq!(game.make_play("e1", "f1"), Ok(sq("f1")));
    }

    #[test]
    fn check_detected_along_open_file() {
        let mut board = Board::empty();
        board.set(sq("e5"), piece(PieceKind::King, White));
        board.set(sq("e3"), piece(PieceKind::Rook, Black));
        board.set(sq("a8"), piece(PieceKind::King, Black));
        let game = game_over(board);

        assert!(game.player_in_check(White));
        assert!(game.is_check());
        assert_eq!(game.status(), GameStatus::Check);

        // Retreating along the attack line is no escape: the square
        // behind the king stays attacked through it.
        let safe = game.king_safe_squares(White);
        assert!(!safe.contains(&sq("e4")));
        assert!(!safe.contains(&sq("e6")));
        assert!(safe.contains(&sq("d4")));
        assert!(safe.contains(&sq("f6")));
    }

    #[test]
    fn cornered_king_with_covering_attackers_is_mated() {
        let mut board = Board::empty();
        board.set(sq("e5"), piece(PieceKind::King, White));
        board.set(sq("d6"), piece(PieceKind::Rook, Black));
        board.set(sq("f4"), piece(PieceKind::Rook, Black));
        board.set(sq("d4"), piece(PieceKind::Queen, Black));
        board.set(sq("a8"), piece(PieceKind::King, Black));
        let game = game_over(board);

        assert!(game.player_in_check(White));
        assert!(game.is_checkmate(White));
        assert_eq!(game.status(), GameStatus::Checkmate);
    }

    #[test]
    fn removing_the_checking_queen_lifts_the_mate() {
        let mut board = Board::empty();
        board.set(sq("e5"), piece(PieceKind::King, White));
        board.set(sq("d6"), piece(PieceKind::Rook, Black));
        board.set(sq("f4"), piece(PieceKind::Rook, Black));
        board.set(sq("a8"), piece(PieceKind::King, Black));
        let game = game_over(board);

        assert!(!game.player_in_check(White));
        assert!(!game.is_checkmate(White));
    }

    #[test]
    fn back_rank_check_defendable_by_capture_is_not_mate() {
        let mut board = Board::empty();
        board.set(sq("g1"), piece(PieceKind::King, White));
        for cell in ["f2", "g2", "h2"] {
            board.set(sq(cell), piece(PieceKind::Pawn, White));
        }
        board.set(sq("d1"), piece(PieceKind::Rook, Black));
        board.set(sq("d7"), piece(PieceKind::Rook, White));
        board.set(sq("a8"), piece(PieceKind::King, Black));
        let game = game_over(board);

        assert!(game.player_in_check(White));
        // The white rook can capture the attacker down the d-file.
        assert!(!game.is_checkmate(White));
    }

    #[test]
    fn back_rank_check_without_a_defender_is_mate() {
        let mut board = Board::empty();
        board.set(sq("g1"), piece(PieceKind::King, White));
        for cell in ["f2", "g2", "h2"] {
            board.set(sq(cell), piece(PieceKind::Pawn, White));
        }
        board.set(sq("d1"), piece(PieceKind::Rook, Black));
        board.set(sq("a8"), piece(PieceKind::King, Black));
        let game = game_over(board);

        assert!(game.is_checkmate(White));
    }

    #[test]
    fn interposing_defender_also_lifts_the_mate() {
        let mut board = Board::empty();
        board.set(sq("g1"), piece(PieceKind::King, White));
        for cell in ["f2", "g2", "h2"] {
            board.set(sq(cell), piece(PieceKind::Pawn, White));
        }
        board.set(sq("d1"), piece(PieceKind::Rook, Black));
        // The knight cannot capture d1 but can block on f1.
        board.set(sq("d2"), piece(PieceKind::Knight, White));
        board.set(sq("a8"), piece(PieceKind::King, Black));
        let game = game_over(board);

        assert!(game.player_in_check(White));
        assert!(!game.is_checkmate(White));
    }

    #[test]
    fn double_check_cannot_be_defended() {
        let mut board = Board::empty();
        board.set(sq("e1"), piece(PieceKind::King, White));
        board.set(sq("e8"), piece(PieceKind::Rook, Black));
        board.set(sq("f8"), piece(PieceKind::Rook, Black));
        board.set(sq("d3"), piece(PieceKind::Knight, Black));
        board.set(sq("d2"), piece(PieceKind::Queen, Black));
        board.set(sq("c3"), piece(PieceKind::Bishop, Black));
        board.set(sq("a5"), piece(PieceKind::King, Black));
        // The white queen could capture one attacker, but never both.
        board.set(sq("h8"), piece(PieceKind::Queen, White));
        let game = game_over(board);

        assert!(game.player_in_check(White));
        assert!(game.is_checkmate(White));
    }

    #[test]
    fn lone_cornered_king_is_stalemated() {
        let mut board = Board::empty();
        board.set(sq("h8"), piece(PieceKind::King, Black));
        board.set(sq("f7"), piece(PieceKind::Queen, White));
        board.set(sq("g6"), piece(PieceKind::King, White));
        let game = game_over(board);

        assert!(!game.player_in_check(Black));
        assert!(game.is_stalemate(Black));
        assert!(!game.is_checkmate(Black));

        let mut with_bishop = *game.board();
        with_bishop.set(sq("f4"), piece(PieceKind::Bishop, Black));
        let game = game_over(with_bishop);
        assert!(!game.is_stalemate(Black));
    }

    #[test]
    fn stalemate_status_for_player_to_move() {
        let mut board = Board::empty();
        board.set(sq("h8"), piece(PieceKind::King, Black));
        board.set(sq("f7"), piece(PieceKind::Queen, White));
        board.set(sq("g6"), piece(PieceKind::King, White));
        let mut game = game_over(board);
        game.set_turn(Black);
        assert_eq!(game.status(), GameStatus::Stalemate);
    }

    #[test]
    fn kingside_castle_relocates_both_pieces() {
        let mut board = Board::empty();
        board.set(sq("e1"), piece(PieceKind::King, White));
        board.set(sq("h1"), piece(PieceKind::Rook, White));
        board.set(sq("e8"), piece(PieceKind::King, Black));
        let mut game = game_over(board);

        assert_eq!(game.make_play("e1", "g1"), Ok(sq("g1")));
        assert_eq!(
            game.board().piece_at(sq("g1")).map(|p| p.kind),
            Some(PieceKind::King)
        );
        assert_eq!(
            game.board().piece_at(sq("f1")).map(|p| p.kind),
            Some(PieceKind::Rook)
        );
        assert!(game.board().is_empty(sq("e1")));
        assert!(game.board().is_empty(sq("h1")));
        assert!(game.board().piece_at(sq("g1")).unwrap().has_moved);
        assert!(game.board().piece_at(sq("f1")).unwrap().has_moved);
        assert_eq!(game.turn(), Black);
    }

    #[test]
    fn queenside_castle_relocates_both_pieces() {
        let mut board = Board::empty();
        board.set(sq("e8"), piece(PieceKind::King, Black));
        board.set(sq("a8"), piece(PieceKind::Rook, Black));
        board.set(sq("e1"), piece(PieceKind::King, White));
        let mut game = game_over(board);
        game.set_turn(Black);

        assert_eq!(game.make_play("e8", "c8"), Ok(sq("c8")));
        assert_eq!(
            game.board().piece_at(sq("c8")).map(|p| p.kind),
            Some(PieceKind::King)
        );
        assert_eq!(
            game.board().piece_at(sq("d8")).map(|p| p.kind),
            Some(PieceKind::Rook)
        );
    }

    #[test]
    fn castle_rejected_after_either_piece_moved() {
        let mut board = Board::empty();
        board.set(sq("e1"), piece(PieceKind::King, White));
        let mut rook = piece(PieceKind::Rook, White);
        rook.has_moved = true;
        board.set(sq("h1"), rook);
        board.set(sq("e8"), piece(PieceKind::King, Black));
        let mut game = game_over(board);
        assert_eq!(game.make_play("e1", "g1"), Err(PlayError::CastleIllegal));

        let mut board = Board::empty();
        let mut king = piece(PieceKind::King, White);
        king.has_moved = true;
        board.set(sq("e1"), king);
        board.set(sq("h1"), piece(PieceKind::Rook, White));
        board.set(sq("e8"), piece(PieceKind::King, Black));
        let mut game = game_over(board);
        assert_eq!(game.make_play("e1", "g1"), Err(PlayError::CastleIllegal));
    }

    #[test]
    fn castle_rejected_when_blocked_or_unsafe() {
        // A piece between king and rook.
        let mut board = Board::empty();
        board.set(sq("e1"), piece(PieceKind::King, White));
        board.set(sq("a1"), piece(PieceKind::Rook, White));
        board.set(sq("b1"), piece(PieceKind::Knight, White));
        board.set(sq("e8"), piece(PieceKind::King, Black));
        let mut game = game_over(board);
        assert_eq!(game.make_play("e1", "c1"), Err(PlayError::CastleIllegal));

        // King currently in check.
        let mut board = Board::empty();
        board.set(sq("e1"), piece(PieceKind::King, White));
        board.set(sq("h1"), piece(PieceKind::Rook, White));
        board.set(sq("e7"), piece(PieceKind::Rook, Black));
        board.set(sq("a8"), piece(PieceKind::King, Black));
        let mut game = game_over(board);
        assert_eq!(game.make_play("e1", "g1"), Err(PlayError::CastleIllegal));

        // A traversal square is attacked.
        let mut board = Board::empty();
        board.set(sq("e1"), piece(PieceKind::King, White));
        board.set(sq("h1"), piece(PieceKind::Rook, White));
        board.set(sq("f8"), piece(PieceKind::Rook, Black));
        board.set(sq("a8"), piece(PieceKind::King, Black));
        let mut game = game_over(board);
        assert_eq!(game.make_play("e1", "g1"), Err(PlayError::CastleIllegal));
    }

    #[test]
    fn queenside_castle_ignores_attacks_outside_king_traversal() {
        // b1 is attacked, but the king only crosses d1 and c1.
        let mut board = Board::empty();
        board.set(sq("e1"), piece(PieceKind::King, White));
        board.set(sq("a1"), piece(PieceKind::Rook, White));
        board.set(sq("b8"), piece(PieceKind::Rook, Black));
        board.set(sq("h8"), piece(PieceKind::King, Black));
        let mut game = game_over(board);
        assert_eq!(game.make_play("e1", "c1"), Ok(sq("c1")));
    }

    #[test]
    fn promotion_holds_the_turn_until_resolved() {
        let mut board = Board::empty();
        let mut pawn = piece(PieceKind::Pawn, White);
        pawn.has_moved = true;
        board.set(sq("a7"), pawn);
        board.set(sq("h1"), piece(PieceKind::King, White));
        board.set(sq("h8"), piece(PieceKind::King, Black));
        let mut game = game_over(board);

        assert_eq!(game.make_play("a7", "a8"), Ok(sq("a8")));
        assert_eq!(game.pending_promotion(), Some(sq("a8")));
        assert_eq!(game.turn(), White);

        assert_eq!(
            game.make_play("h1", "g1"),
            Err(PlayError::PromotionPending)
        );
        assert_eq!(
            game.promote(PieceKind::King),
            Err(PlayError::PromotionInvalid)
        );
        assert_eq!(
            game.promote(PieceKind::Pawn),
            Err(PlayError::PromotionInvalid)
        );

        assert_eq!(game.promote(PieceKind::Queen), Ok(sq("a8")));
        assert_eq!(
            game.board().piece_at(sq("a8")),
            Some(Piece {
                kind: PieceKind::Queen,
                color: White,
                has_moved: true
            })
        );
        assert_eq!(game.pending_promotion(), None);
        assert_eq!(game.turn(), Black);
    }

    #[test]
    fn promotion_by_capture() {
        let mut board = Board::empty();
        let mut pawn = piece(PieceKind::Pawn, White);
        pawn.has_moved = true;
        board.set(sq("b7"), pawn);
        board.set(sq("a8"), piece(PieceKind::Rook, Black));
        board.set(sq("h1"), piece(PieceKind::King, White));
        board.set(sq("h8"), piece(PieceKind::King, Black));
        let mut game = game_over(board);

        assert_eq!(game.make_play("b7", "a8"), Ok(sq("a8")));
        assert_eq!(game.promote(PieceKind::Knight), Ok(sq("a8")));
        assert_eq!(
            game.board().piece_at(sq("a8")).map(|p| (p.kind, p.color)),
            Some((PieceKind::Knight, White))
        );
    }

    #[test]
    fn promote_without_pending_promotion_is_rejected() {
        let mut game = Game::new("p1", "p2");
        assert_eq!(
            game.promote(PieceKind::Queen),
            Err(PlayError::PromotionInvalid)
        );
    }

    #[test]
    fn fools_mate_ends_the_game() {
        let mut game = Game::new("p1", "p2");
        game.make_play("f2", "f3").unwrap();
        game.make_play("e7", "e5").unwrap();
        game.make_play("g2", "g4").unwrap();
        game.make_play("d8", "h4").unwrap();

        assert_eq!(game.turn(), White);
        assert!(game.is_check());
        assert!(game.is_checkmate(White));
        assert_eq!(game.status(), GameStatus::Checkmate);
    }

    #[test]
    fn fresh_game_is_in_progress() {
        let game = Game::new("p1", "p2");
        assert_eq!(game.status(), GameStatus::InProgress);
        assert_eq!(game.current_player().name(), "p1");
        assert_eq!(game.player(Black).name(), "p2");
    }
}
