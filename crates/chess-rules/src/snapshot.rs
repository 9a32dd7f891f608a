//! Versioned game snapshots.
//!
//! A [`GameSnapshot`] is an explicit document — plain strings and
//! booleans, serde-derived — rather than a reflection of the live
//! object graph. Encoding never fails; decoding validates everything
//! (format version, cell labels, piece and color names, one piece per
//! cell, one player per color) before a [`Game`] is rebuilt.

use crate::board::{Board, EnPassant};
use crate::game::{Game, Player};
use chess_core::{Color, Piece, PieceKind, Square};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The snapshot format produced by this version of the crate.
pub const FORMAT_VERSION: u32 = 1;

/// Errors produced while decoding a snapshot.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    #[error("unsupported snapshot version {0} (expected {FORMAT_VERSION})")]
    UnsupportedVersion(u32),

    #[error("invalid cell label '{0}'")]
    InvalidCell(String),

    #[error("unknown piece kind '{0}'")]
    UnknownPiece(String),

    #[error("unknown color '{0}'")]
    UnknownColor(String),

    #[error("cell '{0}' appears more than once")]
    DuplicateCell(String),

    #[error("expected one player per color")]
    InvalidPlayers,
}

/// One occupied cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellSnapshot {
    pub square: String,
    pub piece: String,
    pub color: String,
    pub has_moved: bool,
}

/// The en-passant window, if one is open.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnPassantSnapshot {
    pub capture: String,
    pub pawn: String,
}

/// One player identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub name: String,
    pub color: String,
}

/// A complete, self-contained game state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub version: u32,
    pub cells: Vec<CellSnapshot>,
    pub en_passant: Option<EnPassantSnapshot>,
    pub players: Vec<PlayerSnapshot>,
    pub current: String,
    pub pending_promotion: Option<String>,
}

fn parse_square(label: &str) -> Result<Square, SnapshotError> {
    Square::from_algebraic(label).ok_or_else(|| SnapshotError::InvalidCell(label.to_string()))
}

fn parse_color(name: &str) -> Result<Color, SnapshotError> {
    Color::from_name(name).ok_or_else(|| SnapshotError::UnknownColor(name.to_string()))
}

impl Game {
    /// Encodes the full game state into a snapshot document.
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            version: FORMAT_VERSION,
            cells: self
                .board
                .occupied()
                .map(|(square, piece)| CellSnapshot {
                    square: square.to_algebraic(),
                    piece: piece.kind.name().to_string(),
                    color: piece.color.name().to_string(),
                    has_moved: piece.has_moved,
                })
                .collect(),
            en_passant: self.board.en_passant().map(|window| EnPassantSnapshot {
                capture: window.capture.to_algebraic(),
                pawn: window.pawn.to_algebraic(),
            }),
            players: [Color::White, Color::Black]
                .into_iter()
                .map(|color| PlayerSnapshot {
                    name: self.player(color).name().to_string(),
                    color: color.name().to_string(),
                })
                .collect(),
            current: self.current.name().to_string(),
            pending_promotion: self.pending_promotion.map(|sq| sq.to_algebraic()),
        }
    }

    /// Decodes a snapshot back into an equivalent game.
    pub fn from_snapshot(snapshot: &GameSnapshot) -> Result<Game, SnapshotError> {
        if snapshot.version != FORMAT_VERSION {
            return Err(SnapshotError::UnsupportedVersion(snapshot.version));
        }

        let mut board = Board::empty();
        for cell in &snapshot.cells {
            let square = parse_square(&cell.square)?;
            let kind = PieceKind::from_name(&cell.piece)
                .ok_or_else(|| SnapshotError::UnknownPiece(cell.piece.clone()))?;
            let color = parse_color(&cell.color)?;
            if !board.is_empty(square) {
                return Err(SnapshotError::DuplicateCell(cell.square.clone()));
            }
            board.set(
                square,
                Piece {
                    kind,
                    color,
                    has_moved: cell.has_moved,
                },
            );
        }
        if let Some(window) = &snapshot.en_passant {
            board.set_en_passant(EnPassant {
                capture: parse_square(&window.capture)?,
                pawn: parse_square(&window.pawn)?,
            });
        }

        let [a, b] = snapshot.players.as_slice() else {
            return Err(SnapshotError::InvalidPlayers);
        };
        let first = Player::new(a.name.clone(), parse_color(&a.color)?);
        let second = Player::new(b.name.clone(), parse_color(&b.color)?);
        if first.color() == second.color() {
            return Err(SnapshotError::InvalidPlayers);
        }

        let mut game = Game::with_board(board, first, second);
        game.current = parse_color(&snapshot.current)?;
        game.pending_promotion = snapshot
            .pending_promotion
            .as_deref()
            .map(parse_square)
            .transpose()?;
        Ok(game)
    }
}
