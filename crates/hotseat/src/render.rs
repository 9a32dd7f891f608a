//! Fixed-width text rendering of the board.

use chess_core::{File, Rank, Square};
use chess_rules::Board;

/// Renders the board as an 8x8 grid, rank 8 first, with file letters
/// above and below and rank digits on both sides. Occupied cells show
/// the piece glyph; empty cells are blank.
pub fn render(board: &Board) -> String {
    let mut out = String::new();
    out.push_str("  a b c d e f g h\n");
    for &rank in Rank::ALL.iter().rev() {
        out.push(rank.to_char());
        for file in File::ALL {
            out.push(' ');
            let cell = Square::new(file, rank);
            out.push(board.piece_at(cell).map_or(' ', |piece| piece.glyph()));
        }
        out.push(' ');
        out.push(rank.to_char());
        out.push('\n');
    }
    out.push_str("  a b c d e f g h\n");
    out
}
