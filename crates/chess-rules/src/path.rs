//! Straight-line and diagonal path building.

use chess_core::Square;

/// Returns the aligned path from `from` to `to`: every square after
/// `from`, in order, through `to` inclusive. Returns `None` when the two
/// squares do not share a rank, file, or diagonal (or are equal).
pub fn move_path(from: Square, to: Square) -> Option<Vec<Square>> {
    let (fr, fc) = from.coordinate();
    let (tr, tc) = to.coordinate();
    let drow = tr as i8 - fr as i8;
    let dcol = tc as i8 - fc as i8;
    if (drow == 0 && dcol == 0) || (drow != 0 && dcol != 0 && drow.abs() != dcol.abs()) {
        return None;
    }

    let step = (drow.signum(), dcol.signum());
    let mut path = Vec::with_capacity(drow.abs().max(dcol.abs()) as usize);
    let mut current = from;
    while current != to {
        // Stays on the board: `to` is reached before either edge.
        current = match current.offset(step.0, step.1) {
            Some(next) => next,
            None => unreachable!(),
        };
        path.push(current);
    }
    Some(path)
}

/// Returns the squares strictly between two aligned squares, or `None`
/// when they are not aligned.
pub fn squares_between(from: Square, to: Square) -> Option<Vec<Square>> {
    let mut path = move_path(from, to)?;
    path.pop();
    Some(path)
}
