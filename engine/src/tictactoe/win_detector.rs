use super::board::{Board, Line};
use super::types::{Player, Position, WinningLine};

/// Full-board scan: true when any row, column or diagonal holds a single player's mark.
pub fn has_line_win(board: &Board) -> bool {
    board.line_sets().any(|set| set.sole_player().is_some())
}

pub fn find_winning_line(board: &Board) -> Option<WinningLine> {
    let size = board.size();
    Line::all(size).find_map(|line| {
        let player = board.line_set(line).sole_player()?;
        let (start, end) = line.end_points(size);
        Some(WinningLine::new(player, start, end))
    })
}

/// Fewest plies after which any line can be complete.
pub fn min_turns_for_win(size: usize) -> usize {
    2 * size - 1
}

/// Checks only the lines through the just-played cell.
///
/// Returns `None` while `turn_count` is too small for any line to be complete, otherwise
/// whether one of those lines is filled entirely by `mover`.
pub fn has_win_through_cell(
    board: &Board,
    pos: Position,
    mover: Player,
    turn_count: usize,
) -> Option<bool> {
    let size = board.size();
    if turn_count < min_turns_for_win(size) {
        return None;
    }

    let won = Line::through(pos, size)
        .into_iter()
        .any(|line| board.line_set(line).sole_player() == Some(mover));
    Some(won)
}

pub fn count_blocked_lines(board: &Board) -> usize {
    board.line_sets().filter(|set| set.is_blocked()).count()
}

/// False once every line holds both marks: no one can win any more.
pub fn is_win_still_possible(board: &Board) -> bool {
    count_blocked_lines(board) < Line::count(board.size())
}

/// Turn count after which the collaborator starts asking [`is_win_still_possible`].
pub fn early_draw_threshold(size: usize) -> usize {
    Line::count(size)
}
