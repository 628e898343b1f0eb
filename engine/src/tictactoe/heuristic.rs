use super::board::{Board, Line, LineSet};
use super::types::Player;

const LIVE_LINE_WEIGHT: i32 = 2;

/// Live-line totals: `maximizer` grows with X's open lines, `minimizer` shrinks with O's.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LineScores {
    pub maximizer: i32,
    pub minimizer: i32,
}

impl LineScores {
    /// The half of the pair reported at a depth cutoff when `mover` is on turn.
    pub fn for_mover(&self, mover: Player) -> i32 {
        match mover {
            Player::X => self.maximizer,
            Player::O => self.minimizer,
        }
    }
}

impl std::ops::Add for LineScores {
    type Output = LineScores;

    fn add(self, other: LineScores) -> LineScores {
        LineScores {
            maximizer: self.maximizer + other.maximizer,
            minimizer: self.minimizer + other.minimizer,
        }
    }
}

pub fn score_lines<I>(line_sets: I) -> LineScores
where
    I: IntoIterator<Item = LineSet>,
{
    let mut scores = LineScores::default();
    for set in line_sets {
        match set.live_player() {
            Some(Player::X) => scores.maximizer += LIVE_LINE_WEIGHT,
            Some(Player::O) => scores.minimizer -= LIVE_LINE_WEIGHT,
            None => {}
        }
    }
    scores
}

/// Rows and columns plus both diagonals.
pub fn evaluate(board: &Board) -> LineScores {
    let size = board.size();
    let straight = score_lines(
        (0..size).flat_map(|i| [board.line_set(Line::Row(i)), board.line_set(Line::Column(i))]),
    );
    let diagonal = score_lines([
        board.line_set(Line::Diagonal),
        board.line_set(Line::AntiDiagonal),
    ]);
    straight + diagonal
}
