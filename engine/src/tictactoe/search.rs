use std::time::{Duration, Instant};

use super::board::Board;
use super::heuristic::evaluate;
use super::types::{Player, Position};
use super::win_detector::has_line_win;

pub const WIN_SCORE: i32 = 10;
pub const DRAW_SCORE: i32 = 0;

/// How often the wall clock is consulted, in visited nodes.
const CLOCK_CHECK_INTERVAL: u64 = 1024;

/// Lookahead depth for an N×N board. Small boards are searched to the end; larger ones
/// get shallower lookahead to keep the branching factor tractable.
pub fn depth_limit(size: usize) -> usize {
    match size {
        0..=3 => 9,
        4..=7 => 9 - size,
        8 => 2,
        _ => 1,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchScore {
    pub score: i32,
    pub min_turns: usize,
}

impl SearchScore {
    pub fn new(score: i32, min_turns: usize) -> Self {
        Self { score, min_turns }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchLimits {
    pub max_nodes: Option<u64>,
    pub time_limit: Option<Duration>,
}

impl SearchLimits {
    pub fn unlimited() -> Self {
        Self::default()
    }

    pub fn is_unlimited(&self) -> bool {
        self.max_nodes.is_none() && self.time_limit.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchSettings {
    pub depth_limit: usize,
    pub limits: SearchLimits,
}

impl SearchSettings {
    pub fn for_board_size(size: usize) -> Self {
        Self {
            depth_limit: depth_limit(size),
            limits: SearchLimits::unlimited(),
        }
    }

    pub fn with_limits(mut self, limits: SearchLimits) -> Self {
        self.limits = limits;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoredMove {
    pub position: Position,
    pub score: i32,
}

/// Value of a position without looking further ahead, `mover` being on turn: the win
/// score when a line is complete, otherwise the mover's half of the heuristic.
fn static_value(board: &Board, mover: Player) -> i32 {
    if has_line_win(board) {
        win_score(mover)
    } else {
        evaluate(board).for_mover(mover)
    }
}

/// Score of a finished game where the player before `mover` completed a line.
fn win_score(mover: Player) -> i32 {
    match mover {
        Player::X => -WIN_SCORE,
        Player::O => WIN_SCORE,
    }
}

fn static_scores(board: &mut Board, mover: Player) -> Vec<ScoredMove> {
    board
        .available_moves()
        .into_iter()
        .map(|position| {
            let placed = board.place(position, mover.mark());
            ScoredMove {
                position,
                score: static_value(&placed, mover.opponent()),
            }
        })
        .collect()
}

/// One search over a board. Counts visited nodes and enforces the node/time budget;
/// once the budget runs out every further node is scored like a depth cutoff.
pub struct Searcher {
    settings: SearchSettings,
    pass_depth_limit: usize,
    nodes: u64,
    deadline: Option<Instant>,
    next_clock_check: u64,
    budget_exhausted: bool,
    completed_depth: Option<usize>,
}

impl Searcher {
    pub fn new(settings: SearchSettings) -> Self {
        Self {
            settings,
            pass_depth_limit: settings.depth_limit,
            nodes: 0,
            deadline: settings.limits.time_limit.map(|limit| Instant::now() + limit),
            next_clock_check: 0,
            budget_exhausted: false,
            completed_depth: None,
        }
    }

    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    pub fn budget_exhausted(&self) -> bool {
        self.budget_exhausted
    }

    /// Depth limit of the pass the last `score_moves` result came from. `None` when no
    /// pass finished and the candidates were scored statically.
    pub fn completed_depth(&self) -> Option<usize> {
        self.completed_depth
    }

    fn out_of_budget(&mut self) -> bool {
        if self.budget_exhausted {
            return true;
        }
        if let Some(max_nodes) = self.settings.limits.max_nodes
            && self.nodes > max_nodes
        {
            self.budget_exhausted = true;
        }
        if let Some(deadline) = self.deadline
            && self.nodes >= self.next_clock_check
        {
            self.next_clock_check = self.nodes + CLOCK_CHECK_INTERVAL;
            if Instant::now() >= deadline {
                self.budget_exhausted = true;
            }
        }
        self.budget_exhausted
    }

    /// Scores every empty cell as `mover`'s next move. The mark is placed, the opponent's
    /// reply is searched from depth 0 with an open window, and only the score is kept.
    ///
    /// Without limits this is a single pass at the full depth. Under a node or time budget
    /// the passes deepen one ply at a time starting from depth 0, and a pass the budget cuts
    /// short is dropped, so every candidate is scored by the same pass. When not even the
    /// first pass finishes, candidates get their static value.
    pub fn score_moves(&mut self, board: &mut Board, mover: Player) -> Vec<ScoredMove> {
        let full_depth = self.settings.depth_limit;
        let first_depth = if self.settings.limits.is_unlimited() {
            full_depth
        } else {
            0
        };

        self.completed_depth = None;
        let mut scored = None;
        for depth_limit in first_depth..=full_depth {
            match self.score_pass(board, mover, depth_limit) {
                Some(pass) => {
                    scored = Some(pass);
                    self.completed_depth = Some(depth_limit);
                }
                None => break,
            }
        }
        self.pass_depth_limit = full_depth;

        scored.unwrap_or_else(|| static_scores(board, mover))
    }

    fn score_pass(
        &mut self,
        board: &mut Board,
        mover: Player,
        depth_limit: usize,
    ) -> Option<Vec<ScoredMove>> {
        self.pass_depth_limit = depth_limit;
        let mut scored = Vec::new();
        for position in board.available_moves() {
            let result = {
                let mut placed = board.place(position, mover.mark());
                self.search(mover.opponent(), &mut placed, 0, i32::MIN, i32::MAX)
            };
            if self.budget_exhausted {
                return None;
            }
            scored.push(ScoredMove {
                position,
                score: result.score,
            });
        }
        Some(scored)
    }

    /// Minimax with alpha-beta pruning. `mover` is the player about to move on `board`.
    ///
    /// A node's value is its best child score shifted by the fewest turns to a terminal
    /// position among the explored children: subtracted for X, added for O, so quicker
    /// wins rank higher for both sides. The bound tightened by each child is that shifted
    /// value, which keeps `alpha`/`beta` in the same frame as the values nodes return.
    /// After a cutoff the value is aggregated over the children explored so far.
    pub fn search(
        &mut self,
        mover: Player,
        board: &mut Board,
        depth: usize,
        mut alpha: i32,
        mut beta: i32,
    ) -> SearchScore {
        self.nodes += 1;

        if has_line_win(board) {
            return SearchScore::new(win_score(mover), depth);
        }

        if depth > self.pass_depth_limit || self.out_of_budget() {
            return SearchScore::new(evaluate(board).for_mover(mover), depth);
        }

        if !board.has_empty_cell() {
            return SearchScore::new(DRAW_SCORE, depth);
        }

        let mut best = match mover {
            Player::X => i32::MIN,
            Player::O => i32::MAX,
        };
        let mut min_turns = usize::MAX;
        let mut value = best;

        for position in board.available_moves() {
            let child = {
                let mut placed = board.place(position, mover.mark());
                self.search(mover.opponent(), &mut placed, depth + 1, alpha, beta)
            };

            min_turns = min_turns.min(child.min_turns);
            match mover {
                Player::X => {
                    best = best.max(child.score);
                    value = best - min_turns as i32;
                    alpha = alpha.max(value);
                }
                Player::O => {
                    best = best.min(child.score);
                    value = best + min_turns as i32;
                    beta = beta.min(value);
                }
            }

            if beta <= alpha {
                break;
            }
        }

        SearchScore::new(value, min_turns)
    }
}
