mod board;
mod bot_controller;
mod game_state;
mod heuristic;
mod move_selector;
mod search;
mod types;
mod win_detector;

pub use board::{Board, Line, LineSet, MarkGuard};
pub use bot_controller::{
    BotInput, SearchReport, calculate_move, calculate_random_move, find_next_move,
    uses_opening_shortcut,
};
pub use game_state::{GameState, validate_board_size};
pub use heuristic::{LineScores, evaluate};
pub use move_selector::{best_candidates, select_best_move};
pub use search::{
    DRAW_SCORE, ScoredMove, SearchLimits, SearchScore, SearchSettings, Searcher, WIN_SCORE,
    depth_limit,
};
pub use types::{
    BotType, FirstPlayerMode, GameStatus, MAX_BOARD_SIZE, MIN_BOARD_SIZE, Mark, Player, Position,
    WinningLine,
};
pub use win_detector::{
    count_blocked_lines, early_draw_threshold, find_winning_line, has_line_win,
    has_win_through_cell, is_win_still_possible, min_turns_for_win,
};
