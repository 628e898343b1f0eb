use crate::debug_log;
use crate::session_rng::SessionRng;
use super::board::Board;
use super::game_state::GameState;
use super::move_selector::select_best_move;
use super::search::{ScoredMove, SearchLimits, SearchSettings, Searcher};
use super::types::{BotType, Player, Position};

pub struct BotInput {
    pub board: Board,
    pub mover: Player,
    pub turn_count: usize,
    pub settings: SearchSettings,
}

impl BotInput {
    pub fn from_game_state(state: &GameState, limits: SearchLimits) -> Self {
        Self {
            board: state.board().clone(),
            mover: state.current_player(),
            turn_count: state.turn_count(),
            settings: state.search_settings(limits),
        }
    }
}

/// Outcome of one move decision, kept for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchReport {
    pub chosen: Position,
    pub scored: Vec<ScoredMove>,
    pub nodes: u64,
    pub budget_exhausted: bool,
    /// Depth limit of the search pass the scores come from.
    pub completed_depth: Option<usize>,
    pub opening_shortcut: bool,
}

impl SearchReport {
    fn shortcut(chosen: Position) -> Self {
        Self {
            chosen,
            scored: Vec::new(),
            nodes: 0,
            budget_exhausted: false,
            completed_depth: None,
            opening_shortcut: true,
        }
    }
}

pub fn calculate_move(
    bot_type: BotType,
    input: BotInput,
    rng: &mut SessionRng,
) -> Option<Position> {
    match bot_type {
        BotType::Random => calculate_random_move(&input.board, rng),
        BotType::Minimax => find_next_move(input, rng).map(|report| report.chosen),
    }
}

pub fn calculate_random_move(board: &Board, rng: &mut SessionRng) -> Option<Position> {
    let available_moves = board.available_moves();
    rng.choose(&available_moves).copied()
}

/// Early positions are too open for the search to tell moves apart, so larger boards
/// play their first few moves at random.
pub fn uses_opening_shortcut(size: usize, turn_count: usize) -> bool {
    match size {
        4 => turn_count <= 3,
        size if size > 4 => turn_count <= size,
        _ => false,
    }
}

/// Chooses the mover's next move. `None` when the board has no empty cell.
pub fn find_next_move(input: BotInput, rng: &mut SessionRng) -> Option<SearchReport> {
    let BotInput {
        mut board,
        mover,
        turn_count,
        settings,
    } = input;

    if !board.has_empty_cell() {
        return None;
    }

    if uses_opening_shortcut(board.size(), turn_count) {
        return calculate_random_move(&board, rng).map(SearchReport::shortcut);
    }

    let mut searcher = Searcher::new(settings);
    let scored = searcher.score_moves(&mut board, mover);
    debug_log!(
        "{} to move, {} candidates, {} nodes, depth {:?}: {:?}",
        mover,
        scored.len(),
        searcher.nodes(),
        searcher.completed_depth(),
        scored
            .iter()
            .map(|m| (m.position.row, m.position.col, m.score))
            .collect::<Vec<_>>()
    );

    let chosen = select_best_move(&scored, mover, rng)?;
    Some(SearchReport {
        chosen,
        scored,
        nodes: searcher.nodes(),
        budget_exhausted: searcher.budget_exhausted(),
        completed_depth: searcher.completed_depth(),
        opening_shortcut: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use crate::config::GameConfig;
    use crate::tictactoe::move_selector::best_candidates;
    use crate::tictactoe::types::Mark;
    use crate::tictactoe::win_detector::find_winning_line;

    fn input(board: Board, mover: Player) -> BotInput {
        let turn_count = board.mark_count();
        let settings = SearchSettings::for_board_size(board.size());
        BotInput {
            board,
            mover,
            turn_count,
            settings,
        }
    }

    #[test]
    fn test_opening_shortcut_thresholds() {
        assert!(!uses_opening_shortcut(3, 0));
        assert!(uses_opening_shortcut(4, 3));
        assert!(!uses_opening_shortcut(4, 4));
        assert!(uses_opening_shortcut(5, 5));
        assert!(!uses_opening_shortcut(5, 6));
        assert!(uses_opening_shortcut(10, 10));
        assert!(!uses_opening_shortcut(10, 11));
    }

    #[test]
    fn test_opening_shortcut_skips_search() {
        let board = Board::from_rows(&["X....", ".O...", ".....", ".....", "....."]).unwrap();
        let mut rng = SessionRng::new(3);
        let report = find_next_move(input(board.clone(), Player::X), &mut rng).unwrap();
        assert!(report.opening_shortcut);
        assert_eq!(report.nodes, 0);
        assert!(report.scored.is_empty());
        assert!(board.is_empty_at(report.chosen));
    }

    #[test]
    fn test_full_board_has_no_move() {
        let board = Board::from_rows(&["XOX", "XOO", "OXX"]).unwrap();
        let mut rng = SessionRng::new(3);
        assert!(find_next_move(input(board.clone(), Player::X), &mut rng).is_none());
        assert!(calculate_move(BotType::Random, input(board, Player::X), &mut rng).is_none());
    }

    #[test]
    fn test_blocks_threat() {
        let board = Board::from_rows(&["XO.", ".X.", "..."]).unwrap();
        for seed in 0..5 {
            let mut rng = SessionRng::new(seed);
            let report = find_next_move(input(board.clone(), Player::O), &mut rng).unwrap();
            assert_eq!(report.chosen, Position::new(2, 2));
            assert!(!report.opening_shortcut);
            assert_eq!(report.scored.len(), 6);
        }
    }

    #[test]
    fn test_default_limits_search_small_boards_fully() {
        let config = GameConfig {
            board_size: 4,
            ..GameConfig::default()
        };
        let board = Board::from_rows(&["....", ".XOO", "XXO.", "..OX"]).unwrap();
        let mut bot_input = input(board, Player::X);
        bot_input.settings = bot_input.settings.with_limits(config.search_limits());

        let report = find_next_move(bot_input, &mut SessionRng::new(4)).unwrap();
        assert_eq!(report.chosen, Position::new(0, 2));
        assert!(!report.budget_exhausted);
        assert_eq!(report.completed_depth, Some(5));
        assert_eq!(report.nodes, 13_541);
    }

    #[test]
    fn test_random_bot_plays_empty_cells() {
        let board = Board::from_rows(&["XO.", "OX.", "X.O"]).unwrap();
        let mut rng = SessionRng::new(11);
        for _ in 0..20 {
            let pick = calculate_move(BotType::Random, input(board.clone(), Player::X), &mut rng)
                .unwrap();
            assert!(board.is_empty_at(pick));
        }
    }

    #[test]
    fn test_move_is_reproducible_under_seed() {
        let board = Board::new(3);
        let first = find_next_move(input(board.clone(), Player::X), &mut SessionRng::new(5));
        let second = find_next_move(input(board, Player::X), &mut SessionRng::new(5));
        assert_eq!(first, second);
    }

    /// Plays every opponent reply against every tie-break the engine could make.
    /// Returns the number of finished games the engine lost.
    fn count_losses(
        board: &mut Board,
        to_move: Player,
        engine: Player,
        memo: &mut HashMap<(Board, Player), Vec<Position>>,
    ) -> usize {
        if let Some(line) = find_winning_line(board) {
            return usize::from(line.player != engine);
        }
        if !board.has_empty_cell() {
            return 0;
        }

        let moves = if to_move == engine {
            let key = (board.clone(), to_move);
            if let Some(cached) = memo.get(&key) {
                cached.clone()
            } else {
                let mut searcher = Searcher::new(SearchSettings::for_board_size(3));
                let scored = searcher.score_moves(board, to_move);
                let candidates = best_candidates(&scored, to_move);
                memo.insert(key, candidates.clone());
                candidates
            }
        } else {
            board.available_moves()
        };

        moves
            .into_iter()
            .map(|pos| {
                let mut placed = board.place(pos, to_move.mark());
                count_losses(&mut placed, to_move.opponent(), engine, memo)
            })
            .sum()
    }

    #[test]
    fn test_engine_never_loses_as_x() {
        let mut memo = HashMap::new();
        let mut board = Board::new(3);
        assert_eq!(count_losses(&mut board, Player::X, Player::X, &mut memo), 0);
        assert_eq!(count_losses(&mut board, Player::O, Player::X, &mut memo), 0);
        assert_eq!(board, Board::new(3));
    }

    #[test]
    fn test_engine_never_loses_as_o() {
        let mut memo = HashMap::new();
        let mut board = Board::new(3);
        assert_eq!(count_losses(&mut board, Player::X, Player::O, &mut memo), 0);
        assert_eq!(count_losses(&mut board, Player::O, Player::O, &mut memo), 0);
    }

    #[test]
    fn test_winning_move_completes_line() {
        let board = Board::from_rows(&["XX.", "OO.", "..."]).unwrap();
        let mut rng = SessionRng::new(8);
        let report = find_next_move(input(board.clone(), Player::O), &mut rng).unwrap();
        assert_eq!(report.chosen, Position::new(1, 2));

        let mut after = board;
        after.set(report.chosen, Mark::O);
        assert_eq!(find_winning_line(&after).map(|line| line.player), Some(Player::O));
    }
}
