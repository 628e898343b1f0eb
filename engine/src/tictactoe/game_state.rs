use crate::session_rng::SessionRng;
use super::board::Board;
use super::search::{SearchLimits, SearchSettings, depth_limit};
use super::types::{
    FirstPlayerMode, GameStatus, MAX_BOARD_SIZE, MIN_BOARD_SIZE, Player, Position, WinningLine,
};
use super::win_detector::{
    early_draw_threshold, find_winning_line, has_win_through_cell, is_win_still_possible,
};

pub fn validate_board_size(size: usize) -> Result<(), String> {
    if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&size) {
        return Err(format!(
            "Board size must be between {} and {}, got {}",
            MIN_BOARD_SIZE, MAX_BOARD_SIZE, size
        ));
    }
    Ok(())
}

#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    current_player: Player,
    turn_count: usize,
    status: GameStatus,
    last_move: Option<Position>,
    winning_line: Option<WinningLine>,
    depth_limit: usize,
}

impl GameState {
    pub fn new(
        size: usize,
        first_player_mode: FirstPlayerMode,
        rng: &mut SessionRng,
    ) -> Result<Self, String> {
        validate_board_size(size)?;

        let current_player = match first_player_mode {
            FirstPlayerMode::Random => {
                if rng.random_bool() {
                    Player::X
                } else {
                    Player::O
                }
            }
            FirstPlayerMode::X => Player::X,
            FirstPlayerMode::O => Player::O,
        };

        Ok(Self {
            board: Board::new(size),
            current_player,
            turn_count: 0,
            status: GameStatus::InProgress,
            last_move: None,
            winning_line: None,
            depth_limit: depth_limit(size),
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn size(&self) -> usize {
        self.board.size()
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn turn_count(&self) -> usize {
        self.turn_count
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn last_move(&self) -> Option<Position> {
        self.last_move
    }

    pub fn winning_line(&self) -> Option<WinningLine> {
        self.winning_line
    }

    pub fn winner(&self) -> Option<Player> {
        match self.status {
            GameStatus::XWon => Some(Player::X),
            GameStatus::OWon => Some(Player::O),
            GameStatus::InProgress | GameStatus::Draw => None,
        }
    }

    pub fn depth_limit(&self) -> usize {
        self.depth_limit
    }

    pub fn available_moves(&self) -> Vec<Position> {
        self.board.available_moves()
    }

    pub fn search_settings(&self, limits: SearchLimits) -> SearchSettings {
        SearchSettings {
            depth_limit: self.depth_limit,
            limits,
        }
    }

    pub fn place_mark(&mut self, pos: Position) -> Result<(), String> {
        if self.status.is_over() {
            return Err("Game is already over".to_string());
        }

        if !self.board.contains(pos) {
            return Err(format!("Position {} out of bounds", pos));
        }

        if !self.board.is_empty_at(pos) {
            return Err(format!("Cell {} is already marked", pos));
        }

        self.board.set(pos, self.current_player.mark());
        self.turn_count += 1;
        self.last_move = Some(pos);

        self.check_game_over(pos);

        if self.status == GameStatus::InProgress {
            self.current_player = self.current_player.opponent();
        }

        Ok(())
    }

    fn check_game_over(&mut self, pos: Position) {
        let mover = self.current_player;
        if has_win_through_cell(&self.board, pos, mover, self.turn_count) == Some(true) {
            self.status = GameStatus::won_by(mover);
            self.winning_line = find_winning_line(&self.board);
            return;
        }

        // Every line already holds both marks: nobody can win, no need to fill the board.
        if self.turn_count > early_draw_threshold(self.size()) && !is_win_still_possible(&self.board)
        {
            self.status = GameStatus::Draw;
        } else if !self.board.has_empty_cell() {
            self.status = GameStatus::Draw;
        }
    }
}
