use std::io::{BufRead, Write};

use tictactoe_engine::config::{GameConfig, PlayerKind};
use tictactoe_engine::tictactoe::{
    BotInput, BotType, GameState, GameStatus, Position, SearchLimits, calculate_random_move,
    find_next_move,
};
use tictactoe_engine::{SessionRng, log};

use crate::human_input::parse_position;

fn io_error(e: std::io::Error) -> String {
    format!("Console I/O failed: {}", e)
}

/// Plays one game on a text console. Human turns are read from `input`, everything the
/// players should see goes to `output`, and diagnostics go through the logger.
pub struct GameRunner<R, W> {
    config: GameConfig,
    limits: SearchLimits,
    rng: SessionRng,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> GameRunner<R, W> {
    pub fn new(config: GameConfig, rng: SessionRng, input: R, output: W) -> Self {
        let limits = config.search_limits();
        Self {
            config,
            limits,
            rng,
            input,
            output,
        }
    }

    pub fn run(&mut self) -> Result<GameStatus, String> {
        let mut state =
            GameState::new(self.config.board_size, self.config.first_player, &mut self.rng)?;
        log!(
            "New {0}x{0} game: X is {1:?}, O is {2:?}, {3} moves first, seed {4}",
            state.size(),
            self.config.player_x,
            self.config.player_o,
            state.current_player(),
            self.rng.seed()
        );
        self.print_board(&state)?;

        while !state.status().is_over() {
            let mover = state.current_player();
            let pos = match self.config.player_kind(mover) {
                PlayerKind::Human => self.read_human_move(&state)?,
                PlayerKind::Computer(bot_type) => self.computer_move(&state, bot_type)?,
            };
            state.place_mark(pos)?;
            writeln!(self.output, "{} plays {}", mover, pos).map_err(io_error)?;
            self.print_board(&state)?;
        }

        self.announce_result(&state)?;
        Ok(state.status())
    }

    fn print_board(&mut self, state: &GameState) -> Result<(), String> {
        write!(self.output, "{}", state.board().render()).map_err(io_error)
    }

    fn computer_move(&mut self, state: &GameState, bot_type: BotType) -> Result<Position, String> {
        let mover = state.current_player();
        match bot_type {
            BotType::Random => calculate_random_move(state.board(), &mut self.rng)
                .ok_or_else(|| "Random bot found no empty cell".to_string()),
            BotType::Minimax => {
                let input = BotInput::from_game_state(state, self.limits);
                let report = find_next_move(input, &mut self.rng)
                    .ok_or_else(|| "Engine found no empty cell".to_string())?;

                if report.opening_shortcut {
                    log!("{} opens at random with {}", mover, report.chosen);
                } else if report.budget_exhausted {
                    match report.completed_depth {
                        Some(depth) => log!(
                            "{} chose {} after {} nodes, budget exhausted after depth {}",
                            mover,
                            report.chosen,
                            report.nodes,
                            depth
                        ),
                        None => log!(
                            "{} chose {} after {} nodes, budget exhausted before any pass finished",
                            mover,
                            report.chosen,
                            report.nodes
                        ),
                    }
                } else {
                    log!("{} chose {} after {} nodes", mover, report.chosen, report.nodes);
                }
                Ok(report.chosen)
            }
        }
    }

    fn read_human_move(&mut self, state: &GameState) -> Result<Position, String> {
        loop {
            write!(self.output, "{} to move (row col): ", state.current_player())
                .map_err(io_error)?;
            self.output.flush().map_err(io_error)?;

            let mut line = String::new();
            if self.input.read_line(&mut line).map_err(io_error)? == 0 {
                return Err("Input closed before the game ended".to_string());
            }

            let written = match parse_position(&line, state.size()) {
                Ok(pos) if state.board().is_empty_at(pos) => return Ok(pos),
                Ok(pos) => writeln!(self.output, "Cell {} is already taken", pos),
                Err(e) => writeln!(self.output, "{}", e),
            };
            written.map_err(io_error)?;
        }
    }

    fn announce_result(&mut self, state: &GameState) -> Result<(), String> {
        let message = match (state.winner(), state.winning_line()) {
            (Some(winner), Some(line)) => {
                format!("{} wins along {} - {}", winner, line.start, line.end)
            }
            (Some(winner), None) => format!("{} wins", winner),
            (None, _) if state.board().has_empty_cell() => format!(
                "Draw after {} moves: no line can be completed any more",
                state.turn_count()
            ),
            (None, _) => format!("Draw after {} moves", state.turn_count()),
        };
        log!("{}", message);
        writeln!(self.output, "{}", message).map_err(io_error)
    }
}
