use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tictactoe_engine::config::{GameConfig, PlayerKind};
use tictactoe_engine::tictactoe::{BotType, FirstPlayerMode};

const DEFAULT_CONFIG_FILE: &str = "tictactoe_config.yaml";

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum PlayerArg {
    Human,
    Random,
    Minimax,
}

impl From<PlayerArg> for PlayerKind {
    fn from(arg: PlayerArg) -> Self {
        match arg {
            PlayerArg::Human => PlayerKind::Human,
            PlayerArg::Random => PlayerKind::Computer(BotType::Random),
            PlayerArg::Minimax => PlayerKind::Computer(BotType::Minimax),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum FirstArg {
    Random,
    X,
    O,
}

impl From<FirstArg> for FirstPlayerMode {
    fn from(arg: FirstArg) -> Self {
        match arg {
            FirstArg::Random => FirstPlayerMode::Random,
            FirstArg::X => FirstPlayerMode::X,
            FirstArg::O => FirstPlayerMode::O,
        }
    }
}

/// Flags override the values loaded from the config file.
#[derive(Parser, Debug)]
#[command(name = "tictactoe", about = "N×N tic-tac-toe against a minimax engine")]
pub struct Args {
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Board side length, 3 to 10.
    #[arg(long)]
    pub size: Option<usize>,

    #[arg(long, value_enum)]
    pub x: Option<PlayerArg>,

    #[arg(long, value_enum)]
    pub o: Option<PlayerArg>,

    #[arg(long, value_enum)]
    pub first: Option<FirstArg>,

    #[arg(long)]
    pub seed: Option<u64>,

    /// Nodes the engine may visit per move before it falls back to the heuristic.
    #[arg(long)]
    pub max_nodes: Option<u64>,

    #[arg(long)]
    pub time_limit_ms: Option<u64>,

    /// Log per-move search details.
    #[arg(long)]
    pub verbose: bool,

    #[arg(long)]
    pub use_log_prefix: bool,

    /// Save the effective settings back to the config file.
    #[arg(long)]
    pub write_config: bool,
}

impl Args {
    pub fn apply_overrides(&self, mut config: GameConfig) -> GameConfig {
        if let Some(size) = self.size {
            config.board_size = size;
        }
        if let Some(x) = self.x {
            config.player_x = x.into();
        }
        if let Some(o) = self.o {
            config.player_o = o.into();
        }
        if let Some(first) = self.first {
            config.first_player = first.into();
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if self.max_nodes.is_some() {
            config.search.max_nodes = self.max_nodes;
        }
        if self.time_limit_ms.is_some() {
            config.search.time_limit_ms = self.time_limit_ms;
        }
        config
    }
}
