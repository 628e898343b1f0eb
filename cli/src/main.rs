mod args;
mod game_runner;
mod human_input;

use std::io;

use clap::Parser;
use tictactoe_engine::config::{ConfigManager, GameConfig, Validate};
use tictactoe_engine::{SessionRng, log, logger};

use args::Args;
use game_runner::GameRunner;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("TicTacToe".to_string())
    } else {
        None
    };
    logger::init_logger(prefix, args.verbose);

    let config_manager: ConfigManager<GameConfig> = ConfigManager::from_yaml_file(&args.config);
    let config = args.apply_overrides(config_manager.get_config()?);
    config.validate()?;

    if args.write_config {
        config_manager.set_config(&config)?;
        log!("Config written to {}", args.config.display());
    }

    let rng = match config.seed {
        Some(seed) => SessionRng::new(seed),
        None => SessionRng::from_random(),
    };

    let stdin = io::stdin();
    let mut runner = GameRunner::new(config, rng, stdin.lock(), io::stdout());
    runner.run()?;

    Ok(())
}
