use std::fs::File;
use std::path::PathBuf;
use std::process::exit;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, LevelFilter};
use simplelog::WriteLogger;

use snake::config::{Config, DEFAULT_HEIGHT, DEFAULT_TICK_MS, DEFAULT_WIDTH};
use snake::food::SeededPicker;
use snake::game::SnakeGame;
use snake::term::{self, TermManager};
use snake::TermInt;

/// Classic snake in the terminal. Arrow keys or WASD to steer, q to quit.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Grid rows, border included.
    #[arg(long, default_value_t = DEFAULT_HEIGHT)]
    height: TermInt,
    /// Grid columns, border included.
    #[arg(long, default_value_t = DEFAULT_WIDTH)]
    width: TermInt,
    /// Milliseconds between snake moves.
    #[arg(long = "tick-ms", value_name = "MS", default_value_t = DEFAULT_TICK_MS)]
    tick_ms: u64,
    /// Seed for food placement, to replay a game.
    #[arg(long)]
    seed: Option<u64>,
    /// Where to write the log [default: snake.log in the temp dir].
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
    /// Log at debug level.
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();

    if let Err(err) = init_logging(&args) {
        eprintln!("warning: {:#}", err);
    }

    let config = match Config::new(args.height, args.width, Duration::from_millis(args.tick_ms)) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("snake: {}", err);
            exit(1);
        }
    };

    // Checked before anything touches the screen
    let term = match TermManager::new() {
        Ok(term) => term,
        Err(err) => {
            eprintln!("snake: {}", err);
            eprintln!("{}", term::remediation_hint());
            exit(1);
        }
    };

    let picker = match args.seed {
        Some(seed) => SeededPicker::new(seed),
        None => SeededPicker::from_entropy(),
    };
    info!("starting with {:?}, seed {}", config, picker.seed());

    if let Err(err) = play(config, term, picker) {
        eprintln!("snake: {:#}", err);
        exit(1);
    }
}

fn play(config: Config, mut term: TermManager, picker: SeededPicker) -> Result<()> {
    term.setup().context("failed to prepare the terminal")?;

    let mut game = SnakeGame::new(config, term, picker);
    let result = game.run();

    // Always try to restore the terminal, even when the session failed
    let _ = game.terminal_mut().restore();

    let rounds = result?;
    let best = rounds.iter().map(|round| round.score).max().unwrap_or(0);
    info!("session over after {} round(s), best score {}", rounds.len(), best);
    Ok(())
}

fn init_logging(args: &Args) -> Result<()> {
    let path = args.log_file.clone().unwrap_or_else(|| std::env::temp_dir().join("snake.log"));
    let level = if args.verbose { LevelFilter::Debug } else { LevelFilter::Info };

    let file = File::create(&path).with_context(|| format!("cannot create log file {}", path.display()))?;
    WriteLogger::init(level, simplelog::Config::default(), file).context("logger already set")?;
    Ok(())
}
