use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use connect_four::config::AppConfig;
use connect_four::game::{GameEngine, GameOutcome, Player};

/// Two-player Connect Four at the terminal, one column index per move.
#[derive(Debug, Parser)]
#[command(name = "connect4", version, about)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long, default_value = "connect4.toml")]
    config: PathBuf,

    /// Play a scripted game: space-separated column indices, alternating
    /// players starting with player one.
    #[arg(long)]
    moves: Option<String>,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let config = AppConfig::load_or_default(&cli.config)?;

    match cli.moves {
        Some(script) => replay(&config, &script),
        None => interactive(&config),
    }
}

/// Drive a whole game from a scripted column list, announcing each placement.
fn replay(config: &AppConfig, script: &str) -> Result<()> {
    let mut engine = GameEngine::new();
    let mut player = Player::One;

    for (index, token) in script.split_whitespace().enumerate() {
        let column: usize = token
            .parse()
            .with_context(|| format!("move {}: '{token}' is not a column index", index + 1))?;

        let outcome = engine
            .place(column, player)
            .with_context(|| format!("move {} by {}", index + 1, config.name_of(player)))?;

        println!(
            "{} places in column {column} ({} spaces left)",
            config.name_of(player),
            engine.remaining_capacity(column)
        );

        if let Some(outcome) = outcome {
            announce(config, outcome);
            return Ok(());
        }
        player = player.other();
    }

    bail!("the move list ended before the game did");
}

/// Read one column per line from stdin until the game reaches an outcome.
fn interactive(config: &AppConfig) -> Result<()> {
    let mut engine = GameEngine::new();
    let mut player = Player::One;
    let stdin = io::stdin();

    loop {
        print!("{}'s turn, column (0-6, q to quit): ", config.name_of(player));
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            return Ok(());
        }
        let input = line.trim();
        if input.eq_ignore_ascii_case("q") {
            return Ok(());
        }

        let Ok(column) = input.parse::<usize>() else {
            println!("That move is invalid, please try again");
            continue;
        };

        match engine.place(column, player) {
            Ok(Some(outcome)) => {
                announce(config, outcome);
                return Ok(());
            }
            Ok(None) => player = player.other(),
            Err(_) => println!("That move is invalid, please try again"),
        }
    }
}

fn announce(config: &AppConfig, outcome: GameOutcome) {
    match outcome {
        GameOutcome::Winner(winner) => println!("{} has won!", config.name_of(winner)),
        GameOutcome::Draw => println!("This game has ended in a draw"),
    }
}
