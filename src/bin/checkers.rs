//! Terminal checkers.

use std::io;

use anyhow::Result;
use checkers::console::Console;
use checkers::{CapturePolicy, GameConfig, GameMode, RulesConfig};
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Checkers on the command line, against a friend or the computer.
#[derive(Parser, Debug)]
#[command(name = "checkers", version, long_about = None)]
struct Cli {
    /// Game mode; `ask` prompts for P or C at start
    #[arg(long, value_enum, default_value_t = ModeArg::Ask)]
    mode: ModeArg,

    /// Accept two-square jumps over an empty or friendly square
    #[arg(long)]
    lenient_captures: bool,

    /// Seed for the computer's move choice
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ModeArg {
    Ask,
    Players,
    Computer,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = GameConfig {
        mode: match cli.mode {
            ModeArg::Players => GameMode::Players,
            ModeArg::Ask | ModeArg::Computer => GameMode::Computer,
        },
        rules: RulesConfig {
            capture_policy: if cli.lenient_captures {
                CapturePolicy::Lenient
            } else {
                CapturePolicy::Strict
            },
        },
        seed: cli.seed,
        ..GameConfig::default()
    };
    info!(?config, "starting game");

    let mut console = Console::new(io::stdin().lock(), io::stdout().lock());
    let result = console.run(config, cli.mode == ModeArg::Ask)?;
    info!(?result, "game finished");

    Ok(())
}
