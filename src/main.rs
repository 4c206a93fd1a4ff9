use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use grid_snake::game::{GameConfig, GameEngine};
use grid_snake::modes::{HeadlessMode, PlayMode};
use grid_snake::player::{GreedyPlayer, KeyboardPlayer};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "grid_snake")]
#[command(version, about = "Turn-based snake on a bordered grid")]
struct Cli {
    /// Who plays and where
    #[arg(long, default_value = "play")]
    mode: Mode,

    /// Board width, border included
    #[arg(long, default_value = "20")]
    width: usize,

    /// Board height, border included
    #[arg(long, default_value = "10")]
    height: usize,

    /// Seed for food placement (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Milliseconds between moves in the terminal modes
    #[arg(long, default_value = "125")]
    tick_ms: u64,

    /// Stop a headless game after this many ticks
    #[arg(long)]
    max_ticks: Option<u64>,

    /// Print the headless result as JSON
    #[arg(long)]
    json: bool,

    /// Write logs to this file (terminal modes log nowhere otherwise)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Play with the keyboard
    Play,
    /// Watch the greedy autopilot in the terminal
    Watch,
    /// Let the autopilot play without a screen and print the result
    Headless,
}

fn init_tracing(cli: &Cli) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match (&cli.log_file, cli.mode) {
        (Some(path), _) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        (None, Mode::Headless) => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
        // The alternate screen owns the terminal.
        (None, _) => {}
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli)?;

    let config = GameConfig::new(cli.width, cli.height);
    config.validate()?;

    let engine = match cli.seed {
        Some(seed) => GameEngine::seeded(config, seed),
        None => GameEngine::new(config),
    };
    let tick_interval = Duration::from_millis(cli.tick_ms.max(1));

    let score = match cli.mode {
        Mode::Play => {
            let mut play_mode = PlayMode::new(engine, KeyboardPlayer::new(), tick_interval)?;
            play_mode.run().await?
        }
        Mode::Watch => {
            let mut play_mode = PlayMode::new(engine, GreedyPlayer::new(), tick_interval)?;
            play_mode.run().await?
        }
        Mode::Headless => {
            let mut headless = HeadlessMode::new(engine, GreedyPlayer::new());
            if let Some(max_ticks) = cli.max_ticks {
                headless = headless.with_max_ticks(max_ticks);
            }
            let report = headless.run()?;
            if cli.json {
                println!("{}", report.to_json()?);
                return Ok(());
            }
            println!("Outcome: {} after {} ticks", report.outcome, report.ticks);
            report.score
        }
    };

    println!("You got {score} points!");
    Ok(())
}
