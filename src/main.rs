use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

use snake3d::game::{speed_to_interval_ms, CollisionResponse, DeadSnakePolicy, GameConfig};
use snake3d::modes::{HeadlessConfig, HeadlessMode, HumanMode};

#[derive(Parser)]
#[command(name = "snake3d")]
#[command(version, about = "Snake in a cube, with food-chasing computer snakes")]
struct Cli {
    /// How to run the game
    #[arg(long, default_value = "play")]
    mode: Mode,

    /// JSON game configuration; other flags override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid cells along each axis
    #[arg(long)]
    cells: Option<usize>,

    /// Arena edge length in world units
    #[arg(long)]
    arena_width: Option<i32>,

    /// Speed slider, 1 (3 s per move) to 50 (as fast as possible)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=50), conflicts_with = "move_ms")]
    speed: Option<u32>,

    /// Milliseconds between moves
    #[arg(long)]
    move_ms: Option<u64>,

    /// Number of snakes, including yours
    #[arg(long)]
    snakes: Option<usize>,

    /// Starting length of every snake
    #[arg(long)]
    length: Option<usize>,

    /// Food items to keep in the arena
    #[arg(long)]
    food: Option<usize>,

    /// Dead snakes stay behind as obstacles
    #[arg(long)]
    dead_snakes_block: bool,

    /// Restart the whole game when any snake crashes
    #[arg(long)]
    reset_on_death: bool,

    /// Ticks to simulate in headless mode
    #[arg(long, default_value = "1000")]
    ticks: u64,

    /// RNG seed for headless runs
    #[arg(long)]
    seed: Option<u64>,

    /// Write the headless run summary here as JSON
    #[arg(long)]
    summary: Option<PathBuf>,

    /// Write logs to this file (interactive modes log nowhere otherwise)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Steer snake 0 with the keyboard
    Play,
    /// Watch every snake drive itself
    Demo,
    /// Simulate without a terminal UI and print a summary
    Headless,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match (&self.config, self.mode) {
            (Some(path), _) => GameConfig::load(path)?,
            (None, Mode::Demo) => GameConfig::demo(),
            (None, _) => GameConfig::default(),
        };

        if let Some(cells) = self.cells {
            config.cells_per_dimension = cells;
        }
        if let Some(width) = self.arena_width {
            config.arena_width = width;
        }
        if let Some(speed) = self.speed {
            config.move_interval_ms = speed_to_interval_ms(speed);
        }
        if let Some(ms) = self.move_ms {
            config.move_interval_ms = ms;
        }
        if let Some(snakes) = self.snakes {
            config.num_snakes = snakes;
        }
        if let Some(length) = self.length {
            config.initial_snake_length = length;
        }
        if self.food.is_some() {
            config.food_count = self.food;
        }
        if self.dead_snakes_block {
            config.dead_snake_policy = DeadSnakePolicy::Obstacle;
        }
        if self.reset_on_death {
            config.collision_response = CollisionResponse::ResetGame;
        }
        if self.mode == Mode::Demo {
            config.player_autonomous = true;
        }

        config.validate().context("Invalid game configuration")?;
        Ok(config)
    }
}

/// Set up `tracing`, honoring `RUST_LOG`
///
/// The terminal belongs to the renderer in interactive modes, so logs only go
/// to stderr in headless mode.
fn init_tracing(log_file: Option<&Path>, headless: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file {:?}", path))?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        None if headless => builder.with_writer(std::io::stderr).init(),
        None => {}
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_file.as_deref(), cli.mode == Mode::Headless)?;

    let config = cli.game_config()?;

    // Dispatch to appropriate mode
    match cli.mode {
        Mode::Play | Mode::Demo => {
            let mut human_mode = HumanMode::new(config)?;
            human_mode.run().await?;
        }
        Mode::Headless => {
            let headless_config = HeadlessConfig {
                seed: cli.seed,
                summary_path: cli.summary.clone(),
                ..HeadlessConfig::new(cli.ticks, config)
            };
            let summary = HeadlessMode::new(headless_config)?.run()?;
            println!("{}", summary.format_summary());
        }
    }

    Ok(())
}
