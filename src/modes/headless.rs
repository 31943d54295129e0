//! Headless simulation runs
//!
//! Runs the simulation as fast as it will go with every snake autonomous,
//! logging progress through `tracing` and producing a [`RunSummary`]. Useful
//! for soak-testing the heuristic and for comparing collision policies.
//!
//! # Example
//!
//! ```rust,ignore
//! use snake3d::game::GameConfig;
//! use snake3d::modes::{HeadlessConfig, HeadlessMode};
//!
//! let mut mode = HeadlessMode::new(HeadlessConfig::new(1_000, GameConfig::default()))?;
//! let summary = mode.run()?;
//! println!("{}", summary.format_summary());
//! ```

use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::info;

use crate::game::{Action, GameConfig, GameEngine, SimulationState};
use crate::metrics::RunSummary;

/// Configuration for a headless run
#[derive(Debug, Clone)]
pub struct HeadlessConfig {
    /// Maximum number of ticks to simulate
    pub ticks: u64,

    /// Stop early once every snake is dead
    pub stop_when_all_dead: bool,

    /// Log progress every N ticks
    pub log_frequency: u64,

    /// Where to write the JSON summary, if anywhere
    pub summary_path: Option<PathBuf>,

    /// Seed for reproducible runs
    pub seed: Option<u64>,

    pub game_config: GameConfig,
}

impl HeadlessConfig {
    pub fn new(ticks: u64, game_config: GameConfig) -> Self {
        Self {
            ticks,
            stop_when_all_dead: true,
            log_frequency: 100,
            summary_path: None,
            seed: None,
            game_config,
        }
    }
}

pub struct HeadlessMode {
    engine: GameEngine,
    state: SimulationState,
    summary: RunSummary,
    config: HeadlessConfig,
}

impl HeadlessMode {
    pub fn new(config: HeadlessConfig) -> Result<Self> {
        // Nobody is at the keyboard
        let game_config = GameConfig {
            player_autonomous: true,
            ..config.game_config.clone()
        };

        let mut engine = match config.seed {
            Some(seed) => GameEngine::with_seed(game_config, seed),
            None => GameEngine::new(game_config),
        }
        .context("Invalid game configuration")?;

        let state = engine.reset();
        let summary = RunSummary::new(&state);

        Ok(Self {
            engine,
            state,
            summary,
            config,
        })
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    /// Run to completion and return the summary
    pub fn run(&mut self) -> Result<RunSummary> {
        info!(
            ticks = self.config.ticks,
            snakes = self.state.snakes.len(),
            "Starting headless run"
        );

        for _ in 0..self.config.ticks {
            let report = self.engine.step(&mut self.state, Action::Continue);
            self.summary.record(&report, &self.state);

            if self.config.log_frequency > 0 && report.tick % self.config.log_frequency == 0 {
                info!(
                    tick = report.tick,
                    alive = self.state.live_snakes().count(),
                    longest = self.state.longest_length(),
                    food_eaten = self.summary.food_eaten,
                    "Progress"
                );
            }

            if self.config.stop_when_all_dead && self.state.all_dead() {
                info!(tick = report.tick, "All snakes dead, stopping");
                break;
            }
        }

        info!("{}", self.summary.format_summary());

        if let Some(path) = &self.config.summary_path {
            self.summary
                .save(path)
                .with_context(|| format!("Failed to save run summary to {:?}", path))?;
            info!(path = ?path, "Summary written");
        }

        Ok(self.summary.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::DeadSnakePolicy;
    use tempfile::TempDir;

    #[test]
    fn test_headless_config_creation() {
        let config = HeadlessConfig::new(500, GameConfig::default());
        assert_eq!(config.ticks, 500);
        assert!(config.stop_when_all_dead);
        assert!(config.summary_path.is_none());
    }

    #[test]
    fn test_every_snake_is_autonomous() {
        let mode = HeadlessMode::new(HeadlessConfig::new(1, GameConfig::default())).unwrap();
        assert!(mode.state().snakes.iter().all(|s| s.autonomous));
    }

    #[test]
    fn test_run_is_reproducible_with_seed() {
        let mut config = HeadlessConfig::new(200, GameConfig::default());
        config.seed = Some(99);

        let first = HeadlessMode::new(config.clone()).unwrap().run().unwrap();
        let second = HeadlessMode::new(config).unwrap().run().unwrap();
        assert_eq!(first, second);
        assert!(first.ticks > 0);
    }

    #[test]
    fn test_run_writes_summary() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("summary.json");

        let mut config = HeadlessConfig::new(50, GameConfig::default());
        config.seed = Some(3);
        config.summary_path = Some(path.clone());
        config.game_config.dead_snake_policy = DeadSnakePolicy::Obstacle;

        let summary = HeadlessMode::new(config).unwrap().run().unwrap();
        assert!(path.exists());
        assert!(summary.ticks <= 50);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = HeadlessConfig::new(10, GameConfig::new(1));
        assert!(HeadlessMode::new(config).is_err());
    }
}
