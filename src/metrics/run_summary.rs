//! Per-run statistics for headless simulations
//!
//! A [`RunSummary`] is fed every [`TickReport`] of a run and ends up holding,
//! for each snake, how far it got and how it died. It serializes to JSON so
//! runs can be compared after the fact.

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;

use crate::game::{CollisionKind, MoveOutcome, SimulationState, TickReport};

/// What happened to one snake over a run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SnakeSummary {
    pub id: usize,
    pub length: usize,
    pub food_eaten: u32,
    pub alive: bool,
    /// Tick of the crash, if the snake crashed
    pub died_at: Option<u64>,
    pub cause: Option<CollisionKind>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub ticks: u64,
    /// Games restarted by the collision response
    pub resets: u32,
    pub food_eaten: u32,
    pub snakes: Vec<SnakeSummary>,
}

impl RunSummary {
    /// Start tracking the snakes in `state`
    pub fn new(state: &SimulationState) -> Self {
        let mut summary = Self {
            ticks: 0,
            resets: 0,
            food_eaten: 0,
            snakes: Vec::new(),
        };
        summary.track(state);
        summary
    }

    fn track(&mut self, state: &SimulationState) {
        self.snakes = state
            .snakes
            .iter()
            .map(|s| SnakeSummary {
                id: s.id,
                length: s.len(),
                food_eaten: 0,
                alive: s.alive,
                died_at: None,
                cause: None,
            })
            .collect();
    }

    /// Fold in one tick; `state` is the state after the tick
    pub fn record(&mut self, report: &TickReport, state: &SimulationState) {
        self.ticks += 1;

        for (id, outcome) in &report.outcomes {
            let Some(entry) = self.snakes.get_mut(*id) else {
                continue;
            };
            match outcome {
                MoveOutcome::Ate(_) => {
                    entry.food_eaten += 1;
                    self.food_eaten += 1;
                }
                MoveOutcome::Died(kind) => {
                    entry.alive = false;
                    entry.died_at = Some(report.tick);
                    entry.cause = Some(*kind);
                }
                _ => {}
            }
        }

        if report.reset {
            self.resets += 1;
            self.track(state);
            return;
        }

        for (entry, snake) in self.snakes.iter_mut().zip(&state.snakes) {
            entry.length = snake.len();
        }
    }

    pub fn survivors(&self) -> usize {
        self.snakes.iter().filter(|s| s.alive).count()
    }

    pub fn longest(&self) -> usize {
        self.snakes.iter().map(|s| s.length).max().unwrap_or(0)
    }

    /// Format a one-line summary
    pub fn format_summary(&self) -> String {
        format!(
            "Ticks: {} | Food eaten: {} | Survivors: {}/{} | Longest: {} | Resets: {}",
            self.ticks,
            self.food_eaten,
            self.survivors(),
            self.snakes.len(),
            self.longest(),
            self.resets
        )
    }

    /// Write the summary as pretty JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }
        let json = serde_json::to_string_pretty(self).context("Failed to serialize summary")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write summary to {:?}", path))
    }
}
