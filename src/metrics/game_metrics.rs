use std::time::{Duration, Instant};

use crate::game::{MoveOutcome, TickReport};

pub struct GameMetrics {
    pub start_time: Instant,
    pub elapsed_time: Duration,
    /// Longest snake seen in any game
    pub best_length: usize,
    pub games_played: u32,
    /// Food eaten across all games
    pub food_eaten: u32,
    /// Snakes that crashed across all games
    pub crashes: u32,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
            best_length: 0,
            games_played: 0,
            food_eaten: 0,
            crashes: 0,
        }
    }

    pub fn update(&mut self) {
        self.elapsed_time = self.start_time.elapsed();
    }

    pub fn on_game_start(&mut self) {
        self.start_time = Instant::now();
        self.elapsed_time = Duration::ZERO;
    }

    /// Fold one tick's outcomes into the totals
    pub fn on_tick(&mut self, report: &TickReport, longest: usize) {
        for (_, outcome) in &report.outcomes {
            match outcome {
                MoveOutcome::Ate(_) => self.food_eaten += 1,
                MoveOutcome::Died(_) => self.crashes += 1,
                _ => {}
            }
        }
        self.best_length = self.best_length.max(longest);
    }

    pub fn on_game_over(&mut self, final_length: usize) {
        self.games_played += 1;
        self.best_length = self.best_length.max(final_length);
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}
