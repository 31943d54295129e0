use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use super::arena::Arena;

/// Smallest grid that leaves room to turn around
pub const MIN_CELLS_PER_DIMENSION: usize = 3;

/// Whether a dead snake's body still blocks the others
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeadSnakePolicy {
    /// Dead snakes vanish from collision checks
    #[default]
    Ignore,
    /// Dead snakes stay behind as static obstacles
    Obstacle,
}

/// What happens when a snake collides
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionResponse {
    /// Rebuild the whole game: new snakes, new food
    ResetGame,
    /// Only the colliding snake dies; the rest play on
    #[default]
    KillSnake,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("cells_per_dimension must be at least {MIN_CELLS_PER_DIMENSION}, got {0}")]
    TooFewCells(usize),
    #[error("arena_width {width} is too small for {cells} cells")]
    ArenaTooSmall { width: i32, cells: usize },
    #[error("arena_width {width} rounds to {usable} usable cells per axis, not {cells}")]
    CellRounding {
        width: i32,
        cells: usize,
        usable: usize,
    },
    #[error("initial_snake_length must be at least 1")]
    SnakeTooShort,
    #[error("initial_snake_length {length} does not fit in {cells} cells")]
    SnakeTooLong { length: usize, cells: usize },
    #[error("num_snakes must be at least 1")]
    NoSnakes,
    #[error("{snakes} snakes do not fit in {rows} starting rows")]
    TooManySnakes { snakes: usize, rows: usize },
    #[error("speedup_factor must be at least 1, got {0}")]
    InvalidSpeedupFactor(f64),
}

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Grid resolution along each axis
    pub cells_per_dimension: usize,
    /// Edge length of the arena cube in world units
    pub arena_width: i32,
    /// Initial length of every snake
    pub initial_snake_length: usize,
    /// Number of snakes, including the player snake at index 0
    pub num_snakes: usize,
    /// Milliseconds between moves
    pub move_interval_ms: u64,
    /// Divisor applied to the move interval while the speed boost is on
    pub speedup_factor: f64,
    /// Food items kept in the arena; derived from `num_snakes` when unset
    pub food_count: Option<usize>,
    pub dead_snake_policy: DeadSnakePolicy,
    pub collision_response: CollisionResponse,
    /// Let the heuristic drive the player snake too
    pub player_autonomous: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            cells_per_dimension: 11,
            arena_width: 660,
            initial_snake_length: 3,
            num_snakes: 3,
            move_interval_ms: 300,
            speedup_factor: 3.0,
            food_count: None,
            dead_snake_policy: DeadSnakePolicy::Ignore,
            collision_response: CollisionResponse::KillSnake,
            player_autonomous: false,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with a custom grid resolution
    pub fn new(cells_per_dimension: usize) -> Self {
        Self {
            cells_per_dimension,
            ..Default::default()
        }
    }

    /// One human snake that restarts the game when it crashes
    pub fn single_player() -> Self {
        Self {
            num_snakes: 1,
            food_count: Some(1),
            collision_response: CollisionResponse::ResetGame,
            ..Default::default()
        }
    }

    /// Fast, crowded, fully autonomous setup
    pub fn demo() -> Self {
        Self {
            cells_per_dimension: 15,
            num_snakes: 11,
            move_interval_ms: speed_to_interval_ms(50),
            player_autonomous: true,
            ..Default::default()
        }
    }

    pub fn arena(&self) -> Arena {
        Arena::from_cells(self.arena_width, self.cells_per_dimension)
    }

    /// Number of food items to keep in play
    pub fn target_food_count(&self) -> usize {
        self.food_count
            .unwrap_or_else(|| self.num_snakes.div_ceil(2))
            .max(1)
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cells_per_dimension < MIN_CELLS_PER_DIMENSION {
            return Err(ConfigError::TooFewCells(self.cells_per_dimension));
        }

        if self.arena_width < self.cells_per_dimension as i32 {
            return Err(ConfigError::ArenaTooSmall {
                width: self.arena_width,
                cells: self.cells_per_dimension,
            });
        }

        // The grid is symmetric about the origin, so an even count gains or
        // loses one outer layer; any other difference comes from rounding
        let arena = self.arena();
        let cells = self.cells_per_dimension;
        let usable = arena.cells_per_axis();
        let matches = if cells % 2 == 1 {
            usable == cells
        } else {
            usable == cells - 1 || usable == cells + 1
        };
        if !matches {
            return Err(ConfigError::CellRounding {
                width: self.arena_width,
                cells,
                usable,
            });
        }

        if self.initial_snake_length == 0 {
            return Err(ConfigError::SnakeTooShort);
        }

        // Snakes start at x = 0 and extend toward -x
        let behind_center = arena.max_cell_index() as usize + 1;
        if self.initial_snake_length > behind_center {
            return Err(ConfigError::SnakeTooLong {
                length: self.initial_snake_length,
                cells: behind_center,
            });
        }

        if self.num_snakes == 0 {
            return Err(ConfigError::NoSnakes);
        }

        // Each snake gets its own z row, counting down from the center row
        let rows = self.start_rows();
        if self.num_snakes > rows {
            return Err(ConfigError::TooManySnakes {
                snakes: self.num_snakes,
                rows,
            });
        }

        if self.speedup_factor.is_nan() || self.speedup_factor < 1.0 {
            return Err(ConfigError::InvalidSpeedupFactor(self.speedup_factor));
        }

        Ok(())
    }

    /// Rows available to stack snakes along z without leaving the arena
    fn start_rows(&self) -> usize {
        let max = self.arena().max_cell_index();
        let first = self.start_row_offset();
        (first + max + 1).max(0) as usize
    }

    /// z cell index of snake 0
    pub(crate) fn start_row_offset(&self) -> i32 {
        let first = (self.cells_per_dimension / 2) as i32;
        first.min(self.arena().max_cell_index())
    }

    /// Read a JSON configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        let config: GameConfig =
            serde_json::from_str(&json).context("Failed to parse config JSON")?;
        config
            .validate()
            .with_context(|| format!("Invalid config in {:?}", path))?;
        Ok(config)
    }

    /// Write this configuration as pretty JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }
        let json = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, json).with_context(|| format!("Failed to write config to {:?}", path))
    }
}

/// Map a speed slider value in 1..=50 linearly onto 3000..=0 ms per move
pub fn speed_to_interval_ms(speed: u32) -> u64 {
    let speed = speed.clamp(1, 50) as f64;
    let ms = 3000.0 - (speed - 1.0) * 3000.0 / 49.0;
    ms.round().max(0.0) as u64
}

/// Nearest speed slider value for a move interval
pub fn interval_ms_to_speed(interval_ms: u64) -> u32 {
    let ms = interval_ms.min(3000) as f64;
    (1.0 + (3000.0 - ms) * 49.0 / 3000.0).round() as u32
}
