use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use super::{
    action::Action,
    config::{CollisionResponse, ConfigError, GameConfig},
    food::FoodSet,
    state::{CollisionKind, MoveOutcome, Rules, SimulationState, Snake},
    vector::Vec3,
};

/// Everything that happened during one tick
#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    /// Tick number after the step
    pub tick: u64,
    /// Outcome for each snake that was processed, in processing order
    pub outcomes: Vec<(usize, MoveOutcome)>,
    /// The collision response rebuilt the whole game
    pub reset: bool,
    /// Food items added after the moves
    pub food_spawned: usize,
}

impl TickReport {
    fn new(tick: u64) -> Self {
        Self {
            tick,
            outcomes: Vec::new(),
            reset: false,
            food_spawned: 0,
        }
    }

    pub fn deaths(&self) -> impl Iterator<Item = (usize, CollisionKind)> + '_ {
        self.outcomes.iter().filter_map(|(id, outcome)| match outcome {
            MoveOutcome::Died(kind) => Some((*id, *kind)),
            _ => None,
        })
    }

    pub fn meals(&self) -> impl Iterator<Item = (usize, Vec3)> + '_ {
        self.outcomes.iter().filter_map(|(id, outcome)| match outcome {
            MoveOutcome::Ate(pos) => Some((*id, *pos)),
            _ => None,
        })
    }
}

/// The simulation driver: owns configuration and randomness, advances state
pub struct GameEngine {
    config: GameConfig,
    rules: Rules,
    rng: StdRng,
}

impl GameEngine {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Engine with reproducible randomness
    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GameConfig, rng: StdRng) -> Result<Self, ConfigError> {
        config.validate()?;
        let rules = Rules::new(config.arena(), config.dead_snake_policy);
        Ok(Self { config, rules, rng })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    /// Swap in a new configuration and start over
    pub fn reconfigure(&mut self, config: GameConfig) -> Result<SimulationState, ConfigError> {
        config.validate()?;
        self.rules = Rules::new(config.arena(), config.dead_snake_policy);
        self.config = config;
        Ok(self.reset())
    }

    /// Reset the game to initial state
    ///
    /// Snake `i` starts on its own z row, one row nearer `-z` than snake
    /// `i - 1`, so no two snakes overlap.
    pub fn reset(&mut self) -> SimulationState {
        let arena = self.rules.arena;
        let first_row = self.config.start_row_offset();

        let snakes: Vec<Snake> = (0..self.config.num_snakes)
            .map(|i| {
                let autonomous = i > 0 || self.config.player_autonomous;
                Snake::new(
                    i,
                    &arena,
                    self.config.initial_snake_length,
                    first_row - i as i32,
                    autonomous,
                    &mut self.rng,
                )
            })
            .collect();

        let mut food = FoodSet::new();
        food.replenish(
            self.config.target_food_count(),
            &arena,
            &snakes,
            &mut self.rng,
        );

        info!(
            snakes = snakes.len(),
            food = food.len(),
            cell_width = arena.cell_width,
            "Game reset"
        );

        SimulationState::new(snakes, food, self.rules)
    }

    /// Execute one tick
    ///
    /// Snakes are processed one at a time in id order. Each snake's collision
    /// check sees the moves already committed by lower ids this tick, so when
    /// two heads aim at the same cell the lower id gets there first.
    pub fn step(&mut self, state: &mut SimulationState, action: Action) -> TickReport {
        state.tick += 1;
        let mut report = TickReport::new(state.tick);

        if let Action::Move(dir) = action {
            if let Some(player) = state.player_mut() {
                if !player.autonomous {
                    player.request_direction(dir);
                }
            }
        }

        for i in 0..state.snakes.len() {
            if !state.snakes[i].alive {
                continue;
            }

            let mut snake = state.snakes[i].clone();
            if snake.autonomous {
                snake.auto_set_direction(&state.snakes, &state.food, &state.rules, &mut self.rng);
            }
            let outcome = snake.plan_move(&state.snakes, &state.food, &state.rules);
            snake.apply(outcome);

            match outcome {
                MoveOutcome::Ate(pos) => {
                    state.food.remove(pos);
                    state.food_eaten += 1;
                    debug!(snake = snake.id, at = %pos, length = snake.len(), "Food eaten");
                }
                MoveOutcome::Died(kind) => {
                    info!(snake = snake.id, ?kind, length = snake.len(), "Snake crashed");
                    match self.config.collision_response {
                        CollisionResponse::KillSnake => snake.die(),
                        CollisionResponse::ResetGame => {
                            report.outcomes.push((i, outcome));
                            report.reset = true;
                            *state = self.reset();
                            return report;
                        }
                    }
                }
                MoveOutcome::Moved(_) | MoveOutcome::Stationary => {}
            }

            state.snakes[i] = snake;
            report.outcomes.push((i, outcome));
        }

        report.food_spawned = state.food.replenish(
            self.config.target_food_count(),
            &state.rules.arena,
            &state.snakes,
            &mut self.rng,
        );

        report
    }
}
