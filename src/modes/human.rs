use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{stderr, Stderr};
use std::time::{Duration, Instant};
use tokio::time::interval;
use tracing::{info, warn};

use crate::game::{
    interval_ms_to_speed, speed_to_interval_ms, Action, Direction, GameConfig, GameEngine,
    SimulationState, TickScheduler,
};
use crate::input::{ConfigChange, InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::{Hud, Renderer};

/// Interactive play: snake 0 follows the keyboard, the rest chase food
pub struct HumanMode {
    engine: GameEngine,
    state: SimulationState,
    scheduler: TickScheduler,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    clock: Instant,
    boost: bool,
    should_quit: bool,
    game_over_recorded: bool,
    pending_direction: Option<Direction>,
}

impl HumanMode {
    pub fn new(config: GameConfig) -> Result<Self> {
        let mut engine = GameEngine::new(config).context("Invalid game configuration")?;
        let state = engine.reset();
        let scheduler = TickScheduler::new(
            engine.config().move_interval_ms,
            engine.config().speedup_factor,
        );

        let mut mode = Self {
            engine,
            state,
            scheduler,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            clock: Instant::now(),
            boost: false,
            should_quit: false,
            game_over_recorded: false,
            pending_direction: None,
        };
        mode.start_if_autonomous();
        Ok(mode)
    }

    fn now_ms(&self) -> u64 {
        self.clock.elapsed().as_millis() as u64
    }

    /// Demo games have nobody to press the first key
    fn start_if_autonomous(&mut self) {
        if self.engine.config().player_autonomous {
            let now = self.now_ms();
            self.scheduler.start(now);
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // The scheduler decides when a move is due; poll it at ~60 Hz
        let mut frame_timer = interval(Duration::from_millis(16));

        // Render at 30 FPS (33ms per frame)
        let mut render_timer = interval(Duration::from_millis(33));

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event);
                    }
                }

                // Game logic tick
                _ = frame_timer.tick() => {
                    let now = self.now_ms();
                    if self.scheduler.poll(now, self.boost) {
                        self.update_game();
                    }
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.metrics.update();
                    let hud = self.hud();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.state, &self.metrics, &hud);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn hud(&self) -> Hud {
        let config = self.engine.config();
        Hud {
            cells: self.state.rules.arena.cells_per_axis(),
            move_interval_ms: self.scheduler.effective_interval_ms(self.boost),
            boost: self.boost,
            demo: config.player_autonomous,
            started: self.scheduler.is_started(),
        }
    }

    fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return;
            }

            match self.input_handler.handle_key_event(key) {
                KeyAction::GameAction(Action::Move(dir)) => self.request_direction(dir),
                KeyAction::GameAction(Action::Continue) => {}
                KeyAction::ToggleBoost => self.boost = !self.boost,
                KeyAction::ToggleDemo => {
                    let mut config = self.engine.config().clone();
                    config.player_autonomous = !config.player_autonomous;
                    self.reconfigure(config);
                }
                KeyAction::Reconfigure(change) => self.apply_change(change),
                KeyAction::Restart => self.reset_game(),
                KeyAction::Quit => self.should_quit = true,
                KeyAction::None => {}
            }
        }
    }

    fn request_direction(&mut self, dir: Direction) {
        let Some(player) = self.state.player() else {
            return;
        };
        if player.autonomous || !player.alive {
            return;
        }
        if player.direction.is_some_and(|current| current.is_opposite(dir)) {
            return;
        }

        self.pending_direction = Some(dir);
        let now = self.now_ms();
        self.scheduler.start(now);
    }

    fn update_game(&mut self) {
        if self.state.all_dead() {
            return;
        }

        let action = self
            .pending_direction
            .take()
            .map(Action::Move)
            .unwrap_or(Action::Continue);

        let longest_before = self.state.longest_length();
        let report = self.engine.step(&mut self.state, action);
        self.metrics.on_tick(&report, self.state.longest_length());

        if report.reset {
            self.metrics.on_game_over(longest_before);
            self.metrics.on_game_start();
        } else if self.state.all_dead() && !self.game_over_recorded {
            self.metrics.on_game_over(longest_before);
            self.game_over_recorded = true;
        }
    }

    fn apply_change(&mut self, change: ConfigChange) {
        let mut config = self.engine.config().clone();
        let speed = interval_ms_to_speed(config.move_interval_ms);

        match change {
            ConfigChange::MoreCells => config.cells_per_dimension += 2,
            ConfigChange::FewerCells => {
                config.cells_per_dimension = config.cells_per_dimension.saturating_sub(2)
            }
            ConfigChange::Faster => config.move_interval_ms = speed_to_interval_ms(speed + 1),
            ConfigChange::Slower => {
                config.move_interval_ms = speed_to_interval_ms(speed.saturating_sub(1))
            }
            ConfigChange::MoreSnakes => config.num_snakes += 1,
            ConfigChange::FewerSnakes => config.num_snakes = config.num_snakes.saturating_sub(1),
        }

        self.reconfigure(config);
    }

    fn reconfigure(&mut self, config: GameConfig) {
        match self.engine.reconfigure(config) {
            Ok(state) => {
                info!(config = ?self.engine.config(), "Configuration changed");
                self.state = state;
                self.scheduler = TickScheduler::new(
                    self.engine.config().move_interval_ms,
                    self.engine.config().speedup_factor,
                );
                self.after_reset();
            }
            Err(e) => warn!("Ignoring configuration change: {}", e),
        }
    }

    fn reset_game(&mut self) {
        self.state = self.engine.reset();
        self.scheduler.stop();
        self.after_reset();
    }

    fn after_reset(&mut self) {
        self.metrics.on_game_start();
        self.pending_direction = None;
        self.game_over_recorded = false;
        self.start_if_autonomous();
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_initialization() {
        let mode = HumanMode::new(GameConfig::default()).unwrap();
        assert_eq!(mode.state.snakes.len(), 3);
        assert!(!mode.scheduler.is_started());
    }

    #[test]
    fn test_demo_starts_immediately() {
        let mode = HumanMode::new(GameConfig::demo()).unwrap();
        assert!(mode.scheduler.is_started());
    }

    #[test]
    fn test_direction_key_starts_clock() {
        let mut mode = HumanMode::new(GameConfig::single_player()).unwrap();
        mode.request_direction(Direction::Right);
        assert!(mode.scheduler.is_started());
        assert_eq!(mode.pending_direction, Some(Direction::Right));

        mode.update_game();
        assert_eq!(mode.state.snakes[0].direction, Some(Direction::Right));
        assert_eq!(mode.pending_direction, None);
    }

    #[test]
    fn test_reverse_key_ignored() {
        let mut mode = HumanMode::new(GameConfig::single_player()).unwrap();
        mode.request_direction(Direction::Up);
        mode.update_game();

        mode.request_direction(Direction::Down);
        assert_eq!(mode.pending_direction, None);
    }

    #[test]
    fn test_config_change_resets() {
        let mut mode = HumanMode::new(GameConfig::default()).unwrap();
        mode.apply_change(ConfigChange::MoreSnakes);
        assert_eq!(mode.state.snakes.len(), 4);

        mode.apply_change(ConfigChange::FewerCells);
        assert_eq!(mode.engine.config().cells_per_dimension, 9);

        let before = mode.engine.config().move_interval_ms;
        mode.apply_change(ConfigChange::Faster);
        assert!(mode.engine.config().move_interval_ms < before);
    }

    #[test]
    fn test_hud_reports_usable_grid() {
        let mut mode = HumanMode::new(GameConfig::new(10)).unwrap();
        assert_eq!(mode.hud().cells, 9);

        mode.apply_change(ConfigChange::MoreCells);
        assert_eq!(mode.hud().cells, 11);
    }

    #[test]
    fn test_invalid_change_is_ignored() {
        let mut mode = HumanMode::new(GameConfig::single_player()).unwrap();
        mode.apply_change(ConfigChange::FewerSnakes);
        assert_eq!(mode.engine.config().num_snakes, 1);
        assert_eq!(mode.state.snakes.len(), 1);
    }

    #[test]
    fn test_game_reset() {
        let mut mode = HumanMode::new(GameConfig::default()).unwrap();
        for snake in &mut mode.state.snakes {
            snake.die();
        }
        mode.update_game();
        mode.reset_game();
        assert!(mode.state.snakes.iter().all(|s| s.alive));
        assert!(!mode.game_over_recorded);
    }
}
