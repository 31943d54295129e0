use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::{Action, Direction};

/// A change to the live configuration, each forcing a full reset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigChange {
    MoreCells,
    FewerCells,
    Faster,
    Slower,
    MoreSnakes,
    FewerSnakes,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    GameAction(Action),
    ToggleBoost,
    ToggleDemo,
    Reconfigure(ConfigChange),
    Restart,
    Quit,
    None,
}

pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    /// Translate a key to a direction, if it is a movement key
    ///
    /// x and y follow the screen; `w`/Home push into it and `s`/End pull out.
    pub fn direction_for(code: KeyCode) -> Option<Direction> {
        match code {
            KeyCode::Left => Some(Direction::Left),
            KeyCode::Right => Some(Direction::Right),
            KeyCode::Up => Some(Direction::Up),
            KeyCode::Down => Some(Direction::Down),
            KeyCode::Home | KeyCode::Char('w') | KeyCode::Char('W') => Some(Direction::Away),
            KeyCode::End | KeyCode::Char('s') | KeyCode::Char('S') => Some(Direction::Towards),
            _ => None,
        }
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        if let Some(dir) = Self::direction_for(key.code) {
            return KeyAction::GameAction(Action::Move(dir));
        }

        match key.code {
            KeyCode::Char('f') | KeyCode::Char('F') => KeyAction::ToggleBoost,
            KeyCode::Char('p') | KeyCode::Char('P') => KeyAction::ToggleDemo,

            // Sliders
            KeyCode::Char('+') | KeyCode::Char('=') => {
                KeyAction::Reconfigure(ConfigChange::MoreCells)
            }
            KeyCode::Char('-') | KeyCode::Char('_') => {
                KeyAction::Reconfigure(ConfigChange::FewerCells)
            }
            KeyCode::Char(']') => KeyAction::Reconfigure(ConfigChange::Faster),
            KeyCode::Char('[') => KeyAction::Reconfigure(ConfigChange::Slower),
            KeyCode::Char('n') | KeyCode::Char('N') => {
                KeyAction::Reconfigure(ConfigChange::MoreSnakes)
            }
            KeyCode::Char('m') | KeyCode::Char('M') => {
                KeyAction::Reconfigure(ConfigChange::FewerSnakes)
            }

            // Controls
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Quit,
            KeyCode::Char('r') | KeyCode::Char('R') => KeyAction::Restart,

            _ => KeyAction::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
