//! Core simulation for the 3D Snake game
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! The terminal front end and the headless runner both drive it through [`GameEngine`].

pub mod action;
pub mod arena;
pub mod config;
pub mod engine;
pub mod food;
pub mod pathfinder;
pub mod scheduler;
pub mod state;
pub mod steering;
pub mod vector;

// Re-export commonly used types
pub use action::{Action, Direction};
pub use arena::Arena;
pub use config::{
    interval_ms_to_speed, speed_to_interval_ms, CollisionResponse, ConfigError, DeadSnakePolicy,
    GameConfig,
};
pub use engine::{GameEngine, TickReport};
pub use food::FoodSet;
pub use pathfinder::PathFinder;
pub use scheduler::TickScheduler;
pub use state::{CollisionKind, MoveOutcome, Rules, SimulationState, Snake};
pub use vector::{Axis, Vec3};
