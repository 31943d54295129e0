//! snake3d - Snake in a cube
//!
//! This library provides:
//! - Core simulation (game module): arena, snakes, food, collisions, the
//!   food-chasing heuristic and a breadth-first path finder
//! - TUI rendering (render module) of orthographic arena projections
//! - Keyboard input mapping (input module)
//! - Game metrics and run summaries (metrics module)
//! - Execution modes (interactive play and headless runs)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
