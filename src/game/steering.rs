//! Greedy food-chasing heuristic for autonomous snakes
//!
//! This is not path planning. The snake closes the distance to the nearest food
//! one axis at a time, in its own axis priority order, and only refuses moves
//! that would collide on the very next step. It can dither or box itself in,
//! but never walks into an immediate collision while a safe move exists.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use super::action::Direction;
use super::food::FoodSet;
use super::state::{Rules, Snake};
use super::vector::Vec3;

impl Snake {
    /// The food item closest to the head, first one winning ties
    pub fn nearest_food(&self, food: &FoodSet) -> Option<Vec3> {
        let head = self.head();
        food.iter().copied().fold(None, |best, cur| match best {
            Some(b) if head.distance_sq(b) <= head.distance_sq(cur) => Some(b),
            _ => Some(cur),
        })
    }

    /// Directions whose next cell is free
    pub fn valid_move_directions(&self, snakes: &[Snake], rules: &Rules) -> Vec<Direction> {
        Direction::ALL
            .into_iter()
            .filter(|dir| {
                let target = self.step_target(*dir, rules.cell_width());
                !self.collides(target, snakes, rules)
            })
            .collect()
    }

    /// Point the snake toward the nearest food
    ///
    /// Leaves the direction untouched when there is no food, and clears it
    /// when every neighboring cell is blocked so the snake stalls in place.
    pub fn auto_set_direction<R: Rng + ?Sized>(
        &mut self,
        snakes: &[Snake],
        food: &FoodSet,
        rules: &Rules,
        rng: &mut R,
    ) {
        if !self.alive {
            return;
        }

        let Some(target) = self.nearest_food(food) else {
            return;
        };

        let valid = self.valid_move_directions(snakes, rules);
        if valid.is_empty() {
            debug!(snake = self.id, head = %self.head(), "Boxed in, stalling");
            self.direction = None;
            return;
        }

        let to_food = target - self.head();
        let preferred = self
            .move_order
            .iter()
            .filter_map(|axis| Direction::from_axis(*axis, to_food.get(*axis)))
            .find(|dir| valid.contains(dir));

        self.direction = preferred.or_else(|| valid.choose(rng).copied());
    }
}
