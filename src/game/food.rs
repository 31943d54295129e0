use rand::seq::IteratorRandom;
use rand::Rng;
use tracing::warn;

use super::arena::Arena;
use super::state::Snake;
use super::vector::Vec3;

/// The food items currently in the arena
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FoodSet {
    items: Vec<Vec3>,
}

impl FoodSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_positions(positions: impl IntoIterator<Item = Vec3>) -> Self {
        let mut food = Self::new();
        for pos in positions {
            food.insert(pos);
        }
        food
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, pos: Vec3) -> bool {
        self.items.contains(&pos)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Vec3> {
        self.items.iter()
    }

    /// Add an item unless one is already there
    pub fn insert(&mut self, pos: Vec3) -> bool {
        if self.contains(pos) {
            return false;
        }
        self.items.push(pos);
        true
    }

    /// Remove the item at `pos`, returning whether there was one
    pub fn remove(&mut self, pos: Vec3) -> bool {
        let before = self.items.len();
        self.items.retain(|f| *f != pos);
        self.items.len() != before
    }

    /// Pick a random free cell: in bounds, not on a snake, not on other food
    pub fn spawn_position<R: Rng + ?Sized>(
        &self,
        arena: &Arena,
        snakes: &[Snake],
        rng: &mut R,
    ) -> Option<Vec3> {
        let m = arena.max_cell_index();

        // Rejection sampling first, since the arena is usually mostly empty
        for _ in 0..64 {
            let pos = arena.cell_center(
                rng.gen_range(-m..=m),
                rng.gen_range(-m..=m),
                rng.gen_range(-m..=m),
            );
            if self.is_free(pos, snakes) {
                return Some(pos);
            }
        }

        arena
            .cell_centers()
            .filter(|pos| self.is_free(*pos, snakes))
            .choose(rng)
    }

    fn is_free(&self, pos: Vec3, snakes: &[Snake]) -> bool {
        !self.contains(pos) && !snakes.iter().any(|s| s.occupies(pos))
    }

    /// Spawn items until there are `target` of them, or no free cell is left
    ///
    /// Returns the number of items added.
    pub fn replenish<R: Rng + ?Sized>(
        &mut self,
        target: usize,
        arena: &Arena,
        snakes: &[Snake],
        rng: &mut R,
    ) -> usize {
        let mut added = 0;
        while self.items.len() < target {
            match self.spawn_position(arena, snakes, rng) {
                Some(pos) => {
                    self.items.push(pos);
                    added += 1;
                }
                None => {
                    warn!(
                        have = self.items.len(),
                        wanted = target,
                        "No free cell left for food"
                    );
                    break;
                }
            }
        }
        added
    }
}
