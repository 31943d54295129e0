use rand::Rng;
use serde::Serialize;

use super::action::Direction;
use super::arena::Arena;
use super::config::DeadSnakePolicy;
use super::food::FoodSet;
use super::vector::{Axis, Vec3};

/// Every ordering of the three axes; each snake picks one at creation
pub const AXIS_MOVE_ORDERS: [[Axis; 3]; 6] = [
    [Axis::X, Axis::Y, Axis::Z],
    [Axis::X, Axis::Z, Axis::Y],
    [Axis::Y, Axis::X, Axis::Z],
    [Axis::Y, Axis::Z, Axis::X],
    [Axis::Z, Axis::X, Axis::Y],
    [Axis::Z, Axis::Y, Axis::X],
];

/// The static part of the world every collision check needs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rules {
    pub arena: Arena,
    pub dead_snake_policy: DeadSnakePolicy,
}

impl Rules {
    pub fn new(arena: Arena, dead_snake_policy: DeadSnakePolicy) -> Self {
        Self {
            arena,
            dead_snake_policy,
        }
    }

    pub fn cell_width(&self) -> i32 {
        self.arena.cell_width
    }
}

/// Type of collision that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CollisionKind {
    /// Snake left the arena
    Wall,
    /// Snake hit its own body
    SelfCollision,
    /// Snake hit the snake with this id
    OtherSnake(usize),
}

/// What a single snake did during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// No direction set, or the snake is dead
    Stationary,
    /// Head advanced to the position and the tail followed
    Moved(Vec3),
    /// Head advanced onto food at the position; the tail stays
    Ate(Vec3),
    /// The move was refused
    Died(CollisionKind),
}

/// A snake in the arena
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Index of the snake in the simulation
    pub id: usize,
    /// Body segments, with head at index 0
    pub body: Vec<Vec3>,
    /// Current direction of movement; `None` while standing still
    pub direction: Option<Direction>,
    pub alive: bool,
    /// Steered by the food-chasing heuristic rather than by input
    pub autonomous: bool,
    /// Axis priority for the heuristic
    pub move_order: [Axis; 3],
}

impl Snake {
    /// Create a snake of `length` segments with its head at x = 0 on z row
    /// `row`, extending toward -x
    pub fn new<R: Rng + ?Sized>(
        id: usize,
        arena: &Arena,
        length: usize,
        row: i32,
        autonomous: bool,
        rng: &mut R,
    ) -> Self {
        let body = (0..length.max(1) as i32)
            .map(|i| arena.cell_center(-i, 0, row))
            .collect();
        let move_order = AXIS_MOVE_ORDERS[rng.gen_range(0..AXIS_MOVE_ORDERS.len())];

        Self {
            id,
            body,
            direction: None,
            alive: true,
            autonomous,
            move_order,
        }
    }

    /// Create a snake from explicit segments, head first
    ///
    /// # Panics
    ///
    /// Panics if `body` is empty.
    pub fn from_body(id: usize, body: Vec<Vec3>, direction: Option<Direction>) -> Self {
        assert!(!body.is_empty(), "a snake needs at least one segment");
        Self {
            id,
            body,
            direction,
            alive: true,
            autonomous: false,
            move_order: AXIS_MOVE_ORDERS[0],
        }
    }

    /// Get the head position
    pub fn head(&self) -> Vec3 {
        self.body[0]
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Vec3 {
        self.body[self.body.len() - 1]
    }

    /// Get body segments (excluding head)
    pub fn body_segments(&self) -> &[Vec3] {
        &self.body[1..]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn occupies(&self, pos: Vec3) -> bool {
        self.body.contains(&pos)
    }

    /// Change direction unless it would reverse the snake onto its neck
    ///
    /// Returns whether the request was accepted.
    pub fn request_direction(&mut self, requested: Direction) -> bool {
        if let Some(current) = self.direction {
            if current.is_opposite(requested) {
                return false;
            }
        }
        self.direction = Some(requested);
        true
    }

    /// Position of the head after one step in `dir`
    pub fn step_target(&self, dir: Direction, cell_width: i32) -> Vec3 {
        self.head() + dir.delta() * cell_width
    }

    /// Classify the collision the head would suffer at `pos`
    ///
    /// The current head is excluded from the self check since it is the
    /// segment being replaced. Other snakes are matched by id, so `snakes`
    /// may include `self`.
    pub fn collision(&self, pos: Vec3, snakes: &[Snake], rules: &Rules) -> Option<CollisionKind> {
        if !rules.arena.is_in_bounds(pos) {
            return Some(CollisionKind::Wall);
        }

        if self.body_segments().contains(&pos) {
            return Some(CollisionKind::SelfCollision);
        }

        snakes
            .iter()
            .filter(|other| other.id != self.id)
            .filter(|other| {
                other.alive || rules.dead_snake_policy == DeadSnakePolicy::Obstacle
            })
            .find(|other| other.occupies(pos))
            .map(|other| CollisionKind::OtherSnake(other.id))
    }

    pub fn collides(&self, pos: Vec3, snakes: &[Snake], rules: &Rules) -> bool {
        self.collision(pos, snakes, rules).is_some()
    }

    /// Decide what moving one step would do, without changing anything
    pub fn plan_move(&self, snakes: &[Snake], food: &FoodSet, rules: &Rules) -> MoveOutcome {
        let dir = match self.direction {
            Some(dir) if self.alive => dir,
            _ => return MoveOutcome::Stationary,
        };

        let new_head = self.step_target(dir, rules.cell_width());
        if let Some(kind) = self.collision(new_head, snakes, rules) {
            return MoveOutcome::Died(kind);
        }

        if food.contains(new_head) {
            MoveOutcome::Ate(new_head)
        } else {
            MoveOutcome::Moved(new_head)
        }
    }

    /// Commit a planned move to the body
    pub fn apply(&mut self, outcome: MoveOutcome) {
        match outcome {
            MoveOutcome::Moved(new_head) => {
                self.body.insert(0, new_head);
                self.body.pop();
            }
            MoveOutcome::Ate(new_head) => {
                self.body.insert(0, new_head);
            }
            MoveOutcome::Stationary | MoveOutcome::Died(_) => {}
        }
    }

    pub fn die(&mut self) {
        self.alive = false;
    }
}

/// Complete simulation state
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationState {
    pub snakes: Vec<Snake>,
    pub food: FoodSet,
    pub rules: Rules,
    /// Ticks since the last reset
    pub tick: u64,
    /// Food items eaten since the last reset
    pub food_eaten: u32,
}

impl SimulationState {
    pub fn new(snakes: Vec<Snake>, food: FoodSet, rules: Rules) -> Self {
        Self {
            snakes,
            food,
            rules,
            tick: 0,
            food_eaten: 0,
        }
    }

    pub fn live_snakes(&self) -> impl Iterator<Item = &Snake> {
        self.snakes.iter().filter(|s| s.alive)
    }

    /// The human-controlled snake, if there is one
    pub fn player(&self) -> Option<&Snake> {
        self.snakes.first()
    }

    pub fn player_mut(&mut self) -> Option<&mut Snake> {
        self.snakes.first_mut()
    }

    pub fn all_dead(&self) -> bool {
        self.snakes.iter().all(|s| !s.alive)
    }

    pub fn longest_length(&self) -> usize {
        self.live_snakes().map(Snake::len).max().unwrap_or(0)
    }
}
