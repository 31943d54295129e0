use serde::{Deserialize, Serialize};

use super::vector::{Axis, Vec3};

/// Direction the snake can move
///
/// Screen-relative names: x grows to the right, y grows downward and z grows
/// toward the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
    Away,
    Towards,
}

impl Direction {
    /// Negative directions first, then positive, each in x, y, z order
    pub const ALL: [Direction; 6] = [
        Direction::Left,
        Direction::Up,
        Direction::Away,
        Direction::Right,
        Direction::Down,
        Direction::Towards,
    ];

    /// Returns the direction pointing the other way
    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Away => Direction::Towards,
            Direction::Towards => Direction::Away,
        }
    }

    /// Returns true if turning from self to other would be a 180-degree turn
    pub fn is_opposite(&self, other: Direction) -> bool {
        self.opposite() == other
    }

    /// Returns the unit delta for moving in this direction
    pub fn delta(&self) -> Vec3 {
        match self {
            Direction::Left => Vec3::new(-1, 0, 0),
            Direction::Right => Vec3::new(1, 0, 0),
            Direction::Up => Vec3::new(0, -1, 0),
            Direction::Down => Vec3::new(0, 1, 0),
            Direction::Away => Vec3::new(0, 0, -1),
            Direction::Towards => Vec3::new(0, 0, 1),
        }
    }

    pub fn axis(&self) -> Axis {
        match self {
            Direction::Left | Direction::Right => Axis::X,
            Direction::Up | Direction::Down => Axis::Y,
            Direction::Away | Direction::Towards => Axis::Z,
        }
    }

    /// Direction along `axis` with the sign of `value`, or `None` for zero
    pub fn from_axis(axis: Axis, value: i32) -> Option<Direction> {
        let dir = match (axis, value.signum()) {
            (_, 0) => return None,
            (Axis::X, -1) => Direction::Left,
            (Axis::X, _) => Direction::Right,
            (Axis::Y, -1) => Direction::Up,
            (Axis::Y, _) => Direction::Down,
            (Axis::Z, -1) => Direction::Away,
            (Axis::Z, _) => Direction::Towards,
        };
        Some(dir)
    }

    /// Inverse of [`Direction::delta`]
    pub fn from_delta(delta: Vec3) -> Option<Direction> {
        Direction::ALL.into_iter().find(|d| d.delta() == delta)
    }
}

/// Action that can be taken by the player snake
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Move in a specific direction
    Move(Direction),
    /// Continue in current direction
    Continue,
}

impl From<Direction> for Action {
    fn from(direction: Direction) -> Self {
        Action::Move(direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite_directions() {
        assert!(Direction::Up.is_opposite(Direction::Down));
        assert!(Direction::Left.is_opposite(Direction::Right));
        assert!(Direction::Away.is_opposite(Direction::Towards));
        assert!(Direction::Towards.is_opposite(Direction::Away));

        assert!(!Direction::Up.is_opposite(Direction::Left));
        assert!(!Direction::Away.is_opposite(Direction::Right));
        assert!(!Direction::Up.is_opposite(Direction::Up));
    }

    #[test]
    fn test_direction_delta() {
        assert_eq!(Direction::Up.delta(), Vec3::new(0, -1, 0));
        assert_eq!(Direction::Down.delta(), Vec3::new(0, 1, 0));
        assert_eq!(Direction::Left.delta(), Vec3::new(-1, 0, 0));
        assert_eq!(Direction::Right.delta(), Vec3::new(1, 0, 0));
        assert_eq!(Direction::Away.delta(), Vec3::new(0, 0, -1));
        assert_eq!(Direction::Towards.delta(), Vec3::new(0, 0, 1));
    }

    #[test]
    fn test_opposite_delta_is_negated() {
        for dir in Direction::ALL {
            assert_eq!(dir.opposite().delta(), -dir.delta());
            assert_eq!(Direction::from_delta(dir.delta()), Some(dir));
        }
    }

    #[test]
    fn test_from_axis() {
        assert_eq!(Direction::from_axis(Axis::X, 40), Some(Direction::Right));
        assert_eq!(Direction::from_axis(Axis::Y, -3), Some(Direction::Up));
        assert_eq!(Direction::from_axis(Axis::Z, -1), Some(Direction::Away));
        assert_eq!(Direction::from_axis(Axis::Z, 0), None);
        for dir in Direction::ALL {
            assert_eq!(dir.delta().get(dir.axis()).abs(), 1);
        }
    }
}
