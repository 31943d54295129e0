//! Breadth-first shortest paths on the arena lattice
//!
//! Not used by the tick loop; the autonomous snakes steer greedily. This is
//! the exact alternative, kept as a standalone capability.

use std::collections::{HashMap, HashSet, VecDeque};

use super::action::Direction;
use super::arena::Arena;
use super::vector::Vec3;

/// Shortest-path search over a cubic lattice of cell centers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathFinder {
    /// Largest allowed absolute coordinate, inclusive
    max_coord: i32,
    cell_width: i32,
}

impl PathFinder {
    pub fn new(max_coord: i32, cell_width: i32) -> Self {
        Self {
            max_coord,
            cell_width,
        }
    }

    /// A finder covering exactly the in-bounds cells of `arena`
    pub fn for_arena(arena: &Arena) -> Self {
        Self::new(arena.max_coord(), arena.cell_width)
    }

    fn in_bounds(&self, pos: Vec3) -> bool {
        pos.to_array().iter().all(|c| c.abs() <= self.max_coord)
    }

    /// Find a shortest obstacle-free path from `start` to `end`
    ///
    /// Returns the direction of each step, in order. `Some(vec![])` when
    /// `start == end`, `None` when `end` cannot be reached.
    pub fn find_shortest(
        &self,
        start: Vec3,
        end: Vec3,
        obstacles: &HashSet<Vec3>,
    ) -> Option<Vec<Direction>> {
        // Each discovered cell maps to the cell it was reached from and how
        let mut parents: HashMap<Vec3, Option<(Vec3, Direction)>> = HashMap::new();
        let mut queue = VecDeque::new();

        parents.insert(start, None);
        queue.push_back(start);

        while let Some(pos) = queue.pop_front() {
            if pos == end {
                return Some(Self::path_to(&parents, end));
            }

            for dir in Direction::ALL {
                let next = pos + dir.delta() * self.cell_width;
                if !self.in_bounds(next) || obstacles.contains(&next) {
                    continue;
                }
                if parents.contains_key(&next) {
                    continue;
                }
                parents.insert(next, Some((pos, dir)));
                queue.push_back(next);
            }
        }

        None
    }

    fn path_to(parents: &HashMap<Vec3, Option<(Vec3, Direction)>>, end: Vec3) -> Vec<Direction> {
        let mut path = Vec::new();
        let mut cursor = end;
        while let Some(Some((parent, dir))) = parents.get(&cursor) {
            path.push(*dir);
            cursor = *parent;
        }
        path.reverse();
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn walk(start: Vec3, path: &[Direction], cell_width: i32) -> Vec3 {
        path.iter()
            .fold(start, |pos, dir| pos + dir.delta() * cell_width)
    }

    #[test]
    fn test_straight_line_without_obstacles() {
        let finder = PathFinder::new(40, 20);
        let start = Vec3::new(-40, 0, 0);
        let end = Vec3::new(40, 0, 0);

        let path = finder.find_shortest(start, end, &HashSet::new()).unwrap();
        assert_eq!(path.len() as i64, start.manhattan(end) / 20);
        assert!(path.iter().all(|d| *d == Direction::Right));
    }

    #[test]
    fn test_diagonal_path_has_manhattan_length() {
        let finder = PathFinder::new(2, 1);
        let start = Vec3::new(-2, -2, -2);
        let end = Vec3::new(2, 1, 0);

        let path = finder.find_shortest(start, end, &HashSet::new()).unwrap();
        assert_eq!(path.len() as i64, start.manhattan(end));
        assert_eq!(walk(start, &path, 1), end);
    }

    #[test]
    fn test_start_equals_end() {
        let finder = PathFinder::new(2, 1);
        let path = finder.find_shortest(Vec3::ZERO, Vec3::ZERO, &HashSet::new());
        assert_eq!(path, Some(vec![]));
    }

    #[test]
    fn test_walled_off_goal() {
        let finder = PathFinder::new(2, 1);
        let goal = Vec3::new(1, 1, 1);
        let obstacles: HashSet<Vec3> = Direction::ALL
            .iter()
            .map(|d| goal + d.delta())
            .collect();

        assert_eq!(finder.find_shortest(Vec3::ZERO, goal, &obstacles), None);
    }

    #[test]
    fn test_detours_around_obstacle() {
        let finder = PathFinder::new(2, 1);
        let start = Vec3::ZERO;
        let end = Vec3::new(2, 0, 0);
        let obstacles: HashSet<Vec3> = [Vec3::new(1, 0, 0)].into_iter().collect();

        let path = finder.find_shortest(start, end, &obstacles).unwrap();
        assert_eq!(path.len(), 4);
        assert_eq!(walk(start, &path, 1), end);

        let mut pos = start;
        for dir in &path {
            pos = pos + dir.delta();
            assert!(!obstacles.contains(&pos));
        }
    }

    #[test]
    fn test_goal_outside_bounds() {
        let finder = PathFinder::new(2, 1);
        assert_eq!(
            finder.find_shortest(Vec3::ZERO, Vec3::new(3, 0, 0), &HashSet::new()),
            None
        );
    }

    #[test]
    fn test_for_arena_matches_cell_grid() {
        let arena = Arena::from_cells(660, 11);
        let finder = PathFinder::for_arena(&arena);
        let start = arena.cell_center(-5, 0, 0);
        let end = arena.cell_center(5, 0, 0);

        let path = finder.find_shortest(start, end, &HashSet::new()).unwrap();
        assert_eq!(path.len(), 10);
    }
}
