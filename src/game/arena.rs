use serde::{Deserialize, Serialize};

use super::vector::Vec3;

/// The cubic play volume, centered at the origin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Arena {
    /// Total edge length of the cube in world units
    pub arena_width: i32,
    /// Grid spacing in world units
    pub cell_width: i32,
}

impl Arena {
    pub fn new(arena_width: i32, cell_width: i32) -> Self {
        Self {
            arena_width,
            cell_width,
        }
    }

    /// Arena whose cell width is the arena width split into `cells` rounded cells
    pub fn from_cells(arena_width: i32, cells: usize) -> Self {
        let cells = cells.max(1) as f64;
        let cell_width = (arena_width as f64 / cells).round().max(1.0) as i32;
        Self::new(arena_width, cell_width)
    }

    /// True iff every coordinate satisfies `|c| < arena_width / 2`
    pub fn is_in_bounds(&self, pos: Vec3) -> bool {
        pos.to_array()
            .iter()
            .all(|c| 2 * (*c as i64).abs() < self.arena_width as i64)
    }

    /// Same check for an arbitrary point in world space
    pub fn contains_point(&self, x: f64, y: f64, z: f64) -> bool {
        let half = self.arena_width as f64 / 2.0;
        [x, y, z].iter().all(|c| c.abs() < half)
    }

    /// Largest `k` such that `k * cell_width` is in bounds
    pub fn max_cell_index(&self) -> i32 {
        if self.cell_width <= 0 {
            return 0;
        }
        // 2 * k * cw < w  <=>  k < w / (2 * cw)
        let k = (self.arena_width - 1) / (2 * self.cell_width);
        k.max(0)
    }

    /// Largest in-bounds coordinate of any cell center
    pub fn max_coord(&self) -> i32 {
        self.max_cell_index() * self.cell_width
    }

    /// Number of usable cells along one axis
    pub fn cells_per_axis(&self) -> usize {
        (2 * self.max_cell_index() + 1) as usize
    }

    /// World position of the cell with integer indices `(i, j, k)`
    pub fn cell_center(&self, i: i32, j: i32, k: i32) -> Vec3 {
        Vec3::new(i, j, k) * self.cell_width
    }

    /// Every in-bounds cell center
    pub fn cell_centers(&self) -> impl Iterator<Item = Vec3> + '_ {
        let m = self.max_cell_index();
        (-m..=m).flat_map(move |i| {
            (-m..=m).flat_map(move |j| (-m..=m).map(move |k| self.cell_center(i, j, k)))
        })
    }

    /// Cell index along one axis for a world coordinate
    pub fn cell_index(&self, coord: i32) -> i32 {
        coord.div_euclid(self.cell_width.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_are_strict() {
        let arena = Arena::new(10, 1);
        assert!(arena.is_in_bounds(Vec3::new(4, -4, 0)));
        assert!(!arena.is_in_bounds(Vec3::new(5, 0, 0)));
        assert!(!arena.is_in_bounds(Vec3::new(0, -5, 0)));
        assert!(!arena.is_in_bounds(Vec3::new(0, 0, 6)));
    }

    #[test]
    fn test_half_width_boundary_with_epsilon() {
        let arena = Arena::new(10, 1);
        assert!(!arena.contains_point(5.0, 0.0, 0.0));
        assert!(arena.contains_point(5.0 - 1e-9, 0.0, 0.0));
        assert!(arena.contains_point(0.0, -(5.0 - 1e-9), 5.0 - 1e-9));
    }

    #[test]
    fn test_odd_width_boundary() {
        // arena_width / 2 == 5.5, so 5 is in and 6 is out
        let arena = Arena::new(11, 1);
        assert!(arena.is_in_bounds(Vec3::new(5, 5, 5)));
        assert!(!arena.is_in_bounds(Vec3::new(6, 0, 0)));
    }

    #[test]
    fn test_from_cells() {
        let arena = Arena::from_cells(660, 11);
        assert_eq!(arena.cell_width, 60);
        assert_eq!(arena.max_cell_index(), 5);
        assert_eq!(arena.max_coord(), 300);
        assert_eq!(arena.cells_per_axis(), 11);
    }

    #[test]
    fn test_even_cell_count_loses_outer_layer() {
        // Cell centers sit on multiples of the cell width, so with an even
        // count the outermost layer on one side would touch the wall.
        let arena = Arena::from_cells(200, 10);
        assert_eq!(arena.cell_width, 20);
        assert_eq!(arena.max_cell_index(), 4);
        assert!(arena.is_in_bounds(Vec3::new(80, 0, 0)));
        assert!(!arena.is_in_bounds(Vec3::new(100, 0, 0)));
    }

    #[test]
    fn test_cell_centers_all_in_bounds() {
        let arena = Arena::from_cells(60, 3);
        let centers: Vec<Vec3> = arena.cell_centers().collect();
        assert_eq!(centers.len(), 27);
        assert!(centers.iter().all(|c| arena.is_in_bounds(*c)));
        assert!(centers.contains(&Vec3::new(-20, 20, 0)));
    }
}
