//! Grid collision queries for the character's hitbox
//!
//! All lookups go through [`cell_at`], which maps a world pixel to its cell
//! by integer division and treats anything off-grid as empty. Block tests
//! only probe the four hitbox corners, so a box can straddle a block narrower
//! than itself without touching it.

use glam::IVec2;

use super::grid::{CellKind, Grid};

/// Axis-aligned box in world pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hitbox {
    /// Top-left corner
    pub origin: IVec2,
    pub size: IVec2,
}

impl Hitbox {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            origin: IVec2::new(x, y),
            size: IVec2::new(width, height),
        }
    }

    /// Last pixel covered on each axis
    #[inline]
    pub fn max(&self) -> IVec2 {
        self.origin + self.size - IVec2::ONE
    }

    /// Top-left, top-right, bottom-left, bottom-right
    pub fn corners(&self) -> [IVec2; 4] {
        let min = self.origin;
        let max = self.max();
        [
            min,
            IVec2::new(max.x, min.y),
            IVec2::new(min.x, max.y),
            max,
        ]
    }
}

/// Result of a ground support probe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Support {
    /// Row of the supporting block
    pub row: usize,
    /// y that rests the box exactly on top of that row
    pub rest_y: i32,
}

/// Map a world pixel to (row, col); None when off-grid
#[inline]
pub fn cell_index(grid: &Grid, cell_size: i32, pos: IVec2) -> Option<(usize, usize)> {
    if pos.x < 0 || pos.y < 0 {
        return None;
    }
    let row = (pos.y / cell_size) as usize;
    let col = (pos.x / cell_size) as usize;
    (row < grid.rows() && col < grid.cols()).then_some((row, col))
}

/// Cell at a world pixel; Empty outside the grid
#[inline]
pub fn cell_at(grid: &Grid, cell_size: i32, pos: IVec2) -> CellKind {
    cell_index(grid, cell_size, pos)
        .map(|(row, col)| grid.get(row, col))
        .unwrap_or(CellKind::Empty)
}

/// True if any hitbox corner lies in a Block cell
pub fn box_collides_block(grid: &Grid, cell_size: i32, hitbox: &Hitbox) -> bool {
    hitbox
        .corners()
        .iter()
        .any(|&corner| cell_at(grid, cell_size, corner) == CellKind::Block)
}

/// Block directly under either bottom corner (one pixel below the box)
pub fn ground_support(grid: &Grid, cell_size: i32, hitbox: &Hitbox) -> Option<Support> {
    let probe_y = hitbox.origin.y + hitbox.size.y;
    let max = hitbox.max();
    [IVec2::new(hitbox.origin.x, probe_y), IVec2::new(max.x, probe_y)]
        .into_iter()
        .find(|&probe| cell_at(grid, cell_size, probe) == CellKind::Block)
        .map(|probe| {
            let row = (probe.y / cell_size) as usize;
            Support {
                row,
                rest_y: row as i32 * cell_size - hitbox.size.y,
            }
        })
}

/// True if the box stands on a Block
#[inline]
pub fn has_ground_support(grid: &Grid, cell_size: i32, hitbox: &Hitbox) -> bool {
    ground_support(grid, cell_size, hitbox).is_some()
}

/// Remove every pill in a cell the box overlaps
///
/// Returns the (row, col) of each pill taken. Each cell is visited once, so
/// a box spanning several cells never counts a pill twice.
pub fn collect_pills(grid: &mut Grid, cell_size: i32, hitbox: &Hitbox) -> Vec<(usize, usize)> {
    let min = hitbox.origin.max(IVec2::ZERO);
    let max = hitbox.max();
    if max.x < 0 || max.y < 0 {
        return Vec::new();
    }

    let rows = (min.y / cell_size) as usize..=(max.y / cell_size) as usize;
    let cols = (min.x / cell_size) as usize..=(max.x / cell_size) as usize;

    let mut taken = Vec::new();
    for row in rows {
        for col in cols.clone() {
            if grid.take_pill(row, col) {
                taken.push((row, col));
            }
        }
    }
    taken
}

#[cfg(test)]
mod tests {
    use super::*;

    const CELL: i32 = 10;

    fn grid_with(cells: &[(usize, usize, CellKind)]) -> Grid {
        let mut grid = Grid::empty(6, 39);
        for &(row, col, kind) in cells {
            assert!(grid.place(row, col, kind));
        }
        grid
    }

    #[test]
    fn test_cell_at_maps_by_division() {
        let grid = grid_with(&[(2, 3, CellKind::Block)]);
        assert_eq!(cell_at(&grid, CELL, IVec2::new(30, 20)), CellKind::Block);
        assert_eq!(cell_at(&grid, CELL, IVec2::new(39, 29)), CellKind::Block);
        assert_eq!(cell_at(&grid, CELL, IVec2::new(40, 29)), CellKind::Empty);
    }

    #[test]
    fn test_cell_at_off_grid_is_empty() {
        let grid = grid_with(&[(0, 0, CellKind::Block)]);
        assert_eq!(cell_at(&grid, CELL, IVec2::new(-1, 0)), CellKind::Empty);
        assert_eq!(cell_at(&grid, CELL, IVec2::new(0, -5)), CellKind::Empty);
        assert_eq!(cell_at(&grid, CELL, IVec2::new(1000, 10)), CellKind::Empty);
        assert_eq!(cell_at(&grid, CELL, IVec2::new(10, 60)), CellKind::Empty);
    }

    #[test]
    fn test_corner_collision() {
        let grid = grid_with(&[(4, 5, CellKind::Block)]);
        // Bottom-right corner (59, 49) lands in row 4, col 5
        assert!(box_collides_block(&grid, CELL, &Hitbox::new(50, 40, 10, 10)));
        // Box just left of the block
        assert!(!box_collides_block(&grid, CELL, &Hitbox::new(40, 40, 10, 10)));
        // One pixel overlap on the right edge
        assert!(box_collides_block(&grid, CELL, &Hitbox::new(41, 40, 10, 10)));
    }

    #[test]
    fn test_corners_miss_thin_straddled_block() {
        // Box 21 wide straddles col 2 without any corner inside it
        let grid = grid_with(&[(1, 2, CellKind::Block)]);
        let wide = Hitbox::new(15, 10, 21, 5);
        assert!(!box_collides_block(&grid, CELL, &wide));
    }

    #[test]
    fn test_pills_do_not_collide() {
        let grid = grid_with(&[(4, 5, CellKind::Pill)]);
        assert!(!box_collides_block(&grid, CELL, &Hitbox::new(50, 40, 10, 10)));
    }

    #[test]
    fn test_ground_support_snaps_to_row_top() {
        let grid = grid_with(&[(5, 3, CellKind::Block)]);
        // Box bottom at y=49, probe y=50 is row 5
        let support = ground_support(&grid, CELL, &Hitbox::new(25, 40, 10, 10)).unwrap();
        assert_eq!(support.row, 5);
        assert_eq!(support.rest_y, 40);

        // Sunk 3px into the block still rests on its top
        let support = ground_support(&grid, CELL, &Hitbox::new(25, 43, 10, 10)).unwrap();
        assert_eq!(support.rest_y, 40);

        // Standing beside it
        assert!(!has_ground_support(&grid, CELL, &Hitbox::new(40, 40, 10, 10)));
    }

    #[test]
    fn test_collect_multi_cell_overlap() {
        let mut grid = grid_with(&[
            (3, 2, CellKind::Pill),
            (3, 3, CellKind::Pill),
            (4, 2, CellKind::Pill),
            (4, 4, CellKind::Pill),
            (3, 4, CellKind::Block),
        ]);
        // Box 25..34 x 35..44 covers rows 3-4, cols 2-3
        let taken = collect_pills(&mut grid, CELL, &Hitbox::new(25, 35, 10, 10));
        assert_eq!(taken, vec![(3, 2), (3, 3), (4, 2)]);
        assert_eq!(grid.pill_count(), 1);
        assert_eq!(grid.get(4, 4), CellKind::Pill);
        assert_eq!(grid.get(3, 4), CellKind::Block);

        // Same box again takes nothing
        assert!(collect_pills(&mut grid, CELL, &Hitbox::new(25, 35, 10, 10)).is_empty());
    }

    #[test]
    fn test_collect_partially_off_grid() {
        let mut grid = grid_with(&[(0, 0, CellKind::Pill)]);
        let taken = collect_pills(&mut grid, CELL, &Hitbox::new(-5, -5, 10, 10));
        assert_eq!(taken, vec![(0, 0)]);
        assert!(collect_pills(&mut grid, CELL, &Hitbox::new(-20, -20, 10, 10)).is_empty());
    }
}
