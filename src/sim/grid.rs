//! Block and pill layout over a coarse cell grid
//!
//! The grid spans the whole world at `cell_size` pixels per cell. It is
//! generated once per session; afterwards only pill pickups mutate it.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::tuning::Density;

/// Contents of one grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CellKind {
    #[default]
    Empty,
    /// Solid, never changes once placed
    Block,
    /// Collectible, becomes Empty when picked up
    Pill,
}

/// Fixed-size cell grid (row-major)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<CellKind>,
    block_count: u32,
    pill_count: u32,
}

impl Grid {
    /// An all-empty grid
    pub fn empty(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![CellKind::Empty; rows * cols],
            block_count: 0,
            pill_count: 0,
        }
    }

    /// Generate a random layout
    ///
    /// Placement happens in three passes: floating blocks anywhere above the
    /// ground row, stacked blocks growing up from the ground row, then pills
    /// in any free cell. Targets that can't be met are silently under-delivered.
    pub fn generate<R: Rng + ?Sized>(
        rows: usize,
        cols: usize,
        density: &Density,
        rng: &mut R,
    ) -> Self {
        let mut grid = Self::empty(rows, cols);
        let total = grid.cells.len();
        if total == 0 {
            return grid;
        }

        let target = |fraction: f32| (total as f32 * fraction).round() as usize;
        let ground_row = rows - 1;

        // Floating blocks: occupied picks are skipped, not retried
        if ground_row > 0 {
            for _ in 0..target(density.air_block_fraction) {
                let row = rng.random_range(0..ground_row);
                let col = rng.random_range(0..cols);
                grid.place(row, col, CellKind::Block);
            }
        }

        // Stacked blocks: first free cell scanning up from the ground row
        for _ in 0..target(density.ground_block_fraction) {
            let col = rng.random_range(0..cols);
            if let Some(row) = (0..rows).rev().find(|&row| grid.get(row, col) == CellKind::Empty)
            {
                grid.place(row, col, CellKind::Block);
            }
        }

        // Pills: bounded attempts so sparse grids still terminate
        let pill_target = target(density.pill_fraction);
        let mut attempts = 2 * total;
        while (grid.pill_count as usize) < pill_target && attempts > 0 {
            attempts -= 1;
            let row = rng.random_range(0..rows);
            let col = rng.random_range(0..cols);
            grid.place(row, col, CellKind::Pill);
        }

        let block_target = target(density.air_block_fraction) + target(density.ground_block_fraction);
        if (grid.block_count as usize) < block_target || (grid.pill_count as usize) < pill_target {
            log::info!(
                "Layout under target: blocks {}/{}, pills {}/{}",
                grid.block_count,
                block_target,
                grid.pill_count,
                pill_target
            );
        }

        grid
    }

    /// Put `kind` into an empty cell; returns false if the cell was taken
    /// or out of range
    pub fn place(&mut self, row: usize, col: usize, kind: CellKind) -> bool {
        let Some(idx) = self.index(row, col) else {
            return false;
        };
        if self.cells[idx] != CellKind::Empty {
            return false;
        }
        self.cells[idx] = kind;
        match kind {
            CellKind::Block => self.block_count += 1,
            CellKind::Pill => self.pill_count += 1,
            CellKind::Empty => {}
        }
        true
    }

    /// Remove a pill; returns false if the cell holds no pill
    pub fn take_pill(&mut self, row: usize, col: usize) -> bool {
        match self.index(row, col) {
            Some(idx) if self.cells[idx] == CellKind::Pill => {
                self.cells[idx] = CellKind::Empty;
                self.pill_count -= 1;
                true
            }
            _ => false,
        }
    }

    /// Cell contents; Empty for anything out of range
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> CellKind {
        self.index(row, col)
            .map(|idx| self.cells[idx])
            .unwrap_or(CellKind::Empty)
    }

    #[inline]
    fn index(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.rows && col < self.cols).then(|| row * self.cols + col)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn block_count(&self) -> u32 {
        self.block_count
    }

    /// Pills still on the grid
    pub fn pill_count(&self) -> u32 {
        self.pill_count
    }

    /// Iterate rows of cells (top to bottom) for drawing
    pub fn iter_rows(&self) -> impl Iterator<Item = &[CellKind]> {
        // chunks(0) panics; an empty grid has no rows anyway
        self.cells.chunks(self.cols.max(1))
    }
}
