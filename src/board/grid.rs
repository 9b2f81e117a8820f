//! Match board - fixed-size occupancy grid
//!
//! The board only records which unit sits in which cell. Keeping a unit's own
//! coordinate in sync with the board is the orchestrator's job.

use serde::{Deserialize, Serialize};

use crate::core::types::{Coord, UnitId};

/// An occupied cell returned by neighbourhood queries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OccupiedCell {
    pub coord: Coord,
    pub unit: UnitId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Board {
    width: usize,
    height: usize,
    cells: Vec<Option<UnitId>>,
}

impl Board {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![None; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn in_bounds(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<UnitId> {
        if self.in_bounds(x, y) {
            self.cells[y * self.width + x]
        } else {
            None
        }
    }

    /// Write a cell. Out-of-bounds writes are a caller defect.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, unit: Option<UnitId>) {
        debug_assert!(
            self.in_bounds(x, y),
            "board write at ({x}, {y}) outside {}x{}",
            self.width,
            self.height
        );
        if self.in_bounds(x, y) {
            self.cells[y * self.width + x] = unit;
        }
    }

    pub fn is_free(&self, x: usize, y: usize) -> bool {
        self.in_bounds(x, y) && self.get(x, y).is_none()
    }

    /// Occupied cells in the 8-neighbourhood of (x, y), clipped to the board
    pub fn adjacent_cells(&self, x: usize, y: usize) -> Vec<OccupiedCell> {
        let mut cells = Vec::with_capacity(8);
        for dy in -1i32..=1 {
            for dx in -1i32..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let Some(coord) = Coord::new(x, y).offset(dx, dy) else {
                    continue;
                };
                if let Some(unit) = self.get(coord.x, coord.y) {
                    cells.push(OccupiedCell { coord, unit });
                }
            }
        }
        cells
    }

    /// Find where a unit currently sits
    pub fn locate(&self, unit: UnitId) -> Option<Coord> {
        self.cells
            .iter()
            .position(|cell| *cell == Some(unit))
            .map(|idx| Coord::new(idx % self.width, idx / self.width))
    }

    /// All occupied cells in row-major order
    pub fn occupied(&self) -> impl Iterator<Item = OccupiedCell> + '_ {
        self.cells.iter().enumerate().filter_map(|(idx, cell)| {
            cell.map(|unit| OccupiedCell {
                coord: Coord::new(idx % self.width, idx / self.width),
                unit,
            })
        })
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    pub fn clear(&mut self) {
        self.cells.iter_mut().for_each(|cell| *cell = None);
    }
}
