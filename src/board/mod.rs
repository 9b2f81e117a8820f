//! Board - occupancy grid and deterministic placement search

pub mod grid;
pub mod placement;

pub use grid::{Board, OccupiedCell};
pub use placement::{
    board_coord, closest_available_cell, first_available_cell, BENCH_ROW, CLOSEST_CELL_OFFSETS,
};
