//! Placement search on the match board
//!
//! Source rosters store positions as (x, y) with y in `1..=height`; row 0 is
//! the bench. Blue maps row `y` to board row `y - 1`, Red is mirrored so its
//! front line faces Blue's.
//!
//! The offset list below is a deterministic tie-break. Clones are placed next
//! to their template by walking it in order, so reordering entries changes
//! where summons land.

use crate::board::grid::Board;
use crate::core::types::{Coord, Team};

/// Source row that marks a benched unit
pub const BENCH_ROW: usize = 0;

/// Candidate offsets for `closest_available_cell`, in priority order.
///
/// Center, orthogonal neighbours, diagonal neighbours, then rings 2 and 3.
/// `dy` is in the owning team's forward frame and gets mirrored for Red.
pub const CLOSEST_CELL_OFFSETS: [(i32, i32); 49] = [
    // ring 0
    (0, 0),
    // ring 1
    (-1, 0),
    (1, 0),
    (0, -1),
    (0, 1),
    (-1, -1),
    (1, -1),
    (-1, 1),
    (1, 1),
    // ring 2
    (-2, 0),
    (2, 0),
    (0, -2),
    (0, 2),
    (-2, -1),
    (2, -1),
    (-2, 1),
    (2, 1),
    (-1, -2),
    (1, -2),
    (-1, 2),
    (1, 2),
    (-2, -2),
    (2, -2),
    (-2, 2),
    (2, 2),
    // ring 3
    (-3, 0),
    (3, 0),
    (0, -3),
    (0, 3),
    (-3, -1),
    (3, -1),
    (-3, 1),
    (3, 1),
    (-1, -3),
    (1, -3),
    (-1, 3),
    (1, 3),
    (-3, -2),
    (3, -2),
    (-3, 2),
    (3, 2),
    (-2, -3),
    (2, -3),
    (-2, 3),
    (2, 3),
    (-3, -3),
    (3, -3),
    (-3, 3),
    (3, 3),
];

/// Board cell for a source-roster position.
///
/// Returns `None` for benched units and rows past the board.
pub fn board_coord(source_x: usize, source_y: usize, team: Team, height: usize) -> Option<Coord> {
    if source_y == BENCH_ROW || source_y > height {
        return None;
    }
    let y = match team {
        Team::Blue => source_y - 1,
        Team::Red => height - source_y,
    };
    Some(Coord::new(source_x, y))
}

/// First empty cell in the team's scan order.
///
/// Both sides scan rows from 0 upward. Blue walks each row left to right,
/// Red walks it right to left, so the two picks only meet when the first
/// row with free cells has exactly one.
pub fn first_available_cell(board: &Board, team: Team) -> Option<Coord> {
    let width = board.width();
    (0..board.height())
        .flat_map(|y| {
            (0..width).map(move |i| match team {
                Team::Blue => Coord::new(i, y),
                Team::Red => Coord::new(width - 1 - i, y),
            })
        })
        .find(|c| board.is_free(c.x, c.y))
}

/// Closest empty cell to a source-roster position, walking
/// [`CLOSEST_CELL_OFFSETS`] in order and falling back to
/// [`first_available_cell`]. `None` only when the board is full.
pub fn closest_available_cell(
    board: &Board,
    source_x: usize,
    source_y: usize,
    team: Team,
) -> Option<Coord> {
    let height = board.height() as i32;
    // Benched references sit just behind the team's own back row
    let base_row = match team {
        Team::Blue => source_y as i32 - 1,
        Team::Red => height - source_y as i32,
    };

    for (dx, dy) in CLOSEST_CELL_OFFSETS {
        let x = source_x as i32 + dx;
        let y = match team {
            Team::Blue => base_row + dy,
            Team::Red => base_row - dy,
        };
        if x < 0 || y < 0 {
            continue;
        }
        let (x, y) = (x as usize, y as usize);
        if board.is_free(x, y) {
            return Some(Coord::new(x, y));
        }
    }

    first_available_cell(board, team)
}
