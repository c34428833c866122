//! Spiral progress fill
//!
//! The matrix doubles as a 64-step progress bar. Cells light in a
//! fixed order that walks the 8x8 grid from the outer ring inward,
//! clockwise from the top-left corner, covering every cell exactly
//! once.

use crate::config::MATRIX_CELLS;
use crate::traits::{DisplayError, DotMatrix};

/// Fill order for the 8x8 matrix as (row, column) pairs
#[rustfmt::skip]
pub const SPIRAL_ORDER: [(u8, u8); MATRIX_CELLS] = [
    // Outer ring
    (0, 0), (0, 1), (0, 2), (0, 3), (0, 4), (0, 5), (0, 6), (0, 7),
    (1, 7), (2, 7), (3, 7), (4, 7), (5, 7), (6, 7), (7, 7),
    (7, 6), (7, 5), (7, 4), (7, 3), (7, 2), (7, 1), (7, 0),
    (6, 0), (5, 0), (4, 0), (3, 0), (2, 0), (1, 0),
    // Second ring
    (1, 1), (1, 2), (1, 3), (1, 4), (1, 5), (1, 6),
    (2, 6), (3, 6), (4, 6), (5, 6), (6, 6),
    (6, 5), (6, 4), (6, 3), (6, 2), (6, 1),
    (5, 1), (4, 1), (3, 1), (2, 1),
    // Third ring
    (2, 2), (2, 3), (2, 4), (2, 5),
    (3, 5), (4, 5), (5, 5),
    (5, 4), (5, 3), (5, 2),
    (4, 2), (3, 2),
    // Center block
    (3, 3), (3, 4), (4, 4), (4, 3),
];

/// Light the first `count` cells of the spiral
///
/// `count` is clamped to the cell total. Cells are only switched on,
/// never off; callers clear the matrix first for a full redraw.
pub fn fill_cells<M: DotMatrix>(matrix: &mut M, count: usize) -> Result<(), DisplayError> {
    for &(row, col) in SPIRAL_ORDER.iter().take(count) {
        matrix.set_cell(row, col, true)?;
    }
    Ok(())
}
