/// Convert a grid number into zero-indexed `(x, y)` coordinates.
///
/// Grid numbers are assigned in reading order:
///
/// ```text
///  1 | 2 | 3
/// ---+---+---
///  4 | 5 | 6
/// ---+---+---
///  7 | 8 | 9
/// ```
///
/// Only defined for grid numbers 1 to 9.
pub fn to_coord(n: u8) -> (u8, u8) {
    debug_assert!((1..=9).contains(&n), "to_coord called with {}", n);
    ((n - 1) % 3, (n - 1) / 3)
}

/// Convert `(x, y)` coordinates into a grid number. Inverse of [`to_coord()`].
pub fn to_number(x: u8, y: u8) -> u8 {
    debug_assert!(x < 3 && y < 3, "to_number called with ({}, {})", x, y);
    y * 3 + 1 + x
}

/// Combine a sub-board number and a cell number into a global move,
/// e.g. `(5, 5)` becomes `55`.
pub fn encode_move(outer: u8, inner: u8) -> u8 {
    outer * 10 + inner
}

/// Split a global move into its sub-board and cell numbers.
///
/// Returns `None` if either digit is outside of 1 to 9.
pub fn decode_move(global_move: u8) -> Option<(u8, u8)> {
    let (outer, inner) = (global_move / 10, global_move % 10);
    ((1..=9).contains(&outer) && (1..=9).contains(&inner)).then_some((outer, inner))
}

pub(crate) fn is_grid_number(n: u8) -> bool {
    (1..=9).contains(&n)
}
