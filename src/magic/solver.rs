//! Constructive magic square solvers.
//!
//! - Odd orders: a siamese-style walk
//! - Orders divisible by 4: Strachey's complement pattern
//! - Orders ≡ 2 (mod 4): unsupported, reported as `Error::UnsupportedOrder`

use serde::Serialize;
use tracing::{debug, instrument, warn};

use crate::core::{Error, Result};

use super::grid::Grid;

/// Constructive method used by `solve`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Method {
    /// Odd orders.
    Siamese,
    /// Orders divisible by 4.
    Strachey,
}

/// Complement mask applied to every 4×4 block, row-major.
const COMPLEMENT: [[bool; 4]; 4] = [
    [true, false, false, true],
    [false, true, true, false],
    [false, true, true, false],
    [true, false, false, true],
];

/// Clear the grid and fill it with a magic square.
///
/// On `Err` the grid is left empty.
///
/// ```
/// use parlour::magic::{solve, Grid, Method, Validity};
///
/// let mut grid = Grid::new(5).unwrap();
/// assert_eq!(solve(&mut grid).unwrap(), Method::Siamese);
/// assert_eq!(grid.check_validity(), Validity::Valid);
///
/// let mut grid = Grid::new(6).unwrap();
/// assert!(solve(&mut grid).is_err());
/// assert_eq!(grid.placed_count(), 0);
/// ```
#[instrument(skip(grid), fields(size = grid.size()))]
pub fn solve(grid: &mut Grid) -> Result<Method> {
    let size = grid.size();

    let method = if size % 2 == 1 {
        solve_odd(grid).map(|()| Method::Siamese)
    } else if size % 4 == 0 {
        solve_mul4(grid).map(|()| Method::Strachey)
    } else {
        grid.clear();
        warn!(size, "no constructive method for this order");
        Err(Error::UnsupportedOrder { size })
    }?;

    debug!(?method, validity = ?grid.check_validity(), "solved");
    Ok(method)
}

/// Fill an odd-order grid.
///
/// Starting at column 0 of the middle row, each next value goes two columns
/// right and one row up, wrapping at the edges. When that cell is taken the
/// value goes one column right on the same row instead.
///
/// The grid is cleared first and left empty on `Err`.
pub fn solve_odd(grid: &mut Grid) -> Result<()> {
    grid.clear();
    let n = grid.size();
    if n % 2 != 1 {
        return Err(Error::UnsupportedOrder { size: n });
    }
    let filled = fill_odd(grid);
    if filled.is_err() {
        grid.clear();
    }
    filled
}

fn fill_odd(grid: &mut Grid) -> Result<()> {
    let n = grid.size();
    let last = grid.max_value();
    let (mut x, mut y) = (0, n / 2);
    for value in 1..=last {
        grid.set_value(x, y, Some(value))?;
        if value == last {
            break;
        }

        let (next_x, next_y) = ((x + 2) % n, (y + n - 1) % n);
        if grid.value(next_x, next_y).is_none() {
            (x, y) = (next_x, next_y);
            continue;
        }
        let next_x = (x + 1) % n;
        if grid.value(next_x, y).is_some() {
            warn!(value, "placement walk blocked before the grid was full");
            break;
        }
        x = next_x;
    }
    Ok(())
}

/// Fill a grid whose order is a multiple of 4.
///
/// Numbers `1..=N²` are laid out row-major; within every 4×4 block the cells
/// marked in the complement mask receive `N² + 1 - value` instead.
///
/// The grid is cleared first and left empty on `Err`.
pub fn solve_mul4(grid: &mut Grid) -> Result<()> {
    grid.clear();
    let n = grid.size();
    if n % 4 != 0 {
        return Err(Error::UnsupportedOrder { size: n });
    }
    let filled = fill_mul4(grid);
    if filled.is_err() {
        grid.clear();
    }
    filled
}

fn fill_mul4(grid: &mut Grid) -> Result<()> {
    let n = grid.size();
    let complement = grid.max_value() + 1;
    for y in 0..n {
        for x in 0..n {
            let value = (y * n + x + 1) as u32;
            let value = if COMPLEMENT[y % 4][x % 4] {
                complement - value
            } else {
                value
            };
            grid.set_value(x, y, Some(value))?;
        }
    }
    Ok(())
}
