//! Magic square grid and constructive solver.
//!
//! A `Grid` holds user-entered or solver-placed values and checks the magic
//! square property: every row, column and both main diagonals sum to
//! N·(N²+1)/2. `solve` fills a grid for every odd order and every order
//! divisible by 4.

pub mod grid;
pub mod solver;

pub use grid::{Grid, Line, Validity};
pub use solver::{solve, solve_mul4, solve_odd, Method};
