//! Magic square grid.
//!
//! An N×N grid of optional values in `1..=N²`, each value placed at most
//! once. Cells are addressed by column `x` and row `y`, both 0-based.
//!
//! The grid keeps a reverse index from value to cell, so duplicate checks and
//! `position_of` are O(1).

use serde::Serialize;

use crate::core::{ConfigError, IllegalMove, Result};

/// Outcome of checking a grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Validity {
    /// Every row, column and both diagonals sum to the magic constant.
    Valid,
    /// The grid is full but at least one line has the wrong sum.
    Mistake,
    /// At least one value in `1..=N²` is not placed.
    Incomplete,
}

/// A line whose sum must equal the magic constant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Line {
    /// Row `y`.
    Row(usize),
    /// Column `x`.
    Column(usize),
    /// Top-left to bottom-right.
    Diagonal,
    /// Bottom-left to top-right.
    AntiDiagonal,
}

/// N×N magic square grid.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Grid {
    size: usize,
    /// Row-major, `y * size + x`.
    cells: Vec<Option<u32>>,
    /// Cell index of each value; slot 0 unused.
    #[serde(skip)]
    placed: Vec<Option<usize>>,
}

impl Grid {
    /// Create an empty grid of order `size`.
    ///
    /// ```
    /// use parlour::magic::Grid;
    ///
    /// let grid = Grid::new(3).unwrap();
    /// assert_eq!(grid.magic_constant(), 15);
    /// assert!(Grid::new(0).is_err());
    /// ```
    pub fn new(size: usize) -> Result<Self> {
        if size == 0 {
            return Err(ConfigError::ZeroGridSize.into());
        }
        let cell_count = size
            .checked_mul(size)
            .filter(|&count| u32::try_from(count).is_ok())
            .ok_or(ConfigError::GridTooLarge(size))?;

        Ok(Self {
            size,
            cells: vec![None; cell_count],
            placed: vec![None; cell_count + 1],
        })
    }

    /// Order of the square.
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Largest value that can be placed, N².
    #[must_use]
    pub fn max_value(&self) -> u32 {
        // Bounded by `Grid::new`.
        self.cells.len() as u32
    }

    /// Required sum of every line, N·(N²+1)/2.
    #[must_use]
    pub fn magic_constant(&self) -> u64 {
        let n = self.size as u64;
        n * (n * n + 1) / 2
    }

    /// Value at a cell, `None` when empty or out of bounds.
    #[must_use]
    pub fn value(&self, x: usize, y: usize) -> Option<u32> {
        self.index(x, y).ok().and_then(|i| self.cells[i])
    }

    /// Cell holding `value`, as `(x, y)`.
    #[must_use]
    pub fn position_of(&self, value: u32) -> Option<(usize, usize)> {
        let index = (*self.placed.get(value as usize)?)?;
        Some((index % self.size, index / self.size))
    }

    /// Number of values currently placed.
    #[must_use]
    pub fn placed_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// True when every cell holds a value.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// Rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Option<u32>]> {
        self.cells.chunks(self.size)
    }

    /// Set or clear a cell.
    ///
    /// Fails without changing anything when the cell is out of bounds, the
    /// value is outside `1..=N²`, or the value is already placed in another
    /// cell. Clearing a cell frees its value for reuse.
    pub fn set_value(&mut self, x: usize, y: usize, value: Option<u32>) -> Result<()> {
        let index = self.index(x, y)?;

        if let Some(value) = value {
            if value == 0 || value > self.max_value() {
                return Err(IllegalMove::ValueOutOfRange {
                    value,
                    max: self.max_value(),
                }
                .into());
            }
            match self.placed[value as usize] {
                Some(at) if at == index => return Ok(()),
                Some(at) => {
                    return Err(IllegalMove::DuplicateValue {
                        value,
                        x: at % self.size,
                        y: at / self.size,
                    }
                    .into())
                }
                None => {}
            }
        }

        if let Some(old) = self.cells[index] {
            self.placed[old as usize] = None;
        }
        self.cells[index] = value;
        if let Some(value) = value {
            self.placed[value as usize] = Some(index);
        }
        Ok(())
    }

    /// Move `new` into the cell currently holding `old`.
    pub fn change_value(&mut self, old: u32, new: Option<u32>) -> Result<()> {
        let (x, y) = self
            .position_of(old)
            .ok_or(IllegalMove::ValueNotPlaced(old))?;
        self.set_value(x, y, new)
    }

    /// Empty every cell.
    pub fn clear(&mut self) {
        self.cells.fill(None);
        self.placed.fill(None);
    }

    /// All 2N+2 lines, rows first, then columns, then both diagonals.
    #[must_use]
    pub fn lines(&self) -> Vec<Line> {
        (0..self.size)
            .map(Line::Row)
            .chain((0..self.size).map(Line::Column))
            .chain([Line::Diagonal, Line::AntiDiagonal])
            .collect()
    }

    /// Sum of a line, `None` while any of its cells is empty.
    #[must_use]
    pub fn line_sum(&self, line: Line) -> Option<u64> {
        let n = self.size;
        (0..n)
            .map(|i| {
                let (x, y) = match line {
                    Line::Row(y) => (i, y),
                    Line::Column(x) => (x, i),
                    Line::Diagonal => (i, i),
                    Line::AntiDiagonal => (i, n - 1 - i),
                };
                self.value(x, y).map(u64::from)
            })
            .sum()
    }

    /// Every complete line and its sum.
    #[must_use]
    pub fn line_sums(&self) -> Vec<(Line, u64)> {
        self.lines()
            .into_iter()
            .filter_map(|line| self.line_sum(line).map(|sum| (line, sum)))
            .collect()
    }

    /// Complete lines whose sum differs from the magic constant.
    #[must_use]
    pub fn mistakes(&self) -> Vec<Line> {
        let constant = self.magic_constant();
        self.line_sums()
            .into_iter()
            .filter(|&(_, sum)| sum != constant)
            .map(|(line, _)| line)
            .collect()
    }

    /// Check the magic square property.
    #[must_use]
    pub fn check_validity(&self) -> Validity {
        if !self.is_full() {
            return Validity::Incomplete;
        }
        let constant = self.magic_constant();
        let wrong = self
            .lines()
            .into_iter()
            .any(|line| self.line_sum(line) != Some(constant));
        if wrong {
            Validity::Mistake
        } else {
            Validity::Valid
        }
    }

    fn index(&self, x: usize, y: usize) -> std::result::Result<usize, IllegalMove> {
        if x >= self.size || y >= self.size {
            return Err(IllegalMove::CellOutOfBounds {
                x,
                y,
                size: self.size,
            });
        }
        Ok(y * self.size + x)
    }
}

impl std::fmt::Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let width = self.max_value().to_string().len();
        for row in self.rows() {
            let cells: Vec<String> = row
                .iter()
                .map(|cell| match cell {
                    Some(v) => format!("{v:>width$}"),
                    None => format!("{:>width$}", "."),
                })
                .collect();
            writeln!(f, "{}", cells.join(" "))?;
        }
        Ok(())
    }
}
