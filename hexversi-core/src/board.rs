//! Hex board geometry with axial coordinates
//!
//! The board is a hexagon of `size` rows (odd, at least 5). Row `i` holds the
//! cells with `r = i - size / 2`, ordered by ascending `q`. The top half grows
//! from `size / 2 + 1` cells up to `size` at the middle row, then shrinks back.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ReversiError};

/// Smallest playable board
pub const MIN_ROWS: usize = 5;

/// Axial hex coordinates; `s` is derived as `-q - r`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Hex {
    pub q: i32,
    pub r: i32,
}

impl Hex {
    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    /// Third axial coordinate
    pub const fn s(&self) -> i32 {
        -self.q - self.r
    }

    /// Build a hex from its `s` and `r` coordinates
    pub const fn from_s(s: i32, r: i32) -> Self {
        Self { q: -r - s, r }
    }
}

impl fmt::Display for Hex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.q, self.r)
    }
}

/// Disc owned by one of the two players. `O` moves first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    O,
    X,
}

impl Mark {
    pub fn opponent(self) -> Self {
        match self {
            Mark::O => Mark::X,
            Mark::X => Mark::O,
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mark::O => f.write_str("O"),
            Mark::X => f.write_str("X"),
        }
    }
}

/// What sits on a cell
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Occupant {
    #[default]
    Empty,
    Mark(Mark),
}

impl Occupant {
    pub fn is_empty(&self) -> bool {
        matches!(self, Occupant::Empty)
    }

    pub fn mark(&self) -> Option<Mark> {
        match self {
            Occupant::Empty => None,
            Occupant::Mark(mark) => Some(*mark),
        }
    }
}

/// A board position and its occupant
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub hex: Hex,
    pub occupant: Occupant,
}

impl Cell {
    pub const fn empty(hex: Hex) -> Self {
        Self {
            hex,
            occupant: Occupant::Empty,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.occupant.is_empty()
    }

    /// True if the cell holds `mark`
    pub fn holds(&self, mark: Mark) -> bool {
        self.occupant == Occupant::Mark(mark)
    }
}

/// Hexagon-shaped board stored row by row
#[derive(Clone, Debug)]
pub struct Board {
    size: usize,
    rows: Vec<Vec<Cell>>,
}

impl Board {
    /// Create an unpopulated board; call [`Board::build`] to lay out the cells
    pub fn new(size: usize) -> Result<Self> {
        if size < MIN_ROWS || size % 2 == 0 {
            return Err(ReversiError::InvalidSize(size));
        }
        Ok(Self {
            size,
            rows: Vec::new(),
        })
    }

    /// Number of rows
    pub fn size(&self) -> usize {
        self.size
    }

    /// Distance from the center row to the top or bottom row
    pub fn half(&self) -> i32 {
        (self.size / 2) as i32
    }

    pub fn is_built(&self) -> bool {
        !self.rows.is_empty()
    }

    /// Lay out every cell, all empty
    pub fn build(&mut self) {
        let half = self.half();
        self.rows = (0..self.size)
            .map(|row| {
                let r = row as i32 - half;
                let (min_q, max_q) = q_bounds(half, r);
                (min_q..=max_q).map(|q| Cell::empty(Hex::new(q, r))).collect()
            })
            .collect();
    }

    /// Cell count of a row index, following the hexagon profile;
    /// `None` past the last row
    pub fn row_len(&self, row: usize) -> Option<usize> {
        if row >= self.size {
            return None;
        }
        let r = row as i32 - self.half();
        Some(self.size - r.unsigned_abs() as usize)
    }

    /// Cells of a row (empty slice before the board is built)
    pub fn row(&self, row: usize) -> &[Cell] {
        self.rows.get(row).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Iterate rows in order, each as an ordered cell slice
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.rows.iter().map(Vec::as_slice)
    }

    /// Iterate all cells, row-major then slot order
    pub fn cells(&self) -> impl Iterator<Item = &Cell> + '_ {
        self.rows.iter().flatten()
    }

    /// Fail with `OutOfBounds` unless `hex` lies on the hexagon
    pub fn validate(&self, hex: Hex) -> Result<()> {
        let half = self.half();
        if hex.r.abs() > half {
            return Err(ReversiError::OutOfBounds { q: hex.q, r: hex.r });
        }
        let (min_q, max_q) = q_bounds(half, hex.r);
        if hex.q < min_q || hex.q > max_q {
            return Err(ReversiError::OutOfBounds { q: hex.q, r: hex.r });
        }
        Ok(())
    }

    pub fn contains(&self, hex: Hex) -> bool {
        self.validate(hex).is_ok()
    }

    /// Row index holding the given `r`
    pub fn row_of(&self, r: i32) -> usize {
        (r + self.half()) as usize
    }

    /// Slot index of a valid hex within its row
    pub fn slot_of(&self, hex: Hex) -> usize {
        let (min_q, _) = q_bounds(self.half(), hex.r);
        (hex.q - min_q) as usize
    }

    /// Axial coordinate of a storage position
    pub fn hex_at(&self, row: usize, slot: usize) -> Hex {
        let r = row as i32 - self.half();
        let (min_q, _) = q_bounds(self.half(), r);
        Hex::new(min_q + slot as i32, r)
    }

    /// Find the cell at `hex` by scanning its row
    pub fn locate(&self, hex: Hex) -> Result<&Cell> {
        self.validate(hex)?;
        self.row(self.row_of(hex.r))
            .iter()
            .find(|cell| cell.hex == hex)
            .ok_or(ReversiError::NoSuchCell { q: hex.q, r: hex.r })
    }

    /// Find the cell with third coordinate `s` in row `r`
    pub fn locate_by_s(&self, s: i32, r: i32) -> Result<&Cell> {
        let hex = Hex::from_s(s, r);
        self.validate(hex)?;
        self.row(self.row_of(r))
            .iter()
            .find(|cell| cell.hex.s() == s)
            .ok_or(ReversiError::NoSuchCell { q: hex.q, r })
    }

    /// Put `occupant` on the cell at `hex`
    pub fn set(&mut self, hex: Hex, occupant: Occupant) -> Result<()> {
        self.validate(hex)?;
        let row = self.row_of(hex.r);
        let cell = self
            .rows
            .get_mut(row)
            .and_then(|cells| cells.iter_mut().find(|cell| cell.hex == hex))
            .ok_or(ReversiError::NoSuchCell { q: hex.q, r: hex.r })?;
        cell.occupant = occupant;
        Ok(())
    }

    /// Number of cells holding `mark`
    pub fn count(&self, mark: Mark) -> usize {
        self.cells().filter(|cell| cell.holds(mark)).count()
    }

    /// Number of empty cells
    pub fn empty_count(&self) -> usize {
        self.cells().filter(|cell| cell.is_empty()).count()
    }
}

/// Inclusive `q` range of the row at `r`
fn q_bounds(half: i32, r: i32) -> (i32, i32) {
    if r <= 0 {
        (-half - r, half)
    } else {
        (-half, half - r)
    }
}
