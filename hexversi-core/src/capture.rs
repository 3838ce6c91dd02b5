//! Directional sweeps: legality checks and disc captures
//!
//! A placement captures along a direction when the walk outward from the
//! placed cell crosses one or more enemy discs and then lands on a disc of
//! the mover. Running off the board or into an empty cell captures nothing.

use tracing::trace;

use crate::board::{Board, Cell, Hex, Mark, Occupant};
use crate::error::Result;

/// The six sweep directions
///
/// `West`/`East` walk the placed cell's own row. The others change `r` one
/// row at a time while holding `q` (`NorthWest`, `SouthEast`) or `s`
/// (`NorthEast`, `SouthWest`) fixed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    West,
    East,
    NorthWest,
    SouthEast,
    NorthEast,
    SouthWest,
}

impl Direction {
    /// Evaluation order used for every sweep
    pub const ALL: [Direction; 6] = [
        Direction::West,
        Direction::East,
        Direction::NorthWest,
        Direction::SouthEast,
        Direction::NorthEast,
        Direction::SouthWest,
    ];

    /// The cell `distance` steps from `origin`, or `None` past the edge
    fn step(self, board: &Board, origin: Hex, distance: i32) -> Option<Cell> {
        match self {
            Direction::West | Direction::East => {
                let delta = if self == Direction::West { -distance } else { distance };
                let slot = board.slot_of(origin) as i32 + delta;
                if slot < 0 {
                    return None;
                }
                board.row(board.row_of(origin.r)).get(slot as usize).copied()
            }
            Direction::NorthWest => board.locate(Hex::new(origin.q, origin.r - distance)).ok().copied(),
            Direction::SouthEast => board.locate(Hex::new(origin.q, origin.r + distance)).ok().copied(),
            Direction::NorthEast => board.locate_by_s(origin.s(), origin.r - distance).ok().copied(),
            Direction::SouthWest => board.locate_by_s(origin.s(), origin.r + distance).ok().copied(),
        }
    }

    /// Number of enemy discs `mark` would capture from `origin` in this direction
    ///
    /// Zero means the direction is illegal: the first neighbour is missing,
    /// empty or friendly, or the enemy run is never closed by a friendly disc.
    pub fn capture_len(self, board: &Board, origin: Hex, mark: Mark) -> Result<usize> {
        board.validate(origin)?;
        let mut run = 0;
        let mut distance = 1;
        loop {
            match self.step(board, origin, distance).map(|cell| cell.occupant) {
                Some(Occupant::Mark(m)) if m == mark => return Ok(run),
                Some(Occupant::Mark(_)) => run += 1,
                _ => return Ok(0),
            }
            distance += 1;
        }
    }

    /// Cells that a legal sweep would flip, nearest first
    fn captured_cells(self, board: &Board, origin: Hex, len: usize) -> Vec<Cell> {
        (1..=len as i32)
            .filter_map(|distance| self.step(board, origin, distance))
            .collect()
    }
}

/// Legal directions from `origin` for `mark`, with their capture lengths
pub fn legal_directions(board: &Board, origin: Hex, mark: Mark) -> Result<Vec<(Direction, usize)>> {
    let mut legal = Vec::new();
    for dir in Direction::ALL {
        let len = dir.capture_len(board, origin, mark)?;
        trace!(?dir, %origin, len, "sweep");
        if len > 0 {
            legal.push((dir, len));
        }
    }
    Ok(legal)
}

/// Read-only legality: true if any direction captures
pub fn is_legal(board: &Board, origin: Hex, mark: Mark) -> Result<bool> {
    for dir in Direction::ALL {
        if dir.capture_len(board, origin, mark)? > 0 {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Flip every capturable run from `origin` to `mark`
///
/// Returns true if at least one direction captured. Does not place the disc
/// on `origin` itself; callers that only need legality use [`is_legal`].
pub fn capture(board: &mut Board, origin: Hex, mark: Mark) -> Result<bool> {
    let legal = legal_directions(board, origin, mark)?;
    for &(dir, len) in &legal {
        for cell in dir.captured_cells(board, origin, len) {
            board.set(cell.hex, Occupant::Mark(mark))?;
        }
    }
    Ok(!legal.is_empty())
}

/// Cells that placing `mark` at `origin` would flip, grouped by direction
pub fn collect_flips(board: &Board, origin: Hex, mark: Mark) -> Result<Vec<Cell>> {
    let mut flips = Vec::new();
    for (dir, len) in legal_directions(board, origin, mark)? {
        flips.extend(dir.captured_cells(board, origin, len));
    }
    Ok(flips)
}
