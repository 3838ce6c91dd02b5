//! Move-selection strategies
//!
//! Strategies only read the game through [`GameView`]. Anything that needs to
//! try a move first plays it on a [`GameView::snapshot`], never on the live
//! engine.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::board::{Hex, Mark};
use crate::game::GameView;

/// Picks a coordinate to play, or `None` when it has nothing to offer
pub trait Strategy {
    fn choose_move(&self, game: &dyn GameView, mark: Mark) -> Option<Hex>;

    fn name(&self) -> &str;
}

// ============================================================================
// MOST POINTS CAPTURED
// ============================================================================

/// Greedy: the move leaving `mark` with the highest disc count
///
/// Among moves that match the running maximum, a candidate replaces the
/// remembered one when its `s` is larger and either its `q` or its `r` is
/// smaller than those seen so far, which favours the upper-left of the board.
#[derive(Clone, Copy, Debug, Default)]
pub struct MostPointsCaptured;

impl Strategy for MostPointsCaptured {
    fn choose_move(&self, game: &dyn GameView, mark: Mark) -> Option<Hex> {
        let mut max_points = game.score(mark).ok()?;
        let mut best = None;
        let mut upper_left = None;
        let mut tie = false;
        let (mut max_s, mut min_r, mut min_q) = (i32::MIN, i32::MAX, i32::MAX);

        for hex in game.valid_moves() {
            let mut trial = game.snapshot();
            if trial.apply_move(hex).is_err() {
                continue;
            }
            // a move that fills the board ends the trial game, so read the raw count
            let points = trial.count(mark);

            if points > max_points {
                max_points = points;
                best = Some(hex);
                tie = false;
            }

            let s = hex.s();
            if points == max_points && ((hex.q < min_q && s > max_s) || (s > max_s && hex.r < min_r)) {
                upper_left = Some(hex);
                tie = true;
                max_s = s;
                min_r = hex.r;
                min_q = hex.q;
            }
        }

        if tie {
            upper_left
        } else {
            best
        }
    }

    fn name(&self) -> &str {
        "most-points-captured"
    }
}

// ============================================================================
// ANY OPEN CORNER
// ============================================================================

/// The six corners of a board with `rows` rows, in probe order:
/// top-left, top-right, left, right, bottom-left, bottom-right
///
/// The top corner `(0, -h)` is probed first and the bottom corner `(0, h)`
/// last, so when both are playable the top one wins.
pub fn corners(rows: usize) -> [Hex; 6] {
    let half = (rows / 2) as i32;
    [
        Hex::new(0, -half),
        Hex::new(half, -half),
        Hex::new(-half, 0),
        Hex::new(half, 0),
        Hex::new(-half, half),
        Hex::new(0, half),
    ]
}

/// First corner that is empty and legal for the player to move
///
/// Probes that are off the board or already taken are skipped, so this
/// never fails; it returns `None` when no corner is playable.
#[derive(Clone, Copy, Debug, Default)]
pub struct AnyOpenCorner;

impl Strategy for AnyOpenCorner {
    fn choose_move(&self, game: &dyn GameView, _mark: Mark) -> Option<Hex> {
        corners(game.rows()).into_iter().find(|&hex| {
            game.find_cell(hex).is_ok_and(|cell| cell.is_empty())
                && game.is_valid_move(hex).unwrap_or(false)
        })
    }

    fn name(&self) -> &str {
        "any-open-corner"
    }
}

// ============================================================================
// COMBINATORS
// ============================================================================

/// Try `first`; fall back to `second` when it offers nothing
pub struct TryTwo {
    first: Box<dyn Strategy>,
    second: Option<Box<dyn Strategy>>,
}

impl TryTwo {
    pub fn new(first: impl Strategy + 'static, second: impl Strategy + 'static) -> Self {
        Self {
            first: Box::new(first),
            second: Some(Box::new(second)),
        }
    }

    /// No fallback: fails as soon as `first` does
    pub fn alone(first: impl Strategy + 'static) -> Self {
        Self {
            first: Box::new(first),
            second: None,
        }
    }
}

impl Strategy for TryTwo {
    fn choose_move(&self, game: &dyn GameView, mark: Mark) -> Option<Hex> {
        self.first
            .choose_move(game, mark)
            .or_else(|| self.second.as_ref()?.choose_move(game, mark))
    }

    fn name(&self) -> &str {
        "try-two"
    }
}

// ============================================================================
// RANDOM
// ============================================================================

/// Uniform pick among the valid moves
///
/// The generator is reseeded from `seed` and the number of discs on the board,
/// so a given position always yields the same move.
#[derive(Clone, Copy, Debug)]
pub struct RandomMove {
    seed: u64,
}

impl RandomMove {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl Strategy for RandomMove {
    fn choose_move(&self, game: &dyn GameView, _mark: Mark) -> Option<Hex> {
        let moves = game.valid_moves();
        let discs = game
            .board()
            .values()
            .flatten()
            .filter(|cell| !cell.is_empty())
            .count() as u64;
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed ^ discs.wrapping_mul(0x9E37_79B9_7F4A_7C15));
        moves.choose(&mut rng).copied()
    }

    fn name(&self) -> &str {
        "random"
    }
}

// ============================================================================
// TESTS
// ============================================================================
