//! Game state machine: start, move, pass and game over

use std::fmt;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::board::{Board, Cell, Hex, Mark, Occupant};
use crate::capture;
use crate::error::{Result, ReversiError};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Opening ring around the center, alternating marks clockwise from the top
const OPENING: [(i32, i32, Mark); 6] = [
    (0, -1, Mark::X),
    (1, -1, Mark::O),
    (1, 0, Mark::X),
    (0, 1, Mark::O),
    (-1, 1, Mark::X),
    (-1, 0, Mark::O),
];

/// Consecutive passes that end the game
const PASSES_TO_END: u8 = 2;

// ============================================================================
// CORE TYPES
// ============================================================================

/// One turn taken by a player
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Turn {
    Place(Hex),
    Pass,
}

/// Lifecycle phase of a game
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    NotStarted,
    Started,
    Over,
}

/// Game result
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    Ongoing,
    Winner(Mark),
    Draw,
}

/// Callback run after every successful start, move and pass
///
/// Handlers get a read-only view; the engine stays borrowed while they run,
/// so they cannot re-enter a mutating operation.
pub trait Observer {
    fn notice(&mut self, game: &dyn GameView);
}

impl<F: FnMut(&dyn GameView)> Observer for F {
    fn notice(&mut self, game: &dyn GameView) {
        self(game)
    }
}

/// Handle returned by [`Reversi::add_observer`]
///
/// Wraps the observer's position in the notification order: observers run in
/// registration order, so a smaller id is always notified first. Ids are
/// never reused because observers cannot be removed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObserverId(pub usize);

// ============================================================================
// READ-ONLY VIEW
// ============================================================================

/// Query surface shared by strategies, players and observers
pub trait GameView {
    /// Number of rows on the board
    fn rows(&self) -> usize;

    /// Copy of the board, keyed by row index
    fn board(&self) -> FxHashMap<usize, Vec<Cell>>;

    /// Mark whose turn it is
    fn current_mark(&self) -> Mark;

    /// True once the game ended by passes or the board is full.
    /// Never mutates; see [`Reversi::check_game_over`] for the latching form.
    fn is_game_over(&self) -> bool;

    /// Number of discs owned by `mark`
    fn score(&self, mark: Mark) -> Result<usize>;

    /// Empty cells where the current mark may play, row-major
    fn valid_moves(&self) -> Vec<Hex>;

    /// True if placing the current mark at `hex` would capture in any direction
    fn is_valid_move(&self, hex: Hex) -> Result<bool>;

    fn find_cell(&self, hex: Hex) -> Result<Cell>;

    /// Cells that placing the current mark at `hex` would flip
    fn collect_flips(&self, hex: Hex) -> Result<Vec<Cell>>;

    /// Independent deep copy of the engine, for speculative play
    fn snapshot(&self) -> Reversi;
}

// ============================================================================
// ENGINE
// ============================================================================

/// Hexagonal Reversi engine
pub struct Reversi {
    board: Board,
    current: Mark,
    consecutive_passes: u8,
    started: bool,
    over: bool,
    observers: Vec<Box<dyn Observer>>,
}

impl Reversi {
    // ========================================================================
    // CONSTRUCTORS
    // ========================================================================

    /// Create an unstarted game with `rows` rows (odd, at least 5)
    pub fn new(rows: usize) -> Result<Self> {
        Ok(Self {
            board: Board::new(rows)?,
            current: Mark::O,
            consecutive_passes: 0,
            started: false,
            over: false,
            observers: Vec::new(),
        })
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn phase(&self) -> Phase {
        if !self.started {
            Phase::NotStarted
        } else if self.over {
            Phase::Over
        } else {
            Phase::Started
        }
    }

    pub fn consecutive_passes(&self) -> u8 {
        self.consecutive_passes
    }

    /// Borrow the live board
    pub fn cells(&self) -> &Board {
        &self.board
    }

    #[cfg(test)]
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// Disc count for `mark`, available in every phase
    pub fn count(&self, mark: Mark) -> usize {
        self.board.count(mark)
    }

    /// Winner by disc count once the game is over
    pub fn result(&self) -> GameResult {
        if !self.is_game_over() {
            return GameResult::Ongoing;
        }
        let (o, x) = (self.count(Mark::O), self.count(Mark::X));
        match o.cmp(&x) {
            std::cmp::Ordering::Greater => GameResult::Winner(Mark::O),
            std::cmp::Ordering::Less => GameResult::Winner(Mark::X),
            std::cmp::Ordering::Equal => GameResult::Draw,
        }
    }

    // ========================================================================
    // OBSERVERS
    // ========================================================================

    pub fn add_observer(&mut self, observer: impl Observer + 'static) -> ObserverId {
        self.observers.push(Box::new(observer));
        ObserverId(self.observers.len() - 1)
    }

    fn notify(&mut self) {
        let mut observers = std::mem::take(&mut self.observers);
        for observer in observers.iter_mut() {
            observer.notice(&*self);
        }
        observers.append(&mut self.observers);
        self.observers = observers;
    }

    // ========================================================================
    // STATE TRANSITIONS
    // ========================================================================

    /// Lay out the board and place the opening ring
    pub fn start(&mut self) -> Result<()> {
        if self.started {
            return Err(ReversiError::AlreadyStarted);
        }
        self.board.build();
        for (q, r, mark) in OPENING {
            self.board.set(Hex::new(q, r), Occupant::Mark(mark))?;
        }
        self.started = true;
        self.consecutive_passes = 0;
        self.over = false;
        info!(rows = self.board.size(), first = %self.current, "game started");
        self.notify();
        Ok(())
    }

    /// Place the current mark at `hex`, flipping every captured run
    ///
    /// Nothing is mutated unless the move succeeds.
    pub fn apply_move(&mut self, hex: Hex) -> Result<()> {
        self.ensure_in_play()?;
        let cell = self.board.locate(hex)?;
        if !cell.is_empty() {
            return Err(ReversiError::CellOccupied { q: hex.q, r: hex.r });
        }
        if !capture::capture(&mut self.board, hex, self.current)? {
            return Err(ReversiError::IllegalMove { q: hex.q, r: hex.r });
        }
        self.board.set(hex, Occupant::Mark(self.current))?;
        let mover = self.current;
        self.current = mover.opponent();
        self.consecutive_passes = 0;
        debug!(
            mark = %mover,
            %hex,
            o = self.count(Mark::O),
            x = self.count(Mark::X),
            "move"
        );
        self.notify();
        Ok(())
    }

    /// Give the turn away; the second pass in a row ends the game
    pub fn pass(&mut self) -> Result<()> {
        self.ensure_in_play()?;
        let passer = self.current;
        self.current = passer.opponent();
        self.notify();
        self.consecutive_passes += 1;
        debug!(mark = %passer, passes = self.consecutive_passes, "pass");
        if self.consecutive_passes >= PASSES_TO_END {
            self.over = true;
            info!(o = self.count(Mark::O), x = self.count(Mark::X), "game over after passes");
        }
        Ok(())
    }

    /// Apply a [`Turn`]
    pub fn play(&mut self, turn: Turn) -> Result<()> {
        match turn {
            Turn::Place(hex) => self.apply_move(hex),
            Turn::Pass => self.pass(),
        }
    }

    /// Like [`GameView::is_game_over`], but a full board latches the game as over
    pub fn check_game_over(&mut self) -> bool {
        if self.over {
            return true;
        }
        if self.started && self.board.empty_count() == 0 {
            self.over = true;
            info!(o = self.count(Mark::O), x = self.count(Mark::X), "game over, board full");
        }
        self.over
    }

    /// Started and not over; a full board counts as over even before it is latched
    fn ensure_in_play(&self) -> Result<()> {
        if !self.started {
            return Err(ReversiError::NotStarted);
        }
        if self.over || self.board.empty_count() == 0 {
            return Err(ReversiError::GameOver);
        }
        Ok(())
    }
}

/// Deep copy of the board and state. Observers stay with the original.
impl Clone for Reversi {
    fn clone(&self) -> Self {
        Self {
            board: self.board.clone(),
            current: self.current,
            consecutive_passes: self.consecutive_passes,
            started: self.started,
            over: self.over,
            observers: Vec::new(),
        }
    }
}

impl fmt::Debug for Reversi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reversi")
            .field("rows", &self.board.size())
            .field("current", &self.current)
            .field("consecutive_passes", &self.consecutive_passes)
            .field("started", &self.started)
            .field("over", &self.over)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl GameView for Reversi {
    fn rows(&self) -> usize {
        self.board.size()
    }

    fn board(&self) -> FxHashMap<usize, Vec<Cell>> {
        self.board
            .rows()
            .enumerate()
            .map(|(row, cells)| (row, cells.to_vec()))
            .collect()
    }

    fn current_mark(&self) -> Mark {
        self.current
    }

    fn is_game_over(&self) -> bool {
        self.over || (self.started && self.board.empty_count() == 0)
    }

    fn score(&self, mark: Mark) -> Result<usize> {
        self.ensure_in_play()?;
        Ok(self.count(mark))
    }

    fn valid_moves(&self) -> Vec<Hex> {
        self.board
            .cells()
            .filter(|cell| cell.is_empty())
            .filter(|cell| matches!(capture::is_legal(&self.board, cell.hex, self.current), Ok(true)))
            .map(|cell| cell.hex)
            .collect()
    }

    fn is_valid_move(&self, hex: Hex) -> Result<bool> {
        capture::is_legal(&self.board, hex, self.current)
    }

    fn find_cell(&self, hex: Hex) -> Result<Cell> {
        self.board.locate(hex).copied()
    }

    fn collect_flips(&self, hex: Hex) -> Result<Vec<Cell>> {
        capture::collect_flips(&self.board, hex, self.current)
    }

    fn snapshot(&self) -> Reversi {
        self.clone()
    }
}

/// Plain-text board: one line per row, `X`, `O` or `_` per cell
impl fmt::Display for Reversi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let size = self.board.size();
        for row in self.board.rows() {
            write!(f, "{}", " ".repeat(size - row.len()))?;
            for cell in row {
                match cell.occupant {
                    Occupant::Mark(mark) => write!(f, "{mark} ")?,
                    Occupant::Empty => f.write_str("_ ")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================
