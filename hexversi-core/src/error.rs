//! Engine error type

/// Errors raised by the board and game state machine
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReversiError {
    #[error("invalid board size {0}: rows must be odd and at least 5")]
    InvalidSize(usize),

    #[error("coordinate ({q}, {r}) is off the board")]
    OutOfBounds { q: i32, r: i32 },

    #[error("no cell at ({q}, {r})")]
    NoSuchCell { q: i32, r: i32 },

    #[error("game has not started yet")]
    NotStarted,

    #[error("game already started")]
    AlreadyStarted,

    #[error("game is over")]
    GameOver,

    #[error("cell ({q}, {r}) is already occupied")]
    CellOccupied { q: i32, r: i32 },

    #[error("placing at ({q}, {r}) captures nothing")]
    IllegalMove { q: i32, r: i32 },

    #[error("unknown player kind: {0}")]
    UnknownPlayerKind(String),
}

/// Result alias used throughout the engine
pub type Result<T> = std::result::Result<T, ReversiError>;
