//! HEXVERSI Core - Reversi on a hexagonal board
//!
//! This crate provides the board-state engine and the move-selection layer:
//! - Board geometry (hexagon of odd row count, axial coordinates)
//! - Six-direction capture sweeps
//! - Game state machine (start, move, pass, game over) with observers
//! - Strategies (greedy, corners, fallback, random) and players
//! - Match configuration and a headless match runner

pub mod board;
pub mod capture;
pub mod config;
pub mod error;
pub mod game;
pub mod player;
pub mod runner;
pub mod strategy;

// Re-exports for convenient access
pub use board::{Board, Cell, Hex, Mark, Occupant, MIN_ROWS};
pub use capture::Direction;
pub use config::{MatchConfig, PlayerKind};
pub use error::{Result, ReversiError};
pub use game::{GameResult, GameView, Observer, ObserverId, Phase, Reversi, Turn};
pub use player::{AiPlayer, HumanPlayer, Player};
pub use runner::{MatchOutcome, MatchRunner};
pub use strategy::{AnyOpenCorner, MostPointsCaptured, RandomMove, Strategy, TryTwo};
