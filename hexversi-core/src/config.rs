//! Player presets and match configuration

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::board::{Board, Mark};
use crate::error::ReversiError;
use crate::player::{AiPlayer, HumanPlayer, Player};
use crate::strategy::{AnyOpenCorner, MostPointsCaptured, RandomMove, Strategy, TryTwo};

/// Who sits on one side of the board
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerKind {
    /// Moves supplied from outside
    Human,
    /// Greedy disc count
    #[default]
    EasyAi,
    /// Corners first, then greedy
    HardAi,
    /// Uniform over valid moves
    #[serde(rename = "random")]
    RandomAi,
}

impl PlayerKind {
    pub fn is_automated(self) -> bool {
        self != PlayerKind::Human
    }

    /// Strategy behind an automated kind; `None` for humans
    pub fn strategy(self, seed: u64) -> Option<Box<dyn Strategy>> {
        match self {
            PlayerKind::Human => None,
            PlayerKind::EasyAi => Some(Box::new(TryTwo::alone(MostPointsCaptured))),
            PlayerKind::HardAi => Some(Box::new(TryTwo::new(AnyOpenCorner, MostPointsCaptured))),
            PlayerKind::RandomAi => Some(Box::new(RandomMove::new(seed))),
        }
    }

    /// Automated player for `mark`; `None` for humans
    pub fn automated(self, mark: Mark, seed: u64) -> Option<AiPlayer> {
        self.strategy(seed).map(|strategy| AiPlayer::boxed(mark, strategy))
    }

    pub fn build(self, mark: Mark, seed: u64) -> Box<dyn Player> {
        match self.automated(mark, seed) {
            Some(ai) => Box::new(ai),
            None => Box::new(HumanPlayer::new(mark)),
        }
    }
}

impl FromStr for PlayerKind {
    type Err = ReversiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "human" => Ok(PlayerKind::Human),
            "easyai" => Ok(PlayerKind::EasyAi),
            "hardai" => Ok(PlayerKind::HardAi),
            "random" => Ok(PlayerKind::RandomAi),
            _ => Err(ReversiError::UnknownPlayerKind(s.to_string())),
        }
    }
}

impl fmt::Display for PlayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PlayerKind::Human => "human",
            PlayerKind::EasyAi => "easyai",
            PlayerKind::HardAi => "hardai",
            PlayerKind::RandomAi => "random",
        };
        f.write_str(name)
    }
}

/// Settings for one game between two players
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Board rows (odd, at least 5)
    pub rows: usize,
    /// Player moving first
    pub o_player: PlayerKind,
    pub x_player: PlayerKind,
    /// Seed for random players; X uses `seed + 1`
    pub seed: u64,
    /// Turn cap, passes included
    pub max_turns: usize,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            rows: 7,
            o_player: PlayerKind::HardAi,
            x_player: PlayerKind::EasyAi,
            seed: 42,
            max_turns: 500,
        }
    }
}

impl MatchConfig {
    pub fn new(o_player: PlayerKind, x_player: PlayerKind) -> Self {
        Self {
            o_player,
            x_player,
            ..Default::default()
        }
    }

    pub fn with_rows(mut self, rows: usize) -> Self {
        self.rows = rows;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_max_turns(mut self, max_turns: usize) -> Self {
        self.max_turns = max_turns;
        self
    }

    pub fn player(&self, mark: Mark) -> PlayerKind {
        match mark {
            Mark::O => self.o_player,
            Mark::X => self.x_player,
        }
    }

    /// Seed handed to the player of `mark`
    pub fn seed_for(&self, mark: Mark) -> u64 {
        match mark {
            Mark::O => self.seed,
            Mark::X => self.seed.wrapping_add(1),
        }
    }

    /// Check the row count
    pub fn validate(&self) -> Result<(), ReversiError> {
        Board::new(self.rows).map(|_| ())
    }

    /// Load from a JSON file; absent fields keep their defaults
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read match config: {}", path.display()))?;
        let config: MatchConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse match config: {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write match config: {}", path.display()))?;
        Ok(())
    }
}
