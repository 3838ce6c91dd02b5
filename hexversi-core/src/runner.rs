//! Headless match runner: two automated players on one engine

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::board::Mark;
use crate::config::MatchConfig;
use crate::game::{GameResult, GameView, Reversi, Turn};
use crate::player::{AiPlayer, Player};

/// Outcome of a single game
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchOutcome {
    /// Final game result; `Ongoing` if the turn cap was hit
    pub result: GameResult,
    pub o_score: usize,
    pub x_score: usize,
    /// Every turn taken, in order
    pub turns: Vec<Turn>,
}

impl MatchOutcome {
    pub fn winner(&self) -> Option<Mark> {
        match self.result {
            GameResult::Winner(mark) => Some(mark),
            GameResult::Ongoing | GameResult::Draw => None,
        }
    }

    pub fn is_draw(&self) -> bool {
        self.result == GameResult::Draw
    }

    /// Number of discs placed
    pub fn placements(&self) -> usize {
        self.turns.iter().filter(|turn| matches!(turn, Turn::Place(_))).count()
    }

    pub fn passes(&self) -> usize {
        self.turns.len() - self.placements()
    }
}

/// Plays configured automated players against each other
pub struct MatchRunner {
    config: MatchConfig,
    o_player: AiPlayer,
    x_player: AiPlayer,
}

impl MatchRunner {
    /// Fails if the row count is invalid or either side is human
    pub fn new(config: MatchConfig) -> Result<Self> {
        config.validate()?;
        let o_player = Self::automated(&config, Mark::O)?;
        let x_player = Self::automated(&config, Mark::X)?;
        Ok(Self {
            config,
            o_player,
            x_player,
        })
    }

    fn automated(config: &MatchConfig, mark: Mark) -> Result<AiPlayer> {
        let kind = config.player(mark);
        match kind.automated(mark, config.seed_for(mark)) {
            Some(player) => Ok(player),
            None => bail!("{mark} player is {kind}; headless matches need automated players"),
        }
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Play a fresh game to completion
    pub fn run(&mut self) -> Result<MatchOutcome> {
        let mut game = Reversi::new(self.config.rows)?;
        game.start()?;
        self.play_out(&mut game)
    }

    /// Alternate the players on `game` until it is over or the turn cap is hit
    pub fn play_out(&mut self, game: &mut Reversi) -> Result<MatchOutcome> {
        let mut turns = Vec::new();

        while !game.check_game_over() && turns.len() < self.config.max_turns {
            let player = match game.current_mark() {
                Mark::O => &mut self.o_player,
                Mark::X => &mut self.x_player,
            };
            match player.take_turn(game)? {
                Some(turn) => turns.push(turn),
                None => break,
            }
        }

        let outcome = MatchOutcome {
            result: game.result(),
            o_score: game.count(Mark::O),
            x_score: game.count(Mark::X),
            turns,
        };
        info!(
            o = %self.o_player.strategy_name(),
            x = %self.x_player.strategy_name(),
            result = ?outcome.result,
            o_score = outcome.o_score,
            x_score = outcome.x_score,
            turns = outcome.turns.len(),
            "match finished"
        );
        Ok(outcome)
    }
}
