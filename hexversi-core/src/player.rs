//! Players: a mark plus a way of producing one turn at a time

use tracing::debug;

use crate::board::{Hex, Mark};
use crate::error::Result;
use crate::game::{GameView, Reversi, Turn};
use crate::strategy::Strategy;

/// Capabilities shared by human and automated players
pub trait Player {
    /// Mark this player owns
    fn mark(&self) -> Mark;

    /// Record a coordinate chosen outside the engine (a click, a typed move)
    fn choose_move(&mut self, hex: Hex);

    /// Coordinate this player intends to play next, if any
    fn move_to_play(&self) -> Option<Hex>;

    /// Act on the player's own turn. `Ok(None)` means the player is waiting
    /// for outside input or it is not their turn.
    fn take_turn(&mut self, game: &mut Reversi) -> Result<Option<Turn>>;

    fn pass(&self, game: &mut Reversi) -> Result<()> {
        game.pass()
    }
}

// ============================================================================
// HUMAN
// ============================================================================

/// A player whose moves come from outside; it never acts on its own
#[derive(Clone, Debug)]
pub struct HumanPlayer {
    mark: Mark,
    chosen: Option<Hex>,
}

impl HumanPlayer {
    pub fn new(mark: Mark) -> Self {
        Self { mark, chosen: None }
    }

    /// Play the recorded coordinate, if one was chosen
    pub fn play_chosen(&mut self, game: &mut Reversi) -> Result<Option<Turn>> {
        let Some(hex) = self.chosen else {
            return Ok(None);
        };
        game.apply_move(hex)?;
        self.chosen = None;
        Ok(Some(Turn::Place(hex)))
    }
}

impl Player for HumanPlayer {
    fn mark(&self) -> Mark {
        self.mark
    }

    fn choose_move(&mut self, hex: Hex) {
        self.chosen = Some(hex);
    }

    fn move_to_play(&self) -> Option<Hex> {
        self.chosen
    }

    fn take_turn(&mut self, _game: &mut Reversi) -> Result<Option<Turn>> {
        Ok(None)
    }
}

// ============================================================================
// AUTOMATED
// ============================================================================

/// A player driven by a [`Strategy`]; passes when the strategy finds nothing
pub struct AiPlayer {
    mark: Mark,
    strategy: Box<dyn Strategy>,
    last_choice: Option<Hex>,
}

impl AiPlayer {
    pub fn new(mark: Mark, strategy: impl Strategy + 'static) -> Self {
        Self::boxed(mark, Box::new(strategy))
    }

    pub fn boxed(mark: Mark, strategy: Box<dyn Strategy>) -> Self {
        Self {
            mark,
            strategy,
            last_choice: None,
        }
    }

    pub fn strategy_name(&self) -> &str {
        self.strategy.name()
    }
}

impl Player for AiPlayer {
    fn mark(&self) -> Mark {
        self.mark
    }

    /// Outside input is ignored; the strategy decides
    fn choose_move(&mut self, _hex: Hex) {}

    fn move_to_play(&self) -> Option<Hex> {
        self.last_choice
    }

    fn take_turn(&mut self, game: &mut Reversi) -> Result<Option<Turn>> {
        if game.current_mark() != self.mark || game.is_game_over() {
            return Ok(None);
        }
        self.last_choice = self.strategy.choose_move(&*game, self.mark);
        debug!(
            mark = %self.mark,
            strategy = self.strategy.name(),
            choice = ?self.last_choice,
            "strategy decided"
        );
        let turn = match self.last_choice {
            Some(hex) => Turn::Place(hex),
            None => Turn::Pass,
        };
        game.play(turn)?;
        Ok(Some(turn))
    }
}
