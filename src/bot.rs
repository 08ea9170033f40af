use crate::error::GameError;
use crate::game::Game;

/// Interface for automated players.
///
/// A bot never mutates the state it is handed; it returns the state after its whole turn.
pub trait Bot {
    fn take_turn(&mut self, game: &Game) -> Result<Game, GameError>;
}
