use crate::bot::Bot;
use crate::card::DISCARD_PILE_COUNT;
use crate::error::GameError;
use crate::game::Game;
use crate::state::Perspective;

/// Baseline bot that never plays: it draws, then discards its first hand card
/// onto its last discard pile.
#[derive(Clone, Copy, Debug, Default)]
pub struct DrawDiscardBot;

impl DrawDiscardBot {
    pub fn new() -> Self {
        Self
    }
}

impl Bot for DrawDiscardBot {
    fn take_turn(&mut self, game: &Game) -> Result<Game, GameError> {
        let mut next = game.clone();
        if next.can_draw() {
            next.draw()?;
        }
        if next.hand_count(Perspective::Current) == 0 {
            next.end_turn()?;
        } else {
            next.discard(0, DISCARD_PILE_COUNT - 1)?;
        }
        Ok(next)
    }
}
