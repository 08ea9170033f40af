use rand::Rng;
use rand::seq::SliceRandom;

use crate::action::Action;
use crate::bot::Bot;
use crate::error::GameError;
use crate::game::Game;

/// Baseline bot that samples uniformly from the legal plays, stopping at
/// random, then discards a random hand card.
pub struct RandomBot<R: Rng> {
    rng: R,
    stop_chance: f64,
}

impl<R: Rng> RandomBot<R> {
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            stop_chance: 0.25,
        }
    }
}

impl<R: Rng> Bot for RandomBot<R> {
    fn take_turn(&mut self, game: &Game) -> Result<Game, GameError> {
        let mut next = game.clone();
        if next.can_draw() {
            next.draw()?;
        }
        while !next.has_winner() {
            let plays: Vec<Action> = next
                .legal_actions()
                .into_iter()
                .filter(|action| matches!(action, Action::Play { .. } | Action::Draw))
                .collect();
            let Some(action) = plays.choose(&mut self.rng).copied() else {
                break;
            };
            if self.rng.gen_bool(self.stop_chance) {
                break;
            }
            next.apply_action(action)?;
        }
        if next.has_winner() {
            return Ok(next);
        }
        let closing: Vec<Action> = next
            .legal_actions()
            .into_iter()
            .filter(|action| matches!(action, Action::Discard { .. } | Action::EndTurn))
            .collect();
        match closing.choose(&mut self.rng).copied() {
            Some(action) => next.apply_action(action)?,
            None => next.end_turn()?,
        }
        Ok(next)
    }
}
