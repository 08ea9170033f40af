use serde::{Deserialize, Serialize};

use crate::action::CardSource;
use crate::card::{Card, DISCARD_PILE_COUNT};
use crate::error::{GameError, InvalidMove};
use crate::piles::{DiscardPile, Hand, StockPile};

pub const MAX_NAME_CHARS: usize = 12;

/// Display color a player picks; unique per game.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum PlayerColor {
    Red,
    Orange,
    Yellow,
    Green,
    Cyan,
    Blue,
    Purple,
    Pink,
    Black,
}

/// Who drives a seat.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum PlayerKind {
    Human,
    Automated,
}

/// Trims the name and checks it holds 1 to 12 visible characters.
pub fn validate_name(name: &str) -> Result<String, GameError> {
    let trimmed = name.trim();
    let visible = trimmed.chars().count();
    if visible == 0 || visible > MAX_NAME_CHARS {
        return Err(GameError::InvalidConfiguration(
            "player names must be between 1 and 12 characters",
        ));
    }
    Ok(trimmed.to_string())
}

#[derive(Clone, Debug)]
pub(crate) struct PlayerState {
    pub(crate) name: String,
    pub(crate) color: PlayerColor,
    pub(crate) kind: PlayerKind,
    pub(crate) stock: StockPile,
    pub(crate) hand: Hand,
    pub(crate) discard_piles: [DiscardPile; DISCARD_PILE_COUNT],
}

impl PlayerState {
    pub(crate) fn new(name: String, color: PlayerColor, kind: PlayerKind) -> Self {
        Self {
            name,
            color,
            kind,
            stock: StockPile::default(),
            hand: Hand::default(),
            discard_piles: std::array::from_fn(|_| DiscardPile::default()),
        }
    }

    pub(crate) fn discard_top(&self, index: usize) -> Option<Card> {
        self.discard_piles.get(index).and_then(DiscardPile::top)
    }

    pub(crate) fn discard_tops(&self) -> [Option<Card>; DISCARD_PILE_COUNT] {
        std::array::from_fn(|idx| self.discard_top(idx))
    }

    pub(crate) fn discard_counts(&self) -> [usize; DISCARD_PILE_COUNT] {
        std::array::from_fn(|idx| self.discard_piles[idx].len())
    }

    /// Cards this player still holds outside the reserve.
    pub(crate) fn held_cards(&self) -> usize {
        self.hand.len() + self.discard_piles.iter().map(DiscardPile::len).sum::<usize>()
    }

    pub(crate) fn card_count(&self) -> usize {
        self.stock.len() + self.held_cards()
    }

    pub(crate) fn peek_source(&self, source: CardSource) -> Result<Card, InvalidMove> {
        match source {
            CardSource::Hand(index) => self.hand.get(index).ok_or(InvalidMove::HandIndex(index)),
            CardSource::Stock => self.stock.top().ok_or(InvalidMove::NoCardAvailable),
            CardSource::Discard(index) => {
                if index >= DISCARD_PILE_COUNT {
                    Err(InvalidMove::DiscardIndex(index))
                } else {
                    self.discard_top(index).ok_or(InvalidMove::NoCardAvailable)
                }
            }
        }
    }

    pub(crate) fn take_from_source(&mut self, source: CardSource) -> Result<Card, InvalidMove> {
        match source {
            CardSource::Hand(index) => self.hand.remove(index).ok_or(InvalidMove::HandIndex(index)),
            CardSource::Stock => self.stock.pop().ok_or(InvalidMove::NoCardAvailable),
            CardSource::Discard(index) => self
                .discard_piles
                .get_mut(index)
                .ok_or(InvalidMove::DiscardIndex(index))?
                .pop()
                .ok_or(InvalidMove::NoCardAvailable),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_trimmed_and_bounded() {
        assert_eq!(validate_name("  Ada ").ok().as_deref(), Some("Ada"));
        assert!(validate_name("   ").is_err());
        assert!(validate_name("abcdefghijklm").is_err());
        assert!(validate_name("abcdefghijkl").is_ok());
    }

    #[test]
    fn padding_does_not_count_toward_the_limit() {
        let padded = validate_name("   abcdefghijkl   ");
        assert_eq!(padded.ok().as_deref(), Some("abcdefghijkl"));
    }
}
