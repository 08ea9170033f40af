use std::fmt;

use serde::{Deserialize, Serialize};

/// Representation of a Skip-Bo card.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Card {
    /// Numbered card between 1 and 12.
    Number(u8),
    /// Skip-Bo wild card that has not been played yet.
    SkipBo,
    /// Skip-Bo card frozen to the value it completed on a foundation.
    PlayedSkipBo(u8),
}

pub const MIN_CARD_VALUE: u8 = 1;
pub const MAX_CARD_VALUE: u8 = 12;
pub const SKIP_BO_COUNT: usize = 18;
pub const COPIES_PER_VALUE: usize = 12;
pub const DECK_SIZE: usize = COPIES_PER_VALUE * MAX_CARD_VALUE as usize + SKIP_BO_COUNT;
pub const HAND_SIZE: usize = 5;
pub const DISCARD_PILE_COUNT: usize = 4;
pub const BUILD_PILE_COUNT: usize = 4;
pub const NUM_PLAYERS: usize = 2;

impl Card {
    /// Returns true if the card is an unplayed wildcard.
    #[inline]
    pub fn is_skip_bo(&self) -> bool {
        matches!(self, Card::SkipBo)
    }

    /// Returns the effective numeric value when available.
    #[inline]
    pub fn value(&self) -> Option<u8> {
        match self {
            Card::Number(v) | Card::PlayedSkipBo(v) => Some(*v),
            Card::SkipBo => None,
        }
    }

    /// Returns the numeric value of a natural card only.
    #[inline]
    pub fn natural_value(&self) -> Option<u8> {
        match self {
            Card::Number(v) => Some(*v),
            _ => None,
        }
    }

    /// Resolves the card against the value a foundation requires next.
    ///
    /// Wildcards freeze to `required`; natural cards resolve only on an exact match.
    #[inline]
    pub fn resolve_for(&self, required: u8) -> Option<Card> {
        debug_assert!((MIN_CARD_VALUE..=MAX_CARD_VALUE).contains(&required));
        match self {
            Card::SkipBo => Some(Card::PlayedSkipBo(required)),
            Card::Number(v) | Card::PlayedSkipBo(v) if *v == required => Some(*self),
            _ => None,
        }
    }

    /// The form a card takes once its foundation is cleared.
    #[inline]
    pub fn reclaimed(self) -> Card {
        match self {
            Card::PlayedSkipBo(_) => Card::SkipBo,
            other => other,
        }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Card::Number(value) => write!(f, "{value}"),
            Card::SkipBo => f.write_str("SB"),
            Card::PlayedSkipBo(value) => write!(f, "SB{value}"),
        }
    }
}

/// Builds a full 162-card Skip-Bo deck in deterministic order (unshuffled).
pub fn full_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(DECK_SIZE);
    for _ in 0..COPIES_PER_VALUE {
        for value in MIN_CARD_VALUE..=MAX_CARD_VALUE {
            deck.push(Card::Number(value));
        }
    }
    deck.extend(std::iter::repeat(Card::SkipBo).take(SKIP_BO_COUNT));
    deck
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_deck_has_expected_composition() {
        let deck = full_deck();
        assert_eq!(deck.len(), DECK_SIZE);
        assert_eq!(deck.iter().filter(|card| card.is_skip_bo()).count(), 18);
        assert_eq!(
            deck.iter().filter(|card| **card == Card::Number(7)).count(),
            12
        );
    }

    #[test]
    fn wild_resolves_to_required_value_and_reverts() {
        let played = Card::SkipBo.resolve_for(12).expect("wild always resolves");
        assert_eq!(played, Card::PlayedSkipBo(12));
        assert_eq!(played.value(), Some(12));
        assert_eq!(played.reclaimed(), Card::SkipBo);
        assert_eq!(Card::Number(4).resolve_for(5), None);
        assert_eq!(Card::Number(5).resolve_for(5), Some(Card::Number(5)));
    }
}
