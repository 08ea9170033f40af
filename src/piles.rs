//! Card containers with the narrow push/pop/peek contracts the rules rely on.
//!
//! Every pile owns its cards outright, so cloning a game state clones each pile
//! and no two states ever share a mutable container.

use std::collections::VecDeque;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::card::{Card, HAND_SIZE, MAX_CARD_VALUE, full_deck};

/// The draw pile starts reshuffling the reclaim pile in once it holds this many cards or fewer.
pub const LOW_DRAW_PILE: usize = 5;

/// Shared stock that players draw from, front first.
#[derive(Clone, Debug, Default)]
pub struct DrawPile {
    cards: VecDeque<Card>,
}

impl DrawPile {
    /// Builds a full deck and shuffles it.
    pub fn shuffled<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut pile = Self::default();
        pile.shuffle_in(full_deck(), rng);
        pile
    }

    /// Uses the cards exactly in the given order; the first card is drawn first.
    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self {
            cards: cards.into(),
        }
    }

    pub fn draw(&mut self) -> Option<Card> {
        self.cards.pop_front()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn is_low(&self) -> bool {
        self.cards.len() <= LOW_DRAW_PILE
    }

    /// Merges `cards` into the pile and shuffles the whole pile.
    pub fn shuffle_in<R: Rng + ?Sized>(&mut self, cards: Vec<Card>, rng: &mut R) {
        self.cards.extend(cards);
        self.cards.make_contiguous().shuffle(rng);
    }
}

/// Holding area for cards cleared off completed foundations.
#[derive(Clone, Debug, Default)]
pub struct ReclaimPile {
    cards: Vec<Card>,
}

impl ReclaimPile {
    /// Stores cleared cards; played wildcards go back to being unplayed.
    pub fn collect(&mut self, cards: Vec<Card>) {
        self.cards.extend(cards.into_iter().map(Card::reclaimed));
    }

    pub fn take_all(&mut self) -> Vec<Card> {
        std::mem::take(&mut self.cards)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

/// Shared build pile counting up from empty to twelve.
#[derive(Clone, Debug)]
pub struct FoundationPile {
    cards: Vec<Card>,
}

impl Default for FoundationPile {
    fn default() -> Self {
        Self {
            cards: Vec::with_capacity(MAX_CARD_VALUE as usize),
        }
    }
}

impl FoundationPile {
    pub fn top(&self) -> Option<Card> {
        self.cards.last().copied()
    }

    /// Value of the top card, or 0 when empty.
    pub fn top_value(&self) -> u8 {
        self.top().and_then(|card| card.value()).unwrap_or(0)
    }

    pub fn next_value(&self) -> u8 {
        self.top_value() % MAX_CARD_VALUE + 1
    }

    /// Pushes a card that has already been resolved against `next_value`.
    pub fn push(&mut self, card: Card) {
        debug_assert_eq!(card.value(), Some(self.next_value()));
        self.cards.push(card);
    }

    pub fn is_complete(&self) -> bool {
        self.top_value() == MAX_CARD_VALUE
    }

    pub fn take_cards(&mut self) -> Vec<Card> {
        std::mem::take(&mut self.cards)
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

/// A player's reserve; only the top is visible.
#[derive(Clone, Debug, Default)]
pub struct StockPile {
    cards: Vec<Card>,
}

impl StockPile {
    pub fn push(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn top(&self) -> Option<Card> {
        self.cards.last().copied()
    }

    pub fn pop(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

/// Up to five cards held by a player.
#[derive(Clone, Debug)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Default for Hand {
    fn default() -> Self {
        Self {
            cards: Vec::with_capacity(HAND_SIZE),
        }
    }
}

impl Hand {
    pub fn push(&mut self, card: Card) {
        debug_assert!(!self.is_full());
        self.cards.push(card);
    }

    pub fn get(&self, index: usize) -> Option<Card> {
        self.cards.get(index).copied()
    }

    /// Removes the card at `index`; later cards shift down one slot.
    pub fn remove(&mut self, index: usize) -> Option<Card> {
        (index < self.cards.len()).then(|| self.cards.remove(index))
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Slot-by-slot contents, empty slots as `None`.
    pub fn slots(&self) -> [Option<Card>; HAND_SIZE] {
        std::array::from_fn(|idx| self.get(idx))
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.cards.len() >= HAND_SIZE
    }
}

/// One of a player's four personal stacks; only the top card is playable.
#[derive(Clone, Debug, Default)]
pub struct DiscardPile {
    cards: Vec<Card>,
}

impl DiscardPile {
    pub fn push(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn top(&self) -> Option<Card> {
        self.cards.last().copied()
    }

    pub fn pop(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn foundation_wraps_next_value_after_twelve() {
        let mut pile = FoundationPile::default();
        assert_eq!(pile.next_value(), 1);
        for value in 1..=11 {
            pile.push(Card::Number(value));
        }
        assert_eq!(pile.next_value(), 12);
        pile.push(Card::PlayedSkipBo(12));
        assert!(pile.is_complete());
        let mut reclaim = ReclaimPile::default();
        reclaim.collect(pile.take_cards());
        assert_eq!(reclaim.len(), 12);
        assert!(pile.is_empty());
        assert_eq!(pile.next_value(), 1);
        assert!(reclaim.take_all().contains(&Card::SkipBo));
    }

    #[test]
    fn hand_removal_shifts_later_slots() {
        let mut hand = Hand::default();
        for value in [3, 4, 5] {
            hand.push(Card::Number(value));
        }
        assert_eq!(hand.remove(0), Some(Card::Number(3)));
        assert_eq!(hand.slots()[0], Some(Card::Number(4)));
        assert_eq!(hand.slots()[2], None);
        assert_eq!(hand.remove(7), None);
    }

    #[test]
    fn shuffle_in_keeps_every_card() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut pile = DrawPile::from_cards(vec![Card::Number(1); 3]);
        pile.shuffle_in(vec![Card::SkipBo; 4], &mut rng);
        assert_eq!(pile.len(), 7);
        let mut wilds = 0;
        while let Some(card) = pile.draw() {
            if card.is_skip_bo() {
                wilds += 1;
            }
        }
        assert_eq!(wilds, 4);
    }
}
