//! End-of-turn discard choice: a fixed chain of rules, first match wins.
//!
//! Piles are scanned in index order, hand slots in index order. Wild cards are
//! never picked, except by the unconditional fallback.

use crate::card::{Card, DISCARD_PILE_COUNT};

/// Which rule produced a [`DiscardChoice`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DiscardRule {
    /// Same value as a pile top.
    ExactMatch,
    /// One below a pile top.
    OneBelow,
    /// A duplicated value onto an empty pile.
    DuplicateOnEmpty,
    /// The highest value onto an empty pile.
    HighestOnEmpty,
    /// Two below a pile top.
    TwoBelow,
    /// Three below a pile top.
    ThreeBelow,
    /// First hand slot onto the last pile.
    Fallback,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DiscardChoice {
    pub hand_index: usize,
    pub discard_pile: usize,
    pub rule: DiscardRule,
}

pub fn choose_discard(
    hand: &[Card],
    discard_tops: &[Option<Card>; DISCARD_PILE_COUNT],
) -> DiscardChoice {
    let choice = |hand_index, discard_pile, rule| DiscardChoice {
        hand_index,
        discard_pile,
        rule,
    };

    if let Some((slot, pile)) = below_top(hand, discard_tops, 0) {
        return choice(slot, pile, DiscardRule::ExactMatch);
    }
    if let Some((slot, pile)) = below_top(hand, discard_tops, 1) {
        return choice(slot, pile, DiscardRule::OneBelow);
    }
    if let Some(empty) = discard_tops.iter().position(Option::is_none) {
        if let Some(slot) = lowest_duplicate(hand) {
            return choice(slot, empty, DiscardRule::DuplicateOnEmpty);
        }
        if let Some(slot) = highest(hand) {
            return choice(slot, empty, DiscardRule::HighestOnEmpty);
        }
    }
    if let Some((slot, pile)) = below_top(hand, discard_tops, 2) {
        return choice(slot, pile, DiscardRule::TwoBelow);
    }
    if let Some((slot, pile)) = below_top(hand, discard_tops, 3) {
        return choice(slot, pile, DiscardRule::ThreeBelow);
    }
    choice(0, DISCARD_PILE_COUNT - 1, DiscardRule::Fallback)
}

/// First (pile, slot) pair where a natural hand card sits `gap` below a natural pile top.
fn below_top(
    hand: &[Card],
    discard_tops: &[Option<Card>; DISCARD_PILE_COUNT],
    gap: u8,
) -> Option<(usize, usize)> {
    discard_tops.iter().enumerate().find_map(|(pile, top)| {
        let top = top.and_then(|card| card.natural_value())?;
        hand.iter()
            .position(|card| {
                card.natural_value()
                    .is_some_and(|value| value.checked_add(gap) == Some(top))
            })
            .map(|slot| (slot, pile))
    })
}

/// Slot of the first card whose value is the lowest value held at least twice.
fn lowest_duplicate(hand: &[Card]) -> Option<usize> {
    let value = hand
        .iter()
        .filter_map(Card::natural_value)
        .filter(|value| {
            hand.iter()
                .filter(|card| card.natural_value() == Some(*value))
                .count()
                >= 2
        })
        .min()?;
    hand.iter()
        .position(|card| card.natural_value() == Some(value))
}

/// Slot of the first card holding the highest natural value.
fn highest(hand: &[Card]) -> Option<usize> {
    let value = hand.iter().filter_map(Card::natural_value).max()?;
    hand.iter()
        .position(|card| card.natural_value() == Some(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn n(value: u8) -> Card {
        Card::Number(value)
    }

    #[test]
    fn exact_match_wins_over_everything() {
        let hand = [n(3), n(7), n(7), Card::SkipBo];
        let tops = [Some(n(9)), Some(n(7)), None, None];
        let chosen = choose_discard(&hand, &tops);
        assert_eq!(
            chosen,
            DiscardChoice {
                hand_index: 1,
                discard_pile: 1,
                rule: DiscardRule::ExactMatch
            }
        );
    }

    #[test]
    fn one_below_scans_piles_before_slots() {
        let hand = [n(5), n(8)];
        let tops = [Some(n(9)), Some(n(6)), Some(n(2)), Some(n(1))];
        let chosen = choose_discard(&hand, &tops);
        assert_eq!((chosen.hand_index, chosen.discard_pile), (1, 0));
        assert_eq!(chosen.rule, DiscardRule::OneBelow);
    }

    #[test]
    fn duplicate_goes_to_first_empty_pile() {
        let hand = [n(9), n(4), n(9), n(4), Card::SkipBo];
        let tops = [Some(n(1)), None, Some(n(12)), None];
        let chosen = choose_discard(&hand, &tops);
        assert_eq!(
            chosen,
            DiscardChoice {
                hand_index: 1,
                discard_pile: 1,
                rule: DiscardRule::DuplicateOnEmpty
            }
        );
    }

    #[test]
    fn highest_goes_to_empty_pile_when_no_duplicates() {
        let hand = [Card::SkipBo, n(3), n(10), n(6)];
        let tops = [None; DISCARD_PILE_COUNT];
        let chosen = choose_discard(&hand, &tops);
        assert_eq!((chosen.hand_index, chosen.discard_pile), (2, 0));
        assert_eq!(chosen.rule, DiscardRule::HighestOnEmpty);
    }

    #[test]
    fn two_below_then_three_below() {
        let tops = [Some(n(12)), Some(n(8)), Some(n(1)), Some(n(1))];
        let chosen = choose_discard(&[n(2), n(6)], &tops);
        assert_eq!((chosen.hand_index, chosen.discard_pile), (1, 1));
        assert_eq!(chosen.rule, DiscardRule::TwoBelow);
        let chosen = choose_discard(&[n(2), n(9)], &tops);
        assert_eq!((chosen.hand_index, chosen.discard_pile), (1, 0));
        assert_eq!(chosen.rule, DiscardRule::ThreeBelow);
    }

    #[test]
    fn falls_back_to_first_slot_and_last_pile() {
        let hand = [n(2), n(4), n(6), n(8), n(10)];
        let tops = [Some(n(1)); DISCARD_PILE_COUNT];
        let chosen = choose_discard(&hand, &tops);
        assert_eq!(
            chosen,
            DiscardChoice {
                hand_index: 0,
                discard_pile: 3,
                rule: DiscardRule::Fallback
            }
        );
    }

    #[test]
    fn wild_tops_and_wild_cards_never_match() {
        let hand = [Card::SkipBo, Card::SkipBo];
        let tops = [Some(Card::SkipBo), Some(n(5)), Some(n(5)), Some(n(5))];
        assert_eq!(choose_discard(&hand, &tops).rule, DiscardRule::Fallback);
    }

    #[test]
    fn identical_inputs_give_identical_choices() {
        let hand = [n(11), n(3), n(3), n(7), n(1)];
        let tops = [Some(n(5)), None, Some(n(9)), None];
        let first = choose_discard(&hand, &tops);
        for _ in 0..10 {
            assert_eq!(choose_discard(&hand, &tops), first);
        }
    }
}
