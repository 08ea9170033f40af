//! Goal tests and scoring for each search phase of a planned turn.

use crate::action::{Action, CardSource};
use crate::card::{BUILD_PILE_COUNT, Card, MAX_CARD_VALUE};
use crate::game::Game;
use crate::planner::search::Goal;
use crate::state::Perspective;

/// Cyclic distance from the closest foundation to accepting `value`; 0 means playable now.
pub fn reserve_distance(game: &Game, value: u8) -> u32 {
    let modulus = i32::from(MAX_CARD_VALUE);
    (0..BUILD_PILE_COUNT)
        .filter_map(|idx| game.foundation_next_value(idx))
        .map(|next| {
            let top = i32::from(next) - 1;
            (i32::from(value) - top + modulus - 1).rem_euclid(modulus) as u32
        })
        .min()
        .unwrap_or(0)
}

/// True when no foundation currently needs `value` next.
pub fn is_blocked(game: &Game, value: u8) -> bool {
    (0..BUILD_PILE_COUNT).all(|idx| game.foundation_next_value(idx) != Some(value))
}

/// The opponent's reserve value worth blocking; wild or missing reserves are unblockable.
pub fn block_target(game: &Game) -> Option<u8> {
    let top = game.stock_top(Perspective::Opponent)?;
    top.natural_value()
}

/// Get any card off the reserve. Every popped state first tries the reserve
/// directly; otherwise hand and discard plays are ranked by reserve distance.
pub struct ReservePlay {
    start_count: usize,
}

impl ReservePlay {
    pub fn new(start: &Game) -> Self {
        Self {
            start_count: start.stock_count(Perspective::Current),
        }
    }

    /// Foundation for a wild reserve card: the one leaving the most distinct
    /// foundation values afterwards, lowest index on ties.
    fn wild_target(game: &Game) -> Option<(usize, Game)> {
        let mut best: Option<(usize, usize, Game)> = None;
        for build_pile in 0..BUILD_PILE_COUNT {
            let mut next = game.clone();
            if next.play(CardSource::Stock, build_pile).is_err() {
                continue;
            }
            let mut values: Vec<u8> = (0..BUILD_PILE_COUNT)
                .filter_map(|idx| next.foundation_next_value(idx))
                .collect();
            values.sort_unstable();
            values.dedup();
            let distinct = values.len();
            if best.as_ref().is_none_or(|(count, _, _)| distinct > *count) {
                best = Some((distinct, build_pile, next));
            }
        }
        best.map(|(_, build_pile, next)| (build_pile, next))
    }
}

impl Goal for ReservePlay {
    fn reached(&self, game: &Game, _moves: &[Action]) -> bool {
        game.has_winner() || game.stock_count(Perspective::Current) < self.start_count
    }

    fn shortcut(&self, game: &Game) -> Option<(Action, Game)> {
        let target = match game.stock_top(Perspective::Current)? {
            Card::SkipBo => Self::wild_target(game),
            _ => (0..BUILD_PILE_COUNT).find_map(|build_pile| {
                let mut next = game.clone();
                next.play(CardSource::Stock, build_pile)
                    .ok()
                    .map(|_| (build_pile, next))
            }),
        };
        target.map(|(build_pile, next)| {
            let action = Action::Play {
                source: CardSource::Stock,
                build_pile,
            };
            (action, next)
        })
    }

    fn score(&self, child: &Game, _wilds_used: u32) -> u32 {
        let reserve = child.stock_top(Perspective::Current);
        match reserve.and_then(|card| card.natural_value()) {
            Some(value) => reserve_distance(child, value),
            None => 0,
        }
    }
}

/// Play the hand out entirely; emptier hands and fewer wilds rank first.
pub struct HandExhaustion;

impl Goal for HandExhaustion {
    fn reached(&self, game: &Game, moves: &[Action]) -> bool {
        !moves.is_empty() && game.hand_count(Perspective::Current) == 0
    }

    fn score(&self, child: &Game, wilds_used: u32) -> u32 {
        child.hand_count(Perspective::Current) as u32 + wilds_used
    }
}

/// Leave no foundation one below the opponent's reserve card.
pub struct Block {
    target: u8,
}

impl Block {
    pub fn new(target: u8) -> Self {
        Self { target }
    }
}

impl Goal for Block {
    fn reached(&self, game: &Game, _moves: &[Action]) -> bool {
        is_blocked(game, self.target)
    }

    fn score(&self, _child: &Game, wilds_used: u32) -> u32 {
        wilds_used
    }
}

/// Keep making non-wild plays until none is left, never reopening a block
/// that is in place.
pub struct ExtraPlays {
    keep_blocked: Option<u8>,
}

impl ExtraPlays {
    pub fn new(keep_blocked: Option<u8>) -> Self {
        Self { keep_blocked }
    }
}

impl Goal for ExtraPlays {
    fn reached(&self, game: &Game, _moves: &[Action]) -> bool {
        match self.keep_blocked {
            Some(target) => is_blocked(game, target),
            None => true,
        }
    }

    fn needs_leaf(&self) -> bool {
        true
    }

    fn admits(&self, child: &Game, from_wild: bool) -> bool {
        !from_wild && self.reached(child, &[])
    }

    fn score(&self, child: &Game, _wilds_used: u32) -> u32 {
        child.held_cards(Perspective::Current) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameBuilder;

    fn playing_game(stock_top: Card, hand: [Card; 5]) -> Game {
        let mut deck = Vec::new();
        for _ in 0..4 {
            deck.push(Card::Number(12));
            deck.push(Card::Number(12));
        }
        deck.push(stock_top);
        deck.push(Card::Number(12));
        deck.extend(hand);
        deck.extend(std::iter::repeat(Card::Number(10)).take(20));
        let mut game = GameBuilder::new()
            .with_deck(deck)
            .with_reserve_depth(5)
            .build()
            .expect("game");
        game.draw().expect("draw");
        game
    }

    #[test]
    fn reserve_distance_is_cyclic() {
        let mut game = playing_game(
            Card::Number(3),
            [
                Card::Number(1),
                Card::Number(2),
                Card::Number(9),
                Card::Number(9),
                Card::Number(9),
            ],
        );
        assert_eq!(reserve_distance(&game, 3), 2);
        assert_eq!(reserve_distance(&game, 1), 0);
        game.play(CardSource::Hand(0), 0).expect("play 1");
        game.play(CardSource::Hand(0), 0).expect("play 2");
        assert_eq!(reserve_distance(&game, 3), 0);
        assert_eq!(reserve_distance(&game, 2), 1);
        assert_eq!(reserve_distance(&game, 12), 9);
    }

    #[test]
    fn wild_reserve_prefers_the_most_diverse_foundations() {
        let mut game = playing_game(
            Card::SkipBo,
            [
                Card::Number(1),
                Card::Number(1),
                Card::Number(2),
                Card::Number(9),
                Card::Number(9),
            ],
        );
        game.play(CardSource::Hand(0), 0).expect("1 on pile 0");
        game.play(CardSource::Hand(0), 1).expect("1 on pile 1");
        game.play(CardSource::Hand(0), 1).expect("2 on pile 1");
        // Next values are now [2, 3, 1, 1]. The wild on pile 2 or 3 yields
        // {2, 3, 2, 1}; on pile 1 it yields {2, 4, 1, 1}; on pile 0 {3, 3, 1, 1}.
        let goal = ReservePlay::new(&game);
        let (action, next) = goal.shortcut(&game).expect("wild always plays");
        assert_eq!(
            action,
            Action::Play {
                source: CardSource::Stock,
                build_pile: 1
            }
        );
        assert_eq!(next.foundation_top(1), Some(Card::PlayedSkipBo(3)));
        assert!(goal.reached(&next, &[action]));
    }

    #[test]
    fn block_target_skips_wild_reserves() {
        let game = playing_game(
            Card::Number(5),
            [
                Card::Number(1),
                Card::Number(2),
                Card::Number(9),
                Card::Number(9),
                Card::Number(9),
            ],
        );
        assert_eq!(block_target(&game), Some(12));
        assert!(is_blocked(&game, 12));
        assert!(!is_blocked(&game, 1));
    }
}
