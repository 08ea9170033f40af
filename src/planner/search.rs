//! Best-first search over cloned game states.
//!
//! Each phase of the planner plugs a [`Goal`] into [`best_first`]: the goal
//! decides when a state is good enough, how children are scored, and which
//! children are worth keeping. Expansion only ever plays cards from the hand
//! or the discard tops onto foundations, so a search never draws or discards.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};

use log::trace;

use crate::action::{Action, CardSource};
use crate::card::{BUILD_PILE_COUNT, DISCARD_PILE_COUNT};
use crate::game::Game;
use crate::planner::config::PlannerConfig;
use crate::state::{Perspective, StateKey};

/// Phase-specific behaviour plugged into [`best_first`]. Lower scores pop first.
pub trait Goal {
    /// Goal test on a popped node.
    fn reached(&self, game: &Game, moves: &[Action]) -> bool;

    /// When true, a node only counts once it has no admitted children.
    fn needs_leaf(&self) -> bool {
        false
    }

    /// A move tried on every popped node before generic expansion; when it
    /// applies, the search ends with it.
    fn shortcut(&self, _game: &Game) -> Option<(Action, Game)> {
        None
    }

    /// Whether a child reached by a play is kept at all.
    fn admits(&self, _child: &Game, _from_wild: bool) -> bool {
        true
    }

    /// Score of a child; `wilds_used` counts wild plays along its path.
    fn score(&self, child: &Game, wilds_used: u32) -> u32;
}

/// How a phase search ended.
#[derive(Clone, Debug)]
pub enum SearchOutcome {
    /// A state satisfying the goal, with the plays that reach it.
    Found { moves: Vec<Action>, game: Game },
    /// Every reachable state was examined without meeting the goal.
    Unreachable,
    /// The expansion budget ran out first.
    Exhausted,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub expanded: usize,
    pub generated: usize,
    pub duplicates: usize,
    pub dropped: usize,
}

#[derive(Clone, Debug)]
pub struct SearchResult {
    pub outcome: SearchOutcome,
    pub stats: SearchStats,
}

struct SearchNode {
    score: u32,
    order: u64,
    wilds_used: u32,
    game: Game,
    moves: Vec<Action>,
}

impl PartialEq for SearchNode {
    fn eq(&self, other: &Self) -> bool {
        self.score == other.score && self.order == other.order
    }
}

impl Eq for SearchNode {}

// Reversed so the max-heap pops the lowest score, oldest first among equals.
impl Ord for SearchNode {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .score
            .cmp(&self.score)
            .then_with(|| other.order.cmp(&self.order))
    }
}

impl PartialOrd for SearchNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A single legal play from a state, applied to its own clone.
pub struct Child {
    pub action: Action,
    pub game: Game,
    pub from_wild: bool,
}

/// Every hand or discard-top play the current player can make from `game`.
pub fn expand(game: &Game) -> Vec<Child> {
    let hand_len = game.hand_count(Perspective::Current);
    let sources = (0..hand_len)
        .map(CardSource::Hand)
        .chain((0..DISCARD_PILE_COUNT).map(CardSource::Discard));
    let mut children = Vec::new();
    for source in sources {
        let Some(card) = game.source_card(source) else {
            continue;
        };
        for build_pile in 0..BUILD_PILE_COUNT {
            if !game.can_play(source, build_pile) {
                continue;
            }
            let mut next = game.clone();
            if next.play(source, build_pile).is_err() {
                continue;
            }
            children.push(Child {
                action: Action::Play { source, build_pile },
                game: next,
                from_wild: card.is_skip_bo(),
            });
        }
    }
    children
}

pub fn best_first<G: Goal>(start: &Game, goal: &G, config: &PlannerConfig) -> SearchResult {
    let mut stats = SearchStats::default();
    let mut frontier = BinaryHeap::new();
    let mut seen: HashSet<StateKey> = HashSet::new();
    let mut order = 0u64;

    // Children clone the root, so start from an empty event queue.
    let mut root = start.clone();
    root.drain_events();
    seen.insert(root.state_key());
    frontier.push(SearchNode {
        score: goal.score(&root, 0),
        order,
        wilds_used: 0,
        game: root,
        moves: Vec::new(),
    });

    while let Some(node) = frontier.pop() {
        if !goal.needs_leaf() && goal.reached(&node.game, &node.moves) {
            return found(node.moves, node.game, stats);
        }
        if let Some((action, game)) = goal.shortcut(&node.game) {
            let mut moves = node.moves;
            moves.push(action);
            return found(moves, game, stats);
        }
        // The budget bounds expansions; goal tests on popped nodes are free.
        if stats.expanded >= config.max_expansions {
            trace!("search exhausted: {stats:?}");
            return SearchResult {
                outcome: SearchOutcome::Exhausted,
                stats,
            };
        }

        stats.expanded += 1;
        let children: Vec<Child> = expand(&node.game)
            .into_iter()
            .filter(|child| goal.admits(&child.game, child.from_wild))
            .collect();
        if goal.needs_leaf() && children.is_empty() && goal.reached(&node.game, &node.moves) {
            return found(node.moves, node.game, stats);
        }

        for child in children {
            stats.generated += 1;
            if !seen.insert(child.game.state_key()) {
                stats.duplicates += 1;
                continue;
            }
            if frontier.len() >= config.max_frontier {
                stats.dropped += 1;
                continue;
            }
            let wilds_used = node.wilds_used + u32::from(child.from_wild);
            let mut moves = node.moves.clone();
            moves.push(child.action);
            order += 1;
            frontier.push(SearchNode {
                score: goal.score(&child.game, wilds_used),
                order,
                wilds_used,
                game: child.game,
                moves,
            });
        }
    }

    trace!("search space empty: {stats:?}");
    SearchResult {
        outcome: SearchOutcome::Unreachable,
        stats,
    }
}

fn found(moves: Vec<Action>, game: Game, stats: SearchStats) -> SearchResult {
    trace!("goal reached after {} plays: {stats:?}", moves.len());
    SearchResult {
        outcome: SearchOutcome::Found { moves, game },
        stats,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::Card;
    use crate::game::GameBuilder;
    use crate::planner::goals::Block;

    struct EmptyFoundationCount;

    impl Goal for EmptyFoundationCount {
        fn reached(&self, game: &Game, _moves: &[Action]) -> bool {
            (0..BUILD_PILE_COUNT).all(|idx| game.foundation_top(idx).is_some())
        }

        fn score(&self, child: &Game, _wilds_used: u32) -> u32 {
            (0..BUILD_PILE_COUNT)
                .filter(|idx| child.foundation_top(*idx).is_none())
                .count() as u32
        }
    }

    fn game_with_hand(hand: [Card; 5]) -> Game {
        let mut deck = vec![Card::Number(12); 10];
        deck.extend(hand);
        deck.extend(std::iter::repeat(Card::Number(9)).take(20));
        let mut game = GameBuilder::new()
            .with_deck(deck)
            .with_reserve_depth(5)
            .build()
            .expect("game");
        game.draw().expect("draw");
        game
    }

    #[test]
    fn finds_plays_that_reach_the_goal() {
        let start = game_with_hand([
            Card::Number(1),
            Card::Number(1),
            Card::Number(1),
            Card::Number(1),
            Card::Number(7),
        ]);
        let result = best_first(&start, &EmptyFoundationCount, &PlannerConfig::default());
        let SearchOutcome::Found { moves, game } = result.outcome else {
            panic!("expected the goal to be reachable");
        };
        assert_eq!(moves.len(), 4);
        assert_eq!(
            game.hand(Perspective::Current),
            Some(&[Card::Number(7)][..])
        );
        assert!(result.stats.duplicates > 0);
    }

    #[test]
    fn reports_unreachable_goal() {
        let start = game_with_hand([
            Card::Number(1),
            Card::Number(5),
            Card::Number(6),
            Card::Number(7),
            Card::Number(8),
        ]);
        let result = best_first(&start, &EmptyFoundationCount, &PlannerConfig::default());
        assert!(matches!(result.outcome, SearchOutcome::Unreachable));
    }

    #[test]
    fn stops_when_budget_is_spent() {
        let start = game_with_hand([
            Card::Number(1),
            Card::Number(2),
            Card::Number(3),
            Card::Number(4),
            Card::Number(8),
        ]);
        let config = PlannerConfig::default().with_max_expansions(1);
        let result = best_first(&start, &EmptyFoundationCount, &config);
        assert!(matches!(result.outcome, SearchOutcome::Exhausted));
        assert_eq!(result.stats.expanded, 1);
    }

    #[test]
    fn goal_met_at_the_root_needs_no_budget() {
        let start = game_with_hand([
            Card::Number(9),
            Card::Number(9),
            Card::Number(9),
            Card::Number(9),
            Card::Number(9),
        ]);
        let config = PlannerConfig::default().with_max_expansions(0);
        let result = best_first(&start, &Block::new(3), &config);
        let SearchOutcome::Found { moves, .. } = result.outcome else {
            panic!("root already blocks the value");
        };
        assert!(moves.is_empty());
        assert_eq!(result.stats.expanded, 0);
    }

    #[test]
    fn budget_does_not_hide_a_goal_popped_after_it_runs_out() {
        let start = game_with_hand([
            Card::Number(1),
            Card::Number(1),
            Card::Number(1),
            Card::Number(1),
            Card::Number(9),
        ]);
        // The fourth expansion generates the goal state; popping it costs nothing.
        let config = PlannerConfig::default().with_max_expansions(4);
        let result = best_first(&start, &EmptyFoundationCount, &config);
        assert!(matches!(result.outcome, SearchOutcome::Found { .. }));
        assert_eq!(result.stats.expanded, 4);
    }

    #[test]
    fn children_own_independent_state() {
        let start = game_with_hand([
            Card::Number(1),
            Card::Number(2),
            Card::Number(9),
            Card::Number(9),
            Card::SkipBo,
        ]);
        let children = expand(&start);
        assert_eq!(start.hand_count(Perspective::Current), 5);
        assert!(
            children
                .iter()
                .all(|child| child.game.hand_count(Perspective::Current) == 4)
        );
        assert_eq!(children.iter().filter(|child| child.from_wild).count(), 4);
        assert_eq!(children.len(), 8);
    }
}
