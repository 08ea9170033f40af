//! Automated player that plans its whole turn by searching cloned game states.
//!
//! A turn runs through fixed phases. Drawing, getting the reserve card out and
//! emptying the hand repeat until the hand can no longer be played out; then
//! the planner tries to block the opponent's reserve card, makes whatever
//! non-wild plays remain, and discards.

pub mod config;
pub mod discard;
pub mod goals;
pub mod search;

use log::{debug, trace};

use crate::action::Action;
use crate::bot::Bot;
use crate::error::{GameError, InvalidMove};
use crate::game::Game;
use crate::state::Perspective;
use crate::visualize::describe_action;

pub use config::PlannerConfig;
pub use discard::{DiscardChoice, DiscardRule, choose_discard};
pub use goals::{Block, ExtraPlays, HandExhaustion, ReservePlay, block_target, is_blocked};
pub use search::{Goal, SearchOutcome, SearchResult, SearchStats, best_first};

/// Stage of a planned turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    Draw,
    ReservePlay,
    HandExhaustion,
    Block,
    ExtraPlays,
    Discard,
}

/// What happened when a phase ran.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PhaseOutcome {
    /// The goal was met; `plays` moves were committed.
    Achieved { plays: usize },
    /// No reachable state met the goal.
    Unreachable,
    /// The search budget ran out.
    Exhausted,
    /// The phase did not apply to this position.
    Skipped,
}

impl PhaseOutcome {
    pub fn achieved(&self) -> bool {
        matches!(self, PhaseOutcome::Achieved { .. })
    }
}

/// Search-driven automated player.
#[derive(Clone, Debug, Default)]
pub struct PlannerBot {
    config: PlannerConfig,
    turn_log: Vec<String>,
    history: Vec<(Phase, PhaseOutcome)>,
}

impl PlannerBot {
    pub fn new(config: PlannerConfig) -> Self {
        Self {
            config,
            turn_log: Vec::new(),
            history: Vec::new(),
        }
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Moves made during the last turn, in order.
    pub fn turn_log(&self) -> &[String] {
        &self.turn_log
    }

    /// Hands the move log to the caller and clears it.
    pub fn take_turn_log(&mut self) -> Vec<String> {
        std::mem::take(&mut self.turn_log)
    }

    /// Every phase run during the last turn with its outcome.
    pub fn phase_history(&self) -> &[(Phase, PhaseOutcome)] {
        &self.history
    }

    /// Plans and plays the current player's turn on a copy of `game`.
    pub fn plan_turn(&mut self, game: &Game) -> Result<Game, GameError> {
        if game.has_winner() {
            return Err(InvalidMove::GameOver.into());
        }
        self.turn_log.clear();
        self.history.clear();
        let mut working = game.clone();
        debug!(
            "planning turn {} for {}",
            working.turn(),
            working.player_name(Perspective::Current)
        );

        while !working.has_winner() {
            if self.draw_phase(&mut working)? {
                continue;
            }
            if self.reserve_phase(&mut working)? {
                continue;
            }
            if !self.hand_phase(&mut working)? {
                break;
            }
        }
        if working.has_winner() {
            return Ok(working);
        }

        let block = self.block_phase(&mut working)?;
        self.extra_phase(&mut working, block)?;
        self.discard_phase(&mut working)?;
        Ok(working)
    }

    fn draw_phase(&mut self, working: &mut Game) -> Result<bool, GameError> {
        if !working.can_draw() {
            return Ok(false);
        }
        let drawn = working.draw()?;
        if drawn == 0 {
            self.record(Phase::Draw, PhaseOutcome::Unreachable);
            return Ok(false);
        }
        self.turn_log.push(format!("Drew {drawn} cards"));
        self.record(Phase::Draw, PhaseOutcome::Achieved { plays: 0 });
        Ok(true)
    }

    fn reserve_phase(&mut self, working: &mut Game) -> Result<bool, GameError> {
        let goal = ReservePlay::new(working);
        self.run_search(Phase::ReservePlay, working, &goal)
    }

    fn hand_phase(&mut self, working: &mut Game) -> Result<bool, GameError> {
        if working.hand_count(Perspective::Current) == 0 {
            self.record(Phase::HandExhaustion, PhaseOutcome::Skipped);
            return Ok(false);
        }
        self.run_search(Phase::HandExhaustion, working, &HandExhaustion)
    }

    /// Returns the blocked value when a block is in place afterwards.
    fn block_phase(&mut self, working: &mut Game) -> Result<Option<u8>, GameError> {
        let Some(target) = block_target(working) else {
            self.record(Phase::Block, PhaseOutcome::Skipped);
            return Ok(None);
        };
        let blocked = self.run_search(Phase::Block, working, &Block::new(target))?;
        Ok(blocked.then_some(target))
    }

    fn extra_phase(&mut self, working: &mut Game, block: Option<u8>) -> Result<(), GameError> {
        self.run_search(Phase::ExtraPlays, working, &ExtraPlays::new(block))?;
        Ok(())
    }

    fn discard_phase(&mut self, working: &mut Game) -> Result<(), GameError> {
        if working.has_winner() {
            return Ok(());
        }
        if working.hand_count(Perspective::Current) == 0 && working.can_draw() {
            let drawn = working.draw()?;
            if drawn > 0 {
                self.turn_log.push(format!("Drew {drawn} cards"));
            }
        }
        let action = match working.hand(Perspective::Current) {
            Some(hand) if !hand.is_empty() => {
                let choice = choose_discard(hand, &working.discard_tops(Perspective::Current));
                debug!("discard rule {:?}", choice.rule);
                Action::Discard {
                    hand_index: choice.hand_index,
                    discard_pile: choice.discard_pile,
                }
            }
            _ => Action::EndTurn,
        };
        self.turn_log.push(describe_action(working, &action));
        working.apply_action(action)?;
        self.record(Phase::Discard, PhaseOutcome::Achieved { plays: 0 });
        Ok(())
    }

    /// Runs one phase search and commits the winning line. Returns whether the goal was met.
    fn run_search<G: Goal>(
        &mut self,
        phase: Phase,
        working: &mut Game,
        goal: &G,
    ) -> Result<bool, GameError> {
        let result = best_first(working, goal, &self.config);
        trace!("{phase:?} search stats: {:?}", result.stats);
        match result.outcome {
            SearchOutcome::Found { moves, .. } => {
                self.commit(working, &moves)?;
                self.record(phase, PhaseOutcome::Achieved { plays: moves.len() });
                Ok(true)
            }
            SearchOutcome::Unreachable => {
                debug!("{phase:?}: could not achieve phase goal");
                self.record(phase, PhaseOutcome::Unreachable);
                Ok(false)
            }
            SearchOutcome::Exhausted => {
                debug!("{phase:?}: search budget exhausted");
                self.record(phase, PhaseOutcome::Exhausted);
                Ok(false)
            }
        }
    }

    /// Replays a found line on the working state, logging each play.
    fn commit(&mut self, working: &mut Game, moves: &[Action]) -> Result<(), GameError> {
        for action in moves {
            let text = describe_action(working, action);
            working.apply_action(*action)?;
            debug!("{text}");
            self.turn_log.push(text);
        }
        Ok(())
    }

    fn record(&mut self, phase: Phase, outcome: PhaseOutcome) {
        self.history.push((phase, outcome));
    }
}

impl Bot for PlannerBot {
    fn take_turn(&mut self, game: &Game) -> Result<Game, GameError> {
        self.plan_turn(game)
    }
}
