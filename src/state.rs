use serde::{Deserialize, Serialize};

use crate::action::PlayerId;
use crate::card::{BUILD_PILE_COUNT, Card, DISCARD_PILE_COUNT, HAND_SIZE, NUM_PLAYERS};
use crate::error::GameError;
use crate::player::{PlayerColor, PlayerKind};

pub const MIN_RESERVE_DEPTH: usize = 5;
pub const MAX_RESERVE_DEPTH: usize = 49;
pub const DEFAULT_RESERVE_DEPTH: usize = 7;

/// Global constants for a running game.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameSettings {
    pub num_players: usize,
    pub reserve_depth: usize,
    pub hand_size: usize,
    pub discard_piles: usize,
    pub build_piles: usize,
}

impl GameSettings {
    pub fn new(reserve_depth: usize) -> Result<Self, GameError> {
        if !(MIN_RESERVE_DEPTH..=MAX_RESERVE_DEPTH).contains(&reserve_depth) {
            return Err(GameError::InvalidConfiguration(
                "reserve depth must be between 5 and 49",
            ));
        }
        Ok(Self {
            num_players: NUM_PLAYERS,
            reserve_depth,
            hand_size: HAND_SIZE,
            discard_piles: DISCARD_PILE_COUNT,
            build_piles: BUILD_PILE_COUNT,
        })
    }
}

/// Which seat an accessor reads, relative to whose turn it is.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Perspective {
    Current,
    Opponent,
}

/// Public information regarding a build pile.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct FoundationView {
    pub top: Option<Card>,
    pub len: usize,
    pub next_value: u8,
}

/// Public portion of a player's state that the opponent may observe.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerPublicState {
    pub id: PlayerId,
    pub name: String,
    pub color: PlayerColor,
    pub kind: PlayerKind,
    pub stock_count: usize,
    pub stock_top: Option<Card>,
    pub discard_tops: [Option<Card>; DISCARD_PILE_COUNT],
    pub discard_counts: [usize; DISCARD_PILE_COUNT],
    pub hand_size: usize,
    pub is_current: bool,
}

/// Status of the entire game.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    Finished { winner: PlayerId },
}

/// Snapshot from the current player's seat; the opponent's hand is reduced to a count.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameStateView {
    pub settings: GameSettings,
    pub status: GameStatus,
    pub turn: u32,
    pub has_drawn: bool,
    pub current_player: PlayerId,
    pub draw_pile_count: usize,
    pub reclaim_pile_count: usize,
    pub foundations: [FoundationView; BUILD_PILE_COUNT],
    pub players: Vec<PlayerPublicState>,
    pub hand: Vec<Card>,
}

impl GameStateView {
    pub fn player(&self, perspective: Perspective) -> Option<&PlayerPublicState> {
        let wanted = match perspective {
            Perspective::Current => self.current_player,
            Perspective::Opponent => (self.current_player + 1) % NUM_PLAYERS,
        };
        self.players.iter().find(|player| player.id == wanted)
    }
}

/// Per-seat part of [`StateKey`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SeatKey {
    pub stock_top: Option<Card>,
    pub stock_count: usize,
    pub hand: [Option<Card>; HAND_SIZE],
    pub discard_tops: [Option<Card>; DISCARD_PILE_COUNT],
    pub discard_counts: [usize; DISCARD_PILE_COUNT],
}

/// Coarse structural identity of a game state, used to deduplicate search nodes.
///
/// Only pile sizes and visible tops take part; buried cards do not.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct StateKey {
    pub draw_pile_count: usize,
    pub reclaim_pile_count: usize,
    pub foundation_tops: [Option<Card>; BUILD_PILE_COUNT],
    pub seats: [SeatKey; NUM_PLAYERS],
}
