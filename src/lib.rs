//! Two-player Skip-Bo engine with a search-based automated opponent.

pub mod action;
pub mod bot;
pub mod bots;
pub mod card;
pub mod error;
pub mod event;
pub mod game;
pub mod piles;
pub mod planner;
pub mod player;
pub mod state;
pub mod visualize;

pub use crate::action::{Action, CardSource, PlayerId};
pub use crate::bot::Bot;
pub use crate::bots::{DrawDiscardBot, RandomBot};
pub use crate::card::Card;
pub use crate::error::{GameError, InvalidMove};
pub use crate::event::GameEvent;
pub use crate::game::{Game, GameBuilder, GameConfig, PlayerConfig, new_game};
pub use crate::planner::{Phase, PhaseOutcome, PlannerBot, PlannerConfig};
pub use crate::player::{PlayerColor, PlayerKind};
pub use crate::state::{
    FoundationView, GameSettings, GameStateView, GameStatus, Perspective, PlayerPublicState,
};
pub use crate::visualize::{VisualOptions, describe_action, render_state};
