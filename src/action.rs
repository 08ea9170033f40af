use serde::{Deserialize, Serialize};

/// Zero-based index of a player within the game.
pub type PlayerId = usize;

/// Location a card can be taken from when performing a play action.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum CardSource {
    /// Card taken from the active player's hand by index.
    Hand(usize),
    /// Card taken from the active player's stock pile (top card).
    Stock,
    /// Card taken from one of the active player's discard piles (top card).
    Discard(usize),
}

/// Action available to the current player.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Fill the hand up to five cards from the draw pile.
    Draw,
    /// Play a card from a source onto the specified build pile.
    Play {
        source: CardSource,
        build_pile: usize,
    },
    /// Discard a card from the hand onto one of the four personal discard piles.
    Discard {
        hand_index: usize,
        discard_pile: usize,
    },
    /// Finish the turn when the hand is empty and nothing is left to discard.
    EndTurn,
}

