use thiserror::Error;

/// Errors that can occur when manipulating the game state.
///
/// Both kinds are recoverable: the state is left untouched when one is returned.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("invalid move: {0}")]
    InvalidMove(#[from] InvalidMove),
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),
}

/// Details of rule violations.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum InvalidMove {
    #[error("hand index {0} is out of range")]
    HandIndex(usize),
    #[error("discard pile index {0} is out of range")]
    DiscardIndex(usize),
    #[error("build pile index {0} is out of range")]
    BuildPileIndex(usize),
    #[error("no card available in the selected source")]
    NoCardAvailable,
    #[error("card does not match required value {required}")]
    CardMismatch { required: u8 },
    #[error("player must draw before playing from the hand or ending the turn")]
    MustDrawFirst,
    #[error("cannot draw again until the hand is played out")]
    AlreadyDrawn,
    #[error("player must discard before ending turn")]
    HandNotEmpty,
    #[error("game is already over")]
    GameOver,
}

impl GameError {
    /// Returns the rule violation, if this error is one.
    pub fn as_invalid_move(&self) -> Option<InvalidMove> {
        match self {
            GameError::InvalidMove(invalid) => Some(*invalid),
            GameError::InvalidConfiguration(_) => None,
        }
    }
}
