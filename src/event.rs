use serde::{Deserialize, Serialize};

use crate::action::{CardSource, PlayerId};

/// Tag appended to a game's event queue after every successful mutation.
///
/// Presentation layers drain the queue and redraw; the tags carry no diff.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Started,
    Drew {
        player: PlayerId,
        count: usize,
    },
    Played {
        player: PlayerId,
        source: CardSource,
        build_pile: usize,
    },
    FoundationCleared {
        build_pile: usize,
    },
    Discarded {
        player: PlayerId,
        discard_pile: usize,
    },
    TurnAdvanced {
        next_player: PlayerId,
    },
    GameOver {
        winner: PlayerId,
    },
}
