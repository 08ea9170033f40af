use std::fmt::Write;

use crate::action::{Action, CardSource};
use crate::card::Card;
use crate::game::Game;
use crate::state::{GameStateView, GameStatus};

/// Customize state rendering for CLI visualization.
#[derive(Clone, Copy, Debug)]
pub struct VisualOptions {
    pub show_discard_sizes: bool,
}

impl Default for VisualOptions {
    fn default() -> Self {
        Self {
            show_discard_sizes: true,
        }
    }
}

pub fn render_state(state: &GameStateView) -> String {
    render_state_with_options(state, VisualOptions::default())
}

pub fn render_state_with_options(state: &GameStateView, options: VisualOptions) -> String {
    let mut out = String::new();
    let status = match state.status {
        GameStatus::Ongoing => String::from("Ongoing"),
        GameStatus::Finished { winner } => format!("Finished (winner: Player {winner})"),
    };
    let _ = writeln!(out, "Game status: {status}  |  Turn {}", state.turn);
    let _ = writeln!(
        out,
        "Draw pile: {}  |  Reclaim pile: {}",
        state.draw_pile_count, state.reclaim_pile_count
    );
    let _ = writeln!(out, "Foundations:");
    for (idx, pile) in state.foundations.iter().enumerate() {
        let top = pile.top.map(format_card).unwrap_or_else(|| String::from("--"));
        let _ = writeln!(out, "  [{idx}] top {top}  next {}", pile.next_value);
    }
    let _ = writeln!(out, "Players:");
    for player in &state.players {
        let current_tag = if player.is_current { " <- current" } else { "" };
        let stock_top = player
            .stock_top
            .map(format_card)
            .unwrap_or_else(|| String::from("--"));
        let discard_display = player
            .discard_tops
            .iter()
            .zip(player.discard_counts.iter())
            .enumerate()
            .map(|(idx, (top, count))| {
                let top = top.map(format_card).unwrap_or_else(|| String::from("--"));
                if options.show_discard_sizes {
                    format!("{idx}:{top} ({count})")
                } else {
                    format!("{idx}:{top}")
                }
            })
            .collect::<Vec<_>>()
            .join("  ");
        let _ = writeln!(
            out,
            "  {} ({:?}) - stock {} (top: {}){}",
            player.name, player.color, player.stock_count, stock_top, current_tag
        );
        let _ = writeln!(out, "    Discards: {discard_display}");
        if player.is_current {
            if state.hand.is_empty() {
                let _ = writeln!(out, "    Hand: (empty)");
            } else {
                let hand_display = state
                    .hand
                    .iter()
                    .enumerate()
                    .map(|(idx, card)| format!("{idx}:{}", format_card(*card)))
                    .collect::<Vec<_>>()
                    .join("  ");
                let _ = writeln!(out, "    Hand: {hand_display}");
            }
        } else {
            let _ = writeln!(out, "    Hand size: {}", player.hand_size);
        }
    }
    out
}

/// Human-readable description of `action` as the current player of `game` would perform it.
pub fn describe_action(game: &Game, action: &Action) -> String {
    match action {
        Action::Draw => String::from("Draw up to a full hand"),
        Action::Play { source, build_pile } => {
            let card = game
                .source_card(*source)
                .map(format_card)
                .unwrap_or_else(|| String::from("--"));
            let source_desc = match source {
                CardSource::Hand(index) => format!("hand[{index}] {card}"),
                CardSource::Stock => format!("stock top {card}"),
                CardSource::Discard(index) => format!("discard[{index}] {card}"),
            };
            let needs = game.foundation_next_value(*build_pile).unwrap_or(0);
            format!("Play {source_desc} to build pile {build_pile} (needs {needs})")
        }
        Action::Discard {
            hand_index,
            discard_pile,
        } => {
            let card = game
                .source_card(CardSource::Hand(*hand_index))
                .map(format_card)
                .unwrap_or_else(|| String::from("--"));
            format!("Discard hand[{hand_index}] {card} to pile {discard_pile}")
        }
        Action::EndTurn => String::from("End turn"),
    }
}

fn format_card(card: Card) -> String {
    card.to_string()
}
