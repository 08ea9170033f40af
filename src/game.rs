use std::array::from_fn;

use log::{debug, info};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::action::{Action, CardSource, PlayerId};
use crate::card::{BUILD_PILE_COUNT, Card, DISCARD_PILE_COUNT, NUM_PLAYERS};
use crate::error::{GameError, InvalidMove};
use crate::event::GameEvent;
use crate::piles::{DrawPile, FoundationPile, ReclaimPile};
use crate::player::{PlayerColor, PlayerKind, PlayerState, validate_name};
use crate::state::{
    DEFAULT_RESERVE_DEPTH, FoundationView, GameSettings, GameStateView, GameStatus, Perspective,
    PlayerPublicState, SeatKey, StateKey,
};

const DEFAULT_SEED: u64 = 0x5EED_5EED_5EED_5EED;

/// Identity of one seat at game creation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerConfig {
    pub name: String,
    pub color: PlayerColor,
    pub kind: PlayerKind,
}

impl PlayerConfig {
    pub fn new(name: impl Into<String>, color: PlayerColor, kind: PlayerKind) -> Self {
        Self {
            name: name.into(),
            color,
            kind,
        }
    }
}

/// Configuration required to bootstrap a game instance.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub player_one: PlayerConfig,
    pub player_two: PlayerConfig,
    pub reserve_depth: usize,
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            player_one: PlayerConfig::new("Player 1", PlayerColor::Cyan, PlayerKind::Human),
            player_two: PlayerConfig::new("Player 2", PlayerColor::Black, PlayerKind::Automated),
            reserve_depth: DEFAULT_RESERVE_DEPTH,
            seed: DEFAULT_SEED,
        }
    }
}

/// Builder that enables deterministic deck injection for testing and experiments.
#[derive(Clone, Debug, Default)]
pub struct GameBuilder {
    config: GameConfig,
    deck: Option<Vec<Card>>,
}

impl GameBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_player_one(mut self, player: PlayerConfig) -> Self {
        self.config.player_one = player;
        self
    }

    pub fn with_player_two(mut self, player: PlayerConfig) -> Self {
        self.config.player_two = player;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    /// Deal from this deck instead of a shuffled one. Reserves are dealt
    /// alternately from the front; the remainder becomes the draw pile, front first.
    pub fn with_deck(mut self, deck: Vec<Card>) -> Self {
        self.deck = Some(deck);
        self
    }

    pub fn with_reserve_depth(mut self, reserve_depth: usize) -> Self {
        self.config.reserve_depth = reserve_depth;
        self
    }

    pub fn build(self) -> Result<Game, GameError> {
        Game::from_builder(self)
    }
}

/// Creates a fresh game, validating names, colors and reserve depth.
pub fn new_game(
    player_one_name: &str,
    player_one_color: PlayerColor,
    player_two_name: &str,
    player_two_color: PlayerColor,
    player_two_kind: PlayerKind,
    reserve_depth: usize,
    seed: u64,
) -> Result<Game, GameError> {
    GameBuilder::new()
        .with_player_one(PlayerConfig::new(
            player_one_name,
            player_one_color,
            PlayerKind::Human,
        ))
        .with_player_two(PlayerConfig::new(
            player_two_name,
            player_two_color,
            player_two_kind,
        ))
        .with_reserve_depth(reserve_depth)
        .with_seed(seed)
        .build()
}

/// Core Skip-Bo game state and rules engine for two players.
///
/// Cloning produces a fully independent copy, random generator included.
#[derive(Clone, Debug)]
pub struct Game {
    settings: GameSettings,
    players: [PlayerState; NUM_PLAYERS],
    foundations: [FoundationPile; BUILD_PILE_COUNT],
    draw_pile: DrawPile,
    reclaim_pile: ReclaimPile,
    turn: u32,
    has_drawn: bool,
    winner: Option<PlayerId>,
    rng: StdRng,
    events: Vec<GameEvent>,
}

impl Game {
    pub fn builder() -> GameBuilder {
        GameBuilder::new()
    }

    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        GameBuilder::new().with_config(config).build()
    }

    pub fn settings(&self) -> GameSettings {
        self.settings
    }

    pub fn status(&self) -> GameStatus {
        match self.winner {
            Some(winner) => GameStatus::Finished { winner },
            None => GameStatus::Ongoing,
        }
    }

    pub fn has_winner(&self) -> bool {
        self.winner.is_some()
    }

    pub fn winner(&self) -> Option<PlayerId> {
        self.winner
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn current_player(&self) -> PlayerId {
        self.turn as usize % NUM_PLAYERS
    }

    pub fn opponent(&self) -> PlayerId {
        (self.current_player() + 1) % NUM_PLAYERS
    }

    pub fn has_drawn(&self) -> bool {
        self.has_drawn
    }

    /// True when `draw` would currently succeed.
    pub fn can_draw(&self) -> bool {
        !self.has_winner() && (!self.has_drawn || self.current().hand.is_empty())
    }

    /// Fills the current player's hand to five cards. Returns the number drawn.
    pub fn draw(&mut self) -> Result<usize, GameError> {
        self.ensure_ongoing()?;
        if self.has_drawn && !self.current().hand.is_empty() {
            return Err(InvalidMove::AlreadyDrawn.into());
        }
        let current = self.current_player();
        let mut drawn = 0;
        while !self.players[current].hand.is_full() {
            if self.draw_pile.is_empty() {
                self.replenish_draw_pile();
            }
            let Some(card) = self.draw_pile.draw() else {
                break;
            };
            self.players[current].hand.push(card);
            drawn += 1;
        }
        self.has_drawn = true;
        if self.draw_pile.is_low() {
            self.replenish_draw_pile();
        }
        self.events.push(GameEvent::Drew {
            player: current,
            count: drawn,
        });
        Ok(drawn)
    }

    /// Plays a card onto a foundation and returns the card as it now rests there.
    pub fn play(&mut self, source: CardSource, build_pile: usize) -> Result<Card, GameError> {
        let placed = self.validate_play(source, build_pile)?;
        let current = self.current_player();
        self.players[current].take_from_source(source)?;
        self.foundations[build_pile].push(placed);
        self.events.push(GameEvent::Played {
            player: current,
            source,
            build_pile,
        });
        if self.foundations[build_pile].is_complete() {
            let cleared = self.foundations[build_pile].take_cards();
            debug!(
                "foundation {build_pile} complete, reclaiming {} cards",
                cleared.len()
            );
            self.reclaim_pile.collect(cleared);
            self.events.push(GameEvent::FoundationCleared { build_pile });
        }
        if self.players[current].stock.is_empty() {
            info!(
                "{} emptied their reserve and wins",
                self.players[current].name
            );
            self.winner = Some(current);
            self.events.push(GameEvent::GameOver { winner: current });
        }
        Ok(placed)
    }

    /// True when `play(source, build_pile)` would succeed.
    pub fn can_play(&self, source: CardSource, build_pile: usize) -> bool {
        self.validate_play(source, build_pile).is_ok()
    }

    /// Moves a hand card to a discard pile and passes the turn.
    pub fn discard(&mut self, hand_index: usize, discard_pile: usize) -> Result<(), GameError> {
        self.ensure_ongoing()?;
        if !self.has_drawn {
            return Err(InvalidMove::MustDrawFirst.into());
        }
        if discard_pile >= DISCARD_PILE_COUNT {
            return Err(InvalidMove::DiscardIndex(discard_pile).into());
        }
        let current = self.current_player();
        let player = &mut self.players[current];
        let card = player
            .hand
            .remove(hand_index)
            .ok_or(InvalidMove::HandIndex(hand_index))?;
        player.discard_piles[discard_pile].push(card);
        self.events.push(GameEvent::Discarded {
            player: current,
            discard_pile,
        });
        self.advance_turn();
        Ok(())
    }

    /// Passes the turn without discarding; only legal with an empty hand after drawing.
    pub fn end_turn(&mut self) -> Result<(), GameError> {
        self.ensure_ongoing()?;
        if !self.has_drawn {
            return Err(InvalidMove::MustDrawFirst.into());
        }
        if !self.current().hand.is_empty() {
            return Err(InvalidMove::HandNotEmpty.into());
        }
        self.advance_turn();
        Ok(())
    }

    pub fn apply_action(&mut self, action: Action) -> Result<(), GameError> {
        match action {
            Action::Draw => self.draw().map(|_| ()),
            Action::Play { source, build_pile } => self.play(source, build_pile).map(|_| ()),
            Action::Discard {
                hand_index,
                discard_pile,
            } => self.discard(hand_index, discard_pile),
            Action::EndTurn => self.end_turn(),
        }
    }

    pub fn legal_actions(&self) -> Vec<Action> {
        if self.has_winner() {
            return Vec::new();
        }
        let mut actions = Vec::new();
        if self.can_draw() {
            actions.push(Action::Draw);
        }
        let player = self.current();
        let mut sources: Vec<CardSource> = (0..player.hand.len()).map(CardSource::Hand).collect();
        sources.push(CardSource::Stock);
        sources.extend((0..DISCARD_PILE_COUNT).map(CardSource::Discard));
        for source in sources {
            for build_pile in 0..BUILD_PILE_COUNT {
                if self.can_play(source, build_pile) {
                    actions.push(Action::Play { source, build_pile });
                }
            }
        }
        if self.has_drawn {
            if player.hand.is_empty() {
                actions.push(Action::EndTurn);
            } else {
                for discard_pile in 0..DISCARD_PILE_COUNT {
                    for hand_index in 0..player.hand.len() {
                        actions.push(Action::Discard {
                            hand_index,
                            discard_pile,
                        });
                    }
                }
            }
        }
        actions
    }

    /// The card a play from `source` would take, for the current player.
    pub fn source_card(&self, source: CardSource) -> Option<Card> {
        self.current().peek_source(source).ok()
    }

    pub fn player_name(&self, perspective: Perspective) -> &str {
        &self.seat(perspective).name
    }

    pub fn player_color(&self, perspective: Perspective) -> PlayerColor {
        self.seat(perspective).color
    }

    pub fn player_kind(&self, perspective: Perspective) -> PlayerKind {
        self.seat(perspective).kind
    }

    /// Hand contents, exposed for the current player only.
    pub fn hand(&self, perspective: Perspective) -> Option<&[Card]> {
        match perspective {
            Perspective::Current => Some(self.current().hand.cards()),
            Perspective::Opponent => None,
        }
    }

    pub fn hand_count(&self, perspective: Perspective) -> usize {
        self.seat(perspective).hand.len()
    }

    pub fn stock_top(&self, perspective: Perspective) -> Option<Card> {
        self.seat(perspective).stock.top()
    }

    pub fn stock_count(&self, perspective: Perspective) -> usize {
        self.seat(perspective).stock.len()
    }

    pub fn discard_top(&self, perspective: Perspective, discard_pile: usize) -> Option<Card> {
        self.seat(perspective).discard_top(discard_pile)
    }

    pub fn discard_tops(&self, perspective: Perspective) -> [Option<Card>; DISCARD_PILE_COUNT] {
        self.seat(perspective).discard_tops()
    }

    pub fn discard_count(&self, perspective: Perspective, discard_pile: usize) -> usize {
        self.seat(perspective)
            .discard_piles
            .get(discard_pile)
            .map(|pile| pile.len())
            .unwrap_or(0)
    }

    /// Hand plus discard cards the current player holds.
    pub fn held_cards(&self, perspective: Perspective) -> usize {
        self.seat(perspective).held_cards()
    }

    pub fn foundation_top(&self, build_pile: usize) -> Option<Card> {
        self.foundations.get(build_pile)?.top()
    }

    /// Value the foundation needs next, 1 when empty.
    pub fn foundation_next_value(&self, build_pile: usize) -> Option<u8> {
        Some(self.foundations.get(build_pile)?.next_value())
    }

    pub fn foundation_cards(&self, build_pile: usize) -> Option<&[Card]> {
        self.foundations.get(build_pile).map(FoundationPile::cards)
    }

    pub fn draw_pile_count(&self) -> usize {
        self.draw_pile.len()
    }

    pub fn reclaim_pile_count(&self) -> usize {
        self.reclaim_pile.len()
    }

    /// Total cards across every container; a full deck always sums to 162.
    pub fn card_census(&self) -> usize {
        let foundations: usize = self.foundations.iter().map(FoundationPile::len).sum();
        let players: usize = self.players.iter().map(PlayerState::card_count).sum();
        self.draw_pile.len() + self.reclaim_pile.len() + foundations + players
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn state_view(&self) -> GameStateView {
        let current = self.current_player();
        let foundations = from_fn(|idx| {
            let pile = &self.foundations[idx];
            FoundationView {
                top: pile.top(),
                len: pile.len(),
                next_value: pile.next_value(),
            }
        });
        let players = self
            .players
            .iter()
            .enumerate()
            .map(|(idx, player)| PlayerPublicState {
                id: idx,
                name: player.name.clone(),
                color: player.color,
                kind: player.kind,
                stock_count: player.stock.len(),
                stock_top: player.stock.top(),
                discard_tops: player.discard_tops(),
                discard_counts: player.discard_counts(),
                hand_size: player.hand.len(),
                is_current: idx == current,
            })
            .collect();

        GameStateView {
            settings: self.settings,
            status: self.status(),
            turn: self.turn,
            has_drawn: self.has_drawn,
            current_player: current,
            draw_pile_count: self.draw_pile.len(),
            reclaim_pile_count: self.reclaim_pile.len(),
            foundations,
            players,
            hand: self.current().hand.cards().to_vec(),
        }
    }

    /// Coarse identity used to deduplicate search states.
    pub fn state_key(&self) -> StateKey {
        StateKey {
            draw_pile_count: self.draw_pile.len(),
            reclaim_pile_count: self.reclaim_pile.len(),
            foundation_tops: from_fn(|idx| self.foundations[idx].top()),
            seats: from_fn(|idx| {
                let player = &self.players[idx];
                SeatKey {
                    stock_top: player.stock.top(),
                    stock_count: player.stock.len(),
                    hand: player.hand.slots(),
                    discard_tops: player.discard_tops(),
                    discard_counts: player.discard_counts(),
                }
            }),
        }
    }

    fn from_builder(builder: GameBuilder) -> Result<Self, GameError> {
        let GameBuilder { config, deck } = builder;
        let settings = GameSettings::new(config.reserve_depth)?;
        let name_one = validate_name(&config.player_one.name)?;
        let name_two = validate_name(&config.player_two.name)?;
        if name_one == name_two {
            return Err(GameError::InvalidConfiguration(
                "players cannot have the same name",
            ));
        }
        if config.player_one.color == config.player_two.color {
            return Err(GameError::InvalidConfiguration(
                "players cannot have the same color",
            ));
        }

        let mut rng = StdRng::seed_from_u64(config.seed);
        let mut draw_pile = match deck {
            Some(deck) => DrawPile::from_cards(deck),
            None => DrawPile::shuffled(&mut rng),
        };
        if draw_pile.len() < settings.reserve_depth * NUM_PLAYERS {
            return Err(GameError::InvalidConfiguration(
                "deck does not contain enough cards to deal reserves",
            ));
        }

        let mut players = [
            PlayerState::new(name_one, config.player_one.color, config.player_one.kind),
            PlayerState::new(name_two, config.player_two.color, config.player_two.kind),
        ];
        for _ in 0..settings.reserve_depth {
            for player in players.iter_mut() {
                let card = draw_pile.draw().ok_or(GameError::InvalidConfiguration(
                    "deck exhausted while dealing reserves",
                ))?;
                player.stock.push(card);
            }
        }

        Ok(Game {
            settings,
            players,
            foundations: from_fn(|_| FoundationPile::default()),
            draw_pile,
            reclaim_pile: ReclaimPile::default(),
            turn: 0,
            has_drawn: false,
            winner: None,
            rng,
            events: vec![GameEvent::Started],
        })
    }

    fn validate_play(&self, source: CardSource, build_pile: usize) -> Result<Card, GameError> {
        self.ensure_ongoing()?;
        if build_pile >= BUILD_PILE_COUNT {
            return Err(InvalidMove::BuildPileIndex(build_pile).into());
        }
        if matches!(source, CardSource::Hand(_)) && !self.has_drawn {
            return Err(InvalidMove::MustDrawFirst.into());
        }
        let card = self.current().peek_source(source)?;
        let required = self.foundations[build_pile].next_value();
        card.resolve_for(required)
            .ok_or_else(|| InvalidMove::CardMismatch { required }.into())
    }

    fn ensure_ongoing(&self) -> Result<(), GameError> {
        if self.has_winner() {
            return Err(InvalidMove::GameOver.into());
        }
        Ok(())
    }

    fn advance_turn(&mut self) {
        self.turn += 1;
        self.has_drawn = false;
        self.events.push(GameEvent::TurnAdvanced {
            next_player: self.current_player(),
        });
    }

    fn replenish_draw_pile(&mut self) {
        if self.reclaim_pile.is_empty() {
            return;
        }
        let reclaimed = self.reclaim_pile.take_all();
        debug!(
            "shuffling {} reclaimed cards into the draw pile",
            reclaimed.len()
        );
        self.draw_pile.shuffle_in(reclaimed, &mut self.rng);
    }

    fn current(&self) -> &PlayerState {
        &self.players[self.current_player()]
    }

    fn seat(&self, perspective: Perspective) -> &PlayerState {
        match perspective {
            Perspective::Current => &self.players[self.current_player()],
            Perspective::Opponent => &self.players[self.opponent()],
        }
    }
}
