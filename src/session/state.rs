//! Game session state.
//!
//! `GameSession` is the single aggregate holding everything a battle
//! mutates: decks, hands, battle zones, per-round turn flags, the round
//! counter and the event history. The turn controller owns it; nothing
//! else can change combat-relevant state.
//!
//! ## Cloning
//!
//! Decks, hands and the history are `im` persistent structures, so cloning
//! a session to preview a round is cheap.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::cards::CardInstance;
use crate::combat::BattleSystem;
use crate::core::{BattleConfig, EntityAllocator, EntityId, GameRng, Side, SideMap};
use crate::events::{BattleEvent, GameOutcome};
use crate::zones::{BattleZone, Deck, Hand};

/// Per-round flags and selections.
///
/// Reset to the default (nothing placed, nothing selected) at the end of
/// every round.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnState {
    /// Set once a side is done with placement this round. For the player
    /// that is either placing a card or passing.
    pub has_placed: SideMap<bool>,
    /// Player card chosen to attack.
    pub attacker: Option<EntityId>,
    /// Enemy card chosen as target.
    pub defender: Option<EntityId>,
    /// Player card chosen to boost the attack.
    pub combo: Option<EntityId>,
}

impl TurnState {
    #[must_use]
    pub fn player_has_placed(&self) -> bool {
        self.has_placed[Side::Player]
    }

    #[must_use]
    pub fn enemy_has_placed(&self) -> bool {
        self.has_placed[Side::Enemy]
    }

    #[must_use]
    pub fn combo_active(&self) -> bool {
        self.combo.is_some()
    }

    /// Clear every flag and selection.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// All state of one battle.
#[derive(Clone, Debug)]
pub struct GameSession {
    pub(super) config: BattleConfig,
    pub(super) system: BattleSystem,
    pub(super) rng: GameRng,
    pub(super) entities: EntityAllocator,
    pub(super) decks: SideMap<Deck>,
    pub(super) hands: SideMap<Hand>,
    pub(super) zones: SideMap<BattleZone>,
    pub(super) turn: TurnState,
    pub(super) round: u32,
    pub(super) history: Vector<BattleEvent>,
    pub(super) outcome: Option<GameOutcome>,
    pub(super) round_in_progress: bool,
}

impl GameSession {
    pub(super) fn new(
        config: BattleConfig,
        system: BattleSystem,
        rng: GameRng,
        entities: EntityAllocator,
        decks: SideMap<Deck>,
        hands: SideMap<Hand>,
    ) -> Self {
        Self {
            config,
            system,
            rng,
            entities,
            decks,
            hands,
            zones: SideMap::new(BattleZone::new),
            turn: TurnState::default(),
            round: 1,
            history: Vector::new(),
            outcome: None,
            round_in_progress: false,
        }
    }

    #[must_use]
    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    #[must_use]
    pub fn system(&self) -> &BattleSystem {
        &self.system
    }

    /// The round that will be played next (or is being played), from 1.
    #[must_use]
    pub fn round(&self) -> u32 {
        self.round
    }

    #[must_use]
    pub fn deck(&self, side: Side) -> &Deck {
        &self.decks[side]
    }

    #[must_use]
    pub fn hand(&self, side: Side) -> &Hand {
        &self.hands[side]
    }

    #[must_use]
    pub fn zone(&self, side: Side) -> &BattleZone {
        &self.zones[side]
    }

    #[must_use]
    pub fn turn(&self) -> &TurnState {
        &self.turn
    }

    /// Every event since the session was built.
    #[must_use]
    pub fn history(&self) -> &Vector<BattleEvent> {
        &self.history
    }

    /// Set once the game has ended.
    #[must_use]
    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    #[must_use]
    pub fn is_round_in_progress(&self) -> bool {
        self.round_in_progress
    }

    /// Number of card instances created for this session.
    #[must_use]
    pub fn card_count(&self) -> u32 {
        self.entities.allocated()
    }

    /// Find a card wherever it is: zone, hand or deck.
    #[must_use]
    pub fn card(&self, entity: EntityId) -> Option<&CardInstance> {
        Side::ALL.into_iter().find_map(|side| {
            self.zones[side]
                .find(entity)
                .map(|(_, card)| card)
                .or_else(|| self.hands[side].get(entity))
                .or_else(|| self.decks[side].iter().find(|c| c.entity_id == entity))
        })
    }

    /// Whether `side` holds a card that fits an open slot of its zone.
    #[must_use]
    pub fn can_place(&self, side: Side) -> bool {
        let zone = &self.zones[side];
        self.hands[side]
            .first_matching(|category| zone.has_open_slot_for(category))
            .is_some()
    }

    /// A side is out of the game once its deck and hand are both empty.
    #[must_use]
    pub fn is_exhausted(&self, side: Side) -> bool {
        self.decks[side].is_empty() && self.hands[side].is_empty()
    }

    /// Terminal check: the exhausted side loses, both at once is a draw.
    #[must_use]
    pub fn check_outcome(&self) -> Option<GameOutcome> {
        match (self.is_exhausted(Side::Player), self.is_exhausted(Side::Enemy)) {
            (true, true) => Some(GameOutcome::Draw),
            (true, false) => Some(GameOutcome::defeat_of(Side::Player)),
            (false, true) => Some(GameOutcome::defeat_of(Side::Enemy)),
            (false, false) => None,
        }
    }
}
