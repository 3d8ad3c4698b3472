//! Session setup.
//!
//! `GameSessionBuilder` turns card definitions into a ready-to-play
//! `GameSession`: it instantiates both decks, shuffles them with the
//! session seed and deals the starting hands. Any problem is reported as a
//! `ConfigError` and no session is created.

use crate::cards::{CardCatalog, CardDefinition, CardInstance};
use crate::combat::BattleSystem;
use crate::core::{BattleConfig, EntityAllocator, GameRng, Side, SideMap};
use crate::error::ConfigError;
use crate::zones::{Deck, Hand};

use super::state::GameSession;

/// Builder for `GameSession`.
///
/// ```
/// use strategic_mythology::cards::{CardDefinition, Category};
/// use strategic_mythology::core::{BattleConfig, Side};
/// use strategic_mythology::session::GameSessionBuilder;
///
/// let cards: Vec<_> = (0..8)
///     .map(|i| CardDefinition::new(format!("c{i}"), format!("Card {i}"), Category::Char))
///     .collect();
///
/// let session = GameSessionBuilder::new()
///     .seed(7)
///     .config(BattleConfig { starting_hand_size: 3, ..BattleConfig::default() })
///     .deck(Side::Player, cards.clone())
///     .deck(Side::Enemy, cards)
///     .build()
///     .unwrap();
///
/// assert_eq!(session.hand(Side::Player).len(), 3);
/// assert_eq!(session.deck(Side::Enemy).len(), 5);
/// ```
#[derive(Clone, Debug)]
pub struct GameSessionBuilder {
    config: BattleConfig,
    system: BattleSystem,
    seed: u64,
    shuffle: bool,
    decks: SideMap<Vec<CardDefinition>>,
}

impl Default for GameSessionBuilder {
    fn default() -> Self {
        Self {
            config: BattleConfig::default(),
            system: BattleSystem::default(),
            seed: 0,
            shuffle: true,
            decks: SideMap::default(),
        }
    }
}

impl GameSessionBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn config(mut self, config: BattleConfig) -> Self {
        self.config = config;
        self
    }

    /// Matchup tables and damage constants.
    #[must_use]
    pub fn system(mut self, system: BattleSystem) -> Self {
        self.system = system;
        self
    }

    /// Seed for deck shuffles and enemy choices.
    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Disable to keep decks in the given order.
    #[must_use]
    pub fn shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    /// Set one side's deck list, top card first.
    #[must_use]
    pub fn deck(mut self, side: Side, cards: impl IntoIterator<Item = CardDefinition>) -> Self {
        self.decks[side] = cards.into_iter().collect();
        self
    }

    /// Give both sides one copy of every catalog card, in load order.
    #[must_use]
    pub fn decks_from_catalog(mut self, catalog: &CardCatalog) -> Self {
        let cards: Vec<_> = catalog.iter().cloned().collect();
        self.decks = SideMap::with_value(cards);
        self
    }

    /// Validate everything and create the session.
    pub fn build(self) -> Result<GameSession, ConfigError> {
        self.config.validate()?;
        self.system.validate()?;

        let needed = self.config.starting_hand_size;
        for (side, cards) in self.decks.iter() {
            if cards.is_empty() {
                return Err(ConfigError::EmptyDeck(side));
            }
            if cards.len() < needed {
                return Err(ConfigError::NotEnoughCards {
                    side,
                    needed,
                    available: cards.len(),
                });
            }
        }

        let rng = GameRng::new(self.seed);
        let mut entities = EntityAllocator::default();
        let mut decks: SideMap<Deck> = SideMap::default();
        let mut hands = SideMap::with_value(Hand::new(self.config.hand_size));

        for side in Side::ALL {
            let instances: Vec<CardInstance> = self.decks[side]
                .iter()
                .map(|def| CardInstance::new(entities.alloc(), def.clone(), side))
                .collect();
            let mut deck = Deck::new(instances);
            if self.shuffle {
                deck.shuffle(&mut rng.for_context(deck_context(side)));
            }

            let dealt = (0..needed)
                .filter_map(|_| hands[side].draw_from(&mut deck))
                .count();
            // Deck length and hand capacity were both checked above.
            debug_assert_eq!(dealt, needed);
            decks[side] = deck;
        }

        log::info!(
            "session built: seed {}, {} player cards, {} enemy cards, {} dealt each",
            self.seed,
            self.decks[Side::Player].len(),
            self.decks[Side::Enemy].len(),
            needed
        );

        Ok(GameSession::new(
            self.config,
            self.system,
            rng.for_context("enemy"),
            entities,
            decks,
            hands,
        ))
    }
}

fn deck_context(side: Side) -> &'static str {
    match side {
        Side::Player => "player-deck",
        Side::Enemy => "enemy-deck",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Category;
    use crate::core::EntityId;

    fn defs(n: usize) -> Vec<CardDefinition> {
        (0..n)
            .map(|i| CardDefinition::new(format!("c{i}"), format!("Card {i}"), Category::Char))
            .collect()
    }

    fn builder(n: usize) -> GameSessionBuilder {
        GameSessionBuilder::new()
            .deck(Side::Player, defs(n))
            .deck(Side::Enemy, defs(n))
    }

    #[test]
    fn test_deals_starting_hands() {
        let session = builder(10).build().unwrap();

        for side in Side::ALL {
            assert_eq!(session.hand(side).len(), 6);
            assert_eq!(session.deck(side).len(), 4);
            assert!(session.zone(side).is_empty());
        }
        assert_eq!(session.card_count(), 20);
    }

    #[test]
    fn test_unshuffled_deck_keeps_order() {
        let session = builder(8).shuffle(false).build().unwrap();

        let hand: Vec<_> = session.hand(Side::Player).iter().map(|c| c.entity_id).collect();
        assert_eq!(hand, (0..6).map(EntityId).collect::<Vec<_>>());
        // Enemy instances are allocated after the player's.
        assert_eq!(session.deck(Side::Enemy).top().unwrap().entity_id, EntityId(14));
    }

    #[test]
    fn test_same_seed_same_deal() {
        let a = builder(20).seed(11).build().unwrap();
        let b = builder(20).seed(11).build().unwrap();
        let c = builder(20).seed(12).build().unwrap();

        let order = |s: &GameSession| -> Vec<String> {
            s.hand(Side::Player)
                .iter()
                .chain(s.deck(Side::Player).iter())
                .map(|card| card.card_id().as_str().to_owned())
                .collect()
        };
        assert_eq!(order(&a), order(&b));
        assert_ne!(order(&a), order(&c));
    }

    #[test]
    fn test_empty_deck_rejected() {
        let err = GameSessionBuilder::new()
            .deck(Side::Player, defs(6))
            .build()
            .unwrap_err();

        assert!(matches!(err, ConfigError::EmptyDeck(Side::Enemy)));
    }

    #[test]
    fn test_short_deck_rejected() {
        let err = GameSessionBuilder::new()
            .deck(Side::Player, defs(6))
            .deck(Side::Enemy, defs(4))
            .build()
            .unwrap_err();

        assert!(matches!(
            err,
            ConfigError::NotEnoughCards {
                side: Side::Enemy,
                needed: 6,
                available: 4
            }
        ));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = BattleConfig {
            hand_size: 2,
            starting_hand_size: 3,
            ..BattleConfig::default()
        };
        let err = builder(6).config(config).build().unwrap_err();

        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }
}
