//! Decks and hands.
//!
//! Both are ordered piles of card instances backed by `im::Vector`, so a
//! session can be cloned cheaply (e.g. to preview a round) without copying
//! every card.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::cards::{CardInstance, Category};
use crate::core::{EntityId, GameRng};

/// A side's draw pile. Cards are consumed from the front.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    cards: Vector<CardInstance>,
}

impl Deck {
    /// Create a deck with `cards` in draw order.
    #[must_use]
    pub fn new(cards: impl IntoIterator<Item = CardInstance>) -> Self {
        Self {
            cards: cards.into_iter().collect(),
        }
    }

    /// Shuffle the whole deck.
    pub fn shuffle(&mut self, rng: &mut GameRng) {
        let mut cards: Vec<_> = self.cards.iter().cloned().collect();
        rng.shuffle(&mut cards);
        self.cards = cards.into_iter().collect();
    }

    /// Take the top card.
    pub fn draw(&mut self) -> Option<CardInstance> {
        self.cards.pop_front()
    }

    /// Peek at the top card without drawing it.
    #[must_use]
    pub fn top(&self) -> Option<&CardInstance> {
        self.cards.front()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// An empty deck is exhausted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CardInstance> {
        self.cards.iter()
    }
}

/// A side's hand, bounded by a fixed capacity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    cards: Vector<CardInstance>,
    capacity: usize,
}

impl Hand {
    /// Create an empty hand.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            cards: Vector::new(),
            capacity,
        }
    }

    /// Add a card to the back of the hand.
    ///
    /// Returns the card back as `Err` when the hand is full.
    pub fn push(&mut self, card: CardInstance) -> Result<(), CardInstance> {
        if self.is_full() {
            return Err(card);
        }
        self.cards.push_back(card);
        Ok(())
    }

    /// Move the top card of `deck` into the hand.
    ///
    /// Nothing moves when the hand is full or the deck is empty. Returns the
    /// drawn card's ID otherwise.
    pub fn draw_from(&mut self, deck: &mut Deck) -> Option<EntityId> {
        if self.is_full() {
            return None;
        }
        let card = deck.draw()?;
        let id = card.entity_id;
        self.cards.push_back(card);
        Some(id)
    }

    /// Put a card back at `index`, clamped to the hand length.
    ///
    /// Undoes a `remove`, so capacity is not checked.
    pub fn insert(&mut self, index: usize, card: CardInstance) {
        let index = index.min(self.cards.len());
        self.cards.insert(index, card);
    }

    /// Remove a card by entity ID, preserving the order of the rest.
    pub fn remove(&mut self, entity: EntityId) -> Option<CardInstance> {
        let index = self.position(entity)?;
        Some(self.cards.remove(index))
    }

    #[must_use]
    pub fn get(&self, entity: EntityId) -> Option<&CardInstance> {
        self.cards.iter().find(|c| c.entity_id == entity)
    }

    #[must_use]
    pub fn position(&self, entity: EntityId) -> Option<usize> {
        self.cards.iter().position(|c| c.entity_id == entity)
    }

    /// First card (in hand order) whose category passes `accepts`.
    #[must_use]
    pub fn first_matching(&self, accepts: impl Fn(Category) -> bool) -> Option<&CardInstance> {
        self.cards.iter().find(|c| accepts(c.category()))
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.cards.len() >= self.capacity
    }

    pub fn iter(&self) -> impl Iterator<Item = &CardInstance> {
        self.cards.iter()
    }
}
