//! Player representation

use crate::config::{RulesConfig, FIELD_SIZE};
use crate::core::{Card, CardId, Deck, Rarity};
use crate::error::ActionError;
use crate::zones::Field;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Represents one side of a match
///
/// Aggregates resources (health, energy, credits), the three card
/// containers (deck, hand, field) and the owned collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,

    pub health: u32,
    pub max_health: u32,

    pub energy: u32,
    pub max_energy: u32,

    pub deck: Deck,

    /// Cards in hand, in draw order
    pub hand: Vec<Card>,

    pub field: Field,

    /// Card id -> owned quantity
    pub collection: BTreeMap<CardId, u32>,

    pub credits: u32,
}

impl Player {
    pub fn new(name: impl Into<String>, deck: Deck, starting_health: u32, max_energy: u32) -> Self {
        Player {
            name: name.into(),
            health: starting_health,
            max_health: starting_health,
            energy: max_energy,
            max_energy,
            deck,
            hand: Vec::new(),
            field: Field::new(),
            collection: BTreeMap::new(),
            credits: 0,
        }
    }

    /// Create a player using the health and energy of a ruleset
    pub fn with_rules(name: impl Into<String>, deck: Deck, rules: &RulesConfig) -> Self {
        Player::new(name, deck, rules.starting_health, rules.max_energy)
    }

    /// Draw the top card of the deck into the hand
    pub fn draw_card(&mut self) -> Option<&Card> {
        let card = self.deck.draw()?;
        self.hand.push(card);
        self.hand.last()
    }

    /// Draw up to `size` cards into the hand, returning how many arrived
    pub fn draw_starting_hand(&mut self, size: usize) -> usize {
        let cards = self.deck.draw_hand(size);
        let drawn = cards.len();
        self.hand.extend(cards);
        drawn
    }

    /// Check whether a card could be played, returning its cost
    ///
    /// Checks run in order and the first failure wins: hand index, field
    /// index, lane occupancy, energy.
    pub fn check_play(&self, hand_index: usize, field_index: usize) -> Result<u32, ActionError> {
        let cost = match self.hand.get(hand_index) {
            Some(card) => card.cost,
            None => {
                return Err(ActionError::InvalidHandIndex {
                    index: hand_index,
                    hand_size: self.hand.len(),
                })
            }
        };
        if field_index >= FIELD_SIZE {
            return Err(ActionError::InvalidFieldIndex(field_index));
        }
        if self.field.is_occupied(field_index) {
            return Err(ActionError::SlotOccupied(field_index));
        }
        if self.energy < cost {
            return Err(ActionError::InsufficientEnergy {
                required: cost,
                available: self.energy,
            });
        }
        Ok(cost)
    }

    /// Move a card from hand to an empty field lane, paying its cost
    ///
    /// Nothing changes on failure.
    pub fn play_card(&mut self, hand_index: usize, field_index: usize) -> Result<&Card, ActionError> {
        let cost = self.check_play(hand_index, field_index)?;

        let card = self.hand.remove(hand_index);
        if let Err(card) = self.field.place(field_index, card) {
            self.hand.insert(hand_index, card);
            return Err(ActionError::SlotOccupied(field_index));
        }
        self.energy -= cost;
        self.field
            .get(field_index)
            .ok_or(ActionError::InvalidFieldIndex(field_index))
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.health = self.health.saturating_sub(amount);
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    pub fn reset_energy(&mut self) {
        self.energy = self.max_energy;
    }

    pub fn add_credits(&mut self, amount: u32) {
        self.credits += amount;
    }

    /// Whether any card in hand is affordable right now
    pub fn can_afford_any(&self) -> bool {
        self.hand.iter().any(|c| c.cost <= self.energy)
    }

    /// Add cards to the collection, converting copies past the limit
    ///
    /// Returns `(added, credits_earned)`. Copies beyond
    /// `max_copies_per_card` are turned into credits at the rarity's rate.
    pub fn add_to_collection(
        &mut self,
        card_id: &CardId,
        quantity: u32,
        rarity: Rarity,
        rules: &RulesConfig,
    ) -> (u32, u32) {
        let owned = self.collection.get(card_id).copied().unwrap_or(0);
        let room = rules.max_copies_per_card.saturating_sub(owned);
        let added = quantity.min(room);
        let converted = quantity - added;

        if added > 0 {
            self.collection.insert(card_id.clone(), owned + added);
        }

        let credits = converted * rules.conversion_rates.rate(rarity);
        self.add_credits(credits);
        (added, credits)
    }
}
