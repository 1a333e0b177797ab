//! The battlefield zone
//!
//! The deck lives in `core::deck` and the hand is a plain `Vec` on the
//! player; this module holds the three-lane field.

use crate::config::FIELD_SIZE;
use crate::core::Card;
use serde::{Deserialize, Serialize};

/// A player's side of the table: exactly `FIELD_SIZE` lanes, each empty or
/// holding one card
///
/// Lane `i` faces lane `i` of the other player's field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    slots: [Option<Card>; FIELD_SIZE],
}

impl Field {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, lane: usize) -> Option<&Card> {
        self.slots.get(lane).and_then(|slot| slot.as_ref())
    }

    pub fn get_mut(&mut self, lane: usize) -> Option<&mut Card> {
        self.slots.get_mut(lane).and_then(|slot| slot.as_mut())
    }

    pub fn is_occupied(&self, lane: usize) -> bool {
        self.get(lane).is_some()
    }

    /// Put a card into an empty lane
    ///
    /// Returns the card back if the lane is out of range or occupied.
    pub fn place(&mut self, lane: usize, card: Card) -> Result<(), Card> {
        match self.slots.get_mut(lane) {
            Some(slot @ None) => {
                *slot = Some(card);
                Ok(())
            }
            _ => Err(card),
        }
    }

    pub fn remove(&mut self, lane: usize) -> Option<Card> {
        self.slots.get_mut(lane).and_then(|slot| slot.take())
    }

    pub fn clear(&mut self) {
        self.slots = Default::default();
    }

    pub fn slots(&self) -> &[Option<Card>; FIELD_SIZE] {
        &self.slots
    }

    /// Indices of lanes with no card
    pub fn empty_lanes(&self) -> impl Iterator<Item = usize> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_none())
            .map(|(lane, _)| lane)
    }

    pub fn empty_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_none()).count()
    }

    pub fn is_full(&self) -> bool {
        self.empty_count() == 0
    }

    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.slots.iter().flatten()
    }
}
