//! Card definitions and combat state

use crate::core::{CardId, Rarity};
use serde::{Deserialize, Serialize};

/// Represents a creature card
///
/// A card carries its immutable template stats plus one piece of mutable
/// combat state: `hp`, the health it has left. Instances are created fresh
/// (at full HP) from the card database whenever a deck is built, and a card
/// whose `hp` reaches 0 is discarded from play rather than recycled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Key into the card database
    pub id: CardId,

    /// Display name (e.g., "Ember Drake")
    pub name: String,

    pub rarity: Rarity,

    /// Energy needed to play this card
    pub cost: u32,

    pub attack: u32,

    /// Remaining health (never negative)
    pub hp: u32,

    pub flavor_text: String,

    /// Presentation only
    pub image_path: String,
}

impl Card {
    pub fn new(id: impl Into<CardId>, name: impl Into<String>, cost: u32, attack: u32, hp: u32) -> Self {
        Card {
            id: id.into(),
            name: name.into(),
            rarity: Rarity::Common,
            cost,
            attack,
            hp,
            flavor_text: String::new(),
            image_path: String::new(),
        }
    }

    pub fn with_rarity(mut self, rarity: Rarity) -> Self {
        self.rarity = rarity;
        self
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// Apply damage and return the part that could not be absorbed
    ///
    /// `hp` floors at 0. The returned excess is `max(0, amount - hp_before)`,
    /// which combat uses to bleed overkill through to the owning player.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let excess = amount.saturating_sub(self.hp);
        self.hp = self.hp.saturating_sub(amount);
        excess
    }

    /// Sum of attack and remaining health
    pub fn total_stats(&self) -> u32 {
        self.attack + self.hp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_creation() {
        let card = Card::new("militia_scout", "Militia Scout", 1, 2, 1).with_rarity(Rarity::Uncommon);

        assert_eq!(card.id.as_str(), "militia_scout");
        assert_eq!(card.name, "Militia Scout");
        assert_eq!(card.rarity, Rarity::Uncommon);
        assert!(card.is_alive());
        assert_eq!(card.total_stats(), 3);
    }

    #[test]
    fn test_damage_without_excess() {
        let mut card = Card::new("wall", "Stone Wall", 2, 0, 5);
        assert_eq!(card.take_damage(3), 0);
        assert_eq!(card.hp, 2);
        assert!(card.is_alive());
    }

    #[test]
    fn test_exact_lethal_damage() {
        let mut card = Card::new("wall", "Stone Wall", 2, 0, 5);
        assert_eq!(card.take_damage(5), 0);
        assert_eq!(card.hp, 0);
        assert!(!card.is_alive());
    }

    #[test]
    fn test_overkill_returns_excess() {
        let mut card = Card::new("imp", "Imp", 1, 1, 3);
        assert_eq!(card.take_damage(7), 4);
        assert_eq!(card.hp, 0);
    }

    #[test]
    fn test_damage_monotonic() {
        for hp in 0..6u32 {
            for dmg in 0..9u32 {
                let mut card = Card::new("x", "X", 1, 1, hp);
                let excess = card.take_damage(dmg);
                assert!(card.hp <= hp);
                assert_eq!(excess, dmg.saturating_sub(hp));
                assert_eq!(card.hp, hp.saturating_sub(dmg));
            }
        }
    }
}
