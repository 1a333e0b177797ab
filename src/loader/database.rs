//! Card database for looking up card templates
//!
//! The database is a JSON object keyed by card id:
//!
//! ```json
//! { "ember_drake": { "name": "Ember Drake", "hp": 4, "cost": 3, "attack": 3,
//!                    "image": "cards/ember_drake.png", "flavor_text": "...",
//!                    "rarity": "rare" } }
//! ```
//!
//! Missing fields fall back to a 1/1/1 common named "Unknown Card".

use crate::core::{Card, CardId, Rarity};
use crate::{DuelError, Result};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Card database bundled with the binary
const BUILTIN_CARDS: &str = include_str!("../../data/cards.json");

fn default_name() -> String {
    "Unknown Card".to_string()
}

fn one() -> u32 {
    1
}

/// Immutable template of a card, as stored on disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDefinition {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "one")]
    pub hp: u32,
    #[serde(default = "one")]
    pub cost: u32,
    #[serde(default = "one")]
    pub attack: u32,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub flavor_text: String,
    #[serde(default)]
    pub rarity: Rarity,
}

impl CardDefinition {
    /// A fresh, full-health instance of this template
    pub fn instantiate(&self, id: &CardId) -> Card {
        Card {
            id: id.clone(),
            name: self.name.clone(),
            rarity: self.rarity,
            cost: self.cost,
            attack: self.attack,
            hp: self.hp,
            flavor_text: self.flavor_text.clone(),
            image_path: self.image.clone(),
        }
    }
}

/// Lookup of card templates by id
#[derive(Debug, Clone, Default)]
pub struct CardDatabase {
    cards: FxHashMap<CardId, CardDefinition>,
}

impl CardDatabase {
    pub fn new() -> Self {
        CardDatabase {
            cards: FxHashMap::default(),
        }
    }

    /// The card set shipped in `data/cards.json`
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_CARDS)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let cards: FxHashMap<CardId, CardDefinition> = serde_json::from_str(json)?;
        Ok(CardDatabase { cards })
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(DuelError::IoError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Card database not found: {path:?}"),
            )));
        }
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn add_card(&mut self, id: impl Into<CardId>, definition: CardDefinition) {
        self.cards.insert(id.into(), definition);
    }

    pub fn get_card(&self, id: &CardId) -> Option<&CardDefinition> {
        self.cards.get(id)
    }

    pub fn contains(&self, id: &CardId) -> bool {
        self.cards.contains_key(id)
    }

    /// Build a new card instance at full health
    pub fn instantiate(&self, id: &CardId) -> Result<Card> {
        self.get_card(id)
            .map(|def| def.instantiate(id))
            .ok_or_else(|| DuelError::UnknownCard(id.to_string()))
    }

    /// Ids of every card of a rarity, sorted so callers see a stable order
    pub fn by_rarity(&self, rarity: Rarity) -> Vec<&CardId> {
        let mut ids: Vec<&CardId> = self
            .cards
            .iter()
            .filter(|(_, def)| def.rarity == rarity)
            .map(|(id, _)| id)
            .collect();
        ids.sort();
        ids
    }

    /// All entries sorted by id
    pub fn iter_sorted(&self) -> Vec<(&CardId, &CardDefinition)> {
        let mut entries: Vec<_> = self.cards.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}
