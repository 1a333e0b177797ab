//! Player persistence
//!
//! A human player's progress is saved between matches as a `PlayerSnapshot`:
//! resources, the deck as a list of card ids, the collection and credits.
//! Card instances are rebuilt from the card database on load.

use crate::core::{CardId, Player};
use crate::loader::{CardDatabase, DeckList};
use crate::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

fn default_player_name() -> String {
    "Player".to_string()
}

fn default_deck() -> DeckList {
    DeckList::new("Default Deck", Vec::new())
}

/// Serializable form of a `Player`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    #[serde(default = "default_player_name")]
    pub name: String,
    /// Missing values fall back to `max_health`
    #[serde(default)]
    pub health: Option<u32>,
    pub max_health: u32,
    #[serde(default)]
    pub energy: Option<u32>,
    pub max_energy: u32,
    #[serde(default = "default_deck")]
    pub deck: DeckList,
    #[serde(default)]
    pub collection: BTreeMap<CardId, u32>,
    #[serde(default)]
    pub credits: u32,
}

impl PlayerSnapshot {
    pub fn from_player(player: &Player) -> Self {
        PlayerSnapshot {
            name: player.name.clone(),
            health: Some(player.health),
            max_health: player.max_health,
            energy: Some(player.energy),
            max_energy: player.max_energy,
            deck: DeckList::from_deck(&player.deck),
            collection: player.collection.clone(),
            credits: player.credits,
        }
    }

    /// Rebuild the player, dropping deck entries the database does not know
    pub fn restore(&self, db: &CardDatabase) -> Player {
        let mut player = Player::new(self.name.clone(), self.deck.build(db), self.max_health, self.max_energy);
        player.health = self.health.unwrap_or(self.max_health).min(self.max_health);
        player.energy = self.energy.unwrap_or(self.max_energy).min(self.max_energy);
        player.collection = self.collection.clone();
        player.credits = self.credits;
        player
    }

    /// Save this snapshot to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path.as_ref(), json)?;
        Ok(())
    }

    /// Load a snapshot from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        Ok(serde_json::from_str(&json)?)
    }

    pub fn exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().is_file()
    }
}
