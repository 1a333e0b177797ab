//! Rules configuration
//!
//! Every tunable number of a match lives in `RulesConfig`. The defaults are
//! the standard ruleset; a JSON file may override any subset of fields.

use crate::core::{Difficulty, Rarity};
use crate::{DuelError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Number of lanes on each side of the table
pub const FIELD_SIZE: usize = 3;

/// Credits awarded for beating an opponent of each difficulty tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VictoryRewards {
    pub easy: u32,
    pub normal: u32,
    pub hard: u32,
}

impl VictoryRewards {
    pub fn for_difficulty(&self, difficulty: Difficulty) -> u32 {
        match difficulty {
            Difficulty::Easy => self.easy,
            Difficulty::Normal => self.normal,
            Difficulty::Hard => self.hard,
        }
    }
}

impl Default for VictoryRewards {
    fn default() -> Self {
        VictoryRewards {
            easy: 20,
            normal: 25,
            hard: 30,
        }
    }
}

/// Credits granted per duplicate card beyond the copy limit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionRates {
    pub common: u32,
    pub uncommon: u32,
    pub rare: u32,
    pub epic: u32,
}

impl ConversionRates {
    pub fn rate(&self, rarity: Rarity) -> u32 {
        match rarity {
            Rarity::Common => self.common,
            Rarity::Uncommon => self.uncommon,
            Rarity::Rare => self.rare,
            Rarity::Epic => self.epic,
        }
    }
}

impl Default for ConversionRates {
    fn default() -> Self {
        ConversionRates {
            common: 1,
            uncommon: 3,
            rare: 5,
            epic: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    pub starting_health: u32,
    pub max_energy: u32,
    pub starting_hand_size: usize,

    pub min_deck_size: usize,
    pub max_deck_size: usize,
    pub max_copies_per_card: u32,

    pub victory_rewards: VictoryRewards,

    /// Opponent decks with at least this many rare+epic cards count as hard
    pub hard_premium_threshold: usize,
    /// Opponent decks with at most this many rare+epic cards count as easy
    pub easy_premium_threshold: usize,

    pub conversion_rates: ConversionRates,

    /// Turn limit for the match driver (0 = unlimited)
    pub max_turns: u32,
}

impl Default for RulesConfig {
    fn default() -> Self {
        RulesConfig {
            starting_health: 10,
            max_energy: 3,
            starting_hand_size: 4,
            min_deck_size: 1,
            max_deck_size: 30,
            max_copies_per_card: 3,
            victory_rewards: VictoryRewards::default(),
            hard_premium_threshold: 9,
            easy_premium_threshold: 2,
            conversion_rates: ConversionRates::default(),
            max_turns: 100,
        }
    }
}

impl RulesConfig {
    /// Load a configuration file, filling unspecified fields with defaults
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let config: RulesConfig = serde_json::from_str(&json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.starting_health == 0 {
            return Err(DuelError::InvalidConfig("starting_health must be positive".to_string()));
        }
        if self.max_energy == 0 {
            return Err(DuelError::InvalidConfig("max_energy must be positive".to_string()));
        }
        if self.min_deck_size == 0 || self.min_deck_size > self.max_deck_size {
            return Err(DuelError::InvalidConfig(format!(
                "deck size bounds [{}, {}] are inconsistent",
                self.min_deck_size, self.max_deck_size
            )));
        }
        if self.easy_premium_threshold >= self.hard_premium_threshold {
            return Err(DuelError::InvalidConfig(
                "easy_premium_threshold must be below hard_premium_threshold".to_string(),
            ));
        }
        Ok(())
    }
}
