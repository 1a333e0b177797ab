//! Deck lists and deck builders
//!
//! A `DeckList` is the persisted form of a deck: a name and an ordered list
//! of card ids. It can be read from JSON or from a plain text list:
//!
//! ```text
//! # Starter
//! 3 militia_scout
//! 2 ember_drake
//! ```
//!
//! The builders here produce playable `Deck`s from a `CardDatabase`.

use crate::config::RulesConfig;
use crate::core::{CardId, Deck, Difficulty, Player, Rarity};
use crate::loader::CardDatabase;
use crate::{DuelError, Result};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckList {
    #[serde(default = "default_deck_name")]
    pub name: String,
    #[serde(default)]
    pub cards: Vec<CardId>,
}

fn default_deck_name() -> String {
    "Imported Deck".to_string()
}

impl DeckList {
    pub fn new(name: impl Into<String>, cards: Vec<CardId>) -> Self {
        DeckList {
            name: name.into(),
            cards,
        }
    }

    pub fn from_deck(deck: &Deck) -> Self {
        DeckList::new(deck.name.clone(), deck.card_ids())
    }

    /// Load a deck list, as JSON when the file ends in `.json`, as text otherwise
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        if path.extension().and_then(|s| s.to_str()) == Some("json") {
            Ok(serde_json::from_str(&content)?)
        } else {
            let name = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("Imported Deck");
            Self::parse(name, &content)
        }
    }

    /// Parse the text format: one `count card_id` per line
    ///
    /// Blank lines and lines starting with `#` are skipped. A bare id counts
    /// as one copy.
    pub fn parse(name: &str, content: &str) -> Result<Self> {
        let mut cards = Vec::new();

        for (line_no, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (count, id) = match line.split_once(char::is_whitespace) {
                Some((count_str, rest)) => match count_str.parse::<u32>() {
                    Ok(count) => (count, rest.trim()),
                    Err(_) => {
                        return Err(DuelError::InvalidDeck(format!(
                            "line {}: expected `count card_id`, got {line:?}",
                            line_no + 1
                        )))
                    }
                },
                None => (1, line),
            };

            for _ in 0..count {
                cards.push(CardId::new(id));
            }
        }

        if cards.is_empty() {
            return Err(DuelError::InvalidDeck("Empty deck".to_string()));
        }

        Ok(DeckList::new(name, cards))
    }

    /// Instantiate every known id into a playable deck
    ///
    /// Ids missing from the database are skipped.
    pub fn build(&self, db: &CardDatabase) -> Deck {
        let cards = self
            .cards
            .iter()
            .filter_map(|id| db.instantiate(id).ok())
            .collect();
        Deck::new(self.name.clone(), cards)
    }

    /// Like `build`, but an unknown id is an error
    pub fn build_strict(&self, db: &CardDatabase) -> Result<Deck> {
        let cards = self
            .cards
            .iter()
            .map(|id| db.instantiate(id))
            .collect::<Result<Vec<_>>>()?;
        Ok(Deck::new(self.name.clone(), cards))
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

/// Append `count` random picks of one rarity; nothing if the rarity is absent
fn pick_cards(deck: &mut Deck, db: &CardDatabase, rarity: Rarity, count: usize, rng: &mut impl Rng) {
    let pool = db.by_rarity(rarity);
    for _ in 0..count {
        let Some(id) = pool.choose(rng) else {
            return;
        };
        if let Ok(card) = db.instantiate(id) {
            deck.add_card(card);
        }
    }
}

/// A 30-card deck for new players: 21 commons and 9 uncommons
pub fn starter_deck(db: &CardDatabase, rng: &mut impl Rng) -> Deck {
    let mut deck = Deck::new("Starter Deck", Vec::new());
    pick_cards(&mut deck, db, Rarity::Common, 21, rng);
    pick_cards(&mut deck, db, Rarity::Uncommon, 9, rng);
    deck.shuffle(rng);
    deck
}

/// Cards per rarity (common, uncommon, rare, epic) in an AI deck
pub fn ai_deck_composition(difficulty: Difficulty) -> [(Rarity, usize); 4] {
    let counts = match difficulty {
        Difficulty::Easy => [20, 8, 2, 0],
        Difficulty::Normal => [15, 10, 4, 1],
        Difficulty::Hard => [10, 12, 6, 2],
    };
    [
        (Rarity::Common, counts[0]),
        (Rarity::Uncommon, counts[1]),
        (Rarity::Rare, counts[2]),
        (Rarity::Epic, counts[3]),
    ]
}

/// A difficulty-scaled 30-card AI deck
pub fn ai_deck(db: &CardDatabase, difficulty: Difficulty, rng: &mut impl Rng) -> Deck {
    let mut deck = Deck::new(format!("{} AI Deck", difficulty.title()), Vec::new());
    for (rarity, count) in ai_deck_composition(difficulty) {
        pick_cards(&mut deck, db, rarity, count, rng);
    }
    deck.shuffle(rng);
    deck
}

/// An AI player named after its difficulty, e.g. "Hard AI Opponent"
pub fn create_ai_opponent(
    db: &CardDatabase,
    difficulty: Difficulty,
    rules: &RulesConfig,
    rng: &mut impl Rng,
) -> Player {
    let deck = ai_deck(db, difficulty, rng);
    Player::with_rules(format!("{} AI Opponent", difficulty.title()), deck, rules)
}
