//! Draw pile

use crate::config::RulesConfig;
use crate::core::{Card, CardId, Rarity};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Advisory problem found by `Deck::validate`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeckIssue {
    TooFewCards { size: usize, min: usize },
    TooManyCards { size: usize, max: usize },
    TooManyCopies { card_id: CardId, count: u32, max: u32 },
}

impl fmt::Display for DeckIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeckIssue::TooFewCards { size, min } => {
                write!(f, "Deck has {size} cards, needs at least {min}")
            }
            DeckIssue::TooManyCards { size, max } => {
                write!(f, "Deck has {size} cards, allows at most {max}")
            }
            DeckIssue::TooManyCopies { card_id, count, max } => {
                write!(f, "Deck has {count} copies of {card_id}, allows at most {max}")
            }
        }
    }
}

/// An ordered pile of card instances
///
/// Index 0 is the top of the deck. Draw order after a shuffle is the order
/// of `cards`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    pub name: String,
    pub cards: Vec<Card>,
}

impl Deck {
    pub fn new(name: impl Into<String>, cards: Vec<Card>) -> Self {
        Deck {
            name: name.into(),
            cards,
        }
    }

    pub fn add_card(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn remove_card(&mut self, index: usize) -> Option<Card> {
        if index < self.cards.len() {
            Some(self.cards.remove(index))
        } else {
            None
        }
    }

    /// Uniformly permute the deck with the supplied generator
    pub fn shuffle(&mut self, rng: &mut impl Rng) {
        self.cards.shuffle(rng);
    }

    /// Take the top card, or `None` when the deck is exhausted
    pub fn draw(&mut self) -> Option<Card> {
        if self.cards.is_empty() {
            None
        } else {
            Some(self.cards.remove(0))
        }
    }

    /// Draw up to `count` cards, stopping early if the deck runs out
    pub fn draw_hand(&mut self, count: usize) -> Vec<Card> {
        let n = count.min(self.cards.len());
        self.cards.drain(..n).collect()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn card_ids(&self) -> Vec<CardId> {
        self.cards.iter().map(|c| c.id.clone()).collect()
    }

    pub fn rarity_counts(&self) -> BTreeMap<Rarity, usize> {
        let mut counts = BTreeMap::new();
        for card in &self.cards {
            *counts.entry(card.rarity).or_insert(0) += 1;
        }
        counts
    }

    /// Number of rare and epic cards
    pub fn premium_count(&self) -> usize {
        self.cards.iter().filter(|c| c.rarity.is_premium()).count()
    }

    /// Check deck-building constraints
    ///
    /// These checks are surfaced to deck editing only; drawing and adding
    /// cards never enforce them.
    pub fn validate(&self, config: &RulesConfig) -> Vec<DeckIssue> {
        let mut issues = Vec::new();
        let size = self.cards.len();

        if size < config.min_deck_size {
            issues.push(DeckIssue::TooFewCards {
                size,
                min: config.min_deck_size,
            });
        }
        if size > config.max_deck_size {
            issues.push(DeckIssue::TooManyCards {
                size,
                max: config.max_deck_size,
            });
        }

        let mut copies: BTreeMap<&CardId, u32> = BTreeMap::new();
        for card in &self.cards {
            *copies.entry(&card.id).or_insert(0) += 1;
        }
        for (card_id, count) in copies {
            if count > config.max_copies_per_card {
                issues.push(DeckIssue::TooManyCopies {
                    card_id: card_id.clone(),
                    count,
                    max: config.max_copies_per_card,
                });
            }
        }

        issues
    }

    pub fn is_valid(&self, config: &RulesConfig) -> bool {
        self.validate(config).is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;

    fn numbered_deck(n: usize) -> Deck {
        let cards = (0..n)
            .map(|i| Card::new(format!("card_{i}"), format!("Card {i}"), 1, 1, 1))
            .collect();
        Deck::new("Test", cards)
    }

    #[test]
    fn test_draw_from_top() {
        let mut deck = numbered_deck(3);
        assert_eq!(deck.draw().unwrap().id.as_str(), "card_0");
        assert_eq!(deck.draw().unwrap().id.as_str(), "card_1");
        assert_eq!(deck.len(), 1);
    }

    #[test]
    fn test_draw_empty_is_none() {
        let mut deck = Deck::default();
        assert!(deck.is_empty());
        assert_eq!(deck.draw(), None);
    }

    #[test]
    fn test_draw_hand_stops_early() {
        let mut deck = numbered_deck(2);
        let hand = deck.draw_hand(4);
        assert_eq!(hand.len(), 2);
        assert!(deck.is_empty());
        assert!(deck.draw_hand(3).is_empty());
    }

    #[test]
    fn test_seeded_shuffle_is_reproducible() {
        let mut a = numbered_deck(20);
        let mut b = numbered_deck(20);
        a.shuffle(&mut ChaCha12Rng::seed_from_u64(7));
        b.shuffle(&mut ChaCha12Rng::seed_from_u64(7));
        assert_eq!(a.card_ids(), b.card_ids());

        // Still a permutation of the original cards
        let mut ids = a.card_ids();
        ids.sort();
        let mut expected = numbered_deck(20).card_ids();
        expected.sort();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_remove_card() {
        let mut deck = numbered_deck(2);
        assert_eq!(deck.remove_card(1).unwrap().id.as_str(), "card_1");
        assert_eq!(deck.remove_card(5), None);
        assert_eq!(deck.len(), 1);
    }

    #[test]
    fn test_validate_copies_and_size() {
        let config = RulesConfig::default();
        let mut deck = Deck::new("Copies", Vec::new());
        assert_eq!(
            deck.validate(&config),
            vec![DeckIssue::TooFewCards { size: 0, min: 1 }]
        );

        for _ in 0..4 {
            deck.add_card(Card::new("imp", "Imp", 1, 1, 1));
        }
        let issues = deck.validate(&config);
        assert_eq!(issues.len(), 1);
        assert!(matches!(issues[0], DeckIssue::TooManyCopies { count: 4, max: 3, .. }));

        let big = numbered_deck(31);
        assert!(matches!(big.validate(&config)[0], DeckIssue::TooManyCards { size: 31, .. }));
        assert!(numbered_deck(30).is_valid(&config));
    }

    #[test]
    fn test_premium_count() {
        let deck = Deck::new(
            "Mixed",
            vec![
                Card::new("a", "A", 1, 1, 1).with_rarity(Rarity::Rare),
                Card::new("b", "B", 1, 1, 1).with_rarity(Rarity::Epic),
                Card::new("c", "C", 1, 1, 1),
            ],
        );
        assert_eq!(deck.premium_count(), 2);
        assert_eq!(deck.rarity_counts()[&Rarity::Common], 1);
    }
}
