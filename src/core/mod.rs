//! Core game types and entities

pub mod card;
pub mod deck;
pub mod player;
pub mod types;

pub use card::Card;
pub use deck::{Deck, DeckIssue};
pub use player::Player;
pub use types::{CardId, Difficulty, Rarity, Seat};
