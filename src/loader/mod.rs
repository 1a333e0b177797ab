//! Card database, deck lists and player persistence

pub mod database;
pub mod deck;
pub mod save;

pub use database::{CardDatabase, CardDefinition};
pub use deck::{ai_deck, ai_deck_composition, create_ai_opponent, starter_deck, DeckList};
pub use save::PlayerSnapshot;
