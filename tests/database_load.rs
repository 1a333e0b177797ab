//! Card database loading
//!
//! Loads the bundled database and a database file from disk, and checks the
//! cards the rest of the suite relies on.

use lane_duel::{
    core::{CardId, Rarity},
    loader::CardDatabase,
    DuelError, Result,
};
use std::path::PathBuf;

#[test]
fn test_load_bundled_database() -> Result<()> {
    let db = CardDatabase::builtin()?;
    assert!(db.len() >= 12, "bundled database too small: {}", db.len());

    let drake = db.instantiate(&CardId::new("ember_drake"))?;
    assert_eq!(drake.name, "Ember Drake");
    assert_eq!(drake.rarity, Rarity::Rare);
    assert!(drake.is_alive());

    // Every card must be playable with a full energy bar
    for (id, def) in db.iter_sorted() {
        assert!(def.cost <= 3, "{id} costs more than the starting energy");
        assert!(def.hp > 0, "{id} would enter play dead");
    }
    Ok(())
}

#[test]
fn test_load_database_file() -> Result<()> {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/cards.json");
    let from_file = CardDatabase::load_from_file(&path)?;
    let builtin = CardDatabase::builtin()?;
    assert_eq!(from_file.len(), builtin.len());
    Ok(())
}

#[test]
fn test_missing_database_file() {
    let result = CardDatabase::load_from_file("does/not/exist.json");
    assert!(matches!(result, Err(DuelError::IoError(_))));
}

#[test]
fn test_premium_cards_present() -> Result<()> {
    let db = CardDatabase::builtin()?;
    let epics = db.by_rarity(Rarity::Epic);
    assert!(!epics.is_empty());
    let names: Vec<String> = epics
        .iter()
        .map(|id| db.get_card(id).map(|d| d.name.to_lowercase()).unwrap_or_default())
        .collect();
    assert!(names.iter().any(|n| n.contains("dragon") || n.contains("phoenix")));
    Ok(())
}
