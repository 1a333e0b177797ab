//! Error types for Lane Duel

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DuelError {
    #[error("Unknown card id: {0}")]
    UnknownCard(String),

    #[error("Invalid deck: {0}")]
    InvalidDeck(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Match is already over")]
    MatchOver,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, DuelError>;

/// Coarse classification of a rejected player action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionErrorKind {
    WrongPhase,
    NotYourTurn,
    InvalidIndex,
    SlotOccupied,
    InsufficientEnergy,
}

/// An illegal action attempted by a player
///
/// These are ordinary game outcomes rather than failures: the caller decides
/// whether to retry or to show the reason to the user. `Display` renders the
/// short reason string.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionError {
    #[error("You can only play cards during the play phase")]
    WrongPhase,

    #[error("It's not your turn")]
    NotYourTurn,

    #[error("Invalid hand index {index} (hand holds {hand_size} cards)")]
    InvalidHandIndex { index: usize, hand_size: usize },

    #[error("Invalid field index {0}")]
    InvalidFieldIndex(usize),

    #[error("Field position {0} already occupied")]
    SlotOccupied(usize),

    #[error("Not enough energy (need {required}, have {available})")]
    InsufficientEnergy { required: u32, available: u32 },
}

impl ActionError {
    pub fn kind(&self) -> ActionErrorKind {
        match self {
            ActionError::WrongPhase => ActionErrorKind::WrongPhase,
            ActionError::NotYourTurn => ActionErrorKind::NotYourTurn,
            ActionError::InvalidHandIndex { .. } | ActionError::InvalidFieldIndex(_) => {
                ActionErrorKind::InvalidIndex
            }
            ActionError::SlotOccupied(_) => ActionErrorKind::SlotOccupied,
            ActionError::InsufficientEnergy { .. } => ActionErrorKind::InsufficientEnergy,
        }
    }
}
