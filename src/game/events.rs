//! Typed event stream
//!
//! Every phase-affecting operation returns an ordered list of `GameEvent`s.
//! This is the only channel through which a front end learns what happened;
//! the engine never calls back into presentation code.

use crate::core::Difficulty;
use crate::game::GamePhase;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    Draw {
        player: String,
        card: String,
    },
    DeckEmpty {
        player: String,
    },
    CardPlayed {
        player: String,
        card: String,
        field_position: usize,
        energy_remaining: u32,
    },
    AiCardPlayed {
        player: String,
        card: String,
        field_position: usize,
        energy_remaining: u32,
    },
    PhaseEnded {
        player: String,
        phase: GamePhase,
    },
    CardAttack {
        attacker: String,
        defender: String,
        attack_damage: u32,
        slot: usize,
    },
    CardCounterAttack {
        attacker: String,
        defender: String,
        attack_damage: u32,
        slot: usize,
    },
    CardDestroyed {
        card: String,
        owner: String,
        slot: usize,
    },
    PlayerDamage {
        player: String,
        damage: u32,
        source: String,
        slot: usize,
    },
    CreditsAwarded {
        player: String,
        amount: u32,
        difficulty: Difficulty,
    },
    GameOver {
        /// `None` when the match ended in a draw
        winner: Option<String>,
    },
}

impl GameEvent {
    /// The `type` tag, as it appears in serialized form
    pub fn kind(&self) -> &'static str {
        match self {
            GameEvent::Draw { .. } => "draw",
            GameEvent::DeckEmpty { .. } => "deck_empty",
            GameEvent::CardPlayed { .. } => "card_played",
            GameEvent::AiCardPlayed { .. } => "ai_card_played",
            GameEvent::PhaseEnded { .. } => "phase_ended",
            GameEvent::CardAttack { .. } => "card_attack",
            GameEvent::CardCounterAttack { .. } => "card_counter_attack",
            GameEvent::CardDestroyed { .. } => "card_destroyed",
            GameEvent::PlayerDamage { .. } => "player_damage",
            GameEvent::CreditsAwarded { .. } => "credits_awarded",
            GameEvent::GameOver { .. } => "game_over",
        }
    }
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameEvent::Draw { player, card } => write!(f, "{player} drew {card}"),
            GameEvent::DeckEmpty { player } => write!(f, "{player} has no more cards to draw"),
            GameEvent::CardPlayed {
                player,
                card,
                field_position,
                energy_remaining,
            }
            | GameEvent::AiCardPlayed {
                player,
                card,
                field_position,
                energy_remaining,
            } => write!(
                f,
                "{player} plays {card} to position {field_position} ({energy_remaining} energy left)"
            ),
            GameEvent::PhaseEnded { player, phase } => write!(f, "{player} ends the {phase} phase"),
            GameEvent::CardAttack {
                attacker,
                defender,
                attack_damage,
                slot,
            } => write!(f, "[lane {slot}] {attacker} attacks {defender} for {attack_damage} damage"),
            GameEvent::CardCounterAttack {
                attacker,
                defender,
                attack_damage,
                slot,
            } => write!(
                f,
                "[lane {slot}] {attacker} counter-attacks {defender} for {attack_damage} damage"
            ),
            GameEvent::CardDestroyed { card, owner, slot } => {
                write!(f, "[lane {slot}] {owner}'s {card} was destroyed")
            }
            GameEvent::PlayerDamage {
                player,
                damage,
                source,
                slot,
            } => write!(f, "[lane {slot}] {player} takes {damage} damage from {source}"),
            GameEvent::CreditsAwarded {
                player,
                amount,
                difficulty,
            } => write!(f, "{player} received {amount} credits ({difficulty} victory)"),
            GameEvent::GameOver { winner: Some(winner) } => write!(f, "Game over! Winner: {winner}"),
            GameEvent::GameOver { winner: None } => write!(f, "Game over! The match is a draw"),
        }
    }
}

/// Events produced by one `process_turn` call, tagged with the phase that
/// produced them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseReport {
    pub phase: GamePhase,
    pub events: Vec<GameEvent>,
}

impl PhaseReport {
    pub fn new(phase: GamePhase) -> Self {
        PhaseReport {
            phase,
            events: Vec::new(),
        }
    }

    pub fn count(&self, kind: &str) -> usize {
        self.events.iter().filter(|e| e.kind() == kind).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_tagged_serialization() {
        let event = GameEvent::CardAttack {
            attacker: "Knight".to_string(),
            defender: "Imp".to_string(),
            attack_damage: 4,
            slot: 1,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "card_attack");
        assert_eq!(json["attack_damage"], 4);
        assert_eq!(json["slot"], 1);
        assert_eq!(event.kind(), "card_attack");
    }

    #[test]
    fn test_draw_game_over_renders() {
        let event = GameEvent::GameOver { winner: None };
        assert_eq!(event.to_string(), "Game over! The match is a draw");
        let json = serde_json::to_value(&event).unwrap();
        assert!(json["winner"].is_null());
    }
}
