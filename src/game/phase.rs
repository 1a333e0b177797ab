//! Turn phases

use crate::core::Seat;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The four phases of a turn, in play order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum GamePhase {
    Draw,
    Play,
    Attack,
    End,
}

/// Result of following one edge of the phase table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseTransition {
    pub next: GamePhase,
    /// Set only on the End -> Draw edge: the active player changes
    pub ends_turn: bool,
}

impl GamePhase {
    pub const ALL: [GamePhase; 4] = [GamePhase::Draw, GamePhase::Play, GamePhase::Attack, GamePhase::End];

    /// Phase transition table
    pub fn transition(self) -> PhaseTransition {
        match self {
            GamePhase::Draw => PhaseTransition {
                next: GamePhase::Play,
                ends_turn: false,
            },
            GamePhase::Play => PhaseTransition {
                next: GamePhase::Attack,
                ends_turn: false,
            },
            GamePhase::Attack => PhaseTransition {
                next: GamePhase::End,
                ends_turn: false,
            },
            GamePhase::End => PhaseTransition {
                next: GamePhase::Draw,
                ends_turn: true,
            },
        }
    }

    pub fn next(self) -> GamePhase {
        self.transition().next
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Draw => "DRAW",
            GamePhase::Play => "PLAY",
            GamePhase::Attack => "ATTACK",
            GamePhase::End => "END",
        }
    }
}

impl fmt::Display for GamePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whose turn it is, which phase, and how many rounds have passed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnStructure {
    /// Current turn number (starts at 1, increments when the player seat
    /// becomes active again)
    pub turn_number: u32,

    pub current_phase: GamePhase,

    pub active_seat: Seat,
}

impl TurnStructure {
    pub fn new() -> Self {
        TurnStructure {
            turn_number: 1,
            current_phase: GamePhase::Draw,
            active_seat: Seat::Player,
        }
    }

    /// Follow the table edge out of the current phase
    ///
    /// Returns the transition taken; the caller applies the turn-change side
    /// effects when `ends_turn` is set.
    pub fn advance_phase(&mut self) -> PhaseTransition {
        let transition = self.current_phase.transition();
        self.current_phase = transition.next;
        transition
    }

    /// Hand the turn to the other seat, counting a new round when the
    /// player seat comes back around
    pub fn next_turn(&mut self) -> Seat {
        self.active_seat = self.active_seat.other();
        if self.active_seat == Seat::Player {
            self.turn_number += 1;
        }
        self.active_seat
    }
}

impl Default for TurnStructure {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_cycle() {
        let mut phase = GamePhase::Draw;
        let mut order = Vec::new();
        for _ in 0..4 {
            order.push(phase);
            phase = phase.next();
        }
        assert_eq!(order, GamePhase::ALL.to_vec());
        assert_eq!(phase, GamePhase::Draw);
    }

    #[test]
    fn test_only_end_flips_turn() {
        for phase in GamePhase::ALL {
            assert_eq!(phase.transition().ends_turn, phase == GamePhase::End);
        }
    }

    #[test]
    fn test_turn_structure() {
        let mut turn = TurnStructure::new();
        assert_eq!(turn.turn_number, 1);
        assert_eq!(turn.current_phase, GamePhase::Draw);
        assert_eq!(turn.active_seat, Seat::Player);

        assert_eq!(turn.next_turn(), Seat::Opponent);
        assert_eq!(turn.turn_number, 1);
        assert_eq!(turn.next_turn(), Seat::Player);
        assert_eq!(turn.turn_number, 2);
    }

    #[test]
    fn test_phase_serializes_uppercase() {
        assert_eq!(serde_json::to_string(&GamePhase::Attack).unwrap(), "\"ATTACK\"");
        assert_eq!(GamePhase::Play.to_string(), "PLAY");
    }
}
