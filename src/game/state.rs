//! Main game state structure

use crate::core::{Player, Seat};
use crate::game::{GamePhase, TurnStructure};
use serde::{Deserialize, Serialize};

/// How a finished match ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOutcome {
    Winner(Seat),
    /// Both players reached 0 health in the same resolution step
    Draw,
}

/// Complete match state
///
/// Holds both players and the turn bookkeeping. There is exactly one
/// `GameState` per match and it is mutated by one controller at a time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// Indexed by `Seat::index()`: the human player first, then the AI
    pub players: [Player; 2],

    pub turn: TurnStructure,

    /// Set once either player's health reaches 0; never cleared
    pub game_over: bool,

    /// Winning seat, `None` while the match runs or after a draw
    pub winner: Option<Seat>,
}

impl GameState {
    pub fn new(player: Player, opponent: Player) -> Self {
        GameState {
            players: [player, opponent],
            turn: TurnStructure::new(),
            game_over: false,
            winner: None,
        }
    }

    pub fn player(&self) -> &Player {
        &self.players[0]
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.players[0]
    }

    pub fn opponent(&self) -> &Player {
        &self.players[1]
    }

    pub fn opponent_mut(&mut self) -> &mut Player {
        &mut self.players[1]
    }

    pub fn seat(&self, seat: Seat) -> &Player {
        &self.players[seat.index()]
    }

    pub fn seat_mut(&mut self, seat: Seat) -> &mut Player {
        &mut self.players[seat.index()]
    }

    pub fn current_seat(&self) -> Seat {
        self.turn.active_seat
    }

    pub fn current_phase(&self) -> GamePhase {
        self.turn.current_phase
    }

    pub fn turn_number(&self) -> u32 {
        self.turn.turn_number
    }

    pub fn current_player(&self) -> &Player {
        self.seat(self.turn.active_seat)
    }

    pub fn current_player_mut(&mut self) -> &mut Player {
        let seat = self.turn.active_seat;
        self.seat_mut(seat)
    }

    pub fn other_player(&self) -> &Player {
        self.seat(self.turn.active_seat.other())
    }

    /// Mutable access to the active player and the other player at once
    pub fn active_and_other_mut(&mut self) -> (&mut Player, &mut Player) {
        let [player, opponent] = &mut self.players;
        match self.turn.active_seat {
            Seat::Player => (player, opponent),
            Seat::Opponent => (opponent, player),
        }
    }

    /// Advance to the next phase, changing turns on the End -> Draw edge
    ///
    /// Once the match is over the phase no longer moves.
    pub fn next_phase(&mut self) -> GamePhase {
        if self.game_over {
            return self.turn.current_phase;
        }
        let transition = self.turn.advance_phase();
        if transition.ends_turn {
            self.next_turn();
        }
        self.turn.current_phase
    }

    /// Flip the active seat and refill the new active player's energy
    pub fn next_turn(&mut self) {
        self.turn.next_turn();
        self.current_player_mut().reset_energy();
    }

    /// Record the end of the match if either player is out of health
    ///
    /// Idempotent: once the match is over the outcome never changes.
    pub fn check_game_over(&mut self) -> bool {
        if self.game_over {
            return true;
        }

        let player_dead = !self.player().is_alive();
        let opponent_dead = !self.opponent().is_alive();
        self.winner = match (player_dead, opponent_dead) {
            (false, false) => return false,
            (true, true) => None,
            (true, false) => Some(Seat::Opponent),
            (false, true) => Some(Seat::Player),
        };
        self.game_over = true;
        true
    }

    pub fn outcome(&self) -> Option<GameOutcome> {
        if !self.game_over {
            return None;
        }
        Some(self.winner.map_or(GameOutcome::Draw, GameOutcome::Winner))
    }

    pub fn winner_player(&self) -> Option<&Player> {
        self.winner.map(|seat| self.seat(seat))
    }
}
