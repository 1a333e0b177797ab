//! Human action gateway
//!
//! `PlayerController` stands between a front end and `Player::play_card`. It
//! adds the match-level gates a bare `Player` cannot know about: the action
//! must happen in the play phase and on the acting seat's own turn.

use crate::core::{Card, Seat};
use crate::error::ActionError;
use crate::game::{GameEvent, GamePhase, GameState};

/// Validates and applies play-phase intents for one seat
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerController {
    seat: Seat,
}

impl PlayerController {
    pub fn new(seat: Seat) -> Self {
        PlayerController { seat }
    }

    pub fn seat(&self) -> Seat {
        self.seat
    }

    /// Match-level gates: the match is running, it is the play phase and
    /// this seat is active
    fn check_turn(&self, game: &GameState) -> Result<(), ActionError> {
        if game.game_over || game.current_phase() != GamePhase::Play {
            return Err(ActionError::WrongPhase);
        }
        if game.current_seat() != self.seat {
            return Err(ActionError::NotYourTurn);
        }
        Ok(())
    }

    /// Validate a play without applying it
    pub fn can_play_card(&self, game: &GameState, hand_index: usize, field_index: usize) -> Result<(), ActionError> {
        self.check_turn(game)?;
        game.seat(self.seat).check_play(hand_index, field_index)?;
        Ok(())
    }

    /// Play a card from hand onto the field
    ///
    /// Phase and turn are checked first; the remaining checks are the
    /// player's own. A rejected play leaves the state untouched.
    pub fn play_card(
        &self,
        game: &mut GameState,
        hand_index: usize,
        field_index: usize,
    ) -> Result<GameEvent, ActionError> {
        self.check_turn(game)?;

        let player = game.seat_mut(self.seat);
        let card = player.play_card(hand_index, field_index)?.name.clone();
        Ok(GameEvent::CardPlayed {
            player: player.name.clone(),
            card,
            field_position: field_index,
            energy_remaining: player.energy,
        })
    }

    /// Finish the play phase
    ///
    /// Only reports the intent; the caller advances the phase through
    /// `GameController::advance_phase`.
    pub fn end_play_phase(&self, game: &GameState) -> Result<GameEvent, ActionError> {
        self.check_turn(game)?;
        Ok(GameEvent::PhaseEnded {
            player: game.seat(self.seat).name.clone(),
            phase: GamePhase::Play,
        })
    }

    /// Hand cards affordable with the seat's current energy, with their indices
    pub fn get_playable_cards<'g>(&self, game: &'g GameState) -> Vec<(usize, &'g Card)> {
        let player = game.seat(self.seat);
        player
            .hand
            .iter()
            .enumerate()
            .filter(|(_, card)| card.cost <= player.energy)
            .collect()
    }

    /// Empty lanes on the seat's field
    pub fn get_card_placement_options(&self, game: &GameState) -> Vec<usize> {
        game.seat(self.seat).field.empty_lanes().collect()
    }
}
