//! Scripted human input for tests and demos
//!
//! Follows a predetermined sequence of intents and ends the phase once the
//! script runs out.

use crate::error::ActionError;
use crate::game::game_loop::{GameStateView, HumanInput, PlayIntent};

/// A human stand-in that replays a fixed list of intents
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    intents: Vec<PlayIntent>,
    current_step: usize,
    rejected: Vec<ActionError>,
}

impl ScriptedInput {
    pub fn new(intents: Vec<PlayIntent>) -> Self {
        ScriptedInput {
            intents,
            current_step: 0,
            rejected: Vec::new(),
        }
    }

    /// Intents not yet consumed
    pub fn remaining(&self) -> usize {
        self.intents.len() - self.current_step
    }

    /// Reasons given for every refused intent, in order
    pub fn rejected(&self) -> &[ActionError] {
        &self.rejected
    }
}

impl HumanInput for ScriptedInput {
    fn choose_play(&mut self, _view: &GameStateView) -> PlayIntent {
        match self.intents.get(self.current_step) {
            Some(intent) => {
                self.current_step += 1;
                *intent
            }
            None => PlayIntent::EndPhase,
        }
    }

    fn on_rejected(&mut self, _view: &GameStateView, error: &ActionError) {
        self.rejected.push(error.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Card, Deck, Player, Seat};
    use crate::game::GameState;

    #[test]
    fn test_script_then_end_phase() {
        let game = GameState::new(
            Player::new("Alice", Deck::default(), 10, 3),
            Player::new("Bot", Deck::default(), 10, 3),
        );
        let view = GameStateView::new(&game, Seat::Player);
        let play = PlayIntent::Play {
            hand_index: 0,
            field_index: 2,
        };
        let mut input = ScriptedInput::new(vec![play]);

        assert_eq!(input.remaining(), 1);
        assert_eq!(input.choose_play(&view), play);
        assert_eq!(input.choose_play(&view), PlayIntent::EndPhase);
        assert_eq!(input.remaining(), 0);
    }

    #[test]
    fn test_rejections_are_kept() {
        let mut game = GameState::new(
            Player::new("Alice", Deck::default(), 10, 3),
            Player::new("Bot", Deck::default(), 10, 3),
        );
        game.player_mut().hand.push(Card::new("x", "X", 1, 1, 1));
        let view = GameStateView::new(&game, Seat::Player);
        let mut input = ScriptedInput::default();
        input.on_rejected(&view, &ActionError::SlotOccupied(1));
        assert_eq!(input.rejected(), &[ActionError::SlotOccupied(1)]);
    }
}
