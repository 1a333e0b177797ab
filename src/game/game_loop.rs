//! Match loop
//!
//! Drives a `GameController` through phases until the match ends, handing
//! each play phase to whoever sits in the active seat: a human behind the
//! `HumanInput` trait or an `AiController`.

use crate::core::{Card, Seat};
use crate::error::ActionError;
use crate::game::{AiController, GameController, GameEvent, GamePhase, GameState, PlayerController};
use crate::zones::Field;
use crate::{DuelError, Result};
use serde::{Deserialize, Serialize};

/// Rejected intents tolerated in one play phase before the loop moves on
const MAX_REJECTIONS_PER_PHASE: usize = 32;

/// Reason the match ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEndReason {
    /// The given seat reduced the other to 0 health
    PlayerDeath(Seat),
    /// Both players reached 0 health in the same attack phase
    Draw,
    /// Match reached the maximum turn limit
    TurnLimit,
    /// `run_turns` finished before the match did
    Manual,
}

/// Result of running a match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub winner: Option<Seat>,
    pub winner_name: Option<String>,
    pub turns_played: u32,
    pub end_reason: GameEndReason,
    /// Credits granted to the player seat for winning
    pub credits_awarded: u32,
    /// Every event of the match, in order
    pub events: Vec<GameEvent>,
}

/// What a human wants to do during their play phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayIntent {
    Play { hand_index: usize, field_index: usize },
    EndPhase,
}

/// Source of play-phase decisions for a human seat
pub trait HumanInput {
    /// Pick the next intent for the seat the view belongs to
    fn choose_play(&mut self, view: &GameStateView) -> PlayIntent;

    /// Called when the last intent was refused
    fn on_rejected(&mut self, _view: &GameStateView, _error: &ActionError) {}

    /// Called once the match is decided
    fn on_game_end(&mut self, _view: &GameStateView, _won: bool) {}
}

/// Read-only view of the match from one seat
pub struct GameStateView<'a> {
    game: &'a GameState,
    seat: Seat,
}

impl<'a> GameStateView<'a> {
    pub fn new(game: &'a GameState, seat: Seat) -> Self {
        GameStateView { game, seat }
    }

    pub fn seat(&self) -> Seat {
        self.seat
    }

    pub fn hand(&self) -> &'a [Card] {
        &self.game.seat(self.seat).hand
    }

    pub fn field(&self) -> &'a Field {
        &self.game.seat(self.seat).field
    }

    pub fn opponent_field(&self) -> &'a Field {
        &self.game.seat(self.seat.other()).field
    }

    pub fn health(&self) -> u32 {
        self.game.seat(self.seat).health
    }

    pub fn opponent_health(&self) -> u32 {
        self.game.seat(self.seat.other()).health
    }

    pub fn energy(&self) -> u32 {
        self.game.seat(self.seat).energy
    }

    pub fn deck_size(&self) -> usize {
        self.game.seat(self.seat).deck.len()
    }

    pub fn turn_number(&self) -> u32 {
        self.game.turn_number()
    }

    pub fn phase(&self) -> GamePhase {
        self.game.current_phase()
    }

    /// Affordable hand cards with their indices
    pub fn playable_cards(&self) -> Vec<(usize, &'a Card)> {
        PlayerController::new(self.seat).get_playable_cards(self.game)
    }

    pub fn placement_options(&self) -> Vec<usize> {
        PlayerController::new(self.seat).get_card_placement_options(self.game)
    }
}

/// Who makes the play-phase decisions for a seat
pub enum SeatDriver<'c> {
    Human(&'c mut dyn HumanInput),
    Ai(AiController),
}

/// Match loop manager
pub struct GameLoop<'a> {
    pub controller: &'a mut GameController,
    max_turns: u32,
    history: Vec<GameEvent>,
    credits_awarded: u32,
}

impl<'a> GameLoop<'a> {
    pub fn new(controller: &'a mut GameController) -> Self {
        let max_turns = controller.rules().max_turns;
        GameLoop {
            controller,
            max_turns,
            history: Vec::new(),
            credits_awarded: 0,
        }
    }

    pub fn with_max_turns(mut self, max_turns: u32) -> Self {
        self.max_turns = max_turns;
        self
    }

    /// Every event produced so far, in order
    pub fn history(&self) -> &[GameEvent] {
        &self.history
    }

    /// Log an event raised by a seat driver, then track it
    fn record(&mut self, event: GameEvent) {
        #[cfg(feature = "verbose-logging")]
        self.controller.logger().event(&event);
        self.track(event);
    }

    /// Track an event the controller has already logged
    fn track(&mut self, event: GameEvent) {
        if let GameEvent::CreditsAwarded { amount, .. } = event {
            self.credits_awarded += amount;
        }
        self.history.push(event);
    }

    /// Deal a fresh match and play it to the end
    pub fn run_match(&mut self, player: &mut SeatDriver, opponent: &mut SeatDriver) -> Result<MatchResult> {
        self.controller.start_game();
        self.history.clear();
        self.credits_awarded = 0;

        self.describe_driver(Seat::Player, player);
        self.describe_driver(Seat::Opponent, opponent);

        loop {
            if let Some(result) = self.run_turn_once(player, opponent)? {
                self.notify_game_end(player, opponent);
                return Ok(result);
            }
        }
    }

    /// Run up to `turns` seat turns of an already started match
    pub fn run_turns(&mut self, player: &mut SeatDriver, opponent: &mut SeatDriver, turns: u32) -> Result<MatchResult> {
        for _ in 0..turns {
            if let Some(result) = self.run_turn_once(player, opponent)? {
                return Ok(result);
            }
        }

        Ok(MatchResult {
            winner: None,
            winner_name: None,
            turns_played: self.controller.state().turn_number(),
            end_reason: GameEndReason::Manual,
            credits_awarded: self.credits_awarded,
            events: self.history.clone(),
        })
    }

    /// Run one seat's turn (draw, play, attack, end)
    ///
    /// Returns `Some` once the match is decided or the turn limit is hit.
    fn run_turn_once(&mut self, player: &mut SeatDriver, opponent: &mut SeatDriver) -> Result<Option<MatchResult>> {
        if self.controller.is_over() {
            return Err(DuelError::MatchOver);
        }

        let seat = self.controller.state().current_seat();
        if seat == Seat::Player && self.max_turns > 0 && self.controller.state().turn_number() > self.max_turns {
            log_if_verbose!(self.controller.logger(), Minimal, "Turn limit of {} reached", self.max_turns);
            return Ok(Some(self.result(GameEndReason::TurnLimit)));
        }
        log_if_verbose!(
            self.controller.logger(),
            Verbose,
            "=== Turn {} ({}) ===",
            self.controller.state().turn_number(),
            self.controller.state().current_player().name
        );

        for _ in GamePhase::ALL {
            let report = self.controller.process_turn();
            for event in report.events {
                self.track(event);
            }

            if report.phase == GamePhase::Play {
                match seat {
                    Seat::Player => self.drive_seat(seat, player),
                    Seat::Opponent => self.drive_seat(seat, opponent),
                }
            }

            if self.controller.is_over() {
                let reason = match self.controller.state().winner {
                    Some(winner) => GameEndReason::PlayerDeath(winner),
                    None => GameEndReason::Draw,
                };
                return Ok(Some(self.result(reason)));
            }

            self.controller.advance_phase();
        }

        Ok(None)
    }

    fn drive_seat(&mut self, seat: Seat, driver: &mut SeatDriver) {
        match driver {
            SeatDriver::Ai(ai) => {
                let events = ai.take_turn(self.controller.state_mut());
                if events.is_empty() {
                    log_if_verbose!(
                        category = "ai_choice",
                        self.controller.logger(),
                        Verbose,
                        "{} passes",
                        self.controller.state().seat(seat).name
                    );
                }
                for event in events {
                    self.record(event);
                }
            }
            SeatDriver::Human(input) => self.drive_human(seat, &mut **input),
        }
    }

    fn drive_human(&mut self, seat: Seat, input: &mut dyn HumanInput) {
        let gateway = PlayerController::new(seat);
        let mut rejections = 0;

        loop {
            let intent = input.choose_play(&GameStateView::new(self.controller.state(), seat));
            match intent {
                PlayIntent::EndPhase => {
                    if let Ok(event) = gateway.end_play_phase(self.controller.state()) {
                        self.record(event);
                    }
                    break;
                }
                PlayIntent::Play {
                    hand_index,
                    field_index,
                } => match gateway.play_card(self.controller.state_mut(), hand_index, field_index) {
                    Ok(event) => self.record(event),
                    Err(err) => {
                        log_if_verbose!(self.controller.logger(), Verbose, "Rejected play: {}", err);
                        input.on_rejected(&GameStateView::new(self.controller.state(), seat), &err);
                        rejections += 1;
                        if rejections >= MAX_REJECTIONS_PER_PHASE {
                            break;
                        }
                    }
                },
            }
        }
    }

    fn describe_driver(&self, seat: Seat, driver: &SeatDriver) {
        if let SeatDriver::Ai(ai) = driver {
            let profile = ai.profile();
            log_if_verbose!(
                self.controller.logger(),
                Verbose,
                "{} is played by a {} {} AI",
                self.controller.state().seat(seat).name,
                profile.difficulty,
                profile.personality
            );
        }
    }

    fn notify_game_end(&mut self, player: &mut SeatDriver, opponent: &mut SeatDriver) {
        self.notify_seat(Seat::Player, player);
        self.notify_seat(Seat::Opponent, opponent);
    }

    fn notify_seat(&self, seat: Seat, driver: &mut SeatDriver) {
        if let SeatDriver::Human(input) = driver {
            let won = self.controller.state().winner == Some(seat);
            input.on_game_end(&GameStateView::new(self.controller.state(), seat), won);
        }
    }

    fn result(&self, end_reason: GameEndReason) -> MatchResult {
        let state = self.controller.state();
        MatchResult {
            winner: state.winner,
            winner_name: state.winner_player().map(|p| p.name.clone()),
            turns_played: if self.max_turns > 0 {
                state.turn_number().min(self.max_turns)
            } else {
                state.turn_number()
            },
            end_reason,
            credits_awarded: self.credits_awarded,
            events: self.history.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RulesConfig;
    use crate::core::{Deck, Difficulty, Player};
    use crate::game::{AiPersonality, GameLogger, ScriptedInput, VerbosityLevel};

    fn deck(n: usize, attack: u32) -> Deck {
        Deck::new(
            "test",
            (0..n)
                .map(|i| Card::new(format!("c{i}"), format!("Card {i}"), 1, attack, 2))
                .collect(),
        )
    }

    fn controller(player_deck: Deck, opponent_deck: Deck) -> GameController {
        let rules = RulesConfig::default();
        GameController::new(
            Player::with_rules("Alice", player_deck, &rules),
            Player::with_rules("Normal AI Opponent", opponent_deck, &rules),
            rules,
            5,
        )
        .with_logger(GameLogger::capturing(VerbosityLevel::Normal))
    }

    #[test]
    fn test_ai_beats_passive_human() {
        let mut gc = controller(deck(10, 1), deck(10, 3));
        let mut passive = ScriptedInput::new(Vec::new());
        let mut human = SeatDriver::Human(&mut passive);
        let mut ai = SeatDriver::Ai(AiController::new(Difficulty::Normal, AiPersonality::Aggressive, 1));

        let result = GameLoop::new(&mut gc).run_match(&mut human, &mut ai).unwrap();
        assert_eq!(result.winner, Some(Seat::Opponent));
        assert_eq!(result.end_reason, GameEndReason::PlayerDeath(Seat::Opponent));
        assert_eq!(result.credits_awarded, 0);
        assert_eq!(gc.state().player().health, 0);
    }

    #[test]
    fn test_scripted_win_awards_credits() {
        let mut gc = controller(deck(10, 5), deck(10, 1));
        let script = (0..30)
            .flat_map(|_| {
                [
                    PlayIntent::Play {
                        hand_index: 0,
                        field_index: 0,
                    },
                    PlayIntent::Play {
                        hand_index: 0,
                        field_index: 1,
                    },
                    PlayIntent::Play {
                        hand_index: 0,
                        field_index: 2,
                    },
                    PlayIntent::EndPhase,
                ]
            })
            .collect();
        let mut input = ScriptedInput::new(script);
        let mut human = SeatDriver::Human(&mut input);
        let mut passive_ai = SeatDriver::Ai(AiController::new(Difficulty::Easy, AiPersonality::Balanced, 2));
        // The AI holds no cards so it can never block
        gc.state_mut().opponent_mut().deck = Deck::default();

        let mut game_loop = GameLoop::new(&mut gc);
        let result = game_loop.run_match(&mut human, &mut passive_ai).unwrap();
        assert_eq!(result.winner_name.as_deref(), Some("Alice"));
        // Empty deck has no premium cards, so the win is easy tier
        assert_eq!(result.credits_awarded, 20);
        assert!(matches!(
            game_loop.history().last(),
            Some(GameEvent::GameOver { winner: Some(_) })
        ));
    }

    #[test]
    fn test_turn_limit() {
        let mut gc = controller(Deck::default(), Deck::default());
        let mut a = ScriptedInput::new(Vec::new());
        let mut b = ScriptedInput::new(Vec::new());
        let result = GameLoop::new(&mut gc)
            .with_max_turns(3)
            .run_match(&mut SeatDriver::Human(&mut a), &mut SeatDriver::Human(&mut b))
            .unwrap();
        assert_eq!(result.end_reason, GameEndReason::TurnLimit);
        assert_eq!(result.winner, None);
        assert_eq!(result.turns_played, 3);
    }

    #[test]
    fn test_run_turns_stops_early() {
        let mut gc = controller(deck(10, 1), deck(10, 1));
        gc.start_game();
        let mut a = ScriptedInput::new(Vec::new());
        let mut b = ScriptedInput::new(Vec::new());
        let result = GameLoop::new(&mut gc)
            .run_turns(&mut SeatDriver::Human(&mut a), &mut SeatDriver::Human(&mut b), 2)
            .unwrap();
        assert_eq!(result.end_reason, GameEndReason::Manual);
        assert_eq!(gc.state().turn_number(), 2);
        assert_eq!(gc.state().current_seat(), Seat::Player);
    }
}
