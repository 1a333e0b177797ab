//! Match orchestration
//!
//! `GameController` owns the `GameState` for one match and runs the engine
//! side of each phase: drawing, combat, win detection and rewards. Player
//! input goes through `PlayerController` and the AI through `AiController`;
//! both borrow the state from here.

use crate::config::RulesConfig;
use crate::core::{Difficulty, Player, Seat};
use crate::game::combat::resolve_attack;
use crate::game::{GameEvent, GameLogger, GamePhase, GameState, PhaseReport};
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;

/// Difficulty of an opponent, judged from its name and then from its deck
///
/// A name containing "easy", "normal" or "hard" (case-insensitive) decides
/// it.
/// Otherwise a deck with many rare/epic cards counts as hard and one with
/// very few as easy.
pub fn opponent_difficulty(opponent: &Player, rules: &RulesConfig) -> Difficulty {
    let name = opponent.name.to_lowercase();
    if name.contains("easy") {
        return Difficulty::Easy;
    }
    if name.contains("normal") {
        return Difficulty::Normal;
    }
    if name.contains("hard") {
        return Difficulty::Hard;
    }

    let premium = opponent.deck.premium_count();
    if premium >= rules.hard_premium_threshold {
        Difficulty::Hard
    } else if premium <= rules.easy_premium_threshold {
        Difficulty::Easy
    } else {
        Difficulty::Normal
    }
}

pub struct GameController {
    state: GameState,
    rules: RulesConfig,
    rng: ChaCha12Rng,
    logger: GameLogger,
}

impl GameController {
    pub fn new(player: Player, opponent: Player, rules: RulesConfig, seed: u64) -> Self {
        GameController {
            state: GameState::new(player, opponent),
            rules,
            rng: ChaCha12Rng::seed_from_u64(seed),
            logger: GameLogger::new(),
        }
    }

    pub fn with_logger(mut self, logger: GameLogger) -> Self {
        self.logger = logger;
        self
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn into_state(self) -> GameState {
        self.state
    }

    pub fn rules(&self) -> &RulesConfig {
        &self.rules
    }

    pub fn logger(&self) -> &GameLogger {
        &self.logger
    }

    pub fn logger_mut(&mut self) -> &mut GameLogger {
        &mut self.logger
    }

    pub fn is_over(&self) -> bool {
        self.state.game_over
    }

    /// Reset both players, shuffle their decks and deal opening hands
    ///
    /// Turn 1 starts with the player seat in the draw phase.
    pub fn start_game(&mut self) {
        self.state.turn = Default::default();
        self.state.game_over = false;
        self.state.winner = None;

        for seat in [Seat::Player, Seat::Opponent] {
            let player = self.state.seat_mut(seat);
            player.health = player.max_health;
            player.reset_energy();
            player.hand.clear();
            player.field.clear();
            player.deck.shuffle(&mut self.rng);
            let dealt = player.draw_starting_hand(self.rules.starting_hand_size);
            log_if_verbose!(self.logger, Verbose, "{} draws an opening hand of {} cards", player.name, dealt);
        }

        log_if_verbose!(
            self.logger,
            Normal,
            "Match started: {} vs {}",
            self.state.player().name,
            self.state.opponent().name
        );
    }

    /// Run the engine side of the current phase
    ///
    /// Does not advance the phase. Returns an empty report once the match
    /// is over.
    pub fn process_turn(&mut self) -> PhaseReport {
        let phase = self.state.current_phase();
        let mut report = PhaseReport::new(phase);
        if self.state.game_over {
            self.logger.verbose("Match is over; nothing to process");
            return report;
        }

        match phase {
            GamePhase::Draw => {
                let player = self.state.current_player_mut();
                let name = player.name.clone();
                let event = match player.draw_card() {
                    Some(card) => GameEvent::Draw {
                        player: name,
                        card: card.name.clone(),
                    },
                    None => GameEvent::DeckEmpty { player: name },
                };
                report.events.push(event);
            }
            // Plays come from the player or AI controllers
            GamePhase::Play => {}
            GamePhase::Attack => {
                let (attacker, defender) = self.state.active_and_other_mut();
                report.events.extend(resolve_attack(attacker, defender));
                if self.state.check_game_over() {
                    self.finish_match(&mut report.events);
                }
            }
            GamePhase::End => {}
        }

        #[cfg(feature = "verbose-logging")]
        self.logger.events(&report.events);
        report
    }

    fn finish_match(&mut self, events: &mut Vec<GameEvent>) {
        if self.state.winner == Some(Seat::Player) {
            let difficulty = opponent_difficulty(self.state.opponent(), &self.rules);
            let amount = self.rules.victory_rewards.for_difficulty(difficulty);
            let player = self.state.player_mut();
            player.add_credits(amount);
            events.push(GameEvent::CreditsAwarded {
                player: player.name.clone(),
                amount,
                difficulty,
            });
        }

        events.push(GameEvent::GameOver {
            winner: self.state.winner_player().map(|p| p.name.clone()),
        });
    }

    /// Move to the next phase, flipping the turn after End
    pub fn advance_phase(&mut self) -> GamePhase {
        if self.state.game_over {
            self.logger.verbose("Match is over; phase stays put");
            return self.state.current_phase();
        }
        let phase = self.state.next_phase();
        log_if_verbose!(
            self.logger,
            Verbose,
            "Turn {} - {} phase ({})",
            self.state.turn_number(),
            phase,
            self.state.current_player().name
        );
        phase
    }
}
