//! Batch simulation of AI-vs-AI matches
//!
//! Runs many matches in parallel with rayon and aggregates the results. Each
//! match derives its own seed from the base seed and its index, so a batch
//! is reproducible regardless of how rayon schedules it.

use crate::config::RulesConfig;
use crate::core::{Difficulty, Player, Seat};
use crate::game::{
    AiController, AiPersonality, AiProfile, GameController, GameEndReason, GameLogger, GameLoop, MatchResult,
    SeatDriver, VerbosityLevel,
};
use crate::loader::{ai_deck, create_ai_opponent, CardDatabase};
use crate::Result;
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{Duration, Instant};

/// Settings for a batch of simulated matches
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    pub games: usize,
    /// Difficulty of the AI sitting in the player seat
    pub player_difficulty: Difficulty,
    pub opponent_difficulty: Difficulty,
    pub seed: u64,
    pub rules: RulesConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            games: 100,
            player_difficulty: Difficulty::Normal,
            opponent_difficulty: Difficulty::Normal,
            seed: 42,
            rules: RulesConfig::default(),
        }
    }
}

/// Aggregated outcome of a batch
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationStats {
    pub games: usize,
    pub player_wins: usize,
    pub opponent_wins: usize,
    pub draws: usize,
    pub turn_limits: usize,
    pub total_turns: u64,
    pub total_credits: u64,
    #[serde(skip)]
    pub elapsed: Duration,
}

impl SimulationStats {
    fn record(&mut self, result: &MatchResult) {
        self.games += 1;
        self.total_turns += u64::from(result.turns_played);
        self.total_credits += u64::from(result.credits_awarded);
        match result.end_reason {
            GameEndReason::PlayerDeath(Seat::Player) => self.player_wins += 1,
            GameEndReason::PlayerDeath(Seat::Opponent) => self.opponent_wins += 1,
            GameEndReason::Draw => self.draws += 1,
            GameEndReason::TurnLimit | GameEndReason::Manual => self.turn_limits += 1,
        }
    }

    pub fn player_win_rate(&self) -> f64 {
        if self.games == 0 {
            return 0.0;
        }
        self.player_wins as f64 / self.games as f64
    }

    pub fn average_turns(&self) -> f64 {
        if self.games == 0 {
            return 0.0;
        }
        self.total_turns as f64 / self.games as f64
    }
}

impl fmt::Display for SimulationStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pct = |n: usize| {
            if self.games == 0 {
                0.0
            } else {
                n as f64 * 100.0 / self.games as f64
            }
        };
        writeln!(f, "Games played:   {}", self.games)?;
        writeln!(f, "Player wins:    {} ({:.1}%)", self.player_wins, pct(self.player_wins))?;
        writeln!(f, "Opponent wins:  {} ({:.1}%)", self.opponent_wins, pct(self.opponent_wins))?;
        writeln!(f, "Draws:          {}", self.draws)?;
        writeln!(f, "Turn limit:     {}", self.turn_limits)?;
        writeln!(f, "Average turns:  {:.1}", self.average_turns())?;
        writeln!(f, "Credits earned: {}", self.total_credits)?;
        write!(f, "Elapsed:        {:.2}s", self.elapsed.as_secs_f64())
    }
}

/// Seed of the `index`-th match in a batch
pub fn game_seed(base: u64, index: usize) -> u64 {
    base.wrapping_add((index as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15))
}

/// Play a single AI-vs-AI match
pub fn simulate_match(db: &CardDatabase, config: &SimulationConfig, seed: u64) -> Result<MatchResult> {
    let mut rng = ChaCha12Rng::seed_from_u64(seed);

    let player_deck = ai_deck(db, config.player_difficulty, &mut rng);
    let player = Player::with_rules(
        format!("{} AI Challenger", config.player_difficulty.title()),
        player_deck,
        &config.rules,
    );
    let opponent = create_ai_opponent(db, config.opponent_difficulty, &config.rules, &mut rng);

    let player_personality = AiPersonality::for_difficulty(config.player_difficulty, &mut rng);
    let mut player_ai = SeatDriver::Ai(AiController::for_seat(
        Seat::Player,
        AiProfile::new(config.player_difficulty, player_personality),
        seed.wrapping_add(0x1234_5678_9ABC_DEF0),
    ));
    let mut opponent_ai = SeatDriver::Ai(AiController::for_difficulty(config.opponent_difficulty, &mut rng));

    let mut controller = GameController::new(player, opponent, config.rules.clone(), seed)
        .with_logger(GameLogger::with_verbosity(VerbosityLevel::Silent));
    let mut game_loop = GameLoop::new(&mut controller);
    game_loop.run_match(&mut player_ai, &mut opponent_ai)
}

/// Run a batch of matches in parallel
pub fn run_simulation(db: &CardDatabase, config: &SimulationConfig) -> Result<SimulationStats> {
    let start = Instant::now();

    let results: Vec<MatchResult> = (0..config.games)
        .into_par_iter()
        .map(|index| simulate_match(db, config, game_seed(config.seed, index)))
        .collect::<Result<Vec<_>>>()?;

    let mut stats = SimulationStats::default();
    for result in &results {
        stats.record(result);
    }
    stats.elapsed = start.elapsed();
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simulation_counts_add_up() {
        let db = CardDatabase::builtin().unwrap();
        let config = SimulationConfig {
            games: 8,
            ..Default::default()
        };
        let stats = run_simulation(&db, &config).unwrap();
        assert_eq!(stats.games, 8);
        assert_eq!(
            stats.player_wins + stats.opponent_wins + stats.draws + stats.turn_limits,
            8
        );
        assert!(stats.average_turns() >= 1.0);
    }

    #[test]
    fn test_simulation_is_reproducible() {
        let db = CardDatabase::builtin().unwrap();
        let config = SimulationConfig {
            games: 6,
            seed: 7,
            ..Default::default()
        };
        let mut first = run_simulation(&db, &config).unwrap();
        let mut second = run_simulation(&db, &config).unwrap();
        first.elapsed = Duration::ZERO;
        second.elapsed = Duration::ZERO;
        assert_eq!(first, second);
    }

    #[test]
    fn test_single_match_result() {
        let db = CardDatabase::builtin().unwrap();
        let config = SimulationConfig::default();
        let a = simulate_match(&db, &config, 99).unwrap();
        let b = simulate_match(&db, &config, 99).unwrap();
        assert_eq!(a, b);
        assert!(!a.events.is_empty());
    }
}
