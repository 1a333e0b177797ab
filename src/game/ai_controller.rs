//! Heuristic AI opponent
//!
//! The AI plays its play phase greedily: score every affordable card in
//! hand, take the best one, score every empty lane for that card, play the
//! pair, and repeat until nothing more can be played.
//!
//! Scoring is split into pure functions that take an explicit `AiProfile`
//! (difficulty, personality and the resulting weight table) so that they can
//! be tested without a controller. The only impure part is the random
//! jitter, which comes from the controller's own seeded generator.

use crate::core::{Card, Difficulty, Player, Seat};
use crate::game::{GameEvent, GamePhase, GameState};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha12Rng;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;
use std::str::FromStr;

/// AI strategy profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AiPersonality {
    /// Prefers high attack and direct damage to the player
    Aggressive,
    /// Prefers high health and protecting its own life total
    Defensive,
    Balanced,
    /// Prefers efficient, balanced cards and contesting occupied lanes
    Control,
}

impl AiPersonality {
    pub const ALL: [AiPersonality; 4] = [
        AiPersonality::Aggressive,
        AiPersonality::Defensive,
        AiPersonality::Balanced,
        AiPersonality::Control,
    ];

    /// Pick a personality appropriate for a difficulty
    ///
    /// Easy leans toward Balanced, Normal is uniform, Hard is always Control.
    pub fn for_difficulty(difficulty: Difficulty, rng: &mut impl Rng) -> AiPersonality {
        const EASY_POOL: [AiPersonality; 4] = [
            AiPersonality::Balanced,
            AiPersonality::Balanced,
            AiPersonality::Aggressive,
            AiPersonality::Defensive,
        ];
        match difficulty {
            Difficulty::Easy => *EASY_POOL.choose(rng).unwrap_or(&AiPersonality::Balanced),
            Difficulty::Normal => *AiPersonality::ALL.choose(rng).unwrap_or(&AiPersonality::Balanced),
            Difficulty::Hard => AiPersonality::Control,
        }
    }
}

impl fmt::Display for AiPersonality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AiPersonality::Aggressive => "aggressive",
            AiPersonality::Defensive => "defensive",
            AiPersonality::Balanced => "balanced",
            AiPersonality::Control => "control",
        };
        f.write_str(s)
    }
}

impl FromStr for AiPersonality {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "aggressive" => Ok(AiPersonality::Aggressive),
            "defensive" => Ok(AiPersonality::Defensive),
            "balanced" => Ok(AiPersonality::Balanced),
            "control" => Ok(AiPersonality::Control),
            _ => Err(format!("invalid personality '{s}'")),
        }
    }
}

/// Named multiplicative weights used by the scoring functions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrategyWeights {
    pub attack: f64,
    pub health: f64,
    pub cost_efficiency: f64,
    pub board_control: f64,
    pub direct_damage: f64,
    pub counter_opponent: f64,
}

impl Default for StrategyWeights {
    fn default() -> Self {
        StrategyWeights {
            attack: 1.0,
            health: 1.0,
            cost_efficiency: 1.0,
            board_control: 1.0,
            direct_damage: 1.0,
            counter_opponent: 1.0,
        }
    }
}

impl StrategyWeights {
    /// Weight table for a personality, scaled by difficulty
    ///
    /// Easy dampens every weight (x0.7) so the jitter dominates more often;
    /// Hard sharpens them (x1.3).
    pub fn for_profile(personality: AiPersonality, difficulty: Difficulty) -> Self {
        let mut w = StrategyWeights::default();
        match personality {
            AiPersonality::Aggressive => {
                w.attack = 2.0;
                w.direct_damage = 1.8;
                w.health = 0.7;
            }
            AiPersonality::Defensive => {
                w.health = 2.0;
                w.board_control = 1.5;
                w.direct_damage = 0.7;
            }
            AiPersonality::Control => {
                w.board_control = 2.0;
                w.counter_opponent = 1.8;
                w.cost_efficiency = 1.5;
            }
            AiPersonality::Balanced => {}
        }

        let scale = match difficulty {
            Difficulty::Easy => 0.7,
            Difficulty::Normal => 1.0,
            Difficulty::Hard => 1.3,
        };
        w.scaled(scale)
    }

    fn scaled(self, factor: f64) -> Self {
        StrategyWeights {
            attack: self.attack * factor,
            health: self.health * factor,
            cost_efficiency: self.cost_efficiency * factor,
            board_control: self.board_control * factor,
            direct_damage: self.direct_damage * factor,
            counter_opponent: self.counter_opponent * factor,
        }
    }
}

/// Everything that shapes the AI's judgement
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AiProfile {
    pub difficulty: Difficulty,
    pub personality: AiPersonality,
    pub weights: StrategyWeights,
}

impl AiProfile {
    pub fn new(difficulty: Difficulty, personality: AiPersonality) -> Self {
        AiProfile {
            difficulty,
            personality,
            weights: StrategyWeights::for_profile(personality, difficulty),
        }
    }

    /// Half-width of the uniform noise added to card scores
    pub fn jitter(&self) -> f64 {
        match self.difficulty {
            Difficulty::Easy => 1.5,
            Difficulty::Normal => 0.8,
            Difficulty::Hard => 0.3,
        }
    }
}

/// Priority of playing `card` now, before jitter
pub fn score_card(card: &Card, ai: &Player, human: &Player, profile: &AiProfile) -> f64 {
    let w = &profile.weights;
    let attack = card.attack as f64;
    let hp = card.hp as f64;
    let cost = card.cost as f64;

    let efficiency = (attack + hp) / cost.max(1.0);
    let base = attack * w.attack + hp * w.health + efficiency * w.cost_efficiency;

    let mut situational = 0.0;
    match profile.personality {
        AiPersonality::Aggressive => {
            situational += attack * 0.5;
            // Finish off a low opponent
            if human.health < 5 {
                situational += attack * 1.5;
            }
        }
        AiPersonality::Defensive => {
            situational += hp * 0.5;
            if ai.health < 5 {
                situational += hp;
            }
        }
        AiPersonality::Control => {
            let total = (attack + hp).max(1.0);
            let balance = 1.0 - (attack - hp).abs() / total;
            situational += balance * 2.0 * w.board_control;
        }
        AiPersonality::Balanced => {}
    }

    // Last open lanes go to hard hitters
    if ai.field.empty_count() <= 1 {
        situational += attack * 0.8;
    }

    let energy_ratio = ai.energy as f64 / (ai.max_energy.max(1)) as f64;
    if energy_ratio > 0.7 {
        situational += cost * 0.3;
    } else if energy_ratio < 0.4 {
        situational += (ai.max_energy as f64 - cost) * 0.4;
    }

    let mut score = base + situational;

    if profile.difficulty == Difficulty::Hard {
        let name = card.name.to_lowercase();
        if name.contains("dragon") || name.contains("phoenix") {
            score += 1.0;
        }
    }

    score
}

/// Static value of a lane, independent of which card goes there
pub fn score_lane(lane: usize, human: &Player, profile: &AiProfile) -> f64 {
    let w = &profile.weights;
    let mut score = 0.0;

    match human.field.get(lane) {
        Some(opposing) => {
            score += opposing.attack as f64 * w.counter_opponent;
            match profile.personality {
                AiPersonality::Aggressive => score += opposing.hp as f64 * 0.5,
                AiPersonality::Defensive => score += opposing.attack as f64 * 0.8,
                _ => {}
            }
        }
        None => {
            // Free hit on the player every attack phase
            score += w.direct_damage * 2.0;
            if profile.personality == AiPersonality::Aggressive {
                score += 2.0;
            }
        }
    }

    if lane == 1 {
        score += 0.5;
    }

    score
}

/// How well `card` fits into `lane` given what opposes it
pub fn score_placement(card: &Card, lane: usize, human: &Player, profile: &AiProfile) -> f64 {
    let w = &profile.weights;
    let mut score = 0.0;

    match human.field.get(lane) {
        Some(opposing) => {
            if card.attack >= opposing.hp {
                score += opposing.attack as f64 * 1.2;
                if profile.personality == AiPersonality::Aggressive {
                    score += opposing.attack as f64 * 0.5;
                }
            }

            if card.hp > opposing.attack {
                score += card.attack as f64 * 0.8;
                if profile.personality == AiPersonality::Defensive {
                    score += card.hp as f64 * 0.5;
                }
            } else if card.cost < opposing.cost {
                // Trading a cheaper card for a pricier one
                score += (opposing.cost - card.cost) as f64 * w.cost_efficiency;
            }
        }
        None => {
            score += card.attack as f64 * w.direct_damage;
            if card.hp > 3 && profile.personality == AiPersonality::Defensive {
                score -= card.hp as f64 * 0.3;
            }
        }
    }

    score
}

/// A chosen play: which hand card goes to which lane
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AiMove {
    pub hand_index: usize,
    pub lane: usize,
    pub card_score: f64,
    pub lane_score: f64,
}

/// Opponent decision procedure for the play phase
pub struct AiController {
    seat: Seat,
    profile: AiProfile,
    rng: ChaCha12Rng,
}

impl AiController {
    /// Create a controller for the opponent seat
    pub fn new(difficulty: Difficulty, personality: AiPersonality, seed: u64) -> Self {
        Self::for_seat(Seat::Opponent, AiProfile::new(difficulty, personality), seed)
    }

    /// Create a controller with an explicit seat and profile
    ///
    /// Used for AI-vs-AI simulations where the AI also drives the player
    /// seat.
    pub fn for_seat(seat: Seat, profile: AiProfile, seed: u64) -> Self {
        AiController {
            seat,
            profile,
            rng: ChaCha12Rng::seed_from_u64(seed),
        }
    }

    /// Create an opponent with a personality drawn from the difficulty's pool
    pub fn for_difficulty(difficulty: Difficulty, rng: &mut impl Rng) -> Self {
        let personality = AiPersonality::for_difficulty(difficulty, rng);
        Self::new(difficulty, personality, rng.gen())
    }

    pub fn seat(&self) -> Seat {
        self.seat
    }

    pub fn profile(&self) -> &AiProfile {
        &self.profile
    }

    /// Play cards until no affordable card or no empty lane remains
    ///
    /// Does nothing unless it is this controller's seat's play phase. The AI
    /// never ends its phase itself; the driver advances afterwards.
    pub fn take_turn(&mut self, game: &mut GameState) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if game.game_over || game.current_seat() != self.seat || game.current_phase() != GamePhase::Play {
            return events;
        }

        loop {
            let (ai, human) = game.active_and_other_mut();
            let Some(choice) = self.choose_move(ai, human) else {
                break;
            };
            match ai.play_card(choice.hand_index, choice.lane) {
                Ok(card) => {
                    let card_name = card.name.clone();
                    events.push(GameEvent::AiCardPlayed {
                        player: ai.name.clone(),
                        card: card_name,
                        field_position: choice.lane,
                        energy_remaining: ai.energy,
                    });
                }
                Err(_) => break,
            }
        }

        events
    }

    /// Pick the next play without applying it
    pub fn choose_move(&mut self, ai: &Player, human: &Player) -> Option<AiMove> {
        let jitter = self.profile.jitter();

        let mut candidates: SmallVec<[(usize, f64); 8]> = SmallVec::new();
        for (idx, card) in ai.hand.iter().enumerate() {
            if card.cost > ai.energy {
                continue;
            }
            let score = score_card(card, ai, human, &self.profile) + self.rng.gen_range(-jitter..=jitter);
            candidates.push((idx, score));
        }

        // First candidate wins ties
        let (hand_index, card_score) = candidates
            .into_iter()
            .fold(None, |best: Option<(usize, f64)>, cand| match best {
                Some(b) if b.1 >= cand.1 => Some(b),
                _ => Some(cand),
            })?;
        let card = &ai.hand[hand_index];

        let mut best_lane: Option<(usize, f64)> = None;
        for lane in ai.field.empty_lanes() {
            let score = score_lane(lane, human, &self.profile) + score_placement(card, lane, human, &self.profile);
            if best_lane.map_or(true, |(_, best)| score > best) {
                best_lane = Some((lane, score));
            }
        }
        let (lane, lane_score) = best_lane?;

        Some(AiMove {
            hand_index,
            lane,
            card_score,
            lane_score,
        })
    }
}
