//! Match engine: phases, combat, controllers and the match loop

pub mod ai_controller;
pub mod combat;
pub mod controller;
pub mod events;
pub mod game_loop;
pub mod logger;
pub mod phase;
pub mod player_controller;
pub mod scripted_input;
pub mod state;

pub use ai_controller::{AiController, AiMove, AiPersonality, AiProfile, StrategyWeights};
pub use combat::{resolve_attack, resolve_lane};
pub use controller::{opponent_difficulty, GameController};
pub use events::{GameEvent, PhaseReport};
pub use game_loop::{GameEndReason, GameLoop, GameStateView, HumanInput, MatchResult, PlayIntent, SeatDriver};
pub use logger::{GameLogger, LogEntry, OutputFormat, OutputMode, VerbosityLevel};
pub use phase::{GamePhase, PhaseTransition, TurnStructure};
pub use player_controller::PlayerController;
pub use scripted_input::ScriptedInput;
pub use state::{GameOutcome, GameState};
