//! Profiling binary for match execution
//!
//! Runs AI-vs-AI matches in a tight loop for profiling with cargo-flamegraph.
//! Unlike the Criterion benchmark, this has minimal overhead and produces
//! cleaner flamegraphs.
//!
//! Usage:
//!   cargo flamegraph --bin profile

use lane_duel::{
    core::Difficulty,
    loader::CardDatabase,
    tournament::{game_seed, simulate_match, SimulationConfig},
};

fn main() -> lane_duel::Result<()> {
    let db = CardDatabase::builtin()?;

    // Allow overriding iterations via environment variable
    let iterations: usize = std::env::var("PROFILE_ITERATIONS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(1000);

    let config = SimulationConfig {
        player_difficulty: Difficulty::Hard,
        opponent_difficulty: Difficulty::Hard,
        ..Default::default()
    };

    println!("Profiling match execution...");
    println!("Running {iterations} matches with seed {}", config.seed);
    println!();

    let mut turns = 0u64;
    for i in 0..iterations {
        let result = simulate_match(&db, &config, game_seed(config.seed, i))?;
        turns += u64::from(result.turns_played);

        if (i + 1) % 100 == 0 {
            println!("Completed {} matches", i + 1);
        }
    }

    println!();
    println!("Profiling complete! {iterations} matches, {turns} turns.");
    Ok(())
}
