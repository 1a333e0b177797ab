//! Performance benchmarks for the match engine
//!
//! Measures full AI-vs-AI matches from a fresh deal, per difficulty pairing,
//! plus the attack-phase resolver on its own.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use lane_duel::{
    core::{Card, Deck, Difficulty, Player},
    game::resolve_attack,
    loader::CardDatabase,
    tournament::{game_seed, simulate_match, SimulationConfig},
};

fn bench_full_match(c: &mut Criterion) {
    let db = CardDatabase::builtin().expect("bundled card database");
    let mut group = c.benchmark_group("full_match");

    for difficulty in [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard] {
        let config = SimulationConfig {
            player_difficulty: difficulty,
            opponent_difficulty: difficulty,
            ..Default::default()
        };
        group.bench_with_input(BenchmarkId::from_parameter(difficulty), &config, |b, config| {
            let mut index = 0;
            b.iter(|| {
                index += 1;
                let result = simulate_match(&db, config, game_seed(config.seed, index)).expect("match failed");
                black_box(result.turns_played)
            });
        });
    }

    group.finish();
}

fn bench_attack_phase(c: &mut Criterion) {
    let mut attacker = Player::new("Attacker", Deck::default(), 10, 3);
    let mut defender = Player::new("Defender", Deck::default(), 10, 3);
    attacker.field.place(0, Card::new("a", "Ogre", 3, 7, 4)).ok();
    attacker.field.place(1, Card::new("b", "Squire", 1, 2, 5)).ok();
    defender.field.place(0, Card::new("c", "Imp", 1, 1, 3)).ok();
    defender.field.place(1, Card::new("d", "Wall", 2, 3, 6)).ok();

    c.bench_function("resolve_attack", |b| {
        b.iter(|| {
            let mut a = attacker.clone();
            let mut d = defender.clone();
            black_box(resolve_attack(&mut a, &mut d))
        });
    });
}

criterion_group!(benches, bench_full_match, bench_attack_phase);
criterion_main!(benches);
