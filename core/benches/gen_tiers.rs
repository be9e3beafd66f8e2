use concentration_core::*;
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use std::time::Duration;

const TIERS: &[(&str, CardCount)] = &[("small", 6), ("classic", 10), ("large", 32), ("huge", 256)];

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    for &(name, pairs) in TIERS {
        let alphabet = Alphabet::numbered(pairs).expect("tier alphabet is valid");
        let mut generator = ShuffledBoardGenerator::new(0x5eed);
        group.bench_with_input(BenchmarkId::from_parameter(name), &alphabet, |b, alphabet| {
            b.iter(|| black_box(generator.deal(alphabet)))
        });
    }
    group.finish();
}

fn bench_full_game(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_game");
    for &(name, pairs) in TIERS {
        let alphabet = Alphabet::numbered(pairs).expect("tier alphabet is valid");
        let mut engine = MatchEngine::shuffled(alphabet, EngineConfig::default(), 0x5eed);
        group.bench_function(BenchmarkId::from_parameter(name), |b| {
            b.iter(|| {
                engine.restart().expect("shuffled boards always deal");
                play_out(&mut engine);
                black_box(engine.moves())
            })
        });
    }
    group.finish();
}

/// Clears the board by matching every card with its partner, flipping one wrong pair per match.
fn play_out(engine: &mut MatchEngine) {
    let len = engine.board().len();
    for first in 0..len {
        if engine.board()[first].is_matched() {
            continue;
        }
        let Some(partner) = (first + 1..len).find(|&other| {
            engine
                .alphabet()
                .is_match(engine.board()[first].symbol(), engine.board()[other].symbol())
        }) else {
            continue;
        };
        let decoy = (first + 1..len).find(|&other| other != partner && !engine.board()[other].is_matched());

        if let Some(decoy) = decoy {
            let _ = engine.select_card(first);
            let _ = engine.select_card(decoy);
            engine.advance(engine.config().revert_delay);
        }
        let _ = engine.select_card(first);
        let _ = engine.select_card(partner);
        engine.advance(Duration::from_millis(250));
        engine.drain_events().for_each(drop);
    }
}

criterion_group!(benches, bench_generate, bench_full_game);
criterion_main!(benches);
