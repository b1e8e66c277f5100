use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use set_game::{Card, CombinationOracle, Deck, SetRules};
use std::hint::black_box;

/// Benchmark validating a single candidate selection
fn bench_test_combination(c: &mut Criterion) {
    let rules = SetRules::default();
    let valid = [Card(0), Card(1), Card(2)];
    let invalid = [Card(0), Card(1), Card(4)];

    c.bench_function("test_combination_valid", |b| {
        b.iter(|| rules.test_combination(black_box(&valid)))
    });
    c.bench_function("test_combination_invalid", |b| {
        b.iter(|| rules.test_combination(black_box(&invalid)))
    });
}

/// Benchmark enumerating combinations for growing table sizes
fn bench_find_combinations(c: &mut Criterion) {
    let rules = SetRules::default();
    let mut deck = Deck::new(81);
    deck.shuffle();
    let cards = deck.cards().to_vec();

    let mut group = c.benchmark_group("find_combinations");
    for size in [12, 15, 21, 81] {
        let pool = &cards[..size];
        group.bench_with_input(BenchmarkId::from_parameter(size), pool, |b, pool| {
            b.iter(|| rules.find_combinations(black_box(pool), usize::MAX))
        });
    }
    group.finish();
}

/// Benchmark the end-of-game check on pools without any set
fn bench_has_any_combination(c: &mut Criterion) {
    let rules = SetRules::new(3, 2);
    let square: Vec<Card> = [0, 1, 3, 4].into_iter().map(Card).collect();

    c.bench_function("has_any_combination_none", |b| {
        b.iter(|| rules.has_any_combination(black_box(&square)))
    });
}

criterion_group!(
    benches,
    bench_test_combination,
    bench_find_combinations,
    bench_has_any_combination
);
criterion_main!(benches);
