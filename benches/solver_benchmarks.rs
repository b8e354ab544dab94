use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tessera::nonogram::{layout::derive_clue, Cell, Puzzle};

/// Builds a satisfiable puzzle by reading the clues off a seeded random
/// grid. The seed keeps runs comparable.
fn random_puzzle(size: usize, density: f64, seed: u64) -> Puzzle {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let grid: Vec<Vec<Cell>> = (0..size)
        .map(|_| {
            (0..size)
                .map(|_| {
                    if rng.gen_bool(density) {
                        Cell::Filled
                    } else {
                        Cell::Empty
                    }
                })
                .collect()
        })
        .collect();

    let row_clues = grid.iter().map(|row| derive_clue(row)).collect();
    let col_clues = (0..size)
        .map(|c| derive_clue(&grid.iter().map(|row| row[c]).collect::<Vec<_>>()))
        .collect();

    Puzzle {
        row_clues,
        col_clues,
    }
}

fn nonogram_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("Nonogram");

    for size in [5usize, 8, 10] {
        let puzzle = random_puzzle(size, 0.55, 0xC0FFEE + size as u64);
        group.bench_with_input(BenchmarkId::from_parameter(size), &puzzle, |b, puzzle| {
            b.iter(|| {
                let (grid, _stats) = black_box(puzzle).solve().unwrap();
                assert!(grid.is_some());
            });
        });
    }

    group.finish();
}

criterion_group!(benches, nonogram_benchmarks);
criterion_main!(benches);
