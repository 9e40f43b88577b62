#[macro_use]
extern crate criterion;

use criterion::{Benchmark, Criterion};

use sokoban_engine::game::Game;
use sokoban_engine::{LoadLevel, Solve};

// allowing unused so i can bench just one or few
// and still notice other warnings if there are any
#[allow(unused)]
fn bench_one_way(c: &mut Criterion) {
    bench_solve(c, "levels/custom/02-one-way.txt", 100);
}

#[allow(unused)]
fn bench_two_boxes(c: &mut Criterion) {
    bench_solve(c, "levels/custom/03-two-boxes.txt", 100);
}

#[allow(unused)]
fn bench_no_solution(c: &mut Criterion) {
    bench_solve(c, "levels/custom/no-solution-corner.txt", 100);
}

#[allow(unused)]
fn bench_original_1(c: &mut Criterion) {
    bench_solve(c, "levels/original/1.txt", 10);
}

#[allow(unused)]
fn bench_two_boxes_postprocessing(c: &mut Criterion) {
    // optimizing and expanding the track the solver found
    let level = "levels/custom/03-two-boxes.txt".load_level().unwrap();
    let game = Game::new(&level).unwrap();
    let track = game.solve(false).unwrap().moves.unwrap();

    c.bench(
        "postprocess",
        Benchmark::new("levels/custom/03-two-boxes.txt", move |b| {
            b.iter(|| {
                let optimized = game.optimize(criterion::black_box(&track)).unwrap();
                criterion::black_box(game.expand_track(&optimized))
            })
        })
        .sample_size(100),
    );
}

fn bench_solve(c: &mut Criterion, level_path: &str, samples: usize) {
    let level = level_path.load_level().unwrap();

    c.bench(
        "solve",
        Benchmark::new(level_path, move |b| {
            b.iter(|| criterion::black_box(level.solve(criterion::black_box(false))))
        })
        .sample_size(samples),
    );
}

criterion_group!(
    benches,
    bench_one_way,
    bench_two_boxes,
    bench_no_solution,
    bench_original_1,
    bench_two_boxes_postprocessing,
);
criterion_main!(benches);
