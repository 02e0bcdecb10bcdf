use criterion::{criterion_group, criterion_main, Criterion};

use maze_search::config::SearchConfig;
use maze_search::heuristic::Estimate;
use maze_search::maze::Maze;
use maze_search::search::{Search, Strategy};


fn make_maze(objectives: usize) -> Maze {
    // Fixed seed so every run benches the same maze.
    Maze::generate(60, 120, 0.2, objectives, 35334)
        .expect("Couldn't generate maze")
}

fn bench_single_goal(c: &mut Criterion) {
    let maze = make_maze(1);
    let search = Search::new(&maze, SearchConfig::default());
    let mut group = c.benchmark_group("single_goal");
    group.bench_function("breadth-first", |b| b.iter(|| {
        search.run(Strategy::BreadthFirst)
    }));
    group.bench_function("informed", |b| b.iter(|| {
        search.run(Strategy::InformedSingleGoal)
    }));
    group.finish();
}

fn bench_multi_goal(c: &mut Criterion) {
    let maze = make_maze(8);
    let search = Search::new(&maze, SearchConfig::default());
    let summed = Search::new(&maze, SearchConfig {
        estimate: Estimate::Sum, ..SearchConfig::default() });
    let mut group = c.benchmark_group("multi_goal");
    group.bench_function("breadth-first", |b| b.iter(|| {
        search.run(Strategy::BreadthFirst)
    }));
    group.bench_function("informed static", |b| b.iter(|| {
        search.run(Strategy::InformedSingleGoal)
    }));
    group.bench_function("informed shrinking", |b| b.iter(|| {
        search.run(Strategy::InformedShrinkingGoal)
    }));
    group.bench_function("informed shrinking, sum estimate", |b| b.iter(|| {
        summed.run(Strategy::InformedShrinkingGoal)
    }));
    group.finish();
}

criterion_group!{
    name = benches;
    config = Criterion::default().sample_size(50);
    targets = bench_single_goal, bench_multi_goal,
}
criterion_main!(benches);
