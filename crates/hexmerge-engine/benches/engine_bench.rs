//! Benchmarks for the hexmerge engine
//!
//! Measures performance of:
//! - Row grouping per direction
//! - A full move on a half-filled board
//! - Liveness detection on a packed board

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use hexmerge_engine::{fold, group_by_direction, is_active_game, play, Board, Cell, Direction};

/// Board where every other cell holds a small power of two.
fn checkered(radius: u32) -> Board {
    let board = Board::new(radius).expect("bench radius is valid");
    let cells: Vec<Cell> = board
        .cells()
        .iter()
        .enumerate()
        .filter(|(i, _)| i % 2 == 0)
        .map(|(i, c)| Cell::new(c.coord, 2 << (i % 4)))
        .collect();
    fold(&cells, &board).expect("cells come from the board")
}

/// Board with every cell filled and no equal neighbors along x.
fn packed(radius: u32) -> Board {
    let board = Board::new(radius).expect("bench radius is valid");
    let cells: Vec<Cell> = board
        .cells()
        .iter()
        .map(|c| Cell::new(c.coord, 2 << (c.coord.x().rem_euclid(3) + 3 * c.coord.y().rem_euclid(3))))
        .collect();
    fold(&cells, &board).expect("cells come from the board")
}

fn bench_grouping(c: &mut Criterion) {
    let mut group = c.benchmark_group("group_by_direction");

    for &radius in &[2u32, 5, 10, 20] {
        let board = checkered(radius);
        group.throughput(Throughput::Elements(board.cells().len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(radius), &board, |b, board| {
            b.iter(|| group_by_direction(black_box(Direction::North), board.cells()))
        });
    }
    group.finish();
}

fn bench_play(c: &mut Criterion) {
    let mut group = c.benchmark_group("play");

    for &radius in &[2u32, 5, 10, 20] {
        let board = checkered(radius);
        group.throughput(Throughput::Elements(board.cells().len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(radius), &board, |b, board| {
            b.iter(|| play(black_box(Direction::SouthWest), board))
        });
    }
    group.finish();
}

fn bench_liveness(c: &mut Criterion) {
    let mut group = c.benchmark_group("is_active_game");

    for &radius in &[2u32, 5, 10] {
        let board = packed(radius);
        group.bench_with_input(BenchmarkId::from_parameter(radius), &board, |b, board| {
            b.iter(|| is_active_game(black_box(board)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_grouping, bench_play, bench_liveness);

criterion_main!(benches);
