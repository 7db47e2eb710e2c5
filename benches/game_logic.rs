use std::cell::Cell;

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};

use matrix_tetris::core::{Board, Game, ShapeTable};
use matrix_tetris::types::{Clock, DisplaySink};

struct NullSink;

impl DisplaySink for NullSink {
    fn set_cell(&mut self, _x: usize, _y: usize, _on: bool) {}
}

/// Clock frozen at zero: every poll takes the cheap no-advance path.
struct FrozenClock;

impl Clock for FrozenClock {
    fn elapsed_micros(&self) -> u64 {
        0
    }
}

/// Clock that jumps a full interval on every read, so every poll advances.
struct SteppingClock(Cell<u64>);

impl Clock for SteppingClock {
    fn elapsed_micros(&self) -> u64 {
        let now = self.0.get() + 600_000;
        self.0.set(now);
        now
    }
}

fn bench_idle_poll(c: &mut Criterion) {
    let mut game = Game::new(NullSink, FrozenClock, 23, 12, 1, 1).unwrap();

    c.bench_function("poll_idle", |b| {
        b.iter(|| black_box(game.poll()));
    });
}

fn bench_advancing_poll(c: &mut Criterion) {
    c.bench_function("poll_advance", |b| {
        b.iter_batched(
            || Game::new(NullSink, SteppingClock(Cell::new(0)), 23, 12, 1, 1).unwrap(),
            |mut game| {
                black_box(game.poll());
                game
            },
            BatchSize::SmallInput,
        );
    });
}

fn bench_fits(c: &mut Criterion) {
    let board = Board::new(23, 12);
    let table = ShapeTable::new(12);
    let shape = table.shape(2);

    c.bench_function("fits", |b| {
        b.iter(|| black_box(board.fits(shape, black_box(10 * 12 + 5))));
    });
}

fn bench_elide_two_rows(c: &mut Criterion) {
    let table = ShapeTable::new(6);
    let bar = table.shape(6);

    c.bench_function("elide_two_rows", |b| {
        b.iter_batched(
            || {
                // The bar fills a 4-column interior row in one placement.
                let mut board = Board::new(10, 6);
                board.place(bar, 5 * 6 + 2, true);
                board.place(bar, 6 * 6 + 2, true);
                board
            },
            |mut board| {
                black_box(board.elide(|_| {}));
                board
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(
    benches,
    bench_idle_poll,
    bench_advancing_poll,
    bench_fits,
    bench_elide_two_rows
);
criterion_main!(benches);
