//! Game module - the timed-advance controller.
//!
//! `Game` ties the board, shape table, and RNG together behind a single
//! poll entry point plus four player commands. Polling is the only place
//! time-based state changes: callers loop over `poll` as often as they
//! like, and the engine advances one step whenever the fall-rate interval
//! has elapsed on the injected clock. Commands never block and never fail;
//! a move that would collide is a silent no-op.

use log::{debug, info};
use thiserror::Error;

use matrix_tetris_types::{
    Clock, Command, DisplaySink, BASE_FALL_RATE_US, FALL_DECAY_DIVISOR, MAX_LEVEL, MIN_COLS,
    MIN_LEVEL, MIN_ROWS,
};

use crate::board::Board;
use crate::rng::PieceRng;
use crate::shape::{ShapeTable, CANONICAL_SHAPES};

/// Construction failures. Everything past construction is a silent no-op
/// or the terminal game-over flag, never an error.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum GameError {
    #[error("board {rows}x{cols} is too small, need at least {min_rows}x{min_cols}",
        min_rows = MIN_ROWS, min_cols = MIN_COLS)]
    BoardTooSmall { rows: usize, cols: usize },
    #[error("level {0} is outside {min}..={max}", min = MIN_LEVEL, max = MAX_LEVEL)]
    LevelOutOfRange(u8),
}

/// One game session: board state, the falling shape, and timing.
///
/// The display sink and clock are injected capabilities; the engine never
/// sleeps and never touches ambient platform state.
#[derive(Debug)]
pub struct Game<S, C> {
    board: Board,
    shapes: ShapeTable,
    rng: PieceRng,
    sink: S,
    clock: C,
    /// Catalogue index of the falling shape.
    cur: usize,
    /// Catalogue index of the shape spawned after the next settle.
    next: usize,
    /// Linear board index of the falling shape's center.
    pos: usize,
    /// Microseconds between automatic one-row descents.
    fall_rate: u64,
    last_update: u64,
    score: u32,
    game_over: bool,
}

impl<S: DisplaySink, C: Clock> Game<S, C> {
    /// Create a session. `level` (1..=9) sets the initial fall rate to
    /// `500000 / level` microseconds; `seed` makes the shape sequence
    /// reproducible.
    pub fn new(
        sink: S,
        clock: C,
        rows: usize,
        cols: usize,
        level: u8,
        seed: u32,
    ) -> Result<Self, GameError> {
        if !(MIN_LEVEL..=MAX_LEVEL).contains(&level) {
            return Err(GameError::LevelOutOfRange(level));
        }
        if rows < MIN_ROWS || cols < MIN_COLS {
            return Err(GameError::BoardTooSmall { rows, cols });
        }

        let board = Board::new(rows, cols);
        let shapes = ShapeTable::new(cols);
        let mut rng = PieceRng::new(seed);
        let next = rng.next_range(CANONICAL_SHAPES as u32) as usize;
        let cur = rng.next_range(CANONICAL_SHAPES as u32) as usize;
        let pos = board.spawn_index();
        let last_update = clock.elapsed_micros();

        Ok(Self {
            board,
            shapes,
            rng,
            sink,
            clock,
            cur,
            next,
            pos,
            fall_rate: BASE_FALL_RATE_US / u64::from(level),
            last_update,
            score: 0,
            game_over: false,
        })
    }

    /// Advance the game if the fall-rate interval has elapsed.
    ///
    /// Returns whether game state changed. Within one interval this is
    /// idempotent: the second call reports no change and mutates nothing.
    /// Once the game is over, polls report no change and mutate nothing.
    ///
    /// On an elapsed interval the engine accelerates the fall rate, pushes
    /// a frame with the falling shape drawn transiently (stamp, notify,
    /// erase - the committed board never contains the falling shape), and
    /// then either descends one row or settles: stamp permanently, score a
    /// point, elide full rows, promote the next shape to the spawn point,
    /// and flag game over if it does not fit there.
    pub fn poll(&mut self) -> bool {
        if self.game_over {
            return false;
        }

        let now = self.clock.elapsed_micros();
        if now.saturating_sub(self.last_update) <= self.fall_rate {
            return false;
        }
        self.last_update = now;
        self.faster();

        self.board.place(self.shapes.shape(self.cur), self.pos, true);
        self.push_frame();
        self.board.place(self.shapes.shape(self.cur), self.pos, false);

        let below = self.pos + self.board.cols();
        if self.board.fits(self.shapes.shape(self.cur), below) {
            self.pos = below;
            return true;
        }

        // The shape can no longer move down: commit it, bump the score,
        // and elide any full rows.
        self.board.place(self.shapes.shape(self.cur), self.pos, true);
        self.score += 1;
        let Self { board, sink, .. } = self;
        let cleared = board.elide(|b| push_cells(sink, b));
        if !cleared.is_empty() {
            debug!("elided {} row(s) at {:?}", cleared.len(), &cleared[..]);
        }

        // Promote the next shape. If it does not fit at the spawn point,
        // the game is over.
        self.cur = self.next;
        self.next = self.rng.next_range(CANONICAL_SHAPES as u32) as usize;
        self.pos = self.board.spawn_index();
        if !self.board.fits(self.shapes.shape(self.cur), self.pos) {
            self.game_over = true;
            info!("game over, final score {}", self.score);
        }

        true
    }

    /// Move the falling shape one column left if the target cells are free.
    pub fn move_left(&mut self) {
        if self.game_over {
            return;
        }
        if self.board.fits(self.shapes.shape(self.cur), self.pos - 1) {
            self.pos -= 1;
        }
    }

    /// Move the falling shape one column right if the target cells are free.
    pub fn move_right(&mut self) {
        if self.game_over {
            return;
        }
        if self.board.fits(self.shapes.shape(self.cur), self.pos + 1) {
            self.pos += 1;
        }
    }

    /// Swap the falling shape for its rotation successor if that
    /// orientation fits at the current position.
    pub fn rotate(&mut self) {
        if self.game_over {
            return;
        }
        let turned = self.shapes.shape(self.cur).rotation_successor();
        if self.board.fits(self.shapes.shape(turned), self.pos) {
            self.cur = turned;
        }
    }

    /// Drop the falling shape as far as it goes, scoring one point per row
    /// descended. The settle itself happens on the next poll.
    pub fn hard_drop(&mut self) {
        if self.game_over {
            return;
        }
        let cols = self.board.cols();
        while self.board.fits(self.shapes.shape(self.cur), self.pos + cols) {
            self.pos += cols;
            self.score += 1;
        }
    }

    /// Dispatch a player command.
    pub fn apply(&mut self, command: Command) {
        match command {
            Command::MoveLeft => self.move_left(),
            Command::MoveRight => self.move_right(),
            Command::Rotate => self.rotate(),
            Command::HardDrop => self.hard_drop(),
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    /// Current interval between automatic descents, in microseconds.
    pub fn fall_rate_us(&self) -> u64 {
        self.fall_rate
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn shapes(&self) -> &ShapeTable {
        &self.shapes
    }

    /// Catalogue index of the falling shape.
    pub fn current_shape(&self) -> usize {
        self.cur
    }

    /// Catalogue index of the shape that spawns after the next settle.
    pub fn next_shape(&self) -> usize {
        self.next
    }

    /// Linear board index of the falling shape's center.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Shave `fall_rate / 3000` off the interval. Integer division gives
    /// this a natural floor: below 3000us the decrement is zero and the
    /// rate stops shrinking, so it never reaches zero.
    fn faster(&mut self) {
        self.fall_rate -= self.fall_rate / FALL_DECAY_DIVISOR;
    }

    fn push_frame(&mut self) {
        let Self { board, sink, .. } = self;
        push_cells(sink, board);
    }
}

/// Row-major full-board refresh: every cell's current occupancy, once.
fn push_cells<S: DisplaySink>(sink: &mut S, board: &Board) {
    for y in 0..board.rows() {
        for x in 0..board.cols() {
            sink.set_cell(x, y, board.cell(y, x));
        }
    }
}
