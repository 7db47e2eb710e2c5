//! Core game engine - pure, deterministic, and host-agnostic.
//!
//! This crate is the whole falling-block engine: board representation,
//! shape catalogue, collision and placement, line clears, scoring, and the
//! timed-advance control loop. It talks to the outside world through two
//! injected capabilities - a per-cell [`DisplaySink`](types::DisplaySink)
//! and a microsecond [`Clock`](types::Clock) - so it runs unchanged against
//! a terminal, an LED matrix shim, or a test harness with a fake clock.
//!
//! # Module structure
//!
//! - [`board`]: padded flat grid with bounds-free collision checks and
//!   in-place row elision
//! - [`shape`]: the 19-entry orientation catalogue with rotation links
//! - [`game`]: poll-driven advance controller, commands, and scoring
//! - [`rng`]: seeded shape selection
//!
//! # Example
//!
//! ```
//! use matrix_tetris_core::{Game, types::Command};
//!
//! // Any FnMut(x, y, on) is a display sink; any Fn() -> u64 is a clock.
//! let sink = |_x: usize, _y: usize, _on: bool| {};
//! let clock = || 0u64;
//!
//! let mut game = Game::new(sink, clock, 23, 12, 1, 42).unwrap();
//! game.apply(Command::MoveLeft);
//! game.apply(Command::HardDrop);
//! assert!(game.score() > 0); // one point per row hard-dropped
//! assert!(!game.poll()); // the clock has not advanced
//! ```

pub mod board;
pub mod game;
pub mod rng;
pub mod shape;

pub use matrix_tetris_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use game::{Game, GameError};
pub use rng::PieceRng;
pub use shape::{Shape, ShapeTable, CANONICAL_SHAPES, TABLE_LEN};
