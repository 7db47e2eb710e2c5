//! Matrix Tetris (workspace facade crate).
//!
//! This package keeps the `matrix_tetris::{core,types}` public API stable
//! while the implementation lives in dedicated crates under `crates/`.

pub use matrix_tetris_core as core;
pub use matrix_tetris_types as types;
