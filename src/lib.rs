//! Grid Tetris (workspace facade crate).
//!
//! Re-exports the workspace crates as `grid_tetris::{core, engine, types}` so
//! binaries, tests and benches depend on a single package while the
//! implementation lives in dedicated crates under `crates/`.

pub use grid_tetris_core as core;
pub use grid_tetris_engine as engine;
pub use grid_tetris_types as types;
