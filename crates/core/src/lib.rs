//! Core game logic - the board and piece engine
//!
//! This crate contains the occupancy engine and the piece geometry engine.
//! It has **zero dependencies** on rendering, input, timing, or I/O, making it:
//!
//! - **Deterministic**: Same seed produces identical games (for agent training)
//! - **Atomic**: Every placement or movement fully applies or leaves the board untouched
//! - **Testable**: Unit tests next to every module, invariants covered by property tests
//!
//! # Module Structure
//!
//! - [`point`]: Unit squares and the generational arena that owns them
//! - [`grid`]: Occupancy matrix, atomic batch moves, row clearing, observations
//! - [`block`]: Four-point pieces with dependency-ordered movement and rotation
//! - [`catalog`]: Spawn layouts, colors and rotation tables for the seven shapes
//! - [`render`]: Notification sink for an optional presentation layer
//! - [`rng`]: Deterministic LCG for piece and action selection
//!
//! # Failure model
//!
//! Gameplay failures (a wall, the stack, a blocked rotation) return `false`
//! and leave the board unchanged. Contract violations (out-of-range queries,
//! removing a point that is not there, two points aimed at one cell, a corrupt
//! rotation table) return a [`GridError`] or [`BlockError`].
//!
//! # Example
//!
//! ```
//! use grid_tetris_core::{Block, Grid, GridConfig, Shape};
//!
//! let mut grid = Grid::new(GridConfig::new(20, 10));
//! let mut block = Block::new(Shape::T, &mut grid);
//! assert!(block.activate(&mut grid));
//!
//! assert!(block.translate(&mut grid, 0, 1).unwrap());
//! assert!(block.rotate(&mut grid).unwrap());
//! assert_eq!(block.rotation_state(), 1);
//!
//! // Hard drop: translate down until blocked
//! while block.translate(&mut grid, 0, 1).unwrap() {}
//! assert_eq!(grid.clear_full_rows().unwrap(), 0);
//! assert_eq!(grid.get_observation().occupied_count(), 4);
//! ```

pub mod block;
pub mod catalog;
pub mod error;
pub mod grid;
pub mod observation;
pub mod point;
pub mod render;
pub mod rng;

pub use grid_tetris_types as types;

// Re-export commonly used types for convenience
pub use block::Block;
pub use catalog::{PieceSpec, RotationDeltas, Shape};
pub use error::{BlockError, GridError};
pub use grid::{Grid, GridConfig};
pub use observation::Observation;
pub use point::{Point, PointArena, PointId, RenderHandle};
pub use render::{NullSink, RenderSink};
pub use rng::SimpleRng;
