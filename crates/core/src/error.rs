//! Error types for contract violations
//!
//! Gameplay failures (wall or stack collision, blocked rotation) are not
//! errors: they come back as `false` / `Ok(false)` and leave state unchanged.
//! Everything here means a caller or a data table is wrong.

use thiserror::Error;

use crate::point::PointId;

/// Errors raised by [`Grid`](crate::grid::Grid) operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("coordinates ({x}, {y}) are outside the board")]
    OutOfBounds { x: i32, y: i32 },
    #[error("cell ({x}, {y}) does not hold point {id:?}")]
    NotFound { id: PointId, x: i32, y: i32 },
    #[error("point {0:?} is not alive in the arena")]
    StalePoint(PointId),
    #[error("two points target the same cell ({x}, {y})")]
    Conflict { x: i32, y: i32 },
    #[error("point {0:?} appears more than once in a batch")]
    DuplicatePoint(PointId),
    #[error("point {0:?} is committed to the board")]
    Committed(PointId),
    #[error("row {row} could not be shifted down during line clear")]
    ShiftBlocked { row: usize },
}

/// Errors raised by [`Block`](crate::block::Block) operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BlockError {
    /// The move plan's dependency graph has a cycle; the rotation table is corrupt.
    #[error("move dependency cycle in {shape} block (rotation state {rotation_state})")]
    DependencyCycle {
        shape: &'static str,
        rotation_state: u8,
    },
    #[error("a validated move of point {0} was rejected by the grid")]
    MoveRejected(usize),
    #[error("block is not active on the board")]
    Inactive,
    #[error("block is still active on the board")]
    Active,
    #[error(transparent)]
    Grid(#[from] GridError),
}
