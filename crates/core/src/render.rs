//! Render sink - notification hooks for a presentation layer
//!
//! The grid calls these after every committed change. They cannot fail and the
//! grid never depends on them for correctness; a sink that does nothing is a
//! valid sink.

use crate::point::Point;

/// Presentation layer the grid notifies about point changes
pub trait RenderSink: Send {
    /// A point was committed to the board
    fn raster(&mut self, point: &mut Point);

    /// A committed point moved to an absolute cell (its coordinates are already updated)
    fn move_to(&mut self, point: &mut Point, x: i32, y: i32);

    /// A committed point moved by a delta (its coordinates are already updated)
    fn translate(&mut self, point: &mut Point, dx: i32, dy: i32);

    /// A point left the board
    fn erase(&mut self, point: &mut Point);
}

/// Sink that ignores every notification
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl RenderSink for NullSink {
    fn raster(&mut self, _point: &mut Point) {}

    fn move_to(&mut self, _point: &mut Point, _x: i32, _y: i32) {}

    fn translate(&mut self, _point: &mut Point, _dx: i32, _dy: i32) {}

    fn erase(&mut self, _point: &mut Point) {}
}
