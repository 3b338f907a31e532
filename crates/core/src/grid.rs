//! Grid module - the single source of truth for board occupancy
//!
//! The grid is a `height x width` matrix where each cell is empty or holds the
//! handle of exactly one committed point. It owns the point arena, so every
//! coordinate change goes through here. Uses a flat row-major vector for
//! cache locality. Coordinates: `(x, y)` with `x` growing to the right and
//! `y` growing downwards; row `height - 1` is the floor.
//!
//! Besides the occupancy matrix the grid keeps per-row counters and the set of
//! full rows up to date on every mutation, so line detection is a lookup.
//!
//! Batch moves are atomic: sources are vacated, targets validated against the
//! vacated board, and the batch either commits completely or is rolled back.

use std::collections::{BTreeSet, HashSet};
use std::fmt;

use crate::error::GridError;
use crate::observation::Observation;
use crate::point::{Point, PointArena, PointId};
use crate::render::{NullSink, RenderSink};
use crate::types::{Color, Delta, Location, DEFAULT_BOARD_HEIGHT, DEFAULT_BOARD_WIDTH};

/// Board dimensions, fixed for the lifetime of a grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridConfig {
    pub height: usize,
    pub width: usize,
}

impl GridConfig {
    pub fn new(height: usize, width: usize) -> Self {
        Self { height, width }
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BOARD_HEIGHT, DEFAULT_BOARD_WIDTH)
    }
}

/// How a committed batch is reported to the render sink
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MoveKind {
    Absolute,
    Relative,
}

/// The game board
pub struct Grid {
    height: usize,
    width: usize,
    /// Flat array of cells, row-major order (y * width + x)
    cells: Vec<Option<PointId>>,
    row_counts: Vec<usize>,
    full_rows: BTreeSet<usize>,
    points: PointArena,
    renderer: Box<dyn RenderSink>,
}

impl Grid {
    /// Create an empty grid with no renderer attached
    pub fn new(config: GridConfig) -> Self {
        Self::with_renderer(config, Box::new(NullSink))
    }

    /// Create an empty grid that notifies `renderer` about every committed change
    pub fn with_renderer(config: GridConfig, renderer: Box<dyn RenderSink>) -> Self {
        Self {
            height: config.height,
            width: config.width,
            cells: vec![None; config.height * config.width],
            row_counts: vec![0; config.height],
            full_rows: BTreeSet::new(),
            points: PointArena::new(),
            renderer,
        }
    }

    /// Replace the render sink, returning the previous one
    pub fn set_renderer(&mut self, renderer: Box<dyn RenderSink>) -> Box<dyn RenderSink> {
        std::mem::replace(&mut self.renderer, renderer)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn config(&self) -> GridConfig {
        GridConfig::new(self.height, self.width)
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        Some(y as usize * self.width + x as usize)
    }

    /// Check if `(x, y)` is inside the board
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        self.index(x, y).is_some()
    }

    /// Check if a point could be committed at `(x, y)`: inside the board and empty
    pub fn can_place(&self, x: i32, y: i32) -> bool {
        matches!(self.index(x, y).map(|idx| self.cells[idx]), Some(None))
    }

    // ---------------------------------------------------------------------
    // Point lifecycle
    // ---------------------------------------------------------------------

    /// Allocate a point that is not yet committed to the board
    pub fn create_point(&mut self, x: i32, y: i32, color: Color) -> PointId {
        self.points.insert(Point::new(x, y, color))
    }

    /// Look up a live point
    pub fn point(&self, id: PointId) -> Option<&Point> {
        self.points.get(id)
    }

    /// Mutable access for renderers that manage [`Point::set_render_handle`]
    pub fn point_mut(&mut self, id: PointId) -> Option<&mut Point> {
        self.points.get_mut(id)
    }

    /// Check if `id` is currently committed at its own coordinates
    pub fn is_committed(&self, id: PointId) -> bool {
        self.points
            .get(id)
            .and_then(|p| self.index(p.x(), p.y()))
            .is_some_and(|idx| self.cells[idx] == Some(id))
    }

    /// Number of live points, committed or not
    pub fn live_points(&self) -> usize {
        self.points.len()
    }

    /// Reposition a point that is not on the board
    pub fn relocate_detached(&mut self, id: PointId, x: i32, y: i32) -> Result<(), GridError> {
        if self.is_committed(id) {
            return Err(GridError::Committed(id));
        }
        let point = self.points.get_mut(id).ok_or(GridError::StalePoint(id))?;
        point.set_location((x, y));
        Ok(())
    }

    /// Free an uncommitted point; every copy of its handle goes stale
    pub fn release(&mut self, id: PointId) -> Result<(), GridError> {
        if self.is_committed(id) {
            return Err(GridError::Committed(id));
        }
        self.points
            .remove(id)
            .map(|_| ())
            .ok_or(GridError::StalePoint(id))
    }

    // ---------------------------------------------------------------------
    // Single-point operations
    // ---------------------------------------------------------------------

    /// Commit a point at its own coordinates
    ///
    /// Returns false (and changes nothing) if the cell is out of bounds or
    /// occupied, or if the point is stale or already committed.
    pub fn add_point(&mut self, id: PointId) -> bool {
        let Some((x, y)) = self.points.get(id).map(Point::location) else {
            return false;
        };
        if !self.can_place(x, y) || self.is_committed(id) {
            return false;
        }

        self.occupy(id, x, y);
        if let Some(point) = self.points.get_mut(id) {
            self.renderer.raster(point);
        }
        true
    }

    /// Get the point committed at `(x, y)`
    pub fn get_point(&self, x: i32, y: i32) -> Result<Option<PointId>, GridError> {
        self.index(x, y)
            .map(|idx| self.cells[idx])
            .ok_or(GridError::OutOfBounds { x, y })
    }

    /// Take a committed point off the board; it stays alive in the arena
    pub fn remove(&mut self, id: PointId) -> Result<(), GridError> {
        let (x, y) = self.committed_location(id)?;
        self.vacate(x, y);
        if let Some(point) = self.points.get_mut(id) {
            self.renderer.erase(point);
        }
        Ok(())
    }

    /// Move one committed point to `(x, y)`
    ///
    /// Returns `Ok(false)` if the target is out of bounds or held by another point.
    pub fn move_point(&mut self, id: PointId, x: i32, y: i32) -> Result<bool, GridError> {
        self.relocate(id, (x, y), MoveKind::Absolute)
    }

    /// Translate one committed point by `(dx, dy)`
    pub fn translate_point(&mut self, id: PointId, dx: i32, dy: i32) -> Result<bool, GridError> {
        let (x, y) = self.committed_location(id)?;
        match offset((x, y), (dx, dy)) {
            Some(target) => self.relocate(id, target, MoveKind::Relative),
            None => Ok(false),
        }
    }

    fn relocate(&mut self, id: PointId, target: Location, kind: MoveKind) -> Result<bool, GridError> {
        let source = self.committed_location(id)?;
        if source == target {
            return Ok(true);
        }
        if !self.can_place(target.0, target.1) {
            return Ok(false);
        }

        self.vacate(source.0, source.1);
        self.commit_move(id, source, target, kind);
        Ok(true)
    }

    // ---------------------------------------------------------------------
    // Batch operations
    // ---------------------------------------------------------------------

    /// Atomically move several committed points to absolute targets
    ///
    /// Targets may overlap the batch's own sources. Errors (nothing changed):
    /// a point that is not committed, a point listed twice, or two points
    /// sharing a target. Returns `Ok(false)` with every point left in place
    /// when any target is out of bounds or held by a point outside the batch.
    pub fn batch_move(&mut self, moves: &[(PointId, Location)]) -> Result<bool, GridError> {
        self.apply_batch(moves, MoveKind::Absolute)
    }

    /// Atomically translate several committed points, each by its own delta
    pub fn batch_translate(&mut self, deltas: &[(PointId, Delta)]) -> Result<bool, GridError> {
        let mut moves = Vec::with_capacity(deltas.len());
        let mut overflow = false;
        for &(id, delta) in deltas {
            let point = self.points.get(id).ok_or(GridError::StalePoint(id))?;
            match offset(point.location(), delta) {
                Some(target) => moves.push((id, target)),
                None => overflow = true,
            }
        }
        if overflow {
            // Off the board either way; uncommitted points are still an error
            for &(id, _) in deltas {
                self.committed_location(id)?;
            }
            return Ok(false);
        }
        self.apply_batch(&moves, MoveKind::Relative)
    }

    fn apply_batch(&mut self, moves: &[(PointId, Location)], kind: MoveKind) -> Result<bool, GridError> {
        // Contract checks first, before anything is touched
        let mut sources = Vec::with_capacity(moves.len());
        let mut seen_points = HashSet::with_capacity(moves.len());
        let mut seen_targets = HashSet::with_capacity(moves.len());
        for &(id, (x, y)) in moves {
            sources.push(self.committed_location(id)?);
            if !seen_points.insert(id) {
                return Err(GridError::DuplicatePoint(id));
            }
            if !seen_targets.insert((x, y)) {
                return Err(GridError::Conflict { x, y });
            }
        }

        // Vacate, then validate against the vacated board
        for &(x, y) in &sources {
            self.vacate(x, y);
        }

        let placeable = moves.iter().all(|&(_, (x, y))| self.can_place(x, y));
        if !placeable {
            for (&(id, _), &(x, y)) in moves.iter().zip(&sources) {
                self.occupy(id, x, y);
            }
            return Ok(false);
        }

        for (&(id, target), &source) in moves.iter().zip(&sources) {
            self.commit_move(id, source, target, kind);
        }
        Ok(true)
    }

    // ---------------------------------------------------------------------
    // Rows
    // ---------------------------------------------------------------------

    /// Number of occupied cells in row `y` (0 outside the board)
    pub fn row_count(&self, y: usize) -> usize {
        self.row_counts.get(y).copied().unwrap_or(0)
    }

    /// Check if row `y` is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        self.full_rows.contains(&y)
    }

    /// Full rows, top to bottom
    pub fn full_rows(&self) -> impl Iterator<Item = usize> + '_ {
        self.full_rows.iter().copied()
    }

    /// Total number of committed points
    pub fn occupied_count(&self) -> usize {
        self.row_counts.iter().sum()
    }

    /// Points committed in row `y`, left to right
    pub fn row_points(&self, y: usize) -> Vec<PointId> {
        if y >= self.height {
            return Vec::new();
        }
        let start = y * self.width;
        self.cells[start..start + self.width]
            .iter()
            .flatten()
            .copied()
            .collect()
    }

    /// Clear all full rows and drop the rows above them into place
    ///
    /// Single bottom-up pass with a running count of cleared rows: a full row
    /// is removed (its points are released), and every non-full row above it
    /// is shifted down by the number of rows cleared so far. Returns the number
    /// of rows cleared.
    pub fn clear_full_rows(&mut self) -> Result<usize, GridError> {
        let mut cleared = 0usize;

        for y in (0..self.height).rev() {
            if self.full_rows.contains(&y) {
                for id in self.row_points(y) {
                    self.remove(id)?;
                    self.points.remove(id);
                }
                cleared += 1;
            } else if cleared > 0 && self.row_counts[y] > 0 {
                let shift: Vec<(PointId, Delta)> = self
                    .row_points(y)
                    .into_iter()
                    .map(|id| (id, (0, cleared as i32)))
                    .collect();
                if !self.batch_translate(&shift)? {
                    tracing::error!(row = y, cleared, "row shift blocked during line clear");
                    return Err(GridError::ShiftBlocked { row: y });
                }
            }
        }

        if cleared > 0 {
            tracing::debug!(cleared, "cleared full rows");
        }
        Ok(cleared)
    }

    /// Remove every point from the board and release it
    pub fn clear(&mut self) {
        for idx in 0..self.cells.len() {
            if let Some(id) = self.cells[idx].take() {
                if let Some(mut point) = self.points.remove(id) {
                    self.renderer.erase(&mut point);
                }
            }
        }
        self.row_counts.iter_mut().for_each(|count| *count = 0);
        self.full_rows.clear();
    }

    /// Boolean occupancy snapshot
    pub fn get_observation(&self) -> Observation {
        Observation::new(
            self.height,
            self.width,
            self.cells.iter().map(Option::is_some).collect(),
        )
    }

    // ---------------------------------------------------------------------
    // Bookkeeping
    // ---------------------------------------------------------------------

    fn committed_location(&self, id: PointId) -> Result<Location, GridError> {
        let point = self.points.get(id).ok_or(GridError::StalePoint(id))?;
        let (x, y) = point.location();
        match self.index(x, y) {
            Some(idx) if self.cells[idx] == Some(id) => Ok((x, y)),
            _ => Err(GridError::NotFound { id, x, y }),
        }
    }

    fn commit_move(&mut self, id: PointId, source: Location, target: Location, kind: MoveKind) {
        self.occupy(id, target.0, target.1);
        if let Some(point) = self.points.get_mut(id) {
            point.set_location(target);
            match kind {
                MoveKind::Absolute => self.renderer.move_to(point, target.0, target.1),
                MoveKind::Relative => {
                    self.renderer
                        .translate(point, target.0 - source.0, target.1 - source.1)
                }
            }
        }
    }

    /// Mark `(x, y)` as held by `id`; the caller has checked the cell is empty
    fn occupy(&mut self, id: PointId, x: i32, y: i32) {
        let Some(idx) = self.index(x, y) else {
            return;
        };
        debug_assert!(self.cells[idx].is_none());
        self.cells[idx] = Some(id);

        let row = y as usize;
        self.row_counts[row] += 1;
        if self.row_counts[row] == self.width {
            self.full_rows.insert(row);
        }
    }

    fn vacate(&mut self, x: i32, y: i32) {
        let Some(idx) = self.index(x, y) else {
            return;
        };
        if self.cells[idx].take().is_none() {
            return;
        }

        let row = y as usize;
        self.row_counts[row] -= 1;
        self.full_rows.remove(&row);
    }
}

/// `location + delta`, or `None` if a coordinate leaves the `i32` range
pub(crate) fn offset((x, y): Location, (dx, dy): Delta) -> Option<Location> {
    Some((x.checked_add(dx)?, y.checked_add(dy)?))
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(GridConfig::default())
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grid")
            .field("height", &self.height)
            .field("width", &self.width)
            .field("occupied", &self.occupied_count())
            .field("full_rows", &self.full_rows)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> Grid {
        Grid::new(GridConfig::new(21, 10))
    }

    fn assert_bookkeeping(grid: &Grid) {
        for y in 0..grid.height {
            let occupied = (0..grid.width)
                .filter(|&x| grid.cells[y * grid.width + x].is_some())
                .count();
            assert_eq!(grid.row_counts[y], occupied, "row {} count", y);
            assert_eq!(grid.full_rows.contains(&y), occupied == grid.width);
        }
        for (idx, cell) in grid.cells.iter().enumerate() {
            if let Some(id) = cell {
                let p = grid.point(*id).expect("committed point is alive");
                assert_eq!(
                    (p.y() as usize) * grid.width + p.x() as usize,
                    idx,
                    "cell and point coordinates disagree"
                );
            }
        }
    }

    #[test]
    fn test_grid_index_calculation() {
        let grid = grid();
        assert_eq!(grid.index(0, 0), Some(0));
        assert_eq!(grid.index(9, 0), Some(9));
        assert_eq!(grid.index(0, 1), Some(10));
        assert_eq!(grid.index(9, 20), Some(209));
        assert_eq!(grid.index(-1, 0), None);
        assert_eq!(grid.index(10, 0), None);
        assert_eq!(grid.index(0, 21), None);
    }

    #[test]
    fn test_row_bookkeeping_tracks_fill_and_vacate() {
        let mut grid = grid();
        let ids: Vec<_> = (0..10)
            .map(|x| grid.create_point(x, 7, Color::BLACK))
            .collect();
        for &id in &ids {
            assert!(grid.add_point(id));
        }
        assert_eq!(grid.row_count(7), 10);
        assert!(grid.is_row_full(7));

        grid.remove(ids[3]).unwrap();
        assert_eq!(grid.row_count(7), 9);
        assert!(!grid.is_row_full(7));
        assert_bookkeeping(&grid);
    }

    #[test]
    fn test_failed_batch_restores_bookkeeping() {
        let mut grid = grid();
        let ids: Vec<_> = (0..10)
            .map(|x| grid.create_point(x, 20, Color::BLACK))
            .collect();
        for &id in &ids {
            grid.add_point(id);
        }
        let blocker = grid.create_point(0, 19, Color::RED);
        grid.add_point(blocker);

        // Lifting the whole floor row hits the blocker at (0, 19)
        let lift: Vec<_> = ids.iter().map(|&id| (id, (0, -1))).collect();
        assert!(!grid.batch_translate(&lift).unwrap());
        assert!(grid.is_row_full(20));
        assert_eq!(grid.row_count(19), 1);
        assert_bookkeeping(&grid);
    }

    #[test]
    fn test_release_makes_handle_stale() {
        let mut grid = grid();
        let id = grid.create_point(3, 3, Color::GREEN);
        assert!(grid.add_point(id));
        assert_eq!(grid.release(id), Err(GridError::Committed(id)));

        grid.remove(id).unwrap();
        grid.release(id).unwrap();
        assert!(grid.point(id).is_none());
        assert!(!grid.add_point(id));
        assert_eq!(grid.remove(id), Err(GridError::StalePoint(id)));
    }

    #[test]
    fn test_clear_releases_everything() {
        let mut grid = grid();
        for x in 0..5 {
            let id = grid.create_point(x, 10, Color::BLUE);
            grid.add_point(id);
        }
        grid.clear();
        assert_eq!(grid.occupied_count(), 0);
        assert_eq!(grid.live_points(), 0);
        assert_bookkeeping(&grid);
    }

    #[test]
    fn test_cleared_rows_release_points() {
        let mut grid = grid();
        let ids: Vec<_> = (0..10)
            .map(|x| grid.create_point(x, 20, Color::BLACK))
            .collect();
        for &id in &ids {
            grid.add_point(id);
        }
        assert_eq!(grid.clear_full_rows().unwrap(), 1);
        assert_eq!(grid.live_points(), 0);
        assert!(ids.iter().all(|&id| grid.point(id).is_none()));
        assert_bookkeeping(&grid);
    }
}
