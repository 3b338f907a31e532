//! Block module - one falling piece as a group of four points
//!
//! A block is bound to a [`Grid`]: it owns four point handles in the grid's
//! arena and every operation takes the grid it lives on. It starts unbound
//! (points exist but are not committed), becomes active after
//! [`Block::activate`], and is unbound again after [`Block::remove`] +
//! [`Block::reset`]. The rotation state is an independent counter that only
//! advances on a successful rotation.
//!
//! # Moving a block onto itself
//!
//! Rotations and some translations move a point into a cell still held by
//! another point of the same block. Checking each destination against the
//! current board would wrongly reject those moves, so every block move is
//! planned first:
//!
//! 1. A destination off the board, or held by a foreign point, fails the move.
//! 2. A destination held by a sibling is a dependency: the sibling moves first.
//! 3. The dependencies are ordered with an iterative depth-first search; a
//!    cycle means the rotation table is corrupt and is reported as
//!    [`BlockError::DependencyCycle`].
//! 4. Points are moved one by one in the resolved order, so each destination
//!    is already empty when its point arrives.

use arrayvec::ArrayVec;

use crate::catalog::{RotationDeltas, Shape};
use crate::error::{BlockError, GridError};
use crate::grid::{offset, Grid};
use crate::point::PointId;
use crate::types::{Color, Delta, Location, POINTS_PER_BLOCK, ROTATION_STATES};

/// Validated move of all four points
#[derive(Debug, Clone, PartialEq, Eq)]
struct MovePlan {
    targets: [Location; POINTS_PER_BLOCK],
    /// Indices of the points that actually move, dependencies first
    order: ArrayVec<usize, POINTS_PER_BLOCK>,
}

/// A four-point piece bound to a grid
#[derive(Debug, PartialEq, Eq)]
pub struct Block {
    shape: Shape,
    points: [PointId; POINTS_PER_BLOCK],
    rotation_state: u8,
    active: bool,
}

impl Block {
    /// Allocate an unbound block at its spawn layout on `grid`
    pub fn new(shape: Shape, grid: &mut Grid) -> Self {
        let color = shape.color();
        let points = shape
            .init_point_locations(grid.width())
            .map(|(x, y)| grid.create_point(x, y, color));
        Self {
            shape,
            points,
            rotation_state: 0,
            active: false,
        }
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn color(&self) -> Color {
        self.shape.color()
    }

    /// Spawn cells of this shape on a board `width` columns wide
    pub fn init_point_locations(&self, width: usize) -> [Location; POINTS_PER_BLOCK] {
        self.shape.init_point_locations(width)
    }

    /// Deltas the next rotation would apply
    pub fn rotation_deltas(&self) -> &'static RotationDeltas {
        self.shape.rotation_deltas(self.rotation_state)
    }

    pub fn rotation_state(&self) -> u8 {
        self.rotation_state
    }

    /// True while the block's points are committed to the grid
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Handles of the four points, in catalog order
    pub fn points(&self) -> &[PointId; POINTS_PER_BLOCK] {
        &self.points
    }

    /// Current coordinates of the four points
    pub fn locations(&self, grid: &Grid) -> Result<[Location; POINTS_PER_BLOCK], GridError> {
        let mut out = [(0, 0); POINTS_PER_BLOCK];
        for (slot, &id) in out.iter_mut().zip(&self.points) {
            *slot = grid
                .point(id)
                .map(|p| p.location())
                .ok_or(GridError::StalePoint(id))?;
        }
        Ok(out)
    }

    /// Commit all four points, or none of them
    ///
    /// Fails when any point's cell is off the board or occupied; a fresh block
    /// failing here is how a driver detects game over.
    pub fn activate(&mut self, grid: &mut Grid) -> bool {
        if self.active {
            return false;
        }
        let locations = match self.locations(grid) {
            Ok(locations) => locations,
            Err(err) => {
                tracing::warn!(%err, shape = self.shape.as_str(), "cannot activate block");
                return false;
            }
        };
        if !locations.iter().all(|&(x, y)| grid.can_place(x, y)) {
            return false;
        }

        for (i, &id) in self.points.iter().enumerate() {
            if !grid.add_point(id) {
                // Only reachable if two points share a spawn cell
                for &added in &self.points[..i] {
                    if let Err(err) = grid.remove(added) {
                        tracing::error!(%err, "activation rollback failed");
                    }
                }
                return false;
            }
        }
        self.active = true;
        true
    }

    /// Move all four points by `(dx, dy)`
    pub fn translate(&mut self, grid: &mut Grid, dx: i32, dy: i32) -> Result<bool, BlockError> {
        self.move_points(grid, &[(dx, dy); POINTS_PER_BLOCK])
    }

    /// Rotate one step using the current state's deltas
    ///
    /// There is no kick search: a blocked rotation leaves the block and its
    /// rotation state untouched.
    pub fn rotate(&mut self, grid: &mut Grid) -> Result<bool, BlockError> {
        let deltas = self.rotation_deltas();
        if !self.move_points(grid, deltas)? {
            return Ok(false);
        }
        self.rotation_state = (self.rotation_state + 1) % ROTATION_STATES;
        Ok(true)
    }

    /// Move each point by its own delta, all or nothing
    pub fn move_points(
        &mut self,
        grid: &mut Grid,
        deltas: &[Delta; POINTS_PER_BLOCK],
    ) -> Result<bool, BlockError> {
        if !self.active {
            return Err(BlockError::Inactive);
        }
        let Some(plan) = self.plan_moves(grid, deltas)? else {
            return Ok(false);
        };

        for &i in &plan.order {
            let (x, y) = plan.targets[i];
            if !grid.move_point(self.points[i], x, y)? {
                tracing::error!(point = i, x, y, "planned block move rejected");
                return Err(BlockError::MoveRejected(i));
            }
        }
        Ok(true)
    }

    /// Take all four points off the board without touching their coordinates
    pub fn remove(&mut self, grid: &mut Grid) -> Result<(), BlockError> {
        if !self.active {
            return Err(BlockError::Inactive);
        }
        if let Some(&missing) = self.points.iter().find(|&&id| !grid.is_committed(id)) {
            let (x, y) = grid.point(missing).map(|p| p.location()).unwrap_or((-1, -1));
            return Err(GridError::NotFound { id: missing, x, y }.into());
        }

        for &id in &self.points {
            grid.remove(id)?;
        }
        self.active = false;
        Ok(())
    }

    /// Put the points back at the spawn layout and the rotation state at 0
    ///
    /// Only valid for an unbound block; occupancy is not touched.
    pub fn reset(&mut self, grid: &mut Grid) -> Result<(), BlockError> {
        if self.active {
            return Err(BlockError::Active);
        }
        let spawn = self.shape.init_point_locations(grid.width());
        for (&id, &(x, y)) in self.points.iter().zip(&spawn) {
            grid.relocate_detached(id, x, y)?;
        }
        self.rotation_state = 0;
        Ok(())
    }

    /// Free the points of an unbound block
    pub fn release(self, grid: &mut Grid) -> Result<(), BlockError> {
        if self.active {
            return Err(BlockError::Active);
        }
        for id in self.points {
            grid.release(id)?;
        }
        Ok(())
    }

    fn plan_moves(
        &self,
        grid: &Grid,
        deltas: &[Delta; POINTS_PER_BLOCK],
    ) -> Result<Option<MovePlan>, BlockError> {
        let sources = self.locations(grid)?;
        let mut targets = sources;
        for (target, &delta) in targets.iter_mut().zip(deltas) {
            match offset(*target, delta) {
                Some(moved) => *target = moved,
                None => return Ok(None),
            }
        }

        for (i, a) in targets.iter().enumerate() {
            if targets[i + 1..].contains(a) {
                return Err(GridError::Conflict { x: a.0, y: a.1 }.into());
            }
        }

        let mut depends_on = [None; POINTS_PER_BLOCK];
        let mut moving = [false; POINTS_PER_BLOCK];
        for i in 0..POINTS_PER_BLOCK {
            let (x, y) = targets[i];
            if targets[i] == sources[i] {
                continue;
            }
            moving[i] = true;

            match grid.get_point(x, y) {
                Err(GridError::OutOfBounds { .. }) => return Ok(None),
                Err(err) => return Err(err.into()),
                Ok(None) => {}
                Ok(Some(occupant)) => match self.points.iter().position(|&p| p == occupant) {
                    Some(j) => depends_on[i] = Some(j),
                    None => return Ok(None),
                },
            }
        }

        let order = resolve_move_order(&depends_on).ok_or(BlockError::DependencyCycle {
            shape: self.shape.as_str(),
            rotation_state: self.rotation_state,
        })?;

        Ok(Some(MovePlan {
            targets,
            order: order.into_iter().filter(|&i| moving[i]).collect(),
        }))
    }
}

/// Order points so that each one moves after the sibling it depends on
///
/// `depends_on[i] = Some(j)` means point `i` moves into the cell point `j`
/// currently holds. Iterative DFS with an explicit stack; returns `None` if the
/// graph has a cycle.
fn resolve_move_order(
    depends_on: &[Option<usize>; POINTS_PER_BLOCK],
) -> Option<ArrayVec<usize, POINTS_PER_BLOCK>> {
    #[derive(Clone, Copy, PartialEq, Eq)]
    enum Mark {
        Unvisited,
        InProgress,
        Done,
    }

    let mut marks = [Mark::Unvisited; POINTS_PER_BLOCK];
    let mut order = ArrayVec::new();

    for root in 0..POINTS_PER_BLOCK {
        if marks[root] != Mark::Unvisited {
            continue;
        }
        let mut stack: ArrayVec<usize, POINTS_PER_BLOCK> = ArrayVec::new();
        marks[root] = Mark::InProgress;
        stack.push(root);

        while let Some(&node) = stack.last() {
            match depends_on[node].map(|next| (next, marks[next])) {
                Some((next, Mark::Unvisited)) => {
                    marks[next] = Mark::InProgress;
                    stack.push(next);
                }
                Some((_, Mark::InProgress)) => return None,
                Some((_, Mark::Done)) | None => {
                    marks[node] = Mark::Done;
                    order.push(node);
                    stack.pop();
                }
            }
        }
    }

    Some(order)
}
