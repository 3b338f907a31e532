//! Point module - unit squares and the arena that owns them
//!
//! A point is identified by its [`PointId`] handle, never by value: two points
//! at the same coordinates with the same color are still distinct. The grid
//! and blocks store handles into a [`PointArena`]; a released slot bumps its
//! generation so stale handles resolve to nothing instead of aliasing a newer
//! point.

use crate::types::{Color, Location};

/// Handle to a point stored in a [`PointArena`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PointId {
    index: u32,
    generation: u32,
}

impl PointId {
    /// Slot index inside the arena
    pub fn index(&self) -> usize {
        self.index as usize
    }
}

/// Opaque token a renderer may attach to a point (e.g. a canvas item id)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RenderHandle(pub u64);

/// A unit square with board coordinates and a color tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Point {
    x: i32,
    y: i32,
    color: Color,
    render_handle: Option<RenderHandle>,
}

impl Point {
    pub(crate) fn new(x: i32, y: i32, color: Color) -> Self {
        Self {
            x,
            y,
            color,
            render_handle: None,
        }
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    pub fn location(&self) -> Location {
        (self.x, self.y)
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Handle assigned by the renderer, if any
    pub fn render_handle(&self) -> Option<RenderHandle> {
        self.render_handle
    }

    /// Set or clear the renderer's handle. The engine never reads it.
    pub fn set_render_handle(&mut self, handle: Option<RenderHandle>) {
        self.render_handle = handle;
    }

    pub(crate) fn set_location(&mut self, (x, y): Location) {
        self.x = x;
        self.y = y;
    }
}

#[derive(Debug, Clone)]
struct Slot {
    generation: u32,
    point: Option<Point>,
}

/// Generational arena of points
#[derive(Debug, Clone, Default)]
pub struct PointArena {
    slots: Vec<Slot>,
    free: Vec<u32>,
    live: usize,
}

impl PointArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a point and return its handle, reusing a freed slot when possible
    pub fn insert(&mut self, point: Point) -> PointId {
        self.live += 1;
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.point = Some(point);
            return PointId {
                index,
                generation: slot.generation,
            };
        }

        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            point: Some(point),
        });
        PointId {
            index,
            generation: 0,
        }
    }

    /// Look up a live point; stale or released handles yield `None`
    pub fn get(&self, id: PointId) -> Option<&Point> {
        self.slots
            .get(id.index())
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.point.as_ref())
    }

    pub fn get_mut(&mut self, id: PointId) -> Option<&mut Point> {
        self.slots
            .get_mut(id.index())
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.point.as_mut())
    }

    pub fn contains(&self, id: PointId) -> bool {
        self.get(id).is_some()
    }

    /// Free a slot; its handle (and every copy of it) becomes stale
    pub fn remove(&mut self, id: PointId) -> Option<Point> {
        let slot = self.slots.get_mut(id.index())?;
        if slot.generation != id.generation {
            return None;
        }
        let point = slot.point.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        self.live -= 1;
        Some(point)
    }

    /// Number of live points
    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_is_by_handle() {
        let mut arena = PointArena::new();
        let a = arena.insert(Point::new(4, 5, Color::RED));
        let b = arena.insert(Point::new(4, 5, Color::RED));

        assert_ne!(a, b);
        assert_eq!(arena.get(a), arena.get(b));
        assert_eq!(arena.len(), 2);
    }

    #[test]
    fn test_removed_handle_goes_stale() {
        let mut arena = PointArena::new();
        let a = arena.insert(Point::new(1, 1, Color::BLUE));
        assert!(arena.remove(a).is_some());
        assert!(arena.get(a).is_none());
        assert!(arena.remove(a).is_none());

        // Slot is reused under a new generation
        let b = arena.insert(Point::new(2, 2, Color::GREEN));
        assert_eq!(a.index(), b.index());
        assert_ne!(a, b);
        assert!(arena.get(a).is_none());
        assert_eq!(arena.get(b).map(Point::location), Some((2, 2)));
        assert_eq!(arena.len(), 1);
    }

    #[test]
    fn test_render_handle_is_inert() {
        let mut arena = PointArena::new();
        let a = arena.insert(Point::new(0, 0, Color::CYAN));
        let point = arena.get_mut(a).unwrap();
        point.set_render_handle(Some(RenderHandle(7)));
        assert_eq!(point.render_handle(), Some(RenderHandle(7)));
        point.set_render_handle(None);
        assert_eq!(point.render_handle(), None);
    }
}
