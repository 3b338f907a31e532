//! Piece catalog - static geometry for the seven block shapes
//!
//! Every shape is plain data: four spawn offsets relative to
//! `(width / 2, 0)`, a color, and one translation table per rotation state.
//! `rotation_deltas[s][i]` is the move applied to point `i` when rotating out
//! of state `s`. The tables are fixed integers rather than computed rotations,
//! and for every point the four states' deltas sum to zero, so four successful
//! rotations always bring a block back to where it started.

use crate::rng::SimpleRng;
use crate::types::{Color, Delta, Location, POINTS_PER_BLOCK, ROTATION_STATES};

/// Deltas for one rotation state, one per point
pub type RotationDeltas = [Delta; POINTS_PER_BLOCK];

/// Static description of one shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceSpec {
    /// Spawn layout relative to `(width / 2, 0)`
    pub spawn_offsets: [Delta; POINTS_PER_BLOCK],
    pub color: Color,
    /// Indexed by the rotation state being left
    pub rotation_deltas: [RotationDeltas; ROTATION_STATES as usize],
}

/// The seven block shapes
///
/// - **O**: yellow 2x2 square, never changes under rotation
/// - **I**: cyan bar
/// - **J**: blue, corner on the top left
/// - **L**: orange, corner on the top right
/// - **S**: green
/// - **Z**: red (mirror of S)
/// - **T**: purple
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    O,
    I,
    J,
    L,
    S,
    Z,
    T,
}

const ZERO_DELTAS: RotationDeltas = [(0, 0); POINTS_PER_BLOCK];

const O_SPEC: PieceSpec = PieceSpec {
    spawn_offsets: [(-1, 0), (0, 0), (-1, 1), (0, 1)],
    color: Color::YELLOW,
    rotation_deltas: [ZERO_DELTAS; 4],
};

const I_FLAT_TO_TALL: RotationDeltas = [(2, -2), (1, -1), (0, 0), (-1, 1)];
const I_TALL_TO_FLAT: RotationDeltas = [(-2, 2), (-1, 1), (0, 0), (1, -1)];

const I_SPEC: PieceSpec = PieceSpec {
    spawn_offsets: [(-2, 1), (-1, 1), (0, 1), (1, 1)],
    color: Color::CYAN,
    rotation_deltas: [I_FLAT_TO_TALL, I_TALL_TO_FLAT, I_FLAT_TO_TALL, I_TALL_TO_FLAT],
};

const J_SPEC: PieceSpec = PieceSpec {
    spawn_offsets: [(-2, 0), (-2, 1), (-1, 1), (0, 1)],
    color: Color::BLUE,
    rotation_deltas: [
        [(2, 0), (1, -1), (0, 0), (-1, 1)],
        [(0, 2), (1, 1), (0, 0), (-1, -1)],
        [(-2, 0), (-1, 1), (0, 0), (1, -1)],
        [(0, -2), (-1, -1), (0, 0), (1, 1)],
    ],
};

const L_SPEC: PieceSpec = PieceSpec {
    spawn_offsets: [(-2, 1), (-1, 1), (0, 1), (0, 0)],
    color: Color::ORANGE,
    rotation_deltas: [
        [(1, -1), (0, 0), (-1, 1), (0, 2)],
        [(1, 1), (0, 0), (-1, -1), (-2, 0)],
        [(-1, 1), (0, 0), (1, -1), (0, -2)],
        [(-1, -1), (0, 0), (1, 1), (2, 0)],
    ],
};

const S_FLAT_TO_TALL: RotationDeltas = [(1, -2), (0, -1), (1, 0), (0, 1)];
const S_TALL_TO_FLAT: RotationDeltas = [(-1, 2), (0, 1), (-1, 0), (0, -1)];

const S_SPEC: PieceSpec = PieceSpec {
    spawn_offsets: [(-2, 1), (-1, 1), (-1, 0), (0, 0)],
    color: Color::GREEN,
    rotation_deltas: [S_FLAT_TO_TALL, S_TALL_TO_FLAT, S_FLAT_TO_TALL, S_TALL_TO_FLAT],
};

const Z_FLAT_TO_TALL: RotationDeltas = [(2, -1), (1, 0), (0, -1), (-1, 0)];
const Z_TALL_TO_FLAT: RotationDeltas = [(-2, 1), (-1, 0), (0, 1), (1, 0)];

const Z_SPEC: PieceSpec = PieceSpec {
    spawn_offsets: [(-2, 0), (-1, 0), (-1, 1), (0, 1)],
    color: Color::RED,
    rotation_deltas: [Z_FLAT_TO_TALL, Z_TALL_TO_FLAT, Z_FLAT_TO_TALL, Z_TALL_TO_FLAT],
};

const T_SPEC: PieceSpec = PieceSpec {
    spawn_offsets: [(-2, 1), (-1, 1), (-1, 0), (0, 1)],
    color: Color::PURPLE,
    rotation_deltas: [
        [(1, -1), (0, 0), (1, 1), (-1, 1)],
        [(1, 1), (0, 0), (-1, 1), (-1, -1)],
        [(-1, 1), (0, 0), (-1, -1), (1, -1)],
        [(-1, -1), (0, 0), (1, -1), (1, 1)],
    ],
};

impl Shape {
    /// Every shape, in catalog order
    pub const ALL: [Shape; 7] = [
        Shape::O,
        Shape::I,
        Shape::J,
        Shape::L,
        Shape::S,
        Shape::Z,
        Shape::T,
    ];

    /// Static data for this shape
    pub fn spec(self) -> &'static PieceSpec {
        match self {
            Shape::O => &O_SPEC,
            Shape::I => &I_SPEC,
            Shape::J => &J_SPEC,
            Shape::L => &L_SPEC,
            Shape::S => &S_SPEC,
            Shape::Z => &Z_SPEC,
            Shape::T => &T_SPEC,
        }
    }

    pub fn color(self) -> Color {
        self.spec().color
    }

    /// Absolute spawn cells on a board `width` columns wide
    ///
    /// # Examples
    ///
    /// ```
    /// use grid_tetris_core::Shape;
    ///
    /// assert_eq!(
    ///     Shape::O.init_point_locations(10),
    ///     [(4, 0), (5, 0), (4, 1), (5, 1)]
    /// );
    /// ```
    pub fn init_point_locations(self, width: usize) -> [Location; POINTS_PER_BLOCK] {
        let half_width = (width / 2) as i32;
        self.spec()
            .spawn_offsets
            .map(|(dx, dy)| (half_width + dx, dy))
    }

    /// Deltas applied when rotating out of `rotation_state` (taken mod 4)
    pub fn rotation_deltas(self, rotation_state: u8) -> &'static RotationDeltas {
        &self.spec().rotation_deltas[(rotation_state % ROTATION_STATES) as usize]
    }

    /// Uniformly random shape
    pub fn random(rng: &mut SimpleRng) -> Shape {
        Shape::ALL[rng.next_range(Shape::ALL.len() as u32) as usize]
    }

    /// Parse shape from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "o" => Some(Shape::O),
            "i" => Some(Shape::I),
            "j" => Some(Shape::J),
            "l" => Some(Shape::L),
            "s" => Some(Shape::S),
            "z" => Some(Shape::Z),
            "t" => Some(Shape::T),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Shape::O => "o",
            Shape::I => "i",
            Shape::J => "j",
            Shape::L => "l",
            Shape::S => "s",
            Shape::Z => "z",
            Shape::T => "t",
        }
    }
}
