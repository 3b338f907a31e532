//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (grid engine, headless driver, agents, CLI).
//!
//! # Board Dimensions
//!
//! The playfield size is configuration, not a global. These constants are only
//! the defaults used when a caller does not pick its own size:
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 at the top)
//!
//! # Scoring
//!
//! | Rows cleared | Points |
//! |--------------|--------|
//! | 0 | 0 |
//! | 1 | 1 |
//! | 2 | 3 |
//! | 3 | 5 |
//! | 4 | 8 |
//!
//! # Examples
//!
//! ```
//! use grid_tetris_types::{Action, Color, DEFAULT_BOARD_HEIGHT, DEFAULT_BOARD_WIDTH};
//!
//! let action = Action::from_str("moveLeft").unwrap();
//! assert_eq!(action, Action::MoveLeft);
//!
//! let purple = Color::from_hex("#800080").unwrap();
//! assert_eq!(purple.to_hex(), "#800080");
//!
//! assert_eq!(DEFAULT_BOARD_WIDTH, 10);
//! assert_eq!(DEFAULT_BOARD_HEIGHT, 20);
//! ```

use std::fmt;

/// Default board width in cells (10 columns)
pub const DEFAULT_BOARD_WIDTH: usize = 10;

/// Default board height in cells (20 rows)
pub const DEFAULT_BOARD_HEIGHT: usize = 20;

/// Number of cells in every piece
pub const POINTS_PER_BLOCK: usize = 4;

/// Number of rotation states a piece cycles through
pub const ROTATION_STATES: u8 = 4;

/// Points awarded for clearing N rows at once, indexed by N
pub const LINE_POINTS: [u32; 5] = [0, 1, 3, 5, 8];

/// Default number of agent actions between two gravity ticks in a simulation
pub const DEFAULT_GRAVITY_EVERY: u32 = 4;

/// Default upper bound on agent actions in a simulation
pub const DEFAULT_SIMULATION_STEPS: u32 = 10_000;

/// A board coordinate `(x, y)`; `x` grows to the right, `y` grows downwards.
pub type Location = (i32, i32);

/// A coordinate offset `(dx, dy)`.
pub type Delta = (i32, i32);

/// An RGB color tag carried by every point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0x00, 0x00, 0x00);
    pub const RED: Color = Color::rgb(0xFF, 0x00, 0x00);
    pub const ORANGE: Color = Color::rgb(0xFF, 0x7F, 0x00);
    pub const YELLOW: Color = Color::rgb(0xFF, 0xFF, 0x00);
    pub const GREEN: Color = Color::rgb(0x00, 0xFF, 0x00);
    pub const CYAN: Color = Color::rgb(0x00, 0xFF, 0xFF);
    pub const BLUE: Color = Color::rgb(0x00, 0x00, 0xFF);
    pub const PURPLE: Color = Color::rgb(0x80, 0x00, 0x80);
    pub const GRAY: Color = Color::rgb(0x80, 0x80, 0x80);

    /// Build a color from its three channels
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RRGGBB` (the leading `#` is optional, hex digits are case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use grid_tetris_types::Color;
    ///
    /// assert_eq!(Color::from_hex("#FF7F00"), Some(Color::ORANGE));
    /// assert_eq!(Color::from_hex("00ffff"), Some(Color::CYAN));
    /// assert_eq!(Color::from_hex("#12345"), None);
    /// ```
    pub fn from_hex(s: &str) -> Option<Self> {
        let digits = s.strip_prefix('#').unwrap_or(s);
        if digits.len() != 6 || !digits.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        Some(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Uppercase `#RRGGBB` representation
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Player actions a driver can apply to the active piece
///
/// These actions are used by both human input and automated agents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Rotate the piece one step using its fixed rotation table
    Rotate,
    /// Drop the piece one row; settles it when blocked
    MoveDown,
    /// Move the piece one column left
    MoveLeft,
    /// Move the piece one column right
    MoveRight,
    /// Drop the piece until it settles
    MoveToBottom,
    /// Swap the active piece with the saved one (or save it and spawn the next)
    SaveBlock,
}

impl Action {
    /// Every action, in declaration order
    pub const ALL: [Action; 6] = [
        Action::Rotate,
        Action::MoveDown,
        Action::MoveLeft,
        Action::MoveRight,
        Action::MoveToBottom,
        Action::SaveBlock,
    ];

    /// Parse action from string (case-insensitive, `_` and `-` ignored)
    ///
    /// # Examples
    ///
    /// ```
    /// use grid_tetris_types::Action;
    ///
    /// assert_eq!(Action::from_str("rotate"), Some(Action::Rotate));
    /// assert_eq!(Action::from_str("MOVE_TO_BOTTOM"), Some(Action::MoveToBottom));
    /// assert_eq!(Action::from_str("saveBlock"), Some(Action::SaveBlock));
    /// assert_eq!(Action::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        let normalized: String = s
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "rotate" => Some(Action::Rotate),
            "movedown" => Some(Action::MoveDown),
            "moveleft" => Some(Action::MoveLeft),
            "moveright" => Some(Action::MoveRight),
            "movetobottom" => Some(Action::MoveToBottom),
            "saveblock" => Some(Action::SaveBlock),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Rotate => "rotate",
            Action::MoveDown => "moveDown",
            Action::MoveLeft => "moveLeft",
            Action::MoveRight => "moveRight",
            Action::MoveToBottom => "moveToBottom",
            Action::SaveBlock => "saveBlock",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_points_table() {
        assert_eq!(LINE_POINTS, [0, 1, 3, 5, 8]);
        assert_eq!(LINE_POINTS.len(), POINTS_PER_BLOCK + 1);
    }

    #[test]
    fn action_string_roundtrip() {
        for action in Action::ALL {
            assert_eq!(Action::from_str(action.as_str()), Some(action));
        }
    }

    #[test]
    fn color_hex_formatting() {
        assert_eq!(Color::PURPLE.to_hex(), "#800080");
        assert_eq!(Color::ORANGE.to_string(), "#FF7F00");
        assert_eq!(Color::from_hex("#zzzzzz"), None);
    }
}
