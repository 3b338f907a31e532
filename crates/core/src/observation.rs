//! Observation module - boolean occupancy snapshot for automated players

use std::fmt;

/// Dense `height x width` occupancy matrix, row-major, `true` = occupied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observation {
    height: usize,
    width: usize,
    cells: Vec<bool>,
}

impl Observation {
    pub(crate) fn new(height: usize, width: usize, cells: Vec<bool>) -> Self {
        debug_assert_eq!(cells.len(), height * width);
        Self {
            height,
            width,
            cells,
        }
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Occupancy at `(x, y)`, `None` outside the board
    pub fn get(&self, x: usize, y: usize) -> Option<bool> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.cells[y * self.width + x])
    }

    /// Flat row-major cells
    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    /// Iterate rows from top (`y = 0`) to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> {
        self.cells.chunks(self.width.max(1))
    }

    /// Copy into a `Vec` of rows
    pub fn to_rows(&self) -> Vec<Vec<bool>> {
        self.rows().map(<[bool]>::to_vec).collect()
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| **c).count()
    }
}

impl fmt::Display for Observation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for &cell in row {
                f.write_str(if cell { "#" } else { "." })?;
            }
            f.write_str("\n")?;
        }
        Ok(())
    }
}
