//! Tile grid for the battlefield.
//!
//! The map is a fixed `GRID_ROWS x GRID_COLUMNS` matrix. Rows are numbered
//! `1..=GRID_ROWS` top to bottom and columns `1..=GRID_COLUMNS`; the defended
//! boundary lies beyond column 1 and enemies advance toward decreasing
//! columns. Columns greater than `GRID_COLUMNS` form the off-map staging
//! area where enemies wait before entering play.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of rows on the map.
pub const GRID_ROWS: i32 = 7;

/// Number of columns on the map. Tiles beyond this column are staging area.
pub const GRID_COLUMNS: i32 = 15;

/// A tile position expressed as (column, row).
///
/// Positions are not restricted to the map: staging-area columns
/// (`column > GRID_COLUMNS`) are legal enemy positions. Use
/// [`TilePos::is_on_map`] to test whether a position is a real tile.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TilePos {
    /// Column number, 1 being the leftmost map column.
    pub column: i32,
    /// Row number, 1 being the topmost row.
    pub row: i32,
}

impl TilePos {
    /// Creates a position from a column and a row.
    #[must_use]
    pub const fn new(column: i32, row: i32) -> Self {
        Self { column, row }
    }

    /// Returns the position shifted by `(d_column, d_row)`.
    #[must_use]
    pub const fn offset(self, d_column: i32, d_row: i32) -> Self {
        Self::new(self.column + d_column, self.row + d_row)
    }

    /// Returns true if this position is a tile of the map proper
    /// (staging-area columns are excluded).
    #[must_use]
    pub const fn is_on_map(self) -> bool {
        1 <= self.column && self.column <= GRID_COLUMNS && 1 <= self.row && self.row <= GRID_ROWS
    }

    /// The eight tiles surrounding this one, row by row.
    #[must_use]
    pub fn neighbors(self) -> [Self; 8] {
        [
            self.offset(-1, -1),
            self.offset(0, -1),
            self.offset(1, -1),
            self.offset(-1, 0),
            self.offset(1, 0),
            self.offset(-1, 1),
            self.offset(0, 1),
            self.offset(1, 1),
        ]
    }
}

impl fmt::Display for TilePos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.column, self.row)
    }
}

/// Returns true if `(column, row)` designates a tile of the map.
///
/// Equivalent to `TilePos::new(column, row).is_on_map()`; kept as a free
/// function for call sites that work with raw coordinates.
#[must_use]
pub const fn tile_exists(column: i32, row: i32) -> bool {
    TilePos::new(column, row).is_on_map()
}
