//! Walkability grid supplied by the map collaborator.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::CellCoord;

/// Errors that prevent a session from starting.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The grid contained no rows or no columns.
    #[error("walkability grid is empty")]
    EmptyGrid,
    /// A row did not match the width of the first row.
    #[error("grid row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        /// Zero-based index of the offending row.
        row: usize,
        /// Width established by the first row.
        expected: usize,
        /// Width of the offending row.
        found: usize,
    },
    /// A cell held a value other than `0` or `1`.
    #[error("grid cell ({column}, {row}) holds {value}, expected 0 or 1")]
    InvalidCell {
        /// Column of the offending cell.
        column: usize,
        /// Row of the offending cell.
        row: usize,
        /// Raw value found in the cell.
        value: u8,
    },
    /// The grid has more columns or rows than cell coordinates can address.
    #[error("grid of {columns}x{rows} cells exceeds the addressable size")]
    TooLarge {
        /// Number of columns supplied.
        columns: usize,
        /// Number of rows supplied.
        rows: usize,
    },
    /// Row 0 has no walkable cell to enter from.
    #[error("no walkable cell in the first row to use as the path start")]
    MissingStart,
    /// The last row has no walkable cell to exit through.
    #[error("no walkable cell in the last row to use as the path end")]
    MissingEnd,
    /// Start and end are not connected by walkable cells.
    #[error("no walkable path from {start:?} to {end:?}")]
    NoPath {
        /// Entry cell located in the first row.
        start: CellCoord,
        /// Exit cell located in the last row.
        end: CellCoord,
    },
}

/// Dense walkability grid where `true` marks path cells and `false` marks
/// buildable ground.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalkGrid {
    columns: u32,
    rows: u32,
    walkable: Vec<bool>,
}

impl WalkGrid {
    /// Builds a grid from row-major `{0,1}` values.
    pub fn from_rows(rows: Vec<Vec<u8>>) -> Result<Self, ConfigError> {
        let expected = rows.first().map_or(0, Vec::len);
        if expected == 0 {
            return Err(ConfigError::EmptyGrid);
        }

        let mut walkable = Vec::with_capacity(expected * rows.len());
        for (row_index, row) in rows.iter().enumerate() {
            if row.len() != expected {
                return Err(ConfigError::RaggedRow {
                    row: row_index,
                    expected,
                    found: row.len(),
                });
            }

            for (column, value) in row.iter().copied().enumerate() {
                match value {
                    0 => walkable.push(false),
                    1 => walkable.push(true),
                    _ => {
                        return Err(ConfigError::InvalidCell {
                            column,
                            row: row_index,
                            value,
                        })
                    }
                }
            }
        }

        let (columns, row_count) = dimensions(expected, rows.len())?;
        Ok(Self {
            columns,
            rows: row_count,
            walkable,
        })
    }

    /// Number of columns in the grid.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of rows in the grid.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Reports whether the cell lies inside the grid.
    #[must_use]
    pub const fn contains(&self, cell: CellCoord) -> bool {
        cell.column() < self.columns && cell.row() < self.rows
    }

    /// Reports whether monsters may walk on the cell. Cells outside the grid
    /// are never walkable.
    #[must_use]
    pub fn is_walkable(&self, cell: CellCoord) -> bool {
        self.index(cell)
            .and_then(|index| self.walkable.get(index).copied())
            .unwrap_or(false)
    }

    /// Reports whether a tower may stand on the cell.
    #[must_use]
    pub fn is_buildable(&self, cell: CellCoord) -> bool {
        self.index(cell)
            .and_then(|index| self.walkable.get(index).copied())
            .map_or(false, |walkable| !walkable)
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        if !self.contains(cell) {
            return None;
        }
        let row = usize::try_from(cell.row()).ok()?;
        let column = usize::try_from(cell.column()).ok()?;
        let width = usize::try_from(self.columns).ok()?;
        Some(row * width + column)
    }
}

fn dimensions(columns: usize, rows: usize) -> Result<(u32, u32), ConfigError> {
    match (u32::try_from(columns), u32::try_from(rows)) {
        (Ok(width), Ok(height)) => Ok((width, height)),
        _ => Err(ConfigError::TooLarge { columns, rows }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_rows_rejects_ragged_input() {
        let error = WalkGrid::from_rows(vec![vec![0, 1, 0], vec![0, 1]]).unwrap_err();
        assert_eq!(
            error,
            ConfigError::RaggedRow {
                row: 1,
                expected: 3,
                found: 2,
            }
        );
    }

    #[test]
    fn from_rows_rejects_unknown_values() {
        let error = WalkGrid::from_rows(vec![vec![0, 2]]).unwrap_err();
        assert_eq!(
            error,
            ConfigError::InvalidCell {
                column: 1,
                row: 0,
                value: 2,
            }
        );
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn oversized_dimensions_are_reported_as_too_large() {
        let huge = usize::try_from(u64::from(u32::MAX) + 1).expect("64-bit usize");
        assert_eq!(
            dimensions(huge, 2),
            Err(ConfigError::TooLarge {
                columns: huge,
                rows: 2,
            })
        );
        assert_eq!(
            dimensions(3, huge),
            Err(ConfigError::TooLarge {
                columns: 3,
                rows: huge,
            })
        );
        assert_eq!(dimensions(3, 2), Ok((3, 2)));
    }

    #[test]
    fn from_rows_rejects_empty_input() {
        assert_eq!(WalkGrid::from_rows(Vec::new()), Err(ConfigError::EmptyGrid));
        assert_eq!(
            WalkGrid::from_rows(vec![Vec::new()]),
            Err(ConfigError::EmptyGrid)
        );
    }

    #[test]
    fn walkable_and_buildable_partition_the_grid() {
        let grid = WalkGrid::from_rows(vec![vec![0, 1], vec![1, 0]]).expect("valid grid");

        assert!(grid.is_walkable(CellCoord::new(1, 0)));
        assert!(!grid.is_buildable(CellCoord::new(1, 0)));
        assert!(grid.is_buildable(CellCoord::new(0, 0)));
        assert!(!grid.is_walkable(CellCoord::new(0, 0)));
    }

    #[test]
    fn out_of_bounds_cells_are_neither_walkable_nor_buildable() {
        let grid = WalkGrid::from_rows(vec![vec![1, 0]]).expect("valid grid");
        let outside = CellCoord::new(2, 0);

        assert!(!grid.contains(outside));
        assert!(!grid.is_walkable(outside));
        assert!(!grid.is_buildable(outside));
    }
}
