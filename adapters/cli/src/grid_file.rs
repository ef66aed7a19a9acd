//! Text format for walkability grids.
//!
//! Each non-blank line is one row. `1` or `#` marks a path cell and `0` or
//! `.` marks buildable ground. Whitespace around rows is ignored.

use std::{fs, path::Path};

use anyhow::{bail, Context, Result};
use grid_defence_core::WalkGrid;

/// Reads and parses a grid file.
pub(crate) fn load(path: &Path) -> Result<WalkGrid> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read grid file {}", path.display()))?;
    parse(&contents).with_context(|| format!("failed to parse grid file {}", path.display()))
}

fn parse(contents: &str) -> Result<WalkGrid> {
    let mut rows = Vec::new();
    for (line_index, line) in contents.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let mut row = Vec::with_capacity(line.len());
        for (column, symbol) in line.chars().enumerate() {
            let value = match symbol {
                '1' | '#' => 1,
                '0' | '.' => 0,
                other => bail!(
                    "unexpected symbol '{other}' at line {}, column {}",
                    line_index + 1,
                    column + 1
                ),
            };
            row.push(value);
        }
        rows.push(row);
    }

    Ok(WalkGrid::from_rows(rows)?)
}
