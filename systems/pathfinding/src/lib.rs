#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Grid path planning used to route monsters from the entry to the exit.

use std::{cmp::Reverse, collections::BinaryHeap};

use grid_defence_core::{CellCoord, ConfigError, WalkGrid};

/// Locates the entry and exit cells of a grid.
///
/// The entry is the leftmost walkable cell of the first row and the exit is
/// the rightmost walkable cell of the last row.
pub fn find_start_and_end(grid: &WalkGrid) -> Result<(CellCoord, CellCoord), ConfigError> {
    let last_row = grid.rows().saturating_sub(1);

    let start = (0..grid.columns())
        .map(|column| CellCoord::new(column, 0))
        .find(|cell| grid.is_walkable(*cell))
        .ok_or(ConfigError::MissingStart)?;

    let end = (0..grid.columns())
        .rev()
        .map(|column| CellCoord::new(column, last_row))
        .find(|cell| grid.is_walkable(*cell))
        .ok_or(ConfigError::MissingEnd)?;

    Ok((start, end))
}

/// Computes a shortest 4-connected walkable path from `start` to `end`.
///
/// Runs A* with a Manhattan heuristic and unit step cost. Among open nodes
/// with equal estimated cost the one discovered first is expanded first, and
/// neighbours are discovered in up, right, down, left order, which makes the
/// result fully deterministic. Returns an empty vector when either endpoint
/// is off-grid or unwalkable, or when no path exists.
#[must_use]
pub fn find_path(grid: &WalkGrid, start: CellCoord, end: CellCoord) -> Vec<CellCoord> {
    if !grid.is_walkable(start) || !grid.is_walkable(end) {
        return Vec::new();
    }

    let Ok(width) = usize::try_from(grid.columns()) else {
        return Vec::new();
    };
    let Ok(height) = usize::try_from(grid.rows()) else {
        return Vec::new();
    };
    let cell_count = width.saturating_mul(height);

    let mut best_cost = vec![u32::MAX; cell_count];
    let mut discovered = vec![0_u64; cell_count];
    let mut came_from: Vec<Option<CellCoord>> = vec![None; cell_count];
    let mut closed = vec![false; cell_count];
    let mut open = BinaryHeap::new();
    let mut next_discovery = 1_u64;

    let Some(start_index) = index(width, start) else {
        return Vec::new();
    };
    best_cost[start_index] = 0;
    open.push(Reverse((start.manhattan_distance(end), 0_u64, start)));

    while let Some(Reverse((_, _, cell))) = open.pop() {
        let Some(current) = index(width, cell) else {
            continue;
        };
        if closed[current] {
            continue;
        }
        if cell == end {
            return reconstruct(&came_from, width, start, end);
        }
        closed[current] = true;

        let tentative = best_cost[current].saturating_add(1);
        for neighbor in neighbors(cell, grid.columns(), grid.rows()) {
            if !grid.is_walkable(neighbor) {
                continue;
            }
            let Some(next) = index(width, neighbor) else {
                continue;
            };
            if closed[next] || tentative >= best_cost[next] {
                continue;
            }

            if best_cost[next] == u32::MAX {
                discovered[next] = next_discovery;
                next_discovery += 1;
            }
            best_cost[next] = tentative;
            came_from[next] = Some(cell);
            open.push(Reverse((
                tentative.saturating_add(neighbor.manhattan_distance(end)),
                discovered[next],
                neighbor,
            )));
        }
    }

    Vec::new()
}

fn reconstruct(
    came_from: &[Option<CellCoord>],
    width: usize,
    start: CellCoord,
    end: CellCoord,
) -> Vec<CellCoord> {
    let mut path = vec![end];
    let mut cell = end;
    while cell != start {
        let Some(previous) = index(width, cell).and_then(|offset| came_from[offset]) else {
            return Vec::new();
        };
        path.push(previous);
        cell = previous;
    }
    path.reverse();
    path
}

fn neighbors(cell: CellCoord, width: u32, height: u32) -> impl Iterator<Item = CellCoord> {
    let mut candidates = [None; 4];
    let mut count = 0;

    if let Some(row) = cell.row().checked_sub(1) {
        candidates[count] = Some(CellCoord::new(cell.column(), row));
        count += 1;
    }

    if let Some(column) = cell.column().checked_add(1) {
        if column < width {
            candidates[count] = Some(CellCoord::new(column, cell.row()));
            count += 1;
        }
    }

    if let Some(row) = cell.row().checked_add(1) {
        if row < height {
            candidates[count] = Some(CellCoord::new(cell.column(), row));
            count += 1;
        }
    }

    if let Some(column) = cell.column().checked_sub(1) {
        candidates[count] = Some(CellCoord::new(column, cell.row()));
        count += 1;
    }

    candidates.into_iter().take(count).flatten()
}

fn index(width: usize, cell: CellCoord) -> Option<usize> {
    let column = usize::try_from(cell.column()).ok()?;
    let row = usize::try_from(cell.row()).ok()?;
    row.checked_mul(width)?.checked_add(column)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: &[&[u8]]) -> WalkGrid {
        WalkGrid::from_rows(rows.iter().map(|row| row.to_vec()).collect()).expect("valid grid")
    }

    #[test]
    fn neighbors_follow_up_right_down_left_order() {
        let cells: Vec<_> = neighbors(CellCoord::new(1, 1), 3, 3).collect();
        assert_eq!(
            cells,
            vec![
                CellCoord::new(1, 0),
                CellCoord::new(2, 1),
                CellCoord::new(1, 2),
                CellCoord::new(0, 1),
            ]
        );
    }

    #[test]
    fn neighbors_skip_cells_outside_the_grid() {
        let cells: Vec<_> = neighbors(CellCoord::new(0, 0), 1, 1).collect();
        assert!(cells.is_empty());
    }

    #[test]
    fn start_and_end_pick_outer_cells() {
        let grid = grid(&[&[0, 1, 1], &[0, 1, 0], &[1, 1, 0]]);
        assert_eq!(
            find_start_and_end(&grid),
            Ok((CellCoord::new(1, 0), CellCoord::new(1, 2)))
        );
    }

    #[test]
    fn missing_start_is_reported_before_missing_end() {
        let grid = grid(&[&[0, 0], &[0, 0]]);
        assert_eq!(find_start_and_end(&grid), Err(ConfigError::MissingStart));

        let grid = self::grid(&[&[1, 0], &[0, 0]]);
        assert_eq!(find_start_and_end(&grid), Err(ConfigError::MissingEnd));
    }

    #[test]
    fn single_cell_path_when_start_equals_end() {
        let grid = grid(&[&[1]]);
        let cell = CellCoord::new(0, 0);
        assert_eq!(find_path(&grid, cell, cell), vec![cell]);
    }

    #[test]
    fn unwalkable_endpoints_yield_no_path() {
        let grid = grid(&[&[1, 0], &[1, 1]]);
        assert!(find_path(&grid, CellCoord::new(1, 0), CellCoord::new(1, 1)).is_empty());
        assert!(find_path(&grid, CellCoord::new(0, 0), CellCoord::new(5, 5)).is_empty());
    }

    #[test]
    fn open_field_ties_prefer_earlier_discoveries() {
        let grid = grid(&[&[1, 1], &[1, 1]]);
        let path = find_path(&grid, CellCoord::new(0, 0), CellCoord::new(1, 1));

        assert_eq!(
            path,
            vec![
                CellCoord::new(0, 0),
                CellCoord::new(1, 0),
                CellCoord::new(1, 1),
            ]
        );
    }
}
