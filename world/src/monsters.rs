//! Monster motion along the path.

use grid_defence_core::{
    CellCoord, CellPoint, Direction, MonsterId, MonsterKind, MonsterSnapshot, PROGRESS_SCALE,
};

/// Point a monster is walking toward.
#[derive(Clone, Copy, Debug, PartialEq)]
enum Waypoint {
    /// A path cell, remembered with the index it held when chosen.
    Cell { index: usize, cell: CellCoord },
    /// The off-grid point one cell past the final path cell.
    Exit(CellPoint),
}

impl Waypoint {
    fn point(self) -> CellPoint {
        match self {
            Self::Cell { cell, .. } => cell.center(),
            Self::Exit(point) => point,
        }
    }
}

/// Monster stored inside the world.
#[derive(Clone, Debug)]
pub(crate) struct Monster {
    pub(crate) id: MonsterId,
    pub(crate) kind: MonsterKind,
    pub(crate) health: i32,
    origin: CellPoint,
    destination: Waypoint,
    progress: u32,
    escaped: bool,
}

impl Monster {
    /// Creates a monster one cell above the path entry, heading into it.
    pub(crate) fn spawn(id: MonsterId, kind: MonsterKind, path: &[CellCoord]) -> Option<Self> {
        let entry = *path.first()?;
        Some(Self {
            id,
            kind,
            health: kind.health(),
            origin: entry.center().offset(0.0, -1.0),
            destination: Waypoint::Cell {
                index: 0,
                cell: entry,
            },
            progress: 0,
            escaped: false,
        })
    }

    pub(crate) fn is_alive(&self) -> bool {
        self.health > 0
    }

    pub(crate) fn has_escaped(&self) -> bool {
        self.escaped
    }

    /// Exact position interpolated between the leg's endpoints.
    pub(crate) fn position(&self) -> CellPoint {
        let t = self.progress as f32 / PROGRESS_SCALE as f32;
        self.origin.lerp(self.destination.point(), t)
    }

    /// Advances along the current leg, switching legs on arrival.
    pub(crate) fn advance(&mut self, path: &[CellCoord]) {
        if self.escaped {
            return;
        }

        self.progress = self.progress.saturating_add(self.kind.speed());
        if self.progress < PROGRESS_SCALE {
            return;
        }

        self.progress = 0;
        match self.destination {
            Waypoint::Exit(_) => self.escaped = true,
            Waypoint::Cell { index, cell } => {
                self.origin = cell.center();
                self.destination = next_waypoint(path, index, cell);
            }
        }
    }

    pub(crate) fn snapshot(&self) -> MonsterSnapshot {
        MonsterSnapshot {
            id: self.id,
            kind: self.kind,
            position: self.position(),
            heading: Direction::between(self.origin, self.destination.point()),
            progress: self.progress,
            health: self.health,
        }
    }
}

/// Chooses the waypoint after `cell`, tolerating a path that changed since
/// the monster picked `cell` as its destination.
fn next_waypoint(path: &[CellCoord], index: usize, cell: CellCoord) -> Waypoint {
    let position = if path.get(index) == Some(&cell) {
        Some(index)
    } else {
        path.iter().position(|candidate| *candidate == cell)
    };

    match position {
        Some(current) => match path.get(current + 1) {
            Some(next) => Waypoint::Cell {
                index: current + 1,
                cell: *next,
            },
            None => Waypoint::Exit(cell.center().offset(0.0, 1.0)),
        },
        None => rejoin(path, cell),
    }
}

fn rejoin(path: &[CellCoord], cell: CellCoord) -> Waypoint {
    let nearest = path
        .iter()
        .copied()
        .enumerate()
        .min_by_key(|(index, candidate)| (candidate.manhattan_distance(cell), *index));

    match nearest {
        Some((index, candidate)) => Waypoint::Cell {
            index,
            cell: candidate,
        },
        None => Waypoint::Exit(cell.center().offset(0.0, 1.0)),
    }
}
