//! Authoritative tower state management utilities.

use std::collections::BTreeMap;

use grid_defence_core::{CellCoord, TowerId, TowerKind, TowerPhase, TowerSnapshot};

/// Tower stored inside the world.
#[derive(Clone, Debug)]
pub(crate) struct TowerState {
    /// Identifier allocated by the world for the tower.
    pub(crate) id: TowerId,
    /// Kind of tower that was constructed.
    pub(crate) kind: TowerKind,
    /// Cell occupied by the tower.
    pub(crate) cell: CellCoord,
    /// Current attack phase.
    pub(crate) phase: TowerPhase,
}

impl TowerState {
    pub(crate) fn snapshot(&self) -> TowerSnapshot {
        TowerSnapshot {
            id: self.id,
            kind: self.kind,
            cell: self.cell,
            phase: self.phase,
        }
    }
}

/// Registry that stores towers and manages identifier allocation.
#[derive(Debug)]
pub(crate) struct TowerRegistry {
    entries: BTreeMap<TowerId, TowerState>,
    cells: BTreeMap<CellCoord, TowerId>,
    next_tower_id: TowerId,
}

impl TowerRegistry {
    /// Creates an empty tower registry with a reset identifier counter.
    pub(crate) fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
            cells: BTreeMap::new(),
            next_tower_id: TowerId::new(0),
        }
    }

    /// Tower standing on the cell, if any.
    pub(crate) fn at(&self, cell: CellCoord) -> Option<TowerId> {
        self.cells.get(&cell).copied()
    }

    /// Stores a new idle tower and returns its identifier.
    pub(crate) fn insert(&mut self, kind: TowerKind, cell: CellCoord) -> TowerId {
        let id = self.next_tower_id;
        self.next_tower_id = TowerId::new(id.get().saturating_add(1));
        let _ = self.cells.insert(cell, id);
        let _ = self.entries.insert(
            id,
            TowerState {
                id,
                kind,
                cell,
                phase: TowerPhase::Idle,
            },
        );
        id
    }

    pub(crate) fn get(&self, id: TowerId) -> Option<&TowerState> {
        self.entries.get(&id)
    }

    pub(crate) fn get_mut(&mut self, id: TowerId) -> Option<&mut TowerState> {
        self.entries.get_mut(&id)
    }

    /// Towers in identifier order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = &TowerState> {
        self.entries.values()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut TowerState> {
        self.entries.values_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_starts_empty_with_zero_identifier() {
        let registry = TowerRegistry::new();
        assert!(registry.entries.is_empty());
        assert_eq!(registry.next_tower_id.get(), 0);
    }

    #[test]
    fn insert_allocates_sequential_identifiers_and_indexes_cells() {
        let mut registry = TowerRegistry::new();
        let first = registry.insert(TowerKind::Stone, CellCoord::new(1, 1));
        let second = registry.insert(TowerKind::Spike, CellCoord::new(4, 2));

        assert_eq!(first, TowerId::new(0));
        assert_eq!(second, TowerId::new(1));
        assert_eq!(registry.at(CellCoord::new(4, 2)), Some(second));
        assert_eq!(registry.at(CellCoord::new(0, 0)), None);
    }

    #[test]
    fn new_towers_start_idle() {
        let mut registry = TowerRegistry::new();
        let id = registry.insert(TowerKind::Stone, CellCoord::new(1, 2));
        let state = registry.get(id).expect("tower stored");

        assert_eq!(state.phase, TowerPhase::Idle);
        assert_eq!(state.snapshot().cell, CellCoord::new(1, 2));
    }
}
