#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that computes deterministic tower targets from world snapshots.

use grid_defence_core::{CellPoint, MonsterId, MonsterView, TowerId, TowerTarget, TowerView};

/// Tower targeting system that reuses scratch buffers to avoid repeated allocations.
#[derive(Debug, Default)]
pub struct TowerTargeting {
    monster_workspace: Vec<MonsterCandidate>,
}

impl TowerTargeting {
    /// Creates a new tower targeting system with empty scratch buffers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Computes tower targets for the provided world snapshot.
    ///
    /// A monster is in range when the Euclidean distance from the tower cell
    /// center to its exact position does not exceed the tower range. Each
    /// tower targets the first living monster in range in identifier order.
    /// Towers without a monster in range produce no entry. The output buffer
    /// is cleared before populating it with the latest assignments.
    pub fn handle(
        &mut self,
        towers: &TowerView,
        monsters: &MonsterView,
        out: &mut Vec<TowerTarget>,
    ) {
        out.clear();

        if towers.iter().next().is_none() || monsters.is_empty() {
            return;
        }

        self.prepare_monster_workspace(monsters);
        if self.monster_workspace.is_empty() {
            return;
        }

        for tower in towers.iter() {
            let center = tower.cell.center();
            let range = tower.kind.range();

            let candidate = self
                .monster_workspace
                .iter()
                .find(|candidate| center.distance(candidate.position) <= range);

            if let Some(candidate) = candidate {
                out.push(TowerTarget {
                    tower: tower.id,
                    monster: candidate.id,
                    tower_center: center,
                    monster_position: candidate.position,
                });
            }
        }
    }

    fn prepare_monster_workspace(&mut self, monsters: &MonsterView) {
        self.monster_workspace.clear();
        self.monster_workspace.reserve(monsters.len());

        for snapshot in monsters.iter().filter(|snapshot| snapshot.is_alive()) {
            self.monster_workspace.push(MonsterCandidate {
                id: snapshot.id,
                position: snapshot.position,
            });
        }
    }
}

/// Looks up the target assigned to a tower.
#[must_use]
pub fn target_for(targets: &[TowerTarget], tower: TowerId) -> Option<&TowerTarget> {
    targets.iter().find(|target| target.tower == tower)
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct MonsterCandidate {
    id: MonsterId,
    position: CellPoint,
}

#[cfg(test)]
mod tests {
    use super::*;
    use grid_defence_core::{
        CellCoord, Direction, MonsterKind, MonsterSnapshot, TowerKind, TowerPhase, TowerSnapshot,
    };

    fn tower_view(snapshots: Vec<TowerSnapshot>) -> TowerView {
        TowerView::from_snapshots(snapshots)
    }

    fn monster_view(snapshots: Vec<MonsterSnapshot>) -> MonsterView {
        MonsterView::from_snapshots(snapshots)
    }

    fn tower_snapshot(id: u32, kind: TowerKind, cell: (u32, u32)) -> TowerSnapshot {
        TowerSnapshot {
            id: TowerId::new(id),
            kind,
            cell: CellCoord::new(cell.0, cell.1),
            phase: TowerPhase::Idle,
        }
    }

    fn monster_snapshot(id: u32, position: (f32, f32), health: i32) -> MonsterSnapshot {
        MonsterSnapshot {
            id: MonsterId::new(id),
            kind: MonsterKind::Vampire,
            position: CellPoint::new(position.0, position.1),
            heading: Direction::South,
            progress: 0,
            health,
        }
    }

    #[test]
    fn targets_monster_within_range() {
        let mut system = TowerTargeting::new();
        let towers = tower_view(vec![tower_snapshot(1, TowerKind::Stone, (4, 4))]);
        let monsters = monster_view(vec![monster_snapshot(2, (4.0, 5.4), 100)]);

        let mut out = Vec::new();
        system.handle(&towers, &monsters, &mut out);

        assert_eq!(
            out,
            vec![TowerTarget {
                tower: TowerId::new(1),
                monster: MonsterId::new(2),
                tower_center: CellPoint::new(4.0, 4.0),
                monster_position: CellPoint::new(4.0, 5.4),
            }]
        );
    }

    #[test]
    fn monster_just_outside_range_is_ignored() {
        let mut system = TowerTargeting::new();
        let towers = tower_view(vec![tower_snapshot(1, TowerKind::Stone, (4, 4))]);
        let monsters = monster_view(vec![monster_snapshot(2, (4.0, 5.6), 100)]);

        let mut out = Vec::new();
        system.handle(&towers, &monsters, &mut out);

        assert!(out.is_empty());
    }

    #[test]
    fn range_boundary_is_inclusive() {
        let mut system = TowerTargeting::new();
        let towers = tower_view(vec![tower_snapshot(1, TowerKind::Spike, (0, 0))]);
        let monsters = monster_view(vec![monster_snapshot(3, (2.5, 0.0), 40)]);

        let mut out = Vec::new();
        system.handle(&towers, &monsters, &mut out);

        assert_eq!(out.len(), 1);
    }

    #[test]
    fn smaller_monster_id_is_preferred_over_nearer_monsters() {
        let mut system = TowerTargeting::new();
        let towers = tower_view(vec![tower_snapshot(1, TowerKind::Spike, (2, 2))]);
        let monsters = monster_view(vec![
            monster_snapshot(20, (2.0, 2.5), 100),
            monster_snapshot(10, (4.0, 2.0), 100),
        ]);

        let mut out = Vec::new();
        system.handle(&towers, &monsters, &mut out);

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].monster, MonsterId::new(10));
    }

    #[test]
    fn dead_monsters_are_skipped() {
        let mut system = TowerTargeting::new();
        let towers = tower_view(vec![tower_snapshot(1, TowerKind::Spike, (2, 2))]);
        let monsters = monster_view(vec![
            monster_snapshot(1, (2.0, 3.0), 0),
            monster_snapshot(2, (2.0, 1.0), 15),
        ]);

        let mut out = Vec::new();
        system.handle(&towers, &monsters, &mut out);

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].monster, MonsterId::new(2));
    }

    #[test]
    fn each_tower_uses_its_own_range() {
        let mut system = TowerTargeting::new();
        let towers = tower_view(vec![
            tower_snapshot(1, TowerKind::Stone, (0, 0)),
            tower_snapshot(2, TowerKind::Spike, (0, 0)),
        ]);
        let monsters = monster_view(vec![monster_snapshot(5, (2.0, 0.0), 100)]);

        let mut out = Vec::new();
        system.handle(&towers, &monsters, &mut out);

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].tower, TowerId::new(2));
        assert!(target_for(&out, TowerId::new(1)).is_none());
        assert!(target_for(&out, TowerId::new(2)).is_some());
    }

    #[test]
    fn empty_collections_produce_no_targets() {
        let mut system = TowerTargeting::new();
        let towers = tower_view(Vec::new());
        let monsters = monster_view(vec![monster_snapshot(1, (1.0, 1.0), 100)]);

        let mut out = Vec::new();
        system.handle(&towers, &monsters, &mut out);
        assert!(out.is_empty());

        let towers = tower_view(vec![tower_snapshot(1, TowerKind::Stone, (1, 1))]);
        let monsters = monster_view(Vec::new());
        system.handle(&towers, &monsters, &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn output_is_replaced_on_every_call() {
        let mut system = TowerTargeting::new();
        let towers = tower_view(vec![tower_snapshot(1, TowerKind::Stone, (0, 0))]);
        let near = monster_view(vec![monster_snapshot(1, (1.0, 0.0), 100)]);
        let far = monster_view(vec![monster_snapshot(1, (9.0, 0.0), 100)]);

        let mut out = Vec::new();
        system.handle(&towers, &near, &mut out);
        assert_eq!(out.len(), 1);

        system.handle(&towers, &far, &mut out);
        assert!(out.is_empty(), "monster that walked away should not be targeted");
    }
}
