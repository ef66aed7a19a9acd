#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Grid Defence.
//!
//! The world exclusively owns every monster, tower, projectile and effect.
//! It changes only through [`apply`], which executes one [`Command`] and
//! reports what happened as [`Event`] values.

mod effects;
mod monsters;
mod projectiles;
mod towers;

use grid_defence_core::{
    CellCoord, Command, DiscardReason, EffectId, EffectKind, Event, Gold, MonsterId, MonsterKind,
    PathError, PlacementError, ProjectileId, TowerId, TowerKind, TowerPhase, WalkGrid,
};
use tracing::{debug, info, warn};

use self::{effects::Effect, monsters::Monster, projectiles::Projectile, towers::TowerRegistry};

/// Represents the authoritative Grid Defence world state.
#[derive(Debug)]
pub struct World {
    grid: WalkGrid,
    path: Vec<CellCoord>,
    monsters: Vec<Monster>,
    towers: TowerRegistry,
    projectiles: Vec<Projectile>,
    effects: Vec<Effect>,
    next_monster_id: u32,
    next_projectile_id: u32,
    next_effect_id: u32,
    tick_index: u64,
}

impl World {
    /// Creates an empty world over the provided grid. Monsters cannot spawn
    /// until a path is installed through [`Command::SetPath`].
    #[must_use]
    pub fn new(grid: WalkGrid) -> Self {
        Self {
            grid,
            path: Vec::new(),
            monsters: Vec::new(),
            towers: TowerRegistry::new(),
            projectiles: Vec::new(),
            effects: Vec::new(),
            next_monster_id: 0,
            next_projectile_id: 0,
            next_effect_id: 0,
            tick_index: 0,
        }
    }

    /// Swaps in a new grid. Towers keep their cells; the caller installs the
    /// matching path afterwards.
    pub fn replace_grid(&mut self, grid: WalkGrid) {
        self.grid = grid;
    }

    fn monster(&self, id: MonsterId) -> Option<&Monster> {
        self.monsters
            .binary_search_by_key(&id, |monster| monster.id)
            .ok()
            .map(|index| &self.monsters[index])
    }

    fn monster_mut(&mut self, id: MonsterId) -> Option<&mut Monster> {
        self.monsters
            .binary_search_by_key(&id, |monster| monster.id)
            .ok()
            .map(|index| &mut self.monsters[index])
    }

    fn projectile_mut(&mut self, id: ProjectileId) -> Option<&mut Projectile> {
        self.projectiles
            .binary_search_by_key(&id, |projectile| projectile.id)
            .ok()
            .map(|index| &mut self.projectiles[index])
    }

    fn validate_path(&self, path: &[CellCoord]) -> Result<(), PathError> {
        if path.is_empty() {
            return Err(PathError::Empty);
        }

        if let Some(cell) = path.iter().find(|cell| !self.grid.is_walkable(**cell)) {
            return Err(PathError::NotWalkable { cell: *cell });
        }

        if let Some(index) = path
            .windows(2)
            .position(|pair| !pair[0].is_adjacent(pair[1]))
        {
            return Err(PathError::Discontinuous { index });
        }

        Ok(())
    }

    fn validate_placement(
        &self,
        kind: TowerKind,
        cell: CellCoord,
        balance: Gold,
    ) -> Result<(), PlacementError> {
        if !self.grid.contains(cell) {
            return Err(PlacementError::OutOfBounds);
        }
        if !self.grid.is_buildable(cell) {
            return Err(PlacementError::NotBuildable);
        }
        if self.towers.at(cell).is_some() {
            return Err(PlacementError::Occupied);
        }
        if balance < kind.cost() {
            return Err(PlacementError::InsufficientFunds);
        }
        Ok(())
    }

    fn spawn_monster(&mut self, kind: MonsterKind, out_events: &mut Vec<Event>) {
        let id = MonsterId::new(self.next_monster_id);
        let Some(monster) = Monster::spawn(id, kind, &self.path) else {
            warn!(?kind, "spawn ignored: no path installed");
            return;
        };

        self.next_monster_id = self.next_monster_id.saturating_add(1);
        let entry = self.path[0];
        self.monsters.push(monster);
        debug!(monster = id.get(), ?kind, "monster spawned");
        out_events.push(Event::MonsterSpawned {
            monster: id,
            kind,
            entry,
        });
    }

    fn fire_projectile(
        &mut self,
        tower: TowerId,
        target: MonsterId,
        out_events: &mut Vec<Event>,
    ) {
        let Some(tower_state) = self.towers.get(tower) else {
            return;
        };
        let Some(monster) = self
            .monster(target)
            .filter(|monster| monster.is_alive() && !monster.has_escaped())
        else {
            debug!(tower = tower.get(), target = target.get(), "fire ignored: target gone");
            return;
        };

        let id = ProjectileId::new(self.next_projectile_id);
        let projectile = Projectile::launch(id, tower_state, monster);
        self.next_projectile_id = self.next_projectile_id.saturating_add(1);
        self.projectiles.push(projectile);
        debug!(
            projectile = id.get(),
            tower = tower.get(),
            target = target.get(),
            "projectile fired"
        );
        out_events.push(Event::ProjectileFired {
            projectile: id,
            tower,
            target,
        });
    }

    fn resolve_projectile(&mut self, id: ProjectileId, out_events: &mut Vec<Event>) {
        let Some(projectile) = self.projectile_mut(id) else {
            return;
        };
        if projectile.spent {
            return;
        }
        projectile.spent = true;
        let monster_id = projectile.target.monster();
        let damage = projectile.damage;

        let outcome = match self.monster_mut(monster_id) {
            Some(monster) if monster.has_escaped() => Err(DiscardReason::TargetLost),
            Some(monster) if !monster.is_alive() => Err(DiscardReason::TargetDead),
            Some(monster) => {
                let applied = i32::try_from(damage).unwrap_or(i32::MAX);
                monster.health = monster.health.saturating_sub(applied);
                Ok(())
            }
            None => Err(DiscardReason::TargetLost),
        };

        match outcome {
            Ok(()) => {
                debug!(projectile = id.get(), monster = monster_id.get(), damage, "impact");
                out_events.push(Event::ProjectileImpacted {
                    projectile: id,
                    monster: monster_id,
                    damage,
                });
            }
            Err(reason) => out_events.push(Event::ProjectileDiscarded {
                projectile: id,
                reason,
            }),
        }
    }

    fn cleanup(&mut self, out_events: &mut Vec<Event>) {
        let existing_effects = self.effects.len();
        let mut survivors = Vec::with_capacity(self.monsters.len());

        for monster in self.monsters.drain(..) {
            if !monster.is_alive() {
                let position = monster.position();
                let reward = monster.kind.reward();
                let effect = EffectId::new(self.next_effect_id);
                self.next_effect_id = self.next_effect_id.saturating_add(1);
                self.effects
                    .push(Effect::new(effect, EffectKind::Explosion, position));
                out_events.push(Event::MonsterKilled {
                    monster: monster.id,
                    reward,
                    position,
                });
            } else if monster.has_escaped() {
                out_events.push(Event::LifeLost { monster: monster.id });
            } else {
                survivors.push(monster);
            }
        }
        self.monsters = survivors;

        for effect in &mut self.effects[..existing_effects] {
            effect.age();
        }
        self.effects.retain(|effect| {
            if effect.is_expired() {
                out_events.push(Event::EffectExpired { effect: effect.id });
                false
            } else {
                true
            }
        });

        self.projectiles.retain(|projectile| !projectile.spent);
    }
}

/// Places a tower, reporting the outcome both as an event and to the caller.
///
/// Behaves exactly like applying [`Command::PlaceTower`].
pub fn place_tower(
    world: &mut World,
    kind: TowerKind,
    cell: CellCoord,
    balance: Gold,
    out_events: &mut Vec<Event>,
) -> Result<TowerId, PlacementError> {
    match world.validate_placement(kind, cell, balance) {
        Ok(()) => {
            let tower = world.towers.insert(kind, cell);
            let cost = kind.cost();
            info!(tower = tower.get(), ?kind, ?cell, cost = cost.get(), "tower placed");
            out_events.push(Event::TowerPlaced {
                tower,
                kind,
                cell,
                cost,
            });
            Ok(tower)
        }
        Err(reason) => {
            debug!(?kind, ?cell, %reason, "tower placement rejected");
            out_events.push(Event::TowerPlacementRejected { kind, cell, reason });
            Err(reason)
        }
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::SetPath { path } => match world.validate_path(&path) {
            Ok(()) => {
                let length = path.len();
                world.path = path;
                out_events.push(Event::PathChanged { length });
            }
            Err(reason) => {
                warn!(%reason, "path rejected");
                out_events.push(Event::PathRejected { reason });
            }
        },
        Command::Tick => {
            world.tick_index = world.tick_index.saturating_add(1);
            out_events.push(Event::TimeAdvanced {
                tick: world.tick_index,
            });
        }
        Command::SpawnMonster { kind } => world.spawn_monster(kind, out_events),
        Command::AdvanceMonsters => {
            let World { monsters, path, .. } = world;
            for monster in monsters.iter_mut() {
                monster.advance(path);
            }
        }
        Command::PlaceTower {
            kind,
            cell,
            balance,
        } => {
            let _ = place_tower(world, kind, cell, balance, out_events);
        }
        Command::SetTowerPhase { tower, phase } => {
            if let Some(state) = world.towers.get_mut(tower) {
                if state.phase != phase {
                    state.phase = phase;
                    out_events.push(Event::TowerPhaseChanged { tower, phase });
                }
            }
        }
        Command::FireProjectile { tower, target } => {
            world.fire_projectile(tower, target, out_events);
        }
        Command::MoveProjectile {
            projectile,
            position,
            travelled,
        } => {
            if let Some(state) = world.projectile_mut(projectile) {
                if !state.spent {
                    state.position = position;
                    state.travelled = travelled;
                }
            }
        }
        Command::ResolveProjectile { projectile } => {
            world.resolve_projectile(projectile, out_events);
        }
        Command::DiscardProjectile { projectile, reason } => {
            if let Some(state) = world.projectile_mut(projectile) {
                if !state.spent {
                    state.spent = true;
                    out_events.push(Event::ProjectileDiscarded { projectile, reason });
                }
            }
        }
        Command::Cleanup => world.cleanup(out_events),
        Command::ResetTowers => {
            for state in world.towers.iter_mut() {
                if state.phase != TowerPhase::Idle {
                    state.phase = TowerPhase::Idle;
                    out_events.push(Event::TowerPhaseChanged {
                        tower: state.id,
                        phase: TowerPhase::Idle,
                    });
                }
            }
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use grid_defence_core::{
        CellCoord, EffectView, MonsterView, ProjectileView, TowerId, TowerView, WalkGrid,
    };

    use super::World;

    /// Provides read-only access to the walkability grid.
    #[must_use]
    pub fn grid(world: &World) -> &WalkGrid {
        &world.grid
    }

    /// Path monsters currently follow.
    #[must_use]
    pub fn path(world: &World) -> &[CellCoord] {
        &world.path
    }

    /// Number of ticks processed so far.
    #[must_use]
    pub fn tick_index(world: &World) -> u64 {
        world.tick_index
    }

    /// Captures monsters still on the field, including those killed this
    /// tick but not yet cleaned up. Escaped monsters are excluded.
    #[must_use]
    pub fn monster_view(world: &World) -> MonsterView {
        MonsterView::from_snapshots(
            world
                .monsters
                .iter()
                .filter(|monster| !monster.has_escaped())
                .map(|monster| monster.snapshot())
                .collect(),
        )
    }

    /// Captures every tower with its attack phase.
    #[must_use]
    pub fn tower_view(world: &World) -> TowerView {
        TowerView::from_snapshots(world.towers.iter().map(|tower| tower.snapshot()).collect())
    }

    /// Captures projectiles that are still in flight.
    #[must_use]
    pub fn projectile_view(world: &World) -> ProjectileView {
        ProjectileView::from_snapshots(
            world
                .projectiles
                .iter()
                .filter(|projectile| !projectile.spent)
                .map(|projectile| projectile.snapshot())
                .collect(),
        )
    }

    /// Captures animating effects.
    #[must_use]
    pub fn effect_view(world: &World) -> EffectView {
        EffectView::from_snapshots(world.effects.iter().map(|effect| effect.snapshot()).collect())
    }

    /// Tower standing on the cell, if any.
    #[must_use]
    pub fn tower_at(world: &World, cell: CellCoord) -> Option<TowerId> {
        world.towers.at(cell)
    }

    /// Number of monsters held by the store, escaped or not.
    #[must_use]
    pub fn monster_count(world: &World) -> usize {
        world.monsters.len()
    }

    /// Number of projectiles held by the store, spent or not.
    #[must_use]
    pub fn projectile_count(world: &World) -> usize {
        world.projectiles.len()
    }

    /// Number of animating effects.
    #[must_use]
    pub fn effect_count(world: &World) -> usize {
        world.effects.len()
    }
}
