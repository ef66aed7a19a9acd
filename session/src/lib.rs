#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Fixed-step simulation clock that pumps the Grid Defence systems.
//!
//! A [`Session`] owns the authoritative world together with every system and
//! advances them one tick at a time in a fixed order: queued requests, spawn,
//! monster advance, combat, projectiles, cleanup and the wave-clear check.
//! Everything observable leaves the session as [`Event`] values returned from
//! [`Session::tick`].

mod config;

use std::collections::VecDeque;

use grid_defence_core::{
    CellCoord, Command, EffectView, Event, Gold, MonsterView, ProjectileView, TowerId, TowerKind,
    TowerTarget, TowerView, WalkGrid,
};
use grid_defence_system_pathfinding::{find_path, find_start_and_end};
use grid_defence_system_projectiles::Projectiles;
use grid_defence_system_spawning::Spawning;
use grid_defence_system_tower_combat::TowerCombat;
use grid_defence_system_tower_targeting::TowerTargeting;
use grid_defence_world::{self as world, query, World};
use tracing::{debug, info};

pub use config::{Config, SessionError};
pub use grid_defence_core::PlacementError;

/// External request applied at the start of the next tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Request {
    /// Place a tower if the cell and balance allow it.
    PlaceTower {
        /// Cell the tower should occupy.
        cell: CellCoord,
        /// Kind of tower to build.
        kind: TowerKind,
        /// Gold available to the requester.
        balance: Gold,
    },
}

/// Owned read-only copy of everything a renderer needs for one frame.
#[derive(Clone, Debug)]
pub struct Snapshot {
    /// Index of the current wave, starting at 1.
    pub wave: u32,
    /// Whether the session waits for a level-up.
    pub paused: bool,
    /// Number of ticks simulated so far.
    pub tick: u64,
    /// Path monsters follow.
    pub path: Vec<CellCoord>,
    /// Monsters on the field.
    pub monsters: MonsterView,
    /// Placed towers.
    pub towers: TowerView,
    /// Projectiles in flight.
    pub projectiles: ProjectileView,
    /// Animating effects.
    pub effects: EffectView,
}

/// Deterministic Grid Defence simulation.
#[derive(Debug)]
pub struct Session {
    world: World,
    spawning: Spawning,
    targeting: TowerTargeting,
    combat: TowerCombat,
    projectiles: Projectiles,
    paused: bool,
    requests: VecDeque<Request>,
    outbox: Vec<Event>,
    targets: Vec<TowerTarget>,
    commands: Vec<Command>,
}

impl Session {
    /// Builds a session over the grid, computing the path before any tick.
    pub fn new(config: Config, grid: WalkGrid) -> Result<Self, SessionError> {
        let path = plan(&grid)?;
        let spawning = Spawning::new(grid_defence_system_spawning::Config::new(
            config.base_wave_size,
            config.base_spawn_interval_ticks,
            config.seed,
        ));

        let mut session = Self {
            world: World::new(grid),
            spawning,
            targeting: TowerTargeting::new(),
            combat: TowerCombat::new(),
            projectiles: Projectiles::new(),
            paused: false,
            requests: VecDeque::new(),
            outbox: Vec::new(),
            targets: Vec::new(),
            commands: Vec::new(),
        };
        session.install_path(path)?;
        info!(
            wave = session.spawning.wave(),
            budget = session.spawning.budget(),
            "session ready"
        );
        Ok(session)
    }

    /// Index of the current wave.
    #[must_use]
    pub fn wave(&self) -> u32 {
        self.spawning.wave()
    }

    /// Reports whether the session waits for [`Session::level_up`].
    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Number of ticks simulated so far.
    #[must_use]
    pub fn tick_index(&self) -> u64 {
        query::tick_index(&self.world)
    }

    /// Path monsters currently follow.
    #[must_use]
    pub fn path(&self) -> &[CellCoord] {
        query::path(&self.world)
    }

    /// Queues a request for the start of the next tick.
    pub fn submit(&mut self, request: Request) {
        self.requests.push_back(request);
    }

    /// Places a tower immediately.
    ///
    /// The resulting event is delivered with the next tick's events.
    pub fn place_tower(
        &mut self,
        cell: CellCoord,
        kind: TowerKind,
        balance: Gold,
    ) -> Result<TowerId, PlacementError> {
        world::place_tower(&mut self.world, kind, cell, balance, &mut self.outbox)
    }

    /// Starts the next wave. Only accepted while paused after a wave clear.
    pub fn level_up(&mut self) -> bool {
        if !self.paused {
            return false;
        }

        self.spawning.level_up();
        world::apply(&mut self.world, Command::ResetTowers, &mut self.outbox);
        self.paused = false;
        let wave = self.spawning.wave();
        info!(wave, budget = self.spawning.budget(), "level up");
        self.outbox.push(Event::WaveStarted { wave });
        true
    }

    /// Swaps the grid and recomputes the path.
    ///
    /// On failure the previous grid and path stay in place. Monsters keep
    /// walking their current leg and join the new path when they arrive.
    pub fn replace_grid(&mut self, grid: WalkGrid) -> Result<(), SessionError> {
        let path = plan(&grid)?;
        let previous = query::grid(&self.world).clone();
        self.world.replace_grid(grid);

        if let Err(error) = self.install_path(path) {
            self.world.replace_grid(previous);
            return Err(error);
        }
        Ok(())
    }

    /// Captures owned views of the current state.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            wave: self.spawning.wave(),
            paused: self.paused,
            tick: query::tick_index(&self.world),
            path: query::path(&self.world).to_vec(),
            monsters: query::monster_view(&self.world),
            towers: query::tower_view(&self.world),
            projectiles: query::projectile_view(&self.world),
            effects: query::effect_view(&self.world),
        }
    }

    /// Advances the simulation by one fixed step.
    ///
    /// Returns nothing while paused. Otherwise returns the events produced
    /// since the previous tick followed by this tick's events.
    pub fn tick(&mut self) -> Vec<Event> {
        if self.paused {
            return Vec::new();
        }

        let mut events = std::mem::take(&mut self.outbox);

        while let Some(request) = self.requests.pop_front() {
            self.apply_request(request, &mut events);
        }

        let tick_start = events.len();
        world::apply(&mut self.world, Command::Tick, &mut events);

        self.commands.clear();
        self.spawning.handle(&events[tick_start..], &mut self.commands);
        self.flush_commands(&mut events);

        world::apply(&mut self.world, Command::AdvanceMonsters, &mut events);

        let towers = query::tower_view(&self.world);
        let monsters = query::monster_view(&self.world);
        self.targeting.handle(&towers, &monsters, &mut self.targets);
        self.combat.handle(&towers, &self.targets, &mut self.commands);
        self.flush_commands(&mut events);

        let projectiles = query::projectile_view(&self.world);
        let monsters = query::monster_view(&self.world);
        self.projectiles
            .handle(&projectiles, &monsters, &mut self.commands);
        self.flush_commands(&mut events);

        world::apply(&mut self.world, Command::Cleanup, &mut events);

        if self.wave_is_clear() {
            self.paused = true;
            let wave = self.spawning.wave();
            info!(wave, tick = query::tick_index(&self.world), "wave cleared");
            events.push(Event::WaveCleared { wave });
        }

        events
    }

    fn apply_request(&mut self, request: Request, events: &mut Vec<Event>) {
        match request {
            Request::PlaceTower {
                cell,
                kind,
                balance,
            } => {
                debug!(?cell, ?kind, balance = balance.get(), "applying queued placement");
                world::apply(
                    &mut self.world,
                    Command::PlaceTower {
                        kind,
                        cell,
                        balance,
                    },
                    events,
                );
            }
        }
    }

    fn flush_commands(&mut self, events: &mut Vec<Event>) {
        for command in self.commands.drain(..) {
            world::apply(&mut self.world, command, events);
        }
    }

    fn wave_is_clear(&self) -> bool {
        self.spawning.is_exhausted()
            && query::monster_count(&self.world) == 0
            && query::effect_count(&self.world) == 0
            && query::projectile_count(&self.world) == 0
    }

    fn install_path(&mut self, path: Vec<CellCoord>) -> Result<(), SessionError> {
        let start = self.outbox.len();
        world::apply(&mut self.world, Command::SetPath { path }, &mut self.outbox);

        let rejection = self.outbox[start..].iter().find_map(|event| match event {
            Event::PathRejected { reason } => Some(*reason),
            _ => None,
        });
        match rejection {
            Some(reason) => {
                self.outbox.truncate(start);
                Err(SessionError::Path(reason))
            }
            None => Ok(()),
        }
    }
}

fn plan(grid: &WalkGrid) -> Result<Vec<CellCoord>, SessionError> {
    let (start, end) = find_start_and_end(grid)?;
    let path = find_path(grid, start, end);
    if path.is_empty() {
        return Err(SessionError::Config(
            grid_defence_core::ConfigError::NoPath { start, end },
        ));
    }
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corridor() -> WalkGrid {
        WalkGrid::from_rows(vec![vec![0, 1, 0]; 5]).expect("valid grid")
    }

    #[test]
    fn new_installs_the_planned_path() {
        let session = Session::new(Config::default(), corridor()).expect("session");
        assert_eq!(session.path().len(), 5);
        assert_eq!(session.path()[0], CellCoord::new(1, 0));
        assert_eq!(session.wave(), 1);
        assert!(!session.is_paused());
    }

    #[test]
    fn new_rejects_disconnected_grids() {
        let grid = WalkGrid::from_rows(vec![vec![1, 0], vec![0, 0], vec![0, 1]]).expect("grid");
        let error = Session::new(Config::default(), grid).expect_err("no path");
        assert_eq!(
            error,
            SessionError::Config(grid_defence_core::ConfigError::NoPath {
                start: CellCoord::new(0, 0),
                end: CellCoord::new(1, 2),
            })
        );
    }

    #[test]
    fn first_tick_reports_path_and_first_spawn() {
        let mut session = Session::new(Config::default(), corridor()).expect("session");
        let events = session.tick();

        assert_eq!(events[0], Event::PathChanged { length: 5 });
        assert!(events.contains(&Event::TimeAdvanced { tick: 1 }));
        assert!(events
            .iter()
            .any(|event| matches!(event, Event::MonsterSpawned { .. })));
    }

    #[test]
    fn level_up_is_refused_while_running() {
        let mut session = Session::new(Config::default(), corridor()).expect("session");
        assert!(!session.level_up());
        assert_eq!(session.wave(), 1);
    }
}
