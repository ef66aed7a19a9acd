#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Grid Defence engine.
//!
//! This crate defines the message surface that connects the session clock,
//! the authoritative world, and pure systems. The session submits [`Command`]
//! values describing desired mutations, the world executes those commands via
//! its `apply` entry point, and then reports [`Event`] values that systems and
//! collaborators react to. Systems consume immutable views and respond
//! exclusively with new command batches.

mod grid;

pub use grid::{ConfigError, WalkGrid};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fixed-point denominator for monster tile progress.
///
/// A monster with speed `100` covers one tenth of a cell per tick and needs
/// exactly ten ticks per cell, free of floating point drift.
pub const PROGRESS_SCALE: u32 = 1_000;

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Replaces the path monsters follow without moving monsters in flight.
    SetPath {
        /// Ordered cells from the entry cell to the exit cell.
        path: Vec<CellCoord>,
    },
    /// Advances the world's logical clock by one tick.
    Tick,
    /// Creates a monster just outside the grid above the path entry.
    SpawnMonster {
        /// Kind of monster to create.
        kind: MonsterKind,
    },
    /// Moves every monster along its current leg by its speed.
    AdvanceMonsters,
    /// Requests placement of a tower on a buildable cell.
    PlaceTower {
        /// Kind of tower to construct.
        kind: TowerKind,
        /// Cell the tower will occupy.
        cell: CellCoord,
        /// Gold available to the requester.
        balance: Gold,
    },
    /// Stores a new attack phase for a tower.
    SetTowerPhase {
        /// Tower whose phase changes.
        tower: TowerId,
        /// Phase the tower enters.
        phase: TowerPhase,
    },
    /// Launches one projectile from a tower at a monster.
    FireProjectile {
        /// Tower that fires.
        tower: TowerId,
        /// Monster the projectile is aimed at.
        target: MonsterId,
    },
    /// Stores the new position of a projectile in flight.
    MoveProjectile {
        /// Projectile that moved.
        projectile: ProjectileId,
        /// Position after moving.
        position: CellPoint,
        /// Total distance flown since launch.
        travelled: f32,
    },
    /// Applies a projectile's damage to its target and marks it spent.
    ResolveProjectile {
        /// Projectile that reached its aim point.
        projectile: ProjectileId,
    },
    /// Marks a projectile spent without applying damage.
    DiscardProjectile {
        /// Projectile to discard.
        projectile: ProjectileId,
        /// Why the projectile is discarded.
        reason: DiscardReason,
    },
    /// Removes dead and escaped monsters, ages effects and drops spent
    /// projectiles.
    Cleanup,
    /// Forces every tower back to [`TowerPhase::Idle`].
    ResetTowers,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Event {
    /// Indicates that the logical clock advanced.
    TimeAdvanced {
        /// Index of the tick that just started.
        tick: u64,
    },
    /// Confirms that the world adopted a new path.
    PathChanged {
        /// Number of cells in the new path.
        length: usize,
    },
    /// Reports that a proposed path violated the path invariant.
    PathRejected {
        /// Specific reason the path was refused.
        reason: PathError,
    },
    /// Confirms that a monster entered the field.
    MonsterSpawned {
        /// Identifier assigned to the monster.
        monster: MonsterId,
        /// Kind of the spawned monster.
        kind: MonsterKind,
        /// First path cell the monster walks toward.
        entry: CellCoord,
    },
    /// Reports that a monster's health dropped to zero.
    MonsterKilled {
        /// Identifier of the removed monster.
        monster: MonsterId,
        /// Gold granted for the kill.
        reward: Gold,
        /// Exact position at the time of death.
        position: CellPoint,
    },
    /// Reports that a monster walked past the final path cell.
    LifeLost {
        /// Identifier of the escaped monster.
        monster: MonsterId,
    },
    /// Confirms that a tower was placed.
    TowerPlaced {
        /// Identifier assigned to the tower.
        tower: TowerId,
        /// Kind of the tower.
        kind: TowerKind,
        /// Cell occupied by the tower.
        cell: CellCoord,
        /// Gold the requester must deduct.
        cost: Gold,
    },
    /// Reports that a placement request was refused.
    TowerPlacementRejected {
        /// Kind of tower requested.
        kind: TowerKind,
        /// Cell requested.
        cell: CellCoord,
        /// Specific reason the placement failed.
        reason: PlacementError,
    },
    /// Reports that a tower moved to another attack phase.
    TowerPhaseChanged {
        /// Tower whose phase changed.
        tower: TowerId,
        /// Phase the tower entered.
        phase: TowerPhase,
    },
    /// Confirms that a tower launched a projectile.
    ProjectileFired {
        /// Identifier assigned to the projectile.
        projectile: ProjectileId,
        /// Tower that fired.
        tower: TowerId,
        /// Monster the projectile is aimed at.
        target: MonsterId,
    },
    /// Reports that a projectile hit a live monster.
    ProjectileImpacted {
        /// Projectile that hit.
        projectile: ProjectileId,
        /// Monster that took the damage.
        monster: MonsterId,
        /// Damage subtracted from the monster's health.
        damage: u32,
    },
    /// Reports that a projectile ended without applying damage.
    ProjectileDiscarded {
        /// Projectile that was dropped.
        projectile: ProjectileId,
        /// Why the projectile was dropped.
        reason: DiscardReason,
    },
    /// Reports that a cosmetic effect finished its animation.
    EffectExpired {
        /// Effect that finished.
        effect: EffectId,
    },
    /// Reports that the current wave is over and the session paused.
    WaveCleared {
        /// Index of the cleared wave.
        wave: u32,
    },
    /// Reports that a new wave started after a level-up.
    WaveStarted {
        /// Index of the new wave.
        wave: u32,
    },
}

/// Amount of in-game currency.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Gold(u32);

impl Gold {
    /// Creates a gold amount.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric amount.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Adds two amounts, clamping at the numeric bound.
    #[must_use]
    pub const fn saturating_add(self, other: Gold) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    /// Subtracts an amount, clamping at zero.
    #[must_use]
    pub const fn saturating_sub(self, other: Gold) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

macro_rules! entity_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(
            Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        pub struct $name(u32);

        impl $name {
            /// Creates a new identifier with the provided numeric value.
            #[must_use]
            pub const fn new(value: u32) -> Self {
                Self(value)
            }

            /// Retrieves the numeric representation of the identifier.
            #[must_use]
            pub const fn get(&self) -> u32 {
                self.0
            }
        }
    };
}

entity_id!(
    /// Unique identifier assigned to a monster. Identifiers grow with spawn
    /// order, so ordering by id is the store's iteration order.
    MonsterId
);
entity_id!(
    /// Unique identifier assigned to a tower.
    TowerId
);
entity_id!(
    /// Unique identifier assigned to a projectile.
    ProjectileId
);
entity_id!(
    /// Unique identifier assigned to a cosmetic effect.
    EffectId
);

/// Location of a single grid cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Computes the Manhattan distance between two cell coordinates.
    #[must_use]
    pub fn manhattan_distance(self, other: CellCoord) -> u32 {
        self.column().abs_diff(other.column()) + self.row().abs_diff(other.row())
    }

    /// Reports whether the two cells share an edge.
    #[must_use]
    pub fn is_adjacent(self, other: CellCoord) -> bool {
        self.manhattan_distance(other) == 1
    }

    /// Center of the cell as a continuous point.
    #[must_use]
    pub fn center(self) -> CellPoint {
        CellPoint::new(self.column as f32, self.row as f32)
    }
}

/// Continuous position measured in cell units. Integer coordinates sit on
/// cell centers; points may lie outside the grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CellPoint {
    x: f32,
    y: f32,
}

impl CellPoint {
    /// Creates a point from column (`x`) and row (`y`) coordinates.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Horizontal coordinate in cells.
    #[must_use]
    pub const fn x(&self) -> f32 {
        self.x
    }

    /// Vertical coordinate in cells.
    #[must_use]
    pub const fn y(&self) -> f32 {
        self.y
    }

    /// Euclidean distance between two points.
    #[must_use]
    pub fn distance(self, other: CellPoint) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Linear interpolation toward `other`; `t = 0` yields `self`.
    #[must_use]
    pub fn lerp(self, other: CellPoint, t: f32) -> Self {
        Self {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
        }
    }

    /// Moves toward `target` by at most `max_step`, never overshooting.
    ///
    /// Returns the new point together with the distance actually covered.
    #[must_use]
    pub fn step_toward(self, target: CellPoint, max_step: f32) -> (Self, f32) {
        let distance = self.distance(target);
        if distance <= max_step || distance <= f32::EPSILON {
            return (target, distance);
        }

        let scale = max_step / distance;
        let next = Self {
            x: self.x + (target.x - self.x) * scale,
            y: self.y + (target.y - self.y) * scale,
        };
        (next, max_step)
    }

    /// Offsets the point by whole cells.
    #[must_use]
    pub fn offset(self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Cardinal facing used by collaborators to pick sprite rows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    North,
    /// Movement toward increasing column indices.
    East,
    /// Movement toward increasing row indices.
    South,
    /// Movement toward decreasing column indices.
    West,
}

impl Direction {
    /// Facing when travelling from `from` to `to`.
    ///
    /// Horizontal movement wins over vertical movement. Identical points
    /// yield [`Direction::South`], the direction monsters enter the grid.
    #[must_use]
    pub fn between(from: CellPoint, to: CellPoint) -> Self {
        if to.x() > from.x() {
            Self::East
        } else if to.x() < from.x() {
            Self::West
        } else if to.y() < from.y() {
            Self::North
        } else {
            Self::South
        }
    }
}

/// Types of monsters that walk the path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MonsterKind {
    /// Sturdy walker that forms the bulk of every wave.
    Vampire,
    /// Fast, fragile flier mixed into later waves.
    Bat,
}

impl MonsterKind {
    /// Health a freshly spawned monster starts with.
    #[must_use]
    pub const fn health(self) -> i32 {
        match self {
            Self::Vampire => 100,
            Self::Bat => 40,
        }
    }

    /// Tile progress gained per tick, in [`PROGRESS_SCALE`] units.
    #[must_use]
    pub const fn speed(self) -> u32 {
        match self {
            Self::Vampire => 50,
            Self::Bat => 100,
        }
    }

    /// Gold granted when the monster dies.
    #[must_use]
    pub const fn reward(self) -> Gold {
        match self {
            Self::Vampire => Gold::new(10),
            Self::Bat => Gold::new(5),
        }
    }
}

/// How a tower's projectiles pick their aim point.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Guidance {
    /// Re-aims at the target's current position every tick.
    Homing,
    /// Flies to the target's position at launch and never re-aims.
    Ballistic,
}

/// Types of towers that can be constructed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TowerKind {
    /// Short-ranged tower lobbing stones at a fixed point.
    Stone,
    /// Long-ranged tower shooting homing spikes.
    Spike,
}

impl TowerKind {
    /// Every constructible kind, in declaration order.
    pub const ALL: [TowerKind; 2] = [TowerKind::Stone, TowerKind::Spike];

    /// Targeting radius measured in cells from the tower's cell center.
    #[must_use]
    pub const fn range(self) -> f32 {
        match self {
            Self::Stone => 1.5,
            Self::Spike => 2.5,
        }
    }

    /// Gold required to build the tower.
    #[must_use]
    pub const fn cost(self) -> Gold {
        match self {
            Self::Stone => Gold::new(20),
            Self::Spike => Gold::new(30),
        }
    }

    /// Ticks of windup a tower accumulates before firing.
    #[must_use]
    pub const fn windup_ticks(self) -> u32 {
        match self {
            Self::Stone => 4,
            Self::Spike => 6,
        }
    }

    /// Ticks a tower spends in cooldown after firing.
    #[must_use]
    pub const fn cooldown_ticks(self) -> u32 {
        match self {
            Self::Stone => 32,
            Self::Spike => 48,
        }
    }

    /// Distance a projectile covers per tick, in cells.
    #[must_use]
    pub const fn projectile_speed(self) -> f32 {
        match self {
            Self::Stone => 0.1,
            Self::Spike => 0.2,
        }
    }

    /// Damage dealt by one projectile.
    #[must_use]
    pub const fn projectile_damage(self) -> u32 {
        match self {
            Self::Stone => 10,
            Self::Spike => 20,
        }
    }

    /// Aiming policy for the tower's projectiles.
    #[must_use]
    pub const fn guidance(self) -> Guidance {
        match self {
            Self::Stone => Guidance::Ballistic,
            Self::Spike => Guidance::Homing,
        }
    }
}

/// Attack phase of a tower.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TowerPhase {
    /// Scanning for monsters in range.
    #[default]
    Idle,
    /// Winding up while a monster stays in range.
    Preparing {
        /// Ticks of windup accumulated so far.
        windup: u32,
    },
    /// Releasing a projectile; left within the same tick.
    Firing,
    /// Recovering after a shot; no targeting occurs.
    Cooldown {
        /// Ticks left before returning to idle.
        remaining: u32,
    },
}

/// Aim point of a projectile.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum ProjectileTarget {
    /// Follows the monster wherever it goes.
    Homing {
        /// Monster being tracked.
        monster: MonsterId,
    },
    /// Flies to a fixed point and damages the aimed monster on landing.
    Ballistic {
        /// Monster the projectile was aimed at.
        monster: MonsterId,
        /// Point the projectile flies to.
        destination: CellPoint,
    },
}

impl ProjectileTarget {
    /// Monster whose health the projectile affects.
    #[must_use]
    pub const fn monster(&self) -> MonsterId {
        match self {
            Self::Homing { monster } | Self::Ballistic { monster, .. } => *monster,
        }
    }
}

/// Why a projectile ended without damage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiscardReason {
    /// The tracked monster left the field before impact.
    TargetLost,
    /// The projectile flew further than any legitimate shot.
    FlightLimit,
    /// The projectile landed after its target had already died.
    TargetDead,
}

/// Cosmetic effects spawned by gameplay.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectKind {
    /// Burst left behind by a dying monster.
    Explosion,
}

impl EffectKind {
    /// Ticks each animation frame stays on screen.
    #[must_use]
    pub const fn frame_duration_ticks(self) -> u32 {
        match self {
            Self::Explosion => 2,
        }
    }

    /// Number of frames in the animation.
    #[must_use]
    pub const fn frame_count(self) -> u32 {
        match self {
            Self::Explosion => 3,
        }
    }

    /// Total ticks the effect lives.
    #[must_use]
    pub const fn lifetime_ticks(self) -> u32 {
        self.frame_duration_ticks() * self.frame_count()
    }
}

/// Reasons a tower placement request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
pub enum PlacementError {
    /// The requested cell lies outside the grid.
    #[error("cell lies outside the grid")]
    OutOfBounds,
    /// The requested cell is part of the path.
    #[error("cell is part of the monster path")]
    NotBuildable,
    /// Another tower already stands on the cell.
    #[error("cell already holds a tower")]
    Occupied,
    /// The requester cannot afford the tower.
    #[error("insufficient gold for the tower")]
    InsufficientFunds,
}

/// Reasons a proposed path may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
pub enum PathError {
    /// The path holds no cells.
    #[error("path is empty")]
    Empty,
    /// Two consecutive cells do not share an edge.
    #[error("path cells {index} and {} are not adjacent", .index + 1)]
    Discontinuous {
        /// Index of the first cell of the broken pair.
        index: usize,
    },
    /// A path cell is not walkable.
    #[error("path cell {cell:?} is not walkable")]
    NotWalkable {
        /// Offending cell.
        cell: CellCoord,
    },
}

/// Immutable representation of a single monster used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MonsterSnapshot {
    /// Unique identifier assigned to the monster.
    pub id: MonsterId,
    /// Kind of the monster.
    pub kind: MonsterKind,
    /// Exact interpolated position.
    pub position: CellPoint,
    /// Facing along the current leg.
    pub heading: Direction,
    /// Progress along the current leg in [`PROGRESS_SCALE`] units.
    pub progress: u32,
    /// Remaining health; zero or below means the monster is dead.
    pub health: i32,
}

impl MonsterSnapshot {
    /// Reports whether the monster still has health left.
    #[must_use]
    pub const fn is_alive(&self) -> bool {
        self.health > 0
    }
}

/// Read-only snapshot describing all monsters on the field.
#[derive(Clone, Debug, Default)]
pub struct MonsterView {
    snapshots: Vec<MonsterSnapshot>,
}

impl MonsterView {
    /// Creates a new monster view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<MonsterSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured snapshots in store order.
    pub fn iter(&self) -> impl Iterator<Item = &MonsterSnapshot> {
        self.snapshots.iter()
    }

    /// Looks up a monster by identifier.
    #[must_use]
    pub fn get(&self, id: MonsterId) -> Option<&MonsterSnapshot> {
        self.snapshots
            .binary_search_by_key(&id, |snapshot| snapshot.id)
            .ok()
            .map(|index| &self.snapshots[index])
    }

    /// Number of monsters captured.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether no monsters were captured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<MonsterSnapshot> {
        self.snapshots
    }
}

/// Immutable representation of a single tower used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TowerSnapshot {
    /// Identifier allocated to the tower by the world.
    pub id: TowerId,
    /// Kind of tower that was constructed.
    pub kind: TowerKind,
    /// Cell occupied by the tower.
    pub cell: CellCoord,
    /// Current attack phase.
    pub phase: TowerPhase,
}

/// Read-only snapshot describing all towers placed on the grid.
#[derive(Clone, Debug, Default)]
pub struct TowerView {
    snapshots: Vec<TowerSnapshot>,
}

impl TowerView {
    /// Creates a new tower view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<TowerSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured tower snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &TowerSnapshot> {
        self.snapshots.iter()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<TowerSnapshot> {
        self.snapshots
    }
}

/// Monster a tower would shoot at this tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TowerTarget {
    /// Tower that has a monster in range.
    pub tower: TowerId,
    /// First living monster in range, in identifier order.
    pub monster: MonsterId,
    /// Center of the tower cell.
    pub tower_center: CellPoint,
    /// Exact monster position used for the range test.
    pub monster_position: CellPoint,
}

/// Immutable representation of a projectile used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectileSnapshot {
    /// Identifier allocated to the projectile.
    pub id: ProjectileId,
    /// Tower that fired the projectile.
    pub tower: TowerId,
    /// Aim point of the projectile.
    pub target: ProjectileTarget,
    /// Current position.
    pub position: CellPoint,
    /// Distance covered per tick.
    pub speed: f32,
    /// Damage applied on impact.
    pub damage: u32,
    /// Distance flown since launch.
    pub travelled: f32,
}

/// Read-only snapshot describing all projectiles in flight.
#[derive(Clone, Debug, Default)]
pub struct ProjectileView {
    snapshots: Vec<ProjectileSnapshot>,
}

impl ProjectileView {
    /// Creates a new projectile view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<ProjectileSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured snapshots in launch order.
    pub fn iter(&self) -> impl Iterator<Item = &ProjectileSnapshot> {
        self.snapshots.iter()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<ProjectileSnapshot> {
        self.snapshots
    }
}

/// Immutable representation of a cosmetic effect.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EffectSnapshot {
    /// Identifier allocated to the effect.
    pub id: EffectId,
    /// Kind of effect.
    pub kind: EffectKind,
    /// Where the effect plays.
    pub position: CellPoint,
    /// Animation frame to draw.
    pub frame: u32,
}

/// Read-only snapshot describing all animating effects.
#[derive(Clone, Debug, Default)]
pub struct EffectView {
    snapshots: Vec<EffectSnapshot>,
}

impl EffectView {
    /// Creates a new effect view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<EffectSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured snapshots.
    pub fn iter(&self) -> impl Iterator<Item = &EffectSnapshot> {
        self.snapshots.iter()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<EffectSnapshot> {
        self.snapshots
    }
}
