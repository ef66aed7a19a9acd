#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that flies projectiles toward their aim points.

use grid_defence_core::{
    CellPoint, Command, DiscardReason, MonsterView, ProjectileSnapshot, ProjectileTarget,
    ProjectileView,
};

/// Distance from the aim point, in cells, at which a projectile hits.
pub const IMPACT_EPSILON: f32 = 0.2;

/// Distance, in cells, after which a projectile that has not hit is dropped.
pub const MAX_FLIGHT_DISTANCE: f32 = 24.0;

/// Projectile system that emits movement, impact and discard commands.
#[derive(Debug, Default)]
pub struct Projectiles;

impl Projectiles {
    /// Creates a new projectile system.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Moves every projectile one step and resolves those that arrived.
    ///
    /// Homing projectiles re-aim at their monster's current position and are
    /// discarded once the monster has left the field. Ballistic projectiles
    /// keep flying to the point chosen at launch.
    pub fn handle(
        &self,
        projectiles: &ProjectileView,
        monsters: &MonsterView,
        out: &mut Vec<Command>,
    ) {
        for projectile in projectiles.iter() {
            let Some(aim) = aim_point(projectile, monsters) else {
                out.push(Command::DiscardProjectile {
                    projectile: projectile.id,
                    reason: DiscardReason::TargetLost,
                });
                continue;
            };

            let (position, step) = projectile.position.step_toward(aim, projectile.speed);
            let travelled = projectile.travelled + step;
            out.push(Command::MoveProjectile {
                projectile: projectile.id,
                position,
                travelled,
            });

            if position.distance(aim) <= IMPACT_EPSILON {
                out.push(Command::ResolveProjectile {
                    projectile: projectile.id,
                });
            } else if travelled > MAX_FLIGHT_DISTANCE {
                out.push(Command::DiscardProjectile {
                    projectile: projectile.id,
                    reason: DiscardReason::FlightLimit,
                });
            }
        }
    }
}

fn aim_point(projectile: &ProjectileSnapshot, monsters: &MonsterView) -> Option<CellPoint> {
    match projectile.target {
        ProjectileTarget::Homing { monster } => monsters.get(monster).map(|target| target.position),
        ProjectileTarget::Ballistic { destination, .. } => Some(destination),
    }
}
