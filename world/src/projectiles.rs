//! Projectiles in flight.

use grid_defence_core::{
    CellPoint, Guidance, ProjectileId, ProjectileSnapshot, ProjectileTarget, TowerId,
};

use crate::{monsters::Monster, towers::TowerState};

#[derive(Clone, Debug)]
pub(crate) struct Projectile {
    pub(crate) id: ProjectileId,
    pub(crate) tower: TowerId,
    pub(crate) target: ProjectileTarget,
    pub(crate) position: CellPoint,
    pub(crate) speed: f32,
    pub(crate) damage: u32,
    pub(crate) travelled: f32,
    pub(crate) spent: bool,
}

impl Projectile {
    /// Launches a projectile from the tower's cell center.
    pub(crate) fn launch(id: ProjectileId, tower: &TowerState, target: &Monster) -> Self {
        let target = match tower.kind.guidance() {
            Guidance::Homing => ProjectileTarget::Homing { monster: target.id },
            Guidance::Ballistic => ProjectileTarget::Ballistic {
                monster: target.id,
                destination: target.position(),
            },
        };

        Self {
            id,
            tower: tower.id,
            target,
            position: tower.cell.center(),
            speed: tower.kind.projectile_speed(),
            damage: tower.kind.projectile_damage(),
            travelled: 0.0,
            spent: false,
        }
    }

    pub(crate) fn snapshot(&self) -> ProjectileSnapshot {
        ProjectileSnapshot {
            id: self.id,
            tower: self.tower,
            target: self.target,
            position: self.position,
            speed: self.speed,
            damage: self.damage,
            travelled: self.travelled,
        }
    }
}
