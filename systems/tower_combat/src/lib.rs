#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that drives the tower attack cycle and emits firing commands.
//!
//! Every tower walks `Idle → Preparing → Firing → Cooldown → Idle`. Windup
//! only accumulates while a monster is in range and holds otherwise. A tower
//! that completes its windup fires once and enters cooldown within the same
//! tick, so it can never fire twice without cooling down in between.

use grid_defence_core::{Command, TowerPhase, TowerSnapshot, TowerTarget, TowerView};
use grid_defence_system_tower_targeting::target_for;

/// Tower combat system that queues phase changes and firing commands.
#[derive(Debug, Default)]
pub struct TowerCombat {
    scratch: Vec<Command>,
}

impl TowerCombat {
    /// Creates a new tower combat system with empty scratch buffers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Advances every tower's attack phase by one tick.
    pub fn handle(
        &mut self,
        towers: &TowerView,
        tower_targets: &[TowerTarget],
        out: &mut Vec<Command>,
    ) {
        self.scratch.clear();

        for tower in towers.iter() {
            let target = target_for(tower_targets, tower.id);
            self.step(tower, target);
        }

        if self.scratch.is_empty() {
            return;
        }

        out.reserve(self.scratch.len());
        out.append(&mut self.scratch);
    }

    fn step(&mut self, tower: &TowerSnapshot, target: Option<&TowerTarget>) {
        let next = match (tower.phase, target) {
            (TowerPhase::Idle, None) => return,
            (TowerPhase::Idle, Some(_)) => TowerPhase::Preparing { windup: 0 },
            (TowerPhase::Preparing { .. }, None) => return,
            (TowerPhase::Preparing { windup }, Some(target)) => {
                let windup = windup.saturating_add(1);
                if windup >= tower.kind.windup_ticks() {
                    self.fire(tower, target);
                    TowerPhase::Cooldown {
                        remaining: tower.kind.cooldown_ticks(),
                    }
                } else {
                    TowerPhase::Preparing { windup }
                }
            }
            (TowerPhase::Firing, Some(target)) => {
                self.fire(tower, target);
                TowerPhase::Cooldown {
                    remaining: tower.kind.cooldown_ticks(),
                }
            }
            (TowerPhase::Firing, None) => TowerPhase::Idle,
            (TowerPhase::Cooldown { remaining }, _) => match remaining.saturating_sub(1) {
                0 => TowerPhase::Idle,
                remaining => TowerPhase::Cooldown { remaining },
            },
        };

        self.scratch.push(Command::SetTowerPhase {
            tower: tower.id,
            phase: next,
        });
    }

    fn fire(&mut self, tower: &TowerSnapshot, target: &TowerTarget) {
        self.scratch.push(Command::SetTowerPhase {
            tower: tower.id,
            phase: TowerPhase::Firing,
        });
        self.scratch.push(Command::FireProjectile {
            tower: tower.id,
            target: target.monster,
        });
    }
}
