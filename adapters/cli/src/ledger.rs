//! Player resources tracked from session events.

use grid_defence_core::{Event, Gold, TowerKind};

/// Gold and lives of the headless player.
///
/// Gold promised to a queued placement is reserved until the session
/// confirms or rejects it, so several placements in one tick cannot
/// overspend.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Ledger {
    gold: Gold,
    reserved: Gold,
    lives: u32,
}

impl Ledger {
    pub(crate) fn new(gold: Gold, lives: u32) -> Self {
        Self {
            gold,
            reserved: Gold::default(),
            lives,
        }
    }

    pub(crate) fn gold(&self) -> Gold {
        self.gold
    }

    pub(crate) fn lives(&self) -> u32 {
        self.lives
    }

    /// Gold not yet promised to a pending placement.
    pub(crate) fn available(&self) -> Gold {
        self.gold.saturating_sub(self.reserved)
    }

    /// Earmarks the cost of a tower about to be requested.
    pub(crate) fn reserve(&mut self, kind: TowerKind) {
        self.reserved = self.reserved.saturating_add(kind.cost());
    }

    pub(crate) fn is_defeated(&self) -> bool {
        self.lives == 0
    }

    pub(crate) fn apply(&mut self, event: &Event) {
        match event {
            Event::MonsterKilled { reward, .. } => self.gold = self.gold.saturating_add(*reward),
            Event::LifeLost { .. } => self.lives = self.lives.saturating_sub(1),
            Event::TowerPlaced { cost, .. } => {
                self.gold = self.gold.saturating_sub(*cost);
                self.reserved = self.reserved.saturating_sub(*cost);
            }
            Event::TowerPlacementRejected { kind, .. } => {
                self.reserved = self.reserved.saturating_sub(kind.cost());
            }
            _ => {}
        }
    }
}
