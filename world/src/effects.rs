//! Cosmetic effects with a fixed frame animation.

use grid_defence_core::{CellPoint, EffectId, EffectKind, EffectSnapshot};

#[derive(Clone, Debug)]
pub(crate) struct Effect {
    pub(crate) id: EffectId,
    kind: EffectKind,
    position: CellPoint,
    elapsed: u32,
}

impl Effect {
    pub(crate) fn new(id: EffectId, kind: EffectKind, position: CellPoint) -> Self {
        Self {
            id,
            kind,
            position,
            elapsed: 0,
        }
    }

    /// Advances the animation by one tick.
    pub(crate) fn age(&mut self) {
        self.elapsed = self.elapsed.saturating_add(1);
    }

    pub(crate) fn is_expired(&self) -> bool {
        self.elapsed >= self.kind.lifetime_ticks()
    }

    fn frame(&self) -> u32 {
        let frame = self.elapsed / self.kind.frame_duration_ticks().max(1);
        frame.min(self.kind.frame_count().saturating_sub(1))
    }

    pub(crate) fn snapshot(&self) -> EffectSnapshot {
        EffectSnapshot {
            id: self.id,
            kind: self.kind,
            position: self.position,
            frame: self.frame(),
        }
    }
}
