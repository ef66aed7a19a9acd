#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic wave scheduler responsible for emitting monster spawn commands.

use grid_defence_core::{Command, Event, MonsterKind};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Highest share of bats in a wave, in tenths.
const MAX_BAT_TENTHS: u32 = 5;

/// Configuration parameters required to construct the spawning system.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    /// Monsters spawned in wave 1; wave `n` spawns `n` times as many.
    pub base_wave_size: u32,
    /// Ticks between spawns in wave 1; wave `n` waits `1/n` as long.
    pub base_spawn_interval_ticks: u32,
    /// Seed for the roster generator.
    pub rng_seed: u64,
}

impl Config {
    /// Creates a new configuration using the provided wave shape and seed.
    #[must_use]
    pub const fn new(base_wave_size: u32, base_spawn_interval_ticks: u32, rng_seed: u64) -> Self {
        Self {
            base_wave_size,
            base_spawn_interval_ticks,
            rng_seed,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(10, 32, 0)
    }
}

/// Pure system that deterministically emits spawn commands for the current wave.
#[derive(Debug)]
pub struct Spawning {
    config: Config,
    wave: u32,
    budget: u32,
    spawned: u32,
    interval: u32,
    ticks_since_spawn: u32,
    rng: ChaCha8Rng,
}

impl Spawning {
    /// Creates a new spawning system positioned at wave 1.
    #[must_use]
    pub fn new(config: Config) -> Self {
        let mut spawning = Self {
            config,
            wave: 1,
            budget: 0,
            spawned: 0,
            interval: 1,
            ticks_since_spawn: 0,
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
        };
        spawning.start_wave();
        spawning
    }

    /// Index of the current wave, starting at 1.
    #[must_use]
    pub fn wave(&self) -> u32 {
        self.wave
    }

    /// Total number of monsters the current wave spawns.
    #[must_use]
    pub fn budget(&self) -> u32 {
        self.budget
    }

    /// Ticks between consecutive spawns in the current wave.
    #[must_use]
    pub fn interval(&self) -> u32 {
        self.interval
    }

    /// Reports whether the current wave has spawned every monster.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.spawned >= self.budget
    }

    /// Advances to the next wave, scaling the budget and shrinking the interval.
    pub fn level_up(&mut self) {
        self.wave = self.wave.saturating_add(1);
        self.start_wave();
    }

    /// Consumes tick events and emits at most one spawn command per tick.
    pub fn handle(&mut self, events: &[Event], out: &mut Vec<Command>) {
        let ticks = events
            .iter()
            .filter(|event| matches!(event, Event::TimeAdvanced { .. }))
            .count();

        for _ in 0..ticks {
            if self.is_exhausted() {
                return;
            }

            if self.ticks_since_spawn >= self.interval {
                let kind = self.next_kind();
                out.push(Command::SpawnMonster { kind });
                self.spawned += 1;
                self.ticks_since_spawn = 0;
            }
            self.ticks_since_spawn = self.ticks_since_spawn.saturating_add(1);
        }
    }

    fn start_wave(&mut self) {
        self.budget = self.config.base_wave_size.saturating_mul(self.wave);
        self.interval = (self.config.base_spawn_interval_ticks / self.wave).max(1);
        self.spawned = 0;
        self.ticks_since_spawn = self.interval;
    }

    fn next_kind(&mut self) -> MonsterKind {
        let bat_tenths = self.wave.saturating_sub(1).min(MAX_BAT_TENTHS);
        if bat_tenths > 0 && self.rng.gen_ratio(bat_tenths, 10) {
            MonsterKind::Bat
        } else {
            MonsterKind::Vampire
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tick(spawning: &mut Spawning) -> Vec<Command> {
        let mut out = Vec::new();
        spawning.handle(&[Event::TimeAdvanced { tick: 0 }], &mut out);
        out
    }

    #[test]
    fn first_tick_spawns_immediately() {
        let mut spawning = Spawning::new(Config::default());
        assert_eq!(
            tick(&mut spawning),
            vec![Command::SpawnMonster {
                kind: MonsterKind::Vampire,
            }]
        );
    }

    #[test]
    fn spawns_are_spaced_by_the_interval() {
        let mut spawning = Spawning::new(Config::default());
        let spawn_ticks: Vec<_> = (0..100)
            .filter(|_| !tick(&mut spawning).is_empty())
            .collect();

        assert_eq!(spawn_ticks, vec![0, 32, 64, 96]);
    }

    #[test]
    fn wave_stops_after_budget() {
        let mut spawning = Spawning::new(Config::new(3, 1, 7));
        let spawned: usize = (0..10).map(|_| tick(&mut spawning).len()).sum();

        assert_eq!(spawned, 3);
        assert!(spawning.is_exhausted());
    }

    #[test]
    fn ignores_events_without_time() {
        let mut spawning = Spawning::new(Config::default());
        let mut out = Vec::new();
        spawning.handle(&[Event::WaveStarted { wave: 2 }], &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn level_up_scales_budget_and_interval() {
        let mut spawning = Spawning::new(Config::default());
        assert_eq!((spawning.budget(), spawning.interval()), (10, 32));

        spawning.level_up();
        assert_eq!(spawning.wave(), 2);
        assert_eq!((spawning.budget(), spawning.interval()), (20, 16));
        assert!(!spawning.is_exhausted());
        assert_eq!(tick(&mut spawning).len(), 1);

        for _ in 0..40 {
            spawning.level_up();
        }
        assert_eq!(spawning.interval(), 1);
    }

    #[test]
    fn first_wave_is_all_vampires_and_later_waves_mix_in_bats() {
        let mut spawning = Spawning::new(Config::new(10, 1, 42));
        let first: Vec<_> = (0..10).flat_map(|_| tick(&mut spawning)).collect();
        assert!(first.iter().all(|command| matches!(
            command,
            Command::SpawnMonster {
                kind: MonsterKind::Vampire
            }
        )));

        for _ in 0..5 {
            spawning.level_up();
        }
        let later: Vec<_> = (0..60).flat_map(|_| tick(&mut spawning)).collect();
        assert_eq!(later.len(), 60);
        assert!(later.iter().any(|command| matches!(
            command,
            Command::SpawnMonster {
                kind: MonsterKind::Bat
            }
        )));
    }

    #[test]
    fn same_seed_yields_same_roster() {
        let run = |seed| {
            let mut spawning = Spawning::new(Config::new(20, 1, seed));
            spawning.level_up();
            (0..40).flat_map(|_| tick(&mut spawning)).collect::<Vec<_>>()
        };

        assert_eq!(run(9), run(9));
    }
}
