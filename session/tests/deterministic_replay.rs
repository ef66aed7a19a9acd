use std::{
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
};

use grid_defence_core::{CellCoord, Event, Gold, TowerKind, WalkGrid};
use grid_defence_session::{Config, Request, Session};

fn serpentine() -> WalkGrid {
    WalkGrid::from_rows(vec![
        vec![1, 1, 1, 1, 1, 1],
        vec![0, 0, 0, 0, 0, 1],
        vec![1, 1, 1, 1, 1, 1],
        vec![1, 0, 0, 0, 0, 0],
        vec![1, 1, 1, 1, 1, 1],
    ])
    .expect("valid serpentine")
}

fn replay(config: Config, waves: u32) -> Vec<Event> {
    let mut session = Session::new(config, serpentine()).expect("session");
    let placements = [
        (CellCoord::new(1, 1), TowerKind::Spike),
        (CellCoord::new(3, 1), TowerKind::Stone),
        (CellCoord::new(2, 3), TowerKind::Spike),
        (CellCoord::new(4, 3), TowerKind::Stone),
    ];
    for (cell, kind) in placements {
        session.submit(Request::PlaceTower {
            cell,
            kind,
            balance: Gold::new(1_000),
        });
    }

    let mut log = Vec::new();
    for _ in 0..waves {
        for _ in 0..2_000 {
            log.extend(session.tick());
            if session.is_paused() {
                break;
            }
        }
        let _ = session.level_up();
    }
    log
}

fn fingerprint(events: &[Event]) -> u64 {
    let bytes = bincode::serialize(events).expect("events serialise");
    let mut hasher = DefaultHasher::new();
    bytes.hash(&mut hasher);
    hasher.finish()
}

#[test]
fn identical_inputs_replay_identically() {
    let config = Config {
        seed: 0x5eed,
        ..Config::default()
    };
    let first = replay(config, 3);
    let second = replay(config, 3);

    assert_eq!(first.len(), second.len());
    assert_eq!(fingerprint(&first), fingerprint(&second));
    assert_eq!(first, second);
    assert_eq!(
        first
            .iter()
            .filter(|event| matches!(event, Event::WaveCleared { .. }))
            .count(),
        3
    );
}

#[test]
fn event_log_survives_serialisation() {
    let log = replay(Config::default(), 1);
    let bytes = bincode::serialize(&log).expect("events serialise");
    let decoded: Vec<Event> = bincode::deserialize(&bytes).expect("events deserialise");

    assert_eq!(decoded, log);
}

#[test]
fn seed_changes_the_roster_after_the_first_wave() {
    let spawned_kinds = |seed| {
        replay(
            Config {
                seed,
                ..Config::default()
            },
            3,
        )
        .into_iter()
        .filter_map(|event| match event {
            Event::MonsterSpawned { kind, .. } => Some(kind),
            _ => None,
        })
        .collect::<Vec<_>>()
    };

    let first = spawned_kinds(1);
    let second = spawned_kinds(2);
    assert_eq!(first.len(), second.len());
    assert_eq!(first[..10], second[..10]);
    assert_ne!(first, second);
}
