#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs Grid Defence headless at a fixed tick rate.

mod grid_file;
mod ledger;
mod script;
mod settings;

use std::{
    path::PathBuf,
    thread,
    time::{Duration, Instant},
};

use anyhow::{Context, Result};
use clap::Parser;
use grid_defence_core::{Event, Gold};
use grid_defence_session::{Request, Session};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use self::{ledger::Ledger, script::Script, settings::Settings};

/// Command-line arguments accepted by the driver.
#[derive(Debug, Parser)]
#[command(name = "grid-defence", about = "Run a Grid Defence simulation headless")]
struct CliArgs {
    /// Walkability grid; `1`/`#` is path, `0`/`.` is buildable.
    #[arg(long, value_name = "PATH")]
    grid: PathBuf,
    /// TOML file with `[session]` and `[driver]` tables.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Tower placements, one `tick column row kind` per line.
    #[arg(long, value_name = "PATH")]
    script: Option<PathBuf>,
    /// Stop after this many ticks, overriding the config file.
    #[arg(long, value_name = "COUNT")]
    ticks: Option<u64>,
    /// Ticks per second, overriding the config file; 0 runs unthrottled.
    #[arg(long, value_name = "FPS")]
    fps: Option<f64>,
    /// Log filter used when `RUST_LOG` is unset.
    #[arg(long, value_name = "LEVEL", default_value = "info")]
    log: String,
}

/// Entry point for the Grid Defence command-line interface.
fn main() -> Result<()> {
    let args = CliArgs::parse();
    init_tracing(&args.log);
    run(args)
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn run(args: CliArgs) -> Result<()> {
    let mut settings = Settings::load(args.config.as_deref())?;
    if let Some(ticks) = args.ticks {
        settings.driver.max_ticks = ticks;
    }
    if let Some(fps) = args.fps {
        settings.driver.fps = fps;
    }

    let grid = grid_file::load(&args.grid)?;
    let mut script = Script::load(args.script.as_deref())?;
    let mut session = Session::new(settings.session, grid).context("failed to start session")?;
    let mut ledger = Ledger::new(
        Gold::new(settings.driver.starting_gold),
        settings.driver.starting_lives,
    );

    let frame = frame_duration(settings.driver.fps);
    let mut next_frame = Instant::now();

    while session.tick_index() < settings.driver.max_ticks {
        if session.is_paused() {
            if !settings.driver.auto_level_up {
                info!(wave = session.wave(), "wave cleared, stopping");
                break;
            }
            let _ = session.level_up();
        }

        for placement in script.due(session.tick_index() + 1) {
            let balance = ledger.available();
            ledger.reserve(placement.kind);
            session.submit(Request::PlaceTower {
                cell: placement.cell,
                kind: placement.kind,
                balance,
            });
        }

        for event in session.tick() {
            ledger.apply(&event);
            log_event(&event);
        }

        if ledger.is_defeated() {
            warn!(wave = session.wave(), tick = session.tick_index(), "no lives left");
            break;
        }

        if let Some(frame) = frame {
            next_frame += frame;
            let now = Instant::now();
            if next_frame > now {
                thread::sleep(next_frame - now);
            } else {
                next_frame = now;
            }
        }
    }

    println!(
        "wave {} | tick {} | gold {} | lives {}",
        session.wave(),
        session.tick_index(),
        ledger.gold().get(),
        ledger.lives()
    );
    Ok(())
}

fn frame_duration(fps: f64) -> Option<Duration> {
    (fps.is_finite() && fps > 0.0).then(|| Duration::from_secs_f64(1.0 / fps))
}

fn log_event(event: &Event) {
    match event {
        Event::TowerPlacementRejected { kind, cell, reason } => {
            warn!(?kind, ?cell, %reason, "scripted placement rejected");
        }
        Event::LifeLost { monster } => info!(monster = monster.get(), "monster escaped"),
        Event::TimeAdvanced { .. } => {}
        other => debug!(event = ?other, "session event"),
    }
}
