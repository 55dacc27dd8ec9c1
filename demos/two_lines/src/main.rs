//! two_lines: smallest end-to-end run of the metro transit simulator.
//!
//! Two lines share one interchange.  Passengers appear on a fixed rotation,
//! so every run with the same policy produces the same state hash.
//!
//! ```text
//! cargo run -p two_lines -- shortest_remaining_hops
//! RUST_LOG=mt_sim=debug cargo run -p two_lines
//! ```

mod network;

use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use mt_core::{StationType, Tick};
use mt_policy::PolicyKind;
use mt_sim::{Failure, SimBuilder, SimCommand, SimObserver, TickReport};

use network::build_network;

// ── Constants ─────────────────────────────────────────────────────────────────

const TOTAL_TICKS:      u64   = 400;
const SPAWN_EVERY:      u64   = 3;     // one passenger every 3 ticks
const STATION_CAPACITY: usize = 8;
const TRAIN_CAPACITY:   usize = 4;
const TRAIN_SPEED:      f32   = 0.5;   // two MOVING ticks per hop

/// `(station index into Network::stations, destination)`, cycled.
const SPAWN_ROTATION: [(usize, StationType); 6] = [
    (0, StationType::Square),
    (3, StationType::Circle),
    (2, StationType::Star),
    (4, StationType::Square),
    (1, StationType::Circle),
    (0, StationType::Star),
];

// ── Observer ──────────────────────────────────────────────────────────────────

#[derive(Default)]
struct Tally {
    delivered:   u64,
    boarded:     u64,
    transferred: u64,
    failure:     Option<Failure>,
}

impl SimObserver for Tally {
    fn on_tick_end(&mut self, report: &TickReport) {
        self.delivered   += report.completed as u64;
        self.boarded     += report.boarded as u64;
        self.transferred += report.transferred as u64;
    }

    fn on_failure(&mut self, failure: &Failure) {
        warn!(tick = %failure.tick, station = %failure.station, kind = ?failure.kind, "network failed");
        self.failure = Some(*failure);
    }

    fn on_run_end(&mut self, final_tick: Tick, completed: u64) {
        info!(%final_tick, completed, "run finished");
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let policy: PolicyKind = match std::env::args().nth(1) {
        Some(arg) => arg.parse().context("first argument must name a boarding policy")?,
        None => PolicyKind::default(),
    };

    println!("=== two_lines: metro transit simulator ===");
    println!("Ticks: {TOTAL_TICKS}  |  Policy: {policy}  |  Spawn every {SPAWN_EVERY} ticks");
    println!();

    // 1. Engine and network.
    let mut sim = SimBuilder::new()
        .station_capacity(STATION_CAPACITY)
        .train_capacity(TRAIN_CAPACITY)
        .train_speed(TRAIN_SPEED)
        .boarding_policy(policy)
        .build_simulation()?;
    let net = build_network(sim.engine_mut())?;
    println!(
        "Network: {} stations, {} lines",
        sim.engine().station_count(),
        sim.engine().line_count()
    );

    // 2. One train per line, started on the first drain.
    for line in net.lines {
        sim.enqueue(SimCommand::AddTrain { line, capacity: None, speed: None, start: true });
    }

    // 3. Run.
    let mut tally = Tally::default();
    let mut rotation = SPAWN_ROTATION.iter().cycle();
    let t0 = Instant::now();
    for tick in 0..TOTAL_TICKS {
        if tick % SPAWN_EVERY == 0 {
            if let Some(&(i, destination)) = rotation.next() {
                sim.enqueue(SimCommand::SpawnPassenger { station: net.stations[i], destination });
            }
        }
        sim.step(&mut tally)?;
        if tally.failure.is_some() {
            break;
        }
    }
    tally.on_run_end(sim.current_tick(), sim.engine().completed());
    let elapsed = t0.elapsed();

    // 4. Summary.
    println!("Simulation complete in {:.3} ms", elapsed.as_secs_f64() * 1e3);
    println!("  delivered   : {}", tally.delivered);
    println!("  boarded     : {}", tally.boarded);
    println!("  transferred : {}", tally.transferred);
    match tally.failure {
        Some(f) => println!("  failed      : {} at {} ({:?})", f.station, f.tick, f.kind),
        None => println!("  failed      : no"),
    }
    println!("  state hash  : {:016x}", sim.state_hash());
    println!();

    // 5. Station queues.
    let snap = sim.snapshot();
    println!("{:<14} {:<9} {:>7}", "Station", "Kind", "Waiting");
    println!("{}", "-".repeat(32));
    for station in &snap.stations {
        println!(
            "{:<14} {:<9} {:>4}/{}",
            station.id.to_string(),
            station.kind.as_str(),
            station.waiting,
            station.capacity
        );
    }
    println!();

    // 6. Trains.
    println!("{:<10} {:<10} {:<12} {:>7}", "Train", "State", "Heading", "Onboard");
    println!("{}", "-".repeat(42));
    for train in &snap.trains {
        println!(
            "{:<10} {:<10} {:<12} {:>4}/{}",
            train.id.to_string(),
            format!("{:?}", train.state),
            train.next_station.to_string(),
            train.onboard,
            train.capacity
        );
    }

    Ok(())
}
