//! `mt-sim`: the discrete-time engine of the metro transit simulator.
//!
//! # Tick
//!
//! ```text
//! Simulation::step():
//!   ① Drain    : queued SimCommands, FIFO, each applied completely.
//!   ② Trains   : in creation order, each advances one dwell phase:
//!                   ALIGHTING → complete, stay aboard, or transfer
//!                   BOARDING  → rank queue by policy, admit boardable
//!                   MOVING    → progress += speed, arrive at ≥ 1
//!   ③ Aging    : every passenger in a station queue ages by one.
//!   ④ Check    : full invariant check (with `check_invariants`).
//! ```
//!
//! # Outcomes
//!
//! | Outcome            | Surface                                         |
//! |--------------------|-------------------------------------------------|
//! | usage error        | `Err(SimError)`, `kind() == Usage`, no change    |
//! | protocol violation | `Err(SimError)`, `kind() == Protocol`, halted    |
//! | network failure    | `is_failed()`, `failure()`, later ticks inert    |
//!
//! # Cargo features
//!
//! | Feature | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives on `SimConfig`, `SimCommand`, `Snapshot`, `Failure`. |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use mt_core::StationType;
//! use mt_sim::{NoopObserver, SimBuilder, SimCommand};
//!
//! let mut sim = SimBuilder::new().build_simulation()?;
//! let engine = sim.engine_mut();
//! let a = engine.add_station(StationType::Circle)?;
//! let b = engine.add_station(StationType::Square)?;
//! let line = engine.add_line()?;
//! engine.add_station_to_line(line, a, None)?;
//! engine.add_station_to_line(line, b, None)?;
//! sim.enqueue(SimCommand::AddTrain { line, capacity: None, speed: None, start: true });
//! sim.enqueue(SimCommand::SpawnPassenger { station: a, destination: StationType::Square });
//! sim.run_ticks(4, &mut NoopObserver)?;
//! assert_eq!(sim.engine().completed(), 1);
//! ```

pub mod builder;
pub mod command;
pub mod config;
pub mod engine;
pub mod error;
pub mod observer;
pub mod simulation;
pub mod snapshot;

mod dwell;
mod hash;
mod invariants;


pub use builder::SimBuilder;
pub use command::{CommandOutcome, SimCommand};
pub use config::SimConfig;
pub use engine::{Engine, Failure, FailureKind, SpawnOutcome, TickReport};
pub use error::{ErrorKind, SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use simulation::{DrainReport, Simulation};
pub use snapshot::{LineView, PassengerView, Snapshot, StationView, TrainView};
