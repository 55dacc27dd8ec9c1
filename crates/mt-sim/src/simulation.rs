//! `Simulation`: an engine behind a command queue and a tick clock.
//!
//! # Step
//!
//! ```text
//! step():
//!   ① Drain  : apply every queued command in FIFO order; rejections are
//!               logged and reported, never fatal.
//!   ② Tick   : exactly one `Engine::tick`, wrapped in observer hooks.
//! ```
//!
//! Commands therefore never interleave with phase processing.  Hosts with a
//! frame loop call [`Simulation::advance`] with each frame's elapsed time
//! instead of calling `step` directly.

use std::collections::VecDeque;
use std::time::Duration;

use mt_core::{TickClock, Tick};
use mt_network::{BfsRouter, Router};
use tracing::{debug, warn};

use crate::{
    CommandOutcome, Engine, SimCommand, SimError, SimObserver, SimResult, Snapshot, TickReport,
};

/// Results of one [`Simulation::drain_commands`] call, in queue order.
#[derive(Debug, Default)]
pub struct DrainReport {
    pub applied:  Vec<CommandOutcome>,
    pub rejected: Vec<(SimCommand, SimError)>,
}

pub struct Simulation<R: Router = BfsRouter> {
    engine: Engine<R>,
    queue:  VecDeque<SimCommand>,
    clock:  TickClock,
}

impl<R: Router> Simulation<R> {
    pub fn new(engine: Engine<R>) -> SimResult<Self> {
        let clock = TickClock::new(engine.config.tick_duration)
            .map_err(|e| SimError::Config(e.to_string()))?;
        Ok(Self { engine, queue: VecDeque::new(), clock })
    }

    pub fn engine(&self) -> &Engine<R> {
        &self.engine
    }

    /// Direct access, bypassing the queue.
    pub fn engine_mut(&mut self) -> &mut Engine<R> {
        &mut self.engine
    }

    // ── Commands ──────────────────────────────────────────────────────────

    pub fn enqueue(&mut self, command: SimCommand) {
        self.queue.push_back(command);
    }

    /// Number of commands waiting for the next drain.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Apply every queued command in FIFO order.
    pub fn drain_commands(&mut self) -> DrainReport {
        let mut report = DrainReport::default();
        while let Some(command) = self.queue.pop_front() {
            match self.engine.apply(command.clone()) {
                Ok(outcome) => report.applied.push(outcome),
                Err(e) => {
                    warn!(?command, error = %e, "command rejected");
                    report.rejected.push((command, e));
                }
            }
        }
        report
    }

    // ── Stepping ──────────────────────────────────────────────────────────

    /// Drain the queue, then run exactly one tick.
    pub fn step<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<TickReport> {
        let was_failed = self.engine.is_failed();
        self.drain_commands();
        if let (false, Some(failure)) = (was_failed, self.engine.failure()) {
            // A spawn in this drain failed the network.
            observer.on_failure(&failure);
        }

        observer.on_tick_start(self.engine.current_tick());
        let report = self.engine.tick()?;
        observer.on_tick_end(&report);
        if let Some(failure) = &report.failure {
            observer.on_failure(failure);
        }
        Ok(report)
    }

    /// Run `n` steps, then call `on_run_end`.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.step(observer)?;
        }
        observer.on_run_end(self.engine.current_tick(), self.engine.completed());
        Ok(())
    }

    /// Feed one frame's elapsed time and run every tick that is due, up to
    /// `config.max_ticks_per_frame`.  Backlog past the cap is dropped.
    ///
    /// Returns the number of ticks run.
    pub fn advance<O: SimObserver>(&mut self, frame_delta: Duration, observer: &mut O) -> SimResult<u64> {
        self.clock.push(frame_delta);
        let cap = self.engine.config.max_ticks_per_frame;
        let mut ran = 0;
        while ran < cap && self.clock.try_consume() {
            self.step(observer)?;
            ran += 1;
        }
        if self.clock.should_step() {
            debug!(behind = self.clock.due_ticks(), "tick backlog discarded");
            self.clock.discard_backlog();
        }
        Ok(ran)
    }

    // ── Queries ───────────────────────────────────────────────────────────

    pub fn current_tick(&self) -> Tick {
        self.engine.current_tick()
    }

    pub fn snapshot(&self) -> Snapshot {
        self.engine.snapshot()
    }

    pub fn state_hash(&self) -> u64 {
        self.engine.state_hash()
    }
}
