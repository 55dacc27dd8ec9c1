//! Simulation observer trait for progress reporting and data collection.

use mt_core::Tick;

use crate::{Failure, TickReport};

/// Callbacks invoked by [`Simulation`][crate::Simulation] around each tick.
///
/// All methods default to no-ops.
///
/// # Example: completion counter
///
/// ```rust,ignore
/// struct Delivered(u64);
///
/// impl SimObserver for Delivered {
///     fn on_tick_end(&mut self, report: &TickReport) {
///         self.0 += report.completed as u64;
///     }
/// }
/// ```
pub trait SimObserver {
    /// Before any train is processed.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// After the tick, including inert ticks on a failed engine.
    fn on_tick_end(&mut self, _report: &TickReport) {}

    /// Once, on the tick (or spawn) that failed the network.
    fn on_failure(&mut self, _failure: &Failure) {}

    /// After `run_ticks` finishes.
    fn on_run_end(&mut self, _final_tick: Tick, _completed: u64) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
