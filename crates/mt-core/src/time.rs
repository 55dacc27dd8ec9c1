//! Simulation time model.
//!
//! # Design
//!
//! Simulated time is a monotonically increasing `Tick` counter; one tick is
//! one discrete advance of every train by one dwell phase.  The engine knows
//! nothing about wall-clock time.
//!
//! Hosts that run a frame loop feed their frame deltas into a [`TickClock`],
//! which accumulates them and reports how many fixed-length ticks are due:
//!
//!   due ticks = floor(accumulated / tick_duration)
//!
//! Leftover time carries into the next frame, so tick cadence is independent
//! of frame rate.

use std::fmt;
use std::time::Duration;

use crate::{CoreError, CoreResult};

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// The following tick.
    #[inline]
    pub fn next(self) -> Tick {
        Tick(self.0 + 1)
    }

    /// Ticks elapsed from `earlier` to `self`, saturating at zero.
    #[inline]
    pub fn since(self, earlier: Tick) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── TickClock ─────────────────────────────────────────────────────────────────

/// Fixed-step accumulator converting frame deltas into discrete ticks.
#[derive(Clone, Debug)]
pub struct TickClock {
    step:        Duration,
    accumulator: Duration,
}

impl TickClock {
    /// Create a clock that emits one tick per `step` of accumulated time.
    ///
    /// # Errors
    /// Returns [`CoreError::Config`] if `step` is zero.
    pub fn new(step: Duration) -> CoreResult<Self> {
        if step.is_zero() {
            return Err(CoreError::Config("tick duration must be non-zero".into()));
        }
        Ok(Self { step, accumulator: Duration::ZERO })
    }

    /// Length of one tick.
    #[inline]
    pub fn step(&self) -> Duration {
        self.step
    }

    /// Time accumulated but not yet consumed by a tick.
    #[inline]
    pub fn accumulated(&self) -> Duration {
        self.accumulator
    }

    /// Add one frame's elapsed time.
    pub fn push(&mut self, frame_delta: Duration) {
        self.accumulator = self.accumulator.saturating_add(frame_delta);
    }

    /// `true` if at least one full tick is due.
    #[inline]
    pub fn should_step(&self) -> bool {
        self.accumulator >= self.step
    }

    /// Consume one tick's worth of time if available.
    pub fn try_consume(&mut self) -> bool {
        if !self.should_step() {
            return false;
        }
        self.accumulator -= self.step;
        true
    }

    /// Number of whole ticks currently due.
    pub fn due_ticks(&self) -> u64 {
        (self.accumulator.as_nanos() / self.step.as_nanos()) as u64
    }

    /// Drop all accumulated time, keeping only the sub-tick remainder.
    ///
    /// Used when a host falls too far behind to catch up.
    pub fn discard_backlog(&mut self) {
        let rem = self.accumulator.as_nanos() % self.step.as_nanos();
        self.accumulator = Duration::from_nanos(rem as u64);
    }
}
