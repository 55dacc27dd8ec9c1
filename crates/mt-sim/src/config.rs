//! Engine configuration.

use std::time::Duration;

use mt_policy::PolicyKind;

use crate::{SimError, SimResult};

/// Tunables for an [`Engine`][crate::Engine] and its
/// [`Simulation`][crate::Simulation] wrapper.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Waiting-queue limit for stations added without an explicit capacity.
    pub station_capacity: usize,

    /// Seats on trains added without an explicit capacity.
    pub train_capacity: usize,

    /// Progress per MOVING tick for trains added without an explicit speed.
    /// `1.0` means one tick per hop.
    pub train_speed: f32,

    /// Wall-clock length of one tick, used only by `Simulation::advance`.
    pub tick_duration: Duration,

    /// Boarding policy installed at construction.
    pub boarding_policy: PolicyKind,

    /// Run the full invariant check after every tick.
    pub check_invariants: bool,

    /// Upper bound on ticks run by one `Simulation::advance` call.  Backlog
    /// beyond it is discarded.
    pub max_ticks_per_frame: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            station_capacity:    6,
            train_capacity:      6,
            train_speed:         1.0,
            tick_duration:       Duration::from_millis(500),
            boarding_policy:     PolicyKind::Fifo,
            check_invariants:    cfg!(debug_assertions),
            max_ticks_per_frame: 8,
        }
    }
}

impl SimConfig {
    pub fn validate(&self) -> SimResult<()> {
        if self.station_capacity == 0 {
            return Err(SimError::Config("station_capacity must be positive".into()));
        }
        if self.train_capacity == 0 {
            return Err(SimError::Config("train_capacity must be positive".into()));
        }
        if !(self.train_speed.is_finite() && self.train_speed > 0.0) {
            return Err(SimError::Config(format!(
                "train_speed must be positive and finite, got {}",
                self.train_speed
            )));
        }
        if self.tick_duration.is_zero() {
            return Err(SimError::Config("tick_duration must be non-zero".into()));
        }
        if self.max_ticks_per_frame == 0 {
            return Err(SimError::Config("max_ticks_per_frame must be positive".into()));
        }
        Ok(())
    }
}
