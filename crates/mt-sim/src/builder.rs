//! Fluent builder for constructing an [`Engine`] or [`Simulation`].

use std::time::Duration;

use mt_network::{BfsRouter, Router};
use mt_policy::PolicyKind;

use crate::{Engine, SimConfig, SimResult, Simulation};

/// Fluent builder for [`Engine<R>`].
///
/// Every setting has a default (see [`SimConfig::default`]); the router
/// defaults to [`BfsRouter`].
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new()
///     .station_capacity(8)
///     .boarding_policy(PolicyKind::ShortestRemainingHops)
///     .build_simulation()?;
/// ```
pub struct SimBuilder<R: Router = BfsRouter> {
    config: SimConfig,
    router: R,
}

impl SimBuilder<BfsRouter> {
    pub fn new() -> Self {
        Self { config: SimConfig::default(), router: BfsRouter }
    }
}

impl Default for SimBuilder<BfsRouter> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Router> SimBuilder<R> {
    /// Replace the whole configuration.
    pub fn config(mut self, config: SimConfig) -> Self {
        self.config = config;
        self
    }

    /// Swap in a different routing engine.
    pub fn router<R2: Router>(self, router: R2) -> SimBuilder<R2> {
        SimBuilder { config: self.config, router }
    }

    pub fn station_capacity(mut self, n: usize) -> Self {
        self.config.station_capacity = n;
        self
    }

    pub fn train_capacity(mut self, n: usize) -> Self {
        self.config.train_capacity = n;
        self
    }

    pub fn train_speed(mut self, speed: f32) -> Self {
        self.config.train_speed = speed;
        self
    }

    pub fn tick_duration(mut self, d: Duration) -> Self {
        self.config.tick_duration = d;
        self
    }

    pub fn boarding_policy(mut self, kind: PolicyKind) -> Self {
        self.config.boarding_policy = kind;
        self
    }

    pub fn check_invariants(mut self, on: bool) -> Self {
        self.config.check_invariants = on;
        self
    }

    pub fn max_ticks_per_frame(mut self, n: u64) -> Self {
        self.config.max_ticks_per_frame = n;
        self
    }

    /// Validate the configuration and return an empty engine.
    pub fn build(self) -> SimResult<Engine<R>> {
        Engine::with_router(self.config, self.router)
    }

    /// [`build`](Self::build), wrapped in a [`Simulation`].
    pub fn build_simulation(self) -> SimResult<Simulation<R>> {
        Simulation::new(self.build()?)
    }
}
