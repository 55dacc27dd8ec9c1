//! The `BoardingPolicy` trait and the built-in policies.

use mt_transit::Passenger;

use crate::BoardingContext;

/// Pluggable queue ordering.
///
/// Higher scores board first.  Implementations must be pure functions of
/// the passenger and the context; the engine may score the same passenger
/// several times within a tick.
pub trait BoardingPolicy: Send + Sync + 'static {
    fn score(&self, passenger: &Passenger, ctx: &BoardingContext<'_>) -> u64;

    /// Short label used in logs and snapshots.
    fn name(&self) -> &'static str;
}

// ── Built-ins ─────────────────────────────────────────────────────────────────

/// Longest-waiting first.  Arrival order decides ties.
#[derive(Debug, Clone, Copy, Default)]
pub struct Fifo;

impl BoardingPolicy for Fifo {
    fn score(&self, passenger: &Passenger, _ctx: &BoardingContext<'_>) -> u64 {
        passenger.age
    }

    fn name(&self) -> &'static str {
        "fifo"
    }
}

/// Scores by age, like [`Fifo`].  Kept as its own policy so hosts can select
/// it by name and so its weighting can diverge later.
#[derive(Debug, Clone, Copy, Default)]
pub struct AgingPriority;

impl BoardingPolicy for AgingPriority {
    fn score(&self, passenger: &Passenger, _ctx: &BoardingContext<'_>) -> u64 {
        passenger.age
    }

    fn name(&self) -> &'static str {
        "aging_priority"
    }
}

/// Fewest remaining hops first.  Unreachable destinations score lowest.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShortestRemainingHops;

impl BoardingPolicy for ShortestRemainingHops {
    fn score(&self, passenger: &Passenger, ctx: &BoardingContext<'_>) -> u64 {
        match ctx.remaining_hops(passenger.destination) {
            Some(hops) => u64::MAX - hops as u64,
            None => 0,
        }
    }

    fn name(&self) -> &'static str {
        "shortest_remaining_hops"
    }
}
