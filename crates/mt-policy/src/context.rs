//! Read-only state handed to every policy callback.

use mt_core::{StationId, StationType, Tick};
use mt_network::{Topology, estimate_remaining_hops};

/// What a [`BoardingPolicy`][crate::BoardingPolicy] may look at while
/// scoring one station's queue.
///
/// Built by the engine for a single boarding phase.  No mutable access to
/// the topology exists while it is alive.
pub struct BoardingContext<'a> {
    /// Tick being processed.
    pub tick:     Tick,
    /// Station whose queue is being ranked.
    pub station:  StationId,
    pub topology: &'a Topology,
}

impl<'a> BoardingContext<'a> {
    #[inline]
    pub fn new(tick: Tick, station: StationId, topology: &'a Topology) -> Self {
        Self { tick, station, topology }
    }

    /// Hops from the boarding station to the nearest station of type
    /// `destination`, over the live topology.  `None` when unreachable.
    pub fn remaining_hops(&self, destination: StationType) -> Option<usize> {
        estimate_remaining_hops(self.topology, self.station, destination)
            .ok()
            .flatten()
    }
}
