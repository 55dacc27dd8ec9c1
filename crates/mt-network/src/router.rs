//! Routing trait and default breadth-first implementation.
//!
//! # Pluggability
//!
//! `mt-sim` routes through the [`Router`] trait held by its
//! [`RoutingCache`](crate::RoutingCache), so a host can swap in a weighted or
//! congestion-aware search without touching the dwell protocol.  The default
//! [`BfsRouter`] minimises hop count.
//!
//! # Destinations are types
//!
//! A query asks for the nearest station of a [`StationType`], not a specific
//! station.  The first station of that type discovered by BFS wins, so ties
//! between equally near targets follow the canonical neighbour order.

use std::collections::VecDeque;

use rustc_hash::{FxHashMap, FxHashSet};

use mt_core::{StationId, StationType};

use crate::adjacency::Adjacency;
use crate::topology::Topology;
use crate::NetworkResult;

// ── Route ─────────────────────────────────────────────────────────────────────

/// A shortest-hop path `[source, …, target]`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Route {
    pub stations: Vec<StationId>,
}

impl Route {
    /// The route that goes nowhere: the source already satisfies the query.
    pub fn trivial(source: StationId) -> Self {
        Self { stations: vec![source] }
    }

    /// The station after the source, `None` for a trivial route.
    #[inline]
    pub fn next_hop(&self) -> Option<StationId> {
        self.stations.get(1).copied()
    }

    /// Number of edges traversed.
    #[inline]
    pub fn hops(&self) -> usize {
        self.stations.len().saturating_sub(1)
    }

    #[inline]
    pub fn is_trivial(&self) -> bool {
        self.stations.len() <= 1
    }
}

// ── Router trait ──────────────────────────────────────────────────────────────

/// Pluggable routing engine.
///
/// Implementations must be deterministic: the same topology and query must
/// always produce the same route, or replays diverge.
pub trait Router: Send + Sync {
    /// Route from `source` to the nearest station of type `destination`.
    ///
    /// `Ok(None)` means no station of that type is reachable.  An unknown
    /// `source` is an error.
    fn route(
        &self,
        topology:    &Topology,
        adjacency:   &Adjacency,
        source:      StationId,
        destination: StationType,
    ) -> NetworkResult<Option<Route>>;
}

// ── BfsRouter ─────────────────────────────────────────────────────────────────

/// Unweighted breadth-first search over the line-induced graph.
#[derive(Debug, Clone, Copy, Default)]
pub struct BfsRouter;

impl Router for BfsRouter {
    fn route(
        &self,
        topology:    &Topology,
        adjacency:   &Adjacency,
        source:      StationId,
        destination: StationType,
    ) -> NetworkResult<Option<Route>> {
        if topology.require_station(source)?.kind == destination {
            return Ok(Some(Route::trivial(source)));
        }
        Ok(bfs(topology, source, destination, |s| adjacency.neighbours(s).to_vec()))
    }
}

/// Hop count from `source` to the nearest station of type `destination`,
/// searched over the live line sequences.
///
/// Bypasses any cache, so it reflects topology edits immediately.  Used for
/// queue scoring rather than for committing routes.
pub fn estimate_remaining_hops(
    topology:    &Topology,
    source:      StationId,
    destination: StationType,
) -> NetworkResult<Option<usize>> {
    if topology.require_station(source)?.kind == destination {
        return Ok(Some(0));
    }
    Ok(bfs(topology, source, destination, |s| topology.neighbours(s)).map(|r| r.hops()))
}

// ── BFS internals ─────────────────────────────────────────────────────────────

/// The target test runs at discovery time, so the first matching station
/// pushed in canonical order wins.  `source` must not itself match.
fn bfs<F>(
    topology:    &Topology,
    source:      StationId,
    destination: StationType,
    mut neighbours: F,
) -> Option<Route>
where
    F: FnMut(StationId) -> Vec<StationId>,
{
    let mut parent:  FxHashMap<StationId, StationId> = FxHashMap::default();
    let mut visited: FxHashSet<StationId> = FxHashSet::default();
    let mut queue = VecDeque::new();

    visited.insert(source);
    queue.push_back(source);

    while let Some(current) = queue.pop_front() {
        for next in neighbours(current) {
            if !visited.insert(next) {
                continue;
            }
            parent.insert(next, current);
            let is_target = topology.station(next).is_some_and(|s| s.kind == destination);
            if is_target {
                return Some(reconstruct(&parent, source, next));
            }
            queue.push_back(next);
        }
    }
    None
}

fn reconstruct(
    parent: &FxHashMap<StationId, StationId>,
    source: StationId,
    target: StationId,
) -> Route {
    let mut stations = vec![target];
    let mut cur = target;
    while cur != source {
        match parent.get(&cur) {
            Some(&p) => {
                stations.push(p);
                cur = p;
            }
            None => break,
        }
    }
    stations.reverse();
    Route { stations }
}
