//! Memoised routing keyed by `(source, destination type)`.
//!
//! # Invalidation
//!
//! The owner calls [`RoutingCache::invalidate`] after every structural
//! topology mutation.  Independently, every lookup compares the topology's
//! version with the version the cached entries were computed against and
//! drops everything on mismatch, so a missed `invalidate()` can never serve
//! a stale route.
//!
//! Invalidation is wholesale.  The adjacency snapshot is rebuilt lazily on
//! the first lookup after it.

use rustc_hash::FxHashMap;
use tracing::debug;

use mt_core::{StationId, StationType};

use crate::adjacency::Adjacency;
use crate::router::{BfsRouter, Route, Router};
use crate::topology::Topology;
use crate::NetworkResult;

/// Cache key.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteKey {
    pub source:      StationId,
    pub destination: StationType,
}

/// Route memo table in front of a [`Router`].
pub struct RoutingCache<R: Router = BfsRouter> {
    router:    R,
    routes:    FxHashMap<RouteKey, Option<Route>>,
    adjacency: Option<Adjacency>,
    version:   Option<u64>,
    hits:      u64,
    misses:    u64,
}

impl<R: Router> RoutingCache<R> {
    pub fn new(router: R) -> Self {
        Self {
            router,
            routes:    FxHashMap::default(),
            adjacency: None,
            version:   None,
            hits:      0,
            misses:    0,
        }
    }

    pub fn router(&self) -> &R {
        &self.router
    }

    /// Drop every memoised route and the adjacency snapshot.
    pub fn invalidate(&mut self) {
        self.routes.clear();
        self.adjacency = None;
        self.version = None;
    }

    fn sync(&mut self, topology: &Topology) {
        if self.version == Some(topology.version()) {
            return;
        }
        if self.version.is_some() {
            debug!(
                cached = ?self.version,
                current = topology.version(),
                "routing cache stale, dropping entries"
            );
        }
        self.invalidate();
        self.adjacency = Some(Adjacency::build(topology));
        self.version = Some(topology.version());
    }

    /// The route from `source` to the nearest station of type `destination`.
    ///
    /// `Ok(None)` when unreachable.  A source that already has the wanted
    /// type yields a trivial one-station route.
    pub fn route(
        &mut self,
        topology:    &Topology,
        source:      StationId,
        destination: StationType,
    ) -> NetworkResult<Option<&Route>> {
        self.sync(topology);
        let key = RouteKey { source, destination };

        if self.routes.contains_key(&key) {
            self.hits += 1;
        } else {
            self.misses += 1;
            let adjacency = self.adjacency.get_or_insert_with(|| Adjacency::build(topology));
            let route = self.router.route(topology, adjacency, source, destination)?;
            self.routes.insert(key, route);
        }
        Ok(self.routes.get(&key).and_then(Option::as_ref))
    }

    /// The station after `source` on the route; `None` if unreachable or
    /// already there.
    pub fn next_hop(
        &mut self,
        topology:    &Topology,
        source:      StationId,
        destination: StationType,
    ) -> NetworkResult<Option<StationId>> {
        Ok(self.route(topology, source, destination)?.and_then(Route::next_hop))
    }

    /// `true` if some station of `destination` type is reachable, counting
    /// `source` itself.
    pub fn can_route(
        &mut self,
        topology:    &Topology,
        source:      StationId,
        destination: StationType,
    ) -> NetworkResult<bool> {
        Ok(self.route(topology, source, destination)?.is_some())
    }

    /// Number of memoised entries, unreachable results included.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }
}

impl Default for RoutingCache<BfsRouter> {
    fn default() -> Self {
        Self::new(BfsRouter)
    }
}
