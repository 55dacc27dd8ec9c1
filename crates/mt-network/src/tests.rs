//! Unit tests for mt-network.
//!
//! Every test builds its topology by hand; ids start at 1 in each one.

#[cfg(test)]
mod helpers {
    use mt_core::{LineId, Point, StationId, StationType};
    use crate::Topology;

    pub fn station(t: &mut Topology, kind: StationType) -> StationId {
        let n = t.station_count() as f32;
        t.add_station(kind, Point::new(n * 100.0, 0.0), 6).unwrap()
    }

    pub fn line(t: &mut Topology, stations: &[StationId]) -> LineId {
        let l = t.add_line();
        for &s in stations {
            t.insert_station(l, s, None).unwrap();
        }
        l
    }
}

// ── Topology store ────────────────────────────────────────────────────────────

#[cfg(test)]
mod topology {
    use mt_core::{PassengerId, Point, StationId, StationType::*};
    use crate::{NetworkError, Topology};
    use super::helpers::{line, station};

    #[test]
    fn station_lifecycle() {
        let mut t = Topology::new();
        let id = station(&mut t, Circle);
        assert_eq!(t.station_count(), 1);
        t.remove_station(id).unwrap();
        assert_eq!(t.station_count(), 0);
    }

    #[test]
    fn zero_capacity_rejected() {
        let mut t = Topology::new();
        let err = t.add_station(Circle, Point::default(), 0).unwrap_err();
        assert_eq!(err, NetworkError::InvalidCapacity);
        assert_eq!(t.station_count(), 0);
    }

    #[test]
    fn non_finite_position_rejected() {
        let mut t = Topology::new();
        for p in [Point::new(f32::NAN, 0.0), Point::new(0.0, f32::INFINITY)] {
            let err = t.add_station(Circle, p, 4).unwrap_err();
            assert!(matches!(err, NetworkError::InvalidPosition(_)));
        }
        assert_eq!(t.station_count(), 0);
        assert_eq!(t.version(), 0);
    }

    #[test]
    fn removed_station_leaves_spatial_index() {
        let mut t = Topology::new();
        let id = t.add_station(Circle, Point::new(10.0, 10.0), 4).unwrap();
        assert_eq!(t.station_near(Point::new(10.0, 10.0), 1.0), Some(id));
        t.remove_station(id).unwrap();
        assert_eq!(t.station_near(Point::new(10.0, 10.0), 1_000.0), None);
    }

    #[test]
    fn queue_fills_then_overcrowds() {
        let mut t = Topology::new();
        let id = t.add_station(Circle, Point::default(), 1).unwrap();
        assert!(!t.station(id).unwrap().is_full());
        t.waiting_mut(id).unwrap().push(PassengerId(0));
        assert!(t.station(id).unwrap().is_full());
        assert!(!t.station(id).unwrap().is_overcrowded());
        t.waiting_mut(id).unwrap().push(PassengerId(1));
        assert!(t.station(id).unwrap().is_overcrowded());
    }

    #[test]
    fn removal_cleans_all_lines() {
        let mut t = Topology::new();
        let s1 = station(&mut t, Circle);
        let s2 = station(&mut t, Square);
        let l1 = line(&mut t, &[s1, s2]);
        let l2 = line(&mut t, &[s1]);

        t.remove_station(s1).unwrap();

        assert_eq!(t.line(l1).unwrap().stations, vec![s2]);
        assert!(t.line(l2).unwrap().is_empty());
    }

    #[test]
    fn unknown_ids_rejected() {
        let mut t = Topology::new();
        assert_eq!(
            t.remove_station(StationId(999)).unwrap_err(),
            NetworkError::StationNotFound(StationId(999))
        );
        assert!(matches!(t.remove_line(mt_core::LineId(999)), Err(NetworkError::LineNotFound(_))));
    }

    #[test]
    fn double_removal_rejected() {
        let mut t = Topology::new();
        let s = station(&mut t, Circle);
        t.remove_station(s).unwrap();
        assert!(t.remove_station(s).is_err());
    }

    #[test]
    fn duplicate_station_on_line_rejected() {
        let mut t = Topology::new();
        let s = station(&mut t, Circle);
        let l = line(&mut t, &[s]);
        let before = t.version();
        assert_eq!(
            t.insert_station(l, s, None).unwrap_err(),
            NetworkError::StationAlreadyOnLine { line: l, station: s }
        );
        assert_eq!(t.version(), before, "rejected call must not bump the version");
    }

    #[test]
    fn insert_at_index() {
        let mut t = Topology::new();
        let a = station(&mut t, Circle);
        let b = station(&mut t, Square);
        let c = station(&mut t, Triangle);
        let l = line(&mut t, &[a, c]);

        assert_eq!(t.insert_station(l, b, Some(1)).unwrap(), 1);
        assert_eq!(t.line(l).unwrap().stations, vec![a, b, c]);
    }

    #[test]
    fn insert_past_end_rejected() {
        let mut t = Topology::new();
        let a = station(&mut t, Circle);
        let b = station(&mut t, Square);
        let l = line(&mut t, &[a]);
        assert_eq!(
            t.insert_station(l, b, Some(2)).unwrap_err(),
            NetworkError::IndexOutOfRange { line: l, index: 2, len: 1 }
        );
    }

    #[test]
    fn every_mutation_bumps_version() {
        let mut t = Topology::new();
        let v0 = t.version();
        let a = station(&mut t, Circle);
        let l = t.add_line();
        t.insert_station(l, a, None).unwrap();
        t.remove_line(l).unwrap();
        t.remove_station(a).unwrap();
        assert_eq!(t.version(), v0 + 5);
    }

    #[test]
    fn waiting_queue_edits_keep_version() {
        let mut t = Topology::new();
        let a = station(&mut t, Circle);
        let v = t.version();
        t.waiting_mut(a).unwrap().push(mt_core::PassengerId(1));
        assert_eq!(t.version(), v);
        assert_eq!(t.station(a).unwrap().waiting.len(), 1);
    }

    #[test]
    fn line_contains_checks_ids() {
        let mut t = Topology::new();
        let a = station(&mut t, Circle);
        let b = station(&mut t, Square);
        let l = line(&mut t, &[a]);
        assert!(t.line_contains(l, a).unwrap());
        assert!(!t.line_contains(l, b).unwrap());
        assert!(t.line_contains(l, StationId(42)).is_err());
    }

    #[test]
    fn station_near_uses_radius() {
        let mut t = Topology::new();
        let a = t.add_station(Circle, Point::new(0.0, 0.0), 6).unwrap();
        let b = t.add_station(Square, Point::new(100.0, 0.0), 6).unwrap();

        assert_eq!(t.station_near(Point::new(3.0, 4.0), 15.0), Some(a));
        assert_eq!(t.station_near(Point::new(95.0, 0.0), 15.0), Some(b));
        assert_eq!(t.station_near(Point::new(50.0, 0.0), 15.0), None);

        t.remove_station(a).unwrap();
        assert_eq!(t.station_near(Point::new(3.0, 4.0), 15.0), None);
    }

    #[test]
    fn neighbours_follow_canonical_order() {
        let mut t = Topology::new();
        let a = station(&mut t, Circle);
        let b = station(&mut t, Square);
        let c = station(&mut t, Triangle);
        let d = station(&mut t, Star);
        line(&mut t, &[c, a, b]);
        line(&mut t, &[d, a, c]);
        // Line 1 gives c then b; line 2 gives d, and c is already present.
        assert_eq!(t.neighbours(a), vec![c, b, d]);
    }
}

// ── Adjacency ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod adjacency {
    use mt_core::StationType::*;
    use crate::{Adjacency, Topology};
    use super::helpers::{line, station};

    #[test]
    fn matches_live_neighbours() {
        let mut t = Topology::new();
        let a = station(&mut t, Circle);
        let b = station(&mut t, Square);
        let c = station(&mut t, Triangle);
        let d = station(&mut t, Star);
        line(&mut t, &[a, b, c]);
        line(&mut t, &[b, d]);

        let adj = Adjacency::build(&t);
        for s in [a, b, c, d] {
            assert_eq!(adj.neighbours(s), t.neighbours(s).as_slice());
        }
        assert_eq!(adj.edge_count(), 3);
        assert_eq!(adj.version(), t.version());
    }

    #[test]
    fn shared_edge_counted_once() {
        let mut t = Topology::new();
        let a = station(&mut t, Circle);
        let b = station(&mut t, Square);
        line(&mut t, &[a, b]);
        line(&mut t, &[b, a]);
        let adj = Adjacency::build(&t);
        assert_eq!(adj.neighbours(a), &[b]);
        assert_eq!(adj.edge_count(), 1);
    }
}

// ── Router ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod router {
    use mt_core::{StationId, StationType::*};
    use crate::{Adjacency, BfsRouter, NetworkError, Router, Topology, estimate_remaining_hops};
    use super::helpers::{line, station};

    fn route(t: &Topology, s: StationId, d: mt_core::StationType) -> Option<Vec<StationId>> {
        BfsRouter
            .route(t, &Adjacency::build(t), s, d)
            .unwrap()
            .map(|r| r.stations)
    }

    #[test]
    fn direct_route_on_single_line() {
        let mut t = Topology::new();
        let a = station(&mut t, Circle);
        let b = station(&mut t, Square);
        let c = station(&mut t, Triangle);
        line(&mut t, &[a, b, c]);
        assert_eq!(route(&t, a, Triangle), Some(vec![a, b, c]));
    }

    #[test]
    fn route_with_transfer_at_shared_station() {
        let mut t = Topology::new();
        let a = station(&mut t, Circle);
        let x = station(&mut t, Square);
        let b = station(&mut t, Triangle);
        line(&mut t, &[a, x]);
        line(&mut t, &[x, b]);
        assert_eq!(route(&t, a, Triangle), Some(vec![a, x, b]));
    }

    #[test]
    fn no_route_between_components() {
        let mut t = Topology::new();
        let a = station(&mut t, Circle);
        let b = station(&mut t, Square);
        let c = station(&mut t, Triangle);
        let d = station(&mut t, Circle);
        line(&mut t, &[a, b]);
        line(&mut t, &[c, d]);
        assert_eq!(route(&t, a, Triangle), None);
    }

    #[test]
    fn destination_type_absent() {
        let mut t = Topology::new();
        let a = station(&mut t, Circle);
        let b = station(&mut t, Square);
        let c = station(&mut t, Square);
        line(&mut t, &[a, b, c]);
        assert_eq!(route(&t, a, Triangle), None);
    }

    #[test]
    fn source_of_destination_type_is_trivial() {
        let mut t = Topology::new();
        let a = station(&mut t, Circle);
        let r = BfsRouter.route(&t, &Adjacency::build(&t), a, Circle).unwrap().unwrap();
        assert!(r.is_trivial());
        assert_eq!(r.next_hop(), None);
        assert_eq!(r.hops(), 0);
    }

    #[test]
    fn unknown_source_is_error() {
        let t = Topology::new();
        let err = BfsRouter.route(&t, &Adjacency::build(&t), StationId(7), Circle).unwrap_err();
        assert_eq!(err, NetworkError::StationNotFound(StationId(7)));
    }

    #[test]
    fn shortest_hop_wins() {
        // a-b-c-t1 on line 1, a-t2 on line 2: the one-hop target wins.
        let mut t = Topology::new();
        let a = station(&mut t, Circle);
        let b = station(&mut t, Square);
        let c = station(&mut t, Square);
        let t1 = station(&mut t, Triangle);
        let t2 = station(&mut t, Triangle);
        line(&mut t, &[a, b, c, t1]);
        line(&mut t, &[a, t2]);
        assert_eq!(route(&t, a, Triangle), Some(vec![a, t2]));
    }

    #[test]
    fn ties_break_by_line_order() {
        // Two one-hop triangles; the one reached through the lower line id wins.
        let mut t = Topology::new();
        let a = station(&mut t, Circle);
        let t1 = station(&mut t, Triangle);
        let t2 = station(&mut t, Triangle);
        line(&mut t, &[a, t2]);
        line(&mut t, &[a, t1]);
        assert_eq!(route(&t, a, Triangle), Some(vec![a, t2]));
    }

    #[test]
    fn ties_break_previous_before_next() {
        let mut t = Topology::new();
        let a = station(&mut t, Circle);
        let left = station(&mut t, Triangle);
        let right = station(&mut t, Triangle);
        line(&mut t, &[left, a, right]);
        assert_eq!(route(&t, a, Triangle), Some(vec![a, left]));
    }

    #[test]
    fn estimate_counts_hops() {
        let mut t = Topology::new();
        let a = station(&mut t, Circle);
        let b = station(&mut t, Square);
        let c = station(&mut t, Triangle);
        line(&mut t, &[a, b, c]);
        assert_eq!(estimate_remaining_hops(&t, a, Triangle).unwrap(), Some(2));
        assert_eq!(estimate_remaining_hops(&t, b, Triangle).unwrap(), Some(1));
        assert_eq!(estimate_remaining_hops(&t, a, Circle).unwrap(), Some(0));
        assert_eq!(estimate_remaining_hops(&t, a, Star).unwrap(), None);
    }
}

// ── Routing cache ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod cache {
    use mt_core::StationType::*;
    use crate::{RoutingCache, Topology, estimate_remaining_hops};
    use super::helpers::{line, station};

    #[test]
    fn memoises_per_key() {
        let mut t = Topology::new();
        let a = station(&mut t, Circle);
        let b = station(&mut t, Square);
        line(&mut t, &[a, b]);

        let mut cache = RoutingCache::default();
        assert_eq!(cache.next_hop(&t, a, Square).unwrap(), Some(b));
        assert_eq!(cache.next_hop(&t, a, Square).unwrap(), Some(b));
        assert_eq!(cache.misses(), 1);
        assert_eq!(cache.hits(), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn unreachable_results_are_memoised() {
        let mut t = Topology::new();
        let a = station(&mut t, Circle);
        let mut cache = RoutingCache::default();
        assert!(!cache.can_route(&t, a, Star).unwrap());
        assert!(!cache.can_route(&t, a, Star).unwrap());
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.hits(), 1);
    }

    #[test]
    fn invalidate_clears_everything() {
        let mut t = Topology::new();
        let a = station(&mut t, Circle);
        let b = station(&mut t, Square);
        line(&mut t, &[a, b]);
        let mut cache = RoutingCache::default();
        cache.route(&t, a, Square).unwrap();
        cache.invalidate();
        assert!(cache.is_empty());
    }

    #[test]
    fn next_hop_recomputed_after_insertion() {
        let mut t = Topology::new();
        let a = station(&mut t, Circle);
        let b = station(&mut t, Square);
        let c = station(&mut t, Triangle);
        let l = line(&mut t, &[a, b, c]);

        let mut cache = RoutingCache::default();
        assert_eq!(cache.next_hop(&t, a, Triangle).unwrap(), Some(b));

        let d = station(&mut t, Star);
        t.insert_station(l, d, Some(0)).unwrap();
        assert_eq!(cache.next_hop(&t, a, Triangle).unwrap(), Some(b));
        assert_eq!(cache.next_hop(&t, a, Star).unwrap(), Some(d));
    }

    #[test]
    fn stale_version_is_never_served() {
        let mut t = Topology::new();
        let a = station(&mut t, Circle);
        let b = station(&mut t, Square);
        let l = line(&mut t, &[a, b]);

        let mut cache = RoutingCache::default();
        assert!(cache.can_route(&t, a, Square).unwrap());

        // Mutate without calling invalidate(): the version stamp catches it.
        t.remove_line(l).unwrap();
        assert!(!cache.can_route(&t, a, Square).unwrap());
        assert_eq!(cache.misses(), 2);
    }

    #[test]
    fn trivial_route_counts_as_reachable() {
        let mut t = Topology::new();
        let a = station(&mut t, Circle);
        let mut cache = RoutingCache::default();
        assert!(cache.can_route(&t, a, Circle).unwrap());
        assert_eq!(cache.next_hop(&t, a, Circle).unwrap(), None);
    }

    #[test]
    fn cached_hops_match_estimate() {
        let mut t = Topology::new();
        let a = station(&mut t, Circle);
        let b = station(&mut t, Square);
        let c = station(&mut t, Star);
        let d = station(&mut t, Triangle);
        line(&mut t, &[a, b, c]);
        line(&mut t, &[c, d]);
        let mut cache = RoutingCache::default();
        for s in [a, b, c, d] {
            let hops = cache.route(&t, s, Triangle).unwrap().map(|r| r.hops());
            assert_eq!(hops, estimate_remaining_hops(&t, s, Triangle).unwrap());
        }
    }
}
