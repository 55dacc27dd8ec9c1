//! The topology store: stations, lines, and a spatial index.
//!
//! # Ownership
//!
//! `Topology` owns every [`Station`] and [`Line`].  Callers get shared
//! references only; the one mutable view handed out is a station's waiting
//! queue ([`Topology::waiting_mut`]), which is not part of the routing graph
//! and so does not bump the version.
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) maps station positions to ids, for the host's
//! "which station is under the cursor" queries.  It is kept in step with
//! station insertions and removals.

use std::collections::BTreeMap;

use rstar::{PointDistance, RTree, RTreeObject, AABB};
use tracing::debug;

use mt_core::{IdSequence, LineId, PassengerId, Point, StationId, StationType};

use crate::{NetworkError, NetworkResult};

// ── R-tree entry ──────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
struct StationEntry {
    point: [f32; 2],
    id:    StationId,
}

impl RTreeObject for StationEntry {
    type Envelope = AABB<[f32; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for StationEntry {
    fn distance_2(&self, point: &[f32; 2]) -> f32 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

// ── Station / Line ────────────────────────────────────────────────────────────

/// A station and its ordered waiting queue.
#[derive(Debug, Clone)]
pub struct Station {
    pub id:       StationId,
    pub kind:     StationType,
    pub position: Point,
    /// Maximum number of waiting passengers before the network fails.
    pub capacity: usize,
    /// Waiting passengers in arrival order (re-ranked by the boarding policy
    /// whenever a train boards here).
    pub waiting:  Vec<PassengerId>,
}

impl Station {
    /// `true` once the waiting queue has reached `capacity`.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.waiting.len() >= self.capacity
    }

    /// `true` if the queue holds more passengers than `capacity` allows.
    #[inline]
    pub fn is_overcrowded(&self) -> bool {
        self.waiting.len() > self.capacity
    }
}

/// An ordered, duplicate-free sequence of stations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub id:       LineId,
    pub stations: Vec<StationId>,
}

impl Line {
    #[inline]
    pub fn len(&self) -> usize {
        self.stations.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    #[inline]
    pub fn contains(&self, station: StationId) -> bool {
        self.stations.contains(&station)
    }

    /// Index of `station` in the sequence.
    #[inline]
    pub fn position(&self, station: StationId) -> Option<usize> {
        self.stations.iter().position(|&s| s == station)
    }

    /// Consecutive station pairs: the edges this line contributes.
    pub fn edges(&self) -> impl Iterator<Item = (StationId, StationId)> + '_ {
        self.stations.windows(2).map(|w| (w[0], w[1]))
    }

    /// Append the neighbours of `station` on this line: previous, then next.
    pub(crate) fn push_neighbours(&self, station: StationId, out: &mut Vec<StationId>) {
        let Some(i) = self.position(station) else { return };
        if i > 0 {
            push_unique(out, self.stations[i - 1]);
        }
        if let Some(&next) = self.stations.get(i + 1) {
            push_unique(out, next);
        }
    }
}

#[inline]
pub(crate) fn push_unique(out: &mut Vec<StationId>, s: StationId) {
    if !out.contains(&s) {
        out.push(s);
    }
}

// ── Topology ──────────────────────────────────────────────────────────────────

/// Owns all stations and lines.
///
/// Both maps are `BTreeMap`s so every iteration is in ascending id order.
pub struct Topology {
    stations:    BTreeMap<StationId, Station>,
    lines:       BTreeMap<LineId, Line>,
    station_ids: IdSequence<StationId>,
    line_ids:    IdSequence<LineId>,
    version:     u64,
    spatial_idx: RTree<StationEntry>,
}

impl Topology {
    pub fn new() -> Self {
        Self {
            stations:    BTreeMap::new(),
            lines:       BTreeMap::new(),
            station_ids: IdSequence::new(),
            line_ids:    IdSequence::new(),
            version:     0,
            spatial_idx: RTree::new(),
        }
    }

    /// Structural version, bumped on every mutation of the routing graph.
    #[inline]
    pub fn version(&self) -> u64 {
        self.version
    }

    fn bump(&mut self) {
        self.version += 1;
    }

    // ── Stations ──────────────────────────────────────────────────────────

    /// Add a station with an empty waiting queue.
    ///
    /// Rejects a zero capacity and a non-finite position; the spatial index
    /// could not find such a station again.
    pub fn add_station(
        &mut self,
        kind:     StationType,
        position: Point,
        capacity: usize,
    ) -> NetworkResult<StationId> {
        if capacity == 0 {
            return Err(NetworkError::InvalidCapacity);
        }
        if !(position.x.is_finite() && position.y.is_finite()) {
            return Err(NetworkError::InvalidPosition(position));
        }
        let id = self.station_ids.next_id();
        self.stations.insert(id, Station { id, kind, position, capacity, waiting: Vec::new() });
        self.spatial_idx.insert(StationEntry { point: [position.x, position.y], id });
        self.bump();
        debug!(station = %id, %kind, %position, "station added");
        Ok(id)
    }

    /// Remove a station and strip it from every line.
    ///
    /// Returns the removed station (with whatever was left in its queue).
    pub fn remove_station(&mut self, id: StationId) -> NetworkResult<Station> {
        let station = self.stations.remove(&id).ok_or(NetworkError::StationNotFound(id))?;
        for line in self.lines.values_mut() {
            line.stations.retain(|&s| s != id);
        }
        self.spatial_idx.remove(&StationEntry {
            point: [station.position.x, station.position.y],
            id,
        });
        self.bump();
        debug!(station = %id, "station removed");
        Ok(station)
    }

    #[inline]
    pub fn station(&self, id: StationId) -> Option<&Station> {
        self.stations.get(&id)
    }

    /// Like [`station`](Self::station) but with a typed error.
    pub fn require_station(&self, id: StationId) -> NetworkResult<&Station> {
        self.stations.get(&id).ok_or(NetworkError::StationNotFound(id))
    }

    /// Mutable access to a station's waiting queue.
    pub fn waiting_mut(&mut self, id: StationId) -> NetworkResult<&mut Vec<PassengerId>> {
        self.stations
            .get_mut(&id)
            .map(|s| &mut s.waiting)
            .ok_or(NetworkError::StationNotFound(id))
    }

    /// All stations in ascending id order.
    pub fn stations(&self) -> impl Iterator<Item = &Station> + '_ {
        self.stations.values()
    }

    pub fn station_count(&self) -> usize {
        self.stations.len()
    }

    /// Nearest station to `point` within `radius`, if any.
    pub fn station_near(&self, point: Point, radius: f32) -> Option<StationId> {
        let query = [point.x, point.y];
        self.spatial_idx
            .nearest_neighbor(&query)
            .filter(|e| e.distance_2(&query) <= radius * radius)
            .map(|e| e.id)
    }

    // ── Lines ─────────────────────────────────────────────────────────────

    pub fn add_line(&mut self) -> LineId {
        let id = self.line_ids.next_id();
        self.lines.insert(id, Line { id, stations: Vec::new() });
        self.bump();
        debug!(line = %id, "line added");
        id
    }

    pub fn remove_line(&mut self, id: LineId) -> NetworkResult<Line> {
        let line = self.lines.remove(&id).ok_or(NetworkError::LineNotFound(id))?;
        self.bump();
        debug!(line = %id, "line removed");
        Ok(line)
    }

    /// Put `station` on `line`: appended when `index` is `None`, inserted
    /// before position `index` otherwise.  Returns the resulting position.
    pub fn insert_station(
        &mut self,
        line:    LineId,
        station: StationId,
        index:   Option<usize>,
    ) -> NetworkResult<usize> {
        if !self.stations.contains_key(&station) {
            return Err(NetworkError::StationNotFound(station));
        }
        let l = self.lines.get_mut(&line).ok_or(NetworkError::LineNotFound(line))?;
        if l.contains(station) {
            return Err(NetworkError::StationAlreadyOnLine { line, station });
        }
        let len = l.stations.len();
        let at = index.unwrap_or(len);
        if at > len {
            return Err(NetworkError::IndexOutOfRange { line, index: at, len });
        }
        l.stations.insert(at, station);
        self.bump();
        debug!(%line, %station, index = at, "station added to line");
        Ok(at)
    }

    #[inline]
    pub fn line(&self, id: LineId) -> Option<&Line> {
        self.lines.get(&id)
    }

    pub fn require_line(&self, id: LineId) -> NetworkResult<&Line> {
        self.lines.get(&id).ok_or(NetworkError::LineNotFound(id))
    }

    /// All lines in ascending id order.
    pub fn lines(&self) -> impl Iterator<Item = &Line> + '_ {
        self.lines.values()
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// `true` if `station` is on `line`.  Both ids must exist.
    pub fn line_contains(&self, line: LineId, station: StationId) -> NetworkResult<bool> {
        self.require_station(station)?;
        Ok(self.require_line(line)?.contains(station))
    }

    // ── Graph ─────────────────────────────────────────────────────────────

    /// Neighbours of `station` in canonical order, read straight from the
    /// current line sequences (no caching).
    pub fn neighbours(&self, station: StationId) -> Vec<StationId> {
        let mut out = Vec::new();
        for line in self.lines.values() {
            line.push_neighbours(station, &mut out);
        }
        out
    }
}

impl Default for Topology {
    fn default() -> Self {
        Self::new()
    }
}
