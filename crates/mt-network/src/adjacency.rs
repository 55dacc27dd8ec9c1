//! Station → neighbour lists, built once per topology version.

use std::collections::BTreeMap;

use mt_core::StationId;

use crate::topology::{Topology, push_unique};

/// Snapshot of the line-induced graph at one topology version.
///
/// Each station's neighbour list is in canonical order: ascending `LineId`,
/// then position in that line, previous neighbour before next.  Duplicates
/// (two lines sharing an edge) keep their first occurrence.
#[derive(Debug, Clone, Default)]
pub struct Adjacency {
    neighbours: BTreeMap<StationId, Vec<StationId>>,
    version:    u64,
}

impl Adjacency {
    pub fn build(topology: &Topology) -> Self {
        let mut neighbours: BTreeMap<StationId, Vec<StationId>> =
            topology.stations().map(|s| (s.id, Vec::new())).collect();

        for line in topology.lines() {
            let seq = &line.stations;
            for (i, &s) in seq.iter().enumerate() {
                let Some(out) = neighbours.get_mut(&s) else { continue };
                if i > 0 {
                    push_unique(out, seq[i - 1]);
                }
                if let Some(&next) = seq.get(i + 1) {
                    push_unique(out, next);
                }
            }
        }

        Self { neighbours, version: topology.version() }
    }

    /// Topology version this adjacency was built from.
    #[inline]
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Neighbours of `station`; empty for an isolated or unknown station.
    #[inline]
    pub fn neighbours(&self, station: StationId) -> &[StationId] {
        self.neighbours.get(&station).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.neighbours.values().map(Vec::len).sum::<usize>() / 2
    }
}
