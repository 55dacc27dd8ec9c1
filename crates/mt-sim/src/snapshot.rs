//! Read-only views of the engine for renderers and tests.
//!
//! A snapshot owns its data; it can outlive the engine and be sent across
//! threads.  Edge geometry is octilinear and oriented from the lower station
//! id to the higher, so both directions of travel share one path.

use mt_core::{LineId, PassengerId, Point, Polyline, StationId, StationType, Tick, TrainId};
use mt_network::{Router, Topology};
use mt_transit::{Direction, Passenger, PassengerState, Train, TrainState};

use crate::{Engine, Failure};

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PassengerView {
    pub id:          PassengerId,
    pub destination: StationType,
    pub state:       PassengerState,
    pub age:         u64,
    pub next_hop:    Option<StationId>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StationView {
    pub id:         StationId,
    pub kind:       StationType,
    pub position:   Point,
    pub capacity:   usize,
    pub waiting:    usize,
    pub passengers: Vec<PassengerView>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LineView {
    pub id:       LineId,
    pub stations: Vec<StationId>,
    /// One path per consecutive station pair, in sequence order.
    pub edges:    Vec<Polyline>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrainView {
    pub id:              TrainId,
    pub line:            LineId,
    pub current_station: StationId,
    pub next_station:    StationId,
    pub station_index:   usize,
    pub direction:       Direction,
    pub state:           TrainState,
    pub progress:        f32,
    pub onboard:         usize,
    pub capacity:        usize,
    /// Interpolated along the edge while MOVING, the current station
    /// otherwise.
    pub position:        Point,
    pub passengers:      Vec<PassengerView>,
}

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Snapshot {
    pub tick:      Tick,
    pub completed: u64,
    pub failed:    bool,
    pub failure:   Option<Failure>,
    pub policy:    String,
    pub stations:  Vec<StationView>,
    pub lines:     Vec<LineView>,
    pub trains:    Vec<TrainView>,
}

fn passenger_view(p: &Passenger) -> PassengerView {
    PassengerView {
        id:          p.id,
        destination: p.destination,
        state:       p.state,
        age:         p.age,
        next_hop:    p.next_hop,
    }
}

fn position_of(topology: &Topology, id: StationId) -> Point {
    topology.station(id).map(|s| s.position).unwrap_or_default()
}

/// Octilinear path between two stations, oriented lower id first.
fn edge_path(topology: &Topology, a: StationId, b: StationId) -> Polyline {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    Polyline::octilinear(position_of(topology, lo), position_of(topology, hi))
}

fn train_position(topology: &Topology, train: &Train) -> Point {
    if train.state != TrainState::Moving {
        return position_of(topology, train.current_station);
    }
    let forward = train.current_station < train.next_station;
    edge_path(topology, train.current_station, train.next_station)
        .point_at(train.progress, forward)
        .unwrap_or_else(|| position_of(topology, train.current_station))
}

impl<R: Router> Engine<R> {
    pub fn snapshot(&self) -> Snapshot {
        let topology = &self.topology;
        let views = |ids: &[PassengerId]| -> Vec<PassengerView> {
            ids.iter().filter_map(|&id| self.passengers.get(id)).map(passenger_view).collect()
        };

        let stations = topology
            .stations()
            .map(|s| StationView {
                id:         s.id,
                kind:       s.kind,
                position:   s.position,
                capacity:   s.capacity,
                waiting:    s.waiting.len(),
                passengers: views(&s.waiting),
            })
            .collect();

        let lines = topology
            .lines()
            .map(|l| LineView {
                id:       l.id,
                stations: l.stations.clone(),
                edges:    l.edges().map(|(a, b)| edge_path(topology, a, b)).collect(),
            })
            .collect();

        let trains = self
            .trains
            .iter()
            .map(|t| TrainView {
                id:              t.id,
                line:            t.line,
                current_station: t.current_station,
                next_station:    t.next_station,
                station_index:   t.station_index,
                direction:       t.direction,
                state:           t.state,
                progress:        t.progress,
                onboard:         t.onboard.len(),
                capacity:        t.capacity,
                position:        train_position(topology, t),
                passengers:      views(&t.onboard),
            })
            .collect();

        Snapshot {
            tick:      self.tick,
            completed: self.completed,
            failed:    self.failure.is_some(),
            failure:   self.failure,
            policy:    self.policy.name().to_owned(),
            stations,
            lines,
            trains,
        }
    }
}
