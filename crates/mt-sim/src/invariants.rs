//! Full consistency check of an engine's state.

use std::collections::BTreeMap;

use mt_core::PassengerId;
use mt_network::Router;
use mt_transit::{PassengerState, TrainState};

use crate::{Engine, SimError, SimResult};

fn violation(msg: String) -> SimError {
    SimError::Invariant(msg)
}

impl<R: Router> Engine<R> {
    /// Verify ownership, state/location coupling, capacities, line
    /// uniqueness, and committed next hops.
    ///
    /// Runs after every tick when `config.check_invariants` is set.  The
    /// check only reads; it never repairs.
    pub fn check_invariants(&self) -> SimResult<()> {
        let mut owners: BTreeMap<PassengerId, &'static str> = BTreeMap::new();
        let mut claim = |pid: PassengerId, owner: &'static str| -> SimResult<()> {
            match owners.insert(pid, owner) {
                None => Ok(()),
                Some(prev) => Err(violation(format!("passenger {pid} held by both a {prev} and a {owner}"))),
            }
        };

        for station in self.topology.stations() {
            if station.waiting.len() > station.capacity && self.failure.is_none() {
                return Err(violation(format!(
                    "station {} holds {} > {} without failing",
                    station.id,
                    station.waiting.len(),
                    station.capacity
                )));
            }
            for &pid in &station.waiting {
                claim(pid, "station")?;
                let p = self
                    .passengers
                    .get(pid)
                    .ok_or_else(|| violation(format!("queued passenger {pid} not in store")))?;
                if !p.state.is_at_station() || p.station != Some(station.id) || p.train.is_some() {
                    return Err(violation(format!(
                        "passenger {pid} queued at {} but is {:?} (station {:?}, train {:?})",
                        station.id, p.state, p.station, p.train
                    )));
                }
            }
        }

        for train in &self.trains {
            if train.onboard.len() > train.capacity {
                return Err(violation(format!(
                    "train {} carries {} > {}",
                    train.id,
                    train.onboard.len(),
                    train.capacity
                )));
            }
            let committed_to = match train.state {
                TrainState::Alighting => Some(train.current_station),
                TrainState::Boarding | TrainState::Moving => Some(train.next_station),
                TrainState::Idle => None,
            };
            for &pid in &train.onboard {
                claim(pid, "train")?;
                let p = self
                    .passengers
                    .get(pid)
                    .ok_or_else(|| violation(format!("onboard passenger {pid} not in store")))?;
                if p.state != PassengerState::OnTrain || p.train != Some(train.id) || p.station.is_some() {
                    return Err(violation(format!(
                        "passenger {pid} aboard {} but is {:?} (station {:?}, train {:?})",
                        train.id, p.state, p.station, p.train
                    )));
                }
                if committed_to.is_none() || p.next_hop != committed_to {
                    return Err(violation(format!(
                        "passenger {pid} aboard {} ({:?}) committed to {:?}",
                        train.id, train.state, p.next_hop
                    )));
                }
            }
        }

        if owners.len() != self.passengers.len() {
            let orphan = self.passengers.iter().find(|p| !owners.contains_key(&p.id));
            return Err(violation(format!(
                "passenger {:?} is held by neither a station nor a train",
                orphan.map(|p| p.id)
            )));
        }

        for line in self.topology.lines() {
            for (i, s) in line.stations.iter().enumerate() {
                if line.stations[..i].contains(s) {
                    return Err(violation(format!("line {} lists {s} twice", line.id)));
                }
            }
        }

        Ok(())
    }
}
