//! The dwell protocol: one phase of one train per call.
//!
//! # Committed next hop
//!
//! Every onboard passenger carries the station it is riding towards.  The
//! protocol keeps it equal to the train's next station while the train
//! boards or moves, and equal to the current station once it arrives, which
//! is what ALIGHTING checks.  A passenger only boards, or stays aboard, when
//! its freshly computed next hop *is* the train's next station; a next hop
//! merely somewhere on the line is not enough, because the train may be
//! heading the other way.
//!
//! # Borrowing
//!
//! Each handler destructures `Engine` so the topology, trains, passengers,
//! and routing cache can be borrowed independently.

use mt_core::{PassengerId, StationId, Tick, TrainId};
use mt_network::Router;
use mt_policy::{BoardingContext, rank_waiting};
use mt_transit::{Direction, PassengerStore, Train};
use tracing::{debug, trace};

use crate::engine::{FailureKind, TickReport, record_failure};
use crate::{Engine, SimError, SimResult};

fn missing(passenger: PassengerId, train: TrainId) -> SimError {
    SimError::Invariant(format!("passenger {passenger} listed on train {train} is not in the store"))
}

/// Remove the first occurrence of `id` from `list`.
#[inline]
fn take_out(list: &mut Vec<PassengerId>, id: PassengerId) {
    if let Some(i) = list.iter().position(|&x| x == id) {
        list.remove(i);
    }
}

/// `true` if `train`'s next station is still on its line.
fn next_on_line(topology: &mt_network::Topology, train: &Train) -> bool {
    topology.line(train.line).is_some_and(|l| l.contains(train.next_station))
}

impl<R: Router> Engine<R> {
    // ── ALIGHTING ─────────────────────────────────────────────────────────

    pub(crate) fn alight(&mut self, idx: usize, report: &mut TickReport) -> SimResult<()> {
        let Engine { topology, trains, passengers, routes, completed, failure, tick, .. } = self;
        let train = &mut trains[idx];
        let here = train.current_station;
        let here_kind = topology.require_station(here)?.kind;
        let serves_next = next_on_line(topology, train);

        check_committed(passengers, train)?;

        for pid in train.onboard.clone() {
            let p = passengers.get_mut(pid).ok_or_else(|| missing(pid, train.id))?;
            let destination = p.destination;

            if here_kind == destination {
                p.complete()?;
                take_out(&mut train.onboard, pid);
                passengers.remove(pid);
                *completed += 1;
                report.completed += 1;
                trace!(passenger = %pid, station = %here, "completed");
                continue;
            }

            let hop = routes.next_hop(topology, here, destination)?;
            if serves_next && hop == Some(train.next_station) {
                p.next_hop = hop;
                trace!(passenger = %pid, train = %train.id, next_hop = ?hop, "stays aboard");
                continue;
            }

            p.transfer_at(here)?;
            p.next_hop = hop;
            take_out(&mut train.onboard, pid);
            topology.waiting_mut(here)?.push(pid);
            report.transferred += 1;
            trace!(passenger = %pid, station = %here, next_hop = ?hop, "transferring");

            if topology.require_station(here)?.is_overcrowded() {
                record_failure(failure, *tick, here, FailureKind::Overcrowded);
            }
        }

        train.finish_alighting()?;
        debug!(train = %train.id, station = %here, onboard = train.onboard.len(), "alighting done");
        Ok(())
    }

    // ── BOARDING ──────────────────────────────────────────────────────────

    pub(crate) fn board(&mut self, idx: usize, now: Tick, report: &mut TickReport) -> SimResult<()> {
        let Engine { topology, trains, passengers, routes, policy, .. } = self;
        let train = &mut trains[idx];
        let here = train.current_station;
        let serves_next = next_on_line(topology, train);

        let mut order = topology.require_station(here)?.waiting.clone();
        {
            let ctx = BoardingContext::new(now, here, topology);
            rank_waiting(&mut order, passengers, &**policy, &ctx);
        }
        topology.waiting_mut(here)?.clone_from(&order);

        for pid in order {
            if train.is_full() {
                break;
            }
            let p = passengers.get_mut(pid).ok_or_else(|| {
                SimError::Invariant(format!("passenger {pid} queued at {here} is not in the store"))
            })?;
            if !p.state.is_at_station() {
                return Err(SimError::Invariant(format!(
                    "passenger {pid} queued at {here} is {:?}",
                    p.state
                )));
            }

            let hop = routes.next_hop(topology, here, p.destination)?;
            if !serves_next || hop != Some(train.next_station) {
                trace!(passenger = %pid, train = %train.id, next_hop = ?hop, "not boardable");
                continue;
            }

            p.enter(train.id)?;
            p.next_hop = hop;
            train.onboard.push(pid);
            take_out(topology.waiting_mut(here)?, pid);
            report.boarded += 1;
            trace!(passenger = %pid, train = %train.id, "boarded");
        }

        train.finish_boarding()?;
        debug!(train = %train.id, station = %here, onboard = train.onboard.len(), "boarding done");
        Ok(())
    }

    // ── MOVING ────────────────────────────────────────────────────────────

    pub(crate) fn advance(&mut self, idx: usize, report: &mut TickReport) -> SimResult<()> {
        let Engine { topology, trains, .. } = self;
        let train = &mut trains[idx];
        train.progress += train.speed;
        if train.progress < 1.0 {
            return Ok(());
        }

        let line = topology.require_line(train.line)?;
        let arrived = train.next_station;
        let index = line.position(arrived).ok_or_else(|| {
            SimError::Invariant(format!("train {} heading to {arrived}, which left {}", train.id, train.line))
        })?;

        // Bounce at either end.
        let direction = if index == 0 {
            Direction::Forward
        } else if index + 1 == line.len() {
            Direction::Backward
        } else {
            train.direction
        };
        let next = index
            .checked_add_signed(direction.sign())
            .and_then(|i| line.stations.get(i).copied())
            .ok_or_else(|| SimError::Invariant(format!("line {} too short for train {}", train.line, train.id)))?;

        train.current_station = arrived;
        train.station_index = index;
        train.direction = direction;
        train.next_station = next;
        train.arrive()?;
        report.arrivals += 1;
        debug!(train = %train.id, station = %arrived, next = %next, ?direction, "arrived");
        Ok(())
    }
}

/// Every onboard passenger must be committed to the station the train is
/// alighting at.  Checked before anyone moves.
fn check_committed(passengers: &PassengerStore, train: &Train) -> SimResult<()> {
    let here: StationId = train.current_station;
    for &pid in &train.onboard {
        let p = passengers.get(pid).ok_or_else(|| missing(pid, train.id))?;
        if p.next_hop != Some(here) {
            return Err(SimError::Desync {
                train:     train.id,
                passenger: pid,
                station:   here,
                committed: p.next_hop,
            });
        }
    }
    Ok(())
}
