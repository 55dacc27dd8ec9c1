//! The `Engine` struct: topology facade, entity stores, and the tick.

use mt_core::{
    IdSequence, LineId, PassengerId, Point, StationId, StationType, Tick, TrainId,
};
use mt_network::{BfsRouter, Line, Route, Router, RoutingCache, Station, Topology};
use mt_policy::{BoardingPolicy, PolicyKind};
use mt_transit::{Passenger, PassengerStore, Train, TrainState};
use tracing::{debug, error, info};

use crate::{SimConfig, SimError, SimResult};

// ── Outcomes ──────────────────────────────────────────────────────────────────

/// Why the network failed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FailureKind {
    /// A spawn found the station queue already full.
    QueueFull,
    /// A transferring passenger pushed the queue past its capacity.
    Overcrowded,
}

/// The permanent failure record.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Failure {
    pub tick:    Tick,
    pub station: StationId,
    pub kind:    FailureKind,
}

/// Result of [`Engine::spawn_passenger_at`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SpawnOutcome {
    Spawned(PassengerId),
    /// The station queue was full (or the network had already failed); the
    /// queue is unchanged.
    Rejected,
}

/// What one call to [`Engine::tick`] did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    pub tick:        Tick,
    /// Trains that reached a station.
    pub arrivals:    usize,
    pub boarded:     usize,
    /// Passengers delivered to a station of their destination type.
    pub completed:   usize,
    /// Passengers moved from a train into a station queue.
    pub transferred: usize,
    /// Set on the tick that failed the network.
    pub failure:     Option<Failure>,
    /// `true` when the engine had already failed and nothing ran.
    pub inert:       bool,
}

/// Set the failure record unless one exists.  The first failure sticks.
pub(crate) fn record_failure(
    slot:    &mut Option<Failure>,
    tick:    Tick,
    station: StationId,
    kind:    FailureKind,
) {
    if slot.is_none() {
        info!(%tick, %station, ?kind, "network failed");
        *slot = Some(Failure { tick, station, kind });
    }
}

impl TickReport {
    pub(crate) fn new(tick: Tick) -> Self {
        Self { tick, ..Self::default() }
    }
}

// ── Engine ────────────────────────────────────────────────────────────────────

/// The simulation engine.
///
/// Owns the topology, every train (in creation order) and passenger, the
/// routing cache, and the active boarding policy.  Each call to
/// [`tick`](Self::tick) advances every train by exactly one dwell phase:
///
/// ```text
/// for train in creation order:
///   IDLE       → nothing
///   ALIGHTING  → complete / stay / transfer each onboard passenger
///   BOARDING   → rank the queue, admit boardable passengers
///   MOVING     → progress += speed; arrive at ≥ 1
/// age every passenger waiting in a station queue
/// ```
///
/// Mutations are rejected with a usage error and leave the engine untouched.
/// A protocol violation during a tick halts the engine for good.  A capacity
/// failure is not an error: it is recorded, and later ticks are inert.
///
/// Build via [`SimBuilder`][crate::SimBuilder] or [`Engine::new`].
pub struct Engine<R: Router = BfsRouter> {
    pub(crate) config:     SimConfig,
    pub(crate) topology:   Topology,
    pub(crate) trains:     Vec<Train>,
    pub(crate) train_ids:  IdSequence<TrainId>,
    pub(crate) passengers: PassengerStore,
    pub(crate) routes:     RoutingCache<R>,
    pub(crate) policy:     Box<dyn BoardingPolicy>,
    pub(crate) tick:       Tick,
    pub(crate) completed:  u64,
    pub(crate) failure:    Option<Failure>,
    pub(crate) halted:     bool,
}

impl Engine<BfsRouter> {
    /// An empty engine with the default router.
    pub fn new(config: SimConfig) -> SimResult<Self> {
        Self::with_router(config, BfsRouter)
    }
}

impl<R: Router> Engine<R> {
    pub fn with_router(config: SimConfig, router: R) -> SimResult<Self> {
        config.validate()?;
        Ok(Self {
            policy:     config.boarding_policy.into_policy(),
            config,
            topology:   Topology::new(),
            trains:     Vec::new(),
            train_ids:  IdSequence::new(),
            passengers: PassengerStore::new(),
            routes:     RoutingCache::new(router),
            tick:       Tick::ZERO,
            completed:  0,
            failure:    None,
            halted:     false,
        })
    }

    fn ensure_live(&self) -> SimResult<()> {
        if self.halted { Err(SimError::Halted) } else { Ok(()) }
    }

    /// Re-point every train's `station_index` at its current station after
    /// a line's sequence changed.
    fn resync_trains(&mut self) {
        for train in &mut self.trains {
            if let Some(i) = self.topology.line(train.line).and_then(|l| l.position(train.current_station)) {
                train.station_index = i;
            }
        }
    }

    /// Re-route every queued passenger against the edited topology.
    /// Onboard passengers keep their committed hop until they alight.
    fn refresh_waiting_hops(&mut self) -> SimResult<()> {
        let Engine { topology, passengers, routes, .. } = self;
        for station in topology.stations() {
            for &pid in &station.waiting {
                if let Some(p) = passengers.get_mut(pid) {
                    p.next_hop = routes.next_hop(topology, station.id, p.destination)?;
                }
            }
        }
        Ok(())
    }

    fn topology_changed(&mut self) -> SimResult<()> {
        self.routes.invalidate();
        self.resync_trains();
        self.refresh_waiting_hops()
    }

    // ── Topology mutation ─────────────────────────────────────────────────

    /// Add a station at the origin with the configured capacity.
    pub fn add_station(&mut self, kind: StationType) -> SimResult<StationId> {
        self.add_station_at(kind, Point::default())
    }

    pub fn add_station_at(&mut self, kind: StationType, position: Point) -> SimResult<StationId> {
        self.add_station_with_capacity(kind, position, self.config.station_capacity)
    }

    pub fn add_station_with_capacity(
        &mut self,
        kind:     StationType,
        position: Point,
        capacity: usize,
    ) -> SimResult<StationId> {
        self.ensure_live()?;
        if capacity == 0 {
            return Err(SimError::InvalidCapacity);
        }
        let id = self.topology.add_station(kind, position, capacity)?;
        self.topology_changed()?;
        Ok(id)
    }

    /// Remove a station and strip it from every line.
    ///
    /// Rejected with [`SimError::StationInService`] while a train stands at
    /// or is heading to it, or while passengers wait there.
    pub fn remove_station(&mut self, id: StationId) -> SimResult<()> {
        self.ensure_live()?;
        let station = self.topology.require_station(id)?;
        let served = self.trains.iter().any(|t| t.current_station == id || t.next_station == id);
        if served || !station.waiting.is_empty() {
            return Err(SimError::StationInService(id));
        }
        self.topology.remove_station(id)?;
        self.topology_changed()?;
        Ok(())
    }

    pub fn add_line(&mut self) -> SimResult<LineId> {
        self.ensure_live()?;
        let id = self.topology.add_line();
        self.topology_changed()?;
        Ok(id)
    }

    /// Rejected with [`SimError::LineInService`] while trains run on it.
    pub fn remove_line(&mut self, id: LineId) -> SimResult<()> {
        self.ensure_live()?;
        self.topology.require_line(id)?;
        if self.trains.iter().any(|t| t.line == id) {
            return Err(SimError::LineInService(id));
        }
        self.topology.remove_line(id)?;
        self.topology_changed()?;
        Ok(())
    }

    /// Append `station` to `line`, or insert it before `index`.
    ///
    /// Trains on the line keep their cached next station, so a station
    /// inserted into the hop a train is making is served on a later pass.
    pub fn add_station_to_line(
        &mut self,
        line:    LineId,
        station: StationId,
        index:   Option<usize>,
    ) -> SimResult<usize> {
        self.ensure_live()?;
        let at = self.topology.insert_station(line, station, index)?;
        self.topology_changed()?;
        Ok(at)
    }

    // ── Trains ────────────────────────────────────────────────────────────

    /// Put an idle train on the first station of `line`, heading forward.
    pub fn add_train(&mut self, line: LineId, capacity: usize, speed: f32) -> SimResult<TrainId> {
        self.ensure_live()?;
        let stations = &self.topology.require_line(line)?.stations;
        if stations.len() < 2 {
            return Err(SimError::LineTooShort { line, len: stations.len() });
        }
        if capacity == 0 {
            return Err(SimError::InvalidCapacity);
        }
        if !(speed.is_finite() && speed > 0.0) {
            return Err(SimError::InvalidSpeed(speed));
        }
        let id = self.train_ids.next_id();
        let train = Train::new(id, line, stations, capacity, speed);
        debug!(train = %id, %line, at = %train.current_station, capacity, "train added");
        self.trains.push(train);
        Ok(id)
    }

    /// IDLE → ALIGHTING.  Starting twice is a usage error.
    pub fn start_train(&mut self, id: TrainId) -> SimResult<()> {
        self.ensure_live()?;
        let train = self.trains.iter_mut().find(|t| t.id == id).ok_or(SimError::TrainNotFound(id))?;
        if train.state != TrainState::Idle {
            return Err(SimError::TrainAlreadyStarted(id));
        }
        train.start()?;
        debug!(train = %id, "train started");
        Ok(())
    }

    // ── Passengers ────────────────────────────────────────────────────────

    /// Create a passenger waiting at `station` for any station of type
    /// `destination`.
    ///
    /// A full queue rejects the spawn and fails the network.  Once failed,
    /// every spawn is rejected.
    pub fn spawn_passenger_at(
        &mut self,
        station:     StationId,
        destination: StationType,
    ) -> SimResult<SpawnOutcome> {
        self.ensure_live()?;
        let s = self.topology.require_station(station)?;
        let (origin_kind, full) = (s.kind, s.is_full());
        if origin_kind == destination {
            return Err(SimError::SameOriginDestination { station, kind: destination });
        }
        if self.failure.is_some() {
            return Ok(SpawnOutcome::Rejected);
        }
        if full {
            record_failure(&mut self.failure, self.tick, station, FailureKind::QueueFull);
            return Ok(SpawnOutcome::Rejected);
        }

        let id = self.passengers.spawn(station, origin_kind, destination, self.tick)?;
        let hop = self.routes.next_hop(&self.topology, station, destination)?;
        if let Some(p) = self.passengers.get_mut(id) {
            p.next_hop = hop;
        }
        self.topology.waiting_mut(station)?.push(id);
        debug!(passenger = %id, %station, %destination, next_hop = ?hop, "passenger spawned");
        Ok(SpawnOutcome::Spawned(id))
    }

    // ── Policy ────────────────────────────────────────────────────────────

    pub fn set_boarding_policy(&mut self, kind: PolicyKind) {
        debug!(policy = kind.as_str(), "boarding policy set");
        self.policy = kind.into_policy();
    }

    /// Install a custom policy.
    pub fn set_policy<P: BoardingPolicy>(&mut self, policy: P) {
        debug!(policy = policy.name(), "boarding policy set");
        self.policy = Box::new(policy);
    }

    pub fn policy_name(&self) -> &'static str {
        self.policy.name()
    }

    // ── Tick ──────────────────────────────────────────────────────────────

    /// Advance every train by one phase, then age waiting passengers.
    ///
    /// On a failed engine this does nothing and returns an inert report.  A
    /// protocol violation halts the engine and is returned; every later call
    /// returns [`SimError::Halted`].
    pub fn tick(&mut self) -> SimResult<TickReport> {
        self.ensure_live()?;
        let now = self.tick;
        if self.failure.is_some() {
            return Ok(TickReport { inert: true, ..TickReport::new(now) });
        }

        let mut report = TickReport::new(now);
        let result = self.run_trains(now, &mut report).and_then(|()| {
            self.passengers.age_waiting();
            if self.config.check_invariants { self.check_invariants() } else { Ok(()) }
        });
        if let Err(e) = result {
            error!(tick = %now, error = %e, "protocol violation, engine halted");
            self.halted = true;
            return Err(e);
        }

        report.failure = self.failure.filter(|f| f.tick == now);
        self.tick = now.next();
        Ok(report)
    }

    fn run_trains(&mut self, now: Tick, report: &mut TickReport) -> SimResult<()> {
        for idx in 0..self.trains.len() {
            match self.trains[idx].state {
                TrainState::Idle      => {}
                TrainState::Alighting => self.alight(idx, report)?,
                TrainState::Boarding  => self.board(idx, now, report)?,
                TrainState::Moving    => self.advance(idx, report)?,
            }
        }
        Ok(())
    }

    // ── Routing queries ───────────────────────────────────────────────────

    /// Cached route from `source` to the nearest station of `destination`.
    pub fn compute_route(
        &mut self,
        source:      StationId,
        destination: StationType,
    ) -> SimResult<Option<Route>> {
        Ok(self.routes.route(&self.topology, source, destination)?.cloned())
    }

    pub fn next_hop(
        &mut self,
        source:      StationId,
        destination: StationType,
    ) -> SimResult<Option<StationId>> {
        Ok(self.routes.next_hop(&self.topology, source, destination)?)
    }

    pub fn can_route(&mut self, source: StationId, destination: StationType) -> SimResult<bool> {
        Ok(self.routes.can_route(&self.topology, source, destination)?)
    }

    /// Uncached hop count over the live topology.
    pub fn estimate_remaining_hops(
        &self,
        source:      StationId,
        destination: StationType,
    ) -> SimResult<Option<usize>> {
        Ok(mt_network::estimate_remaining_hops(&self.topology, source, destination)?)
    }

    pub fn routing_cache(&self) -> &RoutingCache<R> {
        &self.routes
    }

    // ── Queries ───────────────────────────────────────────────────────────

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    pub fn station(&self, id: StationId) -> Option<&Station> {
        self.topology.station(id)
    }

    pub fn line(&self, id: LineId) -> Option<&Line> {
        self.topology.line(id)
    }

    pub fn station_count(&self) -> usize {
        self.topology.station_count()
    }

    pub fn line_count(&self) -> usize {
        self.topology.line_count()
    }

    pub fn line_contains(&self, line: LineId, station: StationId) -> SimResult<bool> {
        Ok(self.topology.line_contains(line, station)?)
    }

    pub fn neighbours(&self, station: StationId) -> SimResult<Vec<StationId>> {
        self.topology.require_station(station)?;
        Ok(self.topology.neighbours(station))
    }

    pub fn station_near(&self, point: Point, radius: f32) -> Option<StationId> {
        self.topology.station_near(point, radius)
    }

    /// Trains in creation order.
    pub fn trains(&self) -> &[Train] {
        &self.trains
    }

    pub fn train(&self, id: TrainId) -> Option<&Train> {
        self.trains.iter().find(|t| t.id == id)
    }

    pub fn train_count(&self) -> usize {
        self.trains.len()
    }

    /// A live (not yet completed) passenger.
    pub fn passenger(&self, id: PassengerId) -> Option<&Passenger> {
        self.passengers.get(id)
    }

    pub fn passengers(&self) -> &PassengerStore {
        &self.passengers
    }

    /// The tick the next call to [`tick`](Self::tick) will process.
    pub fn current_tick(&self) -> Tick {
        self.tick
    }

    /// Passengers delivered so far.  Never decreases.
    pub fn completed(&self) -> u64 {
        self.completed
    }

    pub fn is_failed(&self) -> bool {
        self.failure.is_some()
    }

    pub fn failure(&self) -> Option<Failure> {
        self.failure
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }
}
