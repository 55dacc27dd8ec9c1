//! Passengers and the passenger state machine.
//!
//! ```text
//!            board                 complete
//!  WAITING ─────────► ON_TRAIN ─────────────► COMPLETED
//!                      │    ▲
//!          transfer_at │    │ reboard
//!                      ▼    │
//!                   TRANSFERRING
//! ```
//!
//! Every transition checks its precondition and returns
//! [`TransitionError`] without touching the passenger when it does not hold.
//! Location fields move with the state: a waiting or transferring passenger
//! has a station and no train, an on-train passenger a train and no station,
//! and a completed one neither.

use mt_core::{PassengerId, StationId, StationType, Tick, TrainId};

use crate::{TransitResult, TransitionError};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PassengerState {
    Waiting,
    OnTrain,
    Transferring,
    Completed,
}

impl PassengerState {
    /// `true` for the two states in which a passenger sits in a station queue.
    #[inline]
    pub fn is_at_station(self) -> bool {
        matches!(self, PassengerState::Waiting | PassengerState::Transferring)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Passenger {
    pub id:          PassengerId,
    pub origin:      StationId,
    pub destination: StationType,
    pub state:       PassengerState,
    pub train:       Option<TrainId>,
    pub station:     Option<StationId>,
    /// The station this passenger is committed to reaching next.
    pub next_hop:    Option<StationId>,
    /// Ticks spent in a station queue.
    pub age:         u64,
    pub spawned_at:  Tick,
}

impl Passenger {
    /// A new passenger waiting at `origin`.
    ///
    /// # Errors
    /// [`TransitionError::SameOriginDestination`] if `origin_kind` already
    /// equals `destination`.
    pub fn new(
        id:          PassengerId,
        origin:      StationId,
        origin_kind: StationType,
        destination: StationType,
        now:         Tick,
    ) -> TransitResult<Self> {
        if origin_kind == destination {
            return Err(TransitionError::SameOriginDestination(destination));
        }
        Ok(Self {
            id,
            origin,
            destination,
            state:      PassengerState::Waiting,
            train:      None,
            station:    Some(origin),
            next_hop:   None,
            age:        0,
            spawned_at: now,
        })
    }

    fn illegal(&self, action: &'static str) -> TransitionError {
        TransitionError::Passenger { id: self.id, action, state: self.state }
    }

    // ── Transitions ───────────────────────────────────────────────────────

    /// WAITING → ON_TRAIN.
    pub fn board(&mut self, train: TrainId) -> TransitResult<()> {
        if self.state != PassengerState::Waiting || self.train.is_some() {
            return Err(self.illegal("board"));
        }
        self.state = PassengerState::OnTrain;
        self.train = Some(train);
        self.station = None;
        Ok(())
    }

    /// ON_TRAIN → COMPLETED.
    pub fn complete(&mut self) -> TransitResult<()> {
        if self.state != PassengerState::OnTrain || self.train.is_none() {
            return Err(self.illegal("complete"));
        }
        self.state = PassengerState::Completed;
        self.train = None;
        self.station = None;
        self.next_hop = None;
        Ok(())
    }

    /// ON_TRAIN → TRANSFERRING, alighting at `station`.
    pub fn transfer_at(&mut self, station: StationId) -> TransitResult<()> {
        if self.state != PassengerState::OnTrain || self.train.is_none() {
            return Err(self.illegal("transfer"));
        }
        self.state = PassengerState::Transferring;
        self.train = None;
        self.station = Some(station);
        Ok(())
    }

    /// TRANSFERRING → ON_TRAIN.
    pub fn reboard(&mut self, train: TrainId) -> TransitResult<()> {
        if self.state != PassengerState::Transferring || self.train.is_some() {
            return Err(self.illegal("reboard"));
        }
        self.state = PassengerState::OnTrain;
        self.train = Some(train);
        self.station = None;
        Ok(())
    }

    /// Board from whichever station state the passenger is in.
    pub fn enter(&mut self, train: TrainId) -> TransitResult<()> {
        match self.state {
            PassengerState::Transferring => self.reboard(train),
            _ => self.board(train),
        }
    }
}
