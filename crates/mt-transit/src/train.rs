//! Trains and the train state machine.
//!
//! ```text
//!  IDLE ──start──► ALIGHTING ──finish_alighting──► BOARDING
//!                     ▲                               │
//!                     └──arrive── MOVING ◄──finish_boarding
//! ```
//!
//! `start` fires once.  After it the cycle repeats for as long as the engine
//! runs.  The state machine only guards transitions; moving along the line
//! (updating `current_station`, `next_station`, `station_index` and
//! `direction`) is the dwell protocol's job.

use mt_core::{LineId, PassengerId, StationId, TrainId};

use crate::{TransitResult, TransitionError};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TrainState {
    Idle,
    Alighting,
    Boarding,
    Moving,
}

/// Direction of travel along the line's station sequence.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    /// Towards higher indices.
    Forward,
    /// Towards lower indices.
    Backward,
}

impl Direction {
    #[inline]
    pub fn sign(self) -> isize {
        match self {
            Direction::Forward  => 1,
            Direction::Backward => -1,
        }
    }

    #[inline]
    pub fn reversed(self) -> Self {
        match self {
            Direction::Forward  => Direction::Backward,
            Direction::Backward => Direction::Forward,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Train {
    pub id:              TrainId,
    pub line:            LineId,
    pub current_station: StationId,
    pub next_station:    StationId,
    pub station_index:   usize,
    pub direction:       Direction,
    pub state:           TrainState,
    /// Fraction of the current hop covered, `[0, 1)` outside MOVING.
    pub progress:        f32,
    /// Progress added per MOVING tick.
    pub speed:           f32,
    pub onboard:         Vec<PassengerId>,
    pub capacity:        usize,
}

impl Train {
    /// An idle train at index 0 of `stations`, heading forward.
    ///
    /// The caller guarantees `stations.len() >= 2`, `capacity > 0` and a
    /// positive finite `speed`; `Engine::add_train` enforces all three.
    pub fn new(
        id:       TrainId,
        line:     LineId,
        stations: &[StationId],
        capacity: usize,
        speed:    f32,
    ) -> Self {
        debug_assert!(stations.len() >= 2, "a train needs two stations");
        Self {
            id,
            line,
            current_station: stations[0],
            next_station:    stations[1],
            station_index:   0,
            direction:       Direction::Forward,
            state:           TrainState::Idle,
            progress:        0.0,
            speed,
            onboard:         Vec::with_capacity(capacity),
            capacity,
        }
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.onboard.len() >= self.capacity
    }

    #[inline]
    pub fn free_seats(&self) -> usize {
        self.capacity.saturating_sub(self.onboard.len())
    }

    fn illegal(&self, action: &'static str) -> TransitionError {
        TransitionError::Train { id: self.id, action, state: self.state }
    }

    // ── Transitions ───────────────────────────────────────────────────────

    /// IDLE → ALIGHTING.
    pub fn start(&mut self) -> TransitResult<()> {
        if self.state != TrainState::Idle {
            return Err(self.illegal("start"));
        }
        self.state = TrainState::Alighting;
        self.progress = 0.0;
        Ok(())
    }

    /// ALIGHTING → BOARDING.
    pub fn finish_alighting(&mut self) -> TransitResult<()> {
        if self.state != TrainState::Alighting {
            return Err(self.illegal("finish alighting"));
        }
        self.state = TrainState::Boarding;
        Ok(())
    }

    /// BOARDING → MOVING.
    pub fn finish_boarding(&mut self) -> TransitResult<()> {
        if self.state != TrainState::Boarding {
            return Err(self.illegal("finish boarding"));
        }
        self.state = TrainState::Moving;
        Ok(())
    }

    /// MOVING → ALIGHTING.  Requires `progress >= 1`; resets it to zero.
    pub fn arrive(&mut self) -> TransitResult<()> {
        if self.state != TrainState::Moving {
            return Err(self.illegal("arrive"));
        }
        if self.progress < 1.0 {
            return Err(TransitionError::EarlyArrival(self.id));
        }
        self.state = TrainState::Alighting;
        self.progress = 0.0;
        Ok(())
    }
}
