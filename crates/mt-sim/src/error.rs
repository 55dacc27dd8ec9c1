use thiserror::Error;

use mt_core::{LineId, PassengerId, StationId, StationType, TrainId};
use mt_network::NetworkError;
use mt_transit::TransitionError;

/// How the caller should treat a [`SimError`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// The call was rejected; engine state is unchanged.
    Usage,
    /// Internal state was inconsistent; the engine has halted.
    Protocol,
    /// The engine halted earlier and refuses further work.
    Halted,
}

#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Network(#[from] NetworkError),

    #[error("illegal transition: {0}")]
    Transition(#[from] TransitionError),

    #[error(
        "passenger {passenger} on train {train} is committed to {committed:?} \
         but the train is alighting at {station}"
    )]
    Desync {
        train:     TrainId,
        passenger: PassengerId,
        station:   StationId,
        committed: Option<StationId>,
    },

    #[error("invariant violated: {0}")]
    Invariant(String),

    #[error("train {0} not found")]
    TrainNotFound(TrainId),

    #[error("train {0} has already been started")]
    TrainAlreadyStarted(TrainId),

    #[error("line {line} has {len} station(s); a train needs at least 2")]
    LineTooShort { line: LineId, len: usize },

    #[error("capacity must be positive")]
    InvalidCapacity,

    #[error("train speed must be positive and finite, got {0}")]
    InvalidSpeed(f32),

    #[error("station {station} already has destination type {kind}")]
    SameOriginDestination { station: StationId, kind: StationType },

    #[error("station {0} is in service (train stop or waiting passengers)")]
    StationInService(StationId),

    #[error("line {0} still has trains running on it")]
    LineInService(LineId),

    #[error("engine halted after a protocol violation")]
    Halted,

    #[error("simulation configuration error: {0}")]
    Config(String),
}

impl SimError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SimError::Transition(_) | SimError::Desync { .. } | SimError::Invariant(_) => {
                ErrorKind::Protocol
            }
            SimError::Halted => ErrorKind::Halted,
            SimError::Network(_)
            | SimError::TrainNotFound(_)
            | SimError::TrainAlreadyStarted(_)
            | SimError::LineTooShort { .. }
            | SimError::InvalidCapacity
            | SimError::InvalidSpeed(_)
            | SimError::SameOriginDestination { .. }
            | SimError::StationInService(_)
            | SimError::LineInService(_)
            | SimError::Config(_) => ErrorKind::Usage,
        }
    }
}

pub type SimResult<T> = Result<T, SimError>;
