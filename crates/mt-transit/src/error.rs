//! State machine transition errors.

use thiserror::Error;

use mt_core::{PassengerId, StationType, TrainId};

use crate::{PassengerState, TrainState};

/// An illegal FSM transition.
///
/// These are protocol violations, never user input errors.  The entity is
/// left exactly as it was before the call.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransitionError {
    #[error("passenger {id}: cannot {action} from {state:?}")]
    Passenger {
        id:     PassengerId,
        action: &'static str,
        state:  PassengerState,
    },

    #[error("train {id}: cannot {action} from {state:?}")]
    Train {
        id:     TrainId,
        action: &'static str,
        state:  TrainState,
    },

    #[error("train {0}: arrived before progress reached 1.0")]
    EarlyArrival(TrainId),

    #[error("passenger origin already has destination type {0}")]
    SameOriginDestination(StationType),
}

pub type TransitResult<T> = Result<T, TransitionError>;
