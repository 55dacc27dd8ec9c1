//! Topology and routing error type.

use thiserror::Error;

use mt_core::{LineId, Point, StationId};

/// Errors produced by `mt-network`.
///
/// Every variant is a caller contract violation: the offending call is
/// rejected and the topology is left unchanged.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum NetworkError {
    #[error("station {0} not found")]
    StationNotFound(StationId),

    #[error("line {0} not found")]
    LineNotFound(LineId),

    #[error("station {station} is already on line {line}")]
    StationAlreadyOnLine { line: LineId, station: StationId },

    #[error("index {index} out of range for line {line} of length {len}")]
    IndexOutOfRange { line: LineId, index: usize, len: usize },

    #[error("station capacity must be positive")]
    InvalidCapacity,

    #[error("station position {0} is not finite")]
    InvalidPosition(Point),
}

pub type NetworkResult<T> = Result<T, NetworkError>;
