//! `mt-core`: foundational types for the `metro` transit simulator.
//!
//! This crate is a dependency of every other `mt-*` crate.  It has no `mt-*`
//! dependencies and only `thiserror` (plus optional `serde`) from outside.
//!
//! # What lives here
//!
//! | Module           | Contents                                              |
//! |------------------|-------------------------------------------------------|
//! | [`ids`]          | `StationId`, `LineId`, `TrainId`, `PassengerId`, `IdSequence` |
//! | [`station_type`] | `StationType`: the closed set of station shapes      |
//! | [`geo`]          | `Point`, `Polyline`, octilinear edge paths            |
//! | [`time`]         | `Tick`, `TickClock`                                   |
//! | [`error`]        | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public value types.  |

pub mod error;
pub mod geo;
pub mod ids;
pub mod station_type;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use geo::{Point, Polyline};
pub use ids::{IdSequence, LineId, PassengerId, SequentialId, StationId, TrainId};
pub use station_type::StationType;
pub use time::{Tick, TickClock};
