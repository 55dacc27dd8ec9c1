//! `mt-transit`: passengers, trains, and their state machines.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                 |
//! |---------------|----------------------------------------------------------|
//! | [`passenger`] | `Passenger`, `PassengerState` and its transitions        |
//! | [`train`]     | `Train`, `TrainState`, `Direction` and their transitions |
//! | [`store`]     | `PassengerStore`: live passengers keyed by id           |
//! | [`error`]     | `TransitionError`, `TransitResult<T>`                    |
//!
//! Nothing here knows about the topology or routing.  The dwell protocol in
//! `mt-sim` drives these state machines and keeps location fields and the
//! station/train id lists consistent with them.

pub mod error;
pub mod passenger;
pub mod store;
pub mod train;

#[cfg(test)]
mod tests;

pub use error::{TransitResult, TransitionError};
pub use passenger::{Passenger, PassengerState};
pub use store::PassengerStore;
pub use train::{Direction, Train, TrainState};
