//! `mt-policy`: boarding order at a station.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                    |
//! |-------------|-------------------------------------------------------------|
//! | [`context`] | `BoardingContext<'a>`: read-only view for scoring          |
//! | [`policy`]  | `BoardingPolicy` trait and the built-in policies            |
//! | [`kind`]    | `PolicyKind`: names the built-ins for commands and config  |
//! | [`rank`]    | `rank_waiting`: stable descending sort of a station queue  |
//!
//! # Design notes
//!
//! When a train boards at a station, the queue is re-ordered by descending
//! policy score before admission.  The sort is stable, so passengers with
//! equal scores keep their arrival order and every policy falls back to FIFO
//! on ties.
//!
//! Policies only read.  A policy that needs state across ticks must derive
//! it from the passenger (its `age`, for example) rather than hold it.

pub mod context;
pub mod kind;
pub mod policy;
pub mod rank;


pub use context::BoardingContext;
pub use kind::PolicyKind;
pub use policy::{AgingPriority, BoardingPolicy, Fifo, ShortestRemainingHops};
pub use rank::rank_waiting;
