//! `mt-network`: topology store, adjacency, and routing.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                      |
//! |---------------|---------------------------------------------------------------|
//! | [`topology`]  | `Topology` (stations + lines + R-tree), `Station`, `Line`     |
//! | [`adjacency`] | `Adjacency`: station → neighbours in canonical order         |
//! | [`router`]    | `Router` trait, `Route`, `BfsRouter`, `estimate_remaining_hops` |
//! | [`cache`]     | `RoutingCache<R>`: memoised `(source, type)` routes          |
//! | [`error`]     | `NetworkError`, `NetworkResult<T>`                            |
//!
//! # Graph model
//!
//! There is no explicit edge list.  Two stations are adjacent when they sit
//! next to each other in some line's sequence; a station shared by several
//! lines is a transfer point.  Every structural mutation bumps
//! [`Topology::version`], and the cache refuses to answer for any version
//! other than the one its entries were computed against.
//!
//! # Canonical order
//!
//! Neighbours are enumerated by ascending `LineId`, then by position in that
//! line's sequence, previous neighbour before next.  BFS discovery order, and
//! therefore tie-breaking between equally short routes, follows from it.
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on `Route` and `RouteKey`. |

pub mod adjacency;
pub mod cache;
pub mod error;
pub mod router;
pub mod topology;

#[cfg(test)]
mod tests;

pub use adjacency::Adjacency;
pub use cache::{RouteKey, RoutingCache};
pub use error::{NetworkError, NetworkResult};
pub use router::{BfsRouter, Route, Router, estimate_remaining_hops};
pub use topology::{Line, Station, Topology};
