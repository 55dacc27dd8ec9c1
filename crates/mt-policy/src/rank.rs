//! Queue ranking.

use std::cmp::Reverse;

use mt_core::PassengerId;
use mt_transit::PassengerStore;

use crate::{BoardingContext, BoardingPolicy};

/// Stable sort of `queue` by descending `policy` score.
///
/// Ids missing from `passengers` score zero and sink to the back; the engine
/// treats such an id as an invariant breach elsewhere.
pub fn rank_waiting(
    queue:      &mut [PassengerId],
    passengers: &PassengerStore,
    policy:     &dyn BoardingPolicy,
    ctx:        &BoardingContext<'_>,
) {
    queue.sort_by_cached_key(|&id| {
        Reverse(passengers.get(id).map_or(0, |p| policy.score(p, ctx)))
    });
}
