//! The `PassengerStore`: every live passenger, keyed by id.

use std::collections::BTreeMap;

use mt_core::{IdSequence, PassengerId, StationId, StationType, Tick};

use crate::{Passenger, PassengerState, TransitResult};

/// Owns all live passengers.
///
/// Station queues and train onboard lists hold ids into this store.  A
/// passenger leaves the store when it completes; its id is never reused.
#[derive(Debug, Default)]
pub struct PassengerStore {
    passengers: BTreeMap<PassengerId, Passenger>,
    ids:        IdSequence<PassengerId>,
}

impl PassengerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a waiting passenger at `origin`.
    ///
    /// Validation happens before an id is allocated, so a rejected spawn does
    /// not consume one.
    pub fn spawn(
        &mut self,
        origin:      StationId,
        origin_kind: StationType,
        destination: StationType,
        now:         Tick,
    ) -> TransitResult<PassengerId> {
        let passenger = Passenger::new(self.ids.peek(), origin, origin_kind, destination, now)?;
        let id = self.ids.next_id();
        self.passengers.insert(id, passenger);
        Ok(id)
    }

    #[inline]
    pub fn get(&self, id: PassengerId) -> Option<&Passenger> {
        self.passengers.get(&id)
    }

    #[inline]
    pub fn get_mut(&mut self, id: PassengerId) -> Option<&mut Passenger> {
        self.passengers.get_mut(&id)
    }

    pub fn remove(&mut self, id: PassengerId) -> Option<Passenger> {
        self.passengers.remove(&id)
    }

    /// All live passengers in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &Passenger> + '_ {
        self.passengers.values()
    }

    pub fn len(&self) -> usize {
        self.passengers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.passengers.is_empty()
    }

    /// Add one tick of age to every passenger sitting in a station queue.
    pub fn age_waiting(&mut self) {
        for p in self.passengers.values_mut() {
            if p.state.is_at_station() {
                p.age += 1;
            }
        }
    }

    /// Number of passengers in `state`.
    pub fn count_in(&self, state: PassengerState) -> usize {
        self.passengers.values().filter(|p| p.state == state).count()
    }
}
