//! Deterministic state hashing for replay and determinism checks.
//!
//! FNV-1a over every field the dwell protocol reads or writes.  Not
//! cryptographic; two engines fed the same commands must agree on it.

use mt_network::Router;
use mt_transit::{Direction, PassengerState, TrainState};

use crate::Engine;

/// FNV-1a offset basis for 64-bit.
const FNV_OFFSET: u64 = 0xcbf29ce484222325;
/// FNV-1a prime for 64-bit.
const FNV_PRIME: u64 = 0x00000100000001B3;

struct Fnv(u64);

impl Fnv {
    #[inline]
    fn byte(&mut self, b: u8) {
        self.0 = (self.0 ^ b as u64).wrapping_mul(FNV_PRIME);
    }

    #[inline]
    fn u32(&mut self, v: u32) {
        for b in v.to_le_bytes() {
            self.byte(b);
        }
    }

    #[inline]
    fn u64(&mut self, v: u64) {
        for b in v.to_le_bytes() {
            self.byte(b);
        }
    }
}

fn train_state_tag(s: TrainState) -> u8 {
    match s {
        TrainState::Idle      => 0,
        TrainState::Alighting => 1,
        TrainState::Boarding  => 2,
        TrainState::Moving    => 3,
    }
}

fn passenger_state_tag(s: PassengerState) -> u8 {
    match s {
        PassengerState::Waiting      => 0,
        PassengerState::OnTrain      => 1,
        PassengerState::Transferring => 2,
        PassengerState::Completed    => 3,
    }
}

impl<R: Router> Engine<R> {
    /// Hash of the simulated world: tick, score, failure flag, queues, trains
    /// and passengers, each walked in ascending id (or creation) order.
    pub fn state_hash(&self) -> u64 {
        let mut h = Fnv(FNV_OFFSET);
        h.u64(self.tick.0);
        h.u64(self.completed);
        h.byte(self.failure.is_some() as u8);

        for station in self.topology.stations() {
            h.u32(station.id.raw());
            h.u64(station.waiting.len() as u64);
            for pid in &station.waiting {
                h.u32(pid.raw());
            }
        }
        for line in self.topology.lines() {
            h.u32(line.id.raw());
            for s in &line.stations {
                h.u32(s.raw());
            }
        }
        for train in &self.trains {
            h.u32(train.id.raw());
            h.u32(train.current_station.raw());
            h.u32(train.next_station.raw());
            h.u64(train.station_index as u64);
            h.byte((train.direction == Direction::Forward) as u8);
            h.byte(train_state_tag(train.state));
            h.u32(train.progress.to_bits());
            h.u64(train.onboard.len() as u64);
            for pid in &train.onboard {
                h.u32(pid.raw());
            }
        }
        for p in self.passengers.iter() {
            h.u32(p.id.raw());
            h.byte(passenger_state_tag(p.state));
            h.u64(p.age);
            h.u32(p.next_hop.map_or(0, |s| s.raw()));
        }
        h.0
    }
}
