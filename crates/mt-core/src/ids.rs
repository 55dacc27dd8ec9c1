//! Strongly typed, zero-cost identifier wrappers.
//!
//! All IDs are `Copy + Ord + Hash` so they can be used as `BTreeMap` keys;
//! ordered maps keyed by these ids give every iteration in the simulator a
//! canonical ascending-id order.
//!
//! IDs are handed out by an [`IdSequence`] owned by the engine instance, so
//! two engines fed the same commands assign the same ids.

use std::fmt;
use std::marker::PhantomData;

/// Construct an id from its raw counter value.
///
/// Implemented by every id declared with `typed_id!`; used by [`IdSequence`].
pub trait SequentialId: Copy {
    fn from_raw(raw: u32) -> Self;
}

/// Generate a typed ID wrapper around a `u32`.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident;) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub u32);

        impl $name {
            /// The raw counter value.
            #[inline(always)]
            pub fn raw(self) -> u32 {
                self.0
            }
        }

        impl SequentialId for $name {
            #[inline(always)]
            fn from_raw(raw: u32) -> Self {
                $name(raw)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$name> for u32 {
            #[inline(always)]
            fn from(id: $name) -> u32 {
                id.0
            }
        }
    };
}

typed_id! {
    /// A station in the topology store.
    pub struct StationId;
}

typed_id! {
    /// A line (ordered station sequence).
    pub struct LineId;
}

typed_id! {
    /// A train shuttling along one line.
    pub struct TrainId;
}

typed_id! {
    /// A passenger travelling towards a station type.
    pub struct PassengerId;
}

// ── IdSequence ────────────────────────────────────────────────────────────────

/// Per-instance monotonically increasing id allocator.
///
/// Starts at 1 and never reuses a value, even after the entity is removed.
#[derive(Debug, Clone)]
pub struct IdSequence<T: SequentialId> {
    next:    u32,
    _marker: PhantomData<T>,
}

impl<T: SequentialId> IdSequence<T> {
    pub fn new() -> Self {
        Self { next: 1, _marker: PhantomData }
    }

    /// Allocate the next id.
    ///
    /// # Panics
    /// Panics if more than `u32::MAX - 1` ids are allocated from one sequence.
    pub fn next_id(&mut self) -> T {
        let id = T::from_raw(self.next);
        self.next = self.next.checked_add(1).expect("id sequence exhausted");
        id
    }

    /// The id the next call to [`next_id`](Self::next_id) will return.
    pub fn peek(&self) -> T {
        T::from_raw(self.next)
    }

    /// Number of ids handed out so far.
    pub fn allocated(&self) -> u32 {
        self.next - 1
    }
}

impl<T: SequentialId> Default for IdSequence<T> {
    fn default() -> Self {
        Self::new()
    }
}
