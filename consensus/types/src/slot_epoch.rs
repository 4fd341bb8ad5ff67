//! The `Slot` and `Epoch` types are defined as new types over u64 to enforce type-safety between
//! the two types.
//!
//! `Slot` and `Epoch` have implementations which permit conversion, comparison and math operations
//! between each and `u64`, however specifically not between each other.
//!
//! All math operations on `Slot` and `Epoch` are saturating, they never wrap.
use crate::test_utils::TestRandom;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, Rem, Sub, SubAssign};

#[allow(clippy::derived_hash_with_manual_eq)]
#[derive(Eq, Clone, Copy, Default, Debug, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Slot(#[serde(with = "crate::serde_utils::quoted_u64")] u64);

#[allow(clippy::derived_hash_with_manual_eq)]
#[derive(Eq, Clone, Copy, Default, Debug, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Epoch(#[serde(with = "crate::serde_utils::quoted_u64")] u64);

impl_common!(Slot);
impl_common!(Epoch);

impl Slot {
    pub const fn new(slot: u64) -> Slot {
        Slot(slot)
    }

    pub fn epoch(self, slots_per_epoch: u64) -> Epoch {
        Epoch::new(self.0.checked_div(slots_per_epoch).unwrap_or(0))
    }

    pub fn max_value() -> Slot {
        Slot(u64::MAX)
    }
}

impl Epoch {
    pub const fn new(slot: u64) -> Epoch {
        Epoch(slot)
    }

    pub fn max_value() -> Epoch {
        Epoch(u64::MAX)
    }

    /// The first slot in the epoch.
    pub fn start_slot(self, slots_per_epoch: u64) -> Slot {
        Slot::from(self.0.saturating_mul(slots_per_epoch))
    }

    /// The last slot in the epoch.
    pub fn end_slot(self, slots_per_epoch: u64) -> Slot {
        Slot::from(
            self.0
                .saturating_mul(slots_per_epoch)
                .saturating_add(slots_per_epoch.saturating_sub(1)),
        )
    }

    /// Position of some slot inside an epoch, if any.
    pub fn position(self, slot: Slot, slots_per_epoch: u64) -> Option<usize> {
        let start = self.start_slot(slots_per_epoch);
        let end = self.end_slot(slots_per_epoch);

        if slot >= start && slot <= end {
            slot.as_usize().checked_sub(start.as_usize())
        } else {
            None
        }
    }
}

#[cfg(test)]
mod slot_tests {
    use super::*;

    all_tests!(Slot);

    #[test]
    fn epoch() {
        assert_eq!(Slot::new(0).epoch(8), Epoch::new(0));
        assert_eq!(Slot::new(7).epoch(8), Epoch::new(0));
        assert_eq!(Slot::new(8).epoch(8), Epoch::new(1));
        assert_eq!(Slot::new(8).epoch(0), Epoch::new(0));
    }
}

#[cfg(test)]
mod epoch_tests {
    use super::*;

    all_tests!(Epoch);

    #[test]
    fn slot_bounds() {
        let epoch = Epoch::new(3);
        assert_eq!(epoch.start_slot(8), Slot::new(24));
        assert_eq!(epoch.end_slot(8), Slot::new(31));
        assert_eq!(Epoch::max_value().end_slot(8), Slot::max_value());
    }

    #[test]
    fn position() {
        let epoch = Epoch::new(1);
        assert_eq!(epoch.position(Slot::new(7), 8), None);
        assert_eq!(epoch.position(Slot::new(8), 8), Some(0));
        assert_eq!(epoch.position(Slot::new(15), 8), Some(7));
        assert_eq!(epoch.position(Slot::new(16), 8), None);
    }
}
