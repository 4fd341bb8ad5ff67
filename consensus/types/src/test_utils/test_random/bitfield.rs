use super::*;
use crate::{BitList, BitVector, Unsigned};

impl<N: Unsigned + Clone> TestRandom for BitList<N> {
    fn random_for_test(rng: &mut impl RngCore) -> Self {
        let len = usize::random_for_test(rng) % (N::to_usize() + 1);
        let mut bitfield = Self::with_capacity(len).expect("len is at most N");
        for i in 0..len {
            bitfield
                .set(i, bool::random_for_test(rng))
                .expect("i is below len");
        }
        bitfield
    }
}

impl<N: Unsigned + Clone> TestRandom for BitVector<N> {
    fn random_for_test(rng: &mut impl RngCore) -> Self {
        let mut bitfield = Self::new();
        for i in 0..N::to_usize() {
            bitfield
                .set(i, bool::random_for_test(rng))
                .expect("i is below N");
        }
        bitfield
    }
}
