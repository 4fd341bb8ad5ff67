use super::*;

impl TestRandom for Hash256 {
    fn random_for_test(rng: &mut impl RngCore) -> Self {
        Hash256::from(<[u8; 32]>::random_for_test(rng))
    }
}

impl TestRandom for Address {
    fn random_for_test(rng: &mut impl RngCore) -> Self {
        Address::from(<[u8; 20]>::random_for_test(rng))
    }
}

impl TestRandom for Uint256 {
    fn random_for_test(rng: &mut impl RngCore) -> Self {
        Uint256::from_little_endian(&<[u8; 32]>::random_for_test(rng))
    }
}
