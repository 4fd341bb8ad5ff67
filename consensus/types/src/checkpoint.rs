use crate::test_utils::TestRandom;
use crate::{Epoch, Hash256};
use serde::{Deserialize, Serialize};
use ssz_derive::{Decode, Encode, SszSchema};
use test_random_derive::TestRandom;
use tree_hash_derive::TreeHash;

/// Casper FFG checkpoint, used in attestations.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Hash,
    Serialize,
    Deserialize,
    Encode,
    Decode,
    SszSchema,
    TreeHash,
    TestRandom,
)]
pub struct Checkpoint {
    pub epoch: Epoch,
    pub root: Hash256,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tree_hash::TreeHash;

    ssz_and_tree_hash_tests!(Checkpoint);

    #[test]
    fn fixed_layout() {
        let checkpoint = Checkpoint {
            epoch: Epoch::new(3),
            root: Hash256::repeat_byte(0xcc),
        };
        let bytes = ssz::encode(&checkpoint).expect("should encode");

        assert_eq!(bytes.len(), 40);
        assert_eq!(&bytes[..8], &[3, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(&bytes[8..], &[0xcc; 32]);
    }

    #[test]
    fn root_is_hash_of_two_fields() {
        let checkpoint = Checkpoint {
            epoch: Epoch::new(3),
            root: Hash256::repeat_byte(0xcc),
        };
        let mut epoch_chunk = [0; 32];
        epoch_chunk[0] = 3;

        assert_eq!(
            checkpoint.tree_hash_root(),
            Ok(Hash256::from(ethereum_hashing::hash32_concat(
                &epoch_chunk,
                &[0xcc; 32]
            )))
        );
    }
}
