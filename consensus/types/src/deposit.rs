use crate::test_utils::TestRandom;
use crate::*;
use merkle_proof::MerkleTrie;
use serde::{Deserialize, Serialize};
use ssz_derive::{Decode, Encode, SszSchema};
use ssz_types::typenum::U33;
use test_random_derive::TestRandom;
use tree_hash_derive::TreeHash;

pub const DEPOSIT_TREE_DEPTH: usize = 32;

/// A deposit to potentially become a beacon chain validator.
#[derive(
    Debug,
    PartialEq,
    Eq,
    Clone,
    Serialize,
    Deserialize,
    Encode,
    Decode,
    SszSchema,
    TreeHash,
    TestRandom,
)]
pub struct Deposit {
    pub proof: FixedVector<Hash256, U33>,
    pub data: DepositData,
}

impl Deposit {
    /// Builds the deposit at `index` of the deposit contract tree holding `deposits`.
    ///
    /// The proof is the sibling path through a tree of depth `DEPOSIT_TREE_DEPTH`, followed by the
    /// length mixin, so it leads to the tree's `hash_tree_root`. That root is returned alongside
    /// the deposit.
    pub fn from_deposit_list(
        deposits: &[DepositData],
        index: usize,
    ) -> Result<(Hash256, Self), merkle_proof::Error> {
        let data = deposits
            .get(index)
            .cloned()
            .ok_or(merkle_proof::Error::IndexOutOfBounds {
                index,
                capacity: deposits.len(),
            })?;
        let trie = MerkleTrie::from_list(deposits, 1 << DEPOSIT_TREE_DEPTH)?;
        let (_, proof) = trie.generate_proof_with_mixin(index)?;

        Ok((
            trie.hash_tree_root(),
            Deposit {
                proof: FixedVector::from(proof),
                data,
            },
        ))
    }
}
