use crate::test_utils::TestRandom;
use crate::*;

use serde::{Deserialize, Serialize};
use ssz_derive::{Decode, Encode, SszSchema};
use test_random_derive::TestRandom;
use tree_hash::TreeHash;
use tree_hash_derive::TreeHash;

/// A header of a `BeaconBlock`.
#[derive(
    Debug,
    PartialEq,
    Eq,
    Hash,
    Clone,
    Copy,
    Default,
    Serialize,
    Deserialize,
    Encode,
    Decode,
    SszSchema,
    TreeHash,
    TestRandom,
)]
pub struct BeaconBlockHeader {
    pub slot: Slot,
    #[serde(with = "crate::serde_utils::quoted_u64")]
    pub proposer_index: u64,
    pub parent_root: Hash256,
    pub state_root: Hash256,
    pub body_root: Hash256,
}

impl SignedRoot for BeaconBlockHeader {}

impl BeaconBlockHeader {
    /// Returns the `tree_hash_root` of the header.
    pub fn canonical_root(&self) -> Result<Hash256, tree_hash::Error> {
        self.tree_hash_root()
    }

    /// Produce a header for a child block of `self`.
    pub fn child(
        &self,
        slot: Slot,
        state_root: Hash256,
        body_root: Hash256,
    ) -> Result<Self, tree_hash::Error> {
        Ok(BeaconBlockHeader {
            slot,
            proposer_index: self.proposer_index,
            parent_root: self.canonical_root()?,
            state_root,
            body_root,
        })
    }

    /// Signs `self`, producing a `SignedBeaconBlockHeader`.
    ///
    /// Signatures are opaque here; the caller supplies the already-computed bytes.
    pub fn with_signature(self, signature: SignatureBytes) -> SignedBeaconBlockHeader {
        SignedBeaconBlockHeader {
            message: self,
            signature,
        }
    }
}
