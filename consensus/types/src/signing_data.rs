use crate::test_utils::TestRandom;
use crate::Hash256;

use serde::{Deserialize, Serialize};
use ssz_derive::{Decode, Encode, SszSchema};
use test_random_derive::TestRandom;
use tree_hash::TreeHash;
use tree_hash_derive::TreeHash;

/// The object actually signed: an object root bound to a signature domain.
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
pub struct SigningData {
    pub object_root: Hash256,
    pub domain: Hash256,
}

/// Types whose `tree_hash_root` is signed directly.
pub trait SignedRoot: TreeHash {
    fn signing_root(&self, domain: Hash256) -> Result<Hash256, tree_hash::Error> {
        compute_signing_root(self, domain)
    }
}

/// Returns the root of `SigningData` for `object` under `domain`.
pub fn compute_signing_root<T: TreeHash + ?Sized>(
    object: &T,
    domain: Hash256,
) -> Result<Hash256, tree_hash::Error> {
    SigningData {
        object_root: object.tree_hash_root()?,
        domain,
    }
    .tree_hash_root()
}
