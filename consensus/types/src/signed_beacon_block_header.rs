use crate::test_utils::TestRandom;
use crate::{BeaconBlockHeader, Hash256, SignatureBytes};

use serde::{Deserialize, Serialize};
use ssz_derive::{Decode, Encode, SszSchema};
use test_random_derive::TestRandom;
use tree_hash_derive::TreeHash;

/// A signed header of a `BeaconBlock`.
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
pub struct SignedBeaconBlockHeader {
    pub message: BeaconBlockHeader,
    #[serde(with = "crate::serde_utils::bytes_hex")]
    pub signature: SignatureBytes,
}

impl SignedBeaconBlockHeader {
    /// The root of the block this header describes, which excludes the signature.
    pub fn block_root(&self) -> Result<Hash256, tree_hash::Error> {
        self.message.canonical_root()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tree_hash::TreeHash;

    ssz_and_tree_hash_tests!(SignedBeaconBlockHeader);

    #[test]
    fn signature_spans_three_chunks() {
        let signed = BeaconBlockHeader::default().with_signature([0xab; 96]);
        let bytes = ssz::encode(&signed).expect("should encode");
        assert_eq!(bytes.len(), 112 + 96);

        let signature_root = tree_hash::merkle_root(&[0xab; 96], 0).expect("should hash");
        let expected = tree_hash::merkleizer()
            .merkleize_container(&[
                signed.message.tree_hash_root().expect("should hash"),
                signature_root,
            ])
            .expect("should hash");
        assert_eq!(signed.tree_hash_root(), Ok(expected));
        assert_ne!(signed.tree_hash_root(), signed.block_root());
    }
}
