use crate::test_utils::TestRandom;
use crate::{AttestationData, BitList, EthSpec};

use serde::{Deserialize, Serialize};
use ssz_derive::{Decode, Encode, SszSchema};
use test_random_derive::TestRandom;
use tree_hash_derive::TreeHash;

/// An attestation that has been included in the state but not yet fully processed.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Encode,
    Decode,
    SszSchema,
    TreeHash,
    TestRandom,
)]
#[serde(bound = "E: EthSpec")]
pub struct PendingAttestation<E: EthSpec> {
    pub aggregation_bits: BitList<E::MaxValidatorsPerCommittee>,
    pub data: AttestationData,
    #[serde(with = "crate::serde_utils::quoted_u64")]
    pub inclusion_delay: u64,
    #[serde(with = "crate::serde_utils::quoted_u64")]
    pub proposer_index: u64,
}

impl<E: EthSpec> PendingAttestation<E> {
    /// The number of attesters that contributed to this attestation.
    pub fn num_attesters(&self) -> usize {
        self.aggregation_bits.num_set_bits()
    }
}
