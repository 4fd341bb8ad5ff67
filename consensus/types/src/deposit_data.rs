use crate::test_utils::TestRandom;
use crate::*;

use serde::{Deserialize, Serialize};
use ssz_derive::{Decode, Encode, SszSchema};
use test_random_derive::TestRandom;
use tree_hash_derive::TreeHash;

/// The data supplied by the user to the deposit contract.
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
pub struct DepositData {
    #[serde(with = "crate::serde_utils::bytes_hex")]
    pub pubkey: PublicKeyBytes,
    pub withdrawal_credentials: Hash256,
    #[serde(with = "crate::serde_utils::quoted_u64")]
    pub amount: u64,
    #[serde(with = "crate::serde_utils::bytes_hex")]
    pub signature: SignatureBytes,
}

impl DepositData {
    /// Create a `DepositMessage` corresponding to this `DepositData`, for signature verification.
    pub fn as_deposit_message(&self) -> DepositMessage {
        DepositMessage {
            pubkey: self.pubkey,
            withdrawal_credentials: self.withdrawal_credentials,
            amount: self.amount,
        }
    }

    /// Returns the signing root of the deposit message under the given deposit `domain`.
    pub fn signing_root(&self, domain: Hash256) -> Result<Hash256, tree_hash::Error> {
        self.as_deposit_message().signing_root(domain)
    }
}
