use crate::test_utils::TestRandom;
use crate::*;

use serde::{Deserialize, Serialize};
use ssz_derive::{Decode, Encode, SszSchema};
use test_random_derive::TestRandom;
use tree_hash_derive::TreeHash;

/// The header of an execution payload, mixing fixed-size fields with the variable-size
/// `extra_data`.
#[derive(
    Default,
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
pub struct ExecutionPayloadHeader<E: EthSpec> {
    pub parent_hash: ExecutionBlockHash,
    pub fee_recipient: Address,
    pub state_root: Hash256,
    pub receipts_root: Hash256,
    #[serde(with = "ssz_types::serde_utils::hex_fixed_vec")]
    pub logs_bloom: FixedVector<u8, E::BytesPerLogsBloom>,
    pub prev_randao: Hash256,
    #[serde(with = "crate::serde_utils::quoted_u64")]
    pub block_number: u64,
    #[serde(with = "crate::serde_utils::quoted_u64")]
    pub gas_limit: u64,
    #[serde(with = "crate::serde_utils::quoted_u64")]
    pub gas_used: u64,
    #[serde(with = "crate::serde_utils::quoted_u64")]
    pub timestamp: u64,
    #[serde(with = "ssz_types::serde_utils::hex_var_list")]
    pub extra_data: VariableList<u8, E::MaxExtraDataBytes>,
    #[serde(with = "crate::serde_utils::quoted_u256")]
    pub base_fee_per_gas: Uint256,
    pub block_hash: ExecutionBlockHash,
    pub transactions_root: Hash256,
}

impl<E: EthSpec> ExecutionPayloadHeader<E> {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tree_hash::TreeHash;

    ssz_and_tree_hash_tests!(ExecutionPayloadHeader<MainnetEthSpec>);

    /// Byte position of the `extra_data` offset in the fixed part.
    const EXTRA_DATA_OFFSET: usize = 32 + 20 + 32 + 32 + 256 + 32 + 4 * 8;
    /// Length of the fixed part for mainnet.
    const FIXED_LEN: usize = EXTRA_DATA_OFFSET + 4 + 32 + 32 + 32;

    fn header_with_extra_data(extra_data: &[u8]) -> ExecutionPayloadHeader<MainnetEthSpec> {
        ExecutionPayloadHeader {
            block_number: 17,
            extra_data: VariableList::new(extra_data.to_vec()).expect("within limit"),
            base_fee_per_gas: Uint256::from(7),
            ..ExecutionPayloadHeader::empty()
        }
    }

    #[test]
    fn extra_data_offset() {
        let header = header_with_extra_data(b"lighthouse");
        let bytes = ssz::encode(&header).expect("should encode");

        assert_eq!(
            &bytes[EXTRA_DATA_OFFSET..EXTRA_DATA_OFFSET + 4],
            &(FIXED_LEN as u32).to_le_bytes()
        );
        assert_eq!(bytes.len(), FIXED_LEN + 10);
        assert_eq!(&bytes[FIXED_LEN..], b"lighthouse");
    }

    #[test]
    fn extra_data_limit_is_enforced_on_decode() {
        let header = header_with_extra_data(&[1; 32]);
        let mut bytes = ssz::encode(&header).expect("should encode");
        assert!(ssz::decode::<ExecutionPayloadHeader<MainnetEthSpec>>(&bytes).is_ok());

        bytes.push(1);
        assert!(ssz::decode::<ExecutionPayloadHeader<MainnetEthSpec>>(&bytes).is_err());
    }

    #[test]
    fn bad_offset_is_rejected() {
        let header = header_with_extra_data(b"abc");
        let mut bytes = ssz::encode(&header).expect("should encode");
        bytes[EXTRA_DATA_OFFSET..EXTRA_DATA_OFFSET + 4]
            .copy_from_slice(&((FIXED_LEN - 1) as u32).to_le_bytes());

        assert!(ssz::decode::<ExecutionPayloadHeader<MainnetEthSpec>>(&bytes).is_err());
    }

    #[test]
    fn empty() {
        assert!(ExecutionPayloadHeader::<MainnetEthSpec>::empty().is_empty());
        assert!(!header_with_extra_data(&[]).is_empty());
    }

    #[test]
    fn tree_hash_has_fourteen_leaves() {
        let header = header_with_extra_data(b"abc");
        let roots = vec![
            header.parent_hash.tree_hash_root(),
            header.fee_recipient.tree_hash_root(),
            header.state_root.tree_hash_root(),
            header.receipts_root.tree_hash_root(),
            header.logs_bloom.tree_hash_root(),
            header.prev_randao.tree_hash_root(),
            header.block_number.tree_hash_root(),
            header.gas_limit.tree_hash_root(),
            header.gas_used.tree_hash_root(),
            header.timestamp.tree_hash_root(),
            header.extra_data.tree_hash_root(),
            header.base_fee_per_gas.tree_hash_root(),
            header.block_hash.tree_hash_root(),
            header.transactions_root.tree_hash_root(),
        ]
        .into_iter()
        .collect::<Result<Vec<_>, _>>()
        .expect("should hash");

        assert_eq!(
            header.tree_hash_root(),
            tree_hash::merkleizer().merkleize_container(&roots)
        );
    }

    #[test]
    fn json() {
        let header = header_with_extra_data(&[0xab, 0xcd]);
        let json = serde_json::to_value(&header).expect("should serialize");

        assert_eq!(json["extra_data"], "0xabcd");
        assert_eq!(json["block_number"], "17");
        assert_eq!(json["base_fee_per_gas"], "7");
        assert_eq!(
            serde_json::from_value::<ExecutionPayloadHeader<MainnetEthSpec>>(json).ok(),
            Some(header)
        );
    }
}
