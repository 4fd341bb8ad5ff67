//! Ethereum consensus types
//!
//! Every object here implements `Encode`, `Decode`, `SszSchema` and `TreeHash`, so it can be
//! serialized and merkleized through the `ssz` and `tree_hash` crates.

// Required for big type-level numbers
#![recursion_limit = "128"]

#[macro_use]
pub mod test_utils;

pub mod attestation_data;
pub mod beacon_block_header;
pub mod beacon_state;
pub mod chain_spec;
pub mod checkpoint;
pub mod deposit;
pub mod deposit_data;
pub mod deposit_message;
pub mod eth1_data;
pub mod eth_spec;
pub mod execution_payload_header;
pub mod fork;
pub mod fork_data;
pub mod pending_attestation;
pub mod serde_utils;
pub mod signed_beacon_block_header;
pub mod signing_data;
pub mod validator;

#[macro_use]
mod slot_epoch_macros;
pub mod slot_epoch;

pub use crate::attestation_data::AttestationData;
pub use crate::beacon_block_header::BeaconBlockHeader;
pub use crate::beacon_state::{BeaconState, Error as BeaconStateError};
pub use crate::chain_spec::{compute_domain, compute_fork_data_root, ChainSpec, Domain};
pub use crate::checkpoint::Checkpoint;
pub use crate::deposit::{Deposit, DEPOSIT_TREE_DEPTH};
pub use crate::deposit_data::DepositData;
pub use crate::deposit_message::DepositMessage;
pub use crate::eth1_data::Eth1Data;
pub use crate::eth_spec::{EthSpec, EthSpecId, MainnetEthSpec, MinimalEthSpec};
pub use crate::execution_payload_header::ExecutionPayloadHeader;
pub use crate::fork::Fork;
pub use crate::fork_data::ForkData;
pub use crate::pending_attestation::PendingAttestation;
pub use crate::signed_beacon_block_header::SignedBeaconBlockHeader;
pub use crate::signing_data::{compute_signing_root, SignedRoot, SigningData};
pub use crate::slot_epoch::{Epoch, Slot};
pub use crate::validator::Validator;

pub use ssz_types::{typenum, typenum::Unsigned, BitList, BitVector, FixedVector, VariableList};

pub type Hash256 = ethereum_types::H256;
pub type Address = ethereum_types::H160;
pub type Uint256 = ethereum_types::U256;
pub type ExecutionBlockHash = Hash256;

/// Opaque BLS public key bytes; no curve arithmetic is performed on them here.
pub type PublicKeyBytes = [u8; 48];
/// Opaque BLS signature bytes.
pub type SignatureBytes = [u8; 96];
