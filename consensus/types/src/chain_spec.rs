use crate::*;
use serde::{Deserialize, Serialize};
use tree_hash::TreeHash;

/// Each of the BLS signature domains.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Domain {
    BeaconProposer,
    BeaconAttester,
    Randao,
    Deposit,
    VoluntaryExit,
    SelectionProof,
    AggregateAndProof,
    SyncCommittee,
    ContributionAndProof,
    SyncCommitteeSelectionProof,
    BlsToExecutionChange,
    ApplicationMask,
}

/// Chain-wide constants that affect signing and epoch boundaries.
///
/// Type-level list lengths live in `EthSpec`; this holds the run-time values.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct ChainSpec {
    #[serde(with = "crate::serde_utils::bytes_hex")]
    pub genesis_fork_version: [u8; 4],
    pub far_future_epoch: Epoch,
    #[serde(with = "crate::serde_utils::quoted_u64")]
    pub max_effective_balance: u64,

    /*
     * Signature domains
     */
    pub(crate) domain_beacon_proposer: u32,
    pub(crate) domain_beacon_attester: u32,
    pub(crate) domain_randao: u32,
    pub(crate) domain_deposit: u32,
    pub(crate) domain_voluntary_exit: u32,
    pub(crate) domain_selection_proof: u32,
    pub(crate) domain_aggregate_and_proof: u32,
    pub(crate) domain_sync_committee: u32,
    pub(crate) domain_contribution_and_proof: u32,
    pub(crate) domain_sync_committee_selection_proof: u32,
    pub(crate) domain_bls_to_execution_change: u32,
    pub(crate) domain_application_mask: u32,
}

impl ChainSpec {
    /// Returns the domain type for some `Domain`, in the little-endian `u32` form.
    pub fn get_domain_constant(&self, domain: Domain) -> u32 {
        match domain {
            Domain::BeaconProposer => self.domain_beacon_proposer,
            Domain::BeaconAttester => self.domain_beacon_attester,
            Domain::Randao => self.domain_randao,
            Domain::Deposit => self.domain_deposit,
            Domain::VoluntaryExit => self.domain_voluntary_exit,
            Domain::SelectionProof => self.domain_selection_proof,
            Domain::AggregateAndProof => self.domain_aggregate_and_proof,
            Domain::SyncCommittee => self.domain_sync_committee,
            Domain::ContributionAndProof => self.domain_contribution_and_proof,
            Domain::SyncCommitteeSelectionProof => self.domain_sync_committee_selection_proof,
            Domain::BlsToExecutionChange => self.domain_bls_to_execution_change,
            Domain::ApplicationMask => self.domain_application_mask,
        }
    }

    /// Get the domain that represents the fork meta and signature domain.
    pub fn get_domain(
        &self,
        epoch: Epoch,
        domain: Domain,
        fork: &Fork,
        genesis_validators_root: Hash256,
    ) -> Result<Hash256, tree_hash::Error> {
        compute_domain(
            self.get_domain_constant(domain),
            fork.get_fork_version(epoch),
            genesis_validators_root,
        )
    }

    /// Deposits are valid across forks, so their domain uses the genesis fork version and a zero
    /// validators root.
    pub fn get_deposit_domain(&self) -> Result<Hash256, tree_hash::Error> {
        compute_domain(
            self.domain_deposit,
            self.genesis_fork_version,
            Hash256::zero(),
        )
    }

    /// Returns a `ChainSpec` compatible with the Ethereum Foundation mainnet.
    pub fn mainnet() -> Self {
        Self {
            genesis_fork_version: [0; 4],
            far_future_epoch: Epoch::max_value(),
            max_effective_balance: 32_000_000_000,
            domain_beacon_proposer: 0,
            domain_beacon_attester: 1,
            domain_randao: 2,
            domain_deposit: 3,
            domain_voluntary_exit: 4,
            domain_selection_proof: 5,
            domain_aggregate_and_proof: 6,
            domain_sync_committee: 7,
            domain_sync_committee_selection_proof: 8,
            domain_contribution_and_proof: 9,
            domain_bls_to_execution_change: 10,
            domain_application_mask: 0x0100_0000,
        }
    }

    /// Ethereum Foundation minimal spec, as defined in the consensus-specs repo.
    pub fn minimal() -> Self {
        Self {
            genesis_fork_version: [0, 0, 0, 1],
            ..ChainSpec::mainnet()
        }
    }
}

impl Default for ChainSpec {
    fn default() -> Self {
        Self::mainnet()
    }
}

/// Return the 32-byte fork data root for the `current_version` and `genesis_validators_root`.
///
/// This is used primarily in signature domains to avoid collisions across forks/chains.
pub fn compute_fork_data_root(
    current_version: [u8; 4],
    genesis_validators_root: Hash256,
) -> Result<Hash256, tree_hash::Error> {
    ForkData {
        current_version,
        genesis_validators_root,
    }
    .tree_hash_root()
}

/// Compute a domain by applying the given `fork_version`.
pub fn compute_domain(
    domain_constant: u32,
    fork_version: [u8; 4],
    genesis_validators_root: Hash256,
) -> Result<Hash256, tree_hash::Error> {
    let mut domain = [0; 32];
    domain[0..4].copy_from_slice(&domain_constant.to_le_bytes());
    domain[4..].copy_from_slice(
        &compute_fork_data_root(fork_version, genesis_validators_root)?[..28],
    );

    Ok(Hash256::from(domain))
}
