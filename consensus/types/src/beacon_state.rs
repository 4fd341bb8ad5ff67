use crate::test_utils::TestRandom;
use crate::*;
use merkle_proof::{GeneralizedIndex, MerkleTrie};
use serde::{Deserialize, Serialize};
use ssz_derive::{Decode, Encode, SszSchema};
use test_random_derive::TestRandom;
use tree_hash::TreeHash;
use tree_hash_derive::TreeHash;

/// Number of top-level fields in `BeaconState`.
pub const BEACON_STATE_FIELDS: usize = 22;
/// Position of `finalized_checkpoint` amongst the fields of `BeaconState`.
pub const FINALIZED_CHECKPOINT_FIELD: usize = 20;
/// Generalized index of `finalized_checkpoint.root`.
pub const FINALIZED_ROOT_INDEX: usize = 105;

#[derive(Debug, PartialEq, Clone)]
pub enum Error {
    EpochOutOfBounds,
    SlotOutOfBounds,
    UnknownValidator(usize),
    BlockRootsOutOfBounds(usize),
    StateRootsOutOfBounds(usize),
    RandaoMixesOutOfBounds(usize),
    FieldIndexOutOfBounds(usize),
    TooManyValidators,
    SszTypesError(ssz_types::Error),
    TreeHashError(tree_hash::Error),
    MerkleTrieError(merkle_proof::Error),
}

/// The state of the `BeaconChain` at some slot.
///
/// Fields follow the phase 0 layout with the latest execution payload header appended, which
/// exercises every collection kind: vectors and lists of basic and composite items, a bitvector,
/// bitlists (inside pending attestations) and nested variable-size containers.
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
#[serde(bound = "E: EthSpec")]
pub struct BeaconState<E: EthSpec> {
    // Versioning
    #[serde(with = "crate::serde_utils::quoted_u64")]
    pub genesis_time: u64,
    pub genesis_validators_root: Hash256,
    pub slot: Slot,
    pub fork: Fork,

    // History
    pub latest_block_header: BeaconBlockHeader,
    pub block_roots: FixedVector<Hash256, E::SlotsPerHistoricalRoot>,
    pub state_roots: FixedVector<Hash256, E::SlotsPerHistoricalRoot>,
    pub historical_roots: VariableList<Hash256, E::HistoricalRootsLimit>,

    // Ethereum 1.0 chain data
    pub eth1_data: Eth1Data,
    pub eth1_data_votes: VariableList<Eth1Data, E::SlotsPerEth1VotingPeriod>,
    #[serde(with = "crate::serde_utils::quoted_u64")]
    pub eth1_deposit_index: u64,

    // Registry
    pub validators: VariableList<Validator, E::ValidatorRegistryLimit>,
    pub balances: VariableList<u64, E::ValidatorRegistryLimit>,

    // Randomness
    pub randao_mixes: FixedVector<Hash256, E::EpochsPerHistoricalVector>,

    // Slashings
    pub slashings: FixedVector<u64, E::EpochsPerSlashingsVector>,

    // Attestations
    pub previous_epoch_attestations: VariableList<PendingAttestation<E>, E::MaxPendingAttestations>,
    pub current_epoch_attestations: VariableList<PendingAttestation<E>, E::MaxPendingAttestations>,

    // Finality
    pub justification_bits: BitVector<E::JustificationBitsLength>,
    pub previous_justified_checkpoint: Checkpoint,
    pub current_justified_checkpoint: Checkpoint,
    pub finalized_checkpoint: Checkpoint,

    // Execution
    pub latest_execution_payload_header: ExecutionPayloadHeader<E>,
}

impl<E: EthSpec> BeaconState<E> {
    /// Create a new BeaconState suitable for genesis.
    ///
    /// Not a complete genesis state, see `initialize_beacon_state_from_eth1`.
    pub fn new(genesis_time: u64, eth1_data: Eth1Data, spec: &ChainSpec) -> Self {
        BeaconState {
            // Versioning
            genesis_time,
            genesis_validators_root: Hash256::zero(),
            slot: Slot::new(0),
            fork: Fork {
                previous_version: spec.genesis_fork_version,
                current_version: spec.genesis_fork_version,
                epoch: Epoch::new(0),
            },

            // History
            latest_block_header: BeaconBlockHeader::default(),
            block_roots: FixedVector::from_elem(Hash256::zero()),
            state_roots: FixedVector::from_elem(Hash256::zero()),
            historical_roots: VariableList::empty(),

            // Eth1
            eth1_data,
            eth1_data_votes: VariableList::empty(),
            eth1_deposit_index: 0,

            // Validator registry
            validators: VariableList::empty(),
            balances: VariableList::empty(),

            // Randomness
            randao_mixes: FixedVector::from_elem(Hash256::zero()),

            // Slashings
            slashings: FixedVector::from_elem(0),

            // Attestations
            previous_epoch_attestations: VariableList::empty(),
            current_epoch_attestations: VariableList::empty(),

            // Finality
            justification_bits: BitVector::new(),
            previous_justified_checkpoint: Checkpoint::default(),
            current_justified_checkpoint: Checkpoint::default(),
            finalized_checkpoint: Checkpoint::default(),

            // Execution
            latest_execution_payload_header: ExecutionPayloadHeader::default(),
        }
    }

    /// Returns the `tree_hash_root` of the state.
    pub fn canonical_root(&self) -> Result<Hash256, Error> {
        Ok(self.tree_hash_root()?)
    }

    /// The epoch corresponding to `self.slot`.
    pub fn current_epoch(&self) -> Epoch {
        self.slot.epoch(E::slots_per_epoch())
    }

    /// The epoch prior to `self.current_epoch()`, or the genesis epoch at genesis.
    pub fn previous_epoch(&self) -> Epoch {
        self.current_epoch() - 1
    }

    /// Appends a validator and its balance to the registry, returning its index.
    pub fn push_validator(&mut self, validator: Validator, balance: u64) -> Result<usize, Error> {
        let index = self.validators.len();
        if index >= E::ValidatorRegistryLimit::to_usize() {
            return Err(Error::TooManyValidators);
        }
        self.validators.push(validator)?;
        self.balances.push(balance)?;
        Ok(index)
    }

    /// Return the validator at `validator_index`.
    pub fn get_validator(&self, validator_index: usize) -> Result<&Validator, Error> {
        self.validators
            .get(validator_index)
            .ok_or(Error::UnknownValidator(validator_index))
    }

    /// Indices of all validators active at `epoch`.
    pub fn get_active_validator_indices(&self, epoch: Epoch) -> Vec<usize> {
        self.validators
            .iter()
            .enumerate()
            .filter(|(_, validator)| validator.is_active_at(epoch))
            .map(|(index, _)| index)
            .collect()
    }

    /// Safely obtains the index for the latest block roots, given some `slot`.
    fn get_latest_block_roots_index(&self, slot: Slot) -> Result<usize, Error> {
        let len = self.block_roots.len() as u64;
        if slot < self.slot && self.slot <= slot + len {
            Ok((slot % len).as_usize())
        } else {
            Err(Error::SlotOutOfBounds)
        }
    }

    /// Return the block root at a recent `slot`.
    pub fn get_block_root(&self, slot: Slot) -> Result<&Hash256, Error> {
        let i = self.get_latest_block_roots_index(slot)?;
        self.block_roots
            .get(i)
            .ok_or(Error::BlockRootsOutOfBounds(i))
    }

    /// Sets the block root for some given slot.
    pub fn set_block_root(&mut self, slot: Slot, block_root: Hash256) -> Result<(), Error> {
        let i = self.get_latest_block_roots_index(slot)?;
        *self
            .block_roots
            .get_mut(i)
            .ok_or(Error::BlockRootsOutOfBounds(i))? = block_root;
        Ok(())
    }

    /// Return the state root at a recent `slot`.
    pub fn get_state_root(&self, slot: Slot) -> Result<&Hash256, Error> {
        let i = self.get_latest_block_roots_index(slot)?;
        self.state_roots
            .get(i)
            .ok_or(Error::StateRootsOutOfBounds(i))
    }

    /// Sets the state root for some given slot.
    pub fn set_state_root(&mut self, slot: Slot, state_root: Hash256) -> Result<(), Error> {
        let i = self.get_latest_block_roots_index(slot)?;
        *self
            .state_roots
            .get_mut(i)
            .ok_or(Error::StateRootsOutOfBounds(i))? = state_root;
        Ok(())
    }

    /// Safely obtain the index for `randao_mixes`, permitting the next epoch.
    fn get_randao_mix_index(&self, epoch: Epoch, allow_next_epoch: bool) -> Result<usize, Error> {
        let current_epoch = self.current_epoch();
        let len = E::EpochsPerHistoricalVector::to_u64();
        let upper_bound = if allow_next_epoch {
            current_epoch + 1
        } else {
            current_epoch
        };

        if current_epoch < epoch + len && epoch <= upper_bound {
            Ok((epoch % len).as_usize())
        } else {
            Err(Error::EpochOutOfBounds)
        }
    }

    /// Return the randao mix at a recent `epoch`.
    pub fn get_randao_mix(&self, epoch: Epoch) -> Result<&Hash256, Error> {
        let i = self.get_randao_mix_index(epoch, false)?;
        self.randao_mixes
            .get(i)
            .ok_or(Error::RandaoMixesOutOfBounds(i))
    }

    /// Set the randao mix at a recent `epoch`.
    pub fn set_randao_mix(&mut self, epoch: Epoch, mix: Hash256) -> Result<(), Error> {
        let i = self.get_randao_mix_index(epoch, true)?;
        *self
            .randao_mixes
            .get_mut(i)
            .ok_or(Error::RandaoMixesOutOfBounds(i))? = mix;
        Ok(())
    }

    /// The hash tree roots of every top-level field, in declaration order.
    pub fn field_roots(&self) -> Result<Vec<Hash256>, Error> {
        let roots = vec![
            self.genesis_time.tree_hash_root()?,
            self.genesis_validators_root.tree_hash_root()?,
            self.slot.tree_hash_root()?,
            self.fork.tree_hash_root()?,
            self.latest_block_header.tree_hash_root()?,
            self.block_roots.tree_hash_root()?,
            self.state_roots.tree_hash_root()?,
            self.historical_roots.tree_hash_root()?,
            self.eth1_data.tree_hash_root()?,
            self.eth1_data_votes.tree_hash_root()?,
            self.eth1_deposit_index.tree_hash_root()?,
            self.validators.tree_hash_root()?,
            self.balances.tree_hash_root()?,
            self.randao_mixes.tree_hash_root()?,
            self.slashings.tree_hash_root()?,
            self.previous_epoch_attestations.tree_hash_root()?,
            self.current_epoch_attestations.tree_hash_root()?,
            self.justification_bits.tree_hash_root()?,
            self.previous_justified_checkpoint.tree_hash_root()?,
            self.current_justified_checkpoint.tree_hash_root()?,
            self.finalized_checkpoint.tree_hash_root()?,
            self.latest_execution_payload_header.tree_hash_root()?,
        ];
        Ok(roots)
    }

    /// Returns the root of the field at `field_index` and its sibling path to the state root.
    pub fn compute_field_proof(
        &self,
        field_index: usize,
    ) -> Result<(Hash256, Vec<Hash256>), Error> {
        if field_index >= BEACON_STATE_FIELDS {
            return Err(Error::FieldIndexOutOfBounds(field_index));
        }
        let trie = MerkleTrie::from_container(&self.field_roots()?)?;
        Ok(trie.generate_proof(field_index)?)
    }

    /// Returns the generalized index of the root of the field at `field_index`.
    pub fn field_gindex(field_index: usize) -> Result<GeneralizedIndex, Error> {
        if field_index >= BEACON_STATE_FIELDS {
            return Err(Error::FieldIndexOutOfBounds(field_index));
        }
        let depth = tree_hash::cover_depth(BEACON_STATE_FIELDS as u64);
        Ok(GeneralizedIndex::new(depth, field_index as u64)?)
    }

    /// Returns the generalized index of `finalized_checkpoint.root`, which equals
    /// `FINALIZED_ROOT_INDEX`.
    pub fn finalized_root_gindex() -> Result<GeneralizedIndex, Error> {
        let checkpoint = Self::field_gindex(FINALIZED_CHECKPOINT_FIELD)?;
        // `root` is the second of the two `Checkpoint` fields.
        let root = GeneralizedIndex::new(1, 1)?;
        Ok(GeneralizedIndex::concat(&[checkpoint, root])?)
    }

    /// Returns the proof of `finalized_checkpoint.root` at `FINALIZED_ROOT_INDEX`.
    ///
    /// The path starts with the finalized epoch, the sibling of the root inside the checkpoint.
    pub fn compute_finalized_root_proof(&self) -> Result<Vec<Hash256>, Error> {
        let gindex = Self::finalized_root_gindex()?;
        let checkpoint = gindex
            .parent()
            .ok_or(Error::FieldIndexOutOfBounds(FINALIZED_CHECKPOINT_FIELD))?;

        let trie = MerkleTrie::from_container(&self.field_roots()?)?;
        let (_, mut proof) = trie.generate_proof_for(checkpoint)?;
        proof.insert(0, self.finalized_checkpoint.epoch.tree_hash_root()?);
        Ok(proof)
    }
}

impl From<ssz_types::Error> for Error {
    fn from(e: ssz_types::Error) -> Error {
        Error::SszTypesError(e)
    }
}

impl From<tree_hash::Error> for Error {
    fn from(e: tree_hash::Error) -> Error {
        Error::TreeHashError(e)
    }
}

impl From<merkle_proof::Error> for Error {
    fn from(e: merkle_proof::Error) -> Error {
        Error::MerkleTrieError(e)
    }
}
