//! SSZ Merkleization ("hash tree root") for Ethereum consensus objects.
//!
//! The `TreeHash` trait is implemented for basic types here, for typed collections in `ssz_types`
//! and can be derived for containers with `tree_hash_derive`. All implementations funnel into a
//! process-wide default `Merkleizer` (SHA-256, default `MerkleizerConfig`); callers that need a
//! different hasher, worker count or logger can build their own `Merkleizer`.
#[macro_use]
extern crate lazy_static;

mod bit_length;
mod config;
pub mod impls;
mod merkleize;
mod reduce;

pub use bit_length::{bit_index, bit_length, cover_depth};
pub use config::{MerkleizerConfig, DEFAULT_PARALLELIZATION_THRESHOLD};
pub use ethereum_hashing::{Chunk, PairHasher, RingPairHasher, Sha2PairHasher};
pub use merkleize::{bytes_to_chunks, chunk_limit_for, item_chunks, pack_basic, Merkleizer};

use smallvec::SmallVec;

pub const BYTES_PER_CHUNK: usize = 32;
pub const HASHSIZE: usize = 32;
pub const MERKLE_HASH_CHUNK: usize = 2 * BYTES_PER_CHUNK;
pub const MAX_UNION_SELECTOR: u8 = 127;
pub const SMALLVEC_SIZE: usize = 32;

pub type Hash256 = ethereum_types::H256;
pub type PackedEncoding = SmallVec<[u8; SMALLVEC_SIZE]>;

#[derive(Debug, PartialEq, Clone)]
pub enum Error {
    /// A pairwise reduction was given an odd number of chunks.
    OddChunkCount { len: usize },
    /// More leaves were supplied than the tree can hold.
    MaximumLeavesExceeded { max_leaves: usize, leaves: usize },
    /// A byte string must produce at least one chunk.
    EmptyBytes,
    /// A reduction did not terminate at exactly one chunk.
    ReductionIncomplete { remaining: usize, depth: usize },
    /// A tree is deeper than the zero-hash table.
    DepthExceeded { depth: usize, max_depth: usize },
    Hasher(ethereum_hashing::Error),
    /// The worker pool could not be created.
    ThreadPool(String),
    /// Every failure from a parallel reduction.
    Workers(Vec<Error>),
    InvalidConfig(String),
}

impl From<ethereum_hashing::Error> for Error {
    fn from(e: ethereum_hashing::Error) -> Self {
        Error::Hasher(e)
    }
}

lazy_static! {
    static ref DEFAULT_MERKLEIZER: Merkleizer = Merkleizer::default();
}

/// Returns the process-wide default merkleizer.
pub fn merkleizer() -> &'static Merkleizer {
    &DEFAULT_MERKLEIZER
}

/// Returns the root of `bytes` split into at least `minimum_leaf_count` chunks.
///
/// `minimum_leaf_count` will only be used if it is greater than or equal to the minimum number of
/// leaves that can be created from `bytes`.
pub fn merkle_root(bytes: &[u8], minimum_leaf_count: usize) -> Result<Hash256, Error> {
    let chunks = bytes_to_chunks(bytes);
    let leaves = std::cmp::max(chunks.len(), minimum_leaf_count);

    merkleizer().merkleize_vector(chunks, leaves)
}

/// Returns the node created by hashing `root` and `length`.
///
/// Used in `TreeHash` for inserting the length of a list above it's root.
pub fn mix_in_length(root: &Hash256, length: usize) -> Hash256 {
    merkleizer().mix_in_length(root, length)
}

/// Returns `Some(root)` created by hashing `root` and `selector`, if `selector <=
/// MAX_UNION_SELECTOR`. Otherwise, returns `None`.
///
/// Used in `TreeHash` for the "union" type.
pub fn mix_in_selector(root: &Hash256, selector: u8) -> Option<Hash256> {
    if selector > MAX_UNION_SELECTOR {
        return None;
    }

    let mut chunk = [0; BYTES_PER_CHUNK];
    chunk[0] = selector;

    Some(Hash256::from(merkleizer().hasher().hash_pair(&root.0, &chunk)))
}

/// Returns the root of `items` as an SSZ vector holding at most `limit` items.
pub fn vec_tree_hash_root<T: TreeHash>(items: &[T], limit: usize) -> Result<Hash256, Error> {
    merkleizer().vec_tree_hash_root(items, limit)
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum TreeHashType {
    Basic,
    Vector,
    List,
    Container,
}

pub trait TreeHash {
    fn tree_hash_type() -> TreeHashType;

    fn tree_hash_packed_encoding(&self) -> PackedEncoding;

    fn tree_hash_packing_factor() -> usize;

    fn tree_hash_root(&self) -> Result<Hash256, Error>;
}

/// Punch through references.
impl<'a, T> TreeHash for &'a T
where
    T: TreeHash,
{
    fn tree_hash_type() -> TreeHashType {
        T::tree_hash_type()
    }

    fn tree_hash_packed_encoding(&self) -> PackedEncoding {
        T::tree_hash_packed_encoding(*self)
    }

    fn tree_hash_packing_factor() -> usize {
        T::tree_hash_packing_factor()
    }

    fn tree_hash_root(&self) -> Result<Hash256, Error> {
        T::tree_hash_root(*self)
    }
}
