use crate::{
    cover_depth, Error, Hash256, MerkleizerConfig, TreeHash, TreeHashType, BYTES_PER_CHUNK,
};
use ethereum_hashing::{compute_zero_hashes, Chunk, PairHasher, Sha2PairHasher};
use slog::{crit, o, trace, Logger};

/// Computes Merkle roots by repeated pairwise reduction with zero-hash padding.
///
/// The hash function is supplied as a `PairHasher`. The zero-hash table used for padding is derived
/// from that hasher, so padding is always consistent with the rest of the tree.
pub struct Merkleizer<H = Sha2PairHasher> {
    pub(crate) hasher: H,
    zero_hashes: Vec<Chunk>,
    pub(crate) config: MerkleizerConfig,
    pub(crate) log: Logger,
}

impl Default for Merkleizer<Sha2PairHasher> {
    fn default() -> Self {
        Self::with_defaults(Sha2PairHasher)
    }
}

impl<H: PairHasher> Merkleizer<H> {
    /// Creates a merkleizer, returning an error if `config` is invalid.
    pub fn new(hasher: H, config: MerkleizerConfig, log: Logger) -> Result<Self, Error> {
        config.validate().map_err(Error::InvalidConfig)?;

        Ok(Self {
            zero_hashes: compute_zero_hashes(&hasher),
            hasher,
            config,
            log,
        })
    }

    /// Creates a merkleizer with the default configuration and a discarding logger.
    pub fn with_defaults(hasher: H) -> Self {
        Self {
            zero_hashes: compute_zero_hashes(&hasher),
            hasher,
            config: MerkleizerConfig::default(),
            log: Logger::root(slog::Discard, o!()),
        }
    }

    pub fn hasher(&self) -> &H {
        &self.hasher
    }

    pub fn config(&self) -> &MerkleizerConfig {
        &self.config
    }

    pub(crate) fn zero_chunk(&self, depth: usize) -> Result<&Chunk, Error> {
        self.zero_hashes.get(depth).ok_or(Error::DepthExceeded {
            depth,
            max_depth: self.zero_hashes.len() - 1,
        })
    }

    /// Returns the root of a tree of `2^depth` zero leaves.
    pub fn zero_hash(&self, depth: usize) -> Result<Hash256, Error> {
        self.zero_chunk(depth).map(|chunk| Hash256::from(*chunk))
    }

    /// Returns the root of the tree with `chunks` as leaves, padded with zero leaves up to the next
    /// power of two of `limit`.
    ///
    /// ## Errors
    ///
    /// - `chunks.len() > limit`.
    /// - The reduction does not terminate at exactly one chunk.
    pub fn merkleize_vector(&self, chunks: Vec<Chunk>, limit: usize) -> Result<Hash256, Error> {
        if chunks.len() > limit {
            return Err(Error::MaximumLeavesExceeded {
                max_leaves: limit,
                leaves: chunks.len(),
            });
        }

        let depth = cover_depth(limit as u64);

        trace!(
            self.log,
            "Merkleizing vector";
            "chunks" => chunks.len(),
            "limit" => limit,
            "depth" => depth,
        );

        if chunks.is_empty() {
            return self.zero_hash(depth);
        }

        let mut chunks = chunks;
        for level in 0..depth {
            if chunks.len() % 2 == 1 {
                chunks.push(*self.zero_chunk(level)?);
            }
            chunks = self.reduce(&chunks)?;
        }

        match chunks.as_slice() {
            [root] => Ok(Hash256::from(*root)),
            _ => {
                crit!(
                    self.log,
                    "Merkle reduction did not produce a single root";
                    "remaining" => chunks.len(),
                    "depth" => depth,
                );
                Err(Error::ReductionIncomplete {
                    remaining: chunks.len(),
                    depth,
                })
            }
        }
    }

    /// Returns `mix_in_length(merkleize_vector(chunks, limit), chunks.len())`.
    pub fn merkleize_list(&self, chunks: Vec<Chunk>, limit: usize) -> Result<Hash256, Error> {
        let length = chunks.len();
        let root = self.merkleize_vector(chunks, limit)?;
        Ok(self.mix_in_length(&root, length))
    }

    /// Returns the root of a container with the given field roots.
    pub fn merkleize_container(&self, field_roots: &[Hash256]) -> Result<Hash256, Error> {
        let chunks = field_roots.iter().map(|root| root.0).collect::<Vec<_>>();
        self.merkleize_vector(chunks, field_roots.len())
    }

    /// Returns the root of `bytes` partitioned into zero-padded chunks.
    ///
    /// Returns `Error::EmptyBytes` if `bytes` is empty.
    pub fn merkleize_bytes(&self, bytes: &[u8]) -> Result<Hash256, Error> {
        if bytes.is_empty() {
            return Err(Error::EmptyBytes);
        }

        let chunks = bytes_to_chunks(bytes);
        let limit = chunks.len();
        self.merkleize_vector(chunks, limit)
    }

    /// Returns the node created by hashing `root` and `length`.
    pub fn mix_in_length(&self, root: &Hash256, length: usize) -> Hash256 {
        let mut length_chunk = [0; BYTES_PER_CHUNK];
        length_chunk[0..8].copy_from_slice(&(length as u64).to_le_bytes());

        Hash256::from(self.hasher.hash_pair(&root.0, &length_chunk))
    }

    /// Returns the root of `items` as an SSZ vector of at most `limit` items.
    ///
    /// Basic items are packed, composite items are represented by their own roots.
    pub fn vec_tree_hash_root<T: TreeHash>(
        &self,
        items: &[T],
        limit: usize,
    ) -> Result<Hash256, Error> {
        self.merkleize_vector(item_chunks(items)?, chunk_limit_for::<T>(limit))
    }
}

/// Splits `bytes` into 32-byte chunks, zero-padding the last.
pub fn bytes_to_chunks(bytes: &[u8]) -> Vec<Chunk> {
    bytes
        .chunks(BYTES_PER_CHUNK)
        .map(|slice| {
            let mut chunk = [0; BYTES_PER_CHUNK];
            chunk[..slice.len()].copy_from_slice(slice);
            chunk
        })
        .collect()
}

/// Concatenates the packed encodings of basic `items` into zero-padded chunks.
pub fn pack_basic<T: TreeHash>(items: &[T]) -> Vec<Chunk> {
    let mut bytes = Vec::with_capacity(
        (items.len() + T::tree_hash_packing_factor() - 1) / T::tree_hash_packing_factor()
            * BYTES_PER_CHUNK,
    );
    for item in items {
        bytes.extend_from_slice(&item.tree_hash_packed_encoding());
    }

    bytes_to_chunks(&bytes)
}

/// Returns the leaves for `items`: packed chunks for basic items, one root per composite item.
pub fn item_chunks<T: TreeHash>(items: &[T]) -> Result<Vec<Chunk>, Error> {
    match T::tree_hash_type() {
        TreeHashType::Basic => Ok(pack_basic(items)),
        TreeHashType::Vector | TreeHashType::List | TreeHashType::Container => items
            .iter()
            .map(|item| item.tree_hash_root().map(|root| root.0))
            .collect(),
    }
}

/// Returns the number of chunks occupied by `limit` items of type `T`.
pub fn chunk_limit_for<T: TreeHash>(limit: usize) -> usize {
    match T::tree_hash_type() {
        TreeHashType::Basic => {
            let factor = T::tree_hash_packing_factor();
            limit / factor + usize::from(limit % factor != 0)
        }
        TreeHashType::Vector | TreeHashType::List | TreeHashType::Container => limit,
    }
}
