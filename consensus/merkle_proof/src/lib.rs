//! A Merkle trie that retains every layer of a Merkleization so that inclusion proofs can be
//! produced for any leaf.
//!
//! Roots produced here are identical to those of the corresponding `tree_hash::Merkleizer` call.
use ethereum_hashing::{Chunk, PairHasher, Sha2PairHasher};
use tree_hash::{chunk_limit_for, cover_depth, item_chunks, Hash256, Merkleizer, TreeHash};

mod generalized_index;

pub use generalized_index::GeneralizedIndex;

#[derive(Debug, PartialEq, Clone)]
pub enum Error {
    TreeHash(tree_hash::Error),
    /// The index is beyond the leaves the trie can hold.
    IndexOutOfBounds { index: usize, capacity: usize },
    /// Leaves may only be overwritten or appended.
    NonContiguousInsert { index: usize, leaf_count: usize },
    /// A leaf of a list of packed basic items holds several items, so appending one leaves the
    /// list length undefined.
    PackedListAppend,
    /// No node sits at `index` in the layer `depth` levels below the root.
    InvalidGeneralizedIndex { depth: usize, index: u64 },
    /// The generalized index does not address a leaf of this trie.
    NotALeaf { gindex: GeneralizedIndex, depth: usize },
}

impl From<tree_hash::Error> for Error {
    fn from(e: tree_hash::Error) -> Self {
        Error::TreeHash(e)
    }
}

/// Every layer of a padded Merkle tree, from the leaves (`layer(0)`) to the root (`layer(depth)`).
///
/// Layers hold only the nodes derived from real leaves; the zero-padding implied by `limit` is
/// supplied from the zero-hash table when hashing and proving.
pub struct MerkleTrie<'a, H = Sha2PairHasher> {
    merkleizer: &'a Merkleizer<H>,
    layers: Vec<Vec<Chunk>>,
    zero_hashes: Vec<Chunk>,
    limit: usize,
    depth: usize,
    list_length: Option<usize>,
    packed: bool,
}

impl MerkleTrie<'static> {
    /// Builds a trie over raw `chunks`, padded to `limit` leaves.
    pub fn from_chunks(chunks: Vec<Chunk>, limit: usize) -> Result<Self, Error> {
        Self::from_chunks_with(tree_hash::merkleizer(), chunks, limit)
    }

    /// Builds a trie over an SSZ vector of at most `limit` items.
    pub fn from_vector<T: TreeHash>(items: &[T], limit: usize) -> Result<Self, Error> {
        Self::from_vector_with(tree_hash::merkleizer(), items, limit)
    }

    /// Builds a trie over an SSZ list of at most `limit` items, recording its length for the mixin.
    pub fn from_list<T: TreeHash>(items: &[T], limit: usize) -> Result<Self, Error> {
        Self::from_list_with(tree_hash::merkleizer(), items, limit)
    }

    /// Builds a trie over the field roots of a container.
    pub fn from_container(field_roots: &[Hash256]) -> Result<Self, Error> {
        Self::from_container_with(tree_hash::merkleizer(), field_roots)
    }
}

impl<'a, H: PairHasher> MerkleTrie<'a, H> {
    pub fn from_chunks_with(
        merkleizer: &'a Merkleizer<H>,
        chunks: Vec<Chunk>,
        limit: usize,
    ) -> Result<Self, Error> {
        Self::build(merkleizer, chunks, limit, None, false)
    }

    pub fn from_vector_with<T: TreeHash>(
        merkleizer: &'a Merkleizer<H>,
        items: &[T],
        limit: usize,
    ) -> Result<Self, Error> {
        Self::build(
            merkleizer,
            item_chunks(items)?,
            chunk_limit_for::<T>(limit),
            None,
            is_packed::<T>(),
        )
    }

    pub fn from_list_with<T: TreeHash>(
        merkleizer: &'a Merkleizer<H>,
        items: &[T],
        limit: usize,
    ) -> Result<Self, Error> {
        Self::build(
            merkleizer,
            item_chunks(items)?,
            chunk_limit_for::<T>(limit),
            Some(items.len()),
            is_packed::<T>(),
        )
    }

    pub fn from_container_with(
        merkleizer: &'a Merkleizer<H>,
        field_roots: &[Hash256],
    ) -> Result<Self, Error> {
        let chunks = field_roots.iter().map(|root| root.0).collect();
        Self::build(merkleizer, chunks, field_roots.len(), None, false)
    }

    fn build(
        merkleizer: &'a Merkleizer<H>,
        chunks: Vec<Chunk>,
        limit: usize,
        list_length: Option<usize>,
        packed: bool,
    ) -> Result<Self, Error> {
        if chunks.len() > limit {
            return Err(tree_hash::Error::MaximumLeavesExceeded {
                max_leaves: limit,
                leaves: chunks.len(),
            }
            .into());
        }

        let depth = cover_depth(limit as u64);
        let zero_hashes = (0..=depth)
            .map(|level| merkleizer.zero_hash(level).map(|hash| hash.0))
            .collect::<Result<Vec<_>, _>>()?;

        let mut layers = Vec::with_capacity(depth + 1);
        let mut current = chunks;

        for zero_hash in zero_hashes.iter().take(depth) {
            let padded = current.len() % 2 == 1;
            if padded {
                current.push(*zero_hash);
            }

            let next = merkleizer.reduce(&current)?;

            if padded {
                current.pop();
            }
            layers.push(std::mem::replace(&mut current, next));
        }
        layers.push(current);

        Ok(Self {
            merkleizer,
            layers,
            zero_hashes,
            limit,
            depth,
            list_length,
            packed,
        })
    }

    /// The root of the padded tree, without any length mixin.
    pub fn root(&self) -> Hash256 {
        Hash256::from(self.node(self.depth, 0))
    }

    /// The SSZ hash tree root: `root()` with the length mixed in for tries built from a list.
    pub fn hash_tree_root(&self) -> Hash256 {
        match self.list_length {
            Some(length) => self.merkleizer.mix_in_length(&self.root(), length),
            None => self.root(),
        }
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// The maximum number of leaves.
    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn leaf_count(&self) -> usize {
        self.layers.first().map_or(0, Vec::len)
    }

    /// The list length for list tries, otherwise the number of leaves.
    pub fn length(&self) -> usize {
        self.list_length.unwrap_or_else(|| self.leaf_count())
    }

    /// Returns the non-padding nodes at `depth`, where `0` is the leaves.
    pub fn layer(&self, depth: usize) -> Option<&[Chunk]> {
        self.layers.get(depth).map(Vec::as_slice)
    }

    /// Returns the node at `index` in `level`, or the zero hash for that level when the node is
    /// padding.
    fn node(&self, level: usize, index: usize) -> Chunk {
        self.layers
            .get(level)
            .and_then(|layer| layer.get(index))
            .or_else(|| self.zero_hashes.get(level))
            .copied()
            .unwrap_or([0; 32])
    }

    fn capacity(&self) -> usize {
        1_usize.checked_shl(self.depth as u32).unwrap_or(usize::MAX)
    }

    /// Returns the leaf at `index` and its sibling path, ordered from the leaf level upwards.
    ///
    /// The path always has `depth()` entries; padding siblings are zero hashes.
    pub fn generate_proof(&self, index: usize) -> Result<(Hash256, Vec<Hash256>), Error> {
        if self.depth < usize::BITS as usize && index >> self.depth != 0 {
            return Err(Error::IndexOutOfBounds {
                index,
                capacity: self.capacity(),
            });
        }

        let proof = (0..self.depth)
            .map(|level| Hash256::from(self.node(level, (index >> level) ^ 1)))
            .collect();

        Ok((Hash256::from(self.node(0, index)), proof))
    }

    /// The generalized index of the leaf at `index`.
    pub fn generalized_index(&self, index: usize) -> Result<GeneralizedIndex, Error> {
        GeneralizedIndex::new(self.depth, index as u64)
    }

    /// As `generate_proof`, addressing the leaf by its generalized index.
    pub fn generate_proof_for(
        &self,
        gindex: GeneralizedIndex,
    ) -> Result<(Hash256, Vec<Hash256>), Error> {
        if gindex.depth() != self.depth {
            return Err(Error::NotALeaf {
                gindex,
                depth: self.depth,
            });
        }
        let index = usize::try_from(gindex.leaf_index()).map_err(|_| Error::NotALeaf {
            gindex,
            depth: self.depth,
        })?;
        self.generate_proof(index)
    }

    /// As `generate_proof`, with the length chunk of `length()` appended so that the path leads
    /// to the list's hash tree root.
    pub fn generate_proof_with_mixin(
        &self,
        index: usize,
    ) -> Result<(Hash256, Vec<Hash256>), Error> {
        let (leaf, mut proof) = self.generate_proof(index)?;

        let mut length_chunk = [0; 32];
        length_chunk[0..8].copy_from_slice(&(self.length() as u64).to_le_bytes());
        proof.push(Hash256::from(length_chunk));

        Ok((leaf, proof))
    }

    /// Overwrites the leaf at `index`, or appends it when `index == leaf_count()`, then rehashes
    /// the path to the root.
    pub fn insert(&mut self, index: usize, leaf: Hash256) -> Result<(), Error> {
        let leaf_count = self.leaf_count();

        if index >= self.limit {
            return Err(Error::IndexOutOfBounds {
                index,
                capacity: self.limit,
            });
        }
        if index > leaf_count {
            return Err(Error::NonContiguousInsert { index, leaf_count });
        }

        let appending = index == leaf_count;
        if appending && self.packed && self.list_length.is_some() {
            return Err(Error::PackedListAppend);
        }

        set_or_push(&mut self.layers, 0, index, leaf.0);

        let mut index = index;
        for level in 0..self.depth {
            let parent = index / 2;
            let left = self.node(level, parent * 2);
            let right = self.node(level, parent * 2 + 1);
            let hash = self.merkleizer.hasher().hash_pair(&left, &right);

            set_or_push(&mut self.layers, level + 1, parent, hash);
            index = parent;
        }

        if appending {
            if let Some(length) = self.list_length.as_mut() {
                *length += 1;
            }
        }

        Ok(())
    }
}

fn set_or_push(layers: &mut [Vec<Chunk>], level: usize, index: usize, node: Chunk) {
    if let Some(layer) = layers.get_mut(level) {
        match layer.get_mut(index) {
            Some(existing) => *existing = node,
            None => layer.push(node),
        }
    }
}

fn is_packed<T: TreeHash>() -> bool {
    T::tree_hash_type() == tree_hash::TreeHashType::Basic
}

#[cfg(test)]
mod tests {
    use super::*;
    use ethereum_hashing::{hash32_concat, ZERO_HASHES};
    use quickcheck::TestResult;
    use quickcheck_macros::quickcheck;

    fn leaves(n: usize) -> Vec<Chunk> {
        (0..n as u64)
            .map(|i| *Hash256::from_low_u64_be(i + 1).as_fixed_bytes())
            .collect()
    }

    fn root_from_branch(leaf: Hash256, branch: &[Hash256], index: usize) -> Hash256 {
        let mut node = leaf.0;
        for (level, sibling) in branch.iter().enumerate() {
            node = if (index >> level) & 1 == 1 {
                hash32_concat(sibling.as_bytes(), &node)
            } else {
                hash32_concat(&node, sibling.as_bytes())
            };
        }
        Hash256::from(node)
    }

    #[test]
    fn small_example() {
        let leaf_b00 = [0xAA; 32];
        let leaf_b01 = [0xBB; 32];
        let leaf_b10 = [0xCC; 32];
        let leaf_b11 = [0xDD; 32];

        let node_b0x = hash32_concat(&leaf_b00, &leaf_b01);
        let node_b1x = hash32_concat(&leaf_b10, &leaf_b11);
        let root = hash32_concat(&node_b0x, &node_b1x);

        let trie = MerkleTrie::from_chunks(vec![leaf_b00, leaf_b01, leaf_b10, leaf_b11], 4).unwrap();

        assert_eq!(trie.root(), Hash256::from(root));
        assert_eq!(trie.depth(), 2);
        assert_eq!(trie.layer(1), Some(&[node_b0x, node_b1x][..]));
        assert_eq!(trie.layer(3), None);

        assert_eq!(
            trie.generate_proof(0b10),
            Ok((
                Hash256::from(leaf_b10),
                vec![Hash256::from(leaf_b11), Hash256::from(node_b0x)]
            ))
        );
    }

    #[test]
    fn sparse_zero_correct() {
        let dense = MerkleTrie::from_chunks(vec![[0; 32]; 4], 4).unwrap();
        let sparse = MerkleTrie::from_chunks(vec![], 4).unwrap();

        assert_eq!(dense.root(), sparse.root());
        assert_eq!(sparse.root(), Hash256::from(ZERO_HASHES[2]));
        assert_eq!(sparse.leaf_count(), 0);
    }

    #[test]
    fn padding_siblings_are_zero_hashes() {
        let trie = MerkleTrie::from_chunks(leaves(3), 16).unwrap();
        let (leaf, proof) = trie.generate_proof(2).unwrap();

        assert_eq!(leaf.0, leaves(3)[2]);
        assert_eq!(proof[0], Hash256::from(ZERO_HASHES[0]));
        assert_eq!(proof[2], Hash256::from(ZERO_HASHES[2]));
        assert_eq!(proof[3], Hash256::from(ZERO_HASHES[3]));

        // A padding leaf still has a valid path.
        let (leaf, proof) = trie.generate_proof(9).unwrap();
        assert_eq!(leaf, Hash256::zero());
        assert_eq!(root_from_branch(leaf, &proof, 9), trie.root());
    }

    #[test]
    fn too_many_leaves() {
        assert_eq!(
            MerkleTrie::from_chunks(leaves(5), 4).err(),
            Some(Error::TreeHash(tree_hash::Error::MaximumLeavesExceeded {
                max_leaves: 4,
                leaves: 5
            }))
        );
    }

    #[test]
    fn proof_index_out_of_bounds() {
        let trie = MerkleTrie::from_chunks(leaves(3), 5).unwrap();

        assert!(trie.generate_proof(7).is_ok());
        assert_eq!(
            trie.generate_proof(8),
            Err(Error::IndexOutOfBounds {
                index: 8,
                capacity: 8
            })
        );
    }

    #[test]
    fn insert_rules() {
        let mut trie = MerkleTrie::from_chunks(leaves(2), 4).unwrap();

        assert_eq!(
            trie.insert(3, Hash256::zero()),
            Err(Error::NonContiguousInsert {
                index: 3,
                leaf_count: 2
            })
        );
        assert_eq!(
            trie.insert(4, Hash256::zero()),
            Err(Error::IndexOutOfBounds {
                index: 4,
                capacity: 4
            })
        );

        let mut packed = MerkleTrie::from_list(&[1_u64, 2, 3], 64).unwrap();
        assert_eq!(
            packed.insert(1, Hash256::zero()),
            Err(Error::PackedListAppend)
        );
        assert_eq!(packed.insert(0, Hash256::repeat_byte(1)), Ok(()));
    }

    #[test]
    fn list_mixin_proof() {
        let items: Vec<Hash256> = leaves(5).into_iter().map(Hash256::from).collect();
        let trie = MerkleTrie::from_list(&items, 8).unwrap();

        let body = trie.root();
        assert_eq!(trie.hash_tree_root(), tree_hash::mix_in_length(&body, 5));

        let (leaf, proof) = trie.generate_proof_with_mixin(4).unwrap();
        assert_eq!(proof.len(), trie.depth() + 1);
        assert_eq!(
            root_from_branch(leaf, &proof, 4),
            trie.hash_tree_root()
        );
    }

    #[test]
    fn proof_at_maximum_depth() {
        let trie = MerkleTrie::from_chunks(vec![[7; 32]], usize::MAX).unwrap();
        assert_eq!(trie.depth(), 64);

        let (leaf, proof) = trie.generate_proof(usize::MAX).unwrap();
        assert_eq!(leaf, Hash256::zero());
        assert_eq!(proof.len(), 64);
        assert_eq!(proof[0], Hash256::from(ZERO_HASHES[0]));
        assert_eq!(proof[63].0, trie.layer(63).unwrap()[0]);
        assert_eq!(root_from_branch(leaf, &proof, usize::MAX), trie.root());
    }

    #[test]
    fn proof_by_generalized_index() {
        let trie = MerkleTrie::from_chunks(leaves(5), 8).unwrap();
        let gindex = trie.generalized_index(5).unwrap();

        assert_eq!(gindex.as_u64(), 13);
        assert_eq!(trie.generate_proof_for(gindex), trie.generate_proof(5));

        let (_, proof) = trie.generate_proof(5).unwrap();
        let expected: Vec<Hash256> = gindex
            .branch_indices()
            .into_iter()
            .zip(0..)
            .map(|(sibling, level)| {
                Hash256::from(trie.node(level, sibling.leaf_index() as usize))
            })
            .collect();
        assert_eq!(proof, expected);

        let parent = gindex.parent().unwrap();
        assert_eq!(
            trie.generate_proof_for(parent),
            Err(Error::NotALeaf {
                gindex: parent,
                depth: 3
            })
        );
        assert_eq!(
            trie.generalized_index(8),
            Err(Error::InvalidGeneralizedIndex { depth: 3, index: 8 })
        );
    }

    #[quickcheck]
    fn matches_merkleizer(num_leaves: u8, extra: u8) -> bool {
        let chunks = leaves(num_leaves as usize);
        let limit = num_leaves as usize + extra as usize;

        let trie = MerkleTrie::from_chunks(chunks.clone(), limit).unwrap();

        Ok(trie.root()) == tree_hash::merkleizer().merkleize_vector(chunks, limit)
    }

    #[quickcheck]
    fn all_proofs_lead_to_root(num_leaves: u8, extra: u8) -> TestResult {
        if num_leaves == 0 {
            return TestResult::discard();
        }

        let chunks = leaves(num_leaves as usize);
        let trie = MerkleTrie::from_chunks(chunks.clone(), num_leaves as usize + extra as usize)
            .unwrap();

        TestResult::from_bool((0..chunks.len()).all(|i| {
            let (leaf, proof) = trie.generate_proof(i).unwrap();
            leaf.0 == chunks[i]
                && proof.len() == trie.depth()
                && root_from_branch(leaf, &proof, i) == trie.root()
        }))
    }

    #[quickcheck]
    fn insert_matches_rebuild(num_leaves: u8, index: u8, extra: u8) -> TestResult {
        let num_leaves = num_leaves as usize;
        let index = index as usize;
        let limit = num_leaves + extra as usize + 1;

        if index > num_leaves {
            return TestResult::discard();
        }

        let mut chunks = leaves(num_leaves);
        let mut trie = MerkleTrie::from_chunks(chunks.clone(), limit).unwrap();

        let new_leaf = Hash256::repeat_byte(0x42);
        trie.insert(index, new_leaf).unwrap();
        if index == chunks.len() {
            chunks.push(new_leaf.0);
        } else {
            chunks[index] = new_leaf.0;
        }

        let rebuilt = MerkleTrie::from_chunks(chunks.clone(), limit).unwrap();

        TestResult::from_bool(
            trie.root() == rebuilt.root()
                && trie.leaf_count() == chunks.len()
                && (0..=trie.depth()).all(|d| trie.layer(d) == rebuilt.layer(d)),
        )
    }
}
