//! Generalized indices address a node of a binary Merkle tree. The root is `1` and the children of
//! node `i` are `2i` and `2i + 1`, so the bits of an index below its leading one spell out the
//! path from the root.
use crate::Error;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GeneralizedIndex(u64);

impl GeneralizedIndex {
    pub const ROOT: GeneralizedIndex = GeneralizedIndex(1);

    /// The node at `index` within the layer `depth` levels below the root.
    pub fn new(depth: usize, index: u64) -> Result<Self, Error> {
        let first = u32::try_from(depth)
            .ok()
            .and_then(|depth| 1_u64.checked_shl(depth))
            .filter(|first| index < *first)
            .ok_or(Error::InvalidGeneralizedIndex { depth, index })?;

        Ok(Self(first + index))
    }

    pub fn as_u64(self) -> u64 {
        self.0
    }

    pub fn is_root(self) -> bool {
        self.0 == 1
    }

    /// Number of levels between this node and the root, which is also the length of its proof.
    pub fn depth(self) -> usize {
        (u64::BITS - 1 - self.0.leading_zeros()) as usize
    }

    /// Position of this node within its layer.
    pub fn leaf_index(self) -> u64 {
        self.0 - (1 << self.depth())
    }

    /// `true` when the node at `position` levels above this one is a right child.
    pub fn index_bit(self, position: usize) -> bool {
        position < u64::BITS as usize && (self.0 >> position) & 1 == 1
    }

    pub fn sibling(self) -> Option<Self> {
        (!self.is_root()).then(|| Self(self.0 ^ 1))
    }

    pub fn parent(self) -> Option<Self> {
        (!self.is_root()).then(|| Self(self.0 / 2))
    }

    pub fn left_child(self) -> Option<Self> {
        self.0.checked_mul(2).map(Self)
    }

    pub fn right_child(self) -> Option<Self> {
        self.0
            .checked_mul(2)
            .and_then(|index| index.checked_add(1))
            .map(Self)
    }

    /// This node and its ancestors, excluding the root, from the bottom up.
    pub fn path_indices(self) -> Vec<Self> {
        let mut path = Vec::with_capacity(self.depth());
        let mut node = self;
        while let Some(parent) = node.parent() {
            path.push(node);
            node = parent;
        }
        path
    }

    /// The siblings of `path_indices()`: the nodes a single-leaf proof carries, in proof order.
    pub fn branch_indices(self) -> Vec<Self> {
        self.path_indices()
            .into_iter()
            .map(|node| Self(node.0 ^ 1))
            .collect()
    }

    /// Joins indices of nested subtrees into the index of the last node within the outermost
    /// tree. `concat(&[])` is the root.
    pub fn concat(indices: &[Self]) -> Result<Self, Error> {
        indices.iter().try_fold(Self::ROOT, |outer, inner| {
            let depth = inner.depth();
            outer
                .0
                .checked_mul(1 << depth)
                .and_then(|index| index.checked_add(inner.leaf_index()))
                .map(Self)
                .ok_or(Error::InvalidGeneralizedIndex {
                    depth: outer.depth() + depth,
                    index: inner.leaf_index(),
                })
        })
    }

    /// The nodes needed, besides `indices` themselves, to compute the root from the leaves at
    /// `indices`. Sorted in decreasing order, so for a single index it matches the proof order.
    pub fn helper_indices(indices: &[Self]) -> Vec<Self> {
        let mut helpers = BTreeSet::new();
        let mut paths = BTreeSet::new();

        for index in indices {
            helpers.extend(index.branch_indices());
            paths.extend(index.path_indices());
        }

        let mut result: Vec<Self> = helpers.difference(&paths).copied().collect();
        result.reverse();
        result
    }
}

impl TryFrom<u64> for GeneralizedIndex {
    type Error = Error;

    fn try_from(index: u64) -> Result<Self, Error> {
        if index == 0 {
            Err(Error::InvalidGeneralizedIndex { depth: 0, index })
        } else {
            Ok(Self(index))
        }
    }
}

impl From<GeneralizedIndex> for u64 {
    fn from(index: GeneralizedIndex) -> u64 {
        index.0
    }
}
