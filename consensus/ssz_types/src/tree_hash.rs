use tree_hash::{Error, Hash256, TreeHash};
use typenum::Unsigned;

/// Returns the root of `vec` as an SSZ vector with the type-level length `N`.
pub fn vec_tree_hash_root<T, N>(vec: &[T]) -> Result<Hash256, Error>
where
    T: TreeHash,
    N: Unsigned,
{
    tree_hash::vec_tree_hash_root(vec, N::to_usize())
}

/// Returns the root of the little-endian bit-packed `bytes` of a bitfield holding at most `N` bits.
pub fn bitfield_bytes_tree_hash_root<N: Unsigned>(bytes: &[u8]) -> Result<Hash256, Error> {
    let chunk_limit = (N::to_usize() + 255) / 256;

    tree_hash::merkleizer().merkleize_vector(tree_hash::bytes_to_chunks(bytes), chunk_limit)
}
