use merkle_proof::MerkleTrie;
use slog::{o, Logger};
use ssz_types::{
    typenum::{U16, U32},
    FixedVector, VariableList,
};
use tree_hash::{Hash256, Merkleizer, MerkleizerConfig, RingPairHasher, TreeHash};
use tree_hash_derive::TreeHash;

#[derive(TreeHash)]
struct Header {
    slot: u64,
    proposer_index: u64,
    parent_root: Hash256,
    state_root: Hash256,
    body_root: Hash256,
}

fn header() -> Header {
    Header {
        slot: 12,
        proposer_index: 3,
        parent_root: Hash256::repeat_byte(0xaa),
        state_root: Hash256::repeat_byte(0xbb),
        body_root: Hash256::repeat_byte(0xcc),
    }
}

#[test]
fn list_matches_variable_list() {
    let balances: Vec<u64> = (0..21).map(|i| 32_000_000_000 + i).collect();
    let list: VariableList<u64, U32> = VariableList::from(balances.clone());

    let trie = MerkleTrie::from_list(&balances, 32).unwrap();

    assert_eq!(Ok(trie.hash_tree_root()), list.tree_hash_root());
    assert_eq!(trie.length(), 21);
    // 32 u64 occupy 8 chunks.
    assert_eq!(trie.depth(), 3);
}

#[test]
fn vector_matches_fixed_vector() {
    let roots: Vec<Hash256> = (0..32).map(Hash256::from_low_u64_le).collect();
    let vector: FixedVector<Hash256, U32> = FixedVector::from(roots.clone());

    let trie = MerkleTrie::from_vector(&roots, 32).unwrap();

    assert_eq!(Ok(trie.hash_tree_root()), vector.tree_hash_root());
    assert_eq!(trie.root(), trie.hash_tree_root());
}

#[test]
fn container_matches_derive() {
    let header = header();
    let field_roots = [
        header.slot.tree_hash_root().unwrap(),
        header.proposer_index.tree_hash_root().unwrap(),
        header.parent_root,
        header.state_root,
        header.body_root,
    ];

    let trie = MerkleTrie::from_container(&field_roots).unwrap();

    assert_eq!(Ok(trie.root()), header.tree_hash_root());

    // The state root is field 3 of a depth-3 tree.
    let (leaf, proof) = trie.generate_proof(3).unwrap();
    assert_eq!(leaf, header.state_root);
    assert_eq!(proof.len(), 3);
    assert_eq!(proof[0], header.parent_root);
}

#[test]
fn custom_merkleizer() {
    let config = MerkleizerConfig {
        parallelization_threshold: 2,
        workers: Some(3),
    };
    let merkleizer =
        Merkleizer::new(RingPairHasher, config, Logger::root(slog::Discard, o!())).unwrap();
    let roots: Vec<Hash256> = (0..100).map(Hash256::from_low_u64_le).collect();

    let custom = MerkleTrie::from_list_with(&merkleizer, &roots, 128).unwrap();
    let default = MerkleTrie::from_list(&roots, 128).unwrap();

    assert_eq!(custom.hash_tree_root(), default.hash_tree_root());
    for depth in 0..=custom.depth() {
        assert_eq!(custom.layer(depth), default.layer(depth));
    }
}

#[test]
fn appending_to_a_list_updates_length() {
    let mut roots: Vec<Hash256> = (0..5).map(Hash256::from_low_u64_le).collect();
    let mut trie = MerkleTrie::from_list(&roots, 16).unwrap();

    let new_root = Hash256::repeat_byte(9);
    trie.insert(5, new_root).unwrap();
    roots.push(new_root);

    let list: VariableList<Hash256, U16> = VariableList::from(roots);

    assert_eq!(trie.length(), 6);
    assert_eq!(Ok(trie.hash_tree_root()), list.tree_hash_root());
}
