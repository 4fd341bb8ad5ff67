use ethereum_hashing::hash32_concat;
use tree_hash::{Hash256, TreeHash, TreeHashType};
use tree_hash_derive::TreeHash;

fn leaf(value: u64) -> [u8; 32] {
    let mut leaf = [0; 32];
    leaf[0..8].copy_from_slice(&value.to_le_bytes());
    leaf
}

#[derive(Clone, Debug, TreeHash)]
pub struct Inner {
    pub a: u64,
    pub b: u64,
    pub c: u64,
    pub d: u64,
}

#[test]
fn four_fields() {
    let inner = Inner {
        a: 1,
        b: 2,
        c: 3,
        d: 4,
    };

    let expected = hash32_concat(
        &hash32_concat(&leaf(1), &leaf(2)),
        &hash32_concat(&leaf(3), &leaf(4)),
    );

    assert_eq!(Inner::tree_hash_type(), TreeHashType::Container);
    assert_eq!(inner.tree_hash_root(), Ok(Hash256::from(expected)));
}

#[derive(Clone, Debug, TreeHash)]
pub struct Uneven {
    pub a: u64,
    pub b: u64,
    pub c: u64,
}

#[test]
fn uneven_fields_are_padded() {
    let uneven = Uneven { a: 1, b: 2, c: 3 };

    let expected = hash32_concat(
        &hash32_concat(&leaf(1), &leaf(2)),
        &hash32_concat(&leaf(3), &[0; 32]),
    );

    assert_eq!(uneven.tree_hash_root(), Ok(Hash256::from(expected)));
}

#[derive(Clone, Debug, TreeHash)]
pub struct Skipped {
    pub a: u64,
    pub b: u64,
    #[tree_hash(skip_hashing)]
    pub c: u64,
}

#[test]
fn skip_hashing() {
    let skipped = Skipped { a: 1, b: 2, c: 3 };

    assert_eq!(
        skipped.tree_hash_root(),
        Ok(Hash256::from(hash32_concat(&leaf(1), &leaf(2))))
    );
}

#[derive(Clone, Debug, TreeHash)]
pub struct Nested {
    pub inner: Inner,
    pub flag: bool,
}

#[test]
fn nested_container() {
    let nested = Nested {
        inner: Inner {
            a: 1,
            b: 2,
            c: 3,
            d: 4,
        },
        flag: true,
    };

    let inner_root = nested.inner.tree_hash_root().unwrap();
    assert_eq!(
        nested.tree_hash_root(),
        Ok(Hash256::from(hash32_concat(inner_root.as_bytes(), &leaf(1))))
    );
}

#[derive(Clone, Debug, TreeHash)]
pub struct Generic<T: TreeHash> {
    pub value: T,
}

#[test]
fn generic_single_field() {
    let generic = Generic { value: 7_u64 };

    assert_eq!(generic.tree_hash_root(), Ok(Hash256::from(leaf(7))));
}
