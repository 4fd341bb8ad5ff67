/// Generates SSZ and tree hash tests for a consensus type built with `TestRandom`.
///
/// The round trip goes through the checked `ssz::encode` entry point and the derived
/// `SszSchema` is checked against the encoder's notion of fixed length.
#[cfg(test)]
#[macro_export]
macro_rules! ssz_tests {
    ($type: ty) => {
        #[test]
        pub fn test_ssz_round_trip() {
            use $crate::test_utils::{SeedableRng, TestRandom, XorShiftRng};
            use ssz::{Decode, Encode};

            let mut rng = XorShiftRng::from_seed([42; 16]);
            let original = <$type>::random_for_test(&mut rng);

            let bytes = ssz::encode(&original).expect("random instance should encode");
            assert_eq!(bytes.len(), original.ssz_bytes_len());
            let decoded = <$type>::from_ssz_bytes(&bytes).expect("should decode");

            assert_eq!(original, decoded);
        }

        #[test]
        pub fn test_ssz_schema() {
            use ssz::{Encode, SszSchema};

            let schema = <$type as SszSchema>::ssz_schema();
            assert_eq!(
                schema.is_variable_size(),
                !<$type as Encode>::is_ssz_fixed_len()
            );
            if let Some(fixed_len) = schema.fixed_len() {
                assert_eq!(fixed_len, <$type as Encode>::ssz_fixed_len());
            }
        }
    };
}

#[cfg(test)]
#[macro_export]
macro_rules! tree_hash_tests {
    ($type: ty) => {
        #[test]
        pub fn test_tree_hash_root() {
            use $crate::test_utils::{SeedableRng, TestRandom, XorShiftRng};
            use tree_hash::TreeHash;

            let mut rng = XorShiftRng::from_seed([42; 16]);
            let original = <$type>::random_for_test(&mut rng);

            // Tree hashing must be deterministic and sensitive to the contents.
            let root = original.tree_hash_root().expect("should hash");
            assert_eq!(original.clone().tree_hash_root(), Ok(root));

            let other = <$type>::random_for_test(&mut rng);
            if other != original {
                assert_ne!(other.tree_hash_root(), Ok(root));
            }
        }
    };
}

#[cfg(test)]
#[macro_export]
macro_rules! ssz_and_tree_hash_tests {
    ($type: ty) => {
        ssz_tests!($type);
        tree_hash_tests!($type);
    };
}
