macro_rules! impl_from_into_u64 {
    ($main: ident) => {
        impl From<u64> for $main {
            fn from(n: u64) -> $main {
                $main(n)
            }
        }

        impl From<$main> for u64 {
            fn from(from: $main) -> u64 {
                from.0
            }
        }

        impl $main {
            pub fn as_u64(&self) -> u64 {
                self.0
            }
        }
    };
}

macro_rules! impl_from_into_usize {
    ($main: ident) => {
        impl From<usize> for $main {
            fn from(n: usize) -> $main {
                $main(n as u64)
            }
        }

        impl From<$main> for usize {
            fn from(from: $main) -> usize {
                from.0 as usize
            }
        }

        impl $main {
            pub fn as_usize(&self) -> usize {
                self.0 as usize
            }
        }
    };
}

/// Saturating arithmetic and comparison between `$main` and `$other`.
macro_rules! impl_math_between {
    ($main: ident, $other: ident) => {
        impl PartialOrd<$other> for $main {
            fn partial_cmp(&self, other: &$other) -> Option<Ordering> {
                let other: u64 = (*other).into();
                self.0.partial_cmp(&other)
            }
        }

        impl PartialEq<$other> for $main {
            fn eq(&self, other: &$other) -> bool {
                let other: u64 = (*other).into();
                self.0 == other
            }
        }

        impl Add<$other> for $main {
            type Output = $main;

            fn add(self, other: $other) -> $main {
                $main::from(self.0.saturating_add(other.into()))
            }
        }

        impl AddAssign<$other> for $main {
            fn add_assign(&mut self, other: $other) {
                self.0 = self.0.saturating_add(other.into());
            }
        }

        impl Sub<$other> for $main {
            type Output = $main;

            fn sub(self, other: $other) -> $main {
                $main::from(self.0.saturating_sub(other.into()))
            }
        }

        impl SubAssign<$other> for $main {
            fn sub_assign(&mut self, other: $other) {
                self.0 = self.0.saturating_sub(other.into());
            }
        }

        impl Mul<$other> for $main {
            type Output = $main;

            fn mul(self, rhs: $other) -> $main {
                let rhs: u64 = rhs.into();
                $main::from(self.0.saturating_mul(rhs))
            }
        }

        impl Div<$other> for $main {
            type Output = $main;

            /// Division by zero yields zero rather than panicking.
            fn div(self, rhs: $other) -> $main {
                let rhs: u64 = rhs.into();
                $main::from(self.0.checked_div(rhs).unwrap_or(0))
            }
        }

        impl Rem<$other> for $main {
            type Output = $main;

            /// A zero modulus yields zero rather than panicking.
            fn rem(self, modulus: $other) -> $main {
                let modulus: u64 = modulus.into();
                $main::from(self.0.checked_rem(modulus).unwrap_or(0))
            }
        }
    };
}

macro_rules! impl_display {
    ($type: ident) => {
        impl fmt::Display for $type {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

macro_rules! impl_ssz {
    ($type: ident) => {
        impl ssz::Encode for $type {
            fn is_ssz_fixed_len() -> bool {
                <u64 as ssz::Encode>::is_ssz_fixed_len()
            }

            fn ssz_fixed_len() -> usize {
                <u64 as ssz::Encode>::ssz_fixed_len()
            }

            fn ssz_bytes_len(&self) -> usize {
                ssz::Encode::ssz_bytes_len(&0_u64)
            }

            fn ssz_append(&self, buf: &mut Vec<u8>) {
                ssz::Encode::ssz_append(&self.0, buf)
            }
        }

        impl ssz::Decode for $type {
            fn is_ssz_fixed_len() -> bool {
                <u64 as ssz::Decode>::is_ssz_fixed_len()
            }

            fn ssz_fixed_len() -> usize {
                <u64 as ssz::Decode>::ssz_fixed_len()
            }

            fn from_ssz_bytes(bytes: &[u8]) -> Result<Self, ssz::DecodeError> {
                Ok($type(<u64 as ssz::Decode>::from_ssz_bytes(bytes)?))
            }
        }

        impl ssz::SszSchema for $type {
            fn ssz_schema() -> ssz::SszType {
                <u64 as ssz::SszSchema>::ssz_schema()
            }
        }

        impl tree_hash::TreeHash for $type {
            fn tree_hash_type() -> tree_hash::TreeHashType {
                tree_hash::TreeHashType::Basic
            }

            fn tree_hash_packed_encoding(&self) -> tree_hash::PackedEncoding {
                tree_hash::TreeHash::tree_hash_packed_encoding(&self.0)
            }

            fn tree_hash_packing_factor() -> usize {
                <u64 as tree_hash::TreeHash>::tree_hash_packing_factor()
            }

            fn tree_hash_root(&self) -> Result<tree_hash::Hash256, tree_hash::Error> {
                tree_hash::TreeHash::tree_hash_root(&self.0)
            }
        }

        impl TestRandom for $type {
            fn random_for_test(rng: &mut impl RngCore) -> Self {
                $type::from(u64::random_for_test(rng))
            }
        }
    };
}

macro_rules! impl_common {
    ($type: ident) => {
        impl_from_into_u64!($type);
        impl_from_into_usize!($type);
        impl_math_between!($type, $type);
        impl_math_between!($type, u64);
        impl_display!($type);
        impl_ssz!($type);

        impl Ord for $type {
            fn cmp(&self, other: &$type) -> Ordering {
                self.0.cmp(&other.0)
            }
        }
    };
}

/// Generates the standard tests for `Slot` and `Epoch`.
#[cfg(test)]
macro_rules! all_tests {
    ($type: ident) => {
        #[test]
        fn saturating_math() {
            assert_eq!($type::new(3) + 4_u64, $type::new(7));
            assert_eq!($type::max_value() + 1_u64, $type::max_value());
            assert_eq!($type::new(3) - 4_u64, $type::new(0));
            assert_eq!($type::max_value() * 2_u64, $type::max_value());
            assert_eq!($type::new(9) / 0_u64, $type::new(0));
            assert_eq!($type::new(9) % 0_u64, $type::new(0));
            assert_eq!($type::new(9) % 4_u64, $type::new(1));

            let mut value = $type::new(1);
            value -= $type::new(2);
            assert_eq!(value, 0_u64);
            value += 5_u64;
            assert_eq!(value, 5_u64);
        }

        #[test]
        fn ordering_against_u64() {
            assert!($type::new(2) < 3_u64);
            assert!($type::new(2) > $type::new(1));
            assert_eq!($type::new(7), 7_u64);
        }

        #[test]
        fn ssz_matches_u64() {
            use ssz::{Decode, Encode};

            let value = $type::new(0x0102_0304);
            assert_eq!(value.as_ssz_bytes(), 0x0102_0304_u64.as_ssz_bytes());
            assert_eq!($type::from_ssz_bytes(&value.as_ssz_bytes()), Ok(value));
            assert_eq!(<$type as Encode>::ssz_fixed_len(), 8);
            assert!($type::from_ssz_bytes(&[0; 7]).is_err());
        }

        #[test]
        fn tree_hash_matches_u64() {
            use tree_hash::TreeHash;

            let value = $type::new(42);
            assert_eq!(value.tree_hash_root(), 42_u64.tree_hash_root());
            assert_eq!($type::tree_hash_packing_factor(), 4);
        }

        #[test]
        fn display_and_serde() {
            let value = $type::new(1234);
            assert_eq!(value.to_string(), "1234");
            let json = serde_json::to_string(&value).expect("should serialize");
            assert_eq!(json, "\"1234\"");
            assert_eq!(serde_json::from_str::<$type>(&json).expect("should decode"), value);
        }
    };
}
