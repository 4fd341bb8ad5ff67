//! Integer helpers for sizing Merkle trees.

/// Returns the 0-based position of the highest set bit in `v`, or 0 if `v == 0`.
///
/// Binary search over the bit-widths `32, 16, 8, 4, 2, 1`.
pub fn bit_index(v: u64) -> usize {
    let mut v = v;
    let mut index = 0;

    for shift in [32, 16, 8, 4, 2, 1] {
        if v >> shift != 0 {
            v >>= shift;
            index += shift;
        }
    }

    index
}

/// Returns the number of bits required to represent `v`.
pub fn bit_length(v: u64) -> usize {
    if v == 0 {
        0
    } else {
        bit_index(v) + 1
    }
}

/// Returns the number of pairwise reduction levels needed to reduce `v` leaves to a single root.
pub fn cover_depth(v: u64) -> usize {
    if v <= 1 {
        0
    } else {
        bit_index(v - 1) + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_macros::quickcheck;

    #[test]
    fn reference_values() {
        assert_eq!(cover_depth(0), 0);
        assert_eq!(cover_depth(1), 0);
        assert_eq!(cover_depth(2), 1);
        assert_eq!(cover_depth(3), 2);
        assert_eq!(cover_depth(4), 2);
        assert_eq!(cover_depth(5), 3);
        assert_eq!(cover_depth(8), 3);
        assert_eq!(cover_depth(9), 4);

        assert_eq!(bit_length(0), 0);
        assert_eq!(bit_length(1), 1);
        assert_eq!(bit_length(8), 4);
        assert_eq!(bit_length(9), 4);

        assert_eq!(bit_index(0), 0);
        assert_eq!(bit_index(8), 3);
        assert_eq!(bit_index(9), 3);
    }

    #[test]
    fn max_value() {
        assert_eq!(bit_index(u64::MAX), 63);
        assert_eq!(bit_length(u64::MAX), 64);
        assert_eq!(cover_depth(u64::MAX), 64);
        assert_eq!(cover_depth(1 << 63), 63);
        assert_eq!(cover_depth((1 << 63) + 1), 64);
    }

    #[quickcheck]
    fn bit_length_matches_leading_zeros(v: u64) -> bool {
        bit_length(v) == 64 - v.leading_zeros() as usize
    }

    #[quickcheck]
    fn cover_depth_covers(v: u64) -> bool {
        let depth = cover_depth(v);
        let covers = depth == 64 || v <= 1 << depth;
        let minimal = depth == 0 || v > 1 << (depth - 1);
        covers && minimal
    }
}
