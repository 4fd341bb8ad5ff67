//! Provides encoding (serialization) and decoding (deserialization) in the SimpleSerialize (SSZ)
//! format designed for use in Ethereum 2.0.
//!
//! Adheres to the Ethereum 2.0 [SSZ
//! specification](https://github.com/ethereum/consensus-specs/blob/v1.3.0/ssz/simple-serialize.md).
//!
//! ## Example
//!
//! ```rust
//! use ssz_derive::{Encode, Decode};
//! use ssz::{Decode, Encode};
//!
//! #[derive(PartialEq, Debug, Encode, Decode)]
//! struct Foo {
//!     a: u64,
//!     b: Vec<u16>,
//! }
//!
//! fn ssz_encode_decode_example() {
//!     let foo = Foo {
//!         a: 42,
//!         b: vec![1, 3, 3, 7]
//!     };
//!
//!     let ssz_bytes: Vec<u8> = ssz::encode(&foo).unwrap();
//!
//!     let decoded_foo = Foo::from_ssz_bytes(&ssz_bytes).unwrap();
//!
//!     assert_eq!(foo, decoded_foo);
//! }
//!
//! ```
//!
//! See `consensus/types` in this workspace for larger, derived containers.
mod decode;
mod encode;
pub mod schema;

pub use decode::{
    decode_list_of_variable_length_items, impls::decode_list_of_fixed_length_items, read_offset,
    sanitize_offset, Decode, DecodeError, SszDecoder, SszDecoderBuilder,
};
pub use encode::{
    encode_length, impls::sequence_ssz_append, impls::sequence_ssz_bytes_len, Encode, EncodeError,
    SszEncoder,
};
pub use schema::{SszKind, SszSchema, SszType};

/// The number of bytes used to represent an offset.
pub const BYTES_PER_LENGTH_OFFSET: usize = 4;
/// The maximum value that can be represented using `BYTES_PER_LENGTH_OFFSET`.
pub const MAX_LENGTH_VALUE: usize = u32::MAX as usize;

/// Convenience function to SSZ encode an object supporting ssz::Encode.
///
/// Equivalent to `val.as_ssz_bytes()`; no length checks are performed.
pub fn ssz_encode<T>(val: &T) -> Vec<u8>
where
    T: Encode,
{
    val.as_ssz_bytes()
}

/// Encodes `val`, returning an error if the result cannot be addressed by `BYTES_PER_LENGTH_OFFSET`
/// byte offsets or if the bytes produced disagree with `val.ssz_bytes_len()`.
pub fn encode<T>(val: &T) -> Result<Vec<u8>, EncodeError>
where
    T: Encode,
{
    let expected = val.ssz_bytes_len();
    if expected > MAX_LENGTH_VALUE {
        return Err(EncodeError::OffsetOverflow { len: expected });
    }

    let bytes = val.as_ssz_bytes();
    if bytes.len() != expected {
        return Err(EncodeError::LengthMismatch {
            expected,
            actual: bytes.len(),
        });
    }

    Ok(bytes)
}

/// Decodes `T` from `bytes`, which must contain exactly one encoded `T`.
pub fn decode<T>(bytes: &[u8]) -> Result<T, DecodeError>
where
    T: Decode,
{
    T::from_ssz_bytes(bytes)
}
