use super::*;

pub mod impls;

/// Returned when a checked encode fails.
#[derive(Debug, PartialEq, Clone)]
pub enum EncodeError {
    /// The encoding is longer than the largest offset that can be written.
    OffsetOverflow { len: usize },
    /// The number of bytes written differs from `ssz_bytes_len`.
    LengthMismatch { expected: usize, actual: usize },
}

/// Provides SSZ encoding (serialization) via the `as_ssz_bytes(&self)` method.
///
/// See the crate root for an example using `#[derive(Encode)]`.
pub trait Encode {
    /// Returns `true` if this object has a fixed-length.
    ///
    /// I.e., there are no variable length items in this object or any of it's contained objects.
    fn is_ssz_fixed_len() -> bool;

    /// Append the encoding `self` to `buf`.
    ///
    /// Note, variable length objects need only to append their "variable length" portion, they do
    /// not need to provide their offset.
    fn ssz_append(&self, buf: &mut Vec<u8>);

    /// The number of bytes this object occupies in the fixed-length portion of the SSZ bytes.
    ///
    /// By default, this is set to `BYTES_PER_LENGTH_OFFSET` which is suitable for variable length
    /// objects, but not fixed-length objects. Fixed-length objects _must_ return a value which
    /// represents their length.
    fn ssz_fixed_len() -> usize {
        BYTES_PER_LENGTH_OFFSET
    }

    /// Returns the size (in bytes) when `self` is serialized.
    ///
    /// Returns the same value as `self.as_ssz_bytes().len()` but this method is significantly more
    /// efficient.
    fn ssz_bytes_len(&self) -> usize;

    /// Returns the full-form encoding of this object.
    ///
    /// The default implementation of this method should suffice for most cases.
    fn as_ssz_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(self.ssz_bytes_len());

        self.ssz_append(&mut buf);

        buf
    }
}

/// A placeholder in the fixed part, waiting for the offset of its variable-length payload.
#[derive(Debug, Clone, Copy)]
struct Placeholder {
    /// Index of the placeholder bytes within the output buffer.
    position: usize,
    /// Sum of the lengths of all variable-length payloads appended before this one.
    variable_prefix: usize,
}

/// Allow for encoding an ordered series of distinct or indistinct objects as SSZ bytes.
///
/// **You must call `finalize(..)` after the final `append(..)` call** to ensure the bytes are
/// written to `buf`.
///
/// Fixed-length items are written straight into `buf`. Variable-length items get a
/// `BYTES_PER_LENGTH_OFFSET` placeholder in `buf` and their payload is held back until
/// `finalize`, at which point every placeholder is overwritten with
/// `fixed_length + variable_prefix`.
///
/// ## Example
///
/// Use `SszEncoder` to produce identical output to `foo.as_ssz_bytes()`:
///
/// ```rust
/// use ssz_derive::{Encode, Decode};
/// use ssz::{Decode, Encode, SszEncoder};
///
/// #[derive(PartialEq, Debug, Encode, Decode)]
/// struct Foo {
///     a: u64,
///     b: Vec<u16>,
/// }
///
/// fn ssz_encode_example() {
///     let foo = Foo {
///         a: 42,
///         b: vec![1, 3, 3, 7]
///     };
///
///     let mut buf: Vec<u8> = vec![];
///
///     let mut encoder = SszEncoder::container(&mut buf);
///
///     encoder.append(&foo.a);
///     encoder.append(&foo.b);
///
///     encoder.finalize();
///
///     let bytes = foo.as_ssz_bytes();
///
///     assert_eq!(bytes, buf);
/// }
/// ```
pub struct SszEncoder<'a> {
    buf: &'a mut Vec<u8>,
    start: usize,
    variable_bytes: Vec<u8>,
    placeholders: Vec<Placeholder>,
}

impl<'a> SszEncoder<'a> {
    /// Instantiate a new encoder for encoding a SSZ container or list of variable-length items.
    ///
    /// Offsets are measured from the current end of `buf`, which is where this object begins.
    pub fn container(buf: &'a mut Vec<u8>) -> Self {
        let start = buf.len();

        Self {
            buf,
            start,
            variable_bytes: vec![],
            placeholders: vec![],
        }
    }

    /// Append some `item` to the SSZ bytes.
    pub fn append<T: Encode>(&mut self, item: &T) {
        self.append_parameterized(T::is_ssz_fixed_len(), |buf| item.ssz_append(buf))
    }

    /// Uses `ssz_append` to append the encoding of some item to the SSZ bytes.
    pub fn append_parameterized<F>(&mut self, is_ssz_fixed_len: bool, ssz_append: F)
    where
        F: Fn(&mut Vec<u8>),
    {
        if is_ssz_fixed_len {
            ssz_append(self.buf);
        } else {
            self.placeholders.push(Placeholder {
                position: self.buf.len(),
                variable_prefix: self.variable_bytes.len(),
            });
            self.buf.extend_from_slice(&[0; BYTES_PER_LENGTH_OFFSET]);

            ssz_append(&mut self.variable_bytes);
        }
    }

    /// Write the variable bytes to `self.bytes`.
    ///
    /// This method must be called after the final `append(..)` call when serializing
    /// variable-length items.
    pub fn finalize(self) -> &'a mut Vec<u8> {
        let fixed_length = self.buf.len() - self.start;

        for placeholder in &self.placeholders {
            let offset = encode_length(fixed_length + placeholder.variable_prefix);
            self.buf[placeholder.position..placeholder.position + BYTES_PER_LENGTH_OFFSET]
                .copy_from_slice(&offset);
        }

        self.buf.extend_from_slice(&self.variable_bytes);

        self.buf
    }
}

/// Encode `len` as a little-endian byte array of `BYTES_PER_LENGTH_OFFSET` length.
///
/// If `len` is larger than `2 ^ BYTES_PER_LENGTH_OFFSET`, a `debug_assert` is raised.
pub fn encode_length(len: usize) -> [u8; BYTES_PER_LENGTH_OFFSET] {
    // Unchecked here; `ssz::encode` bounds the whole object once.
    debug_assert!(len <= MAX_LENGTH_VALUE);

    let mut bytes = [0; BYTES_PER_LENGTH_OFFSET];
    bytes.copy_from_slice(&len.to_le_bytes()[0..BYTES_PER_LENGTH_OFFSET]);
    bytes
}
