//! SHA-256 primitives used throughout SSZ merkleization.
//!
//! Besides the plain `hash` functions this crate defines the `PairHasher` trait: a batched
//! compression function mapping `2n` 32-byte chunks to `n` parent chunks. The merkleization
//! algorithm in `tree_hash` is written against this trait only, so implementations may be
//! swapped (e.g., a scalar reference hasher vs. a hardware-accelerated one) without touching it.
#[macro_use]
extern crate lazy_static;

use sha2::Digest;

/// Length of a SHA-256 digest in bytes.
pub const HASH_LEN: usize = 32;

/// The highest index of `ZERO_HASHES`.
///
/// A tree with `2^64` leaves has a depth of 64, which is the deepest tree that can be addressed
/// with a 64-bit leaf count.
pub const ZERO_HASHES_MAX_INDEX: usize = 64;

/// A single 32-byte chunk.
pub type Chunk = [u8; HASH_LEN];

/// Returns the SHA-256 digest of `input`.
pub fn hash(input: &[u8]) -> Vec<u8> {
    hash_fixed(input).to_vec()
}

/// Returns the SHA-256 digest of `input` as a fixed-size array.
pub fn hash_fixed(input: &[u8]) -> [u8; HASH_LEN] {
    let mut context = Context::new();
    context.update(input);
    context.finalize()
}

/// Compute the hash of two slices concatenated.
pub fn hash32_concat(h1: &[u8], h2: &[u8]) -> [u8; HASH_LEN] {
    let mut context = Context::new();
    context.update(h1);
    context.update(h2);
    context.finalize()
}

/// A streaming SHA-256 context.
pub trait Sha256Context {
    fn new() -> Self;

    fn update(&mut self, bytes: &[u8]);

    fn finalize(self) -> [u8; HASH_LEN];
}

/// `Sha256Context` backed by the `sha2` crate.
pub struct Context(sha2::Sha256);

impl Sha256Context for Context {
    fn new() -> Self {
        Self(sha2::Sha256::new())
    }

    fn update(&mut self, bytes: &[u8]) {
        self.0.update(bytes)
    }

    fn finalize(self) -> [u8; HASH_LEN] {
        let mut output = [0; HASH_LEN];
        output.copy_from_slice(&self.0.finalize());
        output
    }
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Error {
    /// The input to `hash_pairs` did not contain an even number of chunks.
    OddInputLength { len: usize },
    /// The output buffer cannot hold one chunk per input pair.
    OutputTooShort { required: usize, len: usize },
}

/// A batched 64-byte to 32-byte compression function.
///
/// Implementations must be deterministic and must agree with each other for the lifetime of a
/// tree, since zero-hash padding is derived from the same function.
pub trait PairHasher: Send + Sync {
    /// Writes `H(input[2i] ++ input[2i + 1])` to `output[i]` for every pair in `input`.
    ///
    /// ## Errors
    ///
    /// - `input.len()` is odd.
    /// - `output.len() < input.len() / 2`.
    fn hash_pairs(&self, output: &mut [Chunk], input: &[Chunk]) -> Result<(), Error>;

    /// Hashes a single pair of chunks.
    fn hash_pair(&self, left: &Chunk, right: &Chunk) -> Chunk {
        let mut output = [[0; HASH_LEN]; 1];
        // A single pair always satisfies the length preconditions.
        let _ = self.hash_pairs(&mut output, &[*left, *right]);
        output[0]
    }
}

fn check_pair_lengths(output: &[Chunk], input: &[Chunk]) -> Result<(), Error> {
    if input.len() % 2 != 0 {
        return Err(Error::OddInputLength { len: input.len() });
    }
    let required = input.len() / 2;
    if output.len() < required {
        return Err(Error::OutputTooShort {
            required,
            len: output.len(),
        });
    }
    Ok(())
}

/// `PairHasher` using the `sha2` crate, which selects SHA extensions at runtime where the CPU
/// supports them.
#[derive(Debug, Default, Clone, Copy)]
pub struct Sha2PairHasher;

impl PairHasher for Sha2PairHasher {
    fn hash_pairs(&self, output: &mut [Chunk], input: &[Chunk]) -> Result<(), Error> {
        check_pair_lengths(output, input)?;

        for (out, pair) in output.iter_mut().zip(input.chunks_exact(2)) {
            *out = hash32_concat(&pair[0], &pair[1]);
        }

        Ok(())
    }
}

/// `PairHasher` using `ring`'s SHA-256 implementation.
#[derive(Debug, Default, Clone, Copy)]
pub struct RingPairHasher;

impl PairHasher for RingPairHasher {
    fn hash_pairs(&self, output: &mut [Chunk], input: &[Chunk]) -> Result<(), Error> {
        check_pair_lengths(output, input)?;

        for (out, pair) in output.iter_mut().zip(input.chunks_exact(2)) {
            let mut context = ring::digest::Context::new(&ring::digest::SHA256);
            context.update(&pair[0]);
            context.update(&pair[1]);
            out.copy_from_slice(context.finish().as_ref());
        }

        Ok(())
    }
}

/// Computes the zero-hash table for `hasher`.
///
/// Entry `i` is the root of a tree of `2^i` zero-value leaves.
pub fn compute_zero_hashes<H: PairHasher + ?Sized>(hasher: &H) -> Vec<Chunk> {
    let mut hashes = vec![[0; HASH_LEN]; ZERO_HASHES_MAX_INDEX + 1];

    for i in 0..ZERO_HASHES_MAX_INDEX {
        hashes[i + 1] = hasher.hash_pair(&hashes[i], &hashes[i]);
    }

    hashes
}

lazy_static! {
    /// Cached zero hashes where `ZERO_HASHES[i]` is the hash of a Merkle tree with 2^i zero leaves.
    pub static ref ZERO_HASHES: Vec<Chunk> = compute_zero_hashes(&Sha2PairHasher);
}
