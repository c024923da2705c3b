//! Sponge functions underneath the hashing interface.
//!
//! The interface in [`crate::HashState`] never touches a permutation directly.
//! It talks to a [`SpongePrimitive`], which owns the permutation state and
//! exposes bit-addressed absorb and squeeze operations.
//! The crate ships one implementation, [`KeccakSponge`], built on [`::keccak::f1600`].

/// The Keccak sponge over Keccak-f\[1600\].
pub mod keccak;

pub use self::keccak::KeccakSponge;

use crate::errors::{HashError, HashResult, SpongeError};

/// Width of the Keccak-f\[1600\] permutation, in bits.
pub const KECCAK_F1600_WIDTH: usize = 1600;

/// A sponge function accepting bit-level input.
///
/// Bit addressing follows the Keccak convention:
/// within a byte, bits are numbered starting from the least significant one,
/// so a trailing partial byte of `n` bits carries them in its `n` low positions.
///
/// **HAZARD**: implementations are trusted to be correct.
/// Nothing in this crate checks the output of the permutation.
pub trait SpongePrimitive: Sized {
    /// Sets up a fresh sponge with the given rate and capacity, in bits.
    fn initialize(rate: usize, capacity: usize) -> Result<Self, SpongeError>;

    /// Absorbs the first `bit_len` bits of `data`.
    ///
    /// `bit_len` may be zero. When it is not a multiple of 8, the last byte
    /// contributes its `bit_len % 8` least significant bits.
    fn absorb(&mut self, data: &[u8], bit_len: usize) -> Result<(), SpongeError>;

    /// Squeezes `bit_len` bits, writing `ceil(bit_len / 8)` bytes into `output`.
    fn squeeze(&mut self, output: &mut [u8], bit_len: usize) -> Result<(), SpongeError>;
}

/// The rate and capacity, in bits, of a sponge configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpongeParams {
    pub rate: usize,
    pub capacity: usize,
}

impl SpongeParams {
    /// Output lengths accepted by [`SpongeParams::for_output_length`].
    ///
    /// `0` stands for the default, arbitrary-length output.
    pub const SUPPORTED_OUTPUT_LENGTHS: [usize; 5] = [0, 224, 256, 384, 512];

    const fn new(rate: usize, capacity: usize) -> Self {
        Self { rate, capacity }
    }

    /// Picks the sponge configuration for an output length, in bits.
    ///
    /// The capacity is twice the output length, so that the sponge
    /// offers the same security strength as the digest size suggests.
    pub fn for_output_length(output_bits: usize) -> HashResult<Self> {
        let params = match output_bits {
            0 => Self::new(1024, 576),
            224 => Self::new(1152, 448),
            256 => Self::new(1088, 512),
            384 => Self::new(832, 768),
            512 => Self::new(576, 1024),
            _ => return Err(HashError::UnsupportedOutputLength(output_bits)),
        };
        debug_assert_eq!(params.width(), KECCAK_F1600_WIDTH);
        Ok(params)
    }

    /// Rate plus capacity.
    pub const fn width(&self) -> usize {
        self.rate + self.capacity
    }
}
