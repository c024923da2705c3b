use crate::errors::{HashError, HashResult};

/// A message whose length is counted in bits.
///
/// The bits are read from `bytes`, most significant bit first.
/// When the bit length is not a multiple of 8, the final byte holds its
/// meaningful bits in its most significant positions and the low bits are ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BitSequence<'a> {
    bytes: &'a [u8],
    bit_len: usize,
}

impl<'a> BitSequence<'a> {
    /// Takes the first `bit_len` bits of `bytes`.
    pub fn new(bytes: &'a [u8], bit_len: usize) -> HashResult<Self> {
        let available = 8 * bytes.len();
        if bit_len > available {
            return Err(HashError::InvalidBitLength { bit_len, available });
        }
        Ok(Self { bytes, bit_len })
    }

    /// Takes all the bits of `bytes`.
    pub fn from_bytes(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            bit_len: 8 * bytes.len(),
        }
    }

    /// The empty message.
    pub fn empty() -> Self {
        Self::from_bytes(&[])
    }

    pub fn bit_len(&self) -> usize {
        self.bit_len
    }

    pub fn is_empty(&self) -> bool {
        self.bit_len == 0
    }

    /// The whole bytes at the start of the message.
    pub fn aligned_prefix(&self) -> &'a [u8] {
        &self.bytes[..self.bit_len / 8]
    }

    /// The byte holding the trailing partial bits, and how many bits of it are used.
    pub fn trailing_bits(&self) -> Option<(u8, usize)> {
        match self.bit_len % 8 {
            0 => None,
            n => Some((self.bytes[self.bit_len / 8], n)),
        }
    }
}

impl<'a> From<&'a [u8]> for BitSequence<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for BitSequence<'a> {
    fn from(bytes: &'a [u8; N]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl<'a> From<&'a Vec<u8>> for BitSequence<'a> {
    fn from(bytes: &'a Vec<u8>) -> Self {
        Self::from_bytes(bytes)
    }
}

/// Moves the `n` meaningful bits of a final partial byte
/// from its most significant positions to its least significant ones,
/// where the Keccak sponge expects them.
///
/// `n` must be below 8. With `n == 0` there are no meaningful bits and the result is `0`.
#[inline]
pub fn align_last_byte(byte: u8, n: usize) -> u8 {
    debug_assert!(n < 8);
    byte.checked_shr(8 - n as u32).unwrap_or(0)
}
