//! A bit-level Keccak sponge on top of [`keccak::f1600`].
//!
//! **Warning**: this function is not SHA3.
//! Despite internally we use the same permutation function,
//! the padding is the original multi-rate `pad10*1` of the Keccak submission,
//! without the domain separation bits added by FIPS 202.
//! Digests therefore match the Keccak reference vectors
//! (the ones used by e.g. Ethereum), not `SHA3-256`.
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::{SpongePrimitive, KECCAK_F1600_WIDTH};
use crate::errors::SpongeError;

const STATE_BYTES: usize = KECCAK_F1600_WIDTH / 8;

fn transmute_state(st: &mut AlignedKeccakF1600) -> &mut [u64; 25] {
    unsafe { &mut *(st as *mut AlignedKeccakF1600 as *mut [u64; 25]) }
}

/// This is a wrapper around 200-byte buffer that's always 8-byte aligned
/// to make pointers to it safely convertible to pointers to [u64; 25]
/// (since u64 words must be 8-byte aligned)
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
#[repr(align(8))]
struct AlignedKeccakF1600([u8; STATE_BYTES]);

impl AlignedKeccakF1600 {
    fn permute(&mut self) {
        keccak::f1600(transmute_state(self));
    }

    fn xor_in(&mut self, offset: usize, input: &[u8]) {
        self.0[offset..offset + input.len()]
            .iter_mut()
            .zip(input)
            .for_each(|(s, i)| *s ^= i);
    }
}

impl Default for AlignedKeccakF1600 {
    fn default() -> Self {
        Self([0u8; STATE_BYTES])
    }
}

/// The Keccak sponge function, with bit-granular absorption.
///
/// Input is XORed in place into the first `rate` bits of the state.
/// Only the last non-empty absorb may end with a partial byte:
/// once a partial byte has been absorbed the sponge refuses more data.
/// Squeezing pads the message and permutes; after that, absorbing is refused.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct KeccakSponge {
    state: AlignedKeccakF1600,
    /// Rate, in bits. Always a multiple of 64.
    rate: usize,
    /// Bits absorbed in the current block.
    absorb_pos: usize,
    /// Bytes already squeezed from the current block.
    squeeze_pos: usize,
    squeezing: bool,
}

impl KeccakSponge {
    /// The rate of the sponge, in bits.
    pub fn rate(&self) -> usize {
        self.rate
    }

    /// The capacity of the sponge, in bits.
    pub fn capacity(&self) -> usize {
        KECCAK_F1600_WIDTH - self.rate
    }

    /// Whether the sponge has been padded and switched to squeezing.
    pub fn is_squeezing(&self) -> bool {
        self.squeezing
    }

    fn rate_bytes(&self) -> usize {
        self.rate / 8
    }

    fn absorb_whole_bytes(&mut self, mut input: &[u8]) {
        while !input.is_empty() {
            let offset = self.absorb_pos / 8;
            let chunk_len = usize::min(input.len(), self.rate_bytes() - offset);
            let (chunk, rest) = input.split_at(chunk_len);

            self.state.xor_in(offset, chunk);
            self.absorb_pos += 8 * chunk_len;
            if self.absorb_pos == self.rate {
                self.state.permute();
                self.absorb_pos = 0;
            }
            input = rest;
        }
    }

    /// Appends the `pad10*1` padding after the absorbed bits,
    /// and permutes so that the first block of output is ready.
    fn pad_and_switch_to_squeezing(&mut self) {
        // bits are numbered from the least significant one
        let pos = self.absorb_pos;
        self.state.0[pos / 8] ^= 1 << (pos % 8);
        if pos + 1 == self.rate {
            self.state.permute();
        }
        let last = self.rate - 1;
        self.state.0[last / 8] ^= 1 << (last % 8);
        self.state.permute();

        self.absorb_pos = 0;
        self.squeeze_pos = 0;
        self.squeezing = true;
    }
}

impl SpongePrimitive for KeccakSponge {
    fn initialize(rate: usize, capacity: usize) -> Result<Self, SpongeError> {
        if rate + capacity != KECCAK_F1600_WIDTH {
            return Err(format!(
                "Rate {} and capacity {} do not add up to the permutation width",
                rate, capacity
            )
            .into());
        }
        if rate == 0 || rate >= KECCAK_F1600_WIDTH || rate % 64 != 0 {
            return Err(format!("Unsupported rate {}", rate).into());
        }
        Ok(Self {
            state: AlignedKeccakF1600::default(),
            rate,
            absorb_pos: 0,
            squeeze_pos: 0,
            squeezing: false,
        })
    }

    fn absorb(&mut self, data: &[u8], bit_len: usize) -> Result<(), SpongeError> {
        if self.squeezing {
            return Err("Too late for additional input, squeezing has started".into());
        }
        if bit_len > 8 * data.len() {
            return Err(format!(
                "Cannot absorb {} bits from a {}-byte buffer",
                bit_len,
                data.len()
            )
            .into());
        }
        if bit_len == 0 {
            return Ok(());
        }
        if self.absorb_pos % 8 != 0 {
            return Err("Only the last absorbed chunk may contain a partial byte".into());
        }

        let whole_bytes = bit_len / 8;
        self.absorb_whole_bytes(&data[..whole_bytes]);

        let partial_bits = bit_len % 8;
        if partial_bits > 0 {
            // absorb_pos is a multiple of 8 strictly below the rate here,
            // so the partial byte always fits in the current block.
            let mask = (1u8 << partial_bits) - 1;
            self.state.0[self.absorb_pos / 8] ^= data[whole_bytes] & mask;
            self.absorb_pos += partial_bits;
        }
        Ok(())
    }

    fn squeeze(&mut self, output: &mut [u8], bit_len: usize) -> Result<(), SpongeError> {
        if bit_len % 8 != 0 {
            return Err("Only multiples of 8 bits can be squeezed".into());
        }
        let byte_len = bit_len / 8;
        if output.len() < byte_len {
            return Err(format!(
                "Output buffer of {} bytes is too short for {} bits",
                output.len(),
                bit_len
            )
            .into());
        }
        if !self.squeezing {
            self.pad_and_switch_to_squeezing();
        }

        let mut output = &mut output[..byte_len];
        while !output.is_empty() {
            if self.squeeze_pos == self.rate_bytes() {
                self.state.permute();
                self.squeeze_pos = 0;
            }
            let chunk_len = usize::min(output.len(), self.rate_bytes() - self.squeeze_pos);
            let (chunk, rest) = output.split_at_mut(chunk_len);
            chunk.copy_from_slice(&self.state.0[self.squeeze_pos..self.squeeze_pos + chunk_len]);
            self.squeeze_pos += chunk_len;
            output = rest;
        }
        Ok(())
    }
}

impl core::fmt::Debug for KeccakSponge {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        // Ensure that the state isn't accidentally logged
        f.debug_struct("KeccakSponge")
            .field("rate", &self.rate)
            .field("squeezing", &self.squeezing)
            .finish()
    }
}
