use crate::bits::{align_last_byte, BitSequence};
use crate::errors::{HashError, HashResult, SpongeError};
use crate::hash::{KeccakSponge, SpongeParams, SpongePrimitive};

/// Where a [`HashState`] is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    /// Accepting input.
    Absorbing,
    /// Producing arbitrary-length output; no more input.
    Squeezing,
    /// The digest has been produced.
    Finalized,
    /// The sponge reported an error.
    Failed,
}

/// The state of a single digest computation (the `hashState` of the NIST interface).
///
/// Obtained from [`HashState::new`], fed with [`HashState::update`],
/// and closed with [`HashState::finalize`].
/// A state produces exactly one digest: once finalized, or once the sponge
/// has reported an error, every further call fails with [`HashError::InvalidState`].
///
/// ```
/// use keccak_nist::{HashState, KeccakSponge};
///
/// let mut state = HashState::<KeccakSponge>::new(256).unwrap();
/// state.update_bytes(b"The quick brown fox ").unwrap();
/// state.update_bytes(b"jumps over the lazy dog").unwrap();
/// let digest = state.finalize().unwrap();
/// assert_eq!(digest[..4], [0x4d, 0x74, 0x1b, 0x6f]);
/// ```
#[derive(Clone)]
pub struct HashState<S: SpongePrimitive = KeccakSponge> {
    sponge: S,
    fixed_output_length: usize,
    status: Status,
    absorbed_bits: u64,
}

impl<S: SpongePrimitive> HashState<S> {
    /// Initializes the sponge for an output length, in bits.
    ///
    /// Accepts 224, 256, 384 and 512, plus 0 for arbitrary-length output
    /// (to be read with [`HashState::squeeze`]).
    pub fn new(output_bits: usize) -> HashResult<Self> {
        let params = SpongeParams::for_output_length(output_bits)?;
        log::trace!(
            "Keccak[r={}, c={}] for {}-bit output",
            params.rate,
            params.capacity,
            output_bits
        );
        let sponge = S::initialize(params.rate, params.capacity)?;
        Ok(Self {
            sponge,
            fixed_output_length: output_bits,
            status: Status::Absorbing,
            absorbed_bits: 0,
        })
    }

    /// The output length fixed at initialization, in bits.
    pub fn fixed_output_length(&self) -> usize {
        self.fixed_output_length
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// Number of message bits absorbed so far.
    pub fn absorbed_bits(&self) -> u64 {
        self.absorbed_bits
    }

    #[cfg(test)]
    pub(crate) fn sponge(&self) -> &S {
        &self.sponge
    }

    /// Appends `data` to the message.
    ///
    /// Whole bytes go to the sponge as they are.
    /// A trailing partial byte is realigned with [`align_last_byte`] and absorbed on its own.
    /// Since the sponge accepts a partial byte only at the very end of the message,
    /// every call but the last one should carry a whole number of bytes.
    pub fn update(&mut self, data: BitSequence<'_>) -> HashResult<()> {
        self.ensure(Status::Absorbing, "update called outside of the absorbing phase")?;

        let prefix = data.aligned_prefix();
        let absorbed = self.sponge.absorb(prefix, 8 * prefix.len());
        self.check(absorbed)?;

        if let Some((byte, n)) = data.trailing_bits() {
            let last_byte = align_last_byte(byte, n);
            let absorbed = self.sponge.absorb(&[last_byte], n);
            self.check(absorbed)?;
        }
        self.absorbed_bits += data.bit_len() as u64;
        Ok(())
    }

    /// Appends whole bytes to the message.
    #[inline]
    pub fn update_bytes(&mut self, data: &[u8]) -> HashResult<()> {
        self.update(BitSequence::from_bytes(data))
    }

    /// Produces the digest of the message, `ceil(fixed_output_length / 8)` bytes long.
    ///
    /// States initialized with output length 0 have no fixed length to produce:
    /// for them this call fails and leaves the state untouched.
    pub fn finalize(&mut self) -> HashResult<Vec<u8>> {
        self.ensure(Status::Absorbing, "finalize called outside of the absorbing phase")?;
        if self.fixed_output_length == 0 {
            return Err(HashError::InvalidState(
                "arbitrary-length output has no fixed digest, use squeeze",
            ));
        }

        let mut digest = vec![0u8; self.fixed_output_length.div_ceil(8)];
        let squeezed = self.sponge.squeeze(&mut digest, self.fixed_output_length);
        self.check(squeezed)?;
        self.status = Status::Finalized;
        Ok(digest)
    }

    /// Reads the next `output_bits` of arbitrary-length output.
    ///
    /// Only for states initialized with output length 0.
    /// Consecutive calls continue the same output stream; input is closed by the first call.
    pub fn squeeze(&mut self, output_bits: usize) -> HashResult<Vec<u8>> {
        if self.fixed_output_length != 0 {
            return Err(HashError::InvalidState(
                "squeeze needs a state initialized for arbitrary-length output",
            ));
        }
        if self.status == Status::Absorbing {
            self.status = Status::Squeezing;
        }
        self.ensure(Status::Squeezing, "squeeze called on a closed state")?;

        log::trace!("squeezing {} bits", output_bits);
        let mut output = vec![0u8; output_bits.div_ceil(8)];
        let squeezed = self.sponge.squeeze(&mut output, output_bits);
        self.check(squeezed)?;
        Ok(output)
    }

    fn ensure(&self, expected: Status, reason: &'static str) -> HashResult<()> {
        if self.status == expected {
            Ok(())
        } else {
            Err(HashError::InvalidState(reason))
        }
    }

    /// Marks the state as failed if the sponge refused the last call.
    fn check(&mut self, result: Result<(), SpongeError>) -> HashResult<()> {
        result.map_err(|e| {
            log::debug!("sponge failure, hash state is no longer usable: {}", e);
            self.status = Status::Failed;
            e.into()
        })
    }
}

impl<S: SpongePrimitive> Drop for HashState<S> {
    fn drop(&mut self) {
        if self.status == Status::Absorbing && self.absorbed_bits > 0 {
            log::warn!(
                "Hash state dropped with {} absorbed bits and no digest",
                self.absorbed_bits
            )
        }
    }
}

impl<S: SpongePrimitive> ::core::fmt::Debug for HashState<S> {
    fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
        // Ensure that the sponge isn't accidentally logged
        f.debug_struct("HashState")
            .field("fixed_output_length", &self.fixed_output_length)
            .field("status", &self.status)
            .field("absorbed_bits", &self.absorbed_bits)
            .finish()
    }
}

/// Hashes `data` in one go, with the Keccak sponge.
///
/// `output_bits` must be one of 224, 256, 384 or 512.
/// Arbitrary-length output is only available through [`HashState`].
///
/// ```
/// use keccak_nist::{hash, BitSequence};
///
/// let digest = hash(256, BitSequence::empty()).unwrap();
/// assert_eq!(digest[..4], [0xc5, 0xd2, 0x46, 0x01]);
/// assert!(hash(0, BitSequence::empty()).is_err());
/// ```
pub fn hash(output_bits: usize, data: BitSequence<'_>) -> HashResult<Vec<u8>> {
    hash_with::<KeccakSponge>(output_bits, data)
}

/// Hashes `data` in one go, with a sponge of choice.
pub fn hash_with<S: SpongePrimitive>(
    output_bits: usize,
    data: BitSequence<'_>,
) -> HashResult<Vec<u8>> {
    if !matches!(output_bits, 224 | 256 | 384 | 512) {
        return Err(HashError::UnsupportedOutputLength(output_bits));
    }
    let mut state = HashState::<S>::new(output_bits)?;
    state.update(data)?;
    state.finalize()
}
