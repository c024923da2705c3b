//!
//! Keccak-NIST implements the Init/Update/Final/Hash hashing interface
//! of the NIST reference convention on top of the Keccak sponge function.
//!
//! # Overview
//!
//! Hashing goes through a [`HashState`]:
//!
//! - [`HashState::new`] picks the sponge rate and capacity for the requested output length,
//! - [`HashState::update`] appends a chunk of message, whose length is counted in bits,
//! - [`HashState::finalize`] squeezes exactly the requested number of output bits.
//!
//! When the whole message is at hand, [`hash`] does the three steps at once.
//!
//! ```
//! use keccak_nist::{hash, BitSequence, HashState};
//!
//! // 12 bits of message: the second byte carries 4 bits, in its most significant positions.
//! let message = BitSequence::new(&[0x53, 0x50], 12).unwrap();
//! let digest = hash(384, message).unwrap();
//! assert_eq!(digest.len(), 48);
//!
//! let mut state = HashState::<keccak_nist::KeccakSponge>::new(384).unwrap();
//! state.update(message).unwrap();
//! state.update(BitSequence::empty()).unwrap();
//! assert_eq!(state.finalize().unwrap(), digest);
//! ```
//!
//! Supported output lengths are 224, 256, 384 and 512 bits.
//! [`HashState::new`] also accepts 0, which selects the default Keccak\[r=1024, c=576\]
//! for output of arbitrary length, read with [`HashState::squeeze`].
//!
//! # Bit-level input
//!
//! A [`BitSequence`] follows the NIST convention: bits are read most significant first,
//! and a trailing partial byte keeps its bits in its high positions.
//! The Keccak sponge numbers bits the other way around,
//! so [`HashState::update`] shifts the trailing partial byte with [`align_last_byte`]
//! before absorbing it.
//! Only the last chunk of a message may end with a partial byte.
//!
//! # Sponges
//!
//! The interface is generic over a [`SpongePrimitive`], and defaults to [`KeccakSponge`],
//! which uses the permutation [`keccak::f1600`] with the original Keccak padding.
//! Digests match the Keccak submission vectors, not FIPS 202 SHA3.
//! For use with the [`digest`] traits, see [`Keccak224`], [`Keccak256`], [`Keccak384`] and [`Keccak512`].

#[cfg(target_endian = "big")]
compile_error!(
    r#"
This crate doesn't support big-endian targets.
"#
);

/// Bit-length messages.
mod bits;
/// Built-in errors.
mod errors;
/// Sponge functions traits and implementations.
pub mod hash;
/// Fixed-output hashers for the `digest` traits.
mod hashers;
/// The Init/Update/Final/Hash interface.
mod state;
/// Unit-tests.
#[cfg(test)]
mod tests;

pub use bits::{align_last_byte, BitSequence};
pub use errors::{HashError, HashResult, SpongeError};
pub use hash::{KeccakSponge, SpongeParams, SpongePrimitive};
pub use hashers::{Keccak224, Keccak256, Keccak384, Keccak512};
pub use state::{hash, hash_with, HashState, Status};
