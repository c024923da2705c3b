//! Fixed-output Keccak hashers for the [`digest`] ecosystem.
//!
//! Each type wraps a [`HashState`] over [`KeccakSponge`] and implements enough
//! of the `digest` traits for the blanket [`digest::Digest`] implementation to apply.
//!
//! ```
//! use digest::Digest;
//! use keccak_nist::Keccak256;
//!
//! let digest = Keccak256::digest(b"abc");
//! assert_eq!(digest[..4], [0x4e, 0x03, 0x65, 0x7a]);
//! ```

use digest::consts::{U28, U32, U48, U64};
use digest::{FixedOutput, FixedOutputReset, HashMarker, Output, OutputSizeUser, Reset, Update};
use generic_array::GenericArray;

use crate::hash::KeccakSponge;
use crate::HashState;

macro_rules! impl_keccak_hasher {
    ($name: ident, $bits: literal, $size: ty) => {
        #[doc = concat!("Keccak with ", stringify!($bits), "-bit output.")]
        #[derive(Clone, Debug)]
        pub struct $name {
            state: HashState<KeccakSponge>,
        }

        impl $name {
            /// Output length, in bits.
            pub const OUTPUT_BITS: usize = $bits;

            fn digest_into(&mut self, out: &mut GenericArray<u8, $size>) {
                // Guaranteed to succeed: the state only ever absorbed whole bytes
                // and is finalized once, right before being reset or dropped.
                let digest = self
                    .state
                    .finalize()
                    .expect("Internal error: Keccak finalization failed");
                out.copy_from_slice(&digest);
            }
        }

        impl Default for $name {
            fn default() -> Self {
                let state = HashState::new($bits)
                    .expect("Internal error: output length missing from the parameter table");
                Self { state }
            }
        }

        impl HashMarker for $name {}

        impl OutputSizeUser for $name {
            type OutputSize = $size;
        }

        impl Update for $name {
            fn update(&mut self, data: &[u8]) {
                self.state
                    .update_bytes(data)
                    .expect("Internal error: byte-aligned absorb refused");
            }
        }

        impl FixedOutput for $name {
            fn finalize_into(mut self, out: &mut Output<Self>) {
                self.digest_into(out);
            }
        }

        impl Reset for $name {
            fn reset(&mut self) {
                *self = Self::default();
            }
        }

        impl FixedOutputReset for $name {
            fn finalize_into_reset(&mut self, out: &mut Output<Self>) {
                self.digest_into(out);
                Reset::reset(self);
            }
        }
    };
}

impl_keccak_hasher!(Keccak224, 224, U28);
impl_keccak_hasher!(Keccak256, 256, U32);
impl_keccak_hasher!(Keccak384, 384, U48);
impl_keccak_hasher!(Keccak512, 512, U64);
