/// The [`keccak_nist`](crate) package has two types of errors:
/// [`SpongeError`], which is the error reported by a [`SpongePrimitive`](crate::hash::SpongePrimitive)
/// when an absorb, squeeze or initialization is refused,
/// and [`HashError`], which is the error exposed by the Init/Update/Final/Hash interface.
/// Four types of errors can happen when dealing with [`HashError`]:
///
/// - Unsupported output length ([`HashError::UnsupportedOutputLength`]):
///   the requested digest size is not one the entry point accepts.
///   It is detected before any sponge state is touched.
///
/// - Sponge failure ([`HashError::SpongePrimitiveFailure`]):
///   a wrapper around the [`SpongeError`] returned by the sponge, passed along unchanged.
///   The hash state that produced it cannot be used anymore.
///
/// - Invalid state ([`HashError::InvalidState`]):
///   the hash state was already finalized, has failed, or is in the wrong mode for the call.
///
/// - Invalid bit length ([`HashError::InvalidBitLength`]):
///   a [`BitSequence`](crate::BitSequence) claims more bits than its buffer holds.
///
/// A [`core::result::Result`] wrapper called [`HashResult`] (having error fixed to [`HashError`]) is also provided.
use std::{borrow::Borrow, error::Error, fmt::Display};

/// Signals that the sponge refused an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpongeError(String);

/// An error happened while computing a digest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HashError {
    /// The output length (in bits) is not supported by this entry point.
    UnsupportedOutputLength(usize),
    /// The sponge refused an absorb or squeeze.
    SpongePrimitiveFailure(SpongeError),
    /// The hash state cannot accept this call anymore.
    InvalidState(&'static str),
    /// The bit length exceeds the size of the buffer.
    InvalidBitLength { bit_len: usize, available: usize },
}

/// The result type of the hashing interface.
pub type HashResult<T> = Result<T, HashError>;

impl SpongeError {
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl Display for SpongeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

impl Display for HashError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedOutputLength(bits) => {
                write!(f, "Unsupported output length: {} bits", bits)
            }
            Self::SpongePrimitiveFailure(e) => e.fmt(f),
            Self::InvalidState(reason) => write!(f, "Invalid state: {}", reason),
            Self::InvalidBitLength { bit_len, available } => write!(
                f,
                "Invalid bit length: {} bits requested, {} available",
                bit_len, available
            ),
        }
    }
}

impl Error for SpongeError {}
impl Error for HashError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::SpongePrimitiveFailure(e) => Some(e),
            _ => None,
        }
    }
}

impl From<&str> for SpongeError {
    fn from(s: &str) -> Self {
        s.to_string().into()
    }
}

impl From<String> for SpongeError {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl<B: Borrow<SpongeError>> From<B> for HashError {
    fn from(value: B) -> Self {
        HashError::SpongePrimitiveFailure(value.borrow().clone())
    }
}
