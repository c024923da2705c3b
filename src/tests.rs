use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

use crate::hash::{KeccakSponge, SpongeParams, SpongePrimitive, KECCAK_F1600_WIDTH};
use crate::{hash, hash_with, BitSequence, HashError, HashState, SpongeError, Status};

/// A sponge that does no hashing and remembers every call.
struct RecordingSponge {
    params: (usize, usize),
    absorbed: Vec<(Vec<u8>, usize)>,
    squeezed: Vec<usize>,
}

impl SpongePrimitive for RecordingSponge {
    fn initialize(rate: usize, capacity: usize) -> Result<Self, SpongeError> {
        Ok(Self {
            params: (rate, capacity),
            absorbed: Vec::new(),
            squeezed: Vec::new(),
        })
    }

    fn absorb(&mut self, data: &[u8], bit_len: usize) -> Result<(), SpongeError> {
        self.absorbed.push((data[..bit_len.div_ceil(8)].to_vec(), bit_len));
        Ok(())
    }

    fn squeeze(&mut self, output: &mut [u8], bit_len: usize) -> Result<(), SpongeError> {
        output[..bit_len.div_ceil(8)].fill(0xab);
        self.squeezed.push(bit_len);
        Ok(())
    }
}

/// A sponge whose `FAIL_AT`-th absorb fails (counting from 0), and which never squeezes.
struct BrokenSponge<const FAIL_AT: usize> {
    absorb_calls: usize,
}

impl<const FAIL_AT: usize> SpongePrimitive for BrokenSponge<FAIL_AT> {
    fn initialize(_rate: usize, _capacity: usize) -> Result<Self, SpongeError> {
        Ok(Self { absorb_calls: 0 })
    }

    fn absorb(&mut self, _data: &[u8], _bit_len: usize) -> Result<(), SpongeError> {
        self.absorb_calls += 1;
        if self.absorb_calls - 1 == FAIL_AT {
            Err("buffer overrun".into())
        } else {
            Ok(())
        }
    }

    fn squeeze(&mut self, _output: &mut [u8], _bit_len: usize) -> Result<(), SpongeError> {
        Err("squeeze refused".into())
    }
}

/// A sponge that must never be reached.
struct UnreachableSponge;

impl SpongePrimitive for UnreachableSponge {
    fn initialize(_rate: usize, _capacity: usize) -> Result<Self, SpongeError> {
        unreachable!("sponge initialized")
    }

    fn absorb(&mut self, _data: &[u8], _bit_len: usize) -> Result<(), SpongeError> {
        unreachable!("sponge absorbed")
    }

    fn squeeze(&mut self, _output: &mut [u8], _bit_len: usize) -> Result<(), SpongeError> {
        unreachable!("sponge squeezed")
    }
}

fn keccak(output_bits: usize, bytes: &[u8], bit_len: usize) -> Vec<u8> {
    hash(output_bits, BitSequence::new(bytes, bit_len).unwrap()).unwrap()
}

/// Every output length reaches the sponge with the right rate and capacity.
#[test]
fn test_parameter_selection() {
    for bits in SpongeParams::SUPPORTED_OUTPUT_LENGTHS {
        let state = HashState::<RecordingSponge>::new(bits).unwrap();
        let expected = SpongeParams::for_output_length(bits).unwrap();
        let (rate, capacity) = state.sponge().params;
        assert_eq!((rate, capacity), (expected.rate, expected.capacity));
        assert_eq!(rate + capacity, KECCAK_F1600_WIDTH);
        assert_eq!(state.fixed_output_length(), bits);
        assert_eq!(state.status(), Status::Absorbing);
    }
}

#[test]
fn test_unsupported_output_length() {
    for bits in [1, 160, 255, 1024] {
        assert_eq!(
            HashState::<UnreachableSponge>::new(bits).unwrap_err(),
            HashError::UnsupportedOutputLength(bits)
        );
    }
}

/// The one-shot wrapper rejects anything but the four standard sizes
/// before a sponge is even created.
#[test]
fn test_hash_rejects_without_touching_the_sponge() {
    for bits in [0, 8, 128, 160, 511, 1024] {
        assert_eq!(
            hash_with::<UnreachableSponge>(bits, BitSequence::from(b"abc")),
            Err(HashError::UnsupportedOutputLength(bits))
        );
    }
}

/// The aligned prefix goes first, then the trailing bits shifted to the low end of a byte.
#[test]
fn test_trailing_bits_realignment() {
    for n in 0..8 {
        for last in [0x00u8, 0xff, 0b1011_0110, 0b0100_1001] {
            let mut state = HashState::<RecordingSponge>::new(256).unwrap();
            state
                .update(BitSequence::new(&[0xa5, 0x3c, last], 16 + n).unwrap())
                .unwrap();

            let absorbed = &state.sponge().absorbed;
            assert_eq!(absorbed[0], (vec![0xa5, 0x3c], 16));
            if n == 0 {
                assert_eq!(absorbed.len(), 1);
            } else {
                // the n most significant bits, read as an n-bit number
                let value = (0..n).fold(0u8, |acc, i| (acc << 1) | ((last >> (7 - i)) & 1));
                assert_eq!(absorbed.len(), 2);
                assert_eq!(absorbed[1], (vec![value], n), "last = {last:#010b}, n = {n}");
            }
        }
    }
}

/// A message shorter than a byte still forwards an empty prefix first.
#[test]
fn test_sub_byte_message() {
    let mut state = HashState::<RecordingSponge>::new(224).unwrap();
    state.update(BitSequence::new(&[0b1110_0000], 3).unwrap()).unwrap();
    assert_eq!(
        state.sponge().absorbed,
        vec![(vec![], 0), (vec![0b111], 3)]
    );
    assert_eq!(state.absorbed_bits(), 3);
}

#[test]
fn test_finalize_requests_fixed_length() {
    for bits in [224, 256, 384, 512] {
        let mut state = HashState::<RecordingSponge>::new(bits).unwrap();
        state.update_bytes(b"some message").unwrap();
        let digest = state.finalize().unwrap();
        assert_eq!(digest.len(), bits / 8);
        assert_eq!(state.sponge().squeezed, vec![bits]);
        assert_eq!(state.status(), Status::Finalized);
    }
}

#[test]
fn test_single_use() {
    let mut state = HashState::<KeccakSponge>::new(256).unwrap();
    state.update_bytes(b"abc").unwrap();
    state.finalize().unwrap();
    assert!(matches!(
        state.update_bytes(b"d"),
        Err(HashError::InvalidState(_))
    ));
    assert!(matches!(state.finalize(), Err(HashError::InvalidState(_))));
    assert!(matches!(state.squeeze(8), Err(HashError::InvalidState(_))));
}

/// A failing prefix absorb is returned as is, and the trailing bits are never absorbed.
#[test]
fn test_prefix_failure() {
    let mut state = HashState::<BrokenSponge<0>>::new(256).unwrap();
    let result = state.update(BitSequence::new(&[0xff, 0xf0], 12).unwrap());
    assert_eq!(
        result,
        Err(HashError::SpongePrimitiveFailure("buffer overrun".into()))
    );
    assert_eq!(state.sponge().absorb_calls, 1);
    assert_eq!(state.status(), Status::Failed);
    assert_eq!(state.absorbed_bits(), 0);

    assert!(matches!(
        state.update(BitSequence::empty()),
        Err(HashError::InvalidState(_))
    ));
    assert!(matches!(state.finalize(), Err(HashError::InvalidState(_))));
    assert_eq!(state.sponge().absorb_calls, 1);
}

#[test]
fn test_trailing_bits_failure() {
    let mut state = HashState::<BrokenSponge<1>>::new(512).unwrap();
    let result = state.update(BitSequence::new(&[0xff, 0xf0], 12).unwrap());
    assert!(matches!(result, Err(HashError::SpongePrimitiveFailure(_))));
    assert_eq!(state.sponge().absorb_calls, 2);
    assert_eq!(state.status(), Status::Failed);
}

/// No partial digest comes out of a failed squeeze.
#[test]
fn test_squeeze_failure() {
    let mut state = HashState::<BrokenSponge<{ usize::MAX }>>::new(384).unwrap();
    state.update_bytes(b"abc").unwrap();
    assert_eq!(
        state.finalize(),
        Err(HashError::SpongePrimitiveFailure("squeeze refused".into()))
    );
    assert_eq!(state.status(), Status::Failed);
    assert!(hash_with::<BrokenSponge<{ usize::MAX }>>(256, BitSequence::empty()).is_err());
}

#[test]
fn test_empty_message_vectors() {
    let vectors = [
        (224, "f71837502ba8e10837bdd8d365adb85591895602fc552b48b7390abd"),
        (256, "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"),
        (384, "2c23146a63a29acf99e73b88f8c24eaa7dc60aa771780ccc006afbfa8fe2479b2dd2b21362337441ac12b515911957ff"),
        (512, "0eab42de4c3ceb9235fc91acffe746b29c29a8c366b7c60e4e67c466f36a4304c00fa9caf9d87976ba469bcbe06713b435f091ef2769fb160cdab33d3670680e"),
    ];
    for (bits, expected) in vectors {
        assert_eq!(hex::encode(hash(bits, BitSequence::empty()).unwrap()), expected);
    }
}

#[test]
fn test_message_vectors() {
    assert_eq!(
        hex::encode(keccak(256, b"abc", 24)),
        "4e03657aea45a94fc7d47ba826c8d667c0d1e6e33a64a036ec44f58fa12d6c45"
    );
    assert_eq!(
        hex::encode(keccak(256, b"The quick brown fox jumps over the lazy dog", 344)),
        "4d741b6f1eb29cb2a9b9911c82f56fa8d73b04959d3d9d222895df6c0b28aa15"
    );
}

#[test]
fn test_deterministic() {
    let first = hash(256, BitSequence::from(b"yellow submarine")).unwrap();
    let second = hash(256, BitSequence::from(b"yellow submarine")).unwrap();
    assert_eq!(first, second);

    let other = hash(256, BitSequence::from(b"yellow submarinf")).unwrap();
    assert_ne!(first, other);
    // a different length of the same bytes is a different message
    let shorter = keccak(256, b"yellow submarine", 127);
    assert_ne!(first, shorter);
}

/// Trailing bits reach the Keccak sponge in its own bit order.
#[test]
fn test_trailing_bits_end_to_end() {
    for n in 1..8 {
        let last = 0b1011_0101u8;
        let digest = keccak(256, &[0x61, last], 8 + n);

        let mut sponge = KeccakSponge::initialize(1088, 512).unwrap();
        sponge.absorb(&[0x61, last >> (8 - n)], 8 + n).unwrap();
        let mut expected = [0u8; 32];
        sponge.squeeze(&mut expected, 256).unwrap();
        assert_eq!(digest, expected, "n = {n}");
    }
}

/// The bits below a trailing partial byte are ignored.
#[test]
fn test_ignored_low_bits() {
    for n in 1..8 {
        let clean = 0xffu8 << (8 - n);
        assert_eq!(keccak(512, &[clean], n), keccak(512, &[clean | !clean], n));
    }
}

#[test]
fn test_twelve_bits_then_nothing() {
    let bits = BitSequence::new(&[0x53, 0x58], 12).unwrap();

    let mut split = HashState::<KeccakSponge>::new(384).unwrap();
    split.update(bits).unwrap();
    split.update(BitSequence::empty()).unwrap();

    let mut whole = HashState::<KeccakSponge>::new(384).unwrap();
    whole.update(bits).unwrap();

    assert_eq!(split.finalize().unwrap(), whole.finalize().unwrap());
    assert_eq!(hash(384, bits).unwrap().len(), 48);
}

/// Splitting a message at byte boundaries, with empty chunks in between,
/// never changes the digest.
#[test]
fn test_chunking_invariance() {
    let mut rng = StdRng::seed_from_u64(0x6b656363616b);
    for _ in 0..64 {
        let bit_len = rng.gen_range(0..3000);
        let mut bytes = vec![0u8; bit_len / 8 + 1];
        rng.fill_bytes(&mut bytes);
        let message = BitSequence::new(&bytes, bit_len).unwrap();
        let output_bits = [224, 256, 384, 512][rng.gen_range(0..4)];
        let expected = hash(output_bits, message).unwrap();

        let mut state = HashState::<KeccakSponge>::new(output_bits).unwrap();
        let mut start = 0;
        let whole_bytes = bit_len / 8;
        while start < whole_bytes {
            let end = usize::min(whole_bytes, start + rng.gen_range(0..200));
            state.update_bytes(&bytes[start..end]).unwrap();
            start = end;
        }
        let tail = BitSequence::new(&bytes[whole_bytes..], bit_len % 8).unwrap();
        state.update(tail).unwrap();
        state.update(BitSequence::empty()).unwrap();
        assert_eq!(state.absorbed_bits(), bit_len as u64);
        assert_eq!(state.finalize().unwrap(), expected, "{bit_len} bits");
    }
}

/// Data after a partial byte is refused by the sponge, and the state is lost.
#[test]
fn test_data_after_partial_byte() {
    let mut state = HashState::<KeccakSponge>::new(256).unwrap();
    state.update(BitSequence::new(&[0xf0], 4).unwrap()).unwrap();
    assert!(matches!(
        state.update_bytes(b"more"),
        Err(HashError::SpongePrimitiveFailure(_))
    ));
    assert_eq!(state.status(), Status::Failed);
}

/// With output length 0 there is no digest to finalize, only a stream to squeeze.
#[test]
fn test_arbitrary_length_output() {
    let mut state = HashState::<KeccakSponge>::new(0).unwrap();
    state.update_bytes(b"yellow submarine").unwrap();
    assert!(matches!(state.finalize(), Err(HashError::InvalidState(_))));
    assert_eq!(state.status(), Status::Absorbing);

    let first = state.squeeze(1024).unwrap();
    let second = state.squeeze(1024).unwrap();
    assert_eq!(state.status(), Status::Squeezing);
    assert!(matches!(
        state.update_bytes(b"late"),
        Err(HashError::InvalidState(_))
    ));

    let mut control = HashState::<KeccakSponge>::new(0).unwrap();
    control.update_bytes(b"yellow submarine").unwrap();
    let both = control.squeeze(2048).unwrap();
    assert_eq!(both[..128], first[..]);
    assert_eq!(both[128..], second[..]);

    assert!(matches!(
        state.squeeze(12),
        Err(HashError::SpongePrimitiveFailure(_))
    ));
    assert_eq!(state.status(), Status::Failed);
}

#[test]
fn test_squeeze_needs_arbitrary_length() {
    let mut state = HashState::<KeccakSponge>::new(256).unwrap();
    assert!(matches!(state.squeeze(256), Err(HashError::InvalidState(_))));
    assert_eq!(state.status(), Status::Absorbing);
    assert_eq!(state.finalize().unwrap(), hash(256, BitSequence::empty()).unwrap());
}

#[test]
fn test_state_debug_hides_sponge() {
    let state = HashState::<KeccakSponge>::new(256).unwrap();
    assert_eq!(
        format!("{:?}", state),
        "HashState { fixed_output_length: 256, status: Absorbing, absorbed_bits: 0 }"
    );
}

#[test]
fn test_states_are_send() {
    fn assert_send<T: Send>() {}
    assert_send::<HashState<KeccakSponge>>();
}
