//! MD5 message digest (RFC 1321)
//!
//! Used only to turn a bind phrase into a deterministic identifier, never for
//! security. The output must match the transmitter-side tooling bit for bit,
//! including one quirk of its padding: the 64-bit length field only carries
//! the low 32 bits of the bit length. For messages under 512 MiB that is
//! identical to standard MD5.

#[cfg(not(feature = "std"))]
use alloc::string::String;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use crate::error::{Error, Result};
use crate::params::{MD5_BLOCK_SIZE, MD5_DIGEST_LEN, MD5_LENGTH_FIELD};

/// Per-round additive constants, floor(abs(sin(i + 1)) * 2^32)
const K: [u32; 64] = [
    0xd76aa478, 0xe8c7b756, 0x242070db, 0xc1bdceee, 0xf57c0faf, 0x4787c62a, 0xa8304613, 0xfd469501,
    0x698098d8, 0x8b44f7af, 0xffff5bb1, 0x895cd7be, 0x6b901122, 0xfd987193, 0xa679438e, 0x49b40821,
    0xf61e2562, 0xc040b340, 0x265e5a51, 0xe9b6c7aa, 0xd62f105d, 0x02441453, 0xd8a1e681, 0xe7d3fbc8,
    0x21e1cde6, 0xc33707d6, 0xf4d50d87, 0x455a14ed, 0xa9e3e905, 0xfcefa3f8, 0x676f02d9, 0x8d2a4c8a,
    0xfffa3942, 0x8771f681, 0x6d9d6122, 0xfde5380c, 0xa4beea44, 0x4bdecfa9, 0xf6bb4b60, 0xbebfbc70,
    0x289b7ec6, 0xeaa127fa, 0xd4ef3085, 0x04881d05, 0xd9d4d039, 0xe6db99e5, 0x1fa27cf8, 0xc4ac5665,
    0xf4292244, 0x432aff97, 0xab9423a7, 0xfc93a039, 0x655b59c3, 0x8f0ccc92, 0xffeff47d, 0x85845dd1,
    0x6fa87e4f, 0xfe2ce6e0, 0xa3014314, 0x4e0811a1, 0xf7537e82, 0xbd3af235, 0x2ad7d2bb, 0xeb86d391,
];

/// Per-round left-rotation amounts
const S: [u32; 64] = [
    7, 12, 17, 22, 7, 12, 17, 22, 7, 12, 17, 22, 7, 12, 17, 22, //
    5, 9, 14, 20, 5, 9, 14, 20, 5, 9, 14, 20, 5, 9, 14, 20, //
    4, 11, 16, 23, 4, 11, 16, 23, 4, 11, 16, 23, 4, 11, 16, 23, //
    6, 10, 15, 21, 6, 10, 15, 21, 6, 10, 15, 21, 6, 10, 15, 21,
];

/// Initial chaining words A, B, C, D
const INIT: [u32; 4] = [0x67452301, 0xefcdab89, 0x98badcfe, 0x10325476];

/// Working state for a single digest computation
///
/// Lives on the stack of [`md5`] and is dropped when it returns.
struct Md5State {
    words: [u32; 4],
}

impl Md5State {
    fn new() -> Self {
        Self { words: INIT }
    }

    /// Run the 64 rounds over one 64-byte block and fold into the state
    fn compress(&mut self, block: &[u8]) {
        let mut m = [0u32; 16];
        for (word, bytes) in m.iter_mut().zip(block.chunks_exact(4)) {
            *word = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
        }

        let [mut a, mut b, mut c, mut d] = self.words;

        for i in 0..64 {
            let (f, g) = match i {
                0..16 => ((b & c) | (!b & d), i),
                16..32 => ((d & b) | (!d & c), (5 * i + 1) % 16),
                32..48 => (b ^ c ^ d, (3 * i + 5) % 16),
                _ => (c ^ (b | !d), (7 * i) % 16),
            };

            let sum = a.wrapping_add(f).wrapping_add(K[i]).wrapping_add(m[g]);
            a = d;
            d = c;
            c = b;
            b = b.wrapping_add(sum.rotate_left(S[i]));
        }

        self.words[0] = self.words[0].wrapping_add(a);
        self.words[1] = self.words[1].wrapping_add(b);
        self.words[2] = self.words[2].wrapping_add(c);
        self.words[3] = self.words[3].wrapping_add(d);
    }

    /// Serialize the chaining words little-endian
    fn digest(&self) -> [u8; MD5_DIGEST_LEN] {
        let mut out = [0u8; MD5_DIGEST_LEN];
        for (chunk, word) in out.chunks_exact_mut(4).zip(self.words.iter()) {
            chunk.copy_from_slice(&word.to_le_bytes());
        }
        out
    }
}

/// Length of the padded message for an input of `len` bytes
///
/// Always a multiple of the block size with room for the 0x80 marker and the
/// 8-byte length field. `None` when that length does not fit in `usize`.
#[inline(always)]
pub(crate) fn padded_len(len: usize) -> Option<usize> {
    let blocks = len.checked_add(MD5_LENGTH_FIELD)? / MD5_BLOCK_SIZE + 1;
    blocks.checked_mul(MD5_BLOCK_SIZE)
}

/// Empty buffer with room for exactly `len` bytes, reserved fallibly
pub(crate) fn reserve_buffer(len: usize) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    buffer
        .try_reserve_exact(len)
        .map_err(|_| Error::AllocationFailure { requested: len })?;
    Ok(buffer)
}

/// Build the padded message in a buffer sized once, up front
fn pad_message(input: &[u8]) -> Result<Vec<u8>> {
    let total = padded_len(input.len()).ok_or(Error::AllocationFailure {
        requested: usize::MAX,
    })?;

    let mut message = reserve_buffer(total)?;

    message.extend_from_slice(input);
    message.push(0x80);
    message.resize(total - MD5_LENGTH_FIELD, 0);

    // Low 32 bits of the bit length only, upper half stays zero
    let bit_len = (input.len() as u32).wrapping_mul(8);
    message.extend_from_slice(&u64::from(bit_len).to_le_bytes());

    Ok(message)
}

/// Compute the MD5 digest of `input`
///
/// The only failure is running out of memory for the padded buffer; no
/// digest bytes are produced in that case.
///
/// # Example
///
/// ```rust
/// use rxbind_core::md5;
///
/// let digest = md5(b"abc").unwrap();
/// assert_eq!(digest[..4], [0x90, 0x01, 0x50, 0x98]);
/// ```
pub fn md5(input: &[u8]) -> Result<[u8; MD5_DIGEST_LEN]> {
    let message = pad_message(input)?;
    tracing::trace!(
        input_len = input.len(),
        blocks = message.len() / MD5_BLOCK_SIZE,
        "md5"
    );

    let mut state = Md5State::new();
    for block in message.chunks_exact(MD5_BLOCK_SIZE) {
        state.compress(block);
    }

    Ok(state.digest())
}

/// Lowercase hex rendering of [`md5`]
pub fn md5_hex(input: &[u8]) -> Result<String> {
    md5(input).map(hex::encode)
}
