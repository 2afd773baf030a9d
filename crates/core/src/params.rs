//! Bind-phrase protocol parameters
//!
//! These values are shared with the transmitter-side tooling. Changing any of
//! them changes the UID a given phrase produces.

/// UID length in bytes
pub const UID_LEN: usize = 6;

/// Fewest comma-separated bytes accepted by the numeric path
pub const MIN_NUMERIC_TOKENS: usize = 4;

/// Most comma-separated bytes accepted by the numeric path
pub const MAX_NUMERIC_TOKENS: usize = UID_LEN;

/// Separator between bytes in a numeric phrase
pub const TOKEN_SEPARATOR: char = ',';

/// Text placed before the phrase when hashing
pub const BINDING_PHRASE_PREFIX: &str = "-DMY_BINDING_PHRASE=\"";

/// Text placed after the phrase when hashing
pub const BINDING_PHRASE_SUFFIX: &str = "\"";

/// Total wrapper overhead (21 + 1 bytes)
pub const WRAPPER_LEN: usize = BINDING_PHRASE_PREFIX.len() + BINDING_PHRASE_SUFFIX.len();

/// Size of the firmware buffer the wrapped phrase historically lived in,
/// including its NUL terminator
pub const LEGACY_WRAP_BUFFER: usize = 256;

/// Longest phrase (in bytes) accepted by the hashed path
///
/// Every phrase that fit the legacy buffer intact is still accepted; anything
/// longer used to be truncated and is now rejected.
pub const MAX_PHRASE_LEN: usize = LEGACY_WRAP_BUFFER - 1 - WRAPPER_LEN;

/// MD5 digest size
pub const MD5_DIGEST_LEN: usize = 16;

/// MD5 block size in bytes
pub const MD5_BLOCK_SIZE: usize = 64;

/// Bytes reserved at the end of the last block for the bit length
pub const MD5_LENGTH_FIELD: usize = 8;
