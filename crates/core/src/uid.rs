//! Receiver UID and the two derivation paths
//!
//! - **Numeric**: the phrase lists the UID bytes directly (see [`crate::phrase`])
//! - **Hashed**: `MD5("-DMY_BINDING_PHRASE=\"" || phrase || "\"")[0..6]`
//!
//! The hashed path reproduces the UID transmitter-side build tooling bakes
//! into firmware, so both ends of a link agree on it for the same phrase.

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use core::fmt;

use tracing::debug;

use crate::error::{Error, Result};
use crate::md5::{md5, reserve_buffer};
use crate::params::{BINDING_PHRASE_PREFIX, BINDING_PHRASE_SUFFIX, MAX_PHRASE_LEN, UID_LEN, WRAPPER_LEN};
use crate::phrase::parse_numeric_uid;

/// A fully derived 6-byte receiver UID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Uid([u8; UID_LEN]);

impl Uid {
    pub fn as_bytes(&self) -> &[u8; UID_LEN] {
        &self.0
    }

    pub fn into_bytes(self) -> [u8; UID_LEN] {
        self.0
    }
}

impl From<[u8; UID_LEN]> for Uid {
    fn from(bytes: [u8; UID_LEN]) -> Self {
        Self(bytes)
    }
}

impl From<Uid> for [u8; UID_LEN] {
    fn from(uid: Uid) -> Self {
        uid.0
    }
}

impl AsRef<[u8]> for Uid {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Comma-separated decimal, the same form the numeric path accepts
impl fmt::Display for Uid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, byte) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{byte}")?;
        }
        Ok(())
    }
}

impl fmt::LowerHex for Uid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

/// How a phrase is turned into a UID
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum UidMode {
    /// Comma-separated byte list only
    Numeric,
    /// MD5 of the wrapped phrase only
    Hashed,
    /// Numeric when the phrase parses as one, hashed otherwise
    #[default]
    Auto,
}

impl UidMode {
    pub const ALL: [UidMode; 3] = [UidMode::Numeric, UidMode::Hashed, UidMode::Auto];

    pub fn name(self) -> &'static str {
        match self {
            UidMode::Numeric => "numeric",
            UidMode::Hashed => "hashed",
            UidMode::Auto => "auto",
        }
    }

    /// Case-insensitive lookup by [`UidMode::name`]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for UidMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Build the exact byte string the hashed path digests
///
/// Rejects phrases longer than [`MAX_PHRASE_LEN`] bytes instead of
/// truncating them.
pub fn wrap_phrase(phrase: &str) -> Result<Vec<u8>> {
    wrap_phrase_bytes(phrase.as_bytes())
}

/// [`wrap_phrase`] over raw bytes, for phrases that are not UTF-8
pub fn wrap_phrase_bytes(phrase: &[u8]) -> Result<Vec<u8>> {
    if phrase.len() > MAX_PHRASE_LEN {
        return Err(Error::PhraseTooLong {
            len: phrase.len(),
            max: MAX_PHRASE_LEN,
        });
    }

    let mut wrapped = reserve_buffer(WRAPPER_LEN + phrase.len())?;
    wrapped.extend_from_slice(BINDING_PHRASE_PREFIX.as_bytes());
    wrapped.extend_from_slice(phrase);
    wrapped.extend_from_slice(BINDING_PHRASE_SUFFIX.as_bytes());
    Ok(wrapped)
}

/// Derive a UID from the MD5 digest of the wrapped phrase
///
/// # Example
///
/// ```rust
/// use rxbind_core::derive_hashed_uid;
///
/// let uid = derive_hashed_uid("test").unwrap();
/// assert_eq!(uid.as_bytes(), &[0x4f, 0x04, 0xfd, 0x82, 0x21, 0x55]);
/// ```
pub fn derive_hashed_uid(phrase: &str) -> Result<Uid> {
    derive_hashed_uid_bytes(phrase.as_bytes())
}

/// [`derive_hashed_uid`] over raw bytes
///
/// The digest never looks at the encoding, so a Latin-1 phrase hashes to the
/// same UID the transmitter tooling computes from its C string.
pub fn derive_hashed_uid_bytes(phrase: &[u8]) -> Result<Uid> {
    let wrapped = wrap_phrase_bytes(phrase)?;
    let digest = md5(&wrapped)?;

    let mut uid = [0u8; UID_LEN];
    uid.copy_from_slice(&digest[..UID_LEN]);
    Ok(Uid(uid))
}

/// Derive a UID with the given mode
///
/// Numeric failures propagate unchanged in [`UidMode::Numeric`]; in
/// [`UidMode::Auto`] they select the hashed path instead.
pub fn derive_uid(phrase: &str, mode: UidMode) -> Result<Uid> {
    match mode {
        UidMode::Numeric => parse_numeric_uid(phrase),
        UidMode::Hashed => derive_hashed_uid(phrase),
        UidMode::Auto => match parse_numeric_uid(phrase) {
            Ok(uid) => {
                debug!(%uid, "phrase is a numeric uid");
                Ok(uid)
            }
            Err(err) => {
                debug!(%err, "phrase is not a numeric uid, hashing");
                derive_hashed_uid(phrase)
            }
        },
    }
}
