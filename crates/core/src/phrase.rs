//! Numeric bind phrases
//!
//! A numeric phrase spells the UID out directly as 4 to 6 comma-separated
//! decimal bytes, e.g. `"10, 20, 30, 40"`. Shorter lists are right-aligned
//! into the 6-byte UID with leading zero bytes.

use crate::error::{Error, Result};
use crate::params::{MAX_NUMERIC_TOKENS, MIN_NUMERIC_TOKENS, TOKEN_SEPARATOR, UID_LEN};
use crate::uid::Uid;

/// Splits a phrase on the separator without copying or mutating it
///
/// Yields `(index, token)` pairs. Empty tokens are yielded as-is, so `"1,,2"`
/// produces three tokens.
struct Tokens<'a> {
    phrase: &'a str,
    pos: usize,
    index: usize,
    finished: bool,
}

impl<'a> Tokens<'a> {
    fn new(phrase: &'a str) -> Self {
        Self {
            phrase,
            pos: 0,
            index: 0,
            finished: false,
        }
    }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = (usize, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let rest = &self.phrase[self.pos..];
        let token = match rest.find(TOKEN_SEPARATOR) {
            Some(end) => {
                self.pos += end + TOKEN_SEPARATOR.len_utf8();
                &rest[..end]
            }
            None => {
                self.finished = true;
                rest
            }
        };

        let index = self.index;
        self.index += 1;
        Some((index, token))
    }
}

/// Decode one token: leading spaces, then one or more ASCII digits, 0..=255
#[inline]
fn parse_token(token: &str) -> Option<u8> {
    let digits = token.trim_start_matches(' ');
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    // Overlong digit runs fail here as out of range
    digits.parse::<u8>().ok()
}

/// Parse a numeric phrase into a UID
///
/// Fails with [`Error::InvalidToken`] on the first token that is not a plain
/// decimal byte, and with [`Error::InvalidTokenCount`] when the phrase does
/// not hold 4 to 6 bytes. A seventh token fails the count check without
/// being inspected.
///
/// # Example
///
/// ```rust
/// use rxbind_core::parse_numeric_uid;
///
/// let uid = parse_numeric_uid("1,2,3,4").unwrap();
/// assert_eq!(uid.as_bytes(), &[0, 0, 1, 2, 3, 4]);
/// ```
pub fn parse_numeric_uid(phrase: &str) -> Result<Uid> {
    let mut collected = [0u8; MAX_NUMERIC_TOKENS];
    let mut count = 0;

    for (index, token) in Tokens::new(phrase) {
        if count == MAX_NUMERIC_TOKENS {
            return Err(Error::InvalidTokenCount { count: index + 1 });
        }
        collected[count] = parse_token(token).ok_or(Error::InvalidToken { index })?;
        count += 1;
    }

    if count < MIN_NUMERIC_TOKENS {
        return Err(Error::InvalidTokenCount { count });
    }

    let mut uid = [0u8; UID_LEN];
    uid[UID_LEN - count..].copy_from_slice(&collected[..count]);
    Ok(Uid::from(uid))
}

/// Whether `phrase` would be accepted by [`parse_numeric_uid`]
pub fn is_numeric_phrase(phrase: &str) -> bool {
    parse_numeric_uid(phrase).is_ok()
}
