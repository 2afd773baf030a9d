//! C FFI bindings for firmware and mobile configurators
//!
//! Every entry point writes exactly [`UID_LEN`] bytes to `uid_out` on success
//! and leaves it untouched on failure. The hashed path digests the raw C
//! string bytes; only the numeric path needs them to be UTF-8.

use core::ffi::{CStr, c_char};
use core::slice;

use crate::params::UID_LEN;
use crate::{Uid, UidMode, derive_hashed_uid_bytes, derive_uid, parse_numeric_uid};

/// Mode codes accepted by [`rx_uid_derive`]
pub const RX_UID_MODE_NUMERIC: u8 = 0;
pub const RX_UID_MODE_HASHED: u8 = 1;
pub const RX_UID_MODE_AUTO: u8 = 2;

fn mode_from_code(code: u8) -> Option<UidMode> {
    match code {
        RX_UID_MODE_NUMERIC => Some(UidMode::Numeric),
        RX_UID_MODE_HASHED => Some(UidMode::Hashed),
        RX_UID_MODE_AUTO => Some(UidMode::Auto),
        _ => None,
    }
}

/// Borrow the bytes of a NUL-terminated phrase, or `None` for null
///
/// # Safety
/// `phrase` must be null or point to a NUL-terminated string that outlives
/// the returned borrow.
unsafe fn phrase_bytes<'a>(phrase: *const c_char) -> Option<&'a [u8]> {
    if phrase.is_null() {
        return None;
    }
    Some(unsafe { CStr::from_ptr(phrase) }.to_bytes())
}

/// Copy a derived UID out, reporting whether anything was written
///
/// # Safety
/// `uid_out` must point to [`UID_LEN`] writable bytes.
unsafe fn write_uid(derived: crate::Result<Uid>, uid_out: *mut u8) -> bool {
    match derived {
        Ok(uid) => {
            let out = unsafe { slice::from_raw_parts_mut(uid_out, UID_LEN) };
            out.copy_from_slice(uid.as_bytes());
            true
        }
        Err(_) => false,
    }
}

/// Parse a numeric phrase ("1,2,3,4") into a UID
///
/// Returns false on null pointers or an invalid phrase, including one that
/// is not UTF-8.
///
/// # Safety
/// - `phrase` must be null or a NUL-terminated string
/// - `uid_out` must be null or point to 6 writable bytes
#[unsafe(no_mangle)]
pub unsafe extern "C" fn rx_uid_from_phrase(phrase: *const c_char, uid_out: *mut u8) -> bool {
    if uid_out.is_null() {
        return false;
    }
    let Some(phrase) = (unsafe { phrase_bytes(phrase) }) else {
        return false;
    };
    match core::str::from_utf8(phrase) {
        Ok(phrase) => unsafe { write_uid(parse_numeric_uid(phrase), uid_out) },
        Err(_) => false,
    }
}

/// Derive a UID from the MD5 of the wrapped phrase
///
/// Any byte sequence up to MAX_PHRASE_LEN bytes is accepted.
///
/// # Safety
/// - `phrase` must be null or a NUL-terminated string
/// - `uid_out` must be null or point to 6 writable bytes
#[unsafe(no_mangle)]
pub unsafe extern "C" fn rx_md5_uid(phrase: *const c_char, uid_out: *mut u8) -> bool {
    if uid_out.is_null() {
        return false;
    }
    match unsafe { phrase_bytes(phrase) } {
        Some(phrase) => unsafe { write_uid(derive_hashed_uid_bytes(phrase), uid_out) },
        None => false,
    }
}

/// Derive a UID with an explicit mode (RX_UID_MODE_*)
///
/// A phrase that is not UTF-8 can only be hashed: it fails in numeric mode
/// and goes straight to the hashed path in auto mode.
///
/// # Safety
/// - `phrase` must be null or a NUL-terminated string
/// - `uid_out` must be null or point to 6 writable bytes
#[unsafe(no_mangle)]
pub unsafe extern "C" fn rx_uid_derive(phrase: *const c_char, mode: u8, uid_out: *mut u8) -> bool {
    if uid_out.is_null() {
        return false;
    }
    let Some(mode) = mode_from_code(mode) else {
        return false;
    };
    let Some(phrase) = (unsafe { phrase_bytes(phrase) }) else {
        return false;
    };

    let derived = match (core::str::from_utf8(phrase), mode) {
        (Ok(text), _) => derive_uid(text, mode),
        (Err(_), UidMode::Numeric) => return false,
        (Err(_), _) => derive_hashed_uid_bytes(phrase),
    };
    unsafe { write_uid(derived, uid_out) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::CString;

    #[test]
    fn test_numeric_entry_point() {
        let phrase = CString::new("1,2,3,4").unwrap();
        let mut uid = [0xAAu8; UID_LEN];
        assert!(unsafe { rx_uid_from_phrase(phrase.as_ptr(), uid.as_mut_ptr()) });
        assert_eq!(uid, [0, 0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_failure_leaves_output_untouched() {
        let phrase = CString::new("1,2,3").unwrap();
        let mut uid = [0xAAu8; UID_LEN];
        assert!(!unsafe { rx_uid_from_phrase(phrase.as_ptr(), uid.as_mut_ptr()) });
        assert_eq!(uid, [0xAA; UID_LEN]);
    }

    #[test]
    fn test_md5_entry_point() {
        let phrase = CString::new("test").unwrap();
        let mut uid = [0u8; UID_LEN];
        assert!(unsafe { rx_md5_uid(phrase.as_ptr(), uid.as_mut_ptr()) });
        assert_eq!(uid, [0x4f, 0x04, 0xfd, 0x82, 0x21, 0x55]);
    }

    #[test]
    fn test_null_pointers() {
        let phrase = CString::new("test").unwrap();
        let mut uid = [0u8; UID_LEN];
        unsafe {
            assert!(!rx_md5_uid(core::ptr::null(), uid.as_mut_ptr()));
            assert!(!rx_md5_uid(phrase.as_ptr(), core::ptr::null_mut()));
            assert!(!rx_uid_from_phrase(core::ptr::null(), uid.as_mut_ptr()));
            assert!(!rx_uid_derive(core::ptr::null(), RX_UID_MODE_AUTO, uid.as_mut_ptr()));
        }
    }

    #[test]
    fn test_derive_modes() {
        let phrase = CString::new("10,20,30,40").unwrap();
        let mut uid = [0u8; UID_LEN];

        unsafe {
            assert!(rx_uid_derive(phrase.as_ptr(), RX_UID_MODE_AUTO, uid.as_mut_ptr()));
            assert_eq!(uid, [0, 0, 10, 20, 30, 40]);

            assert!(rx_uid_derive(phrase.as_ptr(), RX_UID_MODE_HASHED, uid.as_mut_ptr()));
            assert_ne!(uid, [0, 0, 10, 20, 30, 40]);

            assert!(!rx_uid_derive(phrase.as_ptr(), 7, uid.as_mut_ptr()));
        }
    }

    #[test]
    fn test_latin1_phrase_is_hashed() {
        // "café" in Latin-1
        let phrase = CString::new(b"caf\xe9".to_vec()).unwrap();
        let expected = [138, 190, 114, 117, 5, 112];

        let mut uid = [0u8; UID_LEN];
        assert!(unsafe { rx_md5_uid(phrase.as_ptr(), uid.as_mut_ptr()) });
        assert_eq!(uid, expected);

        let mut uid = [0u8; UID_LEN];
        assert!(unsafe { rx_uid_derive(phrase.as_ptr(), RX_UID_MODE_AUTO, uid.as_mut_ptr()) });
        assert_eq!(uid, expected);
    }

    #[test]
    fn test_non_utf8_phrase_is_not_numeric() {
        let phrase = CString::new(vec![0xffu8, 0xfe]).unwrap();
        let mut uid = [0xAAu8; UID_LEN];

        unsafe {
            assert!(!rx_uid_from_phrase(phrase.as_ptr(), uid.as_mut_ptr()));
            assert!(!rx_uid_derive(phrase.as_ptr(), RX_UID_MODE_NUMERIC, uid.as_mut_ptr()));
        }
        assert_eq!(uid, [0xAA; UID_LEN]);

        assert!(unsafe { rx_md5_uid(phrase.as_ptr(), uid.as_mut_ptr()) });
        assert_eq!(uid, [75, 118, 129, 183, 210, 140]);
    }
}
