//! # rxbind core
//!
//! Derives the 6-byte receiver UID used to pair an RC transmitter and
//! receiver from a human-chosen bind phrase.
//!
//! ## Derivation paths
//!
//! - **Numeric**: `"1,2,3,4"` lists the UID bytes directly (4 to 6 bytes,
//!   right-aligned with leading zeros)
//! - **Hashed**: the first 6 bytes of
//!   `MD5("-DMY_BINDING_PHRASE=\"" || phrase || "\"")`, matching the UID that
//!   transmitter build tooling compiles into firmware for the same phrase
//!
//! ```text
//! phrase ──► parse_numeric_uid ──────────────────────────┐
//!    │                                                   ├─► Uid ─► BindDispatcher ─► PhraseBinder
//!    └─────► wrap_phrase ─► md5 ─► digest[0..6] ─────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use rxbind_core::{UidMode, derive_uid};
//!
//! let numeric = derive_uid("10,20,30,40", UidMode::Auto).unwrap();
//! assert_eq!(numeric.as_bytes(), &[0, 0, 10, 20, 30, 40]);
//!
//! let hashed = derive_uid("test", UidMode::Auto).unwrap();
//! assert_eq!(hashed.to_string(), "79,4,253,130,33,85");
//! ```
//!
//! ## no_std Support
//!
//! The crate builds for `no_std` targets with `alloc`:
//!
//! ```toml
//! [dependencies]
//! rxbind-core = { version = "0.1", default-features = false }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

mod bind;
mod error;
mod md5;
mod params;
mod phrase;
mod uid;

#[cfg(feature = "std")]
mod ffi;

pub use bind::{
    BindDispatcher, BindRegistry, BindTarget, PhraseBinder, ProviderConfig, RxProvider,
    SerialRxProvider,
};
pub use error::{Error, Result};
pub use md5::{md5, md5_hex};
pub use params::*;
pub use phrase::{is_numeric_phrase, parse_numeric_uid};
pub use uid::{
    Uid, UidMode, derive_hashed_uid, derive_hashed_uid_bytes, derive_uid, wrap_phrase,
    wrap_phrase_bytes,
};
