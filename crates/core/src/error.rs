//! Failure kinds for UID derivation and bind dispatch

use thiserror::Error;

use crate::bind::BindTarget;

/// Everything that can go wrong between a phrase and a dispatched bind
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A numeric token contained a non-digit or was outside `0..=255`
    #[error("invalid byte value in token {index}")]
    InvalidToken { index: usize },

    /// The numeric phrase had fewer than 4 or more than 6 tokens
    #[error("expected 4 to 6 comma-separated bytes, found {count}")]
    InvalidTokenCount { count: usize },

    #[error("bind phrase is {len} bytes, maximum is {max}")]
    PhraseTooLong { len: usize, max: usize },

    #[error("could not allocate {requested} bytes for the hash buffer")]
    AllocationFailure { requested: usize },

    #[error("bind phrase is empty")]
    EmptyPhrase,

    #[error("binding is not supported for {target}")]
    UnsupportedProvider { target: BindTarget },
}

pub type Result<T> = core::result::Result<T, Error>;
