// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Error types.

use core::fmt;

/// Rejection raised by a digest primitive for malformed inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DigestFault {
    /// Context tag is not exactly `CONTEXT_LEN` bytes.
    ContextLength { expected: usize, found: usize },
    /// The backend itself refused the call.
    Backend,
    /// Key is not exactly `KEY_LEN` bytes.
    KeyLength { expected: usize, found: usize },
}

impl fmt::Display for DigestFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DigestFault::ContextLength { expected, found } => {
                write!(f, "context length: expected {expected}, found {found}")
            }
            DigestFault::Backend => write!(f, "digest backend rejected the input"),
            DigestFault::KeyLength { expected, found } => {
                write!(f, "key length: expected {expected}, found {found}")
            }
        }
    }
}

/// Failure of a hash chain computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainError {
    /// The seed was empty.
    EmptySeed,
    /// The digest primitive rejected its input.
    Digest(DigestFault),
}

impl fmt::Display for ChainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChainError::EmptySeed => write!(f, "seed must not be empty"),
            ChainError::Digest(fault) => write!(f, "digest fault: {fault}"),
        }
    }
}

impl From<DigestFault> for ChainError {
    fn from(fault: DigestFault) -> Self {
        ChainError::Digest(fault)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for DigestFault {}

#[cfg(feature = "std")]
impl std::error::Error for ChainError {}

pub type Result<T> = core::result::Result<T, ChainError>;
