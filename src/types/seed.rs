// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Trial seeds and the session context tag.

use crate::config::{CONTEXT_LEN, DEFAULT_CONTEXT, SEED_LEN};
use crate::error::DigestFault;
use core::fmt;

/// Random per-trial input. Immutable once generated.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct Seed(pub [u8; SEED_LEN]);

impl Seed {
    pub const LEN: usize = SEED_LEN;

    pub fn as_bytes(&self) -> &[u8; SEED_LEN] {
        &self.0
    }
}

impl From<[u8; SEED_LEN]> for Seed {
    fn from(bytes: [u8; SEED_LEN]) -> Self {
        Seed(bytes)
    }
}

impl AsRef<[u8]> for Seed {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::LowerHex for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in self.0.iter() {
            write!(f, "{:02x}", b)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Seed({:x})", self)
    }
}

/// Domain-separation tag bound into every digest invocation.
///
/// Process-wide and never mutated after construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct SessionContext(pub [u8; CONTEXT_LEN]);

impl SessionContext {
    pub const fn new(tag: [u8; CONTEXT_LEN]) -> Self {
        Self(tag)
    }

    /// Builds a context from an arbitrary slice, rejecting any length but `CONTEXT_LEN`.
    pub fn from_slice(tag: &[u8]) -> Result<Self, DigestFault> {
        let bytes: [u8; CONTEXT_LEN] = tag.try_into().map_err(|_| DigestFault::ContextLength {
            expected: CONTEXT_LEN,
            found: tag.len(),
        })?;
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; CONTEXT_LEN] {
        &self.0
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self(DEFAULT_CONTEXT)
    }
}
