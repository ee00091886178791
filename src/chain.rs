// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Hash Chain Engine
//!
//! Produces the expected digest for a trial:
//! ```text
//! d0 = digest(seed, ctx)
//! d1 = digest(d0, ctx)
//! ...
//! dR = digest(d(R-1), ctx)
//! ```
//! Same seed + context + rounds → same digest, on every host. That
//! determinism is what the device output is checked against.

use crate::error::{ChainError, Result};
use crate::primitive::DigestPrimitive;
use crate::types::{Digest, SessionContext};

/// Iterates a [`DigestPrimitive`] over its own output.
#[derive(Clone, Debug)]
pub struct HashChain<P> {
    primitive: P,
    context: SessionContext,
}

impl<P: DigestPrimitive> HashChain<P> {
    pub fn new(primitive: P, context: SessionContext) -> Self {
        Self { primitive, context }
    }

    pub fn context(&self) -> &SessionContext {
        &self.context
    }

    /// One chain link: unkeyed digest of `input` under the session context.
    pub fn step(&self, input: &[u8]) -> Result<Digest> {
        Ok(self.primitive.digest(input, &self.context, None)?)
    }

    /// Digest `seed` once, then re-digest the result `rounds` more times.
    ///
    /// `rounds = 0` returns the plain digest of the seed.
    pub fn compute_expected(&self, seed: &[u8], rounds: u32) -> Result<Digest> {
        if seed.is_empty() {
            return Err(ChainError::EmptySeed);
        }

        let mut state = self.step(seed)?;
        for _ in 0..rounds {
            state = self.step(state.as_bytes())?;
        }
        Ok(state)
    }
}
