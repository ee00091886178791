// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Digest Primitive
//!
//! The chain engine treats the hash function as a black box:
//! bytes in, fixed 32-byte digest out, bound to a context tag and
//! optionally keyed. Any backend that honours that contract plugs in
//! through [`DigestPrimitive`].
//!
//! [`Blake3Primitive`] is the default reference backend.

use crate::config::{CONTEXT_LEN, KEY_LEN};
use crate::error::DigestFault;
use crate::types::{Digest, SessionContext};

/// Fixed-output keyed/contextual hash function.
pub trait DigestPrimitive {
    /// Hash `input` under `context`. `key = None` means unkeyed.
    fn digest(
        &self,
        input: &[u8],
        context: &SessionContext,
        key: Option<&[u8]>,
    ) -> Result<Digest, DigestFault>;
}

impl<P: DigestPrimitive + ?Sized> DigestPrimitive for &P {
    fn digest(
        &self,
        input: &[u8],
        context: &SessionContext,
        key: Option<&[u8]>,
    ) -> Result<Digest, DigestFault> {
        (**self).digest(input, context, key)
    }
}

/// BLAKE3 backend.
///
/// # Modes
/// - Unkeyed: `derive_key` mode. The derivation string is the lowercase
///   hex of the context tag, so any 8 bytes are a valid tag.
/// - Keyed: `keyed_hash` mode with a 32-byte key; the context tag is
///   absorbed ahead of the input.
#[derive(Clone, Copy, Debug, Default)]
pub struct Blake3Primitive;

impl DigestPrimitive for Blake3Primitive {
    fn digest(
        &self,
        input: &[u8],
        context: &SessionContext,
        key: Option<&[u8]>,
    ) -> Result<Digest, DigestFault> {
        let mut hasher = match key {
            None => {
                let mut buf = [0u8; CONTEXT_LEN * 2];
                blake3::Hasher::new_derive_key(context_hex(context, &mut buf))
            }
            Some(key) => {
                let key: &[u8; KEY_LEN] = key.try_into().map_err(|_| DigestFault::KeyLength {
                    expected: KEY_LEN,
                    found: key.len(),
                })?;
                let mut hasher = blake3::Hasher::new_keyed(key);
                hasher.update(context.as_bytes());
                hasher
            }
        };

        hasher.update(input);
        Ok(Digest(*hasher.finalize().as_bytes()))
    }
}

fn context_hex<'a>(context: &SessionContext, buf: &'a mut [u8; CONTEXT_LEN * 2]) -> &'a str {
    const HEX: &[u8; 16] = b"0123456789abcdef";
    for (i, b) in context.as_bytes().iter().enumerate() {
        buf[2 * i] = HEX[(b >> 4) as usize];
        buf[2 * i + 1] = HEX[(b & 0x0f) as usize];
    }
    let buf: &'a [u8] = buf;
    // Only ASCII hex digits were written.
    core::str::from_utf8(buf).unwrap_or_default()
}
