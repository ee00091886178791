// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Reference digest backends available to the host.
//!
//! The device firmware hashes with libhydrogen's `hydro_hash_hash`
//! (32-byte output, 8-byte context, unkeyed), so [`HydrogenPrimitive`] is
//! the default. BLAKE3 stays selectable for firmware built against it.

use clap::ValueEnum;
use libhydrogen::hash;

use hashcheck_kernel::config::{DIGEST_LEN, KEY_LEN};
use hashcheck_kernel::error::DigestFault;
use hashcheck_kernel::primitive::{Blake3Primitive, DigestPrimitive};
use hashcheck_kernel::types::{Digest, SessionContext};

use crate::errors::{HarnessError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum PrimitiveKind {
    /// libhydrogen `hydro_hash_hash`
    #[default]
    Hydrogen,
    /// BLAKE3 derive-key / keyed mode
    Blake3,
}

/// libhydrogen backend. Construction initializes the library once.
#[derive(Debug, Clone, Copy)]
pub struct HydrogenPrimitive {
    _init: (),
}

impl HydrogenPrimitive {
    pub fn new() -> Result<Self> {
        libhydrogen::init()
            .map_err(|e| HarnessError::Backend(format!("libhydrogen init failed: {:?}", e)))?;
        Ok(Self { _init: () })
    }
}

impl DigestPrimitive for HydrogenPrimitive {
    fn digest(
        &self,
        input: &[u8],
        context: &SessionContext,
        key: Option<&[u8]>,
    ) -> std::result::Result<Digest, DigestFault> {
        let ctx = hash::Context::from(*context.as_bytes());
        let key = match key {
            None => None,
            Some(key) => {
                let bytes: [u8; KEY_LEN] = key.try_into().map_err(|_| DigestFault::KeyLength {
                    expected: KEY_LEN,
                    found: key.len(),
                })?;
                Some(hash::Key::from(bytes))
            }
        };

        let out = hash::hash(DIGEST_LEN, input, &ctx, key.as_ref()).map_err(|_| DigestFault::Backend)?;
        let bytes: [u8; DIGEST_LEN] = out.as_slice().try_into().map_err(|_| DigestFault::Backend)?;
        Ok(Digest(bytes))
    }
}

/// Backend chosen at startup.
#[derive(Debug, Clone, Copy)]
pub enum ReferencePrimitive {
    Hydrogen(HydrogenPrimitive),
    Blake3(Blake3Primitive),
}

impl ReferencePrimitive {
    pub fn select(kind: PrimitiveKind) -> Result<Self> {
        Ok(match kind {
            PrimitiveKind::Hydrogen => ReferencePrimitive::Hydrogen(HydrogenPrimitive::new()?),
            PrimitiveKind::Blake3 => ReferencePrimitive::Blake3(Blake3Primitive),
        })
    }

    pub fn kind(&self) -> PrimitiveKind {
        match self {
            ReferencePrimitive::Hydrogen(_) => PrimitiveKind::Hydrogen,
            ReferencePrimitive::Blake3(_) => PrimitiveKind::Blake3,
        }
    }
}

impl DigestPrimitive for ReferencePrimitive {
    fn digest(
        &self,
        input: &[u8],
        context: &SessionContext,
        key: Option<&[u8]>,
    ) -> std::result::Result<Digest, DigestFault> {
        match self {
            ReferencePrimitive::Hydrogen(p) => p.digest(input, context, key),
            ReferencePrimitive::Blake3(p) => p.digest(input, context, key),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hashcheck_kernel::chain::HashChain;

    fn hydrogen() -> HydrogenPrimitive {
        HydrogenPrimitive::new().unwrap()
    }

    #[test]
    fn test_hydrogen_is_deterministic_and_fixed_length() {
        let ctx = SessionContext::default();
        let a = hydrogen().digest(&[1, 2, 3, 4, 5, 6, 7, 8], &ctx, None).unwrap();
        let b = hydrogen().digest(&[1, 2, 3, 4, 5, 6, 7, 8], &ctx, None).unwrap();

        assert_eq!(a, b);
        assert_eq!(a.as_bytes().len(), DIGEST_LEN);
    }

    #[test]
    fn test_hydrogen_matches_library_call() {
        let ctx = SessionContext::default();
        let digest = hydrogen().digest(b"seed0001", &ctx, None).unwrap();
        let direct = hash::hash(DIGEST_LEN, b"seed0001", &hash::Context::from(*b"CONTEXT!"), None).unwrap();

        assert_eq!(&digest.0[..], &direct[..]);
    }

    #[test]
    fn test_hydrogen_accepts_binary_context_tag() {
        let binary = SessionContext::new([0, 1, 2, 3, 0x80, 0x81, 0xfe, 0xff]);
        let digest = hydrogen().digest(&[1u8; 8], &binary, None).unwrap();
        let plain = hydrogen().digest(&[1u8; 8], &SessionContext::default(), None).unwrap();

        assert_ne!(digest, plain, "Context must separate outputs");
    }

    #[test]
    fn test_hydrogen_key_length_checked() {
        let ctx = SessionContext::default();
        let result = hydrogen().digest(b"x", &ctx, Some(&[0u8; 5]));
        assert_eq!(result, Err(DigestFault::KeyLength { expected: KEY_LEN, found: 5 }));

        let keyed = hydrogen().digest(b"x", &ctx, Some(&[9u8; KEY_LEN])).unwrap();
        let unkeyed = hydrogen().digest(b"x", &ctx, None).unwrap();
        assert_ne!(keyed, unkeyed);
    }

    #[test]
    fn test_reference_primitive_dispatches() {
        let ctx = SessionContext::default();

        let blake = ReferencePrimitive::select(PrimitiveKind::Blake3).unwrap();
        assert_eq!(blake.kind(), PrimitiveKind::Blake3);
        assert_eq!(
            blake.digest(b"abc", &ctx, None).unwrap(),
            Blake3Primitive.digest(b"abc", &ctx, None).unwrap()
        );

        let hydro = ReferencePrimitive::select(PrimitiveKind::default()).unwrap();
        assert_eq!(hydro.kind(), PrimitiveKind::Hydrogen);
        assert_eq!(
            hydro.digest(b"abc", &ctx, None).unwrap(),
            hydrogen().digest(b"abc", &ctx, None).unwrap()
        );
    }

    #[test]
    fn test_hydrogen_chain_extends_by_one_step() {
        let chain = HashChain::new(hydrogen(), SessionContext::default());
        let seed = [0x42u8; 8];

        let base = chain.compute_expected(&seed, 4).unwrap();
        let next = chain.compute_expected(&seed, 5).unwrap();
        assert_eq!(next, chain.step(base.as_bytes()).unwrap());
    }
}
