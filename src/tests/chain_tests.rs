use crate::chain::HashChain;
use crate::error::{ChainError, DigestFault};
use crate::primitive::{Blake3Primitive, DigestPrimitive};
use crate::types::{Digest, Seed, SessionContext};

/// XOR-folds the input into 32 bytes. Deterministic stand-in for a real hash.
struct XorFold;

impl DigestPrimitive for XorFold {
    fn digest(
        &self,
        input: &[u8],
        _context: &SessionContext,
        _key: Option<&[u8]>,
    ) -> Result<Digest, DigestFault> {
        let mut out = [0u8; 32];
        for (i, b) in input.iter().enumerate() {
            out[i % 32] ^= b;
        }
        Ok(Digest(out))
    }
}

/// Always rejects its input.
struct Faulty;

impl DigestPrimitive for Faulty {
    fn digest(
        &self,
        _input: &[u8],
        _context: &SessionContext,
        _key: Option<&[u8]>,
    ) -> Result<Digest, DigestFault> {
        Err(DigestFault::Backend)
    }
}

fn blake3_chain() -> HashChain<Blake3Primitive> {
    HashChain::new(Blake3Primitive, SessionContext::default())
}

#[test]
fn test_chain_determinism() {
    let chain = blake3_chain();
    let seed = Seed([9, 8, 7, 6, 5, 4, 3, 2]);

    let first = chain.compute_expected(seed.as_ref(), 50).unwrap();
    let second = chain.compute_expected(seed.as_ref(), 50).unwrap();

    assert_eq!(first, second, "Identical seed and rounds must chain identically");
}

#[test]
fn test_zero_rounds_is_single_digest() {
    let chain = blake3_chain();
    let seed = [1u8, 2, 3, 4, 5, 6, 7, 8];
    let ctx = SessionContext::default();

    let expected = Blake3Primitive.digest(&seed, &ctx, None).unwrap();
    assert_eq!(chain.compute_expected(&seed, 0).unwrap(), expected);
}

#[test]
fn test_one_more_round_is_one_more_step() {
    let chain = blake3_chain();
    let seed = [0xAAu8; 8];

    for r in [0u32, 1, 2, 17] {
        let base = chain.compute_expected(&seed, r).unwrap();
        let next = chain.compute_expected(&seed, r + 1).unwrap();
        assert_eq!(next, chain.step(base.as_bytes()).unwrap(), "round {}", r);
    }
}

#[test]
fn test_output_is_always_digest_length() {
    let chain = blake3_chain();
    for len in [1usize, 8, 31, 32, 33, 200] {
        let seed = vec![0x5Au8; len];
        let digest = chain.compute_expected(&seed, 2).unwrap();
        assert_eq!(digest.as_bytes().len(), Digest::LEN);
    }
}

#[test]
fn test_different_seeds_diverge() {
    let chain = blake3_chain();
    let a = chain.compute_expected(&[0u8; 8], 10).unwrap();
    let b = chain.compute_expected(&[1u8, 0, 0, 0, 0, 0, 0, 0], 10).unwrap();
    assert_ne!(a, b);
}

#[test]
fn test_empty_seed_rejected() {
    let chain = blake3_chain();
    assert_eq!(chain.compute_expected(&[], 5), Err(ChainError::EmptySeed));
}

#[test]
fn test_primitive_fault_propagates() {
    let chain = HashChain::new(Faulty, SessionContext::default());
    assert_eq!(
        chain.compute_expected(&[1u8; 8], 3),
        Err(ChainError::Digest(DigestFault::Backend))
    );
}

#[test]
fn test_xor_fold_chain_matches_manual_chaining() {
    let chain = HashChain::new(XorFold, SessionContext::default());
    let seed = Seed([0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08]);
    let ctx = SessionContext::default();

    let mut manual = XorFold.digest(seed.as_ref(), &ctx, None).unwrap();
    for _ in 0..3 {
        manual = XorFold.digest(manual.as_bytes(), &ctx, None).unwrap();
    }

    let computed = chain.compute_expected(seed.as_ref(), 3).unwrap();
    assert_eq!(computed, manual);

    let mut padded = [0u8; 32];
    padded[..8].copy_from_slice(seed.as_bytes());
    assert_eq!(computed.0, padded);
}

#[test]
fn test_reference_rounds_complete() {
    let chain = blake3_chain();
    let seed = [0x42u8; 8];
    let full = chain
        .compute_expected(&seed, crate::config::DEFAULT_ROUNDS)
        .unwrap();
    let one_short = chain
        .compute_expected(&seed, crate::config::DEFAULT_ROUNDS - 1)
        .unwrap();
    assert_eq!(full, chain.step(one_short.as_bytes()).unwrap());
}
