// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! On-wire trial format.
//!
//! ```text
//! host → device   "comp"                     once per session
//! device → host   <handshake line>\n         once per session
//!
//! host → device   seed[8]                    per trial, raw, no length prefix
//! device → host   <status>\n x3              per trial, uninterpreted
//! device → host   A[32] B[32] C[32]          per trial, no delimiters
//! ```

use hashcheck_kernel::config::{DIGEST_LEN, SEED_LEN};
use hashcheck_kernel::types::{Digest, Seed};

pub const HANDSHAKE_COMMAND: &[u8; 4] = b"comp";

/// Status lines preceding the digest block on every trial.
pub const STATUS_LINES: usize = 3;

/// Digests reported per trial (channels A, B, C).
pub const REPORTED_DIGESTS: usize = 3;

/// Size of the raw digest block that follows the status lines.
pub const REPORT_LEN: usize = REPORTED_DIGESTS * DIGEST_LEN;

/// What the device sent back for one trial.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceReport {
    /// Raw status lines, newline included.
    pub status_lines: Vec<Vec<u8>>,
    /// Reported digests in arrival order: A, B, C.
    pub digests: [Digest; REPORTED_DIGESTS],
}

pub fn encode_seed(seed: &Seed) -> [u8; SEED_LEN] {
    seed.0
}

/// Split the digest block on fixed 32-byte boundaries, preserving order.
pub fn split_report(block: &[u8; REPORT_LEN]) -> [Digest; REPORTED_DIGESTS] {
    let mut digests = [Digest::default(); REPORTED_DIGESTS];
    for (digest, chunk) in digests.iter_mut().zip(block.chunks_exact(DIGEST_LEN)) {
        digest.0.copy_from_slice(chunk);
    }
    digests
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_len_is_three_digests() {
        assert_eq!(REPORT_LEN, 96);
    }

    #[test]
    fn test_split_report_keeps_boundaries() {
        let mut block = [0u8; REPORT_LEN];
        for (i, b) in block.iter_mut().enumerate() {
            *b = i as u8;
        }

        let [a, b, c] = split_report(&block);

        assert_eq!(a.0[0], 0);
        assert_eq!(a.0[31], 31);
        assert_eq!(b.0[0], 32);
        assert_eq!(b.0[31], 63);
        assert_eq!(c.0[0], 64);
        assert_eq!(c.0[31], 95);
    }

    #[test]
    fn test_encode_seed_is_raw_bytes() {
        let seed = Seed([1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(encode_seed(&seed), [1, 2, 3, 4, 5, 6, 7, 8]);
    }
}
