// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Configuration constants.

/// Length in bytes of a trial seed.
pub const SEED_LEN: usize = 8;

/// Length in bytes of every digest in the system.
pub const DIGEST_LEN: usize = 32;

/// Length in bytes of the domain-separation context tag.
pub const CONTEXT_LEN: usize = 8;

/// Required key length for keyed digests.
pub const KEY_LEN: usize = 32;

/// Chain rounds applied after the initial digest in the reference configuration.
pub const DEFAULT_ROUNDS: u32 = 10_000;

/// Context tag shared with the device firmware.
pub const DEFAULT_CONTEXT: [u8; CONTEXT_LEN] = *b"CONTEXT!";
