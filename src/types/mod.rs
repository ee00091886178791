// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
pub mod digest;
pub mod seed;

pub use digest::Digest;
pub use seed::{Seed, SessionContext};
