// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Trial Generator: fresh seed material for every trial.
//!
//! Seeds only need to be unpredictable enough for test coverage. Repeats
//! are harmless because every trial is independent.

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use hashcheck_kernel::config::SEED_LEN;
use hashcheck_kernel::types::Seed;

pub trait SeedSource {
    fn next_seed(&mut self) -> Seed;
}

impl<S: SeedSource + ?Sized> SeedSource for Box<S> {
    fn next_seed(&mut self) -> Seed {
        (**self).next_seed()
    }
}

impl<S: SeedSource + ?Sized> SeedSource for &mut S {
    fn next_seed(&mut self) -> Seed {
        (**self).next_seed()
    }
}

/// Thread-local OS-seeded RNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsSeedSource;

impl SeedSource for OsSeedSource {
    fn next_seed(&mut self) -> Seed {
        let mut bytes = [0u8; SEED_LEN];
        rand::thread_rng().fill_bytes(&mut bytes);
        Seed(bytes)
    }
}

/// Reproducible seed stream for replaying a run.
#[derive(Debug, Clone)]
pub struct SeededSource {
    rng: StdRng,
}

impl SeededSource {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl SeedSource for SeededSource {
    fn next_seed(&mut self) -> Seed {
        let mut bytes = [0u8; SEED_LEN];
        self.rng.fill_bytes(&mut bytes);
        Seed(bytes)
    }
}

/// Seeded stream when `rng_seed` is given, OS randomness otherwise.
pub fn seed_source(rng_seed: Option<u64>) -> Box<dyn SeedSource + Send> {
    match rng_seed {
        Some(seed) => {
            tracing::info!("Using reproducible seed stream (seed={})", seed);
            Box::new(SeededSource::new(seed))
        }
        None => Box::new(OsSeedSource),
    }
}
