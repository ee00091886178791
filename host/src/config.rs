// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use std::path::PathBuf;
use std::time::Duration;

use hashcheck_kernel::config::DEFAULT_ROUNDS;
use hashcheck_kernel::types::SessionContext;

use crate::primitives::PrimitiveKind;

/// Fixed pauses that give the device time to boot and to finish a trial.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    /// Before and after the handshake command, and after the handshake reply.
    pub boot_settle: Duration,
    /// After each trial, before the next seed is sent.
    pub post_trial: Duration,
}

impl Pacing {
    pub const fn none() -> Self {
        Self {
            boot_settle: Duration::ZERO,
            post_trial: Duration::ZERO,
        }
    }
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            boot_settle: Duration::from_millis(500),
            post_trial: Duration::from_millis(200),
        }
    }
}

#[derive(Debug, Clone)]
pub struct HarnessConfig {
    pub log_path: PathBuf,
    pub append: bool,
    pub device_path: String,
    pub baud_rate: u32,
    pub read_timeout: Duration,
    pub rounds: u32,
    pub context: SessionContext,
    pub primitive: PrimitiveKind,
    /// Stop after this many trials. `None` runs until cancelled.
    pub max_trials: Option<u64>,
    /// Deterministic seed stream for reproducing a run.
    pub rng_seed: Option<u64>,
    pub pacing: Pacing,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            log_path: PathBuf::from("hashcheck.log"),
            append: false,
            device_path: "/dev/ttyACM0".to_string(),
            baud_rate: 115_200,
            read_timeout: Duration::from_secs(60),
            rounds: DEFAULT_ROUNDS,
            context: SessionContext::default(),
            primitive: PrimitiveKind::default(),
            max_trials: None,
            rng_seed: None,
            pacing: Pacing::default(),
        }
    }
}
