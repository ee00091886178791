// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Verification Loop
//!
//! One trial at a time:
//! 1. draw a seed
//! 2. chain it locally to the expected digest
//! 3. log seed and expected digest (before any device I/O)
//! 4. exchange with the device
//! 5. log status lines and the three reported digests
//! 6. compare and log the verdict
//! 7. settle, then check for cancellation
//!
//! Divergent digests are recorded, never fatal. Any fault (digest, device
//! I/O, event log) ends the loop.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use hashcheck_kernel::chain::HashChain;
use hashcheck_kernel::compare::{Channel, Verdict};
use hashcheck_kernel::primitive::DigestPrimitive;
use hashcheck_kernel::types::{Digest, Seed};

use crate::config::HarnessConfig;
use crate::errors::{HarnessError, Result};
use crate::events::{escape_line, EventSink};
use crate::protocol::{DeviceSession, SessionState, Transport};
use crate::telemetry::{CHAIN_DURATION, EXCHANGE_DURATION, MISMATCHES_TOTAL, TRIALS_TOTAL};
use crate::trial::SeedSource;

/// Everything observed during one trial.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrialRecord {
    pub index: u64,
    pub seed: Seed,
    pub expected: Digest,
    pub status_lines: Vec<Vec<u8>>,
    pub reported: [Digest; 3],
    pub verdict: Verdict,
}

/// Running totals; the loop keeps no per-trial history.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub trials: u64,
    pub matching_trials: u64,
    pub mismatches_a: u64,
    pub mismatches_b: u64,
    pub mismatches_c: u64,
}

impl SessionSummary {
    fn observe(&mut self, verdict: &Verdict) {
        self.trials += 1;
        if verdict.is_match() {
            self.matching_trials += 1;
        }
        for (channel, comparison) in verdict.iter() {
            if comparison.is_match() {
                continue;
            }
            match channel {
                Channel::A => self.mismatches_a += 1,
                Channel::B => self.mismatches_b += 1,
                Channel::C => self.mismatches_c += 1,
            }
        }
    }

    pub fn mismatches(&self, channel: Channel) -> u64 {
        match channel {
            Channel::A => self.mismatches_a,
            Channel::B => self.mismatches_b,
            Channel::C => self.mismatches_c,
        }
    }
}

pub struct Verifier<P, T, S, L>
where
    P: DigestPrimitive,
    T: Transport,
    S: SeedSource,
    L: EventSink,
{
    chain: HashChain<P>,
    session: DeviceSession<T>,
    seeds: S,
    log: L,
    rounds: u32,
    max_trials: Option<u64>,
    post_trial: Duration,
    summary: SessionSummary,
}

impl<P, T, S, L> Verifier<P, T, S, L>
where
    P: DigestPrimitive,
    T: Transport,
    S: SeedSource,
    L: EventSink,
{
    pub fn new(
        cfg: &HarnessConfig,
        chain: HashChain<P>,
        session: DeviceSession<T>,
        seeds: S,
        log: L,
    ) -> Self {
        Self {
            chain,
            session,
            seeds,
            log,
            rounds: cfg.rounds,
            max_trials: cfg.max_trials,
            post_trial: cfg.pacing.post_trial,
            summary: SessionSummary::default(),
        }
    }

    pub fn summary(&self) -> &SessionSummary {
        &self.summary
    }

    pub fn session_state(&self) -> SessionState {
        self.session.state()
    }

    /// Handshake with the device and record the session parameters.
    pub fn start(&mut self) -> Result<()> {
        self.log.record(&format!(
            "config rounds={} context={}",
            self.rounds,
            hex::encode(self.chain.context().as_bytes())
        ))?;

        let handshake = self.session.open()?;
        self.log.record(&escape_line(&handshake))?;
        tracing::info!("Device session ready");
        Ok(())
    }

    /// Run one full trial. The session must already be open.
    pub fn run_trial(&mut self) -> Result<TrialRecord> {
        let index = self.summary.trials + 1;
        let seed = self.seeds.next_seed();

        let started = Instant::now();
        let expected = self.chain.compute_expected(seed.as_ref(), self.rounds)?;
        metrics::histogram!(CHAIN_DURATION, started.elapsed().as_secs_f64());

        self.log.record(&format!("sending {}", hex::encode(seed.as_bytes())))?;
        self.log.record(&format!("expect {}", hex::encode(expected.as_bytes())))?;

        let started = Instant::now();
        let report = self.session.exchange(&seed)?;
        metrics::histogram!(EXCHANGE_DURATION, started.elapsed().as_secs_f64());

        for line in report.status_lines.iter() {
            self.log.record(&escape_line(line))?;
        }
        for (channel, digest) in Channel::ALL.iter().zip(report.digests.iter()) {
            self.log.record(&format!("{}: {}", channel, hex::encode(digest.as_bytes())))?;
        }

        let verdict = Verdict::compare(&expected, &report.digests);
        self.log.record(&format!("verdict {}", verdict))?;

        self.summary.observe(&verdict);
        metrics::counter!(TRIALS_TOTAL, 1);
        for (channel, comparison) in verdict.iter() {
            if !comparison.is_match() {
                metrics::counter!(MISMATCHES_TOTAL, 1, "channel" => channel.label());
            }
        }

        if verdict.is_match() {
            tracing::debug!("Trial {} matched", index);
        } else {
            tracing::warn!("Trial {} diverged: {} (seed {:x})", index, verdict, seed);
        }

        Ok(TrialRecord {
            index,
            seed,
            expected,
            status_lines: report.status_lines,
            reported: report.digests,
            verdict,
        })
    }

    /// Run trials until `cancel` fires or the configured trial cap is reached.
    ///
    /// The session is opened first if it is not already. The final summary
    /// is written to the event log as JSON.
    pub fn run(&mut self, cancel: &CancellationToken) -> Result<SessionSummary> {
        if self.session.state() == SessionState::Disconnected {
            self.start()?;
        }

        loop {
            if cancel.is_cancelled() {
                tracing::info!("Cancellation requested after {} trials", self.summary.trials);
                break;
            }
            if let Some(max) = self.max_trials {
                if self.summary.trials >= max {
                    break;
                }
            }

            if let Err(e) = self.run_trial() {
                tracing::error!("Trial {} aborted: {}", self.summary.trials + 1, e);
                if !matches!(e, HarnessError::Log(_)) {
                    let _ = self.log.record(&format!("fault {}", e));
                }
                self.session.close();
                return Err(e);
            }

            if !self.post_trial.is_zero() {
                std::thread::sleep(self.post_trial);
            }
        }

        self.session.close();
        let summary = self.summary.clone();
        self.log.record(&format!("summary {}", serde_json::to_string(&summary)?))?;
        Ok(summary)
    }
}
