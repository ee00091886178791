// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tokio_util::sync::CancellationToken;

use hashcheck_host::config::HarnessConfig;
use hashcheck_host::events::TeeLog;
use hashcheck_host::primitives::{PrimitiveKind, ReferencePrimitive};
use hashcheck_host::protocol::{open_serial, DeviceSession};
use hashcheck_host::shutdown::{supervise, Supervision, ABORT_EXIT_CODE};
use hashcheck_host::telemetry;
use hashcheck_host::trial;
use hashcheck_host::verifier::Verifier;
use hashcheck_kernel::chain::HashChain;
use hashcheck_kernel::config::DEFAULT_ROUNDS;
use hashcheck_kernel::types::SessionContext;

#[derive(Parser, Debug)]
#[command(name = "hashcheck")]
#[command(author, version, about = "Check a device's hash implementation against a host reference chain", long_about = None)]
struct Args {
    /// Destination path for the event log
    log_path: PathBuf,

    /// Serial device the target is attached to
    #[arg(long, default_value = "/dev/ttyACM0")]
    device: String,

    #[arg(long, default_value_t = 115_200)]
    baud: u32,

    /// Chain rounds applied after the initial digest
    #[arg(long, default_value_t = DEFAULT_ROUNDS)]
    rounds: u32,

    /// 8-byte context tag shared with the device
    #[arg(long, default_value = "CONTEXT!")]
    context: String,

    /// Reference digest the device firmware implements
    #[arg(long, value_enum, default_value_t = PrimitiveKind::Hydrogen)]
    primitive: PrimitiveKind,

    /// Stop after this many trials (default: run until interrupted)
    #[arg(long)]
    trials: Option<u64>,

    /// Seed for a reproducible seed stream
    #[arg(long)]
    seed: Option<u64>,

    /// Fail a read that stalls this long
    #[arg(long, default_value_t = 60)]
    read_timeout_secs: u64,

    /// Append to the event log instead of truncating it
    #[arg(long)]
    append: bool,
}

impl Args {
    fn into_config(self) -> anyhow::Result<HarnessConfig> {
        let context = SessionContext::from_slice(self.context.as_bytes())
            .with_context(|| format!("Invalid --context {:?}", self.context))?;

        Ok(HarnessConfig {
            log_path: self.log_path,
            append: self.append,
            device_path: self.device,
            baud_rate: self.baud,
            read_timeout: Duration::from_secs(self.read_timeout_secs),
            rounds: self.rounds,
            context,
            primitive: self.primitive,
            max_trials: self.trials,
            rng_seed: self.seed,
            ..HarnessConfig::default()
        })
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init_telemetry();

    let cfg = Args::parse().into_config()?;
    tracing::info!("Initializing hashcheck with config: {:?}", cfg);

    let log = TeeLog::open(&cfg.log_path, cfg.append).context("Failed to open event log")?;
    let transport = open_serial(&cfg.device_path, cfg.baud_rate, cfg.read_timeout)
        .context("Failed to open serial device")?;

    let session = DeviceSession::new(transport, cfg.pacing);
    let primitive =
        ReferencePrimitive::select(cfg.primitive).context("Failed to initialize digest backend")?;
    let chain = HashChain::new(primitive, cfg.context);
    let seeds = trial::seed_source(cfg.rng_seed);
    let mut verifier = Verifier::new(&cfg, chain, session, seeds, log);

    let cancel = CancellationToken::new();
    let loop_token = cancel.clone();
    let handle = tokio::task::spawn_blocking(move || verifier.run(&loop_token));

    let ctrl_c = || async {
        let _ = tokio::signal::ctrl_c().await;
    };
    let joined = match supervise(handle, &cancel, ctrl_c).await {
        Supervision::Finished(res) => res,
        Supervision::Aborted => std::process::exit(ABORT_EXIT_CODE),
    };

    let summary = joined.context("Verification loop panicked")??;
    tracing::info!(
        "Session finished: {} trials, {} fully matching",
        summary.trials,
        summary.matching_trials
    );
    tracing::debug!("Metrics:\n{}", telemetry::get_metrics());

    Ok(())
}
