// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use hashcheck_host::config::{HarnessConfig, Pacing};
use hashcheck_host::events::{EventSink, TeeLog};
use hashcheck_host::fixtures::{DeviceScript, FixedSeeds, SimulatedDevice, XorFoldPrimitive};
use hashcheck_host::protocol::{DeviceSession, StreamTransport};
use hashcheck_host::verifier::Verifier;
use hashcheck_kernel::chain::HashChain;
use hashcheck_kernel::types::Seed;
use tempfile::tempdir;
use tokio_util::sync::CancellationToken;

#[test]
fn test_verifier_writes_timestamped_log_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("trial.log");

    let cfg = HarnessConfig {
        rounds: 0,
        max_trials: Some(1),
        pacing: Pacing::none(),
        log_path: path.clone(),
        ..HarnessConfig::default()
    };

    // With zero rounds the XOR-fold stub returns the zero-padded seed.
    let seed = Seed([0xAB; 8]);
    let mut padded = [0u8; 32];
    padded[..8].copy_from_slice(seed.as_bytes());
    let d = hashcheck_kernel::types::Digest(padded);
    let script = DeviceScript::new()
        .handshake(b"ok\n")
        .trial(&[b"a\n", b"b\n", b"c\n"], [d, d, d])
        .build();

    let file = std::fs::File::create(&path).unwrap();
    let log = TeeLog::new(std::io::BufWriter::new(file), std::io::sink());
    let session = DeviceSession::new(StreamTransport::new(SimulatedDevice::new(script)), cfg.pacing);
    let chain = HashChain::new(XorFoldPrimitive, cfg.context);
    let mut verifier = Verifier::new(&cfg, chain, session, FixedSeeds::new([seed]), log);

    let summary = verifier.run(&CancellationToken::new()).unwrap();
    assert_eq!(summary.matching_trials, 1);
    drop(verifier);

    let text = std::fs::read_to_string(&path).unwrap();
    let mut last_ts = 0.0f64;
    let mut messages = Vec::new();
    for line in text.lines() {
        let (ts, msg) = line.split_once(' ').expect("timestamp prefix");
        let ts: f64 = ts.parse().expect("float timestamp");
        assert!(ts >= last_ts);
        last_ts = ts;
        messages.push(msg.to_string());
    }

    assert_eq!(messages[1], "ok\\n");
    assert_eq!(messages[2], "sending abababababababab");
    assert!(messages.contains(&"verdict A=match B=match C=match".to_string()));
    assert!(messages.last().unwrap().starts_with("summary "));
}

#[test]
fn test_sink_through_mutable_reference() {
    let mut log = TeeLog::new(Vec::new(), Vec::new());
    {
        let mut by_ref: &mut TeeLog<Vec<u8>, Vec<u8>> = &mut log;
        by_ref.record("one").unwrap();
        EventSink::record(&mut by_ref, "two").unwrap();
    }
    assert_eq!(log.lines_written(), 2);
}
