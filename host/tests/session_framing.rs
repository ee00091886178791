// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Byte-count framing of the digest block under arbitrary fragmentation.

use hashcheck_host::config::Pacing;
use hashcheck_host::fixtures::{DeviceScript, SimulatedDevice};
use hashcheck_host::protocol::{DeviceSession, IoFault, SessionState, StreamTransport};
use hashcheck_kernel::types::{Digest, Seed};

fn distinct_digests() -> [Digest; 3] {
    let mut a = [0u8; 32];
    let mut b = [0u8; 32];
    let mut c = [0u8; 32];
    for i in 0..32 {
        a[i] = i as u8;
        b[i] = 0x40 + i as u8;
        c[i] = 0x80 + i as u8;
    }
    [Digest(a), Digest(b), Digest(c)]
}

#[test]
fn test_report_split_for_every_chunk_size() {
    let digests = distinct_digests();

    for chunk in [1usize, 2, 5, 31, 32, 33, 64, 95, 96, 4096] {
        let script = DeviceScript::new()
            .handshake(b"boot\n")
            .trial(&[b"s1\n", b"s2\n", b"s3\n"], digests)
            .build();
        let device = SimulatedDevice::new(script).with_chunk_size(chunk);
        let mut session = DeviceSession::new(StreamTransport::new(device), Pacing::none());

        session.open().unwrap();
        let report = session.exchange(&Seed([0; 8])).unwrap();

        assert_eq!(report.digests, digests, "chunk size {}", chunk);
        assert_eq!(report.status_lines.len(), 3);
    }
}

#[test]
fn test_digest_bytes_resembling_newlines_are_not_lines() {
    let newlines = Digest([b'\n'; 32]);
    let digests = [newlines, Digest([b'\r'; 32]), newlines];
    let script = DeviceScript::new()
        .handshake(b"boot\n")
        .trial(&[b"s1\n", b"s2\n", b"s3\n"], digests)
        .build();
    let mut session = DeviceSession::new(
        StreamTransport::new(SimulatedDevice::new(script)),
        Pacing::none(),
    );

    session.open().unwrap();
    let report = session.exchange(&Seed([0; 8])).unwrap();
    assert_eq!(report.digests, digests);
}

#[test]
fn test_missing_status_line_is_fault() {
    let script = DeviceScript::new()
        .handshake(b"boot\n")
        .status_lines(&[b"s1\n", b"s2\n"])
        .build();
    let mut session = DeviceSession::new(
        StreamTransport::new(SimulatedDevice::new(script)),
        Pacing::none(),
    );

    session.open().unwrap();
    let result = session.exchange(&Seed([0; 8]));

    assert!(matches!(result, Err(IoFault::ConnectionClosed)));
    assert_eq!(session.state(), SessionState::Disconnected);
}

#[test]
fn test_open_twice_is_rejected() {
    let script = DeviceScript::new().handshake(b"boot\n").build();
    let mut session = DeviceSession::new(
        StreamTransport::new(SimulatedDevice::new(script)),
        Pacing::none(),
    );

    session.open().unwrap();
    assert!(matches!(
        session.open(),
        Err(IoFault::InvalidState { expected: SessionState::Disconnected, actual: SessionState::Ready })
    ));
}
