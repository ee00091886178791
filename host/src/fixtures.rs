// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Scripted stand-ins for the device, the digest primitive, the seed source
//! and the event sink. Used by unit and integration tests.

use std::collections::VecDeque;
use std::io::{self, Cursor, Read, Write};
use std::sync::{Arc, Mutex};

use hashcheck_kernel::error::DigestFault;
use hashcheck_kernel::primitive::DigestPrimitive;
use hashcheck_kernel::types::{Digest, Seed, SessionContext};

use crate::events::{EventSink, LogFault};
use crate::trial::SeedSource;

/// Bytes a scripted device will send, in order.
#[derive(Debug, Default, Clone)]
pub struct DeviceScript {
    bytes: Vec<u8>,
}

impl DeviceScript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handshake(self, line: &[u8]) -> Self {
        self.raw(line)
    }

    pub fn status_lines(mut self, lines: &[&[u8]]) -> Self {
        for line in lines {
            self.bytes.extend_from_slice(line);
        }
        self
    }

    pub fn digests(mut self, digests: [Digest; 3]) -> Self {
        for d in digests.iter() {
            self.bytes.extend_from_slice(d.as_bytes());
        }
        self
    }

    /// A complete, well-formed trial response.
    pub fn trial(self, lines: &[&[u8]], digests: [Digest; 3]) -> Self {
        self.status_lines(lines).digests(digests)
    }

    pub fn raw(mut self, bytes: &[u8]) -> Self {
        self.bytes.extend_from_slice(bytes);
        self
    }

    pub fn build(self) -> Vec<u8> {
        self.bytes
    }
}

/// Everything the host wrote to a [`SimulatedDevice`].
#[derive(Debug, Clone, Default)]
pub struct WireTap {
    written: Arc<Mutex<Vec<u8>>>,
}

impl WireTap {
    pub fn written(&self) -> Vec<u8> {
        self.written.lock().unwrap().clone()
    }
}

/// In-memory device: replays a script, records host writes, and closes the
/// connection once the script runs out.
#[derive(Debug)]
pub struct SimulatedDevice {
    outgoing: Cursor<Vec<u8>>,
    tap: WireTap,
    chunk_size: Option<usize>,
}

impl SimulatedDevice {
    pub fn new(script: Vec<u8>) -> Self {
        Self {
            outgoing: Cursor::new(script),
            tap: WireTap::default(),
            chunk_size: None,
        }
    }

    /// Deliver at most `n` bytes per read, as a serial line would.
    pub fn with_chunk_size(mut self, n: usize) -> Self {
        self.chunk_size = Some(n.max(1));
        self
    }

    pub fn tap(&self) -> WireTap {
        self.tap.clone()
    }
}

impl Read for SimulatedDevice {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let limit = match self.chunk_size {
            Some(n) => n.min(buf.len()),
            None => buf.len(),
        };
        self.outgoing.read(&mut buf[..limit])
    }
}

impl Write for SimulatedDevice {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.tap.written.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Stub digest: XOR-folds the input into 32 bytes. Ignores context and key.
#[derive(Debug, Clone, Copy, Default)]
pub struct XorFoldPrimitive;

impl DigestPrimitive for XorFoldPrimitive {
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

/// Hands out a fixed list of seeds, cycling when exhausted.
#[derive(Debug, Clone)]
pub struct FixedSeeds {
    seeds: VecDeque<Seed>,
}

impl FixedSeeds {
    pub fn new(seeds: impl IntoIterator<Item = Seed>) -> Self {
        let seeds: VecDeque<Seed> = seeds.into_iter().collect();
        assert!(!seeds.is_empty(), "FixedSeeds needs at least one seed");
        Self { seeds }
    }
}

impl SeedSource for FixedSeeds {
    fn next_seed(&mut self) -> Seed {
        let seed = self.seeds[0];
        self.seeds.rotate_left(1);
        seed
    }
}

/// Event sink that keeps bare messages in memory.
#[derive(Debug, Clone, Default)]
pub struct RecordingLog {
    messages: Arc<Mutex<Vec<String>>>,
    fail: bool,
}

impl RecordingLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink whose every write fails, as on a full disk.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl EventSink for RecordingLog {
    fn record(&mut self, message: &str) -> Result<(), LogFault> {
        if self.fail {
            return Err(LogFault::Io(io::Error::new(io::ErrorKind::Other, "no space left on device")));
        }
        self.messages.lock().unwrap().push(message.to_string());
        Ok(())
    }
}
