// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Per-connection state machine.
//!
//! ```text
//! Disconnected --open--> Handshaking --handshake line--> Ready
//! Ready --seed--> AwaitingResponse --3 lines + 96 bytes--> Ready
//! any --close / fault--> Disconnected
//! ```
//! A fault leaves the stream at an unknown offset, so the session drops to
//! `Disconnected` and refuses further exchanges.

use std::time::Duration;

use hashcheck_kernel::types::Seed;

use super::frame::{self, DeviceReport, HANDSHAKE_COMMAND, REPORT_LEN, STATUS_LINES};
use super::transport::Transport;
use super::IoFault;
use crate::config::Pacing;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Disconnected,
    Handshaking,
    Ready,
    AwaitingResponse,
}

pub struct DeviceSession<T: Transport> {
    transport: T,
    state: SessionState,
    pacing: Pacing,
}

impl<T: Transport> DeviceSession<T> {
    pub fn new(transport: T, pacing: Pacing) -> Self {
        Self {
            transport,
            state: SessionState::Disconnected,
            pacing,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Send the handshake command and return the device's reply line verbatim.
    ///
    /// The reply is not validated.
    pub fn open(&mut self) -> Result<Vec<u8>, IoFault> {
        self.require(SessionState::Disconnected)?;

        settle(self.pacing.boot_settle);
        let sent = self.transport.write_all(HANDSHAKE_COMMAND);
        self.check(sent)?;
        self.state = SessionState::Handshaking;

        settle(self.pacing.boot_settle);
        let line = self.transport.read_line();
        let line = self.check(line)?;
        settle(self.pacing.boot_settle);

        self.state = SessionState::Ready;
        tracing::debug!("Handshake complete ({} bytes)", line.len());
        Ok(line)
    }

    /// Send one seed and collect the device's report for it.
    pub fn exchange(&mut self, seed: &Seed) -> Result<DeviceReport, IoFault> {
        self.require(SessionState::Ready)?;

        let sent = self.transport.write_all(&frame::encode_seed(seed));
        self.check(sent)?;
        self.state = SessionState::AwaitingResponse;

        let mut status_lines = Vec::with_capacity(STATUS_LINES);
        for _ in 0..STATUS_LINES {
            let line = self.transport.read_line();
            status_lines.push(self.check(line)?);
        }

        let mut block = [0u8; REPORT_LEN];
        let read = self.transport.read_exact(&mut block);
        self.check(read)?;

        self.state = SessionState::Ready;
        Ok(DeviceReport {
            status_lines,
            digests: frame::split_report(&block),
        })
    }

    pub fn close(&mut self) {
        if self.state != SessionState::Disconnected {
            tracing::debug!("Closing device session from {:?}", self.state);
        }
        self.state = SessionState::Disconnected;
    }

    fn require(&self, expected: SessionState) -> Result<(), IoFault> {
        if self.state != expected {
            return Err(IoFault::InvalidState {
                expected,
                actual: self.state,
            });
        }
        Ok(())
    }

    fn check<R>(&mut self, result: Result<R, IoFault>) -> Result<R, IoFault> {
        if let Err(e) = &result {
            tracing::error!("Device session fault in {:?}: {}", self.state, e);
            self.state = SessionState::Disconnected;
        }
        result
    }
}

fn settle(delay: Duration) {
    if !delay.is_zero() {
        std::thread::sleep(delay);
    }
}
