// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Device Session Protocol
//!
//! - `frame`: wire constants and pure encode/split functions
//! - `transport`: byte-stream primitives (write, read line, read N bytes)
//! - `session`: the per-connection state machine driving a transport

use std::io;
use thiserror::Error;

pub mod frame;
pub mod session;
pub mod transport;

pub use frame::{DeviceReport, HANDSHAKE_COMMAND, REPORT_LEN, STATUS_LINES};
pub use session::{DeviceSession, SessionState};
pub use transport::{open_serial, SerialTransport, StreamTransport, Transport};

/// Transport or framing failure. Always fatal to the session: the stream
/// offers no way to resynchronize once a read comes up short.
#[derive(Error, Debug)]
pub enum IoFault {
    #[error("IO error: {0}")]
    Io(#[source] io::Error),

    #[error("read timed out")]
    Timeout,

    #[error("device closed the connection")]
    ConnectionClosed,

    #[error("line truncated: connection closed after {received} bytes without newline")]
    TruncatedLine { received: usize },

    #[error("short read: expected {expected} bytes, received {received}")]
    ShortRead { expected: usize, received: usize },

    #[error("cannot open serial device {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: serialport::Error,
    },

    #[error("session is {actual:?}, operation requires {expected:?}")]
    InvalidState {
        expected: SessionState,
        actual: SessionState,
    },
}

impl From<io::Error> for IoFault {
    fn from(e: io::Error) -> Self {
        match e.kind() {
            io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock => IoFault::Timeout,
            io::ErrorKind::UnexpectedEof | io::ErrorKind::BrokenPipe => IoFault::ConnectionClosed,
            _ => IoFault::Io(e),
        }
    }
}
