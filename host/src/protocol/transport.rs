// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use std::io::{BufRead, BufReader, ErrorKind, Read, Write};
use std::time::Duration;

use serialport::SerialPort;

use super::IoFault;

/// Byte-oriented duplex link to the device.
pub trait Transport {
    fn write_all(&mut self, bytes: &[u8]) -> Result<(), IoFault>;

    /// One newline-terminated line, newline included.
    fn read_line(&mut self) -> Result<Vec<u8>, IoFault>;

    /// Fill `buf` completely or fail. Never returns a partial buffer.
    fn read_exact(&mut self, buf: &mut [u8]) -> Result<(), IoFault>;
}

/// [`Transport`] over any blocking byte stream.
pub struct StreamTransport<S: Read + Write> {
    inner: BufReader<S>,
}

pub type SerialTransport = StreamTransport<Box<dyn SerialPort>>;

impl<S: Read + Write> StreamTransport<S> {
    pub fn new(stream: S) -> Self {
        Self {
            inner: BufReader::new(stream),
        }
    }
}

impl<S: Read + Write> Transport for StreamTransport<S> {
    fn write_all(&mut self, bytes: &[u8]) -> Result<(), IoFault> {
        let stream = self.inner.get_mut();
        stream.write_all(bytes)?;
        stream.flush()?;
        Ok(())
    }

    fn read_line(&mut self) -> Result<Vec<u8>, IoFault> {
        let mut line = Vec::new();
        let n = self.inner.read_until(b'\n', &mut line)?;
        if n == 0 {
            return Err(IoFault::ConnectionClosed);
        }
        if line.last() != Some(&b'\n') {
            return Err(IoFault::TruncatedLine { received: n });
        }
        Ok(line)
    }

    fn read_exact(&mut self, buf: &mut [u8]) -> Result<(), IoFault> {
        let mut filled = 0;
        while filled < buf.len() {
            match self.inner.read(&mut buf[filled..]) {
                Ok(0) => {
                    return Err(IoFault::ShortRead {
                        expected: buf.len(),
                        received: filled,
                    })
                }
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }
}

/// Open a serial device. Reads that stall longer than `timeout` fail with
/// [`IoFault::Timeout`].
pub fn open_serial(path: &str, baud_rate: u32, timeout: Duration) -> Result<SerialTransport, IoFault> {
    let port = serialport::new(path, baud_rate)
        .timeout(timeout)
        .open()
        .map_err(|source| IoFault::Open {
            path: path.to_string(),
            source,
        })?;

    tracing::info!("Opened serial device {} at {} baud", path, baud_rate);
    Ok(StreamTransport::new(port))
}
