// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Timestamped Event Log
//!
//! Every protocol event becomes one line:
//! ```text
//! <seconds since harness start> <message>
//! ```
//! Each line goes to the log file and is mirrored to the console.
//! Both are flushed before `record` returns, so a crash never loses
//! a line that was reported as written.

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Stdout, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LogFault {
    #[error("cannot open event log {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, LogFault>;

/// Append-only, line-oriented record of harness events.
pub trait EventSink {
    fn record(&mut self, message: &str) -> Result<()>;
}

impl<S: EventSink + ?Sized> EventSink for &mut S {
    fn record(&mut self, message: &str) -> Result<()> {
        (**self).record(message)
    }
}

/// Writes each event to a file and to the console.
pub struct TeeLog<F: Write, C: Write> {
    file: F,
    console: C,
    started: Instant,
    lines: u64,
}

impl TeeLog<BufWriter<File>, Stdout> {
    /// Open the log file and mirror to stdout.
    ///
    /// Truncates an existing file unless `append` is set.
    pub fn open(path: impl AsRef<Path>, append: bool) -> Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .append(append)
            .truncate(!append)
            .open(path)
            .map_err(|source| LogFault::Open {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(Self::new(BufWriter::new(file), io::stdout()))
    }
}

impl<F: Write, C: Write> TeeLog<F, C> {
    pub fn new(file: F, console: C) -> Self {
        Self::with_start(file, console, Instant::now())
    }

    /// Timestamps are measured from `started` rather than from construction.
    pub fn with_start(file: F, console: C, started: Instant) -> Self {
        Self {
            file,
            console,
            started,
            lines: 0,
        }
    }

    pub fn lines_written(&self) -> u64 {
        self.lines
    }

    pub fn into_parts(self) -> (F, C) {
        (self.file, self.console)
    }
}

impl<F: Write, C: Write> EventSink for TeeLog<F, C> {
    fn record(&mut self, message: &str) -> Result<()> {
        let elapsed = self.started.elapsed().as_secs_f64();
        let line = format!("{} {}\n", elapsed, message);

        self.file.write_all(line.as_bytes())?;
        self.file.flush()?;

        self.console.write_all(line.as_bytes())?;
        self.console.flush()?;

        self.lines += 1;
        Ok(())
    }
}

/// Render a raw device line for the log on a single line.
///
/// Nothing is dropped: the terminator shows up escaped (`\r\n`), as does
/// every other non-printable byte, so a missing or doubled terminator is
/// visible in the log.
pub fn escape_line(raw: &[u8]) -> String {
    raw.escape_ascii().to_string()
}
