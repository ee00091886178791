// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use thiserror::Error;
use hashcheck_kernel::error::ChainError;

use crate::events::LogFault;
use crate::protocol::IoFault;

/// Any fault that terminates the verification loop.
///
/// Divergent digests are not errors; they are recorded in the verdict.
#[derive(Error, Debug)]
pub enum HarnessError {
    #[error("Digest fault: {0}")]
    Digest(#[from] ChainError),
    #[error("Device I/O fault: {0}")]
    Io(#[from] IoFault),
    #[error("Event log fault: {0}")]
    Log(#[from] LogFault),
    #[error("Digest backend unavailable: {0}")]
    Backend(String),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, HarnessError>;
