// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Interrupt handling around the blocking verification loop.
//!
//! The first interrupt cancels the token and lets the in-flight trial finish.
//! A second interrupt gives up on the loop, for a device that never answers.

use std::future::Future;

use tokio::task::{JoinError, JoinHandle};
use tokio_util::sync::CancellationToken;

#[derive(Debug)]
pub enum Supervision<T> {
    /// The loop returned (or panicked) on its own.
    Finished(Result<T, JoinError>),
    /// A second interrupt arrived before the loop returned.
    Aborted,
}

/// Exit status used when the loop is abandoned on a repeated interrupt.
pub const ABORT_EXIT_CODE: i32 = 130;

pub async fn supervise<T, I, Fut>(
    mut handle: JoinHandle<T>,
    cancel: &CancellationToken,
    mut interrupt: I,
) -> Supervision<T>
where
    I: FnMut() -> Fut,
    Fut: Future<Output = ()>,
{
    tokio::select! {
        res = &mut handle => return Supervision::Finished(res),
        _ = interrupt() => {
            tracing::info!("Interrupt received. Finishing current trial (interrupt again to abort)...");
            cancel.cancel();
        }
    }

    tokio::select! {
        res = &mut handle => Supervision::Finished(res),
        _ = interrupt() => {
            tracing::warn!("Second interrupt received. Abandoning the in-flight trial");
            Supervision::Aborted
        }
    }
}
