// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
pub mod event_log;

pub use event_log::{escape_line, EventSink, LogFault, TeeLog};
