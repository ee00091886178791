// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
pub mod config;
pub mod errors;
pub mod telemetry;
pub mod primitives;
pub mod shutdown;
pub mod events;
pub mod protocol;
pub mod trial;
pub mod verifier;
pub mod fixtures;
