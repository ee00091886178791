// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
#![no_std]

//! hashcheck-kernel: deterministic reference hash chain and verdict logic
//! for checking a device-side hash implementation.

#[cfg(any(test, feature = "std"))]
#[macro_use]
extern crate std;

pub mod config;
pub mod error;
pub mod types;
pub mod primitive;
pub mod chain;
pub mod compare;

#[cfg(test)]
pub mod tests;
