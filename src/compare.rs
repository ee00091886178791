// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Per-trial comparison of the expected digest against the three device reports.

use crate::types::Digest;
use core::fmt;

/// Reporting channel on the device. Reports arrive in this order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Channel {
    A,
    B,
    C,
}

impl Channel {
    pub const ALL: [Channel; 3] = [Channel::A, Channel::B, Channel::C];

    pub fn label(&self) -> &'static str {
        match self {
            Channel::A => "A",
            Channel::B => "B",
            Channel::C => "C",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Comparison {
    Match,
    Mismatch { differing_bits: u32 },
}

impl Comparison {
    pub fn of(expected: &Digest, reported: &Digest) -> Self {
        match expected.bit_distance(reported) {
            0 => Comparison::Match,
            differing_bits => Comparison::Mismatch { differing_bits },
        }
    }

    pub fn is_match(&self) -> bool {
        matches!(self, Comparison::Match)
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Comparison::Match => f.write_str("match"),
            Comparison::Mismatch { differing_bits } => {
                write!(f, "MISMATCH({} bits)", differing_bits)
            }
        }
    }
}

/// Outcome of one trial: each channel judged independently.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Verdict {
    pub a: Comparison,
    pub b: Comparison,
    pub c: Comparison,
}

impl Verdict {
    pub fn compare(expected: &Digest, reported: &[Digest; 3]) -> Self {
        Self {
            a: Comparison::of(expected, &reported[0]),
            b: Comparison::of(expected, &reported[1]),
            c: Comparison::of(expected, &reported[2]),
        }
    }

    pub fn get(&self, channel: Channel) -> Comparison {
        match channel {
            Channel::A => self.a,
            Channel::B => self.b,
            Channel::C => self.c,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Channel, Comparison)> + '_ {
        Channel::ALL.into_iter().map(move |ch| (ch, self.get(ch)))
    }

    /// True when all three channels agree with the expected digest.
    pub fn is_match(&self) -> bool {
        self.a.is_match() && self.b.is_match() && self.c.is_match()
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "A={} B={} C={}", self.a, self.b, self.c)
    }
}
