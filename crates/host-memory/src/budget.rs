// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Host memory budgets.
//!
//! A [`MemoryBudget`] caps the number of bytes a [`crate::HostMemoryPool`]
//! may hand out at once. Budgets parse from the same short strings used in
//! configuration files and on the command line.

use crate::MemoryError;
use std::fmt;
use std::str::FromStr;

const KIB: usize = 1024;
const MIB: usize = 1024 * KIB;
const GIB: usize = 1024 * MIB;

/// Recognised suffixes, longest first so `"MB"` wins over `"B"`.
const SUFFIXES: &[(&str, usize)] = &[
    ("GB", GIB),
    ("MB", MIB),
    ("KB", KIB),
    ("G", GIB),
    ("M", MIB),
    ("K", KIB),
    ("B", 1),
];

/// A hard ceiling on live host buffer bytes.
///
/// # Examples
/// ```
/// use host_memory::MemoryBudget;
///
/// let b = MemoryBudget::parse("64M").unwrap();
/// assert_eq!(b.as_bytes(), 64 * 1024 * 1024);
/// assert_eq!(b.to_string(), "64 MB");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MemoryBudget {
    bytes: usize,
}

impl MemoryBudget {
    /// Creates a budget from a byte count.
    pub fn from_bytes(bytes: usize) -> Self {
        Self { bytes }
    }

    /// Creates a budget from kibibytes.
    pub fn from_kb(kb: usize) -> Self {
        Self { bytes: kb * KIB }
    }

    /// Creates a budget from mebibytes.
    pub fn from_mb(mb: usize) -> Self {
        Self { bytes: mb * MIB }
    }

    /// Creates a budget from gibibytes.
    pub fn from_gb(gb: usize) -> Self {
        Self { bytes: gb * GIB }
    }

    /// Returns the budget in bytes.
    pub fn as_bytes(&self) -> usize {
        self.bytes
    }

    /// Returns the budget in mebibytes (truncated).
    pub fn as_mb(&self) -> usize {
        self.bytes / MIB
    }

    /// Parses a budget such as `"512M"`, `"1GB"`, `"64k"` or `"4096"`.
    ///
    /// Suffixes are case-insensitive and binary (`K` = 1024). A bare number
    /// is a byte count. Zero budgets are rejected.
    pub fn parse(input: &str) -> Result<Self, MemoryError> {
        let invalid = |detail: &str| MemoryError::InvalidBudget {
            input: input.to_string(),
            detail: detail.to_string(),
        };

        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(invalid("empty string"));
        }

        let upper = trimmed.to_ascii_uppercase();
        let (digits, multiplier) = SUFFIXES
            .iter()
            .find_map(|(suffix, mult)| {
                upper
                    .strip_suffix(suffix)
                    .map(|rest| (rest.trim_end(), *mult))
            })
            .unwrap_or((upper.as_str(), 1));

        let value: usize = digits
            .parse()
            .map_err(|_| invalid("expected a number with an optional K, M or G suffix"))?;
        let bytes = value
            .checked_mul(multiplier)
            .ok_or_else(|| invalid("budget overflows usize"))?;
        if bytes == 0 {
            return Err(invalid("budget must be greater than zero"));
        }

        Ok(Self { bytes })
    }
}

impl FromStr for MemoryBudget {
    type Err = MemoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for MemoryBudget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let b = self.bytes;
        if b >= GIB && b % GIB == 0 {
            write!(f, "{} GB", b / GIB)
        } else if b >= MIB && b % MIB == 0 {
            write!(f, "{} MB", b / MIB)
        } else if b >= KIB && b % KIB == 0 {
            write!(f, "{} KB", b / KIB)
        } else {
            write!(f, "{b} B")
        }
    }
}
