// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Element types of array shapes.

use crate::ShapeError;
use std::fmt;
use std::str::FromStr;

/// The scalar element type of an array [`crate::Shape`].
///
/// Determines the byte width of every element in a literal's buffer.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ScalarType {
    /// Boolean predicate, one byte per element.
    Pred,
    U8,
    S8,
    S16,
    S32,
    S64,
    /// IEEE 754 half precision.
    F16,
    /// Brain floating point.
    BF16,
    F32,
    F64,
}

impl ScalarType {
    /// Every supported scalar type.
    pub const ALL: [ScalarType; 10] = [
        ScalarType::Pred,
        ScalarType::U8,
        ScalarType::S8,
        ScalarType::S16,
        ScalarType::S32,
        ScalarType::S64,
        ScalarType::F16,
        ScalarType::BF16,
        ScalarType::F32,
        ScalarType::F64,
    ];

    /// Size of one element in bytes.
    pub fn size_bytes(self) -> usize {
        match self {
            ScalarType::Pred | ScalarType::U8 | ScalarType::S8 => 1,
            ScalarType::S16 | ScalarType::F16 | ScalarType::BF16 => 2,
            ScalarType::S32 | ScalarType::F32 => 4,
            ScalarType::S64 | ScalarType::F64 => 8,
        }
    }

    /// Short name used in shape strings, e.g. `f32` in `f32[2,3]`.
    pub fn as_str(self) -> &'static str {
        match self {
            ScalarType::Pred => "pred",
            ScalarType::U8 => "u8",
            ScalarType::S8 => "s8",
            ScalarType::S16 => "s16",
            ScalarType::S32 => "s32",
            ScalarType::S64 => "s64",
            ScalarType::F16 => "f16",
            ScalarType::BF16 => "bf16",
            ScalarType::F32 => "f32",
            ScalarType::F64 => "f64",
        }
    }
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScalarType {
    type Err = ShapeError;

    /// Accepts the short names plus the `bool` and `iN` aliases.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let ty = match s.trim().to_ascii_lowercase().as_str() {
            "pred" | "bool" => ScalarType::Pred,
            "u8" => ScalarType::U8,
            "s8" | "i8" => ScalarType::S8,
            "s16" | "i16" => ScalarType::S16,
            "s32" | "i32" => ScalarType::S32,
            "s64" | "i64" => ScalarType::S64,
            "f16" => ScalarType::F16,
            "bf16" => ScalarType::BF16,
            "f32" => ScalarType::F32,
            "f64" => ScalarType::F64,
            _ => return Err(ShapeError::UnknownScalarType(s.to_string())),
        };
        Ok(ty)
    }
}
