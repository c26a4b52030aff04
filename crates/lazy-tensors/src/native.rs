// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Rust types that can be stored in a literal's buffer.

use crate::ScalarType;
use half::{bf16, f16};
use std::fmt;

/// A Rust value type matching exactly one [`ScalarType`].
///
/// Values are stored little-endian, `SCALAR_TYPE.size_bytes()` bytes each.
pub trait NativeType: Copy + PartialEq + fmt::Debug + Send + Sync + 'static {
    /// The element type this Rust type corresponds to.
    const SCALAR_TYPE: ScalarType;

    /// Encodes `self` into `out`, which is exactly one element wide.
    fn write_le(self, out: &mut [u8]);

    /// Decodes one element from `bytes`.
    fn read_le(bytes: &[u8]) -> Self;
}

macro_rules! impl_native_type {
    ($($ty:ty => $scalar:ident),* $(,)?) => {
        $(
            impl NativeType for $ty {
                const SCALAR_TYPE: ScalarType = ScalarType::$scalar;

                #[inline]
                fn write_le(self, out: &mut [u8]) {
                    out.copy_from_slice(&self.to_le_bytes());
                }

                #[inline]
                fn read_le(bytes: &[u8]) -> Self {
                    let mut raw = [0u8; std::mem::size_of::<$ty>()];
                    raw.copy_from_slice(bytes);
                    <$ty>::from_le_bytes(raw)
                }
            }
        )*
    };
}

impl_native_type! {
    u8 => U8,
    i8 => S8,
    i16 => S16,
    i32 => S32,
    i64 => S64,
    f16 => F16,
    bf16 => BF16,
    f32 => F32,
    f64 => F64,
}

impl NativeType for bool {
    const SCALAR_TYPE: ScalarType = ScalarType::Pred;

    #[inline]
    fn write_le(self, out: &mut [u8]) {
        out[0] = u8::from(self);
    }

    #[inline]
    fn read_le(bytes: &[u8]) -> Self {
        bytes[0] != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roundtrip<T: NativeType>(value: T) -> T {
        let mut buf = vec![0u8; T::SCALAR_TYPE.size_bytes()];
        value.write_le(&mut buf);
        T::read_le(&buf)
    }

    #[test]
    fn test_widths_match_scalar_types() {
        assert_eq!(std::mem::size_of::<f16>(), f16::SCALAR_TYPE.size_bytes());
        assert_eq!(std::mem::size_of::<bf16>(), bf16::SCALAR_TYPE.size_bytes());
        assert_eq!(std::mem::size_of::<i64>(), i64::SCALAR_TYPE.size_bytes());
    }

    #[test]
    fn test_little_endian_layout() {
        let mut buf = [0u8; 4];
        0x0403_0201i32.write_le(&mut buf);
        assert_eq!(buf, [1, 2, 3, 4]);
    }

    #[test]
    fn test_values_survive_encoding() {
        assert_eq!(roundtrip(-7i8), -7);
        assert_eq!(roundtrip(1.5f32), 1.5);
        assert_eq!(roundtrip(f16::from_f32(0.25)), f16::from_f32(0.25));
        assert!(roundtrip(true));
    }

    #[test]
    fn test_nonzero_byte_reads_as_true() {
        assert!(bool::read_le(&[0x7f]));
        assert!(!bool::read_le(&[0]));
    }
}
