// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Host-resident dense tensors: the storage behind a [`crate::Literal`].

use crate::{lt_check, lt_check_eq, LiteralError, NativeType, ScalarType};
use host_memory::{HostBuffer, HostMemoryPool, MemoryError};

/// An owned, dense, row-major host tensor.
///
/// The buffer is exactly `product(sizes) * scalar_type.size_bytes()` bytes.
/// Freshly allocated tensors are zero-filled, but callers should treat the
/// contents as unspecified until they write them.
///
/// Typed accessors check that `T` matches the scalar type; a mismatch is a
/// fatal contract violation, like the index and length checks.
#[derive(Debug, Clone)]
pub struct HostTensor {
    sizes: Vec<i64>,
    scalar_type: ScalarType,
    buffer: HostBuffer,
}

impl HostTensor {
    /// Allocates a heap tensor with the given extents and scalar type.
    ///
    /// # Examples
    /// ```
    /// use lazy_tensors::{HostTensor, ScalarType};
    ///
    /// let t = HostTensor::empty(&[2, 3], ScalarType::F32);
    /// assert_eq!(t.numel(), 6);
    /// assert_eq!(t.size_bytes(), 24);
    /// ```
    pub fn empty(sizes: &[i64], scalar_type: ScalarType) -> Self {
        let bytes = dense_byte_len(sizes, scalar_type);
        tracing::trace!(?sizes, %scalar_type, bytes, "allocating heap tensor");
        Self {
            sizes: sizes.to_vec(),
            scalar_type,
            buffer: HostBuffer::unpooled(bytes),
        }
    }

    /// Allocates a tensor from `pool`.
    ///
    /// Zero-byte tensors never touch the pool.
    ///
    /// # Errors
    /// Returns [`LiteralError::Memory`] when the pool budget is exhausted,
    /// including when the byte size does not even fit in `usize`.
    pub fn empty_in(
        sizes: &[i64],
        scalar_type: ScalarType,
        pool: &HostMemoryPool,
    ) -> Result<Self, LiteralError> {
        let Some(bytes) = checked_byte_len(sizes, scalar_type) else {
            tracing::warn!(?sizes, %scalar_type, "tensor size overflows usize");
            return Err(MemoryError::OutOfMemory {
                requested_bytes: usize::MAX,
                available_bytes: pool.available_bytes(),
                budget_bytes: pool.budget().as_bytes(),
            }
            .into());
        };
        let buffer = if bytes == 0 {
            HostBuffer::unpooled(0)
        } else {
            pool.allocate(bytes)?
        };
        Ok(Self {
            sizes: sizes.to_vec(),
            scalar_type,
            buffer,
        })
    }

    /// Builds a tensor holding `values` in row-major order.
    ///
    /// # Errors
    /// Returns [`LiteralError::BufferSizeMismatch`] if `values.len()` is not
    /// the element count implied by `sizes`.
    pub fn from_values<T: NativeType>(sizes: &[i64], values: &[T]) -> Result<Self, LiteralError> {
        let width = T::SCALAR_TYPE.size_bytes();
        let expected = dense_byte_len(sizes, T::SCALAR_TYPE);
        let actual = values.len() * width;
        if expected != actual {
            return Err(LiteralError::BufferSizeMismatch { expected, actual });
        }
        let mut data = vec![0u8; actual];
        for (chunk, &v) in data.chunks_exact_mut(width).zip(values) {
            v.write_le(chunk);
        }
        Ok(Self {
            sizes: sizes.to_vec(),
            scalar_type: T::SCALAR_TYPE,
            buffer: HostBuffer::from_vec(data),
        })
    }

    /// Wraps raw little-endian bytes.
    ///
    /// # Errors
    /// Returns [`LiteralError::BufferSizeMismatch`] if `data` has the wrong length.
    pub fn from_bytes(
        sizes: &[i64],
        scalar_type: ScalarType,
        data: Vec<u8>,
    ) -> Result<Self, LiteralError> {
        let expected = dense_byte_len(sizes, scalar_type);
        if data.len() != expected {
            return Err(LiteralError::BufferSizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            sizes: sizes.to_vec(),
            scalar_type,
            buffer: HostBuffer::from_vec(data),
        })
    }

    pub fn sizes(&self) -> &[i64] {
        &self.sizes
    }

    pub fn scalar_type(&self) -> ScalarType {
        self.scalar_type
    }

    pub fn rank(&self) -> usize {
        self.sizes.len()
    }

    /// Number of elements.
    pub fn numel(&self) -> usize {
        self.buffer.len() / self.scalar_type.size_bytes()
    }

    /// Buffer length in bytes.
    pub fn size_bytes(&self) -> usize {
        self.buffer.len()
    }

    /// Returns `true` if the buffer came from a [`HostMemoryPool`].
    pub fn is_pooled(&self) -> bool {
        self.buffer.is_pooled()
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.buffer.as_slice()
    }

    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        self.buffer.as_mut_slice()
    }

    /// Row-major offset, in elements, of a multi-dimensional index.
    pub fn linear_index(&self, index: &[i64]) -> usize {
        lt_check_eq!(index.len(), self.sizes.len());
        let mut offset = 0usize;
        for (axis, (&i, &extent)) in index.iter().zip(&self.sizes).enumerate() {
            lt_check!(
                (0..extent).contains(&i),
                "index {i} out of range for axis {axis} of extent {extent}"
            );
            offset = offset * extent as usize + i as usize;
        }
        offset
    }

    /// Reads the element at flat position `offset`.
    pub fn get<T: NativeType>(&self, offset: usize) -> T {
        let range = self.element_range::<T>(offset);
        T::read_le(&self.buffer.as_slice()[range])
    }

    /// Writes the element at flat position `offset`.
    pub fn set<T: NativeType>(&mut self, offset: usize, value: T) {
        let range = self.element_range::<T>(offset);
        value.write_le(&mut self.buffer.as_mut_slice()[range]);
    }

    /// Copies every element out in row-major order.
    pub fn to_vec<T: NativeType>(&self) -> Vec<T> {
        self.check_type::<T>();
        self.buffer
            .as_slice()
            .chunks_exact(T::SCALAR_TYPE.size_bytes())
            .map(T::read_le)
            .collect()
    }

    /// Overwrites every element with `values`, which must cover the tensor.
    pub fn copy_from<T: NativeType>(&mut self, values: &[T]) {
        self.check_type::<T>();
        lt_check_eq!(values.len(), self.numel());
        let width = T::SCALAR_TYPE.size_bytes();
        for (chunk, &v) in self.buffer.as_mut_slice().chunks_exact_mut(width).zip(values) {
            v.write_le(chunk);
        }
    }

    /// Sets every element to `value`.
    pub fn fill<T: NativeType>(&mut self, value: T) {
        self.check_type::<T>();
        let width = T::SCALAR_TYPE.size_bytes();
        for chunk in self.buffer.as_mut_slice().chunks_exact_mut(width) {
            value.write_le(chunk);
        }
    }

    fn check_type<T: NativeType>(&self) {
        lt_check!(
            T::SCALAR_TYPE == self.scalar_type,
            "accessing {} tensor as {}",
            self.scalar_type,
            T::SCALAR_TYPE
        );
    }

    fn element_range<T: NativeType>(&self, offset: usize) -> std::ops::Range<usize> {
        self.check_type::<T>();
        lt_check!(
            offset < self.numel(),
            "element {offset} out of range for {} elements",
            self.numel()
        );
        let width = T::SCALAR_TYPE.size_bytes();
        offset * width..(offset + 1) * width
    }
}

/// Dense byte length of `sizes` elements of `scalar_type`. Fatal on negative
/// extents or overflow.
fn dense_byte_len(sizes: &[i64], scalar_type: ScalarType) -> usize {
    checked_byte_len(sizes, scalar_type).unwrap_or_else(|| {
        crate::lt_fatal!("Check failed: byte size of {scalar_type}{sizes:?} overflows")
    })
}

/// Dense byte length, or `None` if it does not fit in `usize`. Fatal on
/// negative extents.
fn checked_byte_len(sizes: &[i64], scalar_type: ScalarType) -> Option<usize> {
    lt_check!(
        sizes.iter().all(|&d| d >= 0),
        "invalid extents {sizes:?} for {scalar_type} tensor"
    );
    sizes.iter().try_fold(scalar_type.size_bytes(), |acc, &d| {
        usize::try_from(d).ok().and_then(|d| acc.checked_mul(d))
    })
}
