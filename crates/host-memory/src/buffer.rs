// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Exclusively owned host byte buffers.
//!
//! A [`HostBuffer`] either owns plain heap memory or was drawn from a
//! [`HostMemoryPool`](crate::HostMemoryPool). Pooled buffers hand their
//! storage back to the pool when dropped; the borrow checker rules out any
//! access after that point.

use crate::pool::PoolShared;
use std::sync::Arc;

/// An owned, zero-initialised byte buffer.
///
/// Cloning a buffer always produces an unpooled deep copy, so two buffers
/// never share storage and the pool budget only ever covers buffers the pool
/// itself handed out.
pub struct HostBuffer {
    data: Vec<u8>,
    origin: Option<Arc<PoolShared>>,
}

impl HostBuffer {
    /// Allocates `len` zeroed bytes on the heap, outside any pool.
    pub fn unpooled(len: usize) -> Self {
        Self {
            data: vec![0u8; len],
            origin: None,
        }
    }

    /// Wraps an existing vector without copying it.
    pub fn from_vec(data: Vec<u8>) -> Self {
        Self { data, origin: None }
    }

    pub(crate) fn pooled(data: Vec<u8>, origin: Arc<PoolShared>) -> Self {
        Self {
            data,
            origin: Some(origin),
        }
    }

    /// Length of the buffer in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` for a zero-length buffer.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns `true` if dropping this buffer returns memory to a pool.
    pub fn is_pooled(&self) -> bool {
        self.origin.is_some()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.data
    }
}

impl Clone for HostBuffer {
    fn clone(&self) -> Self {
        Self::from_vec(self.data.clone())
    }
}

impl Drop for HostBuffer {
    fn drop(&mut self) {
        if let Some(pool) = self.origin.take() {
            let len = self.data.len();
            pool.release(std::mem::take(&mut self.data), len);
        }
    }
}

impl std::fmt::Debug for HostBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostBuffer")
            .field("len", &self.data.len())
            .field("pooled", &self.is_pooled())
            .finish()
    }
}
