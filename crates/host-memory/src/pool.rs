// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Budget-enforced pool of host byte buffers.
//!
//! [`HostMemoryPool`] hands out zeroed [`HostBuffer`]s and:
//!
//! 1. Rejects requests that would push live bytes past the budget with
//!    [`MemoryError::OutOfMemory`].
//! 2. Keeps released buffers in a free list keyed by size class (the next
//!    power of two, at least [`MIN_SIZE_CLASS`]) and recycles them.
//! 3. Records [`AllocationStats`].
//!
//! Budget reservation is a single atomic update, so concurrent callers can
//! never jointly overshoot the ceiling.

use crate::{AllocationStats, HostBuffer, MemoryBudget, MemoryError};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Smallest size class handed out by the pool: 4 KiB.
pub const MIN_SIZE_CLASS: usize = 4096;

/// State shared between a pool and every buffer it handed out.
pub(crate) struct PoolShared {
    budget: MemoryBudget,
    reuse_buffers: bool,
    live_bytes: AtomicUsize,
    cached_bytes: AtomicUsize,
    free: Mutex<HashMap<usize, Vec<Vec<u8>>>>,
    stats: Mutex<AllocationStats>,
}

impl PoolShared {
    /// Takes back the storage of a dropped [`HostBuffer`].
    pub(crate) fn release(&self, mut data: Vec<u8>, len: usize) {
        self.live_bytes.fetch_sub(len, Ordering::AcqRel);
        if let Ok(mut stats) = self.stats.lock() {
            stats.record_release();
        }
        tracing::trace!(bytes = len, "host buffer released");

        if !self.reuse_buffers {
            return;
        }
        let Some(class) = recycle_class_for(data.capacity()) else {
            return;
        };
        data.clear();
        if let Ok(mut free) = self.free.lock() {
            self.cached_bytes.fetch_add(class, Ordering::AcqRel);
            free.entry(class).or_default().push(data);
        }
    }

    fn take_cached(&self, class: usize) -> Option<Vec<u8>> {
        if !self.reuse_buffers {
            return None;
        }
        let mut free = self.free.lock().ok()?;
        let buf = free.get_mut(&class)?.pop()?;
        self.cached_bytes.fetch_sub(class, Ordering::AcqRel);
        Some(buf)
    }
}

/// Allocator for host buffers under a hard byte budget.
///
/// The pool is `Send + Sync`; share it by reference or behind an `Arc`.
///
/// # Example
/// ```
/// use host_memory::{HostMemoryPool, MemoryBudget};
///
/// let pool = HostMemoryPool::new(MemoryBudget::from_mb(1));
/// let buf = pool.allocate(24).unwrap();
/// assert_eq!(buf.len(), 24);
/// assert_eq!(pool.live_bytes(), 24);
///
/// drop(buf);
/// assert_eq!(pool.live_bytes(), 0);
/// ```
pub struct HostMemoryPool {
    shared: Arc<PoolShared>,
}

impl HostMemoryPool {
    /// Creates a pool that recycles released buffers.
    pub fn new(budget: MemoryBudget) -> Self {
        Self::with_reuse(budget, true)
    }

    /// Creates a pool, choosing whether released buffers are cached.
    pub fn with_reuse(budget: MemoryBudget, reuse_buffers: bool) -> Self {
        Self {
            shared: Arc::new(PoolShared {
                budget,
                reuse_buffers,
                live_bytes: AtomicUsize::new(0),
                cached_bytes: AtomicUsize::new(0),
                free: Mutex::new(HashMap::new()),
                stats: Mutex::new(AllocationStats::default()),
            }),
        }
    }

    /// Allocates `len` zeroed bytes.
    ///
    /// # Errors
    /// [`MemoryError::ZeroSizedAllocation`] for `len == 0`, and
    /// [`MemoryError::OutOfMemory`] when the budget cannot cover `len`.
    pub fn allocate(&self, len: usize) -> Result<HostBuffer, MemoryError> {
        if len == 0 {
            return Err(MemoryError::ZeroSizedAllocation);
        }

        let budget = self.shared.budget.as_bytes();
        let Some(class) = size_class_for(len) else {
            return Err(self.out_of_memory(len, self.live_bytes()));
        };
        let reserved = self
            .shared
            .live_bytes
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |live| {
                live.checked_add(len).filter(|&next| next <= budget)
            });
        let live_before = match reserved {
            Ok(prev) => prev,
            Err(live) => return Err(self.out_of_memory(len, live)),
        };

        let cached = self.shared.take_cached(class);
        let reused = cached.is_some();
        let mut data = cached.unwrap_or_else(|| Vec::with_capacity(class));
        data.resize(len, 0);

        if let Ok(mut stats) = self.shared.stats.lock() {
            stats.record_served(len, reused, live_before + len);
        }
        tracing::debug!(bytes = len, size_class = class, reused, "host buffer allocated");

        Ok(HostBuffer::pooled(data, Arc::clone(&self.shared)))
    }

    /// Records a rejected request and builds its error.
    fn out_of_memory(&self, len: usize, live: usize) -> MemoryError {
        let budget = self.shared.budget.as_bytes();
        if let Ok(mut stats) = self.shared.stats.lock() {
            stats.record_oom();
        }
        tracing::warn!(requested = len, live, budget, "host memory budget exhausted");
        MemoryError::OutOfMemory {
            requested_bytes: len,
            available_bytes: budget.saturating_sub(live),
            budget_bytes: budget,
        }
    }

    /// Bytes currently handed out and not yet released.
    pub fn live_bytes(&self) -> usize {
        self.shared.live_bytes.load(Ordering::Acquire)
    }

    /// Bytes that can still be allocated before hitting the budget.
    pub fn available_bytes(&self) -> usize {
        self.shared
            .budget
            .as_bytes()
            .saturating_sub(self.live_bytes())
    }

    /// Bytes parked in the free list.
    pub fn cached_bytes(&self) -> usize {
        self.shared.cached_bytes.load(Ordering::Acquire)
    }

    pub fn budget(&self) -> MemoryBudget {
        self.shared.budget
    }

    /// Snapshot of the allocation counters.
    pub fn stats(&self) -> AllocationStats {
        self.shared
            .stats
            .lock()
            .map(|s| s.clone())
            .unwrap_or_default()
    }

    /// Drops every cached buffer. Live buffers are unaffected.
    pub fn shrink(&self) {
        if let Ok(mut free) = self.shared.free.lock() {
            free.clear();
            self.shared.cached_bytes.store(0, Ordering::Release);
        }
    }
}

impl std::fmt::Debug for HostMemoryPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostMemoryPool")
            .field("budget", &self.shared.budget)
            .field("live_bytes", &self.live_bytes())
            .field("cached_bytes", &self.cached_bytes())
            .finish()
    }
}

/// Smallest power of two that is `>= size` and `>= MIN_SIZE_CLASS`, or
/// `None` if no `Vec<u8>` can have that capacity (above `isize::MAX`).
pub fn size_class_for(size: usize) -> Option<usize> {
    size.max(MIN_SIZE_CLASS)
        .checked_next_power_of_two()
        .filter(|&class| class <= isize::MAX as usize)
}

/// Largest size class a buffer of `capacity` bytes can serve without
/// reallocating, or `None` if it is below [`MIN_SIZE_CLASS`].
fn recycle_class_for(capacity: usize) -> Option<usize> {
    if capacity < MIN_SIZE_CLASS {
        return None;
    }
    if capacity.is_power_of_two() {
        Some(capacity)
    } else {
        Some(capacity.next_power_of_two() / 2)
    }
}
