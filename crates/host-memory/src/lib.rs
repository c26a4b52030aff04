// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # host-memory
//!
//! Host buffer allocation for lazy tensor literals.
//!
//! - [`HostBuffer`]: an exclusively owned, zero-initialised byte buffer.
//!   Pooled buffers return their storage to the pool on drop.
//! - [`HostMemoryPool`]: a budget-enforced allocator with a size-class free
//!   list.
//! - [`MemoryBudget`]: a byte ceiling parsed from strings like `"512M"`.
//! - [`AllocationStats`]: request, reuse and OOM counters.
//! - [`HostMemoryConfig`]: TOML-backed pool settings.
//!
//! # Ownership Model
//!
//! ```text
//! HostMemoryPool::allocate(len)
//!       │
//!       ▼
//!   HostBuffer  ◄─── owns Vec<u8>, holds Arc<PoolShared>
//!       │
//!       │  drop()
//!       ▼
//!   PoolShared::release()  ──► free list
//! ```

mod budget;
mod buffer;
mod config;
mod error;
pub mod pool;
mod stats;

pub use budget::MemoryBudget;
pub use buffer::HostBuffer;
pub use config::HostMemoryConfig;
pub use error::MemoryError;
pub use pool::HostMemoryPool;
pub use stats::AllocationStats;
