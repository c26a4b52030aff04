// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Allocation counters for a [`crate::HostMemoryPool`].

/// Cumulative counters describing how a pool has been used.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct AllocationStats {
    /// Allocation requests, including those rejected by the budget.
    pub requests: u64,
    /// Requests served by recycling a cached buffer.
    pub reused: u64,
    /// Requests that needed a fresh heap allocation.
    pub fresh: u64,
    /// Requests rejected because the budget was exhausted.
    pub oom_count: u64,
    /// Buffers handed back to the pool.
    pub releases: u64,
    /// High-water mark of live bytes.
    pub peak_live_bytes: usize,
    /// Sum of all bytes ever handed out.
    pub total_bytes_served: u64,
}

impl AllocationStats {
    /// Fraction of successful allocations served from the free list.
    pub fn reuse_ratio(&self) -> f64 {
        let served = self.reused + self.fresh;
        if served == 0 {
            return 0.0;
        }
        self.reused as f64 / served as f64
    }

    /// Buffers currently handed out and not yet released.
    pub fn outstanding(&self) -> u64 {
        (self.reused + self.fresh).saturating_sub(self.releases)
    }

    pub(crate) fn record_served(&mut self, bytes: usize, reused: bool, live_bytes: usize) {
        self.requests += 1;
        if reused {
            self.reused += 1;
        } else {
            self.fresh += 1;
        }
        self.total_bytes_served += bytes as u64;
        self.peak_live_bytes = self.peak_live_bytes.max(live_bytes);
    }

    pub(crate) fn record_oom(&mut self) {
        self.requests += 1;
        self.oom_count += 1;
    }

    pub(crate) fn record_release(&mut self) {
        self.releases += 1;
    }

    /// One-line human-readable summary.
    pub fn summary(&self) -> String {
        format!(
            "{} requests ({} reused, {} fresh, {:.0}% reuse), {} rejected, \
             {} released, peak {} bytes",
            self.requests,
            self.reused,
            self.fresh,
            self.reuse_ratio() * 100.0,
            self.oom_count,
            self.releases,
            self.peak_live_bytes,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_empty() {
        let s = AllocationStats::default();
        assert_eq!(s.requests, 0);
        assert_eq!(s.reuse_ratio(), 0.0);
        assert_eq!(s.outstanding(), 0);
    }

    #[test]
    fn test_reuse_ratio() {
        let mut s = AllocationStats::default();
        s.record_served(64, false, 64);
        s.record_served(64, true, 128);
        s.record_served(64, true, 192);
        assert!((s.reuse_ratio() - 2.0 / 3.0).abs() < 1e-9);
        assert_eq!(s.total_bytes_served, 192);
    }

    #[test]
    fn test_peak_never_decreases() {
        let mut s = AllocationStats::default();
        s.record_served(10, false, 300);
        s.record_served(10, false, 100);
        assert_eq!(s.peak_live_bytes, 300);
    }

    #[test]
    fn test_oom_counts_as_request() {
        let mut s = AllocationStats::default();
        s.record_oom();
        assert_eq!(s.requests, 1);
        assert_eq!(s.oom_count, 1);
        assert_eq!(s.outstanding(), 0);
    }

    #[test]
    fn test_summary() {
        let mut s = AllocationStats::default();
        s.record_served(24, false, 24);
        s.record_release();
        let text = s.summary();
        assert!(text.contains("1 requests"));
        assert!(text.contains("1 fresh"));
        assert!(text.contains("1 released"));
    }
}
