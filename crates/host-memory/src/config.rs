// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Pool configuration loaded from TOML files or built programmatically.
//!
//! # TOML Format
//! ```toml
//! memory_budget = "512M"
//! reuse_buffers = true
//! ```

use crate::{HostMemoryPool, MemoryBudget, MemoryError};
use std::path::Path;

/// Settings for a [`HostMemoryPool`].
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct HostMemoryConfig {
    /// Budget string, e.g. `"512M"`.
    pub memory_budget: String,
    /// Whether released buffers are kept for reuse.
    #[serde(default = "default_true")]
    pub reuse_buffers: bool,
}

fn default_true() -> bool {
    true
}

impl HostMemoryConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, MemoryError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            MemoryError::Config(format!("cannot read config '{}': {e}", path.display()))
        })?;
        Self::from_toml(&content)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, MemoryError> {
        toml::from_str(toml_str).map_err(|e| MemoryError::Config(format!("TOML parse error: {e}")))
    }

    /// Serialises configuration to TOML.
    pub fn to_toml(&self) -> Result<String, MemoryError> {
        toml::to_string_pretty(self)
            .map_err(|e| MemoryError::Config(format!("TOML serialise error: {e}")))
    }

    /// Parses [`memory_budget`](Self::memory_budget).
    pub fn parse_budget(&self) -> Result<MemoryBudget, MemoryError> {
        MemoryBudget::parse(&self.memory_budget)
    }

    /// Builds a pool with these settings.
    pub fn build_pool(&self) -> Result<HostMemoryPool, MemoryError> {
        let budget = self.parse_budget()?;
        tracing::debug!(%budget, reuse = self.reuse_buffers, "building host memory pool");
        Ok(HostMemoryPool::with_reuse(budget, self.reuse_buffers))
    }
}

impl Default for HostMemoryConfig {
    fn default() -> Self {
        Self {
            memory_budget: "512M".to_string(),
            reuse_buffers: true,
        }
    }
}
