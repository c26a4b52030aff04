// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Subcommand implementations and shared helpers.

pub mod alloc;
pub mod hash;
pub mod inspect;

use lazy_tensors::Shape;
use tracing_subscriber::EnvFilter;

/// Installs a `tracing` subscriber; `RUST_LOG` wins over `-v` flags.
pub fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(verbose > 1)
        .init();
}

/// Parses a shape argument.
pub fn parse_shape(text: &str) -> anyhow::Result<Shape> {
    text.parse()
        .map_err(|e| anyhow::anyhow!("cannot parse shape '{text}': {e}"))
}
