// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `ltc alloc` command: materialize a shape's leaves as pooled literals.
//!
//! Tuple shapes are never turned into a single literal; each array leaf gets
//! its own. Running out of budget is reported as an error.

use host_memory::HostMemoryConfig;
use lazy_tensors::{shape_util, Literal};
use std::path::Path;

pub fn execute(
    config_path: Option<&Path>,
    text: &str,
    budget: Option<String>,
    no_reuse: bool,
    rounds: usize,
) -> anyhow::Result<()> {
    let mut config = match config_path {
        Some(path) => HostMemoryConfig::from_file(path)?,
        None => HostMemoryConfig::default(),
    };
    if let Some(budget) = budget {
        config.memory_budget = budget;
    }
    if no_reuse {
        config.reuse_buffers = false;
    }

    let pool = config.build_pool()?;
    let shape = super::parse_shape(text)?;
    let leaves = shape_util::leaf_shapes(&shape);

    println!("  Shape:   {shape}");
    println!("  Budget:  {}", pool.budget());
    println!("  Reuse:   {}", config.reuse_buffers);
    println!();

    for round in 1..=rounds.max(1) {
        let mut literals = Vec::with_capacity(leaves.len());
        for leaf in &leaves {
            let literal = Literal::new_in(leaf, &pool).map_err(|e| {
                anyhow::anyhow!("round {round}: cannot materialize {leaf}: {e}")
            })?;
            literals.push(literal);
        }
        tracing::info!(
            round,
            literals = literals.len(),
            live_bytes = pool.live_bytes(),
            "round complete"
        );

        if round == 1 {
            for literal in &literals {
                println!(
                    "   {:<24} {:>12} bytes  hash {:016x}",
                    literal.shape().to_string(),
                    literal.size_bytes(),
                    literal.hash(),
                );
            }
            println!();
        }
    }

    println!("  Pool:    {}", pool.stats().summary());
    println!("  Live:    {} bytes", pool.live_bytes());
    println!("  Cached:  {} bytes", pool.cached_bytes());

    Ok(())
}
