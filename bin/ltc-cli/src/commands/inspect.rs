// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `ltc inspect` command: describe a shape and each of its array leaves.

use lazy_tensors::{shape_util, Shape};

#[derive(Debug, serde::Serialize)]
struct ShapeReport {
    shape: String,
    kind: &'static str,
    hash: String,
    leaves: Vec<LeafReport>,
    total_bytes: usize,
}

#[derive(Debug, serde::Serialize)]
struct LeafReport {
    shape: String,
    scalar_type: String,
    rank: usize,
    elements: i64,
    bytes: usize,
    hash: String,
}

fn leaf_report(leaf: &Shape) -> anyhow::Result<LeafReport> {
    // A byte size that fits bounds the element count.
    let bytes = shape_util::checked_byte_size_of(leaf)
        .ok_or_else(|| anyhow::anyhow!("{leaf} is too large to address on this host"))?;
    Ok(LeafReport {
        shape: leaf.to_string(),
        scalar_type: leaf
            .scalar_type()
            .map(|t| t.to_string())
            .unwrap_or_default(),
        rank: leaf.rank(),
        elements: shape_util::elements_in(leaf),
        bytes,
        hash: format!("{:016x}", shape_util::hash(leaf)),
    })
}

fn report(shape: &Shape) -> anyhow::Result<ShapeReport> {
    let leaves = shape_util::leaf_shapes(shape)
        .into_iter()
        .map(leaf_report)
        .collect::<anyhow::Result<Vec<_>>>()?;
    let total_bytes = leaves
        .iter()
        .try_fold(0usize, |acc, l| acc.checked_add(l.bytes))
        .ok_or_else(|| anyhow::anyhow!("{shape} is too large to address on this host"))?;

    Ok(ShapeReport {
        shape: shape.to_string(),
        kind: if shape.is_tuple() { "tuple" } else { "array" },
        hash: format!("{:016x}", shape_util::hash(shape)),
        total_bytes,
        leaves,
    })
}

pub fn execute(text: &str, json: bool) -> anyhow::Result<()> {
    let shape = super::parse_shape(text)?;
    let report = report(&shape)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("  Shape:  {}", report.shape);
    println!("  Kind:   {}", report.kind);
    println!("  Hash:   {}", report.hash);
    println!(
        "  Leaves: {} ({} bytes total)",
        report.leaves.len(),
        report.total_bytes
    );
    println!();

    if report.leaves.is_empty() {
        return Ok(());
    }

    println!(
        "  {:<4} {:<24} {:<5} {:>12} {:>12}  {}",
        "Idx", "Leaf", "Rank", "Elements", "Bytes", "Hash",
    );
    println!("  {}", "-".repeat(80));
    for (i, leaf) in report.leaves.iter().enumerate() {
        println!(
            "  {:<4} {:<24} {:<5} {:>12} {:>12}  {}",
            i, leaf.shape, leaf.rank, leaf.elements, leaf.bytes, leaf.hash,
        );
    }
    println!();

    Ok(())
}
