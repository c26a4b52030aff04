// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `ltc hash` command: one structural hash per shape.

use lazy_tensors::shape_util;

pub fn execute(shapes: &[String]) -> anyhow::Result<()> {
    for text in shapes {
        let shape = super::parse_shape(text)?;
        println!("{:016x}  {shape}", shape_util::hash(&shape));
    }
    Ok(())
}
