// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # lazy-tensors
//!
//! Host literals for a lazy tensor runtime.
//!
//! This crate provides:
//! - [`Literal`]: a materialized value with an array [`Shape`] and an
//!   exclusively owned buffer, hashed by shape alone.
//! - [`Shape`]: array or tuple shape descriptors, with a parseable text form.
//! - [`shape_util`]: structural hashing and shape queries.
//! - [`HostTensor`]: the dense host buffer a literal allocates.
//! - [`ScalarType`] / [`NativeType`]: element types and their Rust types.
//! - [`lt_check!`]: fatal contract checks.
//!
//! # Failure Classes
//! - Contract violations (a tuple shape handed to a literal, a typed read
//!   with the wrong element type) are fatal: logged, then a panic, and a
//!   process abort in release builds.
//! - Runtime conditions (pool budget exhausted, malformed shape strings) are
//!   returned as [`LiteralError`] / [`ShapeError`] via `thiserror`.

pub mod check;
mod error;
mod host_tensor;
mod literal;
mod native;
mod scalar_type;
mod shape;
pub mod shape_util;

pub use error::{LiteralError, ShapeError};
pub use host_tensor::HostTensor;
pub use literal::Literal;
pub use native::NativeType;
pub use scalar_type::ScalarType;
pub use shape::Shape;
