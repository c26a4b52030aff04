// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Recoverable error types.
//!
//! Contract violations (for example a tuple shape handed to a literal) are
//! not represented here; they go through [`lt_check!`](crate::lt_check).

/// Errors raised while building or parsing a [`crate::Shape`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShapeError {
    /// A dimension extent was negative.
    #[error("dimension {index} has negative extent {extent}")]
    NegativeDimension { index: usize, extent: i64 },

    /// The element type name is not recognised.
    #[error("unknown scalar type '{0}'")]
    UnknownScalarType(String),

    /// A shape string is malformed.
    #[error("invalid shape string '{input}' at byte {position}: {detail}")]
    Syntax {
        input: String,
        position: usize,
        detail: String,
    },
}

/// Errors raised while allocating or populating a literal's buffer.
#[derive(Debug, thiserror::Error)]
pub enum LiteralError {
    /// The host memory pool could not serve the allocation.
    #[error("literal allocation failed: {0}")]
    Memory(#[from] host_memory::MemoryError),

    /// The supplied data does not match the size implied by the shape.
    #[error("buffer size mismatch: expected {expected} bytes, got {actual}")]
    BufferSizeMismatch { expected: usize, actual: usize },
}
