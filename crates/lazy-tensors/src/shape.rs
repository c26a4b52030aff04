// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Shape descriptors: array leaves and tuples of shapes.
//!
//! # Text Form
//! ```text
//! f32[2,3]            array of 2x3 f32
//! pred[]              scalar predicate
//! (f32[2], s64[])     tuple of two arrays
//! ((u8[4]), ())       nested and empty tuples
//! ```

use crate::{lt_check, ScalarType, ShapeError};
use std::fmt;
use std::str::FromStr;

/// Structural description of a value.
///
/// An *array* shape has a [`ScalarType`] and non-negative extents; a *tuple*
/// shape aggregates other shapes. Shapes are immutable once created and
/// compare structurally.
///
/// # Examples
/// ```
/// use lazy_tensors::{ScalarType, Shape};
///
/// let s = Shape::new(ScalarType::F32, [2, 3]);
/// assert!(!s.is_tuple());
/// assert_eq!(s.sizes(), &[2, 3]);
/// assert_eq!(s.to_string(), "f32[2,3]");
///
/// let t: Shape = "(f32[2,3], s64[])".parse().unwrap();
/// assert!(t.is_tuple());
/// assert_eq!(t.tuple_shapes()[0], s);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Shape {
    kind: ShapeKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum ShapeKind {
    Array {
        scalar_type: ScalarType,
        dims: Vec<i64>,
    },
    Tuple(Vec<Shape>),
}

impl Shape {
    /// Creates an array shape.
    ///
    /// Every extent must be non-negative; a negative extent is a fatal
    /// contract violation. Use [`Shape::try_new`] for untrusted input.
    pub fn new(scalar_type: ScalarType, dims: impl Into<Vec<i64>>) -> Self {
        let dims = dims.into();
        lt_check!(
            dims.iter().all(|&d| d >= 0),
            "negative extent in {scalar_type}{dims:?}"
        );
        Self {
            kind: ShapeKind::Array { scalar_type, dims },
        }
    }

    /// Creates an array shape, rejecting negative extents.
    pub fn try_new(
        scalar_type: ScalarType,
        dims: impl Into<Vec<i64>>,
    ) -> Result<Self, ShapeError> {
        let dims = dims.into();
        if let Some((index, &extent)) = dims.iter().enumerate().find(|(_, d)| **d < 0) {
            return Err(ShapeError::NegativeDimension { index, extent });
        }
        Ok(Self {
            kind: ShapeKind::Array { scalar_type, dims },
        })
    }

    /// Rank-0 array shape.
    pub fn scalar(scalar_type: ScalarType) -> Self {
        Self::new(scalar_type, Vec::new())
    }

    /// Rank-1 array shape.
    pub fn vector(scalar_type: ScalarType, len: i64) -> Self {
        Self::new(scalar_type, vec![len])
    }

    /// Rank-2 array shape.
    pub fn matrix(scalar_type: ScalarType, rows: i64, cols: i64) -> Self {
        Self::new(scalar_type, vec![rows, cols])
    }

    /// Tuple of the given element shapes, in order.
    pub fn tuple(elements: impl Into<Vec<Shape>>) -> Self {
        Self {
            kind: ShapeKind::Tuple(elements.into()),
        }
    }

    pub fn is_tuple(&self) -> bool {
        matches!(self.kind, ShapeKind::Tuple(_))
    }

    pub fn is_array(&self) -> bool {
        !self.is_tuple()
    }

    /// Element type of an array shape; `None` for tuples.
    pub fn scalar_type(&self) -> Option<ScalarType> {
        match &self.kind {
            ShapeKind::Array { scalar_type, .. } => Some(*scalar_type),
            ShapeKind::Tuple(_) => None,
        }
    }

    /// Dimension extents of an array shape; empty for tuples.
    pub fn sizes(&self) -> &[i64] {
        match &self.kind {
            ShapeKind::Array { dims, .. } => dims,
            ShapeKind::Tuple(_) => &[],
        }
    }

    /// Number of dimensions; `0` for scalars and tuples.
    pub fn rank(&self) -> usize {
        self.sizes().len()
    }

    /// Extent of dimension `index`, or `None` if out of range.
    pub fn dim(&self, index: usize) -> Option<i64> {
        self.sizes().get(index).copied()
    }

    /// Element shapes of a tuple; empty for arrays.
    pub fn tuple_shapes(&self) -> &[Shape] {
        match &self.kind {
            ShapeKind::Tuple(elements) => elements,
            ShapeKind::Array { .. } => &[],
        }
    }

    /// Scalar type and extents of an array shape; `None` for tuples.
    pub fn as_array(&self) -> Option<(ScalarType, &[i64])> {
        match &self.kind {
            ShapeKind::Array { scalar_type, dims } => Some((*scalar_type, dims.as_slice())),
            ShapeKind::Tuple(_) => None,
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ShapeKind::Array { scalar_type, dims } => {
                write!(f, "{scalar_type}[")?;
                for (i, d) in dims.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{d}")?;
                }
                f.write_str("]")
            }
            ShapeKind::Tuple(elements) => {
                f.write_str("(")?;
                for (i, e) in elements.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{e}")?;
                }
                f.write_str(")")
            }
        }
    }
}

impl FromStr for Shape {
    type Err = ShapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parser = Parser { input: s, pos: 0 };
        parser.skip_ws();
        let shape = parser.shape()?;
        parser.skip_ws();
        if parser.pos != s.len() {
            return Err(parser.error("unexpected trailing input"));
        }
        Ok(shape)
    }
}

impl From<Shape> for String {
    fn from(shape: Shape) -> Self {
        shape.to_string()
    }
}

impl TryFrom<String> for Shape {
    type Error = ShapeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Recursive-descent parser for the text form.
struct Parser<'a> {
    input: &'a str,
    pos: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<u8> {
        self.input.as_bytes().get(self.pos).copied()
    }

    fn skip_ws(&mut self) {
        while self.peek().is_some_and(|b| b.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    fn expect(&mut self, byte: u8) -> Result<(), ShapeError> {
        if self.peek() == Some(byte) {
            self.pos += 1;
            Ok(())
        } else {
            Err(self.error(&format!("expected '{}'", byte as char)))
        }
    }

    fn error(&self, detail: &str) -> ShapeError {
        ShapeError::Syntax {
            input: self.input.to_string(),
            position: self.pos,
            detail: detail.to_string(),
        }
    }

    fn shape(&mut self) -> Result<Shape, ShapeError> {
        if self.peek() == Some(b'(') {
            self.tuple()
        } else {
            self.array()
        }
    }

    fn tuple(&mut self) -> Result<Shape, ShapeError> {
        self.expect(b'(')?;
        let mut elements = Vec::new();
        self.skip_ws();
        if self.peek() == Some(b')') {
            self.pos += 1;
            return Ok(Shape::tuple(elements));
        }
        loop {
            self.skip_ws();
            elements.push(self.shape()?);
            self.skip_ws();
            match self.peek() {
                Some(b',') => self.pos += 1,
                Some(b')') => {
                    self.pos += 1;
                    return Ok(Shape::tuple(elements));
                }
                _ => return Err(self.error("expected ',' or ')'")),
            }
        }
    }

    fn array(&mut self) -> Result<Shape, ShapeError> {
        let start = self.pos;
        while self.peek().is_some_and(|b| b.is_ascii_alphanumeric()) {
            self.pos += 1;
        }
        if start == self.pos {
            return Err(self.error("expected a scalar type or '('"));
        }
        let scalar_type: ScalarType = self.input[start..self.pos].parse()?;

        self.skip_ws();
        self.expect(b'[')?;
        let mut dims = Vec::new();
        self.skip_ws();
        if self.peek() == Some(b']') {
            self.pos += 1;
            return Shape::try_new(scalar_type, dims);
        }
        loop {
            self.skip_ws();
            dims.push(self.integer()?);
            self.skip_ws();
            match self.peek() {
                Some(b',') => self.pos += 1,
                Some(b']') => {
                    self.pos += 1;
                    return Shape::try_new(scalar_type, dims);
                }
                _ => return Err(self.error("expected ',' or ']'")),
            }
        }
    }

    fn integer(&mut self) -> Result<i64, ShapeError> {
        let start = self.pos;
        if self.peek() == Some(b'-') {
            self.pos += 1;
        }
        while self.peek().is_some_and(|b| b.is_ascii_digit()) {
            self.pos += 1;
        }
        let text = &self.input[start..self.pos];
        match text.parse::<i64>() {
            Ok(value) => Ok(value),
            Err(_) => {
                self.pos = start;
                Err(self.error("expected a dimension extent"))
            }
        }
    }
}
