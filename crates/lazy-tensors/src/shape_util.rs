// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Free functions over [`Shape`]s.
//!
//! The structural [`hash`] is what lazy graph caches key on: it covers the
//! shape kind, scalar types and extents, and never any buffer contents.

use crate::{lt_check, ScalarType, Shape};
use rustc_hash::FxHasher;
use std::hash::{Hash, Hasher};

/// Deterministic structural hash of a shape.
///
/// Uses an unseeded FxHash, so equal shapes hash equally across runs and
/// processes. Tuples hash their elements recursively in order.
///
/// ```
/// use lazy_tensors::{shape_util, ScalarType, Shape};
///
/// let a = Shape::matrix(ScalarType::F32, 2, 3);
/// let b: Shape = "f32[2,3]".parse().unwrap();
/// assert_eq!(shape_util::hash(&a), shape_util::hash(&b));
/// ```
pub fn hash(shape: &Shape) -> u64 {
    let mut hasher = FxHasher::default();
    hash_into(shape, &mut hasher);
    hasher.finish()
}

fn hash_into(shape: &Shape, state: &mut FxHasher) {
    match shape.as_array() {
        Some((scalar_type, dims)) => {
            state.write_u8(0);
            scalar_type.hash(state);
            state.write_usize(dims.len());
            for &d in dims {
                state.write_i64(d);
            }
        }
        None => {
            let elements = shape.tuple_shapes();
            state.write_u8(1);
            state.write_usize(elements.len());
            for element in elements {
                hash_into(element, state);
            }
        }
    }
}

/// Builds an array shape. Equivalent to [`Shape::new`].
pub fn make_shape(scalar_type: ScalarType, dims: &[i64]) -> Shape {
    Shape::new(scalar_type, dims.to_vec())
}

/// Builds a tuple shape from its elements.
pub fn make_tuple_shape(elements: &[Shape]) -> Shape {
    Shape::tuple(elements.to_vec())
}

/// Number of elements of a tuple shape. Fatal for arrays.
pub fn tuple_element_count(shape: &Shape) -> usize {
    lt_check!(shape.is_tuple(), "{shape} is not a tuple");
    shape.tuple_shapes().len()
}

/// Element `index` of a tuple shape. Fatal for arrays or out-of-range indices.
pub fn get_tuple_element_shape(shape: &Shape, index: usize) -> &Shape {
    lt_check!(shape.is_tuple(), "{shape} is not a tuple");
    let elements = shape.tuple_shapes();
    lt_check!(
        index < elements.len(),
        "tuple index {index} out of range for {shape}"
    );
    &elements[index]
}

/// Number of elements in an array shape (1 for scalars). Fatal for tuples
/// and for element counts that overflow `i64`.
pub fn elements_in(shape: &Shape) -> i64 {
    lt_check!(!shape.is_tuple(), "elements_in on tuple shape {shape}");
    shape
        .sizes()
        .iter()
        .try_fold(1i64, |acc, &d| acc.checked_mul(d))
        .unwrap_or_else(|| crate::lt_fatal!("Check failed: element count of {shape} overflows"))
}

/// Bytes needed to hold an array shape densely. Fatal for tuples and for
/// sizes that do not fit in `usize`.
pub fn byte_size_of(shape: &Shape) -> usize {
    if shape.is_tuple() {
        crate::lt_fatal!("Check failed: byte_size_of on tuple shape {shape}");
    }
    checked_byte_size_of(shape)
        .unwrap_or_else(|| crate::lt_fatal!("Check failed: byte size of {shape} overflows"))
}

/// Like [`byte_size_of`], but `None` when the size does not fit in `usize`.
/// Fatal for tuples.
pub fn checked_byte_size_of(shape: &Shape) -> Option<usize> {
    let Some((scalar_type, dims)) = shape.as_array() else {
        crate::lt_fatal!("Check failed: byte_size_of on tuple shape {shape}");
    };
    dims.iter().try_fold(scalar_type.size_bytes(), |acc, &d| {
        usize::try_from(d).ok().and_then(|d| acc.checked_mul(d))
    })
}

/// Array leaves of a shape in depth-first order. An array is its own leaf.
pub fn leaf_shapes(shape: &Shape) -> Vec<&Shape> {
    let mut leaves = Vec::new();
    collect_leaves(shape, &mut leaves);
    leaves
}

fn collect_leaves<'a>(shape: &'a Shape, out: &mut Vec<&'a Shape>) {
    if shape.is_tuple() {
        for element in shape.tuple_shapes() {
            collect_leaves(element, out);
        }
    } else {
        out.push(shape);
    }
}

/// Structural equality.
pub fn equal(lhs: &Shape, rhs: &Shape) -> bool {
    lhs == rhs
}

/// Text form, e.g. `(f32[2,3], s64[])`.
pub fn human_string(shape: &Shape) -> String {
    shape.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn f32s(dims: &[i64]) -> Shape {
        make_shape(ScalarType::F32, dims)
    }

    #[test]
    fn test_hash_is_structural() {
        assert_eq!(hash(&f32s(&[2, 3])), hash(&Shape::matrix(ScalarType::F32, 2, 3)));
        assert_ne!(hash(&f32s(&[2, 3])), hash(&f32s(&[3, 2])));
        assert_ne!(hash(&f32s(&[2, 3])), hash(&make_shape(ScalarType::S32, &[2, 3])));
    }

    #[test]
    fn test_hash_separates_tuple_from_leaf() {
        let leaf = f32s(&[4]);
        let wrapped = make_tuple_shape(&[leaf.clone()]);
        assert_ne!(hash(&leaf), hash(&wrapped));
        assert_ne!(hash(&make_tuple_shape(&[])), hash(&Shape::scalar(ScalarType::Pred)));
    }

    #[test]
    fn test_hash_no_collisions_on_small_shapes() {
        let mut seen = HashSet::new();
        let mut count = 0;
        for ty in ScalarType::ALL {
            seen.insert(hash(&Shape::scalar(ty)));
            count += 1;
            for a in 0..6 {
                seen.insert(hash(&make_shape(ty, &[a])));
                count += 1;
                for b in 0..6 {
                    seen.insert(hash(&make_shape(ty, &[a, b])));
                    count += 1;
                }
            }
        }
        assert_eq!(seen.len(), count);
    }

    #[test]
    fn test_elements_and_bytes() {
        assert_eq!(elements_in(&f32s(&[2, 3])), 6);
        assert_eq!(elements_in(&f32s(&[])), 1);
        assert_eq!(elements_in(&f32s(&[4, 0])), 0);
        assert_eq!(byte_size_of(&f32s(&[2, 3])), 24);
        assert_eq!(byte_size_of(&make_shape(ScalarType::F16, &[10])), 20);
    }

    #[test]
    #[should_panic(expected = "Check failed")]
    fn test_elements_in_tuple_is_fatal() {
        elements_in(&make_tuple_shape(&[f32s(&[1])]));
    }

    #[test]
    #[should_panic(expected = "byte_size_of on tuple shape")]
    fn test_byte_size_of_tuple_is_fatal() {
        byte_size_of(&make_tuple_shape(&[]));
    }

    #[test]
    #[should_panic(expected = "Check failed: element count of u8[4294967296,4294967296] overflows")]
    fn test_elements_in_overflow_is_fatal() {
        elements_in(&make_shape(ScalarType::U8, &[1 << 32, 1 << 32]));
    }

    #[test]
    #[should_panic(expected = "Check failed: byte size of f64[2305843009213693952] overflows")]
    fn test_byte_size_of_overflow_is_fatal() {
        byte_size_of(&make_shape(ScalarType::F64, &[1 << 61]));
    }

    #[test]
    fn test_checked_byte_size_of() {
        assert_eq!(checked_byte_size_of(&f32s(&[2, 3])), Some(24));
        assert_eq!(checked_byte_size_of(&f32s(&[0, 1 << 40])), Some(0));
        let huge = make_shape(ScalarType::U8, &[1 << 32, 1 << 32]);
        assert_eq!(checked_byte_size_of(&huge), None);
        assert_eq!(checked_byte_size_of(&f32s(&[1 << 62])), None);
    }

    #[test]
    fn test_tuple_elements() {
        let t = make_tuple_shape(&[f32s(&[1]), Shape::scalar(ScalarType::S64)]);
        assert_eq!(tuple_element_count(&t), 2);
        assert_eq!(get_tuple_element_shape(&t, 1), &Shape::scalar(ScalarType::S64));
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_tuple_index_out_of_range() {
        get_tuple_element_shape(&make_tuple_shape(&[f32s(&[1])]), 1);
    }

    #[test]
    #[should_panic(expected = "is not a tuple")]
    fn test_tuple_count_on_array() {
        tuple_element_count(&f32s(&[1]));
    }

    #[test]
    fn test_leaf_shapes() {
        let s: Shape = "((u8[4]), (), f16[1,1], pred[])".parse().unwrap();
        let names: Vec<String> = leaf_shapes(&s).iter().map(|l| human_string(l)).collect();
        assert_eq!(names, vec!["u8[4]", "f16[1,1]", "pred[]"]);

        let leaf = f32s(&[2]);
        assert_eq!(leaf_shapes(&leaf), vec![&leaf]);
    }

    #[test]
    fn test_equal() {
        assert!(equal(&f32s(&[2]), &f32s(&[2])));
        assert!(!equal(&f32s(&[2]), &f32s(&[2, 1])));
    }
}
