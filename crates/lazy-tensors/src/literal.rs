// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Materialized, shape-typed values.
//!
//! A [`Literal`] is how a concrete value (a constant, or the realized result
//! of a lazy computation) is held on the host. It pairs an array [`Shape`]
//! with a [`HostTensor`] allocated to exactly that shape.
//!
//! Literals never describe tuples. Handing a tuple shape to a literal is a
//! bug in the caller and fails through [`lt_check!`](crate::lt_check)
//! before anything is allocated.

use crate::{
    lt_check, lt_fatal, shape_util, HostTensor, LiteralError, NativeType, ScalarType, Shape,
};
use host_memory::HostMemoryPool;

/// A host-resident value with an array shape.
///
/// The literal exclusively owns its buffer. [`Clone`] makes a deep copy on
/// the heap; nothing is ever shared between literals.
///
/// # Examples
/// ```
/// use lazy_tensors::{shape_util, Literal, ScalarType, Shape};
///
/// let shape = Shape::matrix(ScalarType::F32, 2, 3);
/// let mut literal = Literal::new(&shape);
/// assert_eq!(literal.shape(), &shape);
/// assert_eq!(literal.size_bytes(), 24);
/// assert_eq!(literal.hash(), shape_util::hash(&shape));
///
/// literal.populate(&[1.0f32, 2.0, 3.0, 4.0, 5.0, 6.0]);
/// assert_eq!(literal.get::<f32>(&[1, 2]), 6.0);
/// ```
#[derive(Debug, Clone)]
pub struct Literal {
    shape: Shape,
    value: HostTensor,
}

impl Literal {
    /// Creates a literal for `shape`, allocating its buffer on the heap.
    ///
    /// # Panics
    /// Fatal if `shape` is a tuple.
    pub fn new(shape: &Shape) -> Self {
        let (scalar_type, dimensions) = array_parts(shape);
        let value = HostTensor::empty(&dimensions, scalar_type);
        tracing::debug!(%shape, bytes = value.size_bytes(), "literal allocated");
        Self {
            shape: shape.clone(),
            value,
        }
    }

    /// Creates a literal for `shape`, drawing its buffer from `pool`.
    ///
    /// The tuple check happens before the pool is touched.
    ///
    /// # Panics
    /// Fatal if `shape` is a tuple.
    ///
    /// # Errors
    /// Returns [`LiteralError::Memory`] if the pool budget cannot cover the
    /// buffer.
    pub fn new_in(shape: &Shape, pool: &HostMemoryPool) -> Result<Self, LiteralError> {
        let (scalar_type, dimensions) = array_parts(shape);
        let value = HostTensor::empty_in(&dimensions, scalar_type, pool)?;
        tracing::debug!(%shape, bytes = value.size_bytes(), "pooled literal allocated");
        Ok(Self {
            shape: shape.clone(),
            value,
        })
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Structural hash of the literal's shape.
    ///
    /// Equal shapes give equal hashes whatever the buffer holds, so a
    /// matching hash says nothing about matching contents.
    pub fn hash(&self) -> u64 {
        let hash_value = shape_util::hash(self.shape());
        lt_check!(!self.shape().is_tuple());
        hash_value
    }

    /// The backing tensor.
    pub fn value(&self) -> &HostTensor {
        &self.value
    }

    /// Consumes the literal, returning its tensor.
    pub fn into_value(self) -> HostTensor {
        self.value
    }

    /// Replaces the backing tensor. This is the only way to swap the buffer
    /// out; contents change in place through the typed and untyped setters.
    ///
    /// # Panics
    /// Fatal if `value` does not have this literal's extents and scalar type.
    pub fn set_value(&mut self, value: HostTensor) {
        lt_check!(
            Some(value.scalar_type()) == self.shape.scalar_type()
                && value.sizes() == self.shape.sizes(),
            "tensor {}{:?} does not match literal shape {}",
            value.scalar_type(),
            value.sizes(),
            self.shape
        );
        self.value = value;
    }

    /// Buffer length in bytes.
    pub fn size_bytes(&self) -> usize {
        self.value.size_bytes()
    }

    pub fn untyped_data(&self) -> &[u8] {
        self.value.as_bytes()
    }

    pub fn untyped_data_mut(&mut self) -> &mut [u8] {
        self.value.as_bytes_mut()
    }

    /// Reads the element at a multi-dimensional index.
    pub fn get<T: NativeType>(&self, index: &[i64]) -> T {
        self.value.get(self.value.linear_index(index))
    }

    /// Writes the element at a multi-dimensional index.
    pub fn set<T: NativeType>(&mut self, index: &[i64], value: T) {
        let offset = self.value.linear_index(index);
        self.value.set(offset, value);
    }

    /// All elements in row-major order.
    pub fn to_vec<T: NativeType>(&self) -> Vec<T> {
        self.value.to_vec()
    }

    /// Fills the literal from row-major `values`, one per element.
    pub fn populate<T: NativeType>(&mut self, values: &[T]) {
        self.value.copy_from(values);
    }

    /// Like [`populate`](Self::populate), restricted to rank-1 literals.
    pub fn populate_r1<T: NativeType>(&mut self, values: &[T]) {
        lt_check!(
            self.shape.rank() == 1,
            "populate_r1 on rank-{} literal {}",
            self.shape.rank(),
            self.shape
        );
        self.populate(values);
    }

    /// Sets every element to `value`.
    pub fn fill<T: NativeType>(&mut self, value: T) {
        self.value.fill(value);
    }
}

/// Splits an array shape into its scalar type and 64-bit extents. Fatal for
/// tuples.
fn array_parts(shape: &Shape) -> (ScalarType, Vec<i64>) {
    lt_check!(!shape.is_tuple(), "literal shape {shape}");
    match shape.as_array() {
        Some((scalar_type, sizes)) => (scalar_type, sizes.to_vec()),
        None => lt_fatal!("Check failed: array shape expected, got {shape}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use host_memory::MemoryBudget;

    fn pair() -> Shape {
        Shape::tuple(vec![
            Shape::matrix(ScalarType::F32, 2, 3),
            Shape::scalar(ScalarType::S64),
        ])
    }

    #[test]
    fn test_new_copies_shape_and_sizes_buffer() {
        let shape = Shape::matrix(ScalarType::F32, 2, 3);
        let literal = Literal::new(&shape);
        assert_eq!(literal.shape(), &shape);
        assert_eq!(literal.value().sizes(), &[2, 3]);
        assert_eq!(literal.value().scalar_type(), ScalarType::F32);
        assert_eq!(literal.value().numel(), 6);
        assert_eq!(literal.size_bytes(), 24);
    }

    #[test]
    fn test_scalar_literal() {
        let mut literal = Literal::new(&Shape::scalar(ScalarType::Pred));
        assert_eq!(literal.size_bytes(), 1);
        literal.set(&[], true);
        assert!(literal.get::<bool>(&[]));
    }

    #[test]
    #[should_panic(expected = "Check failed: !shape.is_tuple()")]
    fn test_tuple_shape_is_fatal() {
        Literal::new(&pair());
    }

    #[test]
    #[should_panic(expected = "Check failed: !shape.is_tuple()")]
    fn test_empty_tuple_is_fatal() {
        Literal::new(&Shape::tuple(Vec::new()));
    }

    #[test]
    fn test_hash_matches_shape_util() {
        let shape = Shape::new(ScalarType::BF16, [4, 1, 2]);
        assert_eq!(Literal::new(&shape).hash(), shape_util::hash(&shape));
    }

    #[test]
    fn test_hash_ignores_contents() {
        let shape = Shape::vector(ScalarType::S32, 3);
        let mut a = Literal::new(&shape);
        let mut b = Literal::new(&shape);
        a.populate(&[1i32, 2, 3]);
        b.fill(-9i32);
        assert_ne!(a.to_vec::<i32>(), b.to_vec::<i32>());
        assert_eq!(a.hash(), b.hash());
    }

    #[test]
    fn test_typed_access() {
        let mut literal = Literal::new(&Shape::matrix(ScalarType::F64, 2, 2));
        literal.populate(&[1.0f64, 2.0, 3.0, 4.0]);
        literal.set(&[0, 1], 20.0f64);
        assert_eq!(literal.get::<f64>(&[0, 1]), 20.0);
        assert_eq!(literal.to_vec::<f64>(), vec![1.0, 20.0, 3.0, 4.0]);
    }

    #[test]
    fn test_untyped_data() {
        let mut literal = Literal::new(&Shape::vector(ScalarType::U8, 3));
        literal.untyped_data_mut().copy_from_slice(&[5, 6, 7]);
        assert_eq!(literal.untyped_data(), &[5, 6, 7]);
        assert_eq!(literal.to_vec::<u8>(), vec![5, 6, 7]);
    }

    #[test]
    fn test_populate_r1() {
        let mut literal = Literal::new(&Shape::vector(ScalarType::S16, 2));
        literal.populate_r1(&[3i16, 4]);
        assert_eq!(literal.to_vec::<i16>(), vec![3, 4]);
    }

    #[test]
    #[should_panic(expected = "populate_r1 on rank-2 literal f32[1,1]")]
    fn test_populate_r1_wrong_rank() {
        Literal::new(&Shape::matrix(ScalarType::F32, 1, 1)).populate_r1(&[1.0f32]);
    }

    #[test]
    #[should_panic(expected = "Check failed")]
    fn test_populate_wrong_count() {
        Literal::new(&Shape::vector(ScalarType::F32, 3)).populate(&[1.0f32]);
    }

    #[test]
    fn test_set_value() {
        let shape = Shape::vector(ScalarType::S64, 2);
        let mut literal = Literal::new(&shape);
        literal.set_value(HostTensor::from_values(&[2], &[7i64, 8]).unwrap());
        assert_eq!(literal.to_vec::<i64>(), vec![7, 8]);
        assert_eq!(literal.shape(), &shape);
    }

    #[test]
    #[should_panic(expected = "does not match literal shape s64[2]")]
    fn test_set_value_mismatch() {
        let mut literal = Literal::new(&Shape::vector(ScalarType::S64, 2));
        literal.set_value(HostTensor::from_values(&[2], &[7i32, 8]).unwrap());
    }

    #[test]
    #[should_panic(expected = "tensor s32[5] does not match literal shape f32[2,3]")]
    fn test_set_value_rejects_other_extents_and_type() {
        let mut literal = Literal::new(&Shape::matrix(ScalarType::F32, 2, 3));
        literal.set_value(HostTensor::from_values(&[5], &[1i32, 2, 3, 4, 5]).unwrap());
    }

    #[test]
    #[should_panic(expected = "does not match literal shape f32[2,3]")]
    fn test_set_value_rejects_same_type_other_extents() {
        let mut literal = Literal::new(&Shape::matrix(ScalarType::F32, 2, 3));
        literal.set_value(HostTensor::empty(&[3, 2], ScalarType::F32));
    }

    #[test]
    fn test_in_place_writes_keep_shape_and_hash() {
        let shape = Shape::matrix(ScalarType::F32, 2, 3);
        let mut literal = Literal::new(&shape);
        let before = literal.hash();

        literal.untyped_data_mut().fill(0xff);
        literal.fill(1.0f32);
        literal.set(&[1, 2], 9.0f32);

        assert_eq!(literal.shape(), &shape);
        assert_eq!(literal.value().sizes(), shape.sizes());
        assert_eq!(literal.value().scalar_type(), ScalarType::F32);
        assert_eq!(literal.size_bytes(), 24);
        assert_eq!(literal.hash(), before);
    }

    #[test]
    fn test_clone_is_deep() {
        let mut a = Literal::new(&Shape::vector(ScalarType::F32, 2));
        a.populate(&[1.0f32, 2.0]);
        let b = a.clone();
        a.fill(0.0f32);
        assert_eq!(b.to_vec::<f32>(), vec![1.0, 2.0]);
        assert_eq!(a.hash(), b.hash());
    }

    #[test]
    fn test_into_value() {
        let literal = Literal::new(&Shape::vector(ScalarType::U8, 4));
        let value = literal.into_value();
        assert_eq!(value.size_bytes(), 4);
    }

    #[test]
    fn test_new_in_pool() {
        let pool = HostMemoryPool::new(MemoryBudget::from_kb(4));
        let literal = Literal::new_in(&Shape::matrix(ScalarType::F32, 2, 3), &pool).unwrap();
        assert!(literal.value().is_pooled());
        assert_eq!(pool.live_bytes(), 24);
        drop(literal);
        assert_eq!(pool.live_bytes(), 0);
    }

    #[test]
    fn test_new_in_budget_exhausted() {
        let pool = HostMemoryPool::new(MemoryBudget::from_bytes(16));
        let err = Literal::new_in(&Shape::vector(ScalarType::F64, 4), &pool).unwrap_err();
        assert!(matches!(err, LiteralError::Memory(_)));
    }

    #[test]
    fn test_literal_is_send() {
        fn assert_send<T: Send>() {}
        assert_send::<Literal>();
    }
}
