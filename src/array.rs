use itertools::Itertools;

mod arith;

use crate::{
  internal::*,
  error::{ Error, Result },
  number::Number,
  scalar::Real,
  jacobian::{ Jacobian, Order, Strictness },
  ops::{ BinaryOp, UnaryOp, Operand },
};


/// Right-hand side of an element-wise operation on an [Array].

#[derive(Debug, Clone, Copy)]
pub enum ArrayOperand<'a, T: Real> {
  Array(&'a Array<T>),
  Values(&'a [T]),
  Number(&'a Number<T>),
  Scalar(T),
}

impl<'a, T: Real> From<&'a Array<T>> for ArrayOperand<'a, T> {
  fn from(array: &'a Array<T>) -> Self {
    Self::Array(array)
  }
}

impl<'a, T: Real> From<&'a [T]> for ArrayOperand<'a, T> {
  fn from(values: &'a [T]) -> Self {
    Self::Values(values)
  }
}

impl<'a, T: Real, const N: usize> From<&'a [T; N]> for ArrayOperand<'a, T> {
  fn from(values: &'a [T; N]) -> Self {
    Self::Values(values)
  }
}

impl<'a, T: Real> From<&'a Vec<T>> for ArrayOperand<'a, T> {
  fn from(values: &'a Vec<T>) -> Self {
    Self::Values(values)
  }
}

impl<'a, T: Real> From<&'a Number<T>> for ArrayOperand<'a, T> {
  fn from(number: &'a Number<T>) -> Self {
    Self::Number(number)
  }
}

macro_rules! scalar_operand {
  ($t:ty) => {
    impl<'a> From<$t> for ArrayOperand<'a, $t> {
      fn from(scalar: $t) -> Self {
        Self::Scalar(scalar)
      }
    }
  };
}

scalar_operand!(f32);
scalar_operand!(f64);


/// Fixed-length sequence of differentiable [Number]s.
///
/// Arithmetic works element-wise against arrays and plain slices of the same
/// length, or broadcasts a single [Number] or scalar across all elements.
/// Every operation returns a new array of the same length.

#[derive(Debug, Clone, PartialEq)]
pub struct Array<T: Real> {
  elements: Vec<Number<T>>,
}

impl<T: Real> Array<T> {
  /// Array of fresh independent variables.

  pub fn new(values: &[T]) -> Self {
    values.iter().map(|&value| Number::new(value) ).collect()
  }

  pub fn from_numbers(elements: Vec<Number<T>>) -> Self {
    Self { elements }
  }

  pub fn len(&self) -> usize {
    self.elements.len()
  }

  pub fn is_empty(&self) -> bool {
    self.elements.is_empty()
  }

  pub fn elements(&self) -> &[Number<T>] {
    &self.elements
  }

  pub fn iter(&self) -> std::slice::Iter<'_, Number<T>> {
    self.elements.iter()
  }

  pub fn values(&self) -> Vec<T> {
    self.iter().map(|number| number.value() ).collect()
  }

  pub fn get(&self, index: usize) -> Option<&Number<T>> {
    self.elements.get(index)
  }

  /// Replace the element at `index`.

  pub fn set(&mut self, index: usize, number: Number<T>) -> Result<()> {
    let len = self.len();
    let slot = self.elements.get_mut(index).ok_or(Error::IndexOutOfBounds { index, len })?;
    *slot = number;
    Ok(())
  }

  pub(crate) fn check_len(&self, len: usize) -> Result<()> {
    if self.len() != len {
      return Err(Error::ShapeMismatch { lhs: self.len(), rhs: len })
    }
    Ok(())
  }

  /// Pair every element with its counterpart in `rhs`.

  pub(crate) fn zip_operand<'a, F>(&self, rhs: ArrayOperand<'a, T>, mut cb: F) -> Result<Self>
  where
    F: FnMut(&Number<T>, Operand<'_, T>) -> Result<Number<T>>,
  {
    match rhs {
      ArrayOperand::Array(rhs) => {
        self.check_len(rhs.len())?;
        self.iter().zip_eq(rhs.iter()).map(|(a, b)| cb(a, Operand::Number(b)) ).collect()
      },
      ArrayOperand::Values(rhs) => {
        self.check_len(rhs.len())?;
        self.iter().zip_eq(rhs.iter()).map(|(a, &b)| cb(a, Operand::Scalar(b)) ).collect()
      },
      ArrayOperand::Number(rhs) => self.iter().map(|a| cb(a, Operand::Number(rhs)) ).collect(),
      ArrayOperand::Scalar(rhs) => self.iter().map(|a| cb(a, Operand::Scalar(rhs)) ).collect(),
    }
  }

  /// Apply a checked single-argument operation to every element.

  pub fn unary_op<O: UnaryOp<T> + ?Sized>(&self, op: &O) -> Result<Self> {
    self.iter().map(|number| number.unary_op(op) ).collect()
  }

  /// Apply a checked two-argument operation element-wise.

  pub fn binary_op<'a, O: BinaryOp<T> + ?Sized>(&self, op: &O, rhs: impl Into<ArrayOperand<'a, T>>) -> Result<Self> {
    self.zip_operand(rhs.into(), |a, b| crate::ops::apply(op, Operand::Number(a), b) )
  }

  pub(crate) fn map_unary<O: UnaryOp<T> + ?Sized>(&self, op: &O) -> Self {
    self.iter().map(|number| number.map_unary(op) ).collect()
  }

  /// Sum of all elements as a single new node.

  pub fn sum(&self) -> Number<T> {
    self.iter().sum()
  }

  /// Element-wise product followed by a sum.

  pub fn dot(&self, rhs: &Self) -> Result<Number<T>> {
    Ok((self * rhs)?.sum())
  }

  /// Partial derivatives of every element with respect to `order`,
  /// one row per element. Variables that never contributed yield zero.

  pub fn jacobian<'a>(&self, order: impl Into<Order<'a, T>>) -> Jacobian<T> {
    let order = order.into();
    let rows = self.iter().map(|number| match order {
      Order::Single(wrt) => vec![number.partial(wrt).unwrap_or_else(T::zero)],
      Order::Sequence(wrt) => wrt.iter()
        .map(|var| number.partial(var).unwrap_or_else(T::zero) )
        .collect(),
    });
    match order {
      Order::Single(_) => Jacobian::Vector(rows.flatten().collect()),
      Order::Sequence(_) => Jacobian::Matrix(rows.collect()),
    }
  }

  pub fn jacobian_with<'a>(&self, order: impl Into<Order<'a, T>>, strictness: Strictness) -> Result<Jacobian<T>> {
    let order = order.into();
    let rows = self.iter()
      .map(|number| number.jacobian_with(order, strictness).map(Jacobian::into_vec) )
      .collect::<Result<Vec<_>>>()?;
    Ok(match order {
      Order::Single(_) => Jacobian::Vector(rows.concat()),
      Order::Sequence(_) => Jacobian::Matrix(rows),
    })
  }

  /// Compare the gradient of a scalar function at a random point
  /// against central differences and return the mean absolute deviation.
  ///
  /// Supply any function to check that it gets differentiated correctly.

  pub fn check_gradients<F>(len: usize, generator: F) -> Result<T>
  where
    F: Fn(&Self) -> Result<Number<T>>
  {
    let eps = T::epsilon().cbrt();
    let two = T::one() + T::one();
    // Generate random input
    let input: Vec<T> = (0..len).map(|_| uniform(-T::one(), T::one()) ).collect();
    let var = Self::new(&input);
    // Compute gradient using auto diff
    let grad = generator(&var)?.jacobian_with(&var, Strictness::Lenient)?.into_vec();
    // Compute gradient numerically for every element of input
    let mut num_grad = vec![T::zero(); len];
    for i in 0..len {
      let mut prev = input.clone();
      let mut next = input.clone();
      prev[i] = prev[i] - eps;
      next[i] = next[i] + eps;
      let prev = generator(&Self::new(&prev))?.value();
      let next = generator(&Self::new(&next))?.value();
      num_grad[i] = (next - prev) / (two * eps);
    }
    if len == 0 { return Ok(T::zero()) }
    // Return average difference between both gradients
    let total: T = grad.iter().zip_eq(&num_grad).map(|(&a, &b)| (a - b).abs() ).sum();
    Ok(total / T::from(len).unwrap_or_else(T::one))
  }
}

impl<T: Real> FromIterator<Number<T>> for Array<T> {
  fn from_iter<I: IntoIterator<Item=Number<T>>>(iter: I) -> Self {
    Self { elements: iter.into_iter().collect() }
  }
}

impl<T: Real> From<Vec<Number<T>>> for Array<T> {
  fn from(elements: Vec<Number<T>>) -> Self {
    Self::from_numbers(elements)
  }
}

// Mixed sequences: numbers are shared, scalars become fresh leaves

impl<'a, T: Real> FromIterator<Operand<'a, T>> for Array<T> {
  fn from_iter<I: IntoIterator<Item=Operand<'a, T>>>(iter: I) -> Self {
    iter.into_iter().map(|operand| match operand {
      Operand::Number(number) => number.clone(),
      Operand::Scalar(value) => Number::new(value),
    }).collect()
  }
}

impl<'a, T: Real> From<Vec<Operand<'a, T>>> for Array<T> {
  fn from(operands: Vec<Operand<'a, T>>) -> Self {
    operands.into_iter().collect()
  }
}

impl<T: Real> From<&[T]> for Array<T> {
  fn from(values: &[T]) -> Self {
    Self::new(values)
  }
}

impl<T: Real> std::ops::Index<usize> for Array<T> {
  type Output = Number<T>;

  fn index(&self, index: usize) -> &Self::Output {
    &self.elements[index]
  }
}

impl<T: Real> std::ops::IndexMut<usize> for Array<T> {
  fn index_mut(&mut self, index: usize) -> &mut Self::Output {
    &mut self.elements[index]
  }
}

impl<'a, T: Real> IntoIterator for &'a Array<T> {
  type Item = &'a Number<T>;
  type IntoIter = std::slice::Iter<'a, Number<T>>;

  fn into_iter(self) -> Self::IntoIter {
    self.iter()
  }
}

impl<T: Real> IntoIterator for Array<T> {
  type Item = Number<T>;
  type IntoIter = std::vec::IntoIter<Number<T>>;

  fn into_iter(self) -> Self::IntoIter {
    self.elements.into_iter()
  }
}

impl<T: Real> std::fmt::Display for Array<T> {
  fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
    write!(f, "Array([{}])", self.iter().join(" "))
  }
}
