use serde::{Serialize, Deserialize};

use crate::{
  array::Array,
  error::{ Error, Result },
  number::Number,
  scalar::Real,
};


/// What to do when a jacobian is requested with respect to
/// a node that never contributed to the queried value.
///
/// [Number::jacobian] is strict, [Array::jacobian] is lenient.
/// Both types offer `jacobian_with` to pick the policy explicitly.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Strictness {
  /// Fail with [Error::UntrackedVariable].
  Strict,
  /// Report a partial derivative of zero.
  Lenient,
}

impl Strictness {
  pub(crate) fn lookup<T: Real>(self, of: &Number<T>, wrt: &Number<T>) -> Result<T> {
    match (of.partials().get(wrt.id()), self) {
      (Some(partial), _) => Ok(partial),
      (None, Self::Lenient) => Ok(T::zero()),
      (None, Self::Strict) => Err(Error::UntrackedVariable(wrt.id())),
    }
  }
}


/// The variables a jacobian gets taken with respect to.

#[derive(Debug, Clone, Copy)]
pub enum Order<'a, T: Real> {
  Single(&'a Number<T>),
  Sequence(&'a [Number<T>]),
}

impl<'a, T: Real> From<&'a Number<T>> for Order<'a, T> {
  fn from(number: &'a Number<T>) -> Self {
    Self::Single(number)
  }
}

impl<'a, T: Real> From<&'a [Number<T>]> for Order<'a, T> {
  fn from(numbers: &'a [Number<T>]) -> Self {
    Self::Sequence(numbers)
  }
}

impl<'a, T: Real, const N: usize> From<&'a [Number<T>; N]> for Order<'a, T> {
  fn from(numbers: &'a [Number<T>; N]) -> Self {
    Self::Sequence(numbers)
  }
}

impl<'a, T: Real> From<&'a Vec<Number<T>>> for Order<'a, T> {
  fn from(numbers: &'a Vec<Number<T>>) -> Self {
    Self::Sequence(numbers)
  }
}

impl<'a, T: Real> From<&'a Array<T>> for Order<'a, T> {
  fn from(array: &'a Array<T>) -> Self {
    Self::Sequence(array.elements())
  }
}


/// Partial derivatives laid out in the order they were requested.
///
/// A number queried for a single variable yields a [Scalar](Jacobian::Scalar),
/// for a sequence a [Vector](Jacobian::Vector). Arrays add one row per element.

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Jacobian<T> {
  Scalar(T),
  Vector(Vec<T>),
  Matrix(Vec<Vec<T>>),
}

impl<T: Real> Jacobian<T> {
  pub fn scalar(&self) -> Option<T> {
    match self {
      Self::Scalar(partial) => Some(*partial),
      _ => None,
    }
  }

  pub fn vector(&self) -> Option<&[T]> {
    match self {
      Self::Vector(partials) => Some(partials),
      _ => None,
    }
  }

  pub fn matrix(&self) -> Option<&[Vec<T>]> {
    match self {
      Self::Matrix(rows) => Some(rows),
      _ => None,
    }
  }

  pub fn dims(&self) -> Vec<usize> {
    match self {
      Self::Scalar(_) => vec![],
      Self::Vector(partials) => vec![partials.len()],
      Self::Matrix(rows) => vec![rows.len(), rows.first().map_or(0, |row| row.len() )],
    }
  }

  /// All partials in row-major order.

  pub fn into_vec(self) -> Vec<T> {
    match self {
      Self::Scalar(partial) => vec![partial],
      Self::Vector(partials) => partials,
      Self::Matrix(rows) => rows.concat(),
    }
  }
}


#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn strictness() {
    let x = Number::new(1.0f64);
    let y = Number::new(2.0f64);
    assert_eq!(Strictness::Lenient.lookup(&x, &y), Ok(0.0));
    assert_eq!(Strictness::Strict.lookup(&x, &y), Err(Error::UntrackedVariable(y.id())));
    assert_eq!(Strictness::Strict.lookup(&x, &x), Ok(1.0));
  }

  #[test]
  fn layout() {
    let matrix = Jacobian::Matrix(vec![vec![1.0, 0.0], vec![0.0, 1.0], vec![2.0, 3.0]]);
    assert_eq!(matrix.dims(), vec![3, 2]);
    assert_eq!(matrix.scalar(), None);
    assert_eq!(matrix.into_vec(), vec![1.0, 0.0, 0.0, 1.0, 2.0, 3.0]);
    assert_eq!(Jacobian::Scalar(4.0).dims(), Vec::<usize>::new());
  }

  #[test]
  fn serializes() {
    let jacobian = Jacobian::Vector(vec![1.5_f64, -2.0]);
    let bytes = postcard::to_allocvec(&jacobian).unwrap();
    let restored: Jacobian<f64> = postcard::from_bytes(&bytes).unwrap();
    assert_eq!(restored, jacobian);
  }
}
