use crate::{
  array::Array,
  error::{ Error, Result },
  number::Number,
  scalar::Real,
};


/// Either a single [Number] or an [Array] of them.
///
/// Solvers accept and return values of this type, so the same entry point
/// serves scalar and vector problems alike.

#[derive(Debug, Clone, PartialEq)]
pub enum Value<T: Real> {
  Scalar(Number<T>),
  Array(Array<T>),
}

impl<T: Real> Value<T> {
  pub fn kind(&self) -> &'static str {
    match self {
      Self::Scalar(_) => "scalar",
      Self::Array(_) => "array",
    }
  }

  pub fn number(&self) -> Result<&Number<T>> {
    match self {
      Self::Scalar(number) => Ok(number),
      Self::Array(_) => Err(Error::TypeMismatch { expected: "scalar", found: self.kind() }),
    }
  }

  pub fn array(&self) -> Result<&Array<T>> {
    match self {
      Self::Array(array) => Ok(array),
      Self::Scalar(_) => Err(Error::TypeMismatch { expected: "array", found: self.kind() }),
    }
  }

  pub fn values(&self) -> Vec<T> {
    match self {
      Self::Scalar(number) => vec![number.value()],
      Self::Array(array) => array.values(),
    }
  }

  /// All contained numbers, in order.

  pub fn leaves(&self) -> Vec<Number<T>> {
    match self {
      Self::Scalar(number) => vec![number.clone()],
      Self::Array(array) => array.elements().to_vec(),
    }
  }

  /// Fresh independent variables of the same variant, holding `values`.

  pub(crate) fn rebuild(&self, values: &[T]) -> Self {
    match self {
      Self::Scalar(_) => Self::Scalar(Number::new(values.first().copied().unwrap_or_else(T::nan))),
      Self::Array(_) => Self::Array(Array::new(values)),
    }
  }
}

impl<T: Real> From<Number<T>> for Value<T> {
  fn from(number: Number<T>) -> Self {
    Self::Scalar(number)
  }
}

impl<T: Real> From<Array<T>> for Value<T> {
  fn from(array: Array<T>) -> Self {
    Self::Array(array)
  }
}

impl<T: Real> From<T> for Value<T> {
  fn from(value: T) -> Self {
    Self::Scalar(Number::new(value))
  }
}

impl<T: Real> std::fmt::Display for Value<T> {
  fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
    match self {
      Self::Scalar(number) => std::fmt::Display::fmt(number, f),
      Self::Array(array) => std::fmt::Display::fmt(array, f),
    }
  }
}


#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn variants() {
    let scalar = Value::from(2.0f64);
    assert_eq!(scalar.kind(), "scalar");
    assert_eq!(scalar.number().unwrap().value(), 2.0);
    assert_eq!(scalar.array().unwrap_err(), Error::TypeMismatch { expected: "array", found: "scalar" });

    let array = Value::Array(Array::new(&[1.0f64, 2.0]));
    assert_eq!(array.values(), vec![1.0, 2.0]);
    assert!(array.number().is_err());
    assert_eq!(array.to_string(), "Array([Number(val=1) Number(val=2)])");
  }

  #[test]
  fn rebuilding_creates_fresh_leaves() {
    let array = Value::Array(Array::new(&[1.0f64, 2.0]));
    let moved = array.rebuild(&[3.0, 4.0]);
    assert_eq!(moved.values(), vec![3.0, 4.0]);
    let old = array.leaves();
    let new = moved.leaves();
    assert!(!old[0].is_same_node(&new[0]));
    assert_eq!(Value::from(1.0f64).rebuild(&[5.0]).kind(), "scalar");
  }
}
