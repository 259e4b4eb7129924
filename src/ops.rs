//! Elementary operations and their derivative rules.
//!
//! Every differentiable computation in this crate is assembled from
//! [UnaryOp] and [BinaryOp] implementations: a value function paired
//! with its closed-form derivative. The built-in catalog lives in
//! [elementary]. New operations can be added by implementing
//! one of the traits and passing it to [Number::unary_op] or
//! [Number::binary_op], without touching existing ones.

use std::fmt::Debug;

pub mod elementary;

pub use elementary::{ unary_catalog, binary_catalog };

use crate::{
  error::{ Error, Result },
  number::Number,
  scalar::Real,
};


/// Single-argument operation that can also compute its derivative.

pub trait UnaryOp<T: Real>: Debug {
  fn name(&self) -> &'static str;

  fn run(&self, x: T) -> T;

  /// Derivative of [run](UnaryOp::run) at `x`.
  fn derive(&self, x: T) -> T;

  /// Reject inputs outside the operation's domain.
  fn domain(&self, _x: T) -> Result<()> {
    Ok(())
  }
}


/// Two-argument operation that can also compute its partial derivatives.

pub trait BinaryOp<T: Real>: Debug {
  fn name(&self) -> &'static str;

  fn run(&self, x: T, y: T) -> T;

  /// Partial derivatives of [run](BinaryOp::run) with respect to `x` and `y`.
  fn derive(&self, x: T, y: T) -> (T, T);

  fn domain(&self, _x: T, _y: T) -> Result<()> {
    Ok(())
  }

  /// Dedicated rule for when both operands are the very same node.
  fn same_operand(&self, _x: &Number<T>) -> Option<Number<T>> {
    None
  }
}


/// Either side of a binary operation on [Number]s.

#[derive(Debug, Clone, Copy)]
pub enum Operand<'a, T: Real> {
  Number(&'a Number<T>),
  Scalar(T),
}

impl<'a, T: Real> Operand<'a, T> {
  pub fn value(&self) -> T {
    match self {
      Self::Number(number) => number.value(),
      Self::Scalar(scalar) => *scalar,
    }
  }

  pub fn number(&self) -> Option<&'a Number<T>> {
    match self {
      Self::Number(number) => Some(number),
      Self::Scalar(_) => None,
    }
  }
}

impl<'a, T: Real> From<&'a Number<T>> for Operand<'a, T> {
  fn from(number: &'a Number<T>) -> Self {
    Self::Number(number)
  }
}

macro_rules! scalar_operand {
  ($t:ty) => {
    impl<'a> From<$t> for Operand<'a, $t> {
      fn from(scalar: $t) -> Self {
        Self::Scalar(scalar)
      }
    }
  };
}

scalar_operand!(f32);
scalar_operand!(f64);


/// Differentiable element-wise functions, implemented by both
/// [Number](crate::Number) and [Array](crate::Array).
///
/// Total functions return their result directly. Functions that are only
/// defined on part of the real line return a [Result] and fail with
/// [Error::Domain] instead of producing NaN.

pub trait Elementary: Sized {
  type Inner: Real;

  fn negate(&self) -> Self;
  fn sin(&self) -> Self;
  fn cos(&self) -> Self;
  fn tan(&self) -> Self;
  fn atan(&self) -> Self;
  fn sinh(&self) -> Self;
  fn cosh(&self) -> Self;
  fn tanh(&self) -> Self;
  fn exp(&self) -> Self;
  fn logistic(&self) -> Self;
  fn powi(&self, n: i32) -> Self;

  fn asin(&self) -> Result<Self>;
  fn acos(&self) -> Result<Self>;
  fn sqrt(&self) -> Result<Self>;
  fn ln(&self) -> Result<Self>;
  fn powf(&self, exponent: Self::Inner) -> Result<Self>;

  /// Logarithm to the given base, or the natural logarithm for `None`.
  fn log(&self, base: Option<Self::Inner>) -> Result<Self>;

  fn sqr(&self) -> Self {
    self.powi(2)
  }
}


/// Apply a checked binary operation to any mix of numbers and scalars.

pub(crate) fn apply<T, O>(op: &O, lhs: Operand<'_, T>, rhs: Operand<'_, T>) -> Result<Number<T>>
where
  T: Real,
  O: BinaryOp<T> + ?Sized,
{
  if lhs.number().is_none() && rhs.number().is_none() {
    return Err(Error::TypeMismatch {
      expected: "at least one differentiable number",
      found: "two plain scalars",
    })
  }
  let (x, y) = (lhs.value(), rhs.value());
  op.domain(x, y)?;
  let (dx, dy) = op.derive(x, y);
  // A NaN factor from finite inputs means the rule is undefined here
  let undefined = |factor: T, operand: &Operand<T>| {
    operand.number().is_some() && factor.is_nan() && !x.is_nan() && !y.is_nan()
  };
  if undefined(dx, &lhs) || undefined(dy, &rhs) {
    return Err(Error::domain(op.name(), format!("({x}, {y})")))
  }
  Ok(Number::combine(op, lhs, rhs))
}

pub fn add<'a, T: Real>(x: impl Into<Operand<'a, T>>, y: impl Into<Operand<'a, T>>) -> Result<Number<T>> {
  apply(&elementary::Add, x.into(), y.into())
}

pub fn sub<'a, T: Real>(x: impl Into<Operand<'a, T>>, y: impl Into<Operand<'a, T>>) -> Result<Number<T>> {
  apply(&elementary::Sub, x.into(), y.into())
}

pub fn mul<'a, T: Real>(x: impl Into<Operand<'a, T>>, y: impl Into<Operand<'a, T>>) -> Result<Number<T>> {
  apply(&elementary::Mul, x.into(), y.into())
}

pub fn div<'a, T: Real>(x: impl Into<Operand<'a, T>>, y: impl Into<Operand<'a, T>>) -> Result<Number<T>> {
  apply(&elementary::Div, x.into(), y.into())
}

/// `x` raised to `y`, where either side may be a plain scalar.

pub fn pow<'a, T: Real>(x: impl Into<Operand<'a, T>>, y: impl Into<Operand<'a, T>>) -> Result<Number<T>> {
  apply(&elementary::Pow, x.into(), y.into())
}

pub fn negate<E: Elementary>(x: &E) -> E { x.negate() }
pub fn sin<E: Elementary>(x: &E) -> E { x.sin() }
pub fn cos<E: Elementary>(x: &E) -> E { x.cos() }
pub fn tan<E: Elementary>(x: &E) -> E { x.tan() }
pub fn atan<E: Elementary>(x: &E) -> E { x.atan() }
pub fn sinh<E: Elementary>(x: &E) -> E { x.sinh() }
pub fn cosh<E: Elementary>(x: &E) -> E { x.cosh() }
pub fn tanh<E: Elementary>(x: &E) -> E { x.tanh() }
pub fn exp<E: Elementary>(x: &E) -> E { x.exp() }
pub fn logistic<E: Elementary>(x: &E) -> E { x.logistic() }
pub fn asin<E: Elementary>(x: &E) -> Result<E> { x.asin() }
pub fn acos<E: Elementary>(x: &E) -> Result<E> { x.acos() }
pub fn sqrt<E: Elementary>(x: &E) -> Result<E> { x.sqrt() }
pub fn ln<E: Elementary>(x: &E) -> Result<E> { x.ln() }

pub fn log<E: Elementary>(x: &E, base: Option<E::Inner>) -> Result<E> {
  x.log(base)
}


#[cfg(test)]
mod tests {
  use approx::assert_relative_eq;

  use super::*;
  use crate::Array;

  #[test]
  fn named_forms_accept_scalars_on_either_side() {
    let x = Number::new(4.0f64);
    let a = sub(10.0, &x).unwrap();
    assert_eq!(a.value(), 6.0);
    assert_eq!(a.derivative(&x).unwrap(), -1.0);
    let b = div(&x, 2.0).unwrap();
    assert_eq!(b.derivative(&x).unwrap(), 0.5);
    let c = div(2.0, &x).unwrap();
    assert_relative_eq!(c.derivative(&x).unwrap(), -2.0 / 16.0);
  }

  #[test]
  fn two_scalars_are_a_type_error() {
    let result = add(1.0_f64, 2.0_f64);
    assert!(matches!(result, Err(Error::TypeMismatch { .. })));
  }

  #[test]
  fn pow_with_number_exponent() {
    let x = Number::new(2.0f64);
    let y = Number::new(3.0f64);
    let z = pow(&x, &y).unwrap();
    assert_eq!(z.value(), 8.0);
    assert_relative_eq!(z.derivative(&x).unwrap(), 12.0);
    assert_relative_eq!(z.derivative(&y).unwrap(), 8.0 * 2f64.ln());
    let w = pow(2.0, &y).unwrap();
    assert_relative_eq!(w.derivative(&y).unwrap(), 8.0 * 2f64.ln());
  }

  #[test]
  fn pow_of_negative_base_with_tracked_exponent_fails() {
    let x = Number::new(-2.0f64);
    let y = Number::new(2.0f64);
    assert!(matches!(pow(&x, &y), Err(Error::Domain { .. })));
    // Constant integer exponents stay fine
    assert_eq!(pow(&x, 2.0).unwrap().value(), 4.0);
  }

  #[test]
  fn zero_over_zero_is_reported_by_named_division() {
    let x = Number::new(0.0f64);
    let y = Number::new(0.0f64);
    assert!(matches!(div(&x, &y), Err(Error::Domain { .. })));
  }

  #[test]
  fn unary_forms_lift_over_arrays() {
    let q = Array::new(&[0.0f64, 1.0]);
    let w = exp(&q);
    assert_relative_eq!(w[0].value(), 1.0);
    assert_relative_eq!(w[1].value(), std::f64::consts::E);
    let l = log(&Number::new(8.0f64), Some(2.0)).unwrap();
    assert_relative_eq!(l.value(), 3.0);
  }
}
