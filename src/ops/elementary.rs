use crate::{
  error::{ Error, Result },
  number::Number,
  scalar::{ Real, lit, is_integer },
  ops::{ UnaryOp, BinaryOp },
};


/// Every built-in single-argument operation, with representative parameters.

pub fn unary_catalog<T: Real>() -> Vec<Box<dyn UnaryOp<T>>> {
  vec![
    Box::new(Neg),
    Box::new(Sin),
    Box::new(Cos),
    Box::new(Tan),
    Box::new(Asin),
    Box::new(Acos),
    Box::new(Atan),
    Box::new(Sinh),
    Box::new(Cosh),
    Box::new(Tanh),
    Box::new(Exp),
    Box::new(Ln),
    Box::new(Log { base: lit(10.0) }),
    Box::new(Sqrt),
    Box::new(Logistic),
    Box::new(Powi { n: 3 }),
    Box::new(Powf { exponent: lit(2.5) }),
  ]
}


/// Every built-in two-argument operation.

pub fn binary_catalog<T: Real>() -> Vec<Box<dyn BinaryOp<T>>> {
  vec![
    Box::new(Add),
    Box::new(Sub),
    Box::new(Mul),
    Box::new(Div),
    Box::new(Pow),
  ]
}


#[derive(Debug, Clone, Copy)]
pub struct Add;

impl<T: Real> BinaryOp<T> for Add {
  fn name(&self) -> &'static str { "add" }

  fn run(&self, x: T, y: T) -> T {
    x + y
  }

  fn derive(&self, _x: T, _y: T) -> (T, T) {
    (T::one(), T::one())
  }
}


#[derive(Debug, Clone, Copy)]
pub struct Sub;

impl<T: Real> BinaryOp<T> for Sub {
  fn name(&self) -> &'static str { "sub" }

  fn run(&self, x: T, y: T) -> T {
    x - y
  }

  fn derive(&self, _x: T, _y: T) -> (T, T) {
    (T::one(), -T::one())
  }
}


#[derive(Debug, Clone, Copy)]
pub struct Mul;

impl<T: Real> BinaryOp<T> for Mul {
  fn name(&self) -> &'static str { "mul" }

  fn run(&self, x: T, y: T) -> T {
    x * y
  }

  fn derive(&self, x: T, y: T) -> (T, T) {
    (y, x)
  }

  fn same_operand(&self, x: &Number<T>) -> Option<Number<T>> {
    Some(x.map_unary(&Powi { n: 2 }))
  }
}


#[derive(Debug, Clone, Copy)]
pub struct Div;

impl<T: Real> BinaryOp<T> for Div {
  fn name(&self) -> &'static str { "div" }

  fn run(&self, x: T, y: T) -> T {
    x / y
  }

  fn derive(&self, x: T, y: T) -> (T, T) {
    (T::one() / y, -x / (y * y))
  }
}


/// General power `x^y`.

#[derive(Debug, Clone, Copy)]
pub struct Pow;

impl<T: Real> BinaryOp<T> for Pow {
  fn name(&self) -> &'static str { "pow" }

  fn run(&self, x: T, y: T) -> T {
    x.powf(y)
  }

  fn derive(&self, x: T, y: T) -> (T, T) {
    let dx = if y == T::zero() { T::zero() } else { y * x.powf(y - T::one()) };
    // x^y ln(x) tends to zero as x approaches zero from above
    let dy = if x == T::zero() { T::zero() } else { x.powf(y) * x.ln() };
    (dx, dy)
  }

  fn domain(&self, x: T, y: T) -> Result<()> {
    power_domain("pow", x, y)
  }
}

fn power_domain<T: Real>(op: &'static str, x: T, y: T) -> Result<()> {
  if (x <= T::zero() && !is_integer(y)) || (x == T::zero() && y < T::zero()) {
    return Err(Error::domain(op, format!("base {x} with exponent {y}")))
  }
  Ok(())
}


#[derive(Debug, Clone, Copy)]
pub struct Neg;

impl<T: Real> UnaryOp<T> for Neg {
  fn name(&self) -> &'static str { "neg" }

  fn run(&self, x: T) -> T {
    -x
  }

  fn derive(&self, _x: T) -> T {
    -T::one()
  }
}


#[derive(Debug, Clone, Copy)]
pub struct Sin;

impl<T: Real> UnaryOp<T> for Sin {
  fn name(&self) -> &'static str { "sin" }

  fn run(&self, x: T) -> T {
    x.sin()
  }

  fn derive(&self, x: T) -> T {
    x.cos()
  }
}


#[derive(Debug, Clone, Copy)]
pub struct Cos;

impl<T: Real> UnaryOp<T> for Cos {
  fn name(&self) -> &'static str { "cos" }

  fn run(&self, x: T) -> T {
    x.cos()
  }

  fn derive(&self, x: T) -> T {
    -x.sin()
  }
}


#[derive(Debug, Clone, Copy)]
pub struct Tan;

impl<T: Real> UnaryOp<T> for Tan {
  fn name(&self) -> &'static str { "tan" }

  fn run(&self, x: T) -> T {
    x.tan()
  }

  fn derive(&self, x: T) -> T {
    let cos = x.cos();
    T::one() / (cos * cos)
  }
}


#[derive(Debug, Clone, Copy)]
pub struct Asin;

impl<T: Real> UnaryOp<T> for Asin {
  fn name(&self) -> &'static str { "asin" }

  fn run(&self, x: T) -> T {
    x.asin()
  }

  fn derive(&self, x: T) -> T {
    T::one() / (T::one() - x * x).sqrt()
  }

  fn domain(&self, x: T) -> Result<()> {
    unit_interval("asin", x)
  }
}


#[derive(Debug, Clone, Copy)]
pub struct Acos;

impl<T: Real> UnaryOp<T> for Acos {
  fn name(&self) -> &'static str { "acos" }

  fn run(&self, x: T) -> T {
    x.acos()
  }

  fn derive(&self, x: T) -> T {
    -T::one() / (T::one() - x * x).sqrt()
  }

  fn domain(&self, x: T) -> Result<()> {
    unit_interval("acos", x)
  }
}

fn unit_interval<T: Real>(op: &'static str, x: T) -> Result<()> {
  if !(x.abs() <= T::one()) {
    return Err(Error::domain(op, x))
  }
  Ok(())
}


#[derive(Debug, Clone, Copy)]
pub struct Atan;

impl<T: Real> UnaryOp<T> for Atan {
  fn name(&self) -> &'static str { "atan" }

  fn run(&self, x: T) -> T {
    x.atan()
  }

  fn derive(&self, x: T) -> T {
    T::one() / (T::one() + x * x)
  }
}


#[derive(Debug, Clone, Copy)]
pub struct Sinh;

impl<T: Real> UnaryOp<T> for Sinh {
  fn name(&self) -> &'static str { "sinh" }

  fn run(&self, x: T) -> T {
    x.sinh()
  }

  fn derive(&self, x: T) -> T {
    x.cosh()
  }
}


#[derive(Debug, Clone, Copy)]
pub struct Cosh;

impl<T: Real> UnaryOp<T> for Cosh {
  fn name(&self) -> &'static str { "cosh" }

  fn run(&self, x: T) -> T {
    x.cosh()
  }

  fn derive(&self, x: T) -> T {
    x.sinh()
  }
}


#[derive(Debug, Clone, Copy)]
pub struct Tanh;

impl<T: Real> UnaryOp<T> for Tanh {
  fn name(&self) -> &'static str { "tanh" }

  fn run(&self, x: T) -> T {
    x.tanh()
  }

  fn derive(&self, x: T) -> T {
    let tanh = x.tanh();
    T::one() - tanh * tanh
  }
}


#[derive(Debug, Clone, Copy)]
pub struct Exp;

impl<T: Real> UnaryOp<T> for Exp {
  fn name(&self) -> &'static str { "exp" }

  fn run(&self, x: T) -> T {
    x.exp()
  }

  fn derive(&self, x: T) -> T {
    x.exp()
  }
}


/// Natural logarithm.

#[derive(Debug, Clone, Copy)]
pub struct Ln;

impl<T: Real> UnaryOp<T> for Ln {
  fn name(&self) -> &'static str { "ln" }

  fn run(&self, x: T) -> T {
    x.ln()
  }

  fn derive(&self, x: T) -> T {
    T::one() / x
  }

  fn domain(&self, x: T) -> Result<()> {
    if !(x > T::zero()) {
      return Err(Error::domain("ln", x))
    }
    Ok(())
  }
}


/// Logarithm to an arbitrary positive base other than one.

#[derive(Debug, Clone, Copy)]
pub struct Log<T: Real> {
  pub base: T,
}

impl<T: Real> UnaryOp<T> for Log<T> {
  fn name(&self) -> &'static str { "log" }

  fn run(&self, x: T) -> T {
    x.ln() / self.base.ln()
  }

  fn derive(&self, x: T) -> T {
    T::one() / (x * self.base.ln())
  }

  fn domain(&self, x: T) -> Result<()> {
    if !(self.base > T::zero()) || self.base == T::one() {
      return Err(Error::domain("log", format!("base {}", self.base)))
    }
    if !(x > T::zero()) {
      return Err(Error::domain("log", x))
    }
    Ok(())
  }
}


#[derive(Debug, Clone, Copy)]
pub struct Sqrt;

impl<T: Real> UnaryOp<T> for Sqrt {
  fn name(&self) -> &'static str { "sqrt" }

  fn run(&self, x: T) -> T {
    x.sqrt()
  }

  fn derive(&self, x: T) -> T {
    T::one() / (lit::<T>(2.0) * x.sqrt())
  }

  fn domain(&self, x: T) -> Result<()> {
    if !(x >= T::zero()) {
      return Err(Error::domain("sqrt", x))
    }
    Ok(())
  }
}


/// Standard logistic function `1 / (1 + e^-x)`.

#[derive(Debug, Clone, Copy)]
pub struct Logistic;

impl<T: Real> UnaryOp<T> for Logistic {
  fn name(&self) -> &'static str { "logistic" }

  fn run(&self, x: T) -> T {
    T::one() / (T::one() + (-x).exp())
  }

  fn derive(&self, x: T) -> T {
    let result = self.run(x);
    result * (T::one() - result)
  }
}


/// Integer power. Defined everywhere except for zero raised to a negative power,
/// which follows IEEE semantics.

#[derive(Debug, Clone, Copy)]
pub struct Powi {
  pub n: i32,
}

impl<T: Real> UnaryOp<T> for Powi {
  fn name(&self) -> &'static str { "powi" }

  fn run(&self, x: T) -> T {
    x.powi(self.n)
  }

  fn derive(&self, x: T) -> T {
    if self.n == 0 { return T::zero() }
    let n = lit::<T>(self.n as f64);
    match self.n.checked_sub(1) {
      Some(m) => n * x.powi(m),
      None => n * x.powi(self.n) / x,
    }
  }
}


/// Power with a constant real exponent.

#[derive(Debug, Clone, Copy)]
pub struct Powf<T: Real> {
  pub exponent: T,
}

impl<T: Real> UnaryOp<T> for Powf<T> {
  fn name(&self) -> &'static str { "powf" }

  fn run(&self, x: T) -> T {
    x.powf(self.exponent)
  }

  fn derive(&self, x: T) -> T {
    if self.exponent == T::zero() { return T::zero() }
    self.exponent * x.powf(self.exponent - T::one())
  }

  fn domain(&self, x: T) -> Result<()> {
    power_domain("powf", x, self.exponent)
  }
}


#[cfg(test)]
mod tests {
  use approx::{ assert_relative_eq, assert_abs_diff_eq };

  use super::*;

  fn central_difference(f: impl Fn(f64) -> f64, x: f64) -> f64 {
    let h = 1e-6_f64;
    (f(x + h) - f(x - h)) / (2.0 * h)
  }

  #[test]
  fn unary_rules_match_finite_differences() {
    for op in unary_catalog::<f64>() {
      for &x in &[0.3, 0.7] {
        op.domain(x).unwrap();
        let numeric = central_difference(|x| op.run(x), x);
        assert_abs_diff_eq!(op.derive(x), numeric, epsilon = 1e-6);
      }
    }
  }

  #[test]
  fn binary_rules_match_finite_differences() {
    for op in binary_catalog::<f64>() {
      let (x, y) = (0.7, 1.3);
      op.domain(x, y).unwrap();
      let (dx, dy) = op.derive(x, y);
      assert_abs_diff_eq!(dx, central_difference(|x| op.run(x, y), x), epsilon = 1e-6);
      assert_abs_diff_eq!(dy, central_difference(|y| op.run(x, y), y), epsilon = 1e-6);
    }
  }

  #[test]
  fn values_match_std() {
    let x = 0.42_f64;
    assert_eq!(Sin.run(x), x.sin());
    assert_eq!(Cos.run(x), x.cos());
    assert_eq!(Tan.run(x), x.tan());
    assert_eq!(Asin.run(x), x.asin());
    assert_eq!(Acos.run(x), x.acos());
    assert_eq!(Atan.run(x), x.atan());
    assert_eq!(Sinh.run(x), x.sinh());
    assert_eq!(Cosh.run(x), x.cosh());
    assert_eq!(Tanh.run(x), x.tanh());
    assert_eq!(Exp.run(x), x.exp());
    assert_eq!(Ln.run(x), x.ln());
    assert_eq!(Sqrt.run(x), x.sqrt());
    assert_relative_eq!(Log { base: 10.0 }.run(x), x.log10());
    assert_relative_eq!(Logistic.run(0.0_f64), 0.5);
  }

  #[test]
  fn closed_form_derivatives() {
    assert_relative_eq!(UnaryOp::<f64>::derive(&Tan, 0.0), 1.0);
    assert_relative_eq!(UnaryOp::<f64>::derive(&Asin, 0.0), 1.0);
    assert_relative_eq!(UnaryOp::<f64>::derive(&Acos, 0.0), -1.0);
    assert_relative_eq!(UnaryOp::<f64>::derive(&Logistic, 0.0), 0.25);
    assert_relative_eq!(UnaryOp::<f64>::derive(&Powi { n: 2 }, 3.0), 6.0);
    assert_relative_eq!(Log { base: 2.0 }.derive(4.0), 1.0 / (4.0 * 2f64.ln()));
  }

  #[test]
  fn extreme_integer_powers() {
    let op = Powi { n: i32::MIN };
    assert_eq!(UnaryOp::<f64>::derive(&op, 1.0), -2147483648.0);
    assert_eq!(UnaryOp::<f64>::derive(&op, 2.0), 0.0);
    assert_eq!(UnaryOp::<f64>::derive(&Powi { n: i32::MAX }, 1.0), 2147483647.0);
  }

  #[test]
  fn domains() {
    assert!(UnaryOp::<f64>::domain(&Ln, 0.0).is_err());
    assert!(UnaryOp::<f64>::domain(&Ln, -1.0).is_err());
    assert!(UnaryOp::<f64>::domain(&Sqrt, -1e-9).is_err());
    assert!(UnaryOp::<f64>::domain(&Sqrt, 0.0).is_ok());
    assert!(UnaryOp::<f64>::domain(&Asin, 1.5).is_err());
    assert!(UnaryOp::<f64>::domain(&Acos, -1.0).is_ok());
    assert!(UnaryOp::<f64>::domain(&Asin, f64::NAN).is_err());
    assert!(Log { base: 1.0 }.domain(2.0).is_err());
    assert!(Log { base: -2.0 }.domain(2.0).is_err());
    assert!(BinaryOp::<f64>::domain(&Pow, -2.0, 0.5).is_err());
    assert!(BinaryOp::<f64>::domain(&Pow, 0.0, 0.5).is_err());
    assert!(BinaryOp::<f64>::domain(&Pow, 0.0, -1.0).is_err());
    assert!(BinaryOp::<f64>::domain(&Pow, -2.0, 3.0).is_ok());
    assert!(Powf { exponent: 0.5 }.domain(-1.0).is_err());
  }
}
