use crate::{
  error::Result,
  number::Number,
  scalar::Real,
  ops::{ Elementary, Operand, elementary::* },
};


impl<T: Real> Elementary for Number<T> {
  type Inner = T;

  fn negate(&self) -> Self { self.map_unary(&Neg) }
  fn sin(&self) -> Self { self.map_unary(&Sin) }
  fn cos(&self) -> Self { self.map_unary(&Cos) }
  fn tan(&self) -> Self { self.map_unary(&Tan) }
  fn atan(&self) -> Self { self.map_unary(&Atan) }
  fn sinh(&self) -> Self { self.map_unary(&Sinh) }
  fn cosh(&self) -> Self { self.map_unary(&Cosh) }
  fn tanh(&self) -> Self { self.map_unary(&Tanh) }
  fn exp(&self) -> Self { self.map_unary(&Exp) }
  fn logistic(&self) -> Self { self.map_unary(&Logistic) }
  fn powi(&self, n: i32) -> Self { self.map_unary(&Powi { n }) }

  fn asin(&self) -> Result<Self> { self.unary_op(&Asin) }
  fn acos(&self) -> Result<Self> { self.unary_op(&Acos) }
  fn sqrt(&self) -> Result<Self> { self.unary_op(&Sqrt) }
  fn ln(&self) -> Result<Self> { self.unary_op(&Ln) }

  fn powf(&self, exponent: T) -> Result<Self> {
    self.unary_op(&Powf { exponent })
  }

  fn log(&self, base: Option<T>) -> Result<Self> {
    match base {
      Some(base) => self.unary_op(&Log { base }),
      None => self.unary_op(&Ln),
    }
  }
}

impl<T: Real> Number<T> {
  /// `self` raised to `exponent`, which may be another [Number] or a plain scalar.

  pub fn pow<'a>(&self, exponent: impl Into<Operand<'a, T>>) -> Result<Self> {
    self.binary_op(&Pow, exponent)
  }
}


impl<T: Real> std::ops::Neg for &Number<T> {
  type Output = Number<T>;

  fn neg(self) -> Self::Output {
    self.negate()
  }
}

impl<T: Real> std::ops::Neg for Number<T> {
  type Output = Number<T>;

  fn neg(self) -> Self::Output {
    self.negate()
  }
}

macro_rules! add_operator {
  ($op:ident, $meth:ident, $symbol:tt) => {
    impl<T: Real> std::ops::$op for &Number<T> { // &number * &other
      type Output = Number<T>;

      fn $meth(self, rhs: Self) -> Number<T> {
        Number::combine(&$op, Operand::Number(self), Operand::Number(rhs))
      }
    }

    impl<T: Real> std::ops::$op for Number<T> { // number * other
      type Output = Number<T>;

      fn $meth(self, rhs: Self) -> Number<T> {
        &self $symbol &rhs
      }
    }

    impl<T: Real> std::ops::$op<Number<T>> for &Number<T> { // &number * other
      type Output = Number<T>;

      fn $meth(self, rhs: Number<T>) -> Number<T> {
        self $symbol &rhs
      }
    }

    impl<T: Real> std::ops::$op<&Number<T>> for Number<T> { // number * &other
      type Output = Number<T>;

      fn $meth(self, rhs: &Number<T>) -> Number<T> {
        &self $symbol rhs
      }
    }

    impl<T: Real> std::ops::$op<T> for &Number<T> { // &number * T
      type Output = Number<T>;

      fn $meth(self, rhs: T) -> Number<T> {
        Number::combine(&$op, Operand::Number(self), Operand::Scalar(rhs))
      }
    }

    impl<T: Real> std::ops::$op<T> for Number<T> { // number * T
      type Output = Number<T>;

      fn $meth(self, rhs: T) -> Number<T> {
        &self $symbol rhs
      }
    }

    scalar_operator!(f32, $op, $meth);
    scalar_operator!(f64, $op, $meth);
  };
}

macro_rules! scalar_operator {
  ($t:ty, $op:ident, $meth:ident) => {
    impl std::ops::$op<&Number<$t>> for $t { // T * &number
      type Output = Number<$t>;

      fn $meth(self, rhs: &Number<$t>) -> Number<$t> {
        Number::combine(&$op, Operand::Scalar(self), Operand::Number(rhs))
      }
    }

    impl std::ops::$op<Number<$t>> for $t { // T * number
      type Output = Number<$t>;

      fn $meth(self, rhs: Number<$t>) -> Number<$t> {
        Number::combine(&$op, Operand::Scalar(self), Operand::Number(&rhs))
      }
    }
  };
}

add_operator!(Add, add, +);
add_operator!(Sub, sub, -);
add_operator!(Mul, mul, *);
add_operator!(Div, div, /);
