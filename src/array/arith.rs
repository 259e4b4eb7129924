use crate::{
  array::{ Array, ArrayOperand },
  error::Result,
  number::Number,
  scalar::Real,
  ops::{ Elementary, Operand, elementary::* },
};


impl<T: Real> Elementary for Array<T> {
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


// Named forms. Unlike the operators, these check every element's domain.

impl<T: Real> Array<T> {
  pub fn try_add<'a>(&self, rhs: impl Into<ArrayOperand<'a, T>>) -> Result<Self> {
    self.binary_op(&Add, rhs)
  }

  pub fn try_sub<'a>(&self, rhs: impl Into<ArrayOperand<'a, T>>) -> Result<Self> {
    self.binary_op(&Sub, rhs)
  }

  pub fn try_mul<'a>(&self, rhs: impl Into<ArrayOperand<'a, T>>) -> Result<Self> {
    self.binary_op(&Mul, rhs)
  }

  pub fn try_div<'a>(&self, rhs: impl Into<ArrayOperand<'a, T>>) -> Result<Self> {
    self.binary_op(&Div, rhs)
  }

  pub fn pow<'a>(&self, exponent: impl Into<ArrayOperand<'a, T>>) -> Result<Self> {
    self.binary_op(&Pow, exponent)
  }

  fn map_binary<'a, O: crate::ops::BinaryOp<T>>(&self, op: &O, rhs: impl Into<ArrayOperand<'a, T>>) -> Result<Self> {
    self.zip_operand(rhs.into(), |a, b| Ok(Number::combine(op, Operand::Number(a), b)) )
  }
}


impl<T: Real> std::ops::Neg for &Array<T> {
  type Output = Array<T>;

  fn neg(self) -> Self::Output {
    self.negate()
  }
}

impl<T: Real> std::ops::Neg for Array<T> {
  type Output = Array<T>;

  fn neg(self) -> Self::Output {
    self.negate()
  }
}

macro_rules! add_operator {
  ($op:ident, $meth:ident, $symbol:tt) => {
    // Operands of possibly different length

    impl<T: Real> std::ops::$op for &Array<T> { // &array * &other
      type Output = Result<Array<T>>;

      fn $meth(self, rhs: Self) -> Result<Array<T>> {
        self.map_binary(&$op, rhs)
      }
    }

    impl<T: Real> std::ops::$op for Array<T> { // array * other
      type Output = Result<Array<T>>;

      fn $meth(self, rhs: Self) -> Result<Array<T>> {
        &self $symbol &rhs
      }
    }

    impl<T: Real> std::ops::$op<&Array<T>> for Array<T> { // array * &other
      type Output = Result<Array<T>>;

      fn $meth(self, rhs: &Array<T>) -> Result<Array<T>> {
        &self $symbol rhs
      }
    }

    impl<T: Real> std::ops::$op<Array<T>> for &Array<T> { // &array * other
      type Output = Result<Array<T>>;

      fn $meth(self, rhs: Array<T>) -> Result<Array<T>> {
        self $symbol &rhs
      }
    }

    impl<T: Real> std::ops::$op<&[T]> for &Array<T> { // &array * &[T]
      type Output = Result<Array<T>>;

      fn $meth(self, rhs: &[T]) -> Result<Array<T>> {
        self.map_binary(&$op, rhs)
      }
    }

    impl<T: Real, const N: usize> std::ops::$op<&[T; N]> for &Array<T> { // &array * &[T; N]
      type Output = Result<Array<T>>;

      fn $meth(self, rhs: &[T; N]) -> Result<Array<T>> {
        self.map_binary(&$op, rhs)
      }
    }

    // Broadcasting

    impl<T: Real> std::ops::$op<&Number<T>> for &Array<T> { // &array * &number
      type Output = Array<T>;

      fn $meth(self, rhs: &Number<T>) -> Array<T> {
        self.iter().map(|a| Number::combine(&$op, Operand::Number(a), Operand::Number(rhs)) ).collect()
      }
    }

    impl<T: Real> std::ops::$op<Number<T>> for &Array<T> { // &array * number
      type Output = Array<T>;

      fn $meth(self, rhs: Number<T>) -> Array<T> {
        self $symbol &rhs
      }
    }

    impl<T: Real> std::ops::$op<&Array<T>> for &Number<T> { // &number * &array
      type Output = Array<T>;

      fn $meth(self, rhs: &Array<T>) -> Array<T> {
        rhs.iter().map(|b| Number::combine(&$op, Operand::Number(self), Operand::Number(b)) ).collect()
      }
    }

    impl<T: Real> std::ops::$op<T> for &Array<T> { // &array * T
      type Output = Array<T>;

      fn $meth(self, rhs: T) -> Array<T> {
        self.iter().map(|a| Number::combine(&$op, Operand::Number(a), Operand::Scalar(rhs)) ).collect()
      }
    }

    impl<T: Real> std::ops::$op<T> for Array<T> { // array * T
      type Output = Array<T>;

      fn $meth(self, rhs: T) -> Array<T> {
        &self $symbol rhs
      }
    }

    scalar_operator!(f32, $op, $meth, $symbol);
    scalar_operator!(f64, $op, $meth, $symbol);
  };
}

macro_rules! scalar_operator {
  ($t:ty, $op:ident, $meth:ident, $symbol:tt) => {
    impl std::ops::$op<&Array<$t>> for $t { // T * &array
      type Output = Array<$t>;

      fn $meth(self, rhs: &Array<$t>) -> Array<$t> {
        rhs.iter().map(|b| Number::combine(&$op, Operand::Scalar(self), Operand::Number(b)) ).collect()
      }
    }

    impl std::ops::$op<Array<$t>> for $t { // T * array
      type Output = Array<$t>;

      fn $meth(self, rhs: Array<$t>) -> Array<$t> {
        self $symbol &rhs
      }
    }
  };
}

add_operator!(Add, add, +);
add_operator!(Sub, sub, -);
add_operator!(Mul, mul, *);
add_operator!(Div, div, /);
