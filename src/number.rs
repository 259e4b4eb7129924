use std::rc::Rc;

mod partials;
mod arith;

pub use partials::{ NodeId, Partials };

use crate::{
  error::{ Error, Result },
  scalar::Real,
  jacobian::{ Jacobian, Order, Strictness },
  ops::{ UnaryOp, BinaryOp, Operand },
};


/// How to initialize the partials of a new leaf [Number].

#[derive(Debug, Clone)]
pub enum Seed<T: Real> {
  /// Derivative of the new node with respect to itself.
  /// Scales every partial taken downstream with respect to this node.
  Derivative(T),
  /// Externally known partials with respect to other nodes.
  /// The map gets copied and the new node's self entry is set to one.
  Partials(Partials<T>),
}


#[derive(Debug)]
struct Node<T: Real> {
  id: NodeId,
  value: T,
  partials: Partials<T>,
}


/// Differentiable scalar.
///
/// Numbers carry their value and the partial derivatives of that value with
/// respect to every node that contributed to it. These get computed eagerly
/// whenever an operation produces a new Number, so querying a
/// [jacobian](Number::jacobian) never needs to walk the computation again.
///
/// Numbers are immutable. Cloning one is cheap and yields the same node.

#[derive(Debug, Clone)]
pub struct Number<T: Real> {
  node: Rc<Node<T>>,
}

impl<T: Real> From<T> for Number<T> {
  fn from(value: T) -> Self {
    Self::new(value)
  }
}

/// Equal values and equal partials, ignoring each node's self entry.
/// This is the same as [Number::equivalent].

impl<T: Real> PartialEq for Number<T> {
  fn eq(&self, rhs: &Self) -> bool {
    self.equivalent(rhs)
  }
}

impl<T: Real> Number<T> {
  /// Create an independent variable.

  pub fn new(value: T) -> Self {
    Self::seeded(value, Seed::Derivative(T::one()))
  }

  pub fn seeded(value: T, seed: Seed<T>) -> Self {
    let id = NodeId::next();
    let partials = match seed {
      Seed::Derivative(derivative) => {
        let mut partials = Partials::new();
        partials.insert(id, derivative);
        partials
      },
      Seed::Partials(mut partials) => {
        partials.insert(id, T::one());
        partials
      },
    };
    Self { node: Rc::new(Node { id, value, partials }) }
  }

  /// Result node of an operation. Its self entry is always one.

  pub(crate) fn operation(value: T, partials: Partials<T>) -> Self {
    Self::seeded(value, Seed::Partials(partials))
  }

  pub fn id(&self) -> NodeId {
    self.node.id
  }

  pub fn value(&self) -> T {
    self.node.value
  }

  pub fn partials(&self) -> &Partials<T> {
    &self.node.partials
  }

  /// Partial derivative with respect to `wrt`, if it contributed.

  pub fn partial(&self, wrt: &Self) -> Option<T> {
    self.partials().get(wrt.id())
  }

  /// Partial derivative with respect to `wrt`, failing if it never contributed.

  pub fn derivative(&self, wrt: &Self) -> Result<T> {
    Strictness::Strict.lookup(self, wrt)
  }

  pub fn gradient(&self, wrt: &[Self]) -> Result<Vec<T>> {
    wrt.iter().map(|var| self.derivative(var) ).collect()
  }

  /// Partial derivatives with respect to `order`.
  /// Fails for variables that never contributed to this number.

  pub fn jacobian<'a>(&self, order: impl Into<Order<'a, T>>) -> Result<Jacobian<T>> {
    self.jacobian_with(order, Strictness::Strict)
  }

  pub fn jacobian_with<'a>(&self, order: impl Into<Order<'a, T>>, strictness: Strictness) -> Result<Jacobian<T>> {
    match order.into() {
      Order::Single(wrt) => Ok(Jacobian::Scalar(strictness.lookup(self, wrt)?)),
      Order::Sequence(wrt) => wrt.iter()
        .map(|var| strictness.lookup(self, var) )
        .collect::<Result<Vec<_>>>()
        .map(Jacobian::Vector),
    }
  }

  /// Structural equality of values and partials, not identity.

  pub fn equivalent(&self, other: &Self) -> bool {
    self.value() == other.value() &&
      self.partials().equivalent(self.id(), other.partials(), other.id())
  }

  pub fn is_same_node(&self, other: &Self) -> bool {
    self.id() == other.id()
  }

  /// Apply any single-argument operation, checking its domain first.
  /// Points where a finite input has no finite derivative,
  /// such as `sqrt(0)` or `asin(1)`, are domain errors as well.

  pub fn unary_op<O: UnaryOp<T> + ?Sized>(&self, op: &O) -> Result<Self> {
    let x = self.value();
    op.domain(x)?;
    if x.is_finite() && !op.derive(x).is_finite() {
      return Err(Error::domain(op.name(), x))
    }
    Ok(self.map_unary(op))
  }

  /// Apply any two-argument operation with this number on the left.

  pub fn binary_op<'a, O: BinaryOp<T> + ?Sized>(&self, op: &O, rhs: impl Into<Operand<'a, T>>) -> Result<Self> {
    crate::ops::apply(op, Operand::Number(self), rhs.into())
  }

  pub(crate) fn map_unary<O: UnaryOp<T> + ?Sized>(&self, op: &O) -> Self {
    let x = self.value();
    Self::operation(op.run(x), Partials::combine(&[(self.partials(), op.derive(x))]))
  }

  /// Unchecked chain rule for two operands.

  pub(crate) fn combine<O: BinaryOp<T> + ?Sized>(op: &O, lhs: Operand<'_, T>, rhs: Operand<'_, T>) -> Self {
    if let (Some(a), Some(b)) = (lhs.number(), rhs.number()) {
      if a.is_same_node(b) {
        if let Some(result) = op.same_operand(a) { return result }
      }
    }
    let (x, y) = (lhs.value(), rhs.value());
    let (dx, dy) = op.derive(x, y);
    let terms: Vec<_> = [(lhs, dx), (rhs, dy)]
      .into_iter()
      .filter_map(|(operand, factor)| operand.number().map(|number| (number.partials(), factor) ))
      .collect();
    Self::operation(op.run(x, y), Partials::combine(&terms))
  }
}

/// Sums become a single node, no matter how many terms.

impl<'a, T: Real> std::iter::Sum<&'a Number<T>> for Number<T> {
  fn sum<I: Iterator<Item=&'a Number<T>>>(iter: I) -> Self {
    let numbers: Vec<_> = iter.collect();
    let value: T = numbers.iter().map(|number| number.value() ).sum();
    let terms: Vec<_> = numbers.iter().map(|number| (number.partials(), T::one()) ).collect();
    Self::operation(value, Partials::combine(&terms))
  }
}

impl<T: Real> std::iter::Sum for Number<T> {
  fn sum<I: Iterator<Item=Number<T>>>(iter: I) -> Self {
    iter.collect::<Vec<_>>().iter().sum()
  }
}

impl<T: Real> std::fmt::Display for Number<T> {
  fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
    write!(f, "Number(val={})", self.value())
  }
}


#[cfg(test)]
mod tests {
  use approx::{ assert_relative_eq, assert_abs_diff_eq };

  use super::*;
  use crate::{ Error, Array, ops::* };

  #[test]
  fn leaf_derivative_is_one() {
    let x = Number::new(3.5f64);
    assert_eq!(x.derivative(&x), Ok(1.0));
    assert_eq!(x.jacobian(&x).unwrap(), Jacobian::Scalar(1.0));
  }

  #[test]
  fn sum_rule() {
    let x = Number::new(2.0f64);
    let y = Number::new(5.0f64);
    let z = &x + &y;
    assert_eq!(z.value(), 7.0);
    assert_eq!(z.derivative(&x), Ok(1.0));
    assert_eq!(z.derivative(&y), Ok(1.0));
  }

  #[test]
  fn product_and_quotient_rules() {
    let x = Number::new(2.0f64);
    let y = Number::new(5.0f64);
    let p = &x * &y;
    assert_eq!(p.derivative(&x), Ok(5.0));
    assert_eq!(p.derivative(&y), Ok(2.0));
    let q = &x / &y;
    assert_relative_eq!(q.derivative(&x).unwrap(), 1.0 / 5.0);
    assert_relative_eq!(q.derivative(&y).unwrap(), -2.0 / 25.0);
  }

  #[test]
  fn squaring_the_same_node() {
    let x = Number::new(3.0f64);
    let square = &x * &x;
    assert_eq!(square.value(), 9.0);
    assert_eq!(square.derivative(&x), Ok(6.0));
    assert_eq!(square.derivative(&x), x.powf(2.0).unwrap().derivative(&x));
    assert_eq!(square.derivative(&x), pow(&x, 2.0).unwrap().derivative(&x));
    assert_eq!(mul(&x, &x).unwrap().derivative(&x), Ok(6.0));
  }

  #[test]
  fn shared_dependencies_accumulate() {
    let t = Number::new(1.5f64);
    let a = 2.0f64 * &t;
    let b = 3.0f64 * &t;
    assert_eq!((&a + &b).derivative(&t), Ok(5.0));
  }

  #[test]
  fn chain_rule() {
    let x = Number::new(0.8f64);
    let z = x.cos().sin();
    let expected = (0.8f64.cos()).cos() * -(0.8f64.sin());
    assert_relative_eq!(z.value(), 0.8f64.cos().sin());
    assert_relative_eq!(z.derivative(&x).unwrap(), expected);
    let h = 1e-6_f64;
    let numeric = ((0.8 + h).cos().sin() - (0.8 - h).cos().sin()) / (2.0 * h);
    assert_abs_diff_eq!(z.derivative(&x).unwrap(), numeric, epsilon = 1e-6);
  }

  #[test]
  fn intermediate_nodes_are_tracked() {
    let x = Number::new(0.5f64);
    let c = x.cos();
    let z = c.sin();
    assert_relative_eq!(z.derivative(&c).unwrap(), c.value().cos());
  }

  #[test]
  fn exp_of_log_round_trips() {
    let x = Number::new(2.75f64);
    let y = x.ln().unwrap().exp();
    assert_relative_eq!(y.value(), 2.75);
    assert_relative_eq!(y.derivative(&x).unwrap(), 1.0);
  }

  #[test]
  fn end_to_end() {
    let x = Number::new(2.0f64);
    let y = Number::new(3.0f64);
    let z = &x * &y + x.powi(2);
    assert_eq!(z.value(), 10.0);
    assert_eq!(z.derivative(&x), Ok(7.0));
    assert_eq!(z.derivative(&y), Ok(2.0));
    assert_eq!(z.jacobian(&[x.clone(), y.clone()]).unwrap(), Jacobian::Vector(vec![7.0, 2.0]));
  }

  #[test]
  fn untracked_variables() {
    let x = Number::new(1.0f64);
    let y = Number::new(2.0f64);
    let z = x.sin();
    assert_eq!(z.derivative(&y), Err(Error::UntrackedVariable(y.id())));
    assert!(z.jacobian(&[x.clone(), y.clone()]).is_err());
    let lenient = z.jacobian_with(&[x.clone(), y.clone()], Strictness::Lenient).unwrap();
    assert_eq!(lenient, Jacobian::Vector(vec![1f64.cos(), 0.0]));
    assert_eq!(z.partial(&y), None);
  }

  #[test]
  fn seeds() {
    let x = Number::seeded(2.0f64, Seed::Derivative(3.0));
    assert_eq!(x.derivative(&x), Ok(3.0));
    assert_eq!((&x * 4.0).derivative(&x), Ok(12.0));

    let t = Number::new(1.0f64);
    let seed = Partials::new().with(&t, 2.0);
    let u = Number::seeded(5.0f64, Seed::Partials(seed.clone()));
    let w = Number::seeded(6.0f64, Seed::Partials(seed.clone()));
    assert_eq!(u.derivative(&u), Ok(1.0));
    assert_eq!(u.derivative(&t), Ok(2.0));
    // The caller's map stays untouched
    assert_eq!(seed.len(), 1);
    assert!(!w.partials().contains(u.id()));
  }

  #[test]
  fn equivalence_is_structural() {
    let x = Number::new(2.0f64);
    let a = &x * 3.0;
    let b = 3.0f64 * &x;
    assert!(a.equivalent(&b));
    assert_eq!(a, b);
    assert!(!a.is_same_node(&b));
    assert_ne!(Number::new(2.0f64), &x + 0.0);
    assert_eq!(Number::new(2.0f64), Number::new(2.0f64));
  }

  #[test]
  fn domain_errors_surface() {
    let x = Number::new(-1.0f64);
    assert!(matches!(x.ln(), Err(Error::Domain { op: "ln", .. })));
    assert!(matches!(x.sqrt(), Err(Error::Domain { op: "sqrt", .. })));
    assert!(matches!(Number::new(1.5f64).asin(), Err(Error::Domain { op: "asin", .. })));
    assert!(matches!(x.powf(0.5), Err(Error::Domain { .. })));
  }

  #[test]
  fn infinite_slopes_are_domain_errors() {
    assert!(matches!(Number::new(0.0f64).sqrt(), Err(Error::Domain { op: "sqrt", .. })));
    assert!(matches!(Number::new(1.0f64).asin(), Err(Error::Domain { op: "asin", .. })));
    assert!(matches!(Number::new(-1.0f64).acos(), Err(Error::Domain { op: "acos", .. })));
    assert!(Array::new(&[4.0f64, 0.0]).sqrt().is_err());
    let four = Number::new(4.0f64);
    assert_eq!(four.sqrt().unwrap().derivative(&four), Ok(0.25));
  }

  #[test]
  fn custom_operations() {
    #[derive(Debug)]
    struct Cube;

    impl UnaryOp<f64> for Cube {
      fn name(&self) -> &'static str { "cube" }
      fn run(&self, x: f64) -> f64 { x * x * x }
      fn derive(&self, x: f64) -> f64 { 3.0 * x * x }
    }

    let x = Number::new(2.0f64);
    let y = x.unary_op(&Cube).unwrap();
    assert_eq!(y.value(), 8.0);
    assert_eq!(y.derivative(&x), Ok(12.0));
  }

  #[derive(Debug)]
  struct Hypot;

  impl BinaryOp<f64> for Hypot {
    fn name(&self) -> &'static str { "hypot" }
    fn run(&self, x: f64, y: f64) -> f64 { x.hypot(y) }
    fn derive(&self, x: f64, y: f64) -> (f64, f64) {
      let r = x.hypot(y);
      (x / r, y / r)
    }
  }

  #[test]
  fn custom_binary_operations() {
    let x = Number::new(3.0f64);
    let y = Number::new(4.0f64);
    let z = x.binary_op(&Hypot, &y).unwrap();
    assert_eq!(z.value(), 5.0);
    assert_eq!(z.jacobian(&[x.clone(), y.clone()]), Ok(Jacobian::Vector(vec![0.6, 0.8])));

    let w = x.binary_op(&Hypot, 4.0f64).unwrap();
    assert_eq!(w.value(), 5.0);
    assert_eq!(w.derivative(&x), Ok(0.6));

    let q = Array::from_numbers(vec![x.clone(), y.clone()]);
    let r = q.binary_op(&Hypot, &[4.0, 3.0]).unwrap();
    assert_eq!(r.values(), vec![5.0, 5.0]);
    assert_eq!(r.jacobian(&q), Jacobian::Matrix(vec![vec![0.6, 0.0], vec![0.0, 0.8]]));
    let s = q.binary_op(&Hypot, &x).unwrap();
    assert_relative_eq!(s[0].value(), 18f64.sqrt());
    assert!(q.binary_op(&Hypot, &[1.0]).is_err());
  }

  #[test]
  fn catalog_through_numbers() {
    for op in unary_catalog::<f64>() {
      let x = Number::new(0.4f64);
      let y = x.unary_op(op.as_ref()).unwrap();
      assert_eq!(y.value(), op.run(0.4));
      assert_eq!(y.derivative(&x), Ok(op.derive(0.4)));
    }
  }

  #[test]
  fn display() {
    assert_eq!(Number::new(1.0f64).to_string(), "Number(val=1)");
    assert_eq!(Number::new(2.5f64).to_string(), "Number(val=2.5)");
  }
}
