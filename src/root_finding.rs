//! Root finding driven by exact derivatives.
//!
//! [newtons_method] picks its update rule from the shape of the problem:
//!
//! - **R -> R**: the classic step `x - f(x) / f'(x)`.
//! - **R^n -> R**: every component takes its own step `x_j - f(x) / (df/dx_j)`.
//!   Components the function does not depend on stay where they are.
//! - **R^n -> R^n**: the full Newton step, solving `J dx = -F`.
//!
//! [secant_method] only ever looks at function values and serves as a
//! baseline for comparison.

use serde::{Serialize, Deserialize};

use crate::{
  internal::{ norm, solve },
  error::{ Error, Result },
  number::Number,
  scalar::{ Real, lit },
  jacobian::{ Jacobian, Strictness },
  value::Value,
};


#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NewtonOptions<T> {
  /// Maximum number of steps to take.
  pub iterations: usize,
  /// Stop once the norm of the residual drops below this.
  pub tolerance: T,
}

impl<T: Real> Default for NewtonOptions<T> {
  fn default() -> Self {
    Self { iterations: 100, tolerance: lit(1e-7) }
  }
}


#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SecantOptions<T> {
  pub iterations: usize,
  pub tolerance: T,
}

impl<T: Real> Default for SecantOptions<T> {
  fn default() -> Self {
    Self { iterations: 100, tolerance: lit(1e-12) }
  }
}


/// Outcome of [newtons_method].

#[derive(Debug, Clone)]
pub struct Solution<T: Real> {
  /// Last iterate.
  pub root: Value<T>,
  /// Function value at the last iterate.
  pub residual: Value<T>,
  /// Jacobian at every iterate a step was taken from.
  pub jacobians: Vec<Jacobian<T>>,
  pub iterations: usize,
  pub converged: bool,
}


/// Outcome of [secant_method].

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SecantSolution<T> {
  pub root: T,
  pub residual: T,
  pub iterations: usize,
  pub converged: bool,
}


/// Find a root of `func` starting from `initial_guess`.
///
/// A scalar guess requires a scalar valued function. An array guess
/// accepts either a scalar or an array valued function of the same length.
///
/// ```
/// use gradus::{ Value, root_finding::* };
///
/// let solution = newtons_method(|x: &Value<f64>| {
///   let x = x.number()?;
///   Ok((x * x - 2.0).into())
/// }, 1.0, &NewtonOptions::default()).unwrap();
///
/// assert!(solution.converged);
/// assert!((solution.root.values()[0] - 2f64.sqrt()).abs() < 1e-6);
/// ```

pub fn newtons_method<T, F>(func: F, initial_guess: impl Into<Value<T>>, options: &NewtonOptions<T>) -> Result<Solution<T>>
where
  T: Real,
  F: Fn(&Value<T>) -> Result<Value<T>>,
{
  let mut x = initial_guess.into();
  let mut jacobians = vec![];
  let mut iterations = 0;
  loop {
    let fx = func(&x)?;
    let residual = norm(&fx.values());
    log::debug!("newton iteration {iterations}: x = {x}, |f(x)| = {residual}");

    if residual < options.tolerance {
      return Ok(Solution { root: x, residual: fx, jacobians, iterations, converged: true })
    }
    if iterations >= options.iterations {
      log::warn!("newton's method did not converge after {iterations} iterations (|f(x)| = {residual})");
      return Ok(Solution { root: x, residual: fx, jacobians, iterations, converged: false })
    }

    let (jacobian, next) = match (&x, &fx) {
      (Value::Scalar(x), Value::Scalar(fx)) => scalar_step(x, fx)?,
      (Value::Array(x), Value::Scalar(fx)) => component_step(x.elements(), fx)?,
      (Value::Array(x), Value::Array(fx)) => full_step(x.elements(), fx.elements())?,
      (Value::Scalar(_), Value::Array(_)) => {
        return Err(Error::TypeMismatch { expected: "scalar", found: fx.kind() })
      },
    };
    jacobians.push(jacobian);
    x = x.rebuild(&next);
    iterations += 1;
  }
}

fn scalar_step<T: Real>(x: &Number<T>, fx: &Number<T>) -> Result<(Jacobian<T>, Vec<T>)> {
  let jacobian = fx.jacobian_with(x, Strictness::Lenient)?;
  let slope = jacobian.scalar().unwrap_or_else(T::zero);
  if slope == T::zero() { return Err(Error::SingularJacobian) }
  Ok((jacobian, vec![x.value() - fx.value() / slope]))
}

fn component_step<T: Real>(x: &[Number<T>], fx: &Number<T>) -> Result<(Jacobian<T>, Vec<T>)> {
  let jacobian = fx.jacobian_with(x, Strictness::Lenient)?;
  let gradient = jacobian.vector().unwrap_or_default();
  if gradient.iter().all(|&partial| partial == T::zero() ) {
    return Err(Error::SingularJacobian)
  }
  let next = x.iter().zip(gradient).map(|(x, &partial)| {
    if partial == T::zero() { x.value() } else { x.value() - fx.value() / partial }
  }).collect();
  Ok((jacobian, next))
}

fn full_step<T: Real>(x: &[Number<T>], fx: &[Number<T>]) -> Result<(Jacobian<T>, Vec<T>)> {
  if x.len() != fx.len() {
    return Err(Error::ShapeMismatch { lhs: x.len(), rhs: fx.len() })
  }
  let rows = fx.iter()
    .map(|f| f.jacobian_with(x, Strictness::Lenient).map(Jacobian::into_vec) )
    .collect::<Result<Vec<_>>>()?;
  let rhs: Vec<T> = fx.iter().map(|f| -f.value() ).collect();
  let step = solve(&rows, &rhs).ok_or(Error::SingularJacobian)?;
  let next = x.iter().zip(step).map(|(x, dx)| x.value() + dx ).collect();
  Ok((Jacobian::Matrix(rows), next))
}


/// Find a root of `func` from two distinct starting points,
/// approximating its slope by finite differences.

pub fn secant_method<T, F>(func: F, initial_guesses: (T, T), options: &SecantOptions<T>) -> Result<SecantSolution<T>>
where
  T: Real,
  F: Fn(&Number<T>) -> Result<Number<T>>,
{
  let eval = |x: T| func(&Number::new(x)).map(|y| y.value() );
  let (mut prev, mut x) = initial_guesses;
  if prev == x {
    return Err(Error::InvalidArgument("secant method needs two distinct initial guesses".to_string()))
  }
  let mut f_prev = eval(prev)?;
  let mut iterations = 0;
  loop {
    let fx = eval(x)?;
    log::debug!("secant iteration {iterations}: x = {x}, f(x) = {fx}");
    if fx.abs() < options.tolerance {
      return Ok(SecantSolution { root: x, residual: fx, iterations, converged: true })
    }
    if iterations >= options.iterations {
      log::warn!("secant method did not converge after {iterations} iterations (f(x) = {fx})");
      return Ok(SecantSolution { root: x, residual: fx, iterations, converged: false })
    }
    if fx == f_prev {
      return Err(Error::InvalidArgument(format!("secant through {prev} and {x} is flat")))
    }
    let next = x - fx * (x - prev) / (fx - f_prev);
    prev = x;
    f_prev = fx;
    x = next;
    iterations += 1;
  }
}
