use nalgebra::{ DMatrix, DVector };

use crate::{
  error::Result,
  number::Number,
  scalar::{ Real, lit },
  jacobian::Strictness,
  value::Value,
};


/// A rule for picking search directions, to be used with [Optimizer].

pub trait Strategy<T: Real> {
  /// Direction to search along, given the gradient at the current point.
  fn direction(&mut self, gradient: &DVector<T>) -> DVector<T>;

  /// Learn from an accepted `step` and the resulting `change` in gradient.
  fn update(&mut self, _step: &DVector<T>, _change: &DVector<T>) {}

  /// Forget everything learned so far.
  fn reset(&mut self) {}
}


/// Line search minimizer that allows for several [strategies](Strategy) to be used.
///
/// Every iteration evaluates the objective and its exact gradient, asks the
/// strategy for a direction and backtracks from `step_size` until the
/// Armijo condition holds.

#[derive(Debug, Clone)]
pub struct Optimizer<T: Real, S: Strategy<T>> {
  strategy: S,
  /// Initial step length tried by the line search.
  pub step_size: T,
  pub iterations: usize,
  /// Stop once the gradient norm drops below this.
  pub tolerance: T,
  /// Sufficient decrease constant of the line search.
  pub armijo: T,
  pub max_backtracks: usize,
}


/// Outcome of [Optimizer::minimize].

#[derive(Debug, Clone)]
pub struct Minimum<T: Real> {
  pub argmin: Value<T>,
  pub value: T,
  /// Gradient at every iterate a step was taken from.
  pub jacobians: Vec<Vec<T>>,
  pub iterations: usize,
  pub converged: bool,
}

impl<T: Real, S: Strategy<T>> Optimizer<T, S> {
  pub fn new(step_size: T, strategy: S) -> Self {
    Self {
      strategy,
      step_size,
      iterations: 100,
      tolerance: lit(1e-7),
      armijo: lit(1e-4),
      max_backtracks: 60,
    }
  }

  pub fn strategy(&self) -> &S {
    &self.strategy
  }

  /// Minimize a scalar valued function starting from `initial_guess`.

  pub fn minimize<F>(&mut self, func: F, initial_guess: impl Into<Value<T>>) -> Result<Minimum<T>>
  where
    F: Fn(&Value<T>) -> Result<Number<T>>
  {
    self.strategy.reset();
    let mut x = initial_guess.into();
    let (mut fx, mut gradient) = evaluate(&func, &x)?;
    let mut jacobians = vec![];
    let mut iterations = 0;
    loop {
      let gradient_norm = gradient.dot(&gradient).sqrt();
      log::debug!("iteration {iterations}: x = {x}, f(x) = {fx}, |grad| = {gradient_norm}");

      if gradient_norm < self.tolerance {
        return Ok(Minimum { argmin: x, value: fx, jacobians, iterations, converged: true })
      }
      if iterations >= self.iterations {
        log::warn!("minimization did not converge after {iterations} iterations (|grad| = {gradient_norm})");
        return Ok(Minimum { argmin: x, value: fx, jacobians, iterations, converged: false })
      }

      // Fall back to steepest descent if the strategy points uphill
      let mut direction = self.strategy.direction(&gradient);
      let mut slope = gradient.dot(&direction);
      if !(slope < T::zero()) {
        log::debug!("discarding ascent direction");
        self.strategy.reset();
        direction = -&gradient;
        slope = gradient.dot(&direction);
      }

      // Backtracking line search
      let origin = DVector::from_vec(x.values());
      let mut alpha = self.step_size;
      let mut candidate;
      let mut backtracks = 0;
      loop {
        let point = &origin + &direction * alpha;
        candidate = x.rebuild(point.as_slice());
        let (f_candidate, g_candidate) = evaluate(&func, &candidate)?;
        if f_candidate <= fx + self.armijo * alpha * slope || backtracks >= self.max_backtracks {
          let step = &direction * alpha;
          let change = &g_candidate - &gradient;
          self.strategy.update(&step, &change);
          let previous = std::mem::replace(&mut gradient, g_candidate);
          jacobians.push(previous.iter().copied().collect());
          fx = f_candidate;
          break
        }
        alpha = alpha / (T::one() + T::one());
        backtracks += 1;
        log::trace!("backtracking to step length {alpha}");
      }
      x = candidate;
      iterations += 1;
    }
  }
}

fn evaluate<T, F>(func: &F, x: &Value<T>) -> Result<(T, DVector<T>)>
where
  T: Real,
  F: Fn(&Value<T>) -> Result<Number<T>>,
{
  let y = func(x)?;
  let gradient = y.jacobian_with(&x.leaves(), Strictness::Lenient)?.into_vec();
  Ok((y.value(), DVector::from_vec(gradient)))
}


/// Plain gradient descent

#[derive(Debug, Clone, Default)]
pub struct SteepestDescent;

impl<T: Real> Strategy<T> for SteepestDescent {
  fn direction(&mut self, gradient: &DVector<T>) -> DVector<T> {
    -gradient
  }
}


/// Quasi-Newton strategy (BFGS)
///
/// Maintains an approximation of the inverse hessian,
/// starting out from the identity.

#[derive(Debug, Clone)]
pub struct Bfgs<T: Real> {
  inverse_hessian: Option<DMatrix<T>>,
}

impl<T: Real> Bfgs<T> {
  pub fn new() -> Self {
    Self { inverse_hessian: None }
  }

  pub fn inverse_hessian(&self) -> Option<&DMatrix<T>> {
    self.inverse_hessian.as_ref()
  }
}

impl<T: Real> Default for Bfgs<T> {
  fn default() -> Self {
    Self::new()
  }
}

impl<T: Real> Strategy<T> for Bfgs<T> {
  fn direction(&mut self, gradient: &DVector<T>) -> DVector<T> {
    let n = gradient.len();
    if !matches!(&self.inverse_hessian, Some(h) if h.nrows() == n) {
      self.inverse_hessian = None;
    }
    let h = self.inverse_hessian.get_or_insert_with(|| DMatrix::identity(n, n) );
    -(&*h * gradient)
  }

  fn update(&mut self, step: &DVector<T>, change: &DVector<T>) {
    let curvature = change.dot(step);
    // Skip updates that would break positive definiteness
    if !(curvature > lit(1e-12)) { return }
    let Some(h) = &self.inverse_hessian else { return };
    let n = step.len();
    let rho = T::one() / curvature;
    let eye = DMatrix::<T>::identity(n, n);
    let left = &eye - step * change.transpose() * rho;
    let right = &eye - change * step.transpose() * rho;
    let updated = left * h * right + step * step.transpose() * rho;
    self.inverse_hessian = Some(updated);
  }

  fn reset(&mut self) {
    self.inverse_hessian = None;
  }
}
