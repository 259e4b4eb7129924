use rand::Rng;
use nalgebra::{ DMatrix, DVector };

use crate::scalar::Real;


pub fn uniform<T: Real>(low: T, high: T) -> T {
  rand::thread_rng().gen_range(low, high)
}


pub fn norm<T: Real>(values: &[T]) -> T {
  let v = DVector::from_column_slice(values);
  v.dot(&v).sqrt()
}


// LU decomposition with partial pivoting, carried out in double precision.
// Returns None for singular systems.

pub fn solve<T: Real>(matrix: &[Vec<T>], rhs: &[T]) -> Option<Vec<T>> {
  let n = rhs.len();
  if matrix.len() != n || matrix.iter().any(|row| row.len() != n ) { return None }
  let a = DMatrix::from_fn(n, n, |i, j| matrix[i][j].to_f64().unwrap_or(f64::NAN) );
  let b = DVector::from_fn(n, |i, _| rhs[i].to_f64().unwrap_or(f64::NAN) );
  let x = a.lu().solve(&b)?;
  if x.iter().any(|v| !v.is_finite() ) { return None }
  x.iter().map(|&v| T::from(v) ).collect()
}


#[cfg(test)]
mod tests {
  use approx::assert_relative_eq;

  use super::*;

  #[test]
  fn norms() {
    assert_eq!(norm(&[3.0f64, 4.0]), 5.0);
    assert_eq!(norm::<f64>(&[]), 0.0);
  }

  #[test]
  fn solves_linear_systems() {
    let a = vec![vec![0.0f64, 2.0, 1.0], vec![1.0, 1.0, 0.0], vec![2.0, 0.0, 3.0]];
    let x = solve(&a, &[7.0, 3.0, 11.0]).unwrap();
    assert_relative_eq!(x[0], 1.0, epsilon = 1e-12);
    assert_relative_eq!(x[1], 2.0, epsilon = 1e-12);
    assert_relative_eq!(x[2], 3.0, epsilon = 1e-12);
  }

  #[test]
  fn tiny_but_well_conditioned_systems() {
    let a = vec![vec![1e-17f64, 0.0], vec![0.0, 1e-17]];
    let x = solve(&a, &[-1e-5, -1e-5]).unwrap();
    assert_relative_eq!(x[0], -1e12, max_relative = 1e-12);
    assert_relative_eq!(x[1], -1e12, max_relative = 1e-12);
  }

  #[test]
  fn detects_singular_matrices() {
    let a = vec![vec![1.0f64, 2.0], vec![2.0, 4.0]];
    assert_eq!(solve(&a, &[1.0, 2.0]), None);
    assert_eq!(solve(&a, &[1.0]), None);
  }

  #[test]
  fn samples_within_bounds() {
    for _ in 0..100 {
      let x = uniform(-1.0f64, 1.0);
      assert!((-1.0..1.0).contains(&x));
    }
  }
}
