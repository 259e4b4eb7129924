use gradus::{ ops::*, Array, Number, Value, Result, optimize::{ Optimizer, Bfgs, SteepestDescent } };

fn rosenbrock(v: &Value<f64>) -> Result<Number<f64>> {
  let v = v.array()?;
  Ok((1.0f64 - &v[0]).powi(2) + 100.0f64 * (&v[1] - v[0].powi(2)).powi(2))
}

fn main() {
  let start = Value::Array(Array::new(&[2.0f64, 1.0]));

  // Quasi-Newton converges in a few dozen steps
  let mut optimizer = Optimizer::new(1.0, Bfgs::default());
  let minimum = optimizer.minimize(rosenbrock, start.clone()).unwrap();
  println!("BFGS: {} = {} after {} iterations", minimum.argmin, minimum.value, minimum.iterations);

  // Plain gradient descent crawls along the valley
  let mut optimizer = Optimizer::new(0.01, SteepestDescent);
  optimizer.iterations = 1000;
  let minimum = optimizer.minimize(rosenbrock, start).unwrap();
  println!(
    "Steepest descent: {} = {} after {} iterations (converged: {})",
    minimum.argmin, minimum.value, minimum.iterations, minimum.converged,
  );
}
