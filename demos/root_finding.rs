use gradus::{ ops::*, Array, Value, root_finding::* };

fn main() {
  let options = NewtonOptions { tolerance: 1e-10, ..Default::default() };

  // Scalar function
  let solution = newtons_method(|x: &Value<f64>| {
    let x = x.number()?;
    Ok((5.0f64 * x.powi(2) + 10.0f64 * x - 8.0).into())
  }, 1.0, &options).unwrap();
  println!("root {} after {} iterations", solution.root, solution.iterations);

  // Square system of equations
  let solution = newtons_method(|v: &Value<f64>| {
    let v = v.array()?;
    let circle = v[0].powi(2) + v[1].powi(2) - 4.0;
    let diagonal = &v[0] - &v[1];
    Ok(Value::Array(Array::from_numbers(vec![circle, diagonal])))
  }, Value::Array(Array::new(&[1.0f64, 2.0])), &options).unwrap();
  println!("root {} with jacobians", solution.root);
  for jacobian in &solution.jacobians {
    println!("  {:?}", jacobian);
  }

  // Compare with the secant method, which never looks at derivatives
  let secant = secant_method(|x| Ok(x * x - 2.0), (1.0, 2.0), &SecantOptions::default()).unwrap();
  println!("secant found {} after {} iterations", secant.root, secant.iterations);
}
