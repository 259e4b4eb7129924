use gradus::{ ops::*, Array, Number, Jacobian };

fn main() {
  // Create independent variables
  let x = Number::new(0.5f64);
  let y = Number::new(4.0f64);

  // Every operation computes its partial derivatives right away
  let z = x.sin() * &y + y.sqrt().unwrap() / &x;

  println!("z = {}", z);
  println!("dz/dx = {}", z.derivative(&x).unwrap());
  println!("dz/dy = {}", z.derivative(&y).unwrap());

  // Arrays work element-wise
  let q = Array::new(&[2.0f64, 3.0]);
  let w = (10.0f64 - &q).exp();
  println!("{}", w);

  if let Jacobian::Matrix(rows) = w.jacobian(&q) {
    for row in rows {
      println!("{:?}", row);
    }
  }

  // Reductions produce a single number again
  let norm = q.dot(&q).unwrap();
  println!("{} has gradient {:?}", norm, norm.gradient(q.elements()).unwrap());
}
