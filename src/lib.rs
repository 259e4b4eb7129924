//! Automatic differentiation for scalars and fixed-size arrays.
//! Tiny. Few dependencies. No backward pass.
//!
//! # Features
//!
//! - **Eager derivatives**: Every [Number] carries the partial derivatives of its
//! value with respect to all nodes that contributed to it, computed the moment
//! it gets created. Jacobians are simple lookups.
//!
//! - **Checked domains**: Functions that are only defined on part of the real line,
//! such as [ln](ops::Elementary::ln) or [sqrt](ops::Elementary::sqrt), return
//! an [Error::Domain] instead of silently producing NaN.
//!
//! - **Arrays**: [Array]s lift every elementary operation element-wise and
//! broadcast numbers and scalars across their elements.
//!
//! - **Extensible**: Implement [UnaryOp](ops::UnaryOp) or [BinaryOp](ops::BinaryOp)
//! to add differentiable operations of your own.
//!
//! - **Solvers**: Includes Newton's method, the secant method and line search
//! optimizers using steepest descent or BFGS.
//!
//! # Examples
//!
//! Evaluating a function and its partial derivatives:
//! ```
//! use gradus::{ ops::*, Number, Jacobian };
//!
//! let x = Number::new(2.0f64);
//! let y = Number::new(3.0f64);
//!
//! let z = &x * &y + x.powi(2);
//!
//! assert_eq!(z.value(), 10.0);
//! assert_eq!(z.jacobian(&[x, y]).unwrap(), Jacobian::Vector(vec![7.0, 2.0]));
//! ```
//!
//! Minimizing a non-linear function:
//! ```
//! use gradus::{ ops::*, Array, Value, optimize::{ Optimizer, Bfgs } };
//!
//! let mut optimizer = Optimizer::new(1.0, Bfgs::default());
//!
//! let minimum = optimizer.minimize(|v: &Value<f64>| {
//!   let v = v.array()?;
//!   Ok((1.0f64 - &v[0]).powi(2) + 100.0f64 * (&v[1] - v[0].powi(2)).powi(2))
//! }, Value::Array(Array::new(&[2.0, 1.0]))).unwrap();
//!
//! assert!(minimum.converged);
//! ```
//!
//! ## More examples
//! Check the `/demos` folder for more example code.

mod internal;
mod scalar;
mod error;
mod number;
mod array;
mod jacobian;
mod value;

pub mod ops;
pub mod root_finding;
pub mod optimize;

pub use scalar::Real;
pub use error::{ Error, Result };
pub use number::{ Number, Seed, NodeId, Partials };
pub use array::{ Array, ArrayOperand };
pub use jacobian::{ Jacobian, Order, Strictness };
pub use value::Value;
