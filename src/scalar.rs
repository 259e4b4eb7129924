use rand::distributions::uniform::SampleUniform;
use num_traits::{Float, FloatConst, NumAssign};


/// All continuous numeric types that may be carried by a
/// [Number](crate::Number) or an [Array](crate::Array).
///
/// This trait gets implemented automatically for all types
/// that satisfy its dependent traits, which in practice means
/// [f32] and [f64].

pub trait Real:
  Float + FloatConst + NumAssign + SampleUniform + std::iter::Sum
  + std::fmt::Debug + std::fmt::Display + Send + Sync + 'static {}

impl<T> Real for T
where
  T: Float + FloatConst + NumAssign + SampleUniform + std::iter::Sum
    + std::fmt::Debug + std::fmt::Display + Send + Sync + 'static {}


/// Lossless conversion of small constants into `T`.

#[inline]
pub(crate) fn lit<T: Real>(value: f64) -> T {
  T::from(value).unwrap_or_else(T::nan)
}


/// Whether `value` has no fractional part.

#[inline]
pub(crate) fn is_integer<T: Real>(value: T) -> bool {
  value.is_finite() && value.fract() == T::zero()
}
