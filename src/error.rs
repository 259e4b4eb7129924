use thiserror::Error;

use crate::number::NodeId;


/// Everything that can go wrong while evaluating or querying
/// a differentiable expression.

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
  #[error("no partial derivative is tracked with respect to {0}")]
  UntrackedVariable(NodeId),

  #[error("shape mismatch: ({lhs},) vs ({rhs},)")]
  ShapeMismatch { lhs: usize, rhs: usize },

  #[error("{op} is undefined for {input}")]
  Domain { op: &'static str, input: String },

  #[error("type mismatch: expected {expected}, found {found}")]
  TypeMismatch { expected: &'static str, found: &'static str },

  #[error("index {index} is out of bounds for an array of length {len}")]
  IndexOutOfBounds { index: usize, len: usize },

  #[error("jacobian is singular")]
  SingularJacobian,

  #[error("invalid argument: {0}")]
  InvalidArgument(String),
}

impl Error {
  pub(crate) fn domain(op: &'static str, input: impl std::fmt::Display) -> Self {
    let error = Self::Domain { op, input: input.to_string() };
    log::trace!("{error}");
    error
  }
}


pub type Result<T, E = Error> = std::result::Result<T, E>;
