use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use serde::{Serialize, Deserialize};

use crate::{
  number::Number,
  scalar::Real,
};


/// Identity of a node in a computation.
///
/// Every [Number] receives a fresh id when it gets constructed.
/// Ids are the keys of all partial derivative bookkeeping,
/// so two numbers holding the same value are still told apart.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(usize);

impl NodeId {
  pub(crate) fn next() -> Self {
    static LAST_ID: AtomicUsize = AtomicUsize::new(0);
    Self(LAST_ID.fetch_add(1, Ordering::Relaxed))
  }
}

impl std::fmt::Display for NodeId {
  fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
    write!(f, "node #{}", self.0)
  }
}


/// Partial derivatives of one node's value with respect to
/// every node that contributed to it, itself included.

#[derive(Debug, Clone, PartialEq)]
pub struct Partials<T: Real> {
  map: HashMap<NodeId, T>,
}

impl<T: Real> Default for Partials<T> {
  fn default() -> Self {
    Self::new()
  }
}

impl<T: Real> Partials<T> {
  pub fn new() -> Self {
    Self { map: HashMap::new() }
  }

  /// Builder used to seed a [Number] with externally known derivatives.

  pub fn with(mut self, node: &Number<T>, partial: T) -> Self {
    self.insert(node.id(), partial);
    self
  }

  pub fn insert(&mut self, id: NodeId, partial: T) {
    self.map.insert(id, partial);
  }

  pub fn get(&self, id: NodeId) -> Option<T> {
    self.map.get(&id).copied()
  }

  pub fn contains(&self, id: NodeId) -> bool {
    self.map.contains_key(&id)
  }

  pub fn len(&self) -> usize {
    self.map.len()
  }

  pub fn is_empty(&self) -> bool {
    self.map.is_empty()
  }

  pub fn iter(&self) -> impl Iterator<Item=(NodeId, T)> + '_ {
    self.map.iter().map(|(&id, &partial)| (id, partial) )
  }

  /// Chain rule over any number of operands.
  ///
  /// Each term pairs an operand's partials with the derivative of the
  /// operation with respect to that operand. Keys missing from a term
  /// contribute zero to it.

  pub(crate) fn combine(terms: &[(&Self, T)]) -> Self {
    let capacity = terms.iter().map(|(partials, _)| partials.len() ).sum::<usize>() + 1;
    let mut map = HashMap::with_capacity(capacity);
    for &(partials, factor) in terms {
      for (&id, &partial) in &partials.map {
        let entry = map.entry(id).or_insert_with(T::zero);
        *entry = *entry + factor * partial;
      }
    }
    Self { map }
  }

  /// Compare two partial maps while ignoring the respective owner's self entry.

  pub(crate) fn equivalent(&self, own: NodeId, other: &Self, other_own: NodeId) -> bool {
    let lhs_len = self.map.keys().filter(|&&id| id != own ).count();
    let rhs_len = other.map.keys().filter(|&&id| id != other_own ).count();
    if lhs_len != rhs_len { return false }
    self.map.iter()
      .filter(|(id, _)| **id != own )
      .all(|(&id, &partial)| id != other_own && other.get(id) == Some(partial) )
  }
}


#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn ids_increase() {
    let a = NodeId::next();
    let b = NodeId::next();
    assert!(b > a);
  }

  #[test]
  fn combine_treats_missing_keys_as_zero() {
    let (a, b, c) = (NodeId::next(), NodeId::next(), NodeId::next());
    let mut lhs = Partials::new();
    lhs.insert(a, 1.0);
    lhs.insert(b, 2.0);
    let mut rhs = Partials::new();
    rhs.insert(b, 3.0);
    rhs.insert(c, 4.0);
    let merged = Partials::combine(&[(&lhs, 10.0), (&rhs, -1.0)]);
    assert_eq!(merged.len(), 3);
    assert_eq!(merged.get(a), Some(10.0));
    assert_eq!(merged.get(b), Some(17.0));
    assert_eq!(merged.get(c), Some(-4.0));
  }

  #[test]
  fn equivalence_skips_self_entries() {
    let (own, other, shared) = (NodeId::next(), NodeId::next(), NodeId::next());
    let mut lhs = Partials::new();
    lhs.insert(own, 1.0);
    lhs.insert(shared, 0.5);
    let mut rhs = Partials::new();
    rhs.insert(other, 1.0);
    rhs.insert(shared, 0.5);
    assert!(lhs.equivalent(own, &rhs, other));
    rhs.insert(shared, 0.25);
    assert!(!lhs.equivalent(own, &rhs, other));
  }
}
