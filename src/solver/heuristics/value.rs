use crate::solver::domain::{Domain, ValueEquality};

/// A trait for strategies that determine the order in which a variable's
/// candidate values are tried.
///
/// Returns an owned snapshot: domains mutate underneath a frame while its
/// descendants run forward checking, so the frame keeps its own copy.
pub trait ValueOrderingHeuristic<V: ValueEquality> {
    fn order_values(&self, domain: &Domain<V>) -> Vec<V>;
}

/// Tries values in their stored domain order.
///
/// Together with declaration-order tie-breaking this makes the first
/// solution a deterministic function of the input; a least-constraining-value
/// ordering would slot in here if one were ever needed.
pub struct IdentityValueHeuristic;

impl<V: ValueEquality> ValueOrderingHeuristic<V> for IdentityValueHeuristic {
    fn order_values(&self, domain: &Domain<V>) -> Vec<V> {
        domain.iter().cloned().collect()
    }
}
