use crate::solver::{
    csp::{Assignment, VariableId},
    domain::ValueEquality,
};

#[derive(Debug, Clone)]
pub struct ConstraintDescriptor {
    pub name: String,
    pub description: String,
}

/// A relation over a fixed, ordered list of variables.
///
/// Anything exposing a variable list and a satisfaction predicate qualifies;
/// there is no deeper hierarchy. Two contractual points:
///
/// - The predicate must treat any variable absent from the partial
///   assignment as satisfied: an unknown value cannot conflict yet.
/// - Propagation is binary-only: AC-3 and forward checking run over the
///   *first two* declared variables. Constraints of higher arity register
///   and participate in the full consistency checks on [`Csp`], but
///   propagation never looks past the declared pair.
///
/// [`Csp`]: crate::solver::csp::Csp
pub trait Constraint<V: ValueEquality>: std::fmt::Debug {
    /// The variables this constraint ranges over, in declaration order.
    fn variables(&self) -> &[VariableId];

    fn descriptor(&self) -> ConstraintDescriptor;

    /// Whether the relation holds under `assignment`.
    fn satisfied(&self, assignment: &Assignment<V>) -> bool;
}
