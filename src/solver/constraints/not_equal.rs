use std::marker::PhantomData;

use crate::solver::{
    constraint::{Constraint, ConstraintDescriptor},
    csp::{Assignment, VariableId},
    domain::ValueEquality,
};

/// Requires two variables to take different values.
#[derive(Debug, Clone)]
pub struct NotEqualConstraint<V> {
    pub vars: [VariableId; 2],
    _phantom: PhantomData<V>,
}

impl<V: ValueEquality> NotEqualConstraint<V> {
    pub fn new(a: VariableId, b: VariableId) -> Self {
        Self {
            vars: [a, b],
            _phantom: PhantomData,
        }
    }
}

impl<V: ValueEquality> Constraint<V> for NotEqualConstraint<V> {
    fn variables(&self) -> &[VariableId] {
        &self.vars
    }

    fn descriptor(&self) -> ConstraintDescriptor {
        ConstraintDescriptor {
            name: "NotEqualConstraint".to_string(),
            description: format!("?{} != ?{}", self.vars[0], self.vars[1]),
        }
    }

    fn satisfied(&self, assignment: &Assignment<V>) -> bool {
        match (assignment.get(self.vars[0]), assignment.get(self.vars[1])) {
            (Some(a), Some(b)) => a != b,
            _ => true,
        }
    }
}
