use std::collections::HashMap;

use crate::{
    error::{Result, SolverError},
    solver::{
        constraint::Constraint,
        domain::{Domain, PurgeLog, ValueEquality},
        propagation,
        stats::SearchStats,
    },
};

pub type VariableId = u32;
pub type ConstraintId = usize;

/// A partial mapping from variables to single chosen values.
///
/// Grows along a search path and shrinks on backtrack. Constraints receive
/// it as the context for their predicate; a variable that is absent means
/// "no conflict yet" to every well-behaved constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment<V> {
    bindings: HashMap<VariableId, V>,
}

impl<V: ValueEquality> Assignment<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn get(&self, variable: VariableId) -> Option<&V> {
        self.bindings.get(&variable)
    }

    pub fn contains(&self, variable: VariableId) -> bool {
        self.bindings.contains_key(&variable)
    }

    pub fn insert(&mut self, variable: VariableId, value: V) -> Option<V> {
        self.bindings.insert(variable, value)
    }

    pub fn remove(&mut self, variable: VariableId) -> Option<V> {
        self.bindings.remove(&variable)
    }

    pub fn iter(&self) -> impl Iterator<Item = (VariableId, &V)> {
        self.bindings.iter().map(|(variable, value)| (*variable, value))
    }
}

impl<V> Default for Assignment<V> {
    fn default() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }
}

/// One constraint-satisfaction instance: the variable set, the domain per
/// variable, and an index of constraints keyed by every variable they
/// reference.
#[derive(Debug)]
pub struct Csp<V: ValueEquality> {
    variables: Vec<VariableId>,
    domains: HashMap<VariableId, Domain<V>>,
    constraints: Vec<Box<dyn Constraint<V>>>,
    index: HashMap<VariableId, Vec<ConstraintId>>,
}

impl<V: ValueEquality> Csp<V> {
    /// Builds an instance from its variables and their initial domains.
    ///
    /// Every variable must come with a domain entry. An empty domain is
    /// accepted; it simply makes the instance unsatisfiable.
    pub fn new(
        variables: Vec<VariableId>,
        mut domains: HashMap<VariableId, Vec<V>>,
    ) -> Result<Self> {
        let mut owned = HashMap::with_capacity(variables.len());
        let mut index = HashMap::with_capacity(variables.len());
        for &variable in &variables {
            if owned.contains_key(&variable) {
                continue;
            }
            let Some(values) = domains.remove(&variable) else {
                return Err(SolverError::MissingDomain(variable).into());
            };
            owned.insert(variable, Domain::new(values));
            index.insert(variable, Vec::new());
        }
        Ok(Self {
            variables,
            domains: owned,
            constraints: Vec::new(),
            index,
        })
    }

    /// Registers a constraint under every variable it references.
    ///
    /// Fails if the constraint mentions a variable the instance does not
    /// own; the instance is left unchanged in that case.
    pub fn add_constraint(&mut self, constraint: Box<dyn Constraint<V>>) -> Result<ConstraintId> {
        for &variable in constraint.variables() {
            if !self.index.contains_key(&variable) {
                return Err(SolverError::UnknownVariable {
                    name: constraint.descriptor().name,
                    variable,
                }
                .into());
            }
        }
        let id = self.constraints.len();
        for &variable in constraint.variables() {
            let slots = self.index.get_mut(&variable).unwrap();
            if !slots.contains(&id) {
                slots.push(id);
            }
        }
        self.constraints.push(constraint);
        Ok(id)
    }

    pub fn variables(&self) -> &[VariableId] {
        &self.variables
    }

    pub fn variable_count(&self) -> usize {
        self.variables.len()
    }

    pub fn domain(&self, variable: VariableId) -> Option<&Domain<V>> {
        self.domains.get(&variable)
    }

    pub fn constraint(&self, id: ConstraintId) -> &dyn Constraint<V> {
        self.constraints[id].as_ref()
    }

    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }

    /// Ids of every constraint registered under `variable`, in
    /// registration order.
    pub fn constraints_on(&self, variable: VariableId) -> &[ConstraintId] {
        self.index.get(&variable).map(Vec::as_slice).unwrap_or(&[])
    }

    /// True iff every registered constraint is satisfied by `assignment`.
    pub fn is_consistent(&self, assignment: &Assignment<V>) -> bool {
        self.constraints
            .iter()
            .all(|constraint| constraint.satisfied(assignment))
    }

    /// True iff every constraint registered under `variable` is satisfied.
    ///
    /// During search only constraints touching the newly bound variable can
    /// be newly violated, so this is the check run after each trial binding.
    pub fn is_consistent_at(&self, variable: VariableId, assignment: &Assignment<V>) -> bool {
        self.constraints_on(variable)
            .iter()
            .all(|&id| self.constraints[id].satisfied(assignment))
    }

    /// True iff every domain is a singleton and the induced assignment
    /// satisfies every constraint: the "solved purely by propagation" test.
    pub fn is_network_consistent(&self) -> bool {
        match self.singleton_assignment() {
            Some(assignment) => self.is_consistent(&assignment),
            None => false,
        }
    }

    /// The full assignment induced by the domains, if every domain has
    /// collapsed to exactly one value.
    pub fn singleton_assignment(&self) -> Option<Assignment<V>> {
        let mut assignment = Assignment::new();
        for &variable in &self.variables {
            let value = self.domains[&variable].singleton_value()?;
            assignment.insert(variable, value.clone());
        }
        Some(assignment)
    }

    /// Runs one-shot arc-consistency preprocessing over the whole instance.
    ///
    /// Returns `false` when a domain was emptied, which proves the instance
    /// unsatisfiable. Pruning is permanent either way; see
    /// [`propagation::run_ac3`] for the algorithm and its binary-only
    /// restriction.
    pub fn run_ac3(&mut self) -> bool {
        let mut stats = SearchStats::default();
        propagation::run_ac3(self, &mut stats)
    }

    /// Replays `log`, reinstating every journaled value in its original
    /// slot. Consumes the log: a purge log is only ever applied once.
    pub fn restore(&mut self, log: PurgeLog<V>) {
        for (variable, slot, value) in log.drain_rev() {
            self.domains.get_mut(&variable).unwrap().insert(slot, value);
        }
    }

    pub(crate) fn split_mut(
        &mut self,
    ) -> (&[Box<dyn Constraint<V>>], &mut HashMap<VariableId, Domain<V>>) {
        (&self.constraints, &mut self.domains)
    }
}
