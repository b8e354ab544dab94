//! Strategies for selecting which variable to branch on next.

use rand::seq::IteratorRandom;

use crate::solver::{
    csp::{Assignment, Csp, VariableId},
    domain::ValueEquality,
};

/// A trait for variable-selection heuristics.
///
/// # Returns (contract shared by every implementation)
///
/// * `Some(variable)`: the unassigned variable to branch on next.
/// * `None`: no variable is selectable. When unassigned variables remain,
///   this means the chosen candidate's domain is empty: callers must treat
///   it as an immediate dead end for the current branch, never as "search
///   complete".
pub trait VariableSelectionHeuristic<V: ValueEquality> {
    fn select_variable(&self, csp: &Csp<V>, assignment: &Assignment<V>) -> Option<VariableId>;
}

/// Picks the unassigned variable with the fewest remaining values, breaking
/// ties by preferring the variable registered under the most constraints.
///
/// Fail-first on the size criterion, maximum pruning leverage on the degree
/// criterion. Remaining ties go to declaration order, which keeps the first
/// solution a deterministic function of the input.
pub struct MrvDegreeHeuristic;

impl<V: ValueEquality> VariableSelectionHeuristic<V> for MrvDegreeHeuristic {
    fn select_variable(&self, csp: &Csp<V>, assignment: &Assignment<V>) -> Option<VariableId> {
        let mut best: Option<(VariableId, usize, usize)> = None;
        for &variable in csp.variables() {
            if assignment.contains(variable) {
                continue;
            }
            let size = csp.domain(variable).map_or(0, |domain| domain.len());
            let degree = csp.constraints_on(variable).len();
            best = match best {
                None => Some((variable, size, degree)),
                Some((_, best_size, best_degree))
                    if size < best_size || (size == best_size && degree > best_degree) =>
                {
                    Some((variable, size, degree))
                }
                keep => keep,
            };
        }

        let (variable, size, _) = best?;
        if size == 0 {
            return None;
        }
        Some(variable)
    }
}

/// Picks the first unassigned variable in declaration order.
///
/// A baseline for tests and benchmarks.
pub struct SelectFirstHeuristic;

impl<V: ValueEquality> VariableSelectionHeuristic<V> for SelectFirstHeuristic {
    fn select_variable(&self, csp: &Csp<V>, assignment: &Assignment<V>) -> Option<VariableId> {
        let variable = csp
            .variables()
            .iter()
            .copied()
            .find(|variable| !assignment.contains(*variable))?;
        if csp.domain(variable).map_or(true, |domain| domain.is_empty()) {
            return None;
        }
        Some(variable)
    }
}

/// Picks an unassigned variable uniformly at random.
///
/// Trades the deterministic first-solution contract for variety when
/// probing instances whose input order hides pathological orderings.
pub struct RandomVariableHeuristic;

impl<V: ValueEquality> VariableSelectionHeuristic<V> for RandomVariableHeuristic {
    fn select_variable(&self, csp: &Csp<V>, assignment: &Assignment<V>) -> Option<VariableId> {
        let variable = csp
            .variables()
            .iter()
            .copied()
            .filter(|variable| !assignment.contains(*variable))
            .choose(&mut rand::thread_rng())?;
        if csp.domain(variable).map_or(true, |domain| domain.is_empty()) {
            return None;
        }
        Some(variable)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::solver::constraints::not_equal::NotEqualConstraint;

    fn csp_with(entries: &[(VariableId, &[i32])]) -> Csp<i32> {
        let variables = entries.iter().map(|(variable, _)| *variable).collect();
        let domains: HashMap<VariableId, Vec<i32>> = entries
            .iter()
            .map(|(variable, values)| (*variable, values.to_vec()))
            .collect();
        Csp::new(variables, domains).unwrap()
    }

    #[test]
    fn mrv_prefers_the_smallest_domain() {
        let csp = csp_with(&[(0, &[1, 2, 3]), (1, &[1, 2]), (2, &[1, 2, 3])]);
        let selected = MrvDegreeHeuristic.select_variable(&csp, &Assignment::new());
        assert_eq!(selected, Some(1));
    }

    #[test]
    fn degree_breaks_size_ties() {
        let mut csp = csp_with(&[(0, &[1, 2]), (1, &[1, 2]), (2, &[1, 2])]);
        csp.add_constraint(Box::new(NotEqualConstraint::new(1, 0)))
            .unwrap();
        csp.add_constraint(Box::new(NotEqualConstraint::new(1, 2)))
            .unwrap();

        let selected = MrvDegreeHeuristic.select_variable(&csp, &Assignment::new());
        assert_eq!(selected, Some(1));
    }

    #[test]
    fn an_empty_best_domain_signals_a_dead_end() {
        let csp = csp_with(&[(0, &[]), (1, &[1])]);
        let selected = MrvDegreeHeuristic.select_variable(&csp, &Assignment::new());
        assert_eq!(selected, None);
    }

    #[test]
    fn assigned_variables_are_skipped() {
        let csp = csp_with(&[(0, &[1]), (1, &[1, 2])]);
        let mut assignment = Assignment::new();
        assignment.insert(0, 1);

        let selected = MrvDegreeHeuristic.select_variable(&csp, &assignment);
        assert_eq!(selected, Some(1));
    }

    #[test]
    fn select_first_walks_declaration_order() {
        let csp = csp_with(&[(3, &[1]), (0, &[1, 2])]);
        let selected = SelectFirstHeuristic.select_variable(&csp, &Assignment::new());
        assert_eq!(selected, Some(3));
    }
}
