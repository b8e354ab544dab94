use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use tracing::debug;

use crate::{
    error::{Result, SolverError},
    solver::{
        csp::{Assignment, Csp, VariableId},
        domain::{PurgeLog, ValueEquality},
        heuristics::{
            value::{IdentityValueHeuristic, ValueOrderingHeuristic},
            variable::{MrvDegreeHeuristic, VariableSelectionHeuristic},
        },
        propagation,
        stats::SearchStats,
    },
};

/// A shareable flag for aborting a running search from outside.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Trips the token. The search notices at its next decision.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Caps on how much work a single `solve` call may do.
///
/// Worst-case search is exponential, so anything user-facing should run
/// with a decision budget or a cancellation token wired in.
#[derive(Debug, Clone, Default)]
pub struct SearchLimits {
    /// Maximum number of value trials before the search gives up with
    /// [`SolverError::BudgetExhausted`]. `None` means unlimited.
    pub max_decisions: Option<u64>,
    /// Aborts the search with [`SolverError::Cancelled`] once tripped.
    pub cancel: Option<CancelToken>,
}

impl SearchLimits {
    fn check(&self, stats: &SearchStats) -> Result<()> {
        if let Some(limit) = self.max_decisions {
            if stats.nodes_visited >= limit {
                return Err(SolverError::BudgetExhausted(limit).into());
            }
        }
        if let Some(token) = &self.cancel {
            if token.is_cancelled() {
                return Err(SolverError::Cancelled.into());
            }
        }
        Ok(())
    }
}

/// One decision point on the explicit search stack: a variable, the ordered
/// snapshot of its candidate values, and the purge log of the value
/// currently committed.
struct Frame<V> {
    variable: VariableId,
    values: Vec<V>,
    cursor: usize,
    purges: Option<PurgeLog<V>>,
}

enum Advance {
    Descend(VariableId),
    Exhausted,
    Solved,
}

/// The main engine for solving constraint satisfaction problems.
///
/// Combines one-shot arc-consistency preprocessing with depth-first
/// backtracking search. Each decision runs forward checking against the
/// still-unassigned neighbours, and every failed branch replays its purge
/// log so sibling branches see exactly the post-preprocessing domains.
pub struct SolverEngine<V: ValueEquality> {
    variable_heuristic: Box<dyn VariableSelectionHeuristic<V>>,
    value_heuristic: Box<dyn ValueOrderingHeuristic<V>>,
    limits: SearchLimits,
}

impl<V: ValueEquality> SolverEngine<V> {
    pub fn new(
        variable_heuristic: Box<dyn VariableSelectionHeuristic<V>>,
        value_heuristic: Box<dyn ValueOrderingHeuristic<V>>,
    ) -> Self {
        Self {
            variable_heuristic,
            value_heuristic,
            limits: SearchLimits::default(),
        }
    }

    pub fn with_limits(mut self, limits: SearchLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Attempts to solve the given constraint satisfaction problem.
    ///
    /// Runs AC-3 first; if that proves unsatisfiability the search is never
    /// entered. If propagation alone collapses every domain, the induced
    /// assignment is the answer. Otherwise backtracking search runs with
    /// forward checking at every decision point.
    ///
    /// # Returns
    ///
    /// * `Ok((Some(assignment), stats))`: a complete, consistent
    ///   assignment; the first one found under the configured heuristics.
    /// * `Ok((None, stats))`: the instance is unsatisfiable. Every domain
    ///   is back in its post-AC-3 state, all search-time purges undone.
    /// * `Err(_)`: the decision budget ran out or the cancel token tripped.
    pub fn solve(&self, csp: &mut Csp<V>) -> Result<(Option<Assignment<V>>, SearchStats)> {
        let mut stats = SearchStats::default();

        if !propagation::run_ac3(csp, &mut stats) {
            return Ok((None, stats));
        }
        if csp.is_network_consistent() {
            debug!("instance solved by propagation alone");
            return Ok((csp.singleton_assignment(), stats));
        }

        let solution = self.search(csp, &mut stats)?;
        Ok((solution, stats))
    }

    fn search(&self, csp: &mut Csp<V>, stats: &mut SearchStats) -> Result<Option<Assignment<V>>> {
        // A fresh assignment per search: bindings never leak between calls.
        let mut assignment = Assignment::new();
        let total = csp.variable_count();
        if total == 0 {
            return Ok(Some(assignment));
        }

        let mut stack: Vec<Frame<V>> = Vec::new();
        match self.variable_heuristic.select_variable(csp, &assignment) {
            Some(variable) => stack.push(self.open_frame(csp, variable)),
            None => return Ok(None),
        }

        while let Some(top) = stack.len().checked_sub(1) {
            let frame = &mut stack[top];

            // Whatever the frame's previous value changed gets undone before
            // the next candidate is tried.
            if let Some(log) = frame.purges.take() {
                csp.restore(log);
                assignment.remove(frame.variable);
                stats.backtracks += 1;
            }

            let advance = loop {
                let Some(value) = frame.values.get(frame.cursor).cloned() else {
                    break Advance::Exhausted;
                };
                frame.cursor += 1;

                self.limits.check(stats)?;
                stats.nodes_visited += 1;

                assignment.insert(frame.variable, value.clone());
                if !csp.is_consistent_at(frame.variable, &assignment) {
                    assignment.remove(frame.variable);
                    continue;
                }

                let Some(log) =
                    propagation::forward_check(csp, frame.variable, &value, &assignment, stats)
                else {
                    // Forward checking restored its own purges already.
                    assignment.remove(frame.variable);
                    continue;
                };

                if assignment.len() == total {
                    break Advance::Solved;
                }
                match self.variable_heuristic.select_variable(csp, &assignment) {
                    Some(next) => {
                        frame.purges = Some(log);
                        break Advance::Descend(next);
                    }
                    None => {
                        // Some remaining domain is already empty: this value
                        // fails like any other.
                        csp.restore(log);
                        assignment.remove(frame.variable);
                        stats.backtracks += 1;
                    }
                }
            };

            match advance {
                Advance::Solved => return Ok(Some(assignment)),
                Advance::Descend(next) => {
                    let frame = self.open_frame(csp, next);
                    stack.push(frame);
                }
                Advance::Exhausted => {
                    stack.pop();
                }
            }
        }

        debug!("search exhausted the tree without a solution");
        Ok(None)
    }

    fn open_frame(&self, csp: &Csp<V>, variable: VariableId) -> Frame<V> {
        let domain = csp.domain(variable).unwrap();
        Frame {
            variable,
            values: self.value_heuristic.order_values(domain),
            cursor: 0,
            purges: None,
        }
    }
}

impl<V: ValueEquality> Default for SolverEngine<V> {
    /// MRV plus degree variable selection, stored-order values, no limits.
    fn default() -> Self {
        Self::new(Box::new(MrvDegreeHeuristic), Box::new(IdentityValueHeuristic))
    }
}


#[cfg(test)]
mod prop_tests {
    use std::collections::HashMap;

    use proptest::prelude::*;

    use super::*;
    use crate::solver::constraints::{equal::EqualConstraint, not_equal::NotEqualConstraint};

    #[derive(Debug, Clone)]
    enum Relation {
        Equal,
        NotEqual,
    }

    fn instance_strategy() -> impl Strategy<Value = (Vec<Vec<i32>>, Vec<(Relation, usize, usize)>)>
    {
        let domains = proptest::collection::vec(
            proptest::collection::vec(0..4i32, 0..=3).prop_map(|mut values| {
                values.sort_unstable();
                values.dedup();
                values
            }),
            2..=4,
        );
        domains.prop_flat_map(|domains| {
            let variable_count = domains.len();
            let relations = proptest::collection::vec(
                (
                    prop_oneof![Just(Relation::Equal), Just(Relation::NotEqual)],
                    0..variable_count,
                    0..variable_count,
                )
                    .prop_filter("endpoints must differ", |(_, a, b)| a != b),
                0..=4,
            );
            (Just(domains), relations)
        })
    }

    fn brute_force(domains: &[Vec<i32>], relations: &[(Relation, usize, usize)]) -> bool {
        fn extend(
            domains: &[Vec<i32>],
            relations: &[(Relation, usize, usize)],
            chosen: &mut Vec<i32>,
        ) -> bool {
            if chosen.len() == domains.len() {
                return relations.iter().all(|(relation, a, b)| match relation {
                    Relation::Equal => chosen[*a] == chosen[*b],
                    Relation::NotEqual => chosen[*a] != chosen[*b],
                });
            }
            for &value in &domains[chosen.len()] {
                chosen.push(value);
                if extend(domains, relations, chosen) {
                    return true;
                }
                chosen.pop();
            }
            false
        }
        extend(domains, relations, &mut Vec::new())
    }

    proptest! {
        #[test]
        fn search_agrees_with_brute_force((domains, relations) in instance_strategy()) {
            let variables: Vec<VariableId> = (0..domains.len() as VariableId).collect();
            let mut domain_map = HashMap::new();
            for (i, values) in domains.iter().enumerate() {
                domain_map.insert(i as VariableId, values.clone());
            }
            let mut csp = Csp::new(variables, domain_map).unwrap();
            for (relation, a, b) in &relations {
                let (a, b) = (*a as VariableId, *b as VariableId);
                match relation {
                    Relation::Equal => {
                        csp.add_constraint(Box::new(EqualConstraint::new(a, b))).unwrap();
                    }
                    Relation::NotEqual => {
                        csp.add_constraint(Box::new(NotEqualConstraint::new(a, b))).unwrap();
                    }
                }
            }

            let engine = SolverEngine::default();
            let (solution, _stats) = engine.solve(&mut csp).unwrap();

            let satisfiable = brute_force(&domains, &relations);
            prop_assert_eq!(solution.is_some(), satisfiable);

            if let Some(assignment) = solution {
                prop_assert!(csp.is_consistent(&assignment));
                prop_assert_eq!(assignment.len(), domains.len());
            }
        }
    }
}
