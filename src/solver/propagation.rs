//! Domain pruning: one-shot arc consistency (AC-3) and per-decision
//! forward checking.
//!
//! Both algorithms are binary-only. An arc is always the *first two*
//! variables a constraint declares, in that order; constraints with fewer
//! than two variables are never revised, and constraints with more are
//! revised only over the declared pair. Higher-arity constraints still
//! count for the full consistency checks on [`Csp`].

use tracing::debug;

use crate::solver::{
    csp::{Assignment, ConstraintId, Csp, VariableId},
    domain::{PurgeLog, ValueEquality},
    stats::SearchStats,
    work_list::WorkList,
};

enum Revision {
    Unchanged,
    Pruned(u64),
    Emptied,
}

/// Runs AC-3 to a fixpoint over the whole instance, pruning domains in
/// place.
///
/// Returns `false` if some domain was emptied, which proves the instance
/// unsatisfiable; the prunings made up to that point are kept, since AC-3
/// has no partial-result notion, and callers hand the domains to search
/// exactly as they stand. The pruning is permanent: nothing is journaled; a
/// second run over the same instance changes nothing.
pub fn run_ac3<V: ValueEquality>(csp: &mut Csp<V>, stats: &mut SearchStats) -> bool {
    let mut worklist = WorkList::new();
    for constraint_id in 0..csp.constraint_count() {
        worklist.push_back(constraint_id);
    }

    while let Some(constraint_id) = worklist.pop_front() {
        stats.ac3_revisions += 1;
        match revise(csp, constraint_id) {
            Revision::Unchanged => {}
            Revision::Emptied => {
                debug!(constraint_id, "AC-3 emptied a domain; instance is unsatisfiable");
                return false;
            }
            Revision::Pruned(removed) => {
                stats.ac3_prunings += removed;
                // The revised variable lost values, so every arc leaning on
                // it must be re-examined.
                let revised = csp.constraint(constraint_id).variables()[0];
                for &dependent in csp.constraints_on(revised) {
                    worklist.push_back(dependent);
                }
            }
        }
    }

    debug!("AC-3 reached its fixpoint");
    true
}

/// Removes from the arc's first variable every value with no supporting
/// partner left in the second variable's domain.
fn revise<V: ValueEquality>(csp: &mut Csp<V>, constraint_id: ConstraintId) -> Revision {
    let scope = csp.constraint(constraint_id).variables();
    if scope.len() < 2 {
        return Revision::Unchanged;
    }
    let (x, y) = (scope[0], scope[1]);
    if x == y {
        return Revision::Unchanged;
    }

    // Snapshot the partner's values so `x`'s domain can be held mutably.
    let witnesses: Vec<V> = csp.domain(y).unwrap().values().to_vec();

    let (constraints, domains) = csp.split_mut();
    let constraint = constraints[constraint_id].as_ref();
    let domain = domains.get_mut(&x).unwrap();

    let mut probe = Assignment::new();
    let mut removed = 0u64;
    let mut slot = 0;
    while slot < domain.len() {
        probe.insert(x, domain.values()[slot].clone());
        let supported = witnesses.iter().any(|witness| {
            probe.insert(y, witness.clone());
            constraint.satisfied(&probe)
        });
        if supported {
            slot += 1;
        } else {
            domain.remove(slot);
            removed += 1;
        }
    }

    if removed == 0 {
        Revision::Unchanged
    } else if domain.is_empty() {
        Revision::Emptied
    } else {
        Revision::Pruned(removed)
    }
}

/// Forward checking for one fresh binding of `variable` to `value`.
///
/// For every binary constraint registered under `variable` whose partner is
/// still unassigned, purges the partner values the constraint rejects
/// against `value`, journaling each removal. When a partner domain empties,
/// the partial assignment provably cannot extend to a solution: everything
/// journaled so far (partial work on the failing partner and every partner
/// handled before it) is restored, and `None` comes back. Otherwise the
/// caller receives the log and owns the eventual restore.
///
/// `assignment` must already contain the trial binding.
pub fn forward_check<V: ValueEquality>(
    csp: &mut Csp<V>,
    variable: VariableId,
    value: &V,
    assignment: &Assignment<V>,
    stats: &mut SearchStats,
) -> Option<PurgeLog<V>> {
    let mut log = PurgeLog::default();
    let mut probe = Assignment::new();
    probe.insert(variable, value.clone());

    let constraint_ids = csp.constraints_on(variable).to_vec();
    for constraint_id in constraint_ids {
        let scope = csp.constraint(constraint_id).variables();
        if scope.len() < 2 {
            continue;
        }
        let (first, second) = (scope[0], scope[1]);
        let neighbour = if first == variable {
            second
        } else if second == variable {
            first
        } else {
            // Registered under a variable outside the declared pair:
            // propagation does not run through it.
            continue;
        };
        if neighbour == variable || assignment.contains(neighbour) {
            continue;
        }

        let (constraints, domains) = csp.split_mut();
        let constraint = constraints[constraint_id].as_ref();
        let domain = domains.get_mut(&neighbour).unwrap();

        let mut slot = 0;
        while slot < domain.len() {
            probe.insert(neighbour, domain.values()[slot].clone());
            if constraint.satisfied(&probe) {
                slot += 1;
            } else {
                let rejected = domain.remove(slot);
                log.record(neighbour, slot, rejected);
                stats.fc_prunings += 1;
            }
        }
        probe.remove(neighbour);

        let emptied = domain.is_empty();
        if emptied {
            stats.fc_contradictions += 1;
            csp.restore(log);
            return None;
        }
    }

    Some(log)
}
