//! Tessera is a generic constraint-satisfaction engine with a nonogram
//! puzzle frontend.
//!
//! The engine is problem-agnostic: it models variables with finite, ordered
//! candidate domains and constraints between them, and finds one assignment
//! satisfying every constraint or proves that none exists. Solving
//! interleaves one-shot arc-consistency preprocessing (AC-3) with
//! backtracking search, running forward checking at every decision and
//! replaying an undo journal on every backtrack so failed branches leave no
//! trace in the domains.
//!
//! # Core Concepts
//!
//! - **[`Csp`]**: one problem instance: variables, domains, and the
//!   constraint index.
//! - **[`Constraint`]**: a relation over variables exposing a satisfaction
//!   predicate; anything with that shape qualifies.
//! - **[`SolverEngine`]**: runs propagation and search, with pluggable
//!   variable and value heuristics plus an optional decision budget and
//!   cancellation token.
//!
//! # Example: A Simple 2-Variable Problem
//!
//! Solving `?X != ?Y` where both range over `{1, 2, 3}`:
//!
//! ```
//! use std::collections::HashMap;
//!
//! use tessera::solver::{
//!     constraints::not_equal::NotEqualConstraint,
//!     csp::{Csp, VariableId},
//!     engine::SolverEngine,
//! };
//!
//! let x: VariableId = 0;
//! let y: VariableId = 1;
//!
//! let mut domains = HashMap::new();
//! domains.insert(x, vec![1, 2, 3]);
//! domains.insert(y, vec![1, 2, 3]);
//!
//! let mut csp = Csp::new(vec![x, y], domains)?;
//! csp.add_constraint(Box::new(NotEqualConstraint::new(x, y)))?;
//!
//! let engine = SolverEngine::default();
//! let (solution, _stats) = engine.solve(&mut csp)?;
//! let solution = solution.expect("?X != ?Y over {1,2,3} is satisfiable");
//! assert_ne!(solution.get(x), solution.get(y));
//! # Ok::<(), tessera::error::Error>(())
//! ```
//!
//! [`Csp`]: solver::csp::Csp
//! [`Constraint`]: solver::constraint::Constraint
//! [`SolverEngine`]: solver::engine::SolverEngine

pub mod error;
pub mod nonogram;
pub mod solver;
