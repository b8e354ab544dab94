//! The generic constraint-satisfaction engine.

pub mod constraint;
pub mod constraints;
pub mod csp;
pub mod domain;
pub mod engine;
pub mod heuristics;
pub mod propagation;
pub mod stats;
pub mod work_list;
